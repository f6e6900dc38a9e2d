use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    entities::movie,
    error::AppResult,
    models::NewMovie,
    unit_of_work::{Change, ChangeSet, PendingKey},
};

pub struct MovieRepository<'a> {
    db: &'a DatabaseConnection,
    changes: &'a mut ChangeSet,
}

impl<'a> MovieRepository<'a> {
    pub(crate) fn new(db: &'a DatabaseConnection, changes: &'a mut ChangeSet) -> Self {
        Self { db, changes }
    }

    /// All movies ordered by title.
    pub async fn get_all(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find()
            .order_by_asc(movie::Column::Title)
            .order_by_asc(movie::Column::Id)
            .all(self.db)
            .await?)
    }

    /// Movies of one category ordered by title.
    pub async fn get_all_by_category_id(&self, category_id: i32) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find()
            .filter(movie::Column::CategoryId.eq(category_id))
            .order_by_asc(movie::Column::Title)
            .order_by_asc(movie::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(self.db).await?)
    }

    pub async fn get_count(&self) -> AppResult<u64> {
        Ok(movie::Entity::find().count(self.db).await?)
    }

    /// The movie with the longest duration; equal durations go to the alphabetically first title.
    pub async fn get_longest_movie(&self) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find()
            .order_by_desc(movie::Column::Duration)
            .order_by_asc(movie::Column::Title)
            .order_by_asc(movie::Column::Id)
            .one(self.db)
            .await?)
    }

    pub fn insert(&mut self, movie: NewMovie) -> PendingKey {
        self.changes.stage(Change::InsertMovie(movie))
    }

    pub fn add_range(&mut self, movies: impl IntoIterator<Item = NewMovie>) -> Vec<PendingKey> {
        movies.into_iter().map(|m| self.insert(m)).collect()
    }

    pub fn delete(&mut self, movie: movie::Model) {
        self.changes.stage(Change::DeleteMovie(movie));
    }
}

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
    sea_query::{Expr, Func, SimpleExpr},
};
use tracing::debug;

use crate::{
    entities::{category, movie},
    error::AppResult,
    models::{CategoryAverageLength, CategoryStatisticEntry, CategoryWithMovies, NewCategory},
    unit_of_work::{Change, ChangeSet, PendingKey},
};

pub struct CategoryRepository<'a> {
    db: &'a DatabaseConnection,
    changes: &'a mut ChangeSet,
}

#[derive(Debug, FromQueryResult)]
struct MovieTotals {
    category_id: i32,
    number_of_movies: i64,
    total_duration: i64,
}

#[derive(Debug, FromQueryResult)]
struct MovieAverage {
    category_id: i32,
    average_length: f64,
}

#[derive(Debug, FromQueryResult)]
struct YearCount {
    year: i32,
    movie_count: i64,
}

fn movie_count() -> SimpleExpr {
    Func::count(Expr::col((movie::Entity, movie::Column::Id))).into()
}

impl<'a> CategoryRepository<'a> {
    pub(crate) fn new(db: &'a DatabaseConnection, changes: &'a mut ChangeSet) -> Self {
        Self { db, changes }
    }

    /// All categories ordered by name.
    pub async fn get_all(&self) -> AppResult<Vec<category::Model>> {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::Name)
            .order_by_asc(category::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<category::Model>> {
        Ok(category::Entity::find_by_id(id).one(self.db).await?)
    }

    /// Loads a category together with all of its movies.
    pub async fn get_by_id_with_movies(&self, id: i32) -> AppResult<Option<CategoryWithMovies>> {
        let found = category::Entity::find_by_id(id)
            .find_with_related(movie::Entity)
            .order_by_asc(movie::Column::Id)
            .all(self.db)
            .await?;

        Ok(found.into_iter().next().map(|(category, movies)| CategoryWithMovies { category, movies }))
    }

    /// Movie count and total running time for every category, including empty ones,
    /// ordered by category name.
    pub async fn get_category_statistics(&self) -> AppResult<Vec<CategoryStatisticEntry>> {
        let categories = self.get_all().await?;

        let totals: HashMap<i32, MovieTotals> = movie::Entity::find()
            .select_only()
            .column(movie::Column::CategoryId)
            .column_as(movie_count(), "number_of_movies")
            .column_as(
                SimpleExpr::from(Func::sum(Expr::col((movie::Entity, movie::Column::Duration)))),
                "total_duration",
            )
            .group_by(movie::Column::CategoryId)
            .into_model::<MovieTotals>()
            .all(self.db)
            .await?
            .into_iter()
            .map(|t| (t.category_id, t))
            .collect();

        debug!(categories = categories.len(), non_empty = totals.len(), "computed category statistics");

        Ok(categories
            .into_iter()
            .map(|category| {
                let (number_of_movies, total_duration) = totals
                    .get(&category.id)
                    .map(|t| (t.number_of_movies, t.total_duration))
                    .unwrap_or((0, 0));
                CategoryStatisticEntry { category, number_of_movies, total_duration }
            })
            .collect())
    }

    /// The category owning the most movies; ties go to the alphabetically first name.
    pub async fn get_category_with_most_movies(&self) -> AppResult<Option<CategoryStatisticEntry>> {
        let stats = self.get_category_statistics().await?;

        // `stats` is already name-ordered, so keeping the first maximum resolves ties.
        Ok(stats.into_iter().fold(None::<CategoryStatisticEntry>, |best, entry| match best {
            Some(best) if best.number_of_movies >= entry.number_of_movies => Some(best),
            _ => Some(entry),
        }))
    }

    /// Mean movie duration per category, longest average first, ties by name.
    ///
    /// Categories without movies have no average and are left out.
    pub async fn get_categories_with_average_length_of_movies(
        &self,
    ) -> AppResult<Vec<CategoryAverageLength>> {
        let categories: HashMap<i32, category::Model> =
            self.get_all().await?.into_iter().map(|c| (c.id, c)).collect();

        let averages = movie::Entity::find()
            .select_only()
            .column(movie::Column::CategoryId)
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col((movie::Entity, movie::Column::Duration)))),
                "average_length",
            )
            .group_by(movie::Column::CategoryId)
            .into_model::<MovieAverage>()
            .all(self.db)
            .await?;

        let mut out: Vec<CategoryAverageLength> = averages
            .into_iter()
            .filter_map(|a| {
                categories.get(&a.category_id).map(|category| CategoryAverageLength {
                    category: category.clone(),
                    average_length: a.average_length,
                })
            })
            .collect();

        out.sort_by(|a, b| {
            b.average_length
                .total_cmp(&a.average_length)
                .then_with(|| a.category.name.cmp(&b.category.name))
                .then_with(|| a.category.id.cmp(&b.category.id))
        });

        Ok(out)
    }

    /// The release year with the most movies in the category named `category_name`.
    ///
    /// The name must match exactly. Ties go to the earliest year; `None` when the
    /// category has no movies or does not exist.
    pub async fn get_year_with_most_publications_for_category(
        &self,
        category_name: &str,
    ) -> AppResult<Option<i32>> {
        let top = movie::Entity::find()
            .select_only()
            .column(movie::Column::Year)
            .column_as(movie_count(), "movie_count")
            .join(sea_orm::JoinType::InnerJoin, movie::Relation::Category.def())
            .filter(category::Column::Name.eq(category_name))
            .group_by(movie::Column::Year)
            .order_by_desc(movie_count())
            .order_by_asc(movie::Column::Year)
            .into_model::<YearCount>()
            .one(self.db)
            .await?;

        if let Some(top) = &top {
            debug!(category = %category_name, year = top.year, movies = top.movie_count, "top publication year");
        }

        Ok(top.map(|t| t.year))
    }

    /// Stages a new category. Its id is available from the save receipt.
    pub fn insert(&mut self, category: NewCategory) -> PendingKey {
        self.changes.stage(Change::InsertCategory(category))
    }

    /// Stages a rename of an existing category.
    pub fn update(&mut self, category: category::Model) {
        self.changes.stage(Change::UpdateCategory(category));
    }

    pub fn delete(&mut self, category: category::Model) {
        self.changes.stage(Change::DeleteCategory(category));
    }
}

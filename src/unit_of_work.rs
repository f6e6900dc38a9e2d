//! Transactional boundary over the category and movie repositories.
//!
//! A [`UnitOfWork`] collects staged inserts, updates and deletes and writes them in a single
//! database transaction on [`UnitOfWork::save_changes`]. Every staged entity is validated
//! before the transaction is opened; a failure anywhere leaves the store untouched.

use std::collections::HashMap;

use migration::MigratorTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, Schema, Set, TransactionTrait,
    sea_query::{Alias, Expr, Table},
};
use tracing::{debug, info, warn};

use crate::{
    entities::{category, movie},
    error::{AppError, AppResult},
    models::{NewCategory, NewMovie},
    repositories::{CategoryRepository, MovieRepository},
    validation::{self, ClassicMovieRule},
};

/// Handle to a staged insert, resolved to the new row id by [`SaveReceipt::id_of`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PendingKey(usize);

#[derive(Clone, Debug)]
pub(crate) enum Change {
    InsertCategory(NewCategory),
    UpdateCategory(category::Model),
    DeleteCategory(category::Model),
    InsertMovie(NewMovie),
    DeleteMovie(movie::Model),
}

#[derive(Debug, Default)]
pub(crate) struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub(crate) fn stage(&mut self, change: Change) -> PendingKey {
        self.changes.push(change);
        PendingKey(self.changes.len() - 1)
    }

    fn len(&self) -> usize {
        self.changes.len()
    }
}

/// Outcome of a committed save.
#[derive(Debug, Default)]
pub struct SaveReceipt {
    affected: u64,
    inserted: HashMap<PendingKey, i32>,
}

impl SaveReceipt {
    /// Number of rows inserted, updated or deleted.
    pub fn affected(&self) -> u64 {
        self.affected
    }

    pub fn id_of(&self, key: PendingKey) -> Option<i32> {
        self.inserted.get(&key).copied()
    }
}

pub struct UnitOfWork {
    db: DatabaseConnection,
    classic_movie_rule: ClassicMovieRule,
    changes: ChangeSet,
}

impl UnitOfWork {
    pub fn new(db: DatabaseConnection, classic_movie_rule: ClassicMovieRule) -> Self {
        Self { db, classic_movie_rule, changes: ChangeSet::default() }
    }

    pub fn categories(&mut self) -> CategoryRepository<'_> {
        CategoryRepository::new(&self.db, &mut self.changes)
    }

    pub fn movies(&mut self) -> MovieRepository<'_> {
        MovieRepository::new(&self.db, &mut self.changes)
    }

    pub fn pending_changes(&self) -> usize {
        self.changes.len()
    }

    /// Validates and commits everything staged so far.
    ///
    /// The staged batch is consumed whether or not the commit succeeds.
    pub async fn save_changes(&mut self) -> AppResult<SaveReceipt> {
        let batch = std::mem::take(&mut self.changes).changes;
        if batch.is_empty() {
            return Ok(SaveReceipt::default());
        }

        for change in &batch {
            if let Err(err) = self.validate(change) {
                warn!(error = %err, staged = batch.len(), "rejecting staged batch");
                return Err(err);
            }
        }

        let txn = self.db.begin().await?;
        let mut receipt = SaveReceipt::default();

        for (index, change) in batch.into_iter().enumerate() {
            let (affected, inserted_id) = apply(&txn, change).await?;
            receipt.affected += affected;
            if let Some(id) = inserted_id {
                receipt.inserted.insert(PendingKey(index), id);
            }
        }

        txn.commit().await?;
        info!(affected = receipt.affected, "saved changes");

        Ok(receipt)
    }

    /// Creates the tables straight from the entity definitions when they are missing.
    pub async fn create_database(&self) -> AppResult<()> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut categories = schema.create_table_from_entity(category::Entity);
        categories.if_not_exists();
        self.db.execute(backend.build(&categories)).await?;

        let mut movies = schema.create_table_from_entity(movie::Entity);
        movies.if_not_exists();
        self.db.execute(backend.build(&movies)).await?;

        info!("database created");
        Ok(())
    }

    /// Applies all pending schema migrations.
    pub async fn migrate_database(&self) -> AppResult<()> {
        migration::Migrator::up(&self.db, None).await?;
        info!("database migrated");
        Ok(())
    }

    /// Drops every table, including migration bookkeeping.
    pub async fn delete_database(&self) -> AppResult<()> {
        let backend = self.db.get_database_backend();
        let drops = [
            Table::drop().table(movie::Entity).if_exists().to_owned(),
            Table::drop().table(category::Entity).if_exists().to_owned(),
            Table::drop().table(Alias::new("seaql_migrations")).if_exists().to_owned(),
        ];

        for stmt in &drops {
            self.db.execute(backend.build(stmt)).await?;
        }

        info!("database deleted");
        Ok(())
    }

    fn validate(&self, change: &Change) -> AppResult<()> {
        match change {
            Change::InsertCategory(category) => validation::validate_category(category),
            Change::UpdateCategory(category) => validation::validate_category_name(&category.name),
            Change::InsertMovie(movie) => validation::validate_movie(movie, &self.classic_movie_rule),
            Change::DeleteCategory(_) | Change::DeleteMovie(_) => Ok(()),
        }
    }
}

async fn apply(txn: &DatabaseTransaction, change: Change) -> AppResult<(u64, Option<i32>)> {
    match change {
        Change::InsertCategory(new) => {
            let model = category::ActiveModel { name: Set(new.name), ..Default::default() }
                .insert(txn)
                .await?;
            debug!(id = model.id, name = %model.name, "inserted category");
            Ok((1, Some(model.id)))
        },
        Change::UpdateCategory(model) => {
            let res = category::Entity::update_many()
                .col_expr(category::Column::Name, Expr::value(model.name))
                .filter(category::Column::Id.eq(model.id))
                .exec(txn)
                .await?;
            Ok((res.rows_affected, None))
        },
        Change::DeleteCategory(model) => {
            let owned = movie::Entity::find()
                .filter(movie::Column::CategoryId.eq(model.id))
                .count(txn)
                .await?;
            if owned > 0 {
                return Err(AppError::validation(format!(
                    "category '{}' still has {owned} movie(s) and cannot be deleted",
                    model.name
                )));
            }
            let res = category::Entity::delete_by_id(model.id).exec(txn).await?;
            Ok((res.rows_affected, None))
        },
        Change::InsertMovie(new) => {
            if category::Entity::find_by_id(new.category_id).one(txn).await?.is_none() {
                return Err(AppError::validation(format!(
                    "category {} does not exist",
                    new.category_id
                )));
            }
            let model = movie::ActiveModel {
                title: Set(new.title),
                year: Set(new.year),
                duration: Set(new.duration),
                category_id: Set(new.category_id),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            debug!(id = model.id, title = %model.title, "inserted movie");
            Ok((1, Some(model.id)))
        },
        Change::DeleteMovie(model) => {
            let res = movie::Entity::delete_by_id(model.id).exec(txn).await?;
            Ok((res.rows_affected, None))
        },
    }
}

//! Narrow, named queries over the persisted entity sets.
//!
//! Repositories are handed out by [`UnitOfWork`](crate::unit_of_work::UnitOfWork). Reads go
//! straight to the store; writes are only staged and take effect on `save_changes`.

mod category;
mod movie;

pub use category::CategoryRepository;
pub use movie::MovieRepository;

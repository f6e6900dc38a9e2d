use crate::{
    db,
    models::{NewCategory, NewMovie},
    unit_of_work::UnitOfWork,
    validation::ClassicMovieRule,
};

pub async fn memory_uow() -> UnitOfWork {
    let db = db::connect("sqlite::memory:").await.expect("connect in-memory sqlite");
    let uow = UnitOfWork::new(db, ClassicMovieRule::DEFAULT);
    uow.migrate_database().await.expect("migrate in-memory sqlite");
    uow
}

pub async fn seed_category(uow: &mut UnitOfWork, name: &str) -> i32 {
    let key = uow.categories().insert(NewCategory::new(name));
    uow.save_changes().await.expect("save category").id_of(key).expect("category id")
}

pub async fn seed_movie(
    uow: &mut UnitOfWork,
    title: &str,
    year: i32,
    duration: i32,
    category_id: i32,
) -> i32 {
    let key = uow.movies().insert(NewMovie {
        title: title.to_string(),
        year,
        duration,
        category_id,
    });
    uow.save_changes().await.expect("save movie").id_of(key).expect("movie id")
}

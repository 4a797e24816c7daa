use anyhow::Result;
use entity::employees;
use migration::{Migrator, MigratorTrait};
use platform_db::{DbEmployeeStore, DbPool, EmployeeStore};
use sea_orm::{ActiveValue::NotSet, Database, IntoActiveModel, Set, SqlErr};

async fn setup_store() -> Result<DbEmployeeStore> {
    let pool: DbPool = Database::connect("sqlite::memory:").await?;
    Migrator::up(&pool, None).await?;
    Ok(DbEmployeeStore::new(pool))
}

fn new_employee(first: &str, last: &str, email: &str) -> employees::ActiveModel {
    employees::ActiveModel {
        id: NotSet,
        first_name: Set(first.to_string()),
        last_name: Set(last.to_string()),
        email_id: Set(email.to_string()),
    }
}

#[tokio::test]
async fn save_assigns_identity_and_roundtrips() -> Result<()> {
    let store = setup_store().await?;

    let saved = store
        .save(new_employee("John", "Doe", "john.doe@example.com"))
        .await?;
    assert!(saved.id >= 1);

    let fetched = store.find_by_id(saved.id).await?.expect("row must exist");
    assert_eq!(fetched, saved);

    let all = store.find_all().await?;
    assert_eq!(all, vec![saved]);
    Ok(())
}

#[tokio::test]
async fn find_by_email_matches_exact_address() -> Result<()> {
    let store = setup_store().await?;
    store
        .save(new_employee("John", "Doe", "john.doe@example.com"))
        .await?;

    let found = store.find_by_email("john.doe@example.com").await?;
    assert_eq!(found.map(|row| row.first_name), Some("John".to_string()));

    let missing = store.find_by_email("nobody@example.com").await?;
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_email_violates_unique_index() -> Result<()> {
    let store = setup_store().await?;
    store
        .save(new_employee("John", "Doe", "john.doe@example.com"))
        .await?;

    let err = store
        .save(new_employee("Jane", "Roe", "john.doe@example.com"))
        .await
        .expect_err("unique index must reject the second insert");
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    assert_eq!(store.find_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn save_with_id_updates_in_place() -> Result<()> {
    let store = setup_store().await?;
    let saved = store
        .save(new_employee("John", "Doe", "john.doe@example.com"))
        .await?;

    let mut active = saved.clone().into_active_model();
    active.first_name = Set("Jane".to_string());
    active.last_name = Set("Smith".to_string());
    active.email_id = Set("jane.smith@example.com".to_string());
    let updated = store.save(active).await?;

    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.first_name, "Jane");
    assert_eq!(store.find_all().await?.len(), 1);

    let fetched = store.find_by_id(saved.id).await?.expect("row must exist");
    assert_eq!(fetched.email_id, "jane.smith@example.com");
    Ok(())
}

#[tokio::test]
async fn delete_removes_row() -> Result<()> {
    let store = setup_store().await?;
    let saved = store
        .save(new_employee("John", "Doe", "john.doe@example.com"))
        .await?;

    store.delete(saved.clone()).await?;

    assert!(store.find_by_id(saved.id).await?.is_none());
    assert!(store.find_all().await?.is_empty());
    Ok(())
}

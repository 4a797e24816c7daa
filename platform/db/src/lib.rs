//! Database primitives and the employee persistence gateway.

use std::time::Duration;

use async_trait::async_trait;
use entity::employees;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, QueryFilter,
};
use serde::Deserialize;
use thiserror::Error;

/// Shared connection handle.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("DATABASE_URL is not set")]
    MissingUrl,
    #[error(transparent)]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Connection settings sourced from the environment.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    30
}

impl DatabaseSettings {
    pub fn from_env() -> DbResult<Self> {
        let url = std::env::var("DATABASE_URL").map_err(|_| DbError::MissingUrl)?;
        Ok(Self {
            url,
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", default_max_connections()),
            connect_timeout_secs: env_parse(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                default_connect_timeout_secs(),
            ),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(fallback)
}

/// Open a pooled connection with the given settings.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(settings.url.clone());
    options
        .max_connections(settings.max_connections)
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .sqlx_logging(false);
    Ok(Database::connect(options).await?)
}

/// Storage operations for employee records.
///
/// `save` inserts when the id is unset and updates otherwise; the unique
/// index on the email column is the authoritative duplicate guard.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<employees::Model>, DbErr>;

    async fn find_by_id(&self, id: i64) -> Result<Option<employees::Model>, DbErr>;

    async fn find_by_email(&self, email: &str) -> Result<Option<employees::Model>, DbErr>;

    async fn save(&self, employee: employees::ActiveModel) -> Result<employees::Model, DbErr>;

    async fn delete(&self, employee: employees::Model) -> Result<(), DbErr>;
}

/// SeaORM-backed [`EmployeeStore`].
#[derive(Clone)]
pub struct DbEmployeeStore {
    pool: DbPool,
}

impl DbEmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for DbEmployeeStore {
    async fn find_all(&self) -> Result<Vec<employees::Model>, DbErr> {
        employees::Entity::find().all(&self.pool).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find_by_id(id).one(&self.pool).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find()
            .filter(employees::Column::EmailId.eq(email))
            .one(&self.pool)
            .await
    }

    async fn save(&self, employee: employees::ActiveModel) -> Result<employees::Model, DbErr> {
        if employee.id.is_not_set() {
            employee.insert(&self.pool).await
        } else {
            employee.update(&self.pool).await
        }
    }

    async fn delete(&self, employee: employees::Model) -> Result<(), DbErr> {
        employee.delete(&self.pool).await.map(|_| ())
    }
}

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_error(e: impl std::fmt::Display) -> AuthError {
    AuthError::Repository(e.to_string())
}

fn row_into_user(row: PgRow) -> Result<User, AuthError> {
    let id: Uuid = row.try_get("id").map_err(storage_error)?;
    let first_name: String = row.try_get("first_name").map_err(storage_error)?;
    let last_name: String = row.try_get("last_name").map_err(storage_error)?;
    let email: String = row.try_get("email").map_err(storage_error)?;
    let password_hash: String = row.try_get("password_hash").map_err(storage_error)?;
    let role: String = row.try_get("role").map_err(storage_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(storage_error)?;

    Ok(User {
        id: UserId(id),
        first_name: PersonName::new(first_name).map_err(storage_error)?,
        last_name: PersonName::new(last_name).map_err(storage_error)?,
        email: EmailAddress::new(email).map_err(storage_error)?,
        password_hash,
        role: Role::parse(&role).map_err(storage_error)?,
        created_at,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(row_into_user).transpose()
    }

    async fn save(&self, user: User) -> Result<User, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.0)
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique index closes the lookup/insert race between two
            // concurrent registrations of the same email.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AuthError::EmailAlreadyRegistered;
                }
            }
            AuthError::Repository(e.to_string())
        })?;

        Ok(user)
    }
}

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::StoreError;
use crate::users::repo_types::{UpdateFields, User, UserRow};
use crate::users::store::UserStore;

const SELECT_BY_ID: &str = "SELECT id, email, name, created_at FROM users WHERE id = ?";
const SELECT_BY_EMAIL: &str = "SELECT id, email, name, created_at FROM users WHERE email = ?";
const SELECT_BY_CREDENTIALS: &str =
    "SELECT id, email, name, created_at FROM users WHERE email = ? AND password_hash = ?";

/// `users` table access through an explicit pool handle.
#[derive(Clone)]
pub struct UserRepository {
    db: SqlitePool,
}

impl UserRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

/// Build `UPDATE users SET .. WHERE id = ?` for the set slots, name before
/// email. `None` when there is nothing to change.
fn update_statement(id: Uuid, fields: &UpdateFields) -> Option<QueryBuilder<'static, Sqlite>> {
    if fields.is_empty() {
        return None;
    }

    let mut qb = QueryBuilder::<Sqlite>::new("UPDATE users SET ");
    {
        let mut set = qb.separated(", ");
        if let Some(name) = &fields.name {
            set.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(email) = &fields.email {
            set.push("email = ").push_bind_unseparated(email.clone());
        }
    }
    qb.push(" WHERE id = ").push_bind(id.to_string());
    Some(qb)
}

#[async_trait]
impl UserStore for UserRepository {
    #[instrument(skip(self, password_hash))]
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, email, password_hash, name) VALUES (?, ?, ?, ?)")
            .bind(id.to_string())
            .bind(email)
            .bind(password_hash)
            .bind(name)
            .execute(&self.db)
            .await?;
        info!(user_id = %id, "user created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(User::try_from).transpose()?)
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(User::try_from).transpose()?)
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, id: Uuid, fields: &UpdateFields) -> Result<(), StoreError> {
        let Some(mut qb) = update_statement(id, fields) else {
            debug!(user_id = %id, "nothing to update");
            return Ok(());
        };
        let result = qb.build().execute(&self.db).await?;
        debug!(user_id = %id, rows = result.rows_affected(), "user updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.db)
            .await?;
        debug!(user_id = %id, rows = result.rows_affected(), "user removed");
        Ok(())
    }

    #[instrument(skip(self, password_hash))]
    async fn validate_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_BY_CREDENTIALS)
            .bind(email)
            .bind(password_hash)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(User::try_from).transpose()?)
    }
}

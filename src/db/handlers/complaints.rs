//! Database repository for complaints.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::complaints::{
            ComplaintCreateDBRequest, ComplaintDBResponse, ComplaintFilter,
            ComplaintUpdateDBRequest,
        },
    },
    types::ComplaintId,
};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;

pub struct Complaints<'c> {
    db: &'c mut SqliteConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Complaints<'c> {
    type CreateRequest = ComplaintCreateDBRequest;
    type UpdateRequest = ComplaintUpdateDBRequest;
    type Response = ComplaintDBResponse;
    type Id = ComplaintId;
    type Filter = ComplaintFilter;

    #[instrument(skip(self, request), fields(user_id = request.user_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let complaint = sqlx::query_as::<_, ComplaintDBResponse>(
            r#"
            INSERT INTO complaints (user_id, title, text, status, created_at)
            VALUES (?, ?, ?, 'open', ?)
            RETURNING id, user_id, title, text, status, created_at
            "#,
        )
        .bind(request.user_id)
        .bind(&request.title)
        .bind(&request.text)
        .bind(Utc::now())
        .fetch_one(&mut *self.db)
        .await?;

        Ok(complaint)
    }

    #[instrument(skip(self), fields(complaint_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let complaint = sqlx::query_as::<_, ComplaintDBResponse>(
            "SELECT id, user_id, title, text, status, created_at FROM complaints WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(complaint)
    }

    #[instrument(skip(self, filter), fields(user_id = filter.user_id), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let complaints = sqlx::query_as::<_, ComplaintDBResponse>(
            "SELECT id, user_id, title, text, status, created_at FROM complaints WHERE (? IS NULL OR user_id = ?) ORDER BY created_at DESC",
        )
        .bind(filter.user_id)
        .bind(filter.user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(complaints)
    }

    #[instrument(skip(self, request), fields(complaint_id = id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let complaint = sqlx::query_as::<_, ComplaintDBResponse>(
            r#"
            UPDATE complaints SET
                status = COALESCE(?, status)
            WHERE id = ?
            RETURNING id, user_id, title, text, status, created_at
            "#,
        )
        .bind(request.status)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(complaint)
    }

    #[instrument(skip(self), fields(complaint_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM complaints WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Complaints<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn count_open(&mut self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM complaints WHERE status = 'open'")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::Repository;
    use super::*;
    use crate::api::models::complaints::ComplaintStatus;
    use crate::api::models::users::Role;
    use crate::db::handlers::Users;
    use crate::db::models::users::UserCreateDBRequest;
    use crate::types::UserId;
    use sqlx::SqlitePool;

    async fn seed_user(pool: &SqlitePool, email: &str) -> UserId {
        let mut conn = pool.acquire().await.unwrap();
        Users::new(&mut conn)
            .create(&UserCreateDBRequest {
                name: "Guest".to_string(),
                email: email.to_string(),
                password_hash: Some("hash".to_string()),
                role: Role::User,
                room_no: None,
                phone: None,
            })
            .await
            .unwrap()
            .id
    }

    fn sample_create(user_id: UserId, title: &str) -> ComplaintCreateDBRequest {
        ComplaintCreateDBRequest {
            user_id,
            title: title.to_string(),
            text: "The heating is broken.".to_string(),
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_starts_open(pool: SqlitePool) {
        let user_id = seed_user(&pool, "guest@example.com").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Complaints::new(&mut conn);

        let complaint = repo.create(&sample_create(user_id, "Heating")).await.unwrap();

        assert_eq!(complaint.status, ComplaintStatus::Open);
        assert_eq!(complaint.title, "Heating");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_status_transitions(pool: SqlitePool) {
        let user_id = seed_user(&pool, "guest@example.com").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Complaints::new(&mut conn);

        let created = repo.create(&sample_create(user_id, "Noise")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &ComplaintUpdateDBRequest {
                    status: Some(ComplaintStatus::InProgress),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ComplaintStatus::InProgress);

        let updated = repo
            .update(
                created.id,
                &ComplaintUpdateDBRequest {
                    status: Some(ComplaintStatus::Resolved),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ComplaintStatus::Resolved);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_count_open_ignores_resolved(pool: SqlitePool) {
        let user_id = seed_user(&pool, "guest@example.com").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Complaints::new(&mut conn);

        repo.create(&sample_create(user_id, "One")).await.unwrap();
        let second = repo.create(&sample_create(user_id, "Two")).await.unwrap();
        repo.update(
            second.id,
            &ComplaintUpdateDBRequest {
                status: Some(ComplaintStatus::Resolved),
            },
        )
        .await
        .unwrap();

        assert_eq!(repo.count_open().await.unwrap(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_scoped_by_owner(pool: SqlitePool) {
        let ada = seed_user(&pool, "ada@example.com").await;
        let bob = seed_user(&pool, "bob@example.com").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Complaints::new(&mut conn);

        repo.create(&sample_create(ada, "Mine")).await.unwrap();
        repo.create(&sample_create(bob, "Theirs")).await.unwrap();

        let mine = repo.list(&ComplaintFilter { user_id: Some(ada) }).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Mine");
    }
}

//! Database repository for reservations.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::reservations::{
            ReservationCreateDBRequest, ReservationDBResponse, ReservationFilter,
            ReservationUpdateDBRequest,
        },
    },
    types::ReservationId,
};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;

const SELECT_COLUMNS: &str =
    "id, user_id, service_id, start_time, end_time, status, note, created_at";

pub struct Reservations<'c> {
    db: &'c mut SqliteConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Reservations<'c> {
    type CreateRequest = ReservationCreateDBRequest;
    type UpdateRequest = ReservationUpdateDBRequest;
    type Response = ReservationDBResponse;
    type Id = ReservationId;
    type Filter = ReservationFilter;

    #[instrument(skip(self, request), fields(user_id = request.user_id, service_id = request.service_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let reservation = sqlx::query_as::<_, ReservationDBResponse>(&format!(
            r#"
            INSERT INTO reservations (user_id, service_id, start_time, end_time, status, note, created_at)
            VALUES (?, ?, ?, ?, 'pending', ?, ?)
            RETURNING {SELECT_COLUMNS}
            "#,
        ))
        .bind(request.user_id)
        .bind(request.service_id)
        .bind(&request.start_time)
        .bind(&request.end_time)
        .bind(&request.note)
        .bind(Utc::now())
        .fetch_one(&mut *self.db)
        .await?;

        Ok(reservation)
    }

    #[instrument(skip(self), fields(reservation_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let reservation = sqlx::query_as::<_, ReservationDBResponse>(&format!(
            "SELECT {SELECT_COLUMNS} FROM reservations WHERE id = ?",
        ))
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(reservation)
    }

    #[instrument(skip(self, filter), fields(user_id = filter.user_id), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let reservations = sqlx::query_as::<_, ReservationDBResponse>(&format!(
            "SELECT {SELECT_COLUMNS} FROM reservations WHERE (? IS NULL OR user_id = ?) ORDER BY created_at DESC",
        ))
        .bind(filter.user_id)
        .bind(filter.user_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(reservations)
    }

    #[instrument(skip(self, request), fields(reservation_id = id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let reservation = sqlx::query_as::<_, ReservationDBResponse>(&format!(
            r#"
            UPDATE reservations SET
                status = COALESCE(?, status),
                note = COALESCE(?, note)
            WHERE id = ?
            RETURNING {SELECT_COLUMNS}
            "#,
        ))
        .bind(request.status)
        .bind(&request.note)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(reservation)
    }

    #[instrument(skip(self), fields(reservation_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Reservations<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn count(&mut self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reservations")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::Repository;
    use super::*;
    use crate::api::models::reservations::ReservationStatus;
    use crate::db::handlers::{Services, Users};
    use crate::db::models::services::ServiceCreateDBRequest;
    use crate::db::models::users::UserCreateDBRequest;
    use crate::{api::models::users::Role, types::UserId};
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

    async fn seed_service(pool: &SqlitePool) -> crate::types::ServiceId {
        let mut conn = pool.acquire().await.unwrap();
        Services::new(&mut conn)
            .create(&ServiceCreateDBRequest {
                name: "Spa".to_string(),
                description: None,
                price: 10.0,
            })
            .await
            .unwrap()
            .id
    }

    fn sample_create(user_id: UserId, service_id: crate::types::ServiceId) -> ReservationCreateDBRequest {
        ReservationCreateDBRequest {
            user_id,
            service_id,
            start_time: "2026-09-01T14:00:00Z".to_string(),
            end_time: Some("2026-09-01T15:00:00Z".to_string()),
            note: None,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_starts_pending(pool: SqlitePool) {
        let user_id = seed_user(&pool, "guest@example.com").await;
        let service_id = seed_service(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        let reservation = repo.create(&sample_create(user_id, service_id)).await.unwrap();

        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.user_id, user_id);
        assert_eq!(reservation.service_id, service_id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_with_unknown_service_fails(pool: SqlitePool) {
        let user_id = seed_user(&pool, "guest@example.com").await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        let err = repo.create(&sample_create(user_id, 9999)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_scoped_by_owner(pool: SqlitePool) {
        let ada = seed_user(&pool, "ada@example.com").await;
        let bob = seed_user(&pool, "bob@example.com").await;
        let service_id = seed_service(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        repo.create(&sample_create(ada, service_id)).await.unwrap();
        repo.create(&sample_create(ada, service_id)).await.unwrap();
        repo.create(&sample_create(bob, service_id)).await.unwrap();

        let mine = repo.list(&ReservationFilter { user_id: Some(ada) }).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.user_id == ada));

        let all = repo.list(&ReservationFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_status_update(pool: SqlitePool) {
        let user_id = seed_user(&pool, "guest@example.com").await;
        let service_id = seed_service(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);

        let created = repo.create(&sample_create(user_id, service_id)).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &ReservationUpdateDBRequest {
                    status: Some(ReservationStatus::Approved),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ReservationStatus::Approved);
        assert_eq!(updated.start_time, created.start_time);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_service_delete_blocked_by_reservation(pool: SqlitePool) {
        let user_id = seed_user(&pool, "guest@example.com").await;
        let service_id = seed_service(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Reservations::new(&mut conn);
        let created = repo.create(&sample_create(user_id, service_id)).await.unwrap();
        drop(repo);

        let err = Services::new(&mut conn).delete(service_id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        // Once the reservation is gone the service can be removed.
        assert!(Reservations::new(&mut conn).delete(created.id).await.unwrap());
        assert!(Services::new(&mut conn).delete(service_id).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_user_delete_cascades(pool: SqlitePool) {
        let user_id = seed_user(&pool, "guest@example.com").await;
        let service_id = seed_service(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        Reservations::new(&mut conn)
            .create(&sample_create(user_id, service_id))
            .await
            .unwrap();

        assert!(Users::new(&mut conn).delete(user_id).await.unwrap());

        let remaining = Reservations::new(&mut conn)
            .list(&ReservationFilter::default())
            .await
            .unwrap();
        assert!(remaining.is_empty());
    }
}

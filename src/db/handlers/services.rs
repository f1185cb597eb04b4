//! Database repository for services.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::services::{
            ServiceCreateDBRequest, ServiceDBResponse, ServiceFilter, ServiceUpdateDBRequest,
        },
    },
    types::ServiceId,
};
use sqlx::SqliteConnection;
use tracing::instrument;

pub struct Services<'c> {
    db: &'c mut SqliteConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Services<'c> {
    type CreateRequest = ServiceCreateDBRequest;
    type UpdateRequest = ServiceUpdateDBRequest;
    type Response = ServiceDBResponse;
    type Id = ServiceId;
    type Filter = ServiceFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let service = sqlx::query_as::<_, ServiceDBResponse>(
            r#"
            INSERT INTO services (name, description, price, is_active)
            VALUES (?, ?, ?, 1)
            RETURNING id, name, description, price, is_active
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(service)
    }

    #[instrument(skip(self), fields(service_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let service = sqlx::query_as::<_, ServiceDBResponse>(
            "SELECT id, name, description, price, is_active FROM services WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(service)
    }

    #[instrument(skip(self, filter), fields(active_only = filter.active_only), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let services = sqlx::query_as::<_, ServiceDBResponse>(
            "SELECT id, name, description, price, is_active FROM services WHERE is_active >= ? ORDER BY id",
        )
        .bind(filter.active_only)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(services)
    }

    #[instrument(skip(self, request), fields(service_id = id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let service = sqlx::query_as::<_, ServiceDBResponse>(
            r#"
            UPDATE services SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                price = COALESCE(?, price),
                is_active = COALESCE(?, is_active)
            WHERE id = ?
            RETURNING id, name, description, price, is_active
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.is_active)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(service)
    }

    #[instrument(skip(self), fields(service_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        // Fails with a foreign key violation while reservations still point
        // at this service; callers surface that as a client error.
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Services<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::Repository;
    use super::*;

    use sqlx::SqlitePool;

    fn sample_create(name: &str) -> ServiceCreateDBRequest {
        ServiceCreateDBRequest {
            name: name.to_string(),
            description: Some("desc".to_string()),
            price: 25.0,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_service_is_active_by_default(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Services::new(&mut conn);

        let service = repo.create(&sample_create("Spa")).await.unwrap();

        assert_eq!(service.name, "Spa");
        assert!(service.is_active);
        assert_eq!(service.price, 25.0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_active_only_hides_deactivated(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Services::new(&mut conn);

        let spa = repo.create(&sample_create("Spa")).await.unwrap();
        let gym = repo.create(&sample_create("Gym")).await.unwrap();

        repo.update(
            gym.id,
            &ServiceUpdateDBRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let active = repo.list(&ServiceFilter { active_only: true }).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, spa.id);

        let all = repo.list(&ServiceFilter { active_only: false }).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_partial_update(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Services::new(&mut conn);

        let created = repo.create(&sample_create("Laundry")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &ServiceUpdateDBRequest {
                    price: Some(30.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 30.0);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.description, created.description);
        assert!(updated.is_active);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_service(pool: SqlitePool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Services::new(&mut conn);

        let created = repo.create(&sample_create("Parking")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}

use async_trait::async_trait;

use crate::dto::training_center::CreateTrainingCenterRequest;
use crate::error::{Result, StorageError, write_error};
use crate::models::TrainingCenter;

use super::postgres::PgStore;

#[async_trait]
pub trait TrainingCenterRepository: Send + Sync {
    /// Insert a training center; a taken name yields `UniqueViolation`
    async fn create(&self, req: &CreateTrainingCenterRequest) -> Result<TrainingCenter>;

    async fn list(&self) -> Result<Vec<TrainingCenter>>;

    async fn find_by_id(&self, id: i32) -> Result<TrainingCenter>;
}

#[async_trait]
impl TrainingCenterRepository for PgStore {
    async fn create(&self, req: &CreateTrainingCenterRequest) -> Result<TrainingCenter> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            INSERT INTO centros_treinamento (nome, endereco, proprietario)
            VALUES ($1, $2, $3)
            RETURNING pk_id, nome, endereco, proprietario
            "#,
        )
        .bind(&req.nome)
        .bind(&req.endereco)
        .bind(&req.proprietario)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(center)
    }

    async fn list(&self) -> Result<Vec<TrainingCenter>> {
        let centers = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, nome, endereco, proprietario
            FROM centros_treinamento
            ORDER BY pk_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(centers)
    }

    async fn find_by_id(&self, id: i32) -> Result<TrainingCenter> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, nome, endereco, proprietario
            FROM centros_treinamento
            WHERE pk_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(center)
    }
}

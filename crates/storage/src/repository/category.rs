use async_trait::async_trait;

use crate::dto::category::CreateCategoryRequest;
use crate::error::{Result, StorageError, write_error};
use crate::models::Category;

use super::postgres::PgStore;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category; a taken name yields `UniqueViolation`
    async fn create(&self, req: &CreateCategoryRequest) -> Result<Category>;

    /// All categories, ordered by id
    async fn list(&self) -> Result<Vec<Category>>;

    async fn find_by_id(&self, id: i32) -> Result<Category>;
}

#[async_trait]
impl CategoryRepository for PgStore {
    async fn create(&self, req: &CreateCategoryRequest) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categorias (nome)
            VALUES ($1)
            RETURNING pk_id, nome
            "#,
        )
        .bind(&req.nome)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT pk_id, nome
            FROM categorias
            ORDER BY pk_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn find_by_id(&self, id: i32) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT pk_id, nome
            FROM categorias
            WHERE pk_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(category)
    }
}

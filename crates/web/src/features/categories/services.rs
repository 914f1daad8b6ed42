use workout_storage::{
    dto::category::CreateCategoryRequest, error::StorageError, models::Category,
    repository::CategoryRepository,
};

use crate::error::{WebError, WebResult};

pub async fn create_category(
    repo: &dyn CategoryRepository,
    request: &CreateCategoryRequest,
) -> WebResult<Category> {
    match repo.create(request).await {
        Ok(category) => {
            tracing::info!(pk_id = category.pk_id, "Category created");
            Ok(category)
        }
        Err(StorageError::UniqueViolation) => {
            tracing::warn!(nome = %request.nome, "Category name already taken");
            Err(WebError::Conflict(format!(
                "a category already exists with this name: {}",
                request.nome
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn list_categories(repo: &dyn CategoryRepository) -> WebResult<Vec<Category>> {
    Ok(repo.list().await?)
}

pub async fn get_category(repo: &dyn CategoryRepository, id: i32) -> WebResult<Category> {
    repo.find_by_id(id).await.map_err(|e| match e {
        StorageError::NotFound => WebError::NotFound(format!("category with id {id} not found")),
        e => e.into(),
    })
}

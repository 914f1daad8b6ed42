use workout_storage::{
    dto::training_center::CreateTrainingCenterRequest, error::StorageError,
    models::TrainingCenter, repository::TrainingCenterRepository,
};

use crate::error::{WebError, WebResult};

pub async fn create_training_center(
    repo: &dyn TrainingCenterRepository,
    request: &CreateTrainingCenterRequest,
) -> WebResult<TrainingCenter> {
    match repo.create(request).await {
        Ok(center) => {
            tracing::info!(pk_id = center.pk_id, "Training center created");
            Ok(center)
        }
        Err(StorageError::UniqueViolation) => {
            tracing::warn!(nome = %request.nome, "Training center name already taken");
            Err(WebError::Conflict(format!(
                "a training center already exists with this name: {}",
                request.nome
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn list_training_centers(
    repo: &dyn TrainingCenterRepository,
) -> WebResult<Vec<TrainingCenter>> {
    Ok(repo.list().await?)
}

pub async fn get_training_center(
    repo: &dyn TrainingCenterRepository,
    id: i32,
) -> WebResult<TrainingCenter> {
    repo.find_by_id(id).await.map_err(|e| match e {
        StorageError::NotFound => {
            WebError::NotFound(format!("training center with id {id} not found"))
        }
        e => e.into(),
    })
}

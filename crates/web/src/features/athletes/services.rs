use chrono::Utc;
use workout_storage::{
    dto::{
        athlete::{
            AthleteFilter, AthleteListItem, AthleteResponse, CreateAthleteRequest,
            UpdateAthleteRequest,
        },
        common::{Page, PaginationParams},
    },
    error::StorageError,
    repository::{AthleteRepository, CategoryRepository, TrainingCenterRepository},
};

use crate::error::{WebError, WebResult};

fn athlete_not_found(id: i32) -> impl FnOnce(StorageError) -> WebError {
    move |e| match e {
        StorageError::NotFound => WebError::NotFound(format!("athlete with id {id} not found")),
        e => e.into(),
    }
}

/// Names the reference that made an insert fail its foreign key check.
async fn missing_reference(
    categories: &dyn CategoryRepository,
    training_centers: &dyn TrainingCenterRepository,
    request: &CreateAthleteRequest,
) -> WebError {
    if let Err(StorageError::NotFound) = categories.find_by_id(request.categoria_id).await {
        return WebError::ReferentialIntegrity(format!(
            "category with id {} not found",
            request.categoria_id
        ));
    }
    if let Err(StorageError::NotFound) = training_centers
        .find_by_id(request.centro_treinamento_id)
        .await
    {
        return WebError::ReferentialIntegrity(format!(
            "training center with id {} not found",
            request.centro_treinamento_id
        ));
    }
    WebError::ReferentialIntegrity(
        "the referenced category or training center does not exist".to_string(),
    )
}

/// Create an athlete stamped with the current UTC time
pub async fn create_athlete(
    athletes: &dyn AthleteRepository,
    categories: &dyn CategoryRepository,
    training_centers: &dyn TrainingCenterRepository,
    request: &CreateAthleteRequest,
) -> WebResult<AthleteResponse> {
    match athletes.create(request, Utc::now()).await {
        Ok(record) => {
            tracing::info!(pk_id = record.athlete.pk_id, "Athlete created");
            Ok(record.into())
        }
        Err(StorageError::UniqueViolation) => {
            tracing::warn!(cpf = %request.cpf, "Athlete cpf already registered");
            Err(WebError::Conflict(format!(
                "an athlete already exists with this cpf: {}",
                request.cpf
            )))
        }
        Err(StorageError::ForeignKeyViolation) => {
            let error = missing_reference(categories, training_centers, request).await;
            tracing::warn!("Athlete rejected: {}", error);
            Err(error)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_athlete(athletes: &dyn AthleteRepository, id: i32) -> WebResult<AthleteResponse> {
    let record = athletes.find_by_id(id).await.map_err(athlete_not_found(id))?;
    Ok(record.into())
}

/// Merge the fields present in `request` into the stored athlete
pub async fn update_athlete(
    athletes: &dyn AthleteRepository,
    id: i32,
    request: &UpdateAthleteRequest,
) -> WebResult<AthleteResponse> {
    let record = if request.is_empty() {
        athletes.find_by_id(id).await
    } else {
        athletes.update(id, request).await
    }
    .map_err(athlete_not_found(id))?;

    tracing::debug!(pk_id = id, "Athlete updated");
    Ok(record.into())
}

pub async fn delete_athlete(athletes: &dyn AthleteRepository, id: i32) -> WebResult<()> {
    athletes.delete(id).await.map_err(athlete_not_found(id))?;
    tracing::info!(pk_id = id, "Athlete deleted");
    Ok(())
}

/// Filtered, paginated listing projected to [`AthleteListItem`]
pub async fn list_athletes(
    athletes: &dyn AthleteRepository,
    filter: &AthleteFilter,
    pagination: PaginationParams,
) -> WebResult<Page<AthleteListItem>> {
    let (records, total_items) = athletes.list(filter, pagination).await?;
    let items = records.into_iter().map(AthleteListItem::from).collect();

    Ok(Page::new(items, total_items, pagination))
}

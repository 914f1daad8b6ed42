use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;
use workout_storage::{dto::training_center::CreateTrainingCenterRequest, models::TrainingCenter};

use crate::{
    error::WebError,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

use super::services;

#[utoipa::path(
    post,
    path = "/centros_treinamento",
    request_body = CreateTrainingCenterRequest,
    responses(
        (status = 201, description = "Training center created", body = TrainingCenter),
        (status = 303, description = "A training center with this name already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "centros_treinamento"
)]
pub async fn create_training_center(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateTrainingCenterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let center = services::create_training_center(state.training_centers.as_ref(), &req).await?;

    Ok((StatusCode::CREATED, Json(center)).into_response())
}

#[utoipa::path(
    get,
    path = "/centros_treinamento",
    responses(
        (status = 200, description = "All training centers", body = Vec<TrainingCenter>)
    ),
    tag = "centros_treinamento"
)]
pub async fn list_training_centers(State(state): State<AppState>) -> Result<Response, WebError> {
    let centers = services::list_training_centers(state.training_centers.as_ref()).await?;

    Ok(Json(centers).into_response())
}

#[utoipa::path(
    get,
    path = "/centros_treinamento/{id}",
    params(
        ("id" = i32, Path, description = "Training center id")
    ),
    responses(
        (status = 200, description = "Training center found", body = TrainingCenter),
        (status = 404, description = "Training center not found")
    ),
    tag = "centros_treinamento"
)]
pub async fn get_training_center(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, WebError> {
    let center = services::get_training_center(state.training_centers.as_ref(), id).await?;

    Ok(Json(center).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::features::test_support::{app, send};

    fn ct_king() -> serde_json::Value {
        json!({"nome": "CT King", "endereco": "Rua X, 123", "proprietario": "Marcos"})
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let app = app();
        let (status, created) = send(
            &app,
            Method::POST,
            "/centros_treinamento/",
            Some(ct_king()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["endereco"], "Rua X, 123");

        let id = created["pk_id"].as_i64().unwrap();
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/centros_treinamento/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);

        let (_, all) = send(&app, Method::GET, "/centros_treinamento", None).await;
        assert_eq!(all, json!([created]));
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let app = app();
        send(&app, Method::POST, "/centros_treinamento", Some(ct_king())).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/centros_treinamento",
            Some(ct_king()),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(
            body["detail"],
            "a training center already exists with this name: CT King"
        );
    }

    #[tokio::test]
    async fn test_field_limits_enforced() {
        let app = app();
        let payload = json!({"nome": "CT", "endereco": "", "proprietario": "p".repeat(31)});
        let (status, body) = send(&app, Method::POST, "/centros_treinamento", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["field"].as_str())
            .collect();
        assert_eq!(fields, vec!["endereco", "proprietario"]);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/centros_treinamento/5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "training center with id 5 not found");
    }
}

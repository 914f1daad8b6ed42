use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;
use workout_storage::{dto::category::CreateCategoryRequest, models::Category};

use crate::{
    error::WebError,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

use super::services;

#[utoipa::path(
    post,
    path = "/categorias",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 303, description = "A category with this name already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "categorias"
)]
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateCategoryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let category = services::create_category(state.categories.as_ref(), &req).await?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    ),
    tag = "categorias"
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Response, WebError> {
    let categories = services::list_categories(state.categories.as_ref()).await?;

    Ok(Json(categories).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, WebError> {
    let category = services::get_category(state.categories.as_ref(), id).await?;

    Ok(Json(category).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::features::test_support::{app, send};

    #[tokio::test]
    async fn test_create_then_get_category() {
        let app = app();

        let (status, created) = send(
            &app,
            Method::POST,
            "/categorias",
            Some(json!({"nome": "Scale"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["pk_id"].as_i64().unwrap();

        let (status, body) = send(&app, Method::GET, &format!("/categorias/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["nome"], "Scale");
    }

    #[tokio::test]
    async fn test_duplicate_name_is_a_conflict() {
        let app = app();
        send(&app, Method::POST, "/categorias/", Some(json!({"nome": "Scale"}))).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/categorias/",
            Some(json!({"nome": "Scale"})),
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(body["kind"], "conflict");
        assert_eq!(body["detail"], "a category already exists with this name: Scale");

        let (_, all) = send(&app, Method::GET, "/categorias", None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_name_rejected() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/categorias",
            Some(json!({"nome": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0]["field"], "nome");

        let (status, _) = send(
            &app,
            Method::POST,
            "/categorias",
            Some(json!({"nome": "x".repeat(51)})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_category_is_not_found() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/categorias/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "category with id 42 not found");
    }

    #[tokio::test]
    async fn test_list_starts_empty() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/categorias", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_missing_nome_is_validation_error() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/categorias", Some(json!({}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "validation_error");
        assert_eq!(body["errors"][0]["field"], "nome");

        let (status, body) = send(&app, Method::GET, "/categorias/abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "validation_error");
    }
}

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;
use workout_storage::dto::{
    athlete::{
        AthleteFilter, AthleteListItem, AthleteResponse, CreateAthleteRequest,
        UpdateAthleteRequest,
    },
    common::{Page, PaginationParams},
};

use crate::{
    error::WebError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

use super::services;

#[utoipa::path(
    post,
    path = "/atletas",
    request_body = CreateAthleteRequest,
    responses(
        (status = 201, description = "Athlete created", body = AthleteResponse),
        (status = 303, description = "An athlete with this cpf already exists"),
        (status = 422, description = "Validation error or unknown category/training center")
    ),
    tag = "atletas"
)]
pub async fn create_athlete(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateAthleteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    let req = req.normalized();

    let athlete = services::create_athlete(
        state.athletes.as_ref(),
        state.categories.as_ref(),
        state.training_centers.as_ref(),
        &req,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(athlete)).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas",
    params(AthleteFilter, PaginationParams),
    responses(
        (
            status = 200,
            description = "One page of athletes, reduced to name, category and training center",
            body = Page<AthleteListItem>
        ),
        (status = 422, description = "Invalid pagination parameters")
    ),
    tag = "atletas"
)]
pub async fn list_athletes(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<AthleteFilter>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::InvalidQuery)?;

    let page = services::list_athletes(state.athletes.as_ref(), &filter, pagination).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/{id}",
    params(
        ("id" = i32, Path, description = "Athlete id")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn get_athlete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete(state.athletes.as_ref(), id).await?;

    Ok(Json(athlete).into_response())
}

#[utoipa::path(
    patch,
    path = "/atletas/{id}",
    params(
        ("id" = i32, Path, description = "Athlete id")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated", body = AthleteResponse),
        (status = 404, description = "Athlete not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "atletas"
)]
pub async fn update_athlete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(update_req): ApiJson<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_athlete(state.athletes.as_ref(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/atletas/{id}",
    params(
        ("id" = i32, Path, description = "Athlete id")
    ),
    responses(
        (status = 204, description = "Athlete deleted"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn delete_athlete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Response, WebError> {
    services::delete_athlete(state.athletes.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

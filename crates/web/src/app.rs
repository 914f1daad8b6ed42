use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{athletes, categories, training_centers};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WorkOut API",
        description = "Gym management API: athletes, categories and training centers",
        version = "1.0.0"
    ),
    paths(
        athletes::handlers::create_athlete,
        athletes::handlers::list_athletes,
        athletes::handlers::get_athlete,
        athletes::handlers::update_athlete,
        athletes::handlers::delete_athlete,
        categories::handlers::create_category,
        categories::handlers::list_categories,
        categories::handlers::get_category,
        training_centers::handlers::create_training_center,
        training_centers::handlers::list_training_centers,
        training_centers::handlers::get_training_center,
    ),
    components(
        schemas(
            workout_storage::dto::athlete::CreateAthleteRequest,
            workout_storage::dto::athlete::UpdateAthleteRequest,
            workout_storage::dto::athlete::AthleteResponse,
            workout_storage::dto::athlete::AthleteListItem,
            workout_storage::dto::category::CreateCategoryRequest,
            workout_storage::dto::training_center::CreateTrainingCenterRequest,
            workout_storage::models::Category,
            workout_storage::models::TrainingCenter,
        )
    ),
    tags(
        (name = "atletas", description = "Athlete records"),
        (name = "categorias", description = "Athlete categories"),
        (name = "centros_treinamento", description = "Training centers"),
    )
)]
pub struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(athletes::routes::routes())
        .merge(categories::routes::routes())
        .merge(training_centers::routes::routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for path in [
            "/atletas",
            "/atletas/{id}",
            "/categorias",
            "/categorias/{id}",
            "/centros_treinamento",
            "/centros_treinamento/{id}",
        ] {
            assert!(paths.contains(&path), "{path} missing from {paths:?}");
        }
    }
}

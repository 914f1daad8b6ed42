use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for registering a training center
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTrainingCenterRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "nome must be between 1 and 50 characters"
    ))]
    #[schema(example = "CT King")]
    pub nome: String,

    #[validate(length(
        min = 1,
        max = 60,
        message = "endereco must be between 1 and 60 characters"
    ))]
    #[schema(example = "Rua X, 123")]
    pub endereco: String,

    #[validate(length(
        min = 1,
        max = 30,
        message = "proprietario must be between 1 and 30 characters"
    ))]
    #[schema(example = "Marcos")]
    pub proprietario: String,
}

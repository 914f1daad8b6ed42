use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TrainingCenter {
    pub pk_id: i32,
    #[schema(example = "CT King")]
    pub nome: String,
    #[schema(example = "Rua X, 123")]
    pub endereco: String,
    #[schema(example = "Marcos")]
    pub proprietario: String,
}

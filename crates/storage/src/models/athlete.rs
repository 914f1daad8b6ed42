use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{Category, TrainingCenter};

/// Row of the `atletas` table, references unresolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Athlete {
    pub pk_id: i32,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
    pub peso: f64,
    pub altura: f64,
    pub sexo: String,
    pub created_at: DateTime<Utc>,
    pub categoria_id: i32,
    pub centro_treinamento_id: i32,
}

/// An athlete together with the category and training center it references.
///
/// Every athlete read resolves both references eagerly, so this is what the
/// repositories hand back; the DTO layer shapes it into the detail view or
/// the list projection.
#[derive(Debug, Clone, PartialEq)]
pub struct AthleteRecord {
    pub athlete: Athlete,
    pub categoria: Category,
    pub centro_treinamento: TrainingCenter,
}

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{AthleteRecord, Category, TrainingCenter};

use super::common::double_option;

const NOME_MAX_LEN: usize = 50;

/// Full athlete view, returned by create, get-by-id and update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
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
    pub categoria: Category,
    pub centro_treinamento: TrainingCenter,
}

/// Athlete as it appears in the paginated listing: name and resolved
/// references only
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteListItem {
    pub nome: String,
    pub categoria: Category,
    pub centro_treinamento: TrainingCenter,
}

/// Request payload for registering an athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "nome must be between 1 and 50 characters"
    ))]
    #[schema(example = "João")]
    pub nome: String,

    #[validate(length(equal = 11, message = "cpf must have exactly 11 characters"))]
    #[validate(custom(function = "validate_cpf"))]
    #[schema(example = "12345678901")]
    pub cpf: String,

    #[validate(range(exclusive_min = 0, message = "idade must be greater than 0"))]
    #[schema(example = 25)]
    pub idade: i32,

    #[validate(range(exclusive_min = 0.0, message = "peso must be greater than 0"))]
    #[schema(example = 75.5)]
    pub peso: f64,

    #[validate(range(exclusive_min = 0.0, message = "altura must be greater than 0"))]
    #[schema(example = 1.70)]
    pub altura: f64,

    #[validate(custom(function = "validate_sexo"))]
    #[schema(example = "M")]
    pub sexo: String,

    pub categoria_id: i32,

    pub centro_treinamento_id: i32,
}

impl CreateAthleteRequest {
    /// Returns the request with `sexo` in its stored, uppercase form.
    pub fn normalized(mut self) -> Self {
        self.sexo = self.sexo.to_ascii_uppercase();
        self
    }
}

/// Partial update payload. Only `nome` and `idade` may change; a field left
/// out of the payload keeps its stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateAthleteRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, example = "João")]
    pub nome: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>, example = 26)]
    pub idade: Option<Option<i32>>,
}

impl UpdateAthleteRequest {
    pub fn nome(&self) -> Option<&str> {
        self.nome.as_ref().and_then(|n| n.as_deref())
    }

    pub fn idade(&self) -> Option<i32> {
        self.idade.flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.idade.is_none()
    }
}

impl Validate for UpdateAthleteRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match &self.nome {
            Some(None) => errors.add("nome", error("null", "nome may not be null")),
            Some(Some(nome)) => {
                let len = nome.chars().count();
                if len == 0 || len > NOME_MAX_LEN {
                    errors.add(
                        "nome",
                        error("length", "nome must be between 1 and 50 characters"),
                    );
                }
            }
            None => {}
        }

        match self.idade {
            Some(None) => errors.add("idade", error("null", "idade may not be null")),
            Some(Some(idade)) if idade <= 0 => {
                errors.add("idade", error("range", "idade must be greater than 0"))
            }
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Filters accepted by the athlete listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteFilter {
    /// Case-insensitive substring of the athlete name
    pub nome: Option<String>,
    /// Exact CPF
    pub cpf: Option<String>,
}

impl AthleteFilter {
    pub fn nome(&self) -> Option<&str> {
        self.nome.as_deref().filter(|n| !n.is_empty())
    }

    pub fn cpf(&self) -> Option<&str> {
        self.cpf.as_deref().filter(|c| !c.is_empty())
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    if cpf.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(error("cpf_digits", "cpf must contain only numeric characters"))
    }
}

fn validate_sexo(sexo: &str) -> Result<(), ValidationError> {
    if matches!(sexo, "M" | "m" | "F" | "f") {
        Ok(())
    } else {
        Err(error("invalid_sexo", "sexo must be M or F"))
    }
}

impl From<AthleteRecord> for AthleteResponse {
    fn from(record: AthleteRecord) -> Self {
        let AthleteRecord {
            athlete,
            categoria,
            centro_treinamento,
        } = record;

        Self {
            pk_id: athlete.pk_id,
            nome: athlete.nome,
            cpf: athlete.cpf,
            idade: athlete.idade,
            peso: athlete.peso,
            altura: athlete.altura,
            sexo: athlete.sexo,
            created_at: athlete.created_at,
            categoria_id: athlete.categoria_id,
            centro_treinamento_id: athlete.centro_treinamento_id,
            categoria,
            centro_treinamento,
        }
    }
}

impl From<AthleteRecord> for AthleteListItem {
    fn from(record: AthleteRecord) -> Self {
        Self {
            nome: record.athlete.nome,
            categoria: record.categoria,
            centro_treinamento: record.centro_treinamento,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Athlete;

    fn valid() -> CreateAthleteRequest {
        CreateAthleteRequest {
            nome: "João Silva".to_string(),
            cpf: "12345678901".to_string(),
            idade: 25,
            peso: 75.5,
            altura: 1.75,
            sexo: "M".to_string(),
            categoria_id: 1,
            centro_treinamento_id: 1,
        }
    }

    fn field_messages(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors
            .field_errors()
            .get(field)
            .map(|errs| {
                errs.iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_cpf_with_wrong_length_rejected() {
        for cpf in ["", "123", "123456789012"] {
            let req = CreateAthleteRequest {
                cpf: cpf.to_string(),
                ..valid()
            };
            let errors = req.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("cpf"), "cpf {cpf:?}");
        }
    }

    #[test]
    fn test_cpf_with_non_digits_rejected() {
        for cpf in ["1234567890a", "123.456.789", "１２３４５６７８９０１"] {
            let req = CreateAthleteRequest {
                cpf: cpf.to_string(),
                ..valid()
            };
            let errors = req.validate().unwrap_err();
            let messages = field_messages(&errors, "cpf");
            assert!(
                messages.iter().any(|m| m.contains("only numeric")),
                "cpf {cpf:?} gave {messages:?}"
            );
        }
    }

    #[test]
    fn test_sexo_accepts_both_cases_and_normalizes() {
        for (input, stored) in [("m", "M"), ("M", "M"), ("f", "F"), ("F", "F")] {
            let req = CreateAthleteRequest {
                sexo: input.to_string(),
                ..valid()
            };
            assert!(req.validate().is_ok());
            assert_eq!(req.normalized().sexo, stored);
        }
    }

    #[test]
    fn test_sexo_rejects_other_values() {
        for sexo in ["X", "", "MF", "masculino"] {
            let req = CreateAthleteRequest {
                sexo: sexo.to_string(),
                ..valid()
            };
            let errors = req.validate().unwrap_err();
            assert_eq!(field_messages(&errors, "sexo"), vec!["sexo must be M or F"]);
        }
    }

    #[test]
    fn test_non_positive_measurements_rejected() {
        let req = CreateAthleteRequest {
            idade: 0,
            peso: -1.0,
            altura: 0.0,
            ..valid()
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("idade"));
        assert!(fields.contains_key("peso"));
        assert!(fields.contains_key("altura"));
    }

    #[test]
    fn test_several_violations_reported_together() {
        let req = CreateAthleteRequest {
            nome: String::new(),
            cpf: "123".to_string(),
            idade: -5,
            sexo: "X".to_string(),
            ..valid()
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 4);
    }

    #[test]
    fn test_update_keeps_absent_and_null_apart() {
        let absent: UpdateAthleteRequest = serde_json::from_str(r#"{"nome": "Ana"}"#).unwrap();
        assert_eq!(absent.nome(), Some("Ana"));
        assert_eq!(absent.idade, None);
        assert!(absent.validate().is_ok());

        let null: UpdateAthleteRequest = serde_json::from_str(r#"{"idade": null}"#).unwrap();
        assert_eq!(null.idade, Some(None));
        let errors = null.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("idade"));
    }

    #[test]
    fn test_update_applies_field_rules() {
        let req: UpdateAthleteRequest =
            serde_json::from_str(r#"{"nome": "", "idade": 0}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nome"));
        assert!(errors.field_errors().contains_key("idade"));
    }

    #[test]
    fn test_update_rejects_fields_that_cannot_change() {
        let result = serde_json::from_str::<UpdateAthleteRequest>(r#"{"cpf": "12345678901"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_filters_are_ignored() {
        let filter = AthleteFilter {
            nome: Some(String::new()),
            cpf: Some("12345678901".to_string()),
        };
        assert_eq!(filter.nome(), None);
        assert_eq!(filter.cpf(), Some("12345678901"));
    }

    #[test]
    fn test_list_item_projection_drops_personal_fields() {
        let record = AthleteRecord {
            athlete: Athlete {
                pk_id: 7,
                nome: "Maria Santos".to_string(),
                cpf: "98765432109".to_string(),
                idade: 23,
                peso: 60.0,
                altura: 1.65,
                sexo: "F".to_string(),
                created_at: Utc::now(),
                categoria_id: 1,
                centro_treinamento_id: 2,
            },
            categoria: Category {
                pk_id: 1,
                nome: "Scale".to_string(),
            },
            centro_treinamento: TrainingCenter {
                pk_id: 2,
                nome: "CT King".to_string(),
                endereco: "Rua X, 123".to_string(),
                proprietario: "Marcos".to_string(),
            },
        };

        let item = serde_json::to_value(AthleteListItem::from(record.clone())).unwrap();
        let keys: Vec<&str> = item.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3);
        for key in ["nome", "categoria", "centro_treinamento"] {
            assert!(keys.contains(&key));
        }

        let detail = AthleteResponse::from(record);
        assert_eq!(detail.pk_id, 7);
        assert_eq!(detail.cpf, "98765432109");
        assert_eq!(detail.centro_treinamento.nome, "CT King");
    }
}

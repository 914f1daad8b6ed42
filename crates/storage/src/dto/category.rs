use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "nome must be between 1 and 50 characters"
    ))]
    #[schema(example = "Scale")]
    pub nome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_regular_name() {
        let req = CreateCategoryRequest {
            nome: "Scale".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_and_long_names() {
        for nome in [String::new(), "x".repeat(51)] {
            let errors = CreateCategoryRequest { nome }.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("nome"));
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let req = CreateCategoryRequest {
            nome: "ç".repeat(50),
        };
        assert!(req.validate().is_ok());
    }
}

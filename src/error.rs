use thiserror::Error;

use crate::catalog::CatalogError;
use crate::preference::PreferenceError;
use crate::validation::Violation;

/// Storefront-level errors surfaced to the UI layer
#[derive(Debug, Error)]
pub enum ShopError {
    /// One message per failed rule, shown verbatim (newline separated)
    #[error("{}", join_violations(.0))]
    ValidationFailure(Vec<Violation>),

    #[error("Cart is empty!")]
    EmptyOrder,

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),
}

impl ShopError {
    /// Violations carried by a validation failure, empty otherwise
    pub fn violations(&self) -> &[Violation] {
        match self {
            ShopError::ValidationFailure(v) => v.as_slice(),
            _ => &[],
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_display_joins_lines() {
        let err = ShopError::ValidationFailure(vec![Violation::NameRequired, Violation::InvalidPhone]);
        assert_eq!(
            err.to_string(),
            "Name is required\nPlease enter a valid Indonesian phone number"
        );
        assert_eq!(err.violations().len(), 2);
        assert!(ShopError::EmptyOrder.violations().is_empty());
    }
}

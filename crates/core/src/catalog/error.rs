use thiserror::Error;

/// Errors that can occur when validating salons, services or prestations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name too long (max 100 characters)")]
    NameTooLong,
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),
    #[error("Duration must be greater than zero")]
    ZeroDuration,
    #[error("Duration too long (max 720 minutes)")]
    DurationTooLong,
    #[error("Prestation {0} does not exist")]
    UnknownPrestation(String),
    #[error("Prestation {0} is not bookable")]
    InactivePrestation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        assert_eq!(CatalogError::EmptyName.to_string(), "Name cannot be empty");
        assert_eq!(
            CatalogError::InvalidSlug("Le Salon".to_string()).to_string(),
            "Invalid slug: Le Salon"
        );
        assert_eq!(
            CatalogError::InactivePrestation("abc".to_string()).to_string(),
            "Prestation abc is not bookable"
        );
    }
}

use uuid::Uuid;

use super::error::CatalogError;
use super::types::{Prestation, Salon, Service};

const MAX_NAME_LEN: usize = 100;
/// Longest single prestation, and longest appointment the availability scan accepts.
pub const MAX_DURATION_MINUTES: u32 = 720;

/// Validates a salon before creation or update.
pub fn validate_salon(salon: &Salon) -> Result<(), CatalogError> {
    validate_name(&salon.name)?;
    if !is_valid_slug(&salon.slug) {
        return Err(CatalogError::InvalidSlug(salon.slug.clone()));
    }
    Ok(())
}

/// Validates a service before creation or update.
pub fn validate_service(service: &Service) -> Result<(), CatalogError> {
    validate_name(&service.name)
}

/// Validates a prestation before creation or update.
pub fn validate_prestation(prestation: &Prestation) -> Result<(), CatalogError> {
    validate_name(&prestation.name)?;
    if prestation.duration_minutes == 0 {
        return Err(CatalogError::ZeroDuration);
    }
    if prestation.duration_minutes > MAX_DURATION_MINUTES {
        return Err(CatalogError::DurationTooLong);
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CatalogError::NameTooLong);
    }
    Ok(())
}

/// Slugs are lowercase ASCII letters, digits and single inner dashes.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Returns the active prestations, cheapest first.
pub fn active_prestations(prestations: &[Prestation]) -> Vec<&Prestation> {
    let mut active: Vec<&Prestation> = prestations.iter().filter(|p| p.active).collect();
    active.sort_by(|a, b| {
        a.price_cents
            .cmp(&b.price_cents)
            .then_with(|| a.name.cmp(&b.name))
    });
    active
}

/// Duration and price of a set of selected prestations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTotals {
    pub duration_minutes: u32,
    pub price_cents: u32,
}

/// Sums the duration and price of the selected prestations.
///
/// Every id must resolve to an active prestation in `available`.
pub fn selection_totals(
    selected: &[Uuid],
    available: &[Prestation],
) -> Result<SelectionTotals, CatalogError> {
    let mut totals = SelectionTotals {
        duration_minutes: 0,
        price_cents: 0,
    };

    for id in selected {
        let prestation = available
            .iter()
            .find(|p| p.id == *id)
            .ok_or_else(|| CatalogError::UnknownPrestation(id.to_string()))?;
        if !prestation.active {
            return Err(CatalogError::InactivePrestation(id.to_string()));
        }
        totals.duration_minutes = totals
            .duration_minutes
            .saturating_add(prestation.duration_minutes);
        totals.price_cents = totals.price_cents.saturating_add(prestation.price_cents);
    }

    Ok(totals)
}

/// Formats a price in cents as euros, e.g. `3550` → `"35.50 €"`.
pub fn format_price(cents: u32) -> String {
    format!("{}.{:02} €", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceKind;

    fn service_id() -> Uuid {
        Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()
    }

    #[test]
    fn test_validate_salon_success() {
        let salon = Salon::new("Atelier Nord", "atelier-nord", "12 rue des Lilas");
        assert!(validate_salon(&salon).is_ok());
    }

    #[test]
    fn test_validate_salon_bad_slug() {
        for slug in ["", "Atelier", "atelier nord", "-atelier", "atelier-", "a--b"] {
            let salon = Salon::new("Atelier", slug, "12 rue des Lilas");
            assert!(
                matches!(validate_salon(&salon), Err(CatalogError::InvalidSlug(_))),
                "slug {slug:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_service_empty_name() {
        let service = Service::new("   ", ServiceKind::Tattoo);
        assert_eq!(validate_service(&service), Err(CatalogError::EmptyName));
    }

    #[test]
    fn test_validate_prestation_duration() {
        let zero = Prestation::new(service_id(), "Nothing", 1000, 0);
        assert_eq!(validate_prestation(&zero), Err(CatalogError::ZeroDuration));

        let marathon = Prestation::new(service_id(), "Back piece", 100_000, 900);
        assert_eq!(
            validate_prestation(&marathon),
            Err(CatalogError::DurationTooLong)
        );

        let fine = Prestation::new(service_id(), "Gel", 3000, 45);
        assert!(validate_prestation(&fine).is_ok());
    }

    #[test]
    fn test_active_prestations_sorted_by_price() {
        let prestations = vec![
            Prestation::new(service_id(), "Deluxe", 6000, 90),
            Prestation::new(service_id(), "Retired", 1000, 30).inactive(),
            Prestation::new(service_id(), "Basic", 2000, 30),
        ];

        let active = active_prestations(&prestations);
        let names: Vec<&str> = active.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Basic", "Deluxe"]);
    }

    #[test]
    fn test_selection_totals_sums() {
        let gel = Prestation::new(service_id(), "Gel", 3000, 45);
        let art = Prestation::new(service_id(), "Nail art", 1500, 30);
        let available = vec![gel.clone(), art.clone()];

        let totals = selection_totals(&[gel.id, art.id], &available).unwrap();
        assert_eq!(totals.duration_minutes, 75);
        assert_eq!(totals.price_cents, 4500);
    }

    #[test]
    fn test_selection_totals_unknown_and_inactive() {
        let retired = Prestation::new(service_id(), "Old", 1000, 30).inactive();
        let available = vec![retired.clone()];

        assert!(matches!(
            selection_totals(&[Uuid::new_v4()], &available),
            Err(CatalogError::UnknownPrestation(_))
        ));
        assert!(matches!(
            selection_totals(&[retired.id], &available),
            Err(CatalogError::InactivePrestation(_))
        ));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0), "0.00 €");
        assert_eq!(format_price(3550), "35.50 €");
        assert_eq!(format_price(12005), "120.05 €");
    }
}

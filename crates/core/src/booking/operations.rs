use std::collections::HashSet;

use super::error::BookingError;
use super::requests::{CreateFlashTattooRequest, CreateReservationRequest, CreateTattooRequest};
use super::types::{Reservation, Review, User};
use crate::catalog::{Prestation, Service, ServiceKind};
use crate::schedule::{BusyInterval, OpeningHours};
use uuid::Uuid;

const MAX_NAME_LEN: usize = 100;
const MAX_TEXT_LEN: usize = 2000;
const MAX_PLACEMENT_LEN: usize = 200;

/// Lower-cases and trims an e-mail address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> Result<(), BookingError> {
    let email = email.trim();
    let mut parts = email.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(BookingError::InvalidEmail(email.to_string()))
    }
}

fn validate_customer_name(name: &str) -> Result<(), BookingError> {
    if name.trim().is_empty() {
        return Err(BookingError::EmptyCustomerName);
    }
    check_len("Name", name, MAX_NAME_LEN)
}

fn require_text(field: &'static str, value: &str, max: usize) -> Result<(), BookingError> {
    if value.trim().is_empty() {
        return Err(BookingError::EmptyField { field });
    }
    check_len(field, value, max)
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), BookingError> {
    if value.trim().chars().count() > max {
        return Err(BookingError::FieldTooLong { field, max });
    }
    Ok(())
}

/// Validates a user before it is stored.
pub fn validate_user(user: &User) -> Result<(), BookingError> {
    validate_customer_name(&user.name)?;
    validate_email(&user.email)
}

/// Validates a booking before prestations are resolved.
pub fn validate_reservation_request(request: &CreateReservationRequest) -> Result<(), BookingError> {
    validate_customer_name(&request.customer.name)?;
    validate_email(&request.customer.email)?;

    if request.prestation_ids.is_empty() {
        return Err(BookingError::NoPrestations);
    }

    let mut seen = HashSet::new();
    for id in &request.prestation_ids {
        if !seen.insert(id) {
            return Err(BookingError::DuplicatePrestation(id.to_string()));
        }
    }

    if let Some(notes) = &request.notes {
        check_len("Notes", notes, MAX_TEXT_LEN)?;
    }
    Ok(())
}

/// Busy intervals of the reservations that block the calendar.
///
/// `exclude` leaves out one reservation, used when it is being moved.
pub fn blocking_intervals(reservations: &[Reservation], exclude: Option<Uuid>) -> Vec<BusyInterval> {
    reservations
        .iter()
        .filter(|r| r.status.blocks_calendar())
        .filter(|r| Some(r.id) != exclude)
        .map(Reservation::busy_interval)
        .collect()
}

/// Active reservations falling on days that are about to be closed.
pub fn conflicting_reservations<'a>(
    reservations: &'a [Reservation],
    closed_days: &[OpeningHours],
) -> Vec<&'a Reservation> {
    reservations
        .iter()
        .filter(|r| r.status.blocks_calendar())
        .filter(|r| {
            closed_days
                .iter()
                .any(|day| day.is_closed && day.salon_id == r.salon_id && day.date == r.date)
        })
        .collect()
}

/// Validates a custom tattoo request.
pub fn validate_tattoo_request(request: &CreateTattooRequest) -> Result<(), BookingError> {
    validate_customer_name(&request.customer.name)?;
    validate_email(&request.customer.email)?;
    require_text("Description", &request.description, MAX_TEXT_LEN)?;
    require_text("Placement", &request.placement, MAX_PLACEMENT_LEN)
}

/// Validates a flash tattoo request against the prestation it names.
pub fn validate_flash_request(
    request: &CreateFlashTattooRequest,
    prestation: &Prestation,
    service: &Service,
) -> Result<(), BookingError> {
    validate_customer_name(&request.customer.name)?;
    validate_email(&request.customer.email)?;
    require_text("Placement", &request.placement, MAX_PLACEMENT_LEN)?;

    if service.kind != ServiceKind::FlashTattoo || prestation.service_id != service.id {
        return Err(BookingError::NotAFlashPrestation(prestation.id.to_string()));
    }
    Ok(())
}

/// Validates a review before it is stored.
pub fn validate_review(review: &Review) -> Result<(), BookingError> {
    require_text("Author name", &review.author_name, MAX_NAME_LEN)?;
    if !(1..=5).contains(&review.rating) {
        return Err(BookingError::InvalidRating(review.rating));
    }
    require_text("Comment", &review.comment, MAX_TEXT_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{CustomerDetails, ReservationStatus};
    use crate::schedule::TimeSlot;
    use chrono::{NaiveDate, NaiveTime};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    fn booking(prestation_ids: Vec<Uuid>) -> CreateReservationRequest {
        CreateReservationRequest {
            salon_id: Uuid::new_v4(),
            date: date(),
            start_time: t(10, 0),
            prestation_ids,
            customer: CustomerDetails::new("Léa Martin", "lea@example.com"),
            notes: None,
        }
    }

    fn reservation(salon_id: Uuid, start: NaiveTime, end: NaiveTime) -> Reservation {
        Reservation::pending(salon_id, Uuid::new_v4(), vec![Uuid::new_v4()], date(), start, end)
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Lea@Example.COM "), "lea@example.com");
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("lea@example.com").is_ok());
        for bad in ["", "lea", "@example.com", "lea@", "a@b@c", "le a@example.com"] {
            assert!(
                matches!(validate_email(bad), Err(BookingError::InvalidEmail(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_reservation_request() {
        assert!(validate_reservation_request(&booking(vec![Uuid::new_v4()])).is_ok());
        assert_eq!(
            validate_reservation_request(&booking(vec![])),
            Err(BookingError::NoPrestations)
        );

        let id = Uuid::new_v4();
        assert_eq!(
            validate_reservation_request(&booking(vec![id, id])),
            Err(BookingError::DuplicatePrestation(id.to_string()))
        );

        let mut request = booking(vec![Uuid::new_v4()]);
        request.customer.name = "   ".to_string();
        assert_eq!(
            validate_reservation_request(&request),
            Err(BookingError::EmptyCustomerName)
        );
    }

    #[test]
    fn test_blocking_intervals_skip_inactive_and_excluded() {
        let salon = Uuid::new_v4();
        let pending = reservation(salon, t(9, 0), t(10, 0));
        let confirmed = reservation(salon, t(11, 0), t(12, 0)).with_status(ReservationStatus::Confirmed);
        let cancelled = reservation(salon, t(13, 0), t(14, 0)).with_status(ReservationStatus::Cancelled);
        let completed = reservation(salon, t(15, 0), t(16, 0)).with_status(ReservationStatus::Completed);
        let all = vec![pending.clone(), confirmed.clone(), cancelled, completed];

        let busy = blocking_intervals(&all, None);
        assert_eq!(busy, vec![pending.busy_interval(), confirmed.busy_interval()]);

        let busy = blocking_intervals(&all, Some(pending.id));
        assert_eq!(busy, vec![confirmed.busy_interval()]);
    }

    #[test]
    fn test_conflicting_reservations_match_closed_days() {
        let north = Uuid::new_v4();
        let south = Uuid::new_v4();
        let on_closed_day = reservation(south, t(10, 0), t(11, 0));
        let cancelled = reservation(south, t(12, 0), t(13, 0)).with_status(ReservationStatus::Cancelled);
        let other_salon = reservation(north, t(10, 0), t(11, 0));
        let reservations = vec![on_closed_day.clone(), cancelled, other_salon];

        let closed = vec![OpeningHours::closed(south, date())];
        let conflicts = conflicting_reservations(&reservations, &closed);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].id, on_closed_day.id);

        let open = vec![OpeningHours::open(south, date(), vec![TimeSlot::new(t(9, 0), t(18, 0))])];
        assert!(conflicting_reservations(&reservations, &open).is_empty());
    }

    #[test]
    fn test_validate_tattoo_request_requires_placement() {
        let request = CreateTattooRequest {
            customer: CustomerDetails::new("Sam", "sam@example.com"),
            salon_id: None,
            description: "Botanical sleeve".to_string(),
            placement: " ".to_string(),
            size_cm: None,
            style: None,
            budget_cents: None,
            reference_urls: vec![],
        };
        assert_eq!(
            validate_tattoo_request(&request),
            Err(BookingError::EmptyField { field: "Placement" })
        );
    }

    #[test]
    fn test_validate_flash_request_checks_service_kind() {
        let flash = Service::new("Flash", ServiceKind::FlashTattoo);
        let nails = Service::new("Nails", ServiceKind::NailCare);
        let prestation = Prestation::new(flash.id, "Swallow", 8000, 60);
        let request = CreateFlashTattooRequest {
            customer: CustomerDetails::new("Sam", "sam@example.com"),
            prestation_id: prestation.id,
            placement: "ankle".to_string(),
            preferred_date: None,
        };

        assert!(validate_flash_request(&request, &prestation, &flash).is_ok());
        assert_eq!(
            validate_flash_request(&request, &prestation, &nails),
            Err(BookingError::NotAFlashPrestation(prestation.id.to_string()))
        );
    }

    #[test]
    fn test_validate_review() {
        assert!(validate_review(&Review::new("Inès", 4, "Very precise work")).is_ok());
        assert_eq!(
            validate_review(&Review::new("Inès", 0, "Meh")),
            Err(BookingError::InvalidRating(0))
        );
        assert_eq!(
            validate_review(&Review::new("Inès", 6, "Too good")),
            Err(BookingError::InvalidRating(6))
        );
        assert_eq!(
            validate_review(&Review::new("Inès", 5, "x".repeat(2001))),
            Err(BookingError::FieldTooLong {
                field: "Comment",
                max: 2000
            })
        );
    }
}

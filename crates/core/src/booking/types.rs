use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::BusyInterval;
use crate::serde::hhmm;

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(UserRole::Customer),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// A customer (or staff) account, identified by e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Lower-cased, unique.
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new customer.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            phone: None,
            role: UserRole::Customer,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the role.
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

/// Lifecycle of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "cancelled" => Some(ReservationStatus::Cancelled),
            "completed" => Some(ReservationStatus::Completed),
            _ => None,
        }
    }

    /// Pending and confirmed reservations hold their time range.
    pub fn blocks_calendar(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }

    /// Allowed admin transitions. Cancelled and completed are terminal.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked appointment for one or more prestations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub user_id: Uuid,
    pub prestation_ids: Vec<Uuid>,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
    pub total_price_cents: u32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a pending reservation.
    pub fn pending(
        salon_id: Uuid,
        user_id: Uuid,
        prestation_ids: Vec<Uuid>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            salon_id,
            user_id,
            prestation_ids,
            date,
            start_time,
            end_time,
            status: ReservationStatus::Pending,
            total_price_cents: 0,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the total price in cents.
    pub fn with_total_price(mut self, cents: u32) -> Self {
        self.total_price_cents = cents;
        self
    }

    /// Sets the customer notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The time range this reservation occupies.
    pub fn busy_interval(&self) -> BusyInterval {
        BusyInterval::new(self.start_time, self.end_time)
    }

    /// Length of the appointment in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Shared lifecycle for tattoo and flash tattoo requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    Contacted,
    Accepted,
    Declined,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "new",
            RequestStatus::Contacted => "contacted",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Declined => "declined",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(RequestStatus::New),
            "contacted" => Some(RequestStatus::Contacted),
            "accepted" => Some(RequestStatus::Accepted),
            "declined" => Some(RequestStatus::Declined),
            _ => None,
        }
    }

    /// Requests move forward only; accepted and declined are terminal.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (New, Contacted) | (New, Accepted) | (New, Declined) | (Contacted, Accepted) | (Contacted, Declined)
        )
    }

    /// True while the studio still has to act on the request.
    pub fn is_open(&self) -> bool {
        matches!(self, RequestStatus::New | RequestStatus::Contacted)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for a custom tattoo design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TattooRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub salon_id: Option<Uuid>,
    pub description: String,
    pub placement: String,
    pub size_cm: Option<u32>,
    pub style: Option<String>,
    pub budget_cents: Option<u32>,
    pub reference_urls: Vec<String>,
    pub status: RequestStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TattooRequest {
    /// Creates a new request.
    pub fn new(
        user_id: Uuid,
        description: impl Into<String>,
        placement: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            salon_id: None,
            description: description.into(),
            placement: placement.into(),
            size_cm: None,
            style: None,
            budget_cents: None,
            reference_urls: Vec::new(),
            status: RequestStatus::New,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A request for one of the ready-made flash designs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashTattooRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    /// A prestation belonging to a flash tattoo service.
    pub prestation_id: Uuid,
    pub placement: String,
    pub preferred_date: Option<NaiveDate>,
    pub status: RequestStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FlashTattooRequest {
    /// Creates a new request.
    pub fn new(user_id: Uuid, prestation_id: Uuid, placement: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            prestation_id,
            placement: placement.into(),
            preferred_date: None,
            status: RequestStatus::New,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A customer review, shown once published by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Creates an unpublished review.
    pub fn new(author_name: impl Into<String>, rating: u8, comment: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_name: author_name.into(),
            rating,
            comment: comment.into(),
            published: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the review as published.
    pub fn published(mut self) -> Self {
        self.published = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_blocking_statuses() {
        assert!(ReservationStatus::Pending.blocks_calendar());
        assert!(ReservationStatus::Confirmed.blocks_calendar());
        assert!(!ReservationStatus::Cancelled.blocks_calendar());
        assert!(!ReservationStatus::Completed.blocks_calendar());
    }

    #[test]
    fn test_reservation_transitions() {
        use ReservationStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Pending));
        for next in [Pending, Confirmed, Cancelled, Completed] {
            assert!(!Cancelled.can_transition_to(next));
            assert!(!Completed.can_transition_to(next));
        }
    }

    #[test]
    fn test_request_transitions() {
        use RequestStatus::*;

        assert!(New.can_transition_to(Contacted));
        assert!(Contacted.can_transition_to(Accepted));
        assert!(!Contacted.can_transition_to(New));
        assert!(!Declined.can_transition_to(Accepted));
        assert!(New.is_open());
        assert!(!Accepted.is_open());
    }

    #[test]
    fn test_status_strings_round_trip() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
            ReservationStatus::Completed,
        ] {
            assert_eq!(ReservationStatus::parse(status.as_str()), Some(status));
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status.as_str())
            );
        }
        assert_eq!(RequestStatus::parse("contacted"), Some(RequestStatus::Contacted));
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("root"), None);
    }

    #[test]
    fn test_reservation_interval_and_duration() {
        let reservation = Reservation::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            vec![Uuid::new_v4()],
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            t(10, 0),
            t(11, 15),
        );

        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.duration_minutes(), 75);
        assert_eq!(reservation.busy_interval(), BusyInterval::new(t(10, 0), t(11, 15)));
    }

    #[test]
    fn test_reservation_serializes_times_as_hhmm() {
        let reservation = Reservation::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            vec![],
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            t(9, 30),
            t(10, 0),
        );
        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(json["start_time"], "09:30");
        assert_eq!(json["end_time"], "10:00");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_review_defaults_unpublished() {
        let review = Review::new("Inès", 5, "Lovely work");
        assert!(!review.published);
        assert!(review.published().published);
    }
}

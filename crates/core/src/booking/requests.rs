//! API request types for bookings, tattoo requests and reviews.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{
    FlashTattooRequest, RequestStatus, Reservation, ReservationStatus, Review, TattooRequest,
    User,
};
use crate::serde::{deserialize_optional_string, deserialize_optional_u32, hhmm};

/// Contact details entered by a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
}

impl CustomerDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    /// Convert into a new customer. The e-mail is expected to be normalized.
    pub fn into_user(self) -> User {
        let mut user = User::new(self.name.trim(), self.email);
        user.phone = self.phone;
        user
    }
}

/// Request payload for booking an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub salon_id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub prestation_ids: Vec<Uuid>,
    pub customer: CustomerDetails,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl CreateReservationRequest {
    /// Build the pending reservation once the customer and totals are known.
    pub fn into_reservation(
        self,
        user_id: Uuid,
        duration_minutes: u32,
        total_price_cents: u32,
    ) -> Reservation {
        let end_time = self.start_time + chrono::Duration::minutes(duration_minutes as i64);
        let mut reservation = Reservation::pending(
            self.salon_id,
            user_id,
            self.prestation_ids,
            self.date,
            self.start_time,
            end_time,
        )
        .with_total_price(total_price_cents);
        reservation.notes = self.notes;
        reservation
    }
}

/// Request payload for moving a reservation to another date or time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleReservationRequest {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
}

impl RescheduleReservationRequest {
    /// Move the reservation, keeping its duration.
    pub fn apply_to(self, reservation: &mut Reservation) {
        let duration = reservation.end_time - reservation.start_time;
        reservation.date = self.date;
        reservation.start_time = self.start_time;
        reservation.end_time = self.start_time + duration;
        reservation.updated_at = Utc::now();
    }
}

/// Request payload for changing a reservation's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReservationStatus {
    pub status: ReservationStatus,
}

/// Request payload for a custom tattoo request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTattooRequest {
    pub customer: CustomerDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salon_id: Option<Uuid>,
    pub description: String,
    pub placement: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub size_cm: Option<u32>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget_cents: Option<u32>,
    #[serde(default)]
    pub reference_urls: Vec<String>,
}

impl CreateTattooRequest {
    /// Convert into a new request owned by `user_id`.
    pub fn into_tattoo_request(self, user_id: Uuid) -> TattooRequest {
        let mut request = TattooRequest::new(user_id, self.description.trim(), self.placement.trim());
        request.salon_id = self.salon_id;
        request.size_cm = self.size_cm;
        request.style = self.style;
        request.budget_cents = self.budget_cents;
        request.reference_urls = self
            .reference_urls
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        request
    }
}

/// Request payload for a flash tattoo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFlashTattooRequest {
    pub customer: CustomerDetails,
    pub prestation_id: Uuid,
    pub placement: String,
    #[serde(
        default,
        deserialize_with = "crate::serde::deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub preferred_date: Option<NaiveDate>,
}

impl CreateFlashTattooRequest {
    /// Convert into a new request owned by `user_id`.
    pub fn into_flash_request(self, user_id: Uuid) -> FlashTattooRequest {
        let mut request = FlashTattooRequest::new(user_id, self.prestation_id, self.placement.trim());
        request.preferred_date = self.preferred_date;
        request
    }
}

/// Request payload for moving a tattoo or flash request through its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequestStatus {
    pub status: RequestStatus,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub admin_notes: Option<String>,
}

/// Request payload for leaving a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
}

impl CreateReviewRequest {
    /// Convert into a new unpublished review.
    pub fn into_review(self) -> Review {
        Review::new(self.author_name.trim(), self.rating, self.comment.trim())
    }
}

/// Request payload for moderating a review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReviewRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl UpdateReviewRequest {
    /// Apply updates to an existing review.
    pub fn apply_to(self, review: &mut Review) {
        if let Some(published) = self.published {
            review.published = published;
        }
        if let Some(comment) = self.comment {
            review.comment = comment.trim().to_string();
        }
        review.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_reservation_request_from_json() {
        let json = format!(
            r#"{{
                "salon_id": "{}",
                "date": "2025-03-05",
                "start_time": "10:15",
                "prestation_ids": ["{}"],
                "customer": {{"name": "Léa", "email": "lea@example.com", "phone": ""}},
                "notes": "  "
            }}"#,
            Uuid::nil(),
            Uuid::nil()
        );
        let request: CreateReservationRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(request.start_time, t(10, 15));
        assert_eq!(request.customer.phone, None);
        assert_eq!(request.notes, None);
    }

    #[test]
    fn test_into_reservation_computes_end_time() {
        let request = CreateReservationRequest {
            salon_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            start_time: t(10, 0),
            prestation_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
            customer: CustomerDetails::new("Léa", "lea@example.com"),
            notes: Some("First visit".to_string()),
        };
        let user_id = Uuid::new_v4();

        let reservation = request.into_reservation(user_id, 90, 6500);

        assert_eq!(reservation.user_id, user_id);
        assert_eq!(reservation.end_time, t(11, 30));
        assert_eq!(reservation.total_price_cents, 6500);
        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.prestation_ids.len(), 2);
        assert_eq!(reservation.notes.as_deref(), Some("First visit"));
    }

    #[test]
    fn test_reschedule_keeps_duration() {
        let mut reservation = Reservation::pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            vec![Uuid::new_v4()],
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            t(10, 0),
            t(10, 45),
        );
        let new_date = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();

        RescheduleReservationRequest {
            date: new_date,
            start_time: t(14, 30),
        }
        .apply_to(&mut reservation);

        assert_eq!(reservation.date, new_date);
        assert_eq!(reservation.start_time, t(14, 30));
        assert_eq!(reservation.end_time, t(15, 15));
    }

    #[test]
    fn test_tattoo_request_drops_blank_urls() {
        let json = r#"{
            "customer": {"name": "Sam", "email": "sam@example.com"},
            "description": "Fine-line swallow",
            "placement": "forearm",
            "size_cm": "8",
            "budget_cents": "",
            "reference_urls": ["https://example.com/a.png", "  "]
        }"#;
        let request: CreateTattooRequest = serde_json::from_str(json).unwrap();
        let tattoo = request.into_tattoo_request(Uuid::nil());

        assert_eq!(tattoo.size_cm, Some(8));
        assert_eq!(tattoo.budget_cents, None);
        assert_eq!(tattoo.reference_urls, vec!["https://example.com/a.png"]);
        assert_eq!(tattoo.status, RequestStatus::New);
    }

    #[test]
    fn test_update_review_publishes() {
        let mut review = CreateReviewRequest {
            author_name: " Inès ".to_string(),
            rating: 5,
            comment: "Great".to_string(),
        }
        .into_review();
        assert_eq!(review.author_name, "Inès");

        UpdateReviewRequest {
            published: Some(true),
            ..Default::default()
        }
        .apply_to(&mut review);
        assert!(review.published);
        assert_eq!(review.comment, "Great");
    }
}

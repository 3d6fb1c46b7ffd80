use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;

use salonbook_core::booking::{CreateReservationRequest, CustomerDetails};
use salonbook_core::serde::{
    deserialize_optional_date, deserialize_optional_string, deserialize_optional_uuid,
    deserialize_time,
};

/// Query string of the booking page (GET /booking).
///
/// `prestation_ids` is repeated once per checked box.
#[derive(Debug, Default, Deserialize)]
pub struct BookingQuery {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub salon_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub prestation_ids: Vec<Uuid>,
}

/// Booking form payload (POST /booking).
///
/// HTML forms post flat fields; the customer details are regrouped in
/// [`BookingForm::into_request`].
#[derive(Debug, Deserialize)]
pub struct BookingForm {
    pub salon_id: Uuid,
    pub date: NaiveDate,
    #[serde(deserialize_with = "deserialize_time")]
    pub start_time: NaiveTime,
    #[serde(default)]
    pub prestation_ids: Vec<Uuid>,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

impl BookingForm {
    /// The query that re-renders the booking page with the same selection.
    pub fn to_query(&self) -> BookingQuery {
        BookingQuery {
            salon_id: Some(self.salon_id),
            date: Some(self.date),
            prestation_ids: self.prestation_ids.clone(),
        }
    }

    /// Converts the form into the reservation request used by the API.
    pub fn into_request(self) -> CreateReservationRequest {
        CreateReservationRequest {
            salon_id: self.salon_id,
            date: self.date,
            start_time: self.start_time,
            prestation_ids: self.prestation_ids,
            customer: CustomerDetails {
                name: self.name,
                email: self.email,
                phone: self.phone,
            },
            notes: self.notes,
        }
    }
}

//! API request types for catalog administration.
//!
//! Pure data types with no I/O. `Create*` requests convert into new entities;
//! `Update*` requests are partial and applied onto an existing entity.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{Prestation, Salon, Service, ServiceKind};

/// Request payload for creating a salon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSalonRequest {
    pub name: String,
    pub slug: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CreateSalonRequest {
    /// Convert into a new Salon.
    pub fn into_salon(self) -> Salon {
        let mut salon = Salon::new(self.name, self.slug, self.address);
        salon.phone = self.phone;
        salon
    }
}

/// Request payload for updating a salon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSalonRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UpdateSalonRequest {
    /// Apply updates to an existing salon.
    pub fn apply_to(self, salon: &mut Salon) {
        if let Some(name) = self.name {
            salon.name = name;
        }
        if let Some(slug) = self.slug {
            salon.slug = slug;
        }
        if let Some(address) = self.address {
            salon.address = address;
        }
        if let Some(phone) = self.phone {
            salon.phone = Some(phone);
        }
        salon.updated_at = Utc::now();
    }
}

/// Request payload for creating a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub kind: ServiceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
}

impl CreateServiceRequest {
    /// Create a new request with a name and kind.
    pub fn new(name: impl Into<String>, kind: ServiceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            position: 0,
        }
    }

    /// Convert into a new Service.
    pub fn into_service(self) -> Service {
        let mut service = Service::new(self.name, self.kind).with_position(self.position);
        service.description = self.description;
        service
    }
}

/// Request payload for updating a service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ServiceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

impl UpdateServiceRequest {
    /// Apply updates to an existing service.
    pub fn apply_to(self, service: &mut Service) {
        if let Some(name) = self.name {
            service.name = name;
        }
        if let Some(kind) = self.kind {
            service.kind = kind;
        }
        if let Some(description) = self.description {
            service.description = Some(description);
        }
        if let Some(position) = self.position {
            service.position = position;
        }
        service.updated_at = Utc::now();
    }
}

/// Request payload for creating a prestation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrestationRequest {
    pub service_id: Uuid,
    pub name: String,
    pub price_cents: u32,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CreatePrestationRequest {
    /// Create a new request for an active prestation.
    pub fn new(
        service_id: Uuid,
        name: impl Into<String>,
        price_cents: u32,
        duration_minutes: u32,
    ) -> Self {
        Self {
            service_id,
            name: name.into(),
            price_cents,
            duration_minutes,
            description: None,
            image_url: None,
            active: true,
        }
    }

    /// Convert into a new Prestation.
    pub fn into_prestation(self) -> Prestation {
        let mut prestation = Prestation::new(
            self.service_id,
            self.name,
            self.price_cents,
            self.duration_minutes,
        );
        prestation.description = self.description;
        prestation.image_url = self.image_url;
        prestation.active = self.active;
        prestation
    }
}

/// Request payload for updating a prestation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePrestationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdatePrestationRequest {
    /// Apply updates to an existing prestation.
    pub fn apply_to(self, prestation: &mut Prestation) {
        if let Some(service_id) = self.service_id {
            prestation.service_id = service_id;
        }
        if let Some(name) = self.name {
            prestation.name = name;
        }
        if let Some(price_cents) = self.price_cents {
            prestation.price_cents = price_cents;
        }
        if let Some(duration_minutes) = self.duration_minutes {
            prestation.duration_minutes = duration_minutes;
        }
        if let Some(description) = self.description {
            prestation.description = Some(description);
        }
        if let Some(image_url) = self.image_url {
            prestation.image_url = Some(image_url);
        }
        if let Some(active) = self.active {
            prestation.active = active;
        }
        prestation.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_prestation_defaults_to_active() {
        let json = format!(
            r#"{{"service_id":"{}","name":"Fine line","price_cents":8000,"duration_minutes":90}}"#,
            Uuid::nil()
        );
        let request: CreatePrestationRequest = serde_json::from_str(&json).unwrap();
        assert!(request.active);

        let prestation = request.into_prestation();
        assert_eq!(prestation.name, "Fine line");
        assert_eq!(prestation.duration_minutes, 90);
        assert!(prestation.active);
    }

    #[test]
    fn test_update_prestation_is_partial() {
        let mut prestation = Prestation::new(Uuid::new_v4(), "Gel", 3000, 45);
        let before = prestation.updated_at;

        UpdatePrestationRequest {
            price_cents: Some(3200),
            active: Some(false),
            ..Default::default()
        }
        .apply_to(&mut prestation);

        assert_eq!(prestation.name, "Gel");
        assert_eq!(prestation.price_cents, 3200);
        assert_eq!(prestation.duration_minutes, 45);
        assert!(!prestation.active);
        assert!(prestation.updated_at >= before);
    }

    #[test]
    fn test_create_service_request() {
        let service = CreateServiceRequest::new("Flash", ServiceKind::FlashTattoo).into_service();
        assert_eq!(service.kind, ServiceKind::FlashTattoo);
        assert_eq!(service.position, 0);
    }

    #[test]
    fn test_update_salon_request() {
        let mut salon = Salon::new("Atelier", "atelier", "1 rue Haute");
        UpdateSalonRequest {
            phone: Some("0102030405".to_string()),
            ..Default::default()
        }
        .apply_to(&mut salon);

        assert_eq!(salon.name, "Atelier");
        assert_eq!(salon.phone.as_deref(), Some("0102030405"));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical salon location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salon {
    pub id: Uuid,
    pub name: String,
    /// URL-friendly identifier, unique across salons.
    pub slug: String,
    pub address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Salon {
    /// Creates a new salon.
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
            address: address.into(),
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets a specific ID for this salon (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// The family a service belongs to.
///
/// Drives how the public pages group offerings and which request flow applies:
/// nail care is booked directly, tattoos go through a request first, and flash
/// tattoos are picked from a catalog of ready-made designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    NailCare,
    Tattoo,
    FlashTattoo,
}

impl ServiceKind {
    /// Stable string form used for storage and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::NailCare => "nail_care",
            ServiceKind::Tattoo => "tattoo",
            ServiceKind::FlashTattoo => "flash_tattoo",
        }
    }

    /// Parses the string form produced by [`ServiceKind::as_str`].
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nail_care" => Some(ServiceKind::NailCare),
            "tattoo" => Some(ServiceKind::Tattoo),
            "flash_tattoo" => Some(ServiceKind::FlashTattoo),
            _ => None,
        }
    }

    /// Human readable label for pages.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::NailCare => "Nail care",
            ServiceKind::Tattoo => "Tattoo",
            ServiceKind::FlashTattoo => "Flash tattoo",
        }
    }
}

/// A category of offerings, e.g. "Manicure" or "Flash designs".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: ServiceKind,
    /// Display order on the services page (ascending).
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    /// Creates a new service of the given kind.
    pub fn new(name: impl Into<String>, kind: ServiceKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            kind,
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the display position.
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    /// Sets a specific ID for this service (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A bookable offering with a price and a duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prestation {
    pub id: Uuid,
    pub service_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Price in cents.
    pub price_cents: u32,
    pub duration_minutes: u32,
    /// Inactive prestations are hidden from the public pages and cannot be booked.
    pub active: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prestation {
    /// Creates a new active prestation.
    pub fn new(
        service_id: Uuid,
        name: impl Into<String>,
        price_cents: u32,
        duration_minutes: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            service_id,
            name: name.into(),
            description: None,
            price_cents,
            duration_minutes,
            active: true,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Marks the prestation as inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Sets a specific ID for this prestation (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A service together with its prestations, as listed on the services page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWithPrestations {
    #[serde(flatten)]
    pub service: Service,
    pub prestations: Vec<Prestation>,
}

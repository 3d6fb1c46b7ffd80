mod error;
mod operations;
mod requests;
mod types;

pub use error::CatalogError;
pub use operations::{
    active_prestations, format_price, selection_totals, validate_prestation, validate_salon,
    validate_service, SelectionTotals, MAX_DURATION_MINUTES,
};
pub use requests::{
    CreatePrestationRequest, CreateSalonRequest, CreateServiceRequest, UpdatePrestationRequest,
    UpdateSalonRequest, UpdateServiceRequest,
};
pub use types::{Prestation, Salon, Service, ServiceKind, ServiceWithPrestations};

//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without snapshot I/O.

use std::sync::Arc;

use crate::domain::ports::{Authenticator, BulkImporter, EquipmentPort, LocationsPort};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub locations: Arc<dyn LocationsPort>,
    pub equipment: Arc<dyn EquipmentPort>,
    pub importer: Arc<dyn BulkImporter>,
    pub auth: Arc<dyn Authenticator>,
}

impl HttpState {
    pub fn new(
        locations: Arc<dyn LocationsPort>,
        equipment: Arc<dyn EquipmentPort>,
        importer: Arc<dyn BulkImporter>,
        auth: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            locations,
            equipment,
            importer,
            auth,
        }
    }
}

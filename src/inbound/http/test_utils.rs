//! Stub ports and app assembly helpers shared by handler tests.

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;

use crate::domain::ports::{
    Authenticator, BulkImporter, EquipmentPort, LocationsPort, StaticAuthenticator,
};
use crate::domain::{Equipment, Error, ImportSummary, Location};

use super::state::HttpState;

/// Stub [`LocationsPort`] returning canned rows and recording adds.
#[derive(Default)]
pub(crate) struct StubLocations {
    pub rows: Vec<Location>,
    pub add_error: Option<Error>,
    pub added: Mutex<Vec<Location>>,
}

#[async_trait]
impl LocationsPort for StubLocations {
    async fn list(&self) -> Result<Vec<Location>, Error> {
        Ok(self.rows.clone())
    }

    async fn add(&self, location: Location) -> Result<(), Error> {
        if let Some(err) = &self.add_error {
            return Err(err.clone());
        }
        self.added
            .lock()
            .expect("stub lock healthy")
            .push(location);
        Ok(())
    }
}

/// Stub [`EquipmentPort`] mirroring [`StubLocations`].
#[derive(Default)]
pub(crate) struct StubEquipment {
    pub rows: Vec<Equipment>,
    pub add_error: Option<Error>,
    pub added: Mutex<Vec<Equipment>>,
}

#[async_trait]
impl EquipmentPort for StubEquipment {
    async fn list(&self) -> Result<Vec<Equipment>, Error> {
        Ok(self.rows.clone())
    }

    async fn add(&self, equipment: Equipment) -> Result<(), Error> {
        if let Some(err) = &self.add_error {
            return Err(err.clone());
        }
        self.added
            .lock()
            .expect("stub lock healthy")
            .push(equipment);
        Ok(())
    }
}

/// Stub [`BulkImporter`] returning a canned summary or error.
#[derive(Default)]
pub(crate) struct StubImporter {
    pub summary: ImportSummary,
    pub error: Option<Error>,
    pub received: Mutex<Vec<Vec<u8>>>,
}

#[async_trait]
impl BulkImporter for StubImporter {
    async fn import(&self, snapshot: Vec<u8>) -> Result<ImportSummary, Error> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        self.received
            .lock()
            .expect("stub lock healthy")
            .push(snapshot);
        Ok(self.summary.clone())
    }
}

/// State bundle with default stubs, overridable per test.
pub(crate) struct StubState {
    pub locations: Arc<StubLocations>,
    pub equipment: Arc<StubEquipment>,
    pub importer: Arc<StubImporter>,
    pub auth: Arc<dyn Authenticator>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            locations: Arc::new(StubLocations::default()),
            equipment: Arc::new(StubEquipment::default()),
            importer: Arc::new(StubImporter::default()),
            auth: Arc::new(StaticAuthenticator::default()),
        }
    }
}

impl StubState {
    pub fn into_data(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            self.locations,
            self.equipment,
            self.importer,
            self.auth,
        ))
    }
}

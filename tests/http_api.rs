//! End-to-end coverage: real snapshot persistence and merge engine behind the
//! HTTP surface, with an in-memory blob store standing in for the remote.

use std::sync::Arc;

use actix_web::{test as actix_test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use zertify_backend::api::health::{live, ready, HealthState};
use zertify_backend::domain::ports::{
    MemorySnapshotStore, SnapshotStore, SnapshotStoreError, StaticAuthenticator,
};
use zertify_backend::inbound::http::auth::login;
use zertify_backend::inbound::http::equipment::{add_equipment, list_equipment};
use zertify_backend::inbound::http::import::bulk_import;
use zertify_backend::inbound::http::locations::{add_location, list_locations};
use zertify_backend::inbound::http::{json_error_handler, state::HttpState};
use zertify_backend::outbound::persistence::{
    location_repository, SnapshotBulkImporter, SnapshotEquipment, SnapshotLocations,
    SnapshotPersistence, Workspace,
};

const BOUNDARY: &str = "----zertify-it-boundary";

/// Store whose fetch works but whose writes always fail, for partial-success
/// coverage.
struct WriteRejectingStore {
    inner: MemorySnapshotStore,
}

#[async_trait]
impl SnapshotStore for WriteRejectingStore {
    async fn fetch(&self) -> Result<Option<Vec<u8>>, SnapshotStoreError> {
        self.inner.fetch().await
    }

    async fn store(&self, _snapshot: Vec<u8>) -> Result<(), SnapshotStoreError> {
        Err(SnapshotStoreError::rejected(503u16, "write rejected"))
    }
}

fn state_over(persistence: SnapshotPersistence) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(SnapshotLocations::new(persistence.clone())),
        Arc::new(SnapshotEquipment::new(persistence.clone())),
        Arc::new(SnapshotBulkImporter::new(persistence)),
        Arc::new(StaticAuthenticator::default()),
    ))
}

async fn seeded_state() -> web::Data<HttpState> {
    let persistence = SnapshotPersistence::new(Arc::new(MemorySnapshotStore::new()));
    persistence.ensure_initialised().await.expect("init");
    state_over(persistence)
}

fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    App::new()
        .app_data(state)
        .app_data(health)
        .service(
            web::scope("/api")
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .service(list_locations)
                .service(add_location)
                .service(list_equipment)
                .service(add_equipment)
                .service(login)
                .service(bulk_import),
        )
        .service(ready)
        .service(live)
}

fn multipart_upload(filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
         filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

#[actix_web::test]
async fn location_post_then_get_round_trips() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/locations")
            .set_json(json!({
                "locationId": 1,
                "name": "Depot",
                "address": "1 Dock St",
                "city": "Leith",
                "state": null,
                "zipcode": "EH6"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/locations")
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.as_array().expect("array").len(), 1);
    assert_eq!(body[0]["locationId"], 1);
    assert_eq!(body[0]["name"], "Depot");
}

#[actix_web::test]
async fn duplicate_location_id_conflicts_and_keeps_one_row() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;
    let payload = json!({
        "locationId": 1, "name": "First", "address": null,
        "city": null, "state": null, "zipcode": null
    });

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/locations")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), actix_web::http::StatusCode::CREATED);

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/locations")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), actix_web::http::StatusCode::CONFLICT);

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/locations")
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(listed).await;
    assert_eq!(body.as_array().expect("array").len(), 1);
}

#[actix_web::test]
async fn equipment_accepts_dangling_location_reference() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/equipment")
            .set_json(json!({
                "equipmentId": 10,
                "name": "Drill",
                "type": "tool",
                "status": "active",
                "purchaseDate": "2023-06-01",
                "locationId": 404
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/equipment")
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(listed).await;
    assert_eq!(body[0]["locationId"], 404);
    assert_eq!(body[0]["type"], "tool");
}

#[actix_web::test]
async fn bulk_import_covers_update_and_insert_paths() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;

    // Live row that the upload will overwrite.
    let seeded = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/locations")
            .set_json(json!({
                "locationId": 1, "name": "Old name", "address": null,
                "city": null, "state": null, "zipcode": null
            }))
            .to_request(),
    )
    .await;
    assert_eq!(seeded.status(), actix_web::http::StatusCode::CREATED);

    // Uploaded snapshot: id 1 renamed, id 2 fresh.
    let uploaded = Workspace::create_empty().expect("uploaded workspace");
    for (id, name) in [(1, "New name"), (2, "Fresh")] {
        location_repository::insert(
            uploaded.conn(),
            &zertify_backend::domain::Location {
                location_id: id,
                name: Some(name.into()),
                address: None,
                city: None,
                state: None,
                zipcode: None,
            },
        )
        .expect("seed upload row");
    }
    let upload_bytes = uploaded.into_snapshot().expect("snapshot bytes");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/bulk-import")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_upload("upload.db", &upload_bytes))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["message"],
        "Successfully Imported 2 Locations; Imported 0 Equipments"
    );

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/locations")
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(listed).await;
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 2, "update path created no duplicate");
    assert_eq!(rows[0]["name"], "New name");
    assert_eq!(rows[1]["name"], "Fresh");
}

#[actix_web::test]
async fn bulk_import_missing_table_aborts_without_changes() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;

    let uploaded = Workspace::create_empty().expect("uploaded workspace");
    uploaded
        .conn()
        .execute_batch("DROP TABLE Equipment")
        .expect("drop table");
    location_repository::insert(
        uploaded.conn(),
        &zertify_backend::domain::Location {
            location_id: 9,
            name: Some("Should not land".into()),
            address: None,
            city: None,
            state: None,
            zipcode: None,
        },
    )
    .expect("seed upload row");
    let upload_bytes = uploaded.into_snapshot().expect("snapshot bytes");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/bulk-import")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_upload("upload.db", &upload_bytes))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["message"],
        "The uploaded database does not contain a 'Equipment' table"
    );

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/locations")
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(listed).await;
    assert!(body.as_array().expect("array").is_empty(), "0 rows changed");
}

#[actix_web::test]
async fn persist_failure_reports_partial_success_distinctly() {
    // Initialise over a healthy store, then serve the same blob from a store
    // that rejects writes.
    let seed = Arc::new(MemorySnapshotStore::new());
    SnapshotPersistence::new(seed.clone())
        .ensure_initialised()
        .await
        .expect("init");
    let blob = seed.fetch().await.expect("fetch").expect("blob stored");
    let persistence = SnapshotPersistence::new(Arc::new(WriteRejectingStore {
        inner: MemorySnapshotStore::with_blob(blob),
    }));
    let app = actix_test::init_service(test_app(state_over(persistence))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/locations")
            .set_json(json!({
                "locationId": 1, "name": "Depot", "address": null,
                "city": null, "state": null, "zipcode": null
            }))
            .to_request(),
    )
    .await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "persist_failed");
    assert_eq!(
        body["message"],
        "Location added but failed to update cloud storage"
    );
}

#[actix_web::test]
async fn login_round_trip_and_probes() {
    let app = actix_test::init_service(test_app(seeded_state().await)).await;

    let ok = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "username": "admin", "password": "password" }))
            .to_request(),
    )
    .await;
    assert!(ok.status().is_success());

    let bad = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "username": "admin", "password": "Password" }))
            .to_request(),
    )
    .await;
    assert_eq!(bad.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    let probe = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/healthz/ready").to_request(),
    )
    .await;
    assert!(probe.status().is_success());
}

//! End-to-end flow: the scanning client driving a live portal server.

#![allow(clippy::panic)]

use std::sync::Arc;

use axum::Router;
use chrono::{Duration, Utc};
use tower_http::trace::TraceLayer;

use checkin_gateway::api;
use checkin_gateway::app_state::AppState;
use checkin_gateway::auth::{Permission, TokenStore};
use checkin_gateway::client::{
    ClientError, HttpRegistryApi, HttpScanApi, ScanDispatcher, ScanOutcome, ScanTypeClient,
};
use checkin_gateway::domain::{ScanTypeDraft, ScanTypeRegistry, UserDirectory, UserId, UserRecord};
use checkin_gateway::service::CheckinService;

const SUPER_TOKEN: &str = "super-token";
const DESK_TOKEN: &str = "desk-token";

/// Spawns a portal on an ephemeral port and returns its base URL.
async fn spawn_portal(service: Arc<CheckinService>) -> String {
    let token_store = Arc::new(TokenStore::from_entries([
        (SUPER_TOKEN.to_string(), vec![Permission::SuperAdmin]),
        (DESK_TOKEN.to_string(), vec![Permission::Organizer]),
    ]));
    let state = AppState {
        service,
        token_store,
    };
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("failed to read listener address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn service_with_scan_types(drafts: Vec<ScanTypeDraft>) -> Arc<CheckinService> {
    let mut records = Vec::new();
    for (i, draft) in drafts.into_iter().enumerate() {
        records.push(draft.into_scan_type(u32::try_from(i).unwrap_or(u32::MAX)));
    }
    Arc::new(CheckinService::new(
        Arc::new(ScanTypeRegistry::with_scan_types(records)),
        Arc::new(UserDirectory::new()),
        None,
    ))
}

fn draft(name: &str, is_check_in: bool) -> ScanTypeDraft {
    let now = Utc::now();
    ScanTypeDraft {
        name: name.to_string(),
        is_check_in,
        is_permanent_scan: false,
        start_time: now - Duration::hours(1),
        end_time: now + Duration::hours(1),
    }
}

fn participant(id: &str) -> UserRecord {
    UserRecord {
        id: UserId::from(id),
        first_name: "Alice".to_string(),
        last_name: "Nguyen".to_string(),
        preferred_email: "alice@example.com".to_string(),
        permissions: Vec::new(),
        late_checkin_eligible: false,
        claimed_scans: Vec::new(),
    }
}

#[tokio::test]
async fn scanning_desk_flow_resolves_every_outcome() {
    let service = service_with_scan_types(vec![draft("Event Check-In", true), draft("Lunch", false)]);
    let Ok(()) = service.register_user(participant("alice")).await else {
        panic!("registration failed");
    };
    let base = spawn_portal(Arc::clone(&service)).await;

    let check_in = ScanDispatcher::new(HttpScanApi::new(&base, DESK_TOKEN), "Event Check-In");
    let lunch = ScanDispatcher::new(HttpScanApi::new(&base, DESK_TOKEN), "Lunch");

    // A non-tag payload resolves locally
    let report = check_in.dispatch("https://example.com/profile").await;
    assert_eq!(report.outcome, ScanOutcome::InvalidFormat);

    // Lunch before check-in is refused
    let report = lunch.dispatch("hack:alice").await;
    assert_eq!(report.outcome, ScanOutcome::NotCheckedIn);

    // Check-in claims and carries the participant projection back
    let report = check_in.dispatch("hack:alice").await;
    assert_eq!(report.outcome, ScanOutcome::Claimed);
    assert_eq!(report.outcome.color(), "#5fde05");
    let Some(user) = report.user else {
        panic!("expected participant projection");
    };
    assert_eq!(user.first_name, "Alice");

    // A second check-in is a duplicate
    let report = check_in.dispatch("hack:alice").await;
    assert_eq!(report.outcome, ScanOutcome::AlreadyClaimed);

    // Lunch now claims
    let report = lunch.dispatch("hack:alice").await;
    assert_eq!(report.outcome, ScanOutcome::Claimed);

    // An unregistered tag is an invalid user, still with no projection
    let report = check_in.dispatch("hack:ghost").await;
    assert_eq!(report.outcome, ScanOutcome::InvalidUser);
    assert_eq!(report.user, None);
}

#[tokio::test]
async fn registry_client_mirrors_the_server_rules() {
    let service = service_with_scan_types(vec![draft("Event Check-In", true), draft("Lunch", false)]);
    let base = spawn_portal(service).await;

    let mut admin = ScanTypeClient::new(HttpRegistryApi::new(&base, SUPER_TOKEN));
    let Ok(()) = admin.refresh().await else {
        panic!("refresh failed");
    };
    assert_eq!(admin.scan_types().len(), 2);

    // Create appends with precedence equal to the prior count
    let Ok(created) = admin.create(draft("Workshop", false)).await else {
        panic!("create failed");
    };
    assert_eq!(created.precedence, 2);

    // Edit preserves precedence
    let Ok(updated) = admin.update(2, draft("Rust Workshop", false)).await else {
        panic!("update failed");
    };
    assert_eq!(updated.name, "Rust Workshop");
    assert_eq!(updated.precedence, 2);

    // Deleting the middle record leaves a precedence gap
    let Ok(removed) = admin.delete(1).await else {
        panic!("delete failed");
    };
    assert_eq!(removed.name, "Lunch");
    let left: Vec<u32> = admin.scan_types().iter().map(|r| r.precedence).collect();
    assert_eq!(left, [0, 2]);

    // The check-in scan type is refused locally, before any request
    assert!(matches!(
        admin.delete(0).await,
        Err(ClientError::CheckInProtected)
    ));

    // A fresh mirror agrees with the server
    let mut fresh = ScanTypeClient::new(HttpRegistryApi::new(&base, SUPER_TOKEN));
    let Ok(()) = fresh.refresh().await else {
        panic!("refresh failed");
    };
    let names: Vec<&str> = fresh.scan_types().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Event Check-In", "Rust Workshop"]);
}

#[tokio::test]
async fn registry_mutations_require_super_admin() {
    let service = service_with_scan_types(vec![draft("Event Check-In", true), draft("Lunch", false)]);
    let base = spawn_portal(service).await;

    // The desk token can read the registry
    let mut desk = ScanTypeClient::new(HttpRegistryApi::new(&base, DESK_TOKEN));
    let Ok(()) = desk.refresh().await else {
        panic!("desk refresh failed");
    };
    assert_eq!(desk.scan_types().len(), 2);

    // But every mutation is rejected server-side, and the mirror holds
    let create = desk.create(draft("Workshop", false)).await;
    let Err(ClientError::Api { status, msg }) = create else {
        panic!("expected a 403 rejection");
    };
    assert_eq!(status.as_u16(), 403);
    assert!(msg.contains("permission"));

    assert!(desk.update(1, draft("Brunch", false)).await.is_err());
    assert!(desk.delete(1).await.is_err());
    assert_eq!(desk.scan_types().len(), 2);
}

#[tokio::test]
async fn scan_write_falls_back_to_the_query_identifier() {
    let service = service_with_scan_types(vec![draft("Event Check-In", true)]);
    let Ok(()) = service.register_user(participant("alice")).await else {
        panic!("registration failed");
    };
    let base = spawn_portal(Arc::clone(&service)).await;
    let http = reqwest::Client::new();

    // An empty body identifier defers to the query string
    let Ok(response) = http
        .post(format!("{base}/api/scan?id=alice"))
        .header("Authorization", DESK_TOKEN)
        .json(&serde_json::json!({"id": "", "scan": "Event Check-In"}))
        .send()
        .await
    else {
        panic!("scan request failed");
    };
    assert_eq!(response.status().as_u16(), 200);

    // A non-empty body identifier wins over a conflicting query
    let Ok(response) = http
        .post(format!("{base}/api/scan?id=alice"))
        .header("Authorization", DESK_TOKEN)
        .json(&serde_json::json!({"id": "ghost", "scan": "Event Check-In"}))
        .send()
        .await
    else {
        panic!("scan request failed");
    };
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn unknown_token_is_rejected_before_any_decision() {
    let service = service_with_scan_types(vec![draft("Event Check-In", true)]);
    let Ok(()) = service.register_user(participant("alice")).await else {
        panic!("registration failed");
    };
    let base = spawn_portal(service).await;

    let rogue = ScanDispatcher::new(HttpScanApi::new(&base, "wrong-token"), "Event Check-In");
    let report = rogue.dispatch("hack:alice").await;
    // 401 is outside the outcome table
    assert_eq!(report.outcome, ScanOutcome::UnexpectedError);
}

#[tokio::test]
async fn unknown_scan_type_resolves_through_the_400_row() {
    let service = service_with_scan_types(vec![draft("Event Check-In", true)]);
    let Ok(()) = service.register_user(participant("alice")).await else {
        panic!("registration failed");
    };
    let base = spawn_portal(service).await;

    let stale = ScanDispatcher::new(HttpScanApi::new(&base, DESK_TOKEN), "Removed Scan");
    let report = stale.dispatch("hack:alice").await;
    assert_eq!(report.outcome, ScanOutcome::LateCheckinIneligible);
    // The follow-up read still ran
    assert!(report.user.is_some());
}

//! Shared test infrastructure.
//!
//! The real activities service is an external collaborator, so these tests
//! run against an in-process stand-in speaking the same REST contract:
//! - `GET /activities` — catalog as a JSON object keyed by activity name
//! - `POST /activities/{activity}/signup?email=...` — `{message}` / `{detail}`
//! - `POST /activities/{activity}/unregister?email=...` — same contract
//!
//! `spawn_upstream()` binds the stand-in on an ephemeral port; the returned
//! base URL is fed to an `ApiClient`. The shared state handle lets tests
//! assert on upstream state directly.

use std::collections::BTreeMap;
use std::sync::Mutex;

use actix_web::{App, HttpResponse, HttpServer, web};
use serde::{Deserialize, Serialize};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Seeded into Basketball's participant list.
pub const SEEDED_EMAIL: &str = "alex@mergington.edu";
pub const NEW_EMAIL: &str = "newstudent@mergington.edu";

// ============================================================================
// MOCK UPSTREAM
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MockActivity {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

pub type MockCatalog = BTreeMap<String, MockActivity>;
pub type MockState = web::Data<Mutex<MockCatalog>>;

#[derive(Deserialize)]
struct EmailQuery {
    email: String,
}

/// Seed catalog: one activity with a participant, one nearly full, one empty.
pub fn seed_catalog() -> MockCatalog {
    let mut catalog = MockCatalog::new();
    catalog.insert(
        "Basketball".to_string(),
        MockActivity {
            description: "Learn and play basketball".to_string(),
            schedule: "Tuesdays, 3:30 PM - 5:00 PM".to_string(),
            max_participants: 15,
            participants: vec![SEEDED_EMAIL.to_string()],
        },
    );
    catalog.insert(
        "Chess Club".to_string(),
        MockActivity {
            description: "Learn strategies and compete in tournaments".to_string(),
            schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
            max_participants: 2,
            participants: vec!["a@x.com".to_string()],
        },
    );
    catalog.insert(
        "Tennis Club".to_string(),
        MockActivity {
            description: "Practice tennis fundamentals".to_string(),
            schedule: "Mondays, 4:00 PM - 5:30 PM".to_string(),
            max_participants: 10,
            participants: Vec::new(),
        },
    );
    catalog
}

pub fn seeded_state() -> MockState {
    web::Data::new(Mutex::new(seed_catalog()))
}

async fn list(state: MockState) -> HttpResponse {
    let catalog = state.lock().expect("lock mock state");
    HttpResponse::Ok().json(&*catalog)
}

async fn signup(
    state: MockState,
    path: web::Path<String>,
    query: web::Query<EmailQuery>,
) -> HttpResponse {
    let activity = path.into_inner();
    let email = query.into_inner().email;
    let mut catalog = state.lock().expect("lock mock state");

    let Some(entry) = catalog.get_mut(&activity) else {
        return HttpResponse::NotFound()
            .json(serde_json::json!({ "detail": "Activity not found" }));
    };
    if entry.participants.contains(&email) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "detail": format!("{email} is already signed up for {activity}")
        }));
    }
    entry.participants.push(email.clone());
    HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Signed up {email} for {activity}")
    }))
}

async fn unregister(
    state: MockState,
    path: web::Path<String>,
    query: web::Query<EmailQuery>,
) -> HttpResponse {
    let activity = path.into_inner();
    let email = query.into_inner().email;
    let mut catalog = state.lock().expect("lock mock state");

    let Some(entry) = catalog.get_mut(&activity) else {
        return HttpResponse::NotFound()
            .json(serde_json::json!({ "detail": "Activity not found" }));
    };
    match entry.participants.iter().position(|p| p == &email) {
        None => HttpResponse::BadRequest().json(serde_json::json!({
            "detail": format!("{email} is not signed up for {activity}")
        })),
        Some(idx) => {
            entry.participants.remove(idx);
            HttpResponse::Ok().json(serde_json::json!({
                "message": format!("Unregistered {email} from {activity}")
            }))
        }
    }
}

/// Start the mock upstream on an ephemeral port; returns its base URL.
/// Must be called from within an actix runtime.
pub fn spawn_upstream(state: &MockState) -> String {
    let state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/activities", web::get().to(list))
            .route("/activities/{activity}/signup", web::post().to(signup))
            .route(
                "/activities/{activity}/unregister",
                web::post().to(unregister),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind mock upstream");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

/// A base URL nothing listens on, for transport-failure tests.
pub fn dead_upstream() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{addr}")
}

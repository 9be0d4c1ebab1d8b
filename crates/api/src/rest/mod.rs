//! REST-Interface fuer Kurswerk

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod validierung;

use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use serde::Serialize;

use kurswerk_auth::AuthService;
use kurswerk_core::Code;
use kurswerk_db::SqliteDb;
use kurswerk_observability::{health_router, timing_middleware, trace_layer, HealthState};

/// Auth-Service ueber dem SQLite-Credential-Store
pub type KurswerkAuth = AuthService<SqliteDb, SqliteDb>;

/// Axum-State fuer den REST-Server
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<KurswerkAuth>,
}

impl AppState {
    pub fn neu(auth: Arc<KurswerkAuth>) -> Self {
        Self { auth }
    }
}

/// Einheitlicher Antwort-Umschlag
#[derive(Debug, Serialize)]
pub struct Antwort<T: Serialize> {
    pub code: Code,
    pub msg: &'static str,
    pub data: Option<T>,
}

impl<T: Serialize> Antwort<T> {
    pub fn neu(code: Code, data: Option<T>) -> Self {
        Self {
            code,
            msg: code.nachricht(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Antwort<T> {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Baut die komplette Anwendung (API + Health) ohne CORS
///
/// Wird vom Server und von den Tests genutzt.
pub fn app(state: AppState, health: HealthState) -> Router {
    routes::v1_router()
        .with_state(state)
        .merge(health_router(health))
        .layer(axum::middleware::from_fn(timing_middleware))
        .layer(trace_layer())
}

pub use server::{RestServer, RestServerKonfig};

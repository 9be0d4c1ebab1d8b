//! Health-Check-Endpunkt fuer Kurswerk
//!
//! Endpoint: `GET /health`
//! Response: JSON mit Status, Version, Uptime und DB-Verbindungsstatus

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::{future::Future, pin::Pin, sync::Arc, time::Instant};

pub type PruefFuture = Pin<Box<dyn Future<Output = bool> + Send>>;

/// Asynchrone Pruefung, ob der Credential-Store erreichbar ist
pub type DbPruefer = Arc<dyn Fn() -> PruefFuture + Send + Sync>;

/// Status des Health-Checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Antwort des Health-Check-Endpunkts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub db_connected: bool,
}

/// Geteilter Zustand fuer den Health-Check-Handler
#[derive(Clone)]
pub struct HealthState {
    start_time: Instant,
    db_pruefer: Option<DbPruefer>,
}

impl HealthState {
    pub fn neu() -> Self {
        Self {
            start_time: Instant::now(),
            db_pruefer: None,
        }
    }

    pub fn mit_db_pruefer<F, Fut>(mut self, pruefung: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.db_pruefer = Some(Arc::new(move || -> PruefFuture { Box::pin(pruefung()) }));
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Ohne Pruefer gilt die DB als verbunden
    pub async fn db_verbunden(&self) -> bool {
        match &self.db_pruefer {
            Some(pruefer) => pruefer().await,
            None => true,
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::neu()
    }
}

/// Axum-Router fuer den `/health`-Endpunkt
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// `GET /health` – gibt den Serverstatus zurueck
///
/// Auch bei `degraded` wird 200 geliefert, damit Probes nicht failen.
async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let db_connected = state.db_verbunden().await;
    if !db_connected {
        tracing::warn!("Health-Check: Datenbank nicht erreichbar");
    }

    let response = HealthResponse {
        status: if db_connected {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        db_connected,
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    async fn abfragen(state: HealthState) -> serde_json::Value {
        let antwort = health_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(antwort.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn health_state_uptime_frisch() {
        assert!(HealthState::neu().uptime_seconds() < 5);
    }

    #[tokio::test]
    async fn health_ohne_pruefer_ist_healthy() {
        let json = abfragen(HealthState::neu()).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["db_connected"], true);
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn health_mit_ausgefallener_db_ist_degraded() {
        let json = abfragen(HealthState::neu().mit_db_pruefer(|| async { false })).await;
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["db_connected"], false);
    }

    #[test]
    fn health_response_deserialisierung() {
        let json = r#"{"status":"healthy","version":"0.1.0","uptime_seconds":100,"db_connected":true}"#;
        let response: HealthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.uptime_seconds, 100);
    }
}

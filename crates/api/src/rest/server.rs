//! Axum HTTP-Server fuer die Kurswerk-API

use std::future::Future;
use std::net::SocketAddr;

use anyhow::Result;
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

use kurswerk_observability::HealthState;

use crate::rest::{app, AppState};

/// REST-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct RestServerKonfig {
    pub bind_addr: SocketAddr,
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt (nur fuer Entwicklung).
    pub cors_origins: Vec<String>,
}

impl Default for RestServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_origins: vec![],
        }
    }
}

/// Baut den CORS-Layer: entweder spezifische Origins oder Any
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ungueltiger CORS-Origin ignoriert");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
}

/// Axum HTTP-Server fuer die API
pub struct RestServer {
    konfig: RestServerKonfig,
}

impl RestServer {
    pub fn neu(konfig: RestServerKonfig) -> Self {
        Self { konfig }
    }

    /// Startet den REST-Server und laeuft bis `shutdown` abgeschlossen ist
    pub async fn starten(
        self,
        state: AppState,
        health: HealthState,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let app = app(state, health).layer(cors_layer(&self.konfig.cors_origins));

        let listener = tokio::net::TcpListener::bind(self.konfig.bind_addr).await?;
        tracing::info!(addr = %self.konfig.bind_addr, "REST-Server gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("REST-Server beendet");
        Ok(())
    }
}

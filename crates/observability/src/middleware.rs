//! Request-Tracing und -Timing fuer Axum

use axum::{
    body::Body,
    http::{Request, Response},
    middleware::Next,
};
use std::time::{Duration, Instant};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::TraceLayer,
};

/// Anfragen ab dieser Dauer werden als langsam gewarnt
const LANGSAM: Duration = Duration::from_millis(500);

/// TraceLayer fuer HTTP-Spans (Methode, URI, Status)
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// Axum-Middleware-Funktion: misst Antwortzeit und loggt strukturiert.
///
/// Verwendung:
/// ```ignore
/// Router::new()
///     .route("/", get(handler))
///     .layer(axum::middleware::from_fn(timing_middleware))
/// ```
pub async fn timing_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let methode = req.method().clone();
    let pfad = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let dauer = start.elapsed();
    let status = response.status().as_u16();

    if ist_langsam(dauer) {
        tracing::warn!(
            method = %methode,
            path = %pfad,
            status,
            duration_ms = dauer.as_millis() as u64,
            "Langsame HTTP-Anfrage"
        );
    } else {
        tracing::info!(
            method = %methode,
            path = %pfad,
            status,
            duration_ms = dauer.as_millis() as u64,
            "HTTP-Anfrage abgeschlossen"
        );
    }

    response
}

fn ist_langsam(dauer: Duration) -> bool {
    dauer >= LANGSAM
}

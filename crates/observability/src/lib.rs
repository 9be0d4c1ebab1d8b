//! # kurswerk-observability
//!
//! Observability-Crate fuer Kurswerk:
//! - Health-Check-Endpunkt (`/health`) mit optionaler DB-Pruefung
//! - Structured Logging via tracing-subscriber (Text oder JSON)
//! - Request-Timing Middleware

pub mod health;
pub mod logging;
pub mod middleware;

pub use health::{health_router, DbPruefer, HealthResponse, HealthState, HealthStatus};
pub use logging::logging_initialisieren;
pub use middleware::{timing_middleware, trace_layer};

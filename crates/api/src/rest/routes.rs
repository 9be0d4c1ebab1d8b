//! Route-Definitionen fuer die REST-API (/v1/...)

use axum::{
    routing::{get, post},
    Router,
};

use crate::rest::{handlers, AppState};

/// Erstellt den vollstaendigen /v1/-Router
pub fn v1_router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/v1/auth/register", post(handlers::auth::registrieren))
        .route("/v1/auth/login", post(handlers::auth::anmelden))
        // Benutzer
        .route("/v1/user", get(handlers::user::profil))
}

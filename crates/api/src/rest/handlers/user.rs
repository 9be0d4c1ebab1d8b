//! REST-Handler fuer das eigene Profil

use axum::{extract::State, http::HeaderMap, response::Response};

use kurswerk_core::Code;

use crate::rest::{
    middleware::{bearer_token, erfolg, fehler_antwort},
    AppState,
};

/// GET /v1/user
///
/// Benutzer-ID und Rolle stammen aus dem geprueften Token.
pub async fn profil(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return fehler_antwort(Code::TokenInvalid);
    };

    let claims = match state.auth.token_pruefen(token) {
        Ok(c) => c,
        Err(code) => return fehler_antwort(code),
    };

    match state.auth.profil_laden(claims.sub, claims.role_id).await {
        Ok(profil) => erfolg(Some(profil)),
        Err(code) => fehler_antwort(code),
    }
}

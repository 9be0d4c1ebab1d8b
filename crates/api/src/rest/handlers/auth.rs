//! REST-Handler fuer Registrierung und Login

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::Response,
    Json,
};
use serde::Deserialize;

use kurswerk_core::Code;

use crate::rest::{
    middleware::{client_ip, erfolg, fehler_antwort},
    validierung::{self, Verletzung},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegistrierenBody {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl RegistrierenBody {
    fn pruefen(&self) -> Result<(), Verletzung> {
        validierung::benutzername(&self.username)?;
        validierung::passwort(&self.password)?;
        validierung::email(&self.email)
    }
}

#[derive(Debug, Deserialize)]
pub struct AnmeldenBody {
    pub username: String,
    pub password: String,
}

impl AnmeldenBody {
    /// Beim Login nur Mindestpruefung; alles andere entscheidet der Store
    fn pruefen(&self) -> Result<(), Verletzung> {
        if self.username.trim().is_empty() {
            return Err(Verletzung::Leer("username"));
        }
        validierung::passwort(&self.password)
    }
}

/// Ungueltiger Body -> REQUEST_PARAM_ERROR
fn parameter_fehler(grund: impl std::fmt::Display) -> Response {
    tracing::debug!(grund = %grund, "Request-Parameter abgelehnt");
    fehler_antwort(Code::RequestParamError)
}

/// POST /v1/auth/register
pub async fn registrieren(
    State(state): State<AppState>,
    body: Result<Json<RegistrierenBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return parameter_fehler(e.body_text()),
    };
    if let Err(v) = body.pruefen() {
        return parameter_fehler(v);
    }

    match state
        .auth
        .registrieren(&body.username, &body.password, &body.email)
        .await
    {
        Ok(()) => erfolg::<()>(None),
        Err(code) => fehler_antwort(code),
    }
}

/// POST /v1/auth/login
pub async fn anmelden(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<AnmeldenBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return parameter_fehler(e.body_text()),
    };
    if let Err(v) = body.pruefen() {
        return parameter_fehler(v);
    }

    match state.auth.anmelden(&body.username, &body.password).await {
        Ok(profil) => erfolg(Some(profil)),
        Err(code) => {
            if code == Code::PasswordWrong {
                tracing::warn!(ip = %client_ip(&headers), "Login mit falschem Passwort");
            }
            fehler_antwort(code)
        }
    }
}

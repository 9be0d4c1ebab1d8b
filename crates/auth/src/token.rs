//! Signierte Zugangs-Tokens (JWT, HS256)
//!
//! Ein Token bindet Benutzer-ID, Benutzername, E-Mail und die primaere
//! Rolle an ein festes Ablauffenster. Es gibt keinen serverseitigen
//! Token-Speicher: gueltig ist, was korrekt signiert und nicht abgelaufen ist.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use kurswerk_core::{RoleId, UserId};

use crate::error::{AuthError, AuthResult};

/// Eingabe fuer die Token-Ausstellung
#[derive(Debug, Clone, Copy)]
pub struct TokenAnfrage<'a> {
    pub user_id: UserId,
    pub username: &'a str,
    pub email: &'a str,
    /// Primaere Rolle des Benutzers
    pub role_id: RoleId,
}

/// Inhalt eines signierten Tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: UserId,
    pub username: String,
    pub email: String,
    pub role_id: RoleId,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Stellt Tokens aus und prueft sie
///
/// Zustandslos und ohne Seiteneffekte; darf parallel aus beliebig vielen
/// Requests aufgerufen werden.
pub trait TokenAussteller: Send + Sync {
    fn ausstellen(&self, anfrage: &TokenAnfrage<'_>) -> AuthResult<String>;

    fn pruefen(&self, token: &str) -> AuthResult<TokenClaims>;
}

/// HS256-Implementierung von [`TokenAussteller`]
pub struct JwtAussteller {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lebensdauer: Duration,
    aussteller: String,
}

impl JwtAussteller {
    /// Erstellt einen Aussteller mit gemeinsamem Geheimnis
    ///
    /// Ein leeres Geheimnis wird abgelehnt.
    pub fn neu(
        geheimnis: &[u8],
        lebensdauer: Duration,
        aussteller: impl Into<String>,
    ) -> AuthResult<Self> {
        if geheimnis.is_empty() {
            return Err(AuthError::TokenErstellung("Token-Geheimnis ist leer".into()));
        }
        if lebensdauer <= Duration::zero() {
            return Err(AuthError::TokenErstellung(format!(
                "Token-Lebensdauer muss positiv sein: {lebensdauer}"
            )));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(geheimnis),
            decoding: DecodingKey::from_secret(geheimnis),
            lebensdauer,
            aussteller: aussteller.into(),
        })
    }

    pub fn lebensdauer(&self) -> Duration {
        self.lebensdauer
    }

    fn validierung(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.aussteller.as_str()]);
        validation
    }

    fn signieren(&self, claims: &TokenClaims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::TokenErstellung(e.to_string()))
    }
}

impl std::fmt::Debug for JwtAussteller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAussteller")
            .field("lebensdauer", &self.lebensdauer)
            .field("aussteller", &self.aussteller)
            .finish_non_exhaustive()
    }
}

impl TokenAussteller for JwtAussteller {
    fn ausstellen(&self, anfrage: &TokenAnfrage<'_>) -> AuthResult<String> {
        let jetzt = Utc::now();
        let claims = TokenClaims {
            sub: anfrage.user_id,
            username: anfrage.username.to_string(),
            email: anfrage.email.to_string(),
            role_id: anfrage.role_id,
            iss: self.aussteller.clone(),
            iat: jetzt.timestamp(),
            exp: (jetzt + self.lebensdauer).timestamp(),
        };
        self.signieren(&claims)
    }

    fn pruefen(&self, token: &str) -> AuthResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding, &self.validierung())
            .map(|daten| daten.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenAbgelaufen,
                _ => AuthError::TokenUngueltig,
            })
    }
}

/// Generiert ein zufaelliges Token-Geheimnis (URL-sicheres Base64, 256 Bit)
pub fn geheimnis_generieren() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}

//! kurswerk-auth – Auth- und Berechtigungs-Service
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Signierte, ablaufende Tokens (JWT, HS256)
//! - Rollen-Katalog und Berechtigungs-Aufloesung
//! - AuthService (Registrierung, Login, Profil-Abfrage)
//!
//! Alle Workflows liefern nach aussen nur einen [`kurswerk_core::Code`].

pub mod error;
pub mod password;
pub mod profil;
pub mod rollen;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use password::{passwort_hashen, passwort_verifizieren};
pub use profil::AuthentifiziertesProfil;
pub use rollen::{Rolle, RollenService, STANDARD_ROLLE};
pub use service::AuthService;
pub use token::{JwtAussteller, TokenAnfrage, TokenAussteller, TokenClaims};

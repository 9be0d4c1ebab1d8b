//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

use kurswerk_core::{Code, UserId};

/// Alle moeglichen internen Fehler im Auth-Service
///
/// Verlassen den Service nie direkt; [`AuthError::code`] bildet sie auf
/// den oeffentlichen Rueckgabecode ab.
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    #[error("Gespeicherter Passwort-Hash ungueltig: {0}")]
    HashUngueltig(String),

    // --- Authentifizierung ---
    #[error("Passwort falsch")]
    PasswortFalsch,

    #[error("Benutzer nicht gefunden: {0}")]
    BenutzerNichtGefunden(String),

    #[error("Benutzer hat keine Rolle: {0}")]
    KeineRolle(String),

    // --- Benutzerverwaltung ---
    #[error("Benutzername bereits vergeben: {0}")]
    BenutzernameVergeben(String),

    #[error("Rollenzuweisung fuer {user_id} fehlgeschlagen: {quelle}")]
    Rollenzuweisung {
        user_id: UserId,
        #[source]
        quelle: kurswerk_db::DbError,
    },

    // --- Token ---
    #[error("Token konnte nicht signiert werden: {0}")]
    TokenErstellung(String),

    #[error("Token ungueltig")]
    TokenUngueltig,

    #[error("Token abgelaufen")]
    TokenAbgelaufen,

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] kurswerk_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// Oeffentlicher Rueckgabecode zu diesem Fehler
    pub fn code(&self) -> Code {
        match self {
            Self::PasswortHashing(_) => Code::PasswordHashError,
            Self::PasswortFalsch => Code::PasswordWrong,
            Self::BenutzerNichtGefunden(_) => Code::UserNotExist,
            Self::KeineRolle(_) => Code::UserNoRole,
            Self::BenutzernameVergeben(_) => Code::DuplicateUser,
            Self::TokenErstellung(_) => Code::TokenCreateError,
            Self::TokenUngueltig | Self::TokenAbgelaufen => Code::TokenInvalid,
            Self::HashUngueltig(_)
            | Self::Rollenzuweisung { .. }
            | Self::Datenbank(_)
            | Self::Intern(_) => Code::DbOperationError,
        }
    }

    /// Erwartete Fehler (falsche Eingaben) statt Betriebsstoerungen
    pub fn ist_erwartet(&self) -> bool {
        matches!(
            self,
            Self::PasswortFalsch
                | Self::BenutzerNichtGefunden(_)
                | Self::BenutzernameVergeben(_)
                | Self::KeineRolle(_)
                | Self::TokenUngueltig
                | Self::TokenAbgelaufen
        )
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;

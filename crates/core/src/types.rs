//! Gemeinsame Identifikationstypen fuer Kurswerk
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! Benutzer-, Rollen- und Berechtigungs-IDs zur Compilezeit auszuschliessen.
//! Die Datenbank vergibt fortlaufende Integer-IDs.

use serde::{Deserialize, Serialize};

/// Eindeutige Benutzer-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Gibt den inneren Integer zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Eindeutige Rollen-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub i64);

impl RoleId {
    /// Gibt den inneren Integer zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "role:{}", self.0)
    }
}

/// Berechtigungs-Code (opak, wird einer Rolle zugeordnet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(pub i64);

impl std::fmt::Display for PermissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

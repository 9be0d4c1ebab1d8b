//! Antwort-Typ fuer Login und Profil-Abfrage

use std::collections::BTreeSet;

use serde::Serialize;

use kurswerk_core::{PermissionId, UserId};
use kurswerk_db::models::BenutzerRecord;

/// Benutzerprofil samt Rollen und Berechtigungen
///
/// Wird pro Anfrage neu gebaut und nicht gespeichert. `token` ist nur nach
/// einem Login gesetzt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthentifiziertesProfil {
    pub id: UserId,
    #[serde(rename = "user_name")]
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub avatar: String,
    pub token: String,
    pub sex: i32,
    pub roles: Vec<String>,
    pub permissions: BTreeSet<PermissionId>,
}

impl AuthentifiziertesProfil {
    pub fn aus_benutzer(
        benutzer: BenutzerRecord,
        token: String,
        roles: Vec<String>,
        permissions: BTreeSet<PermissionId>,
    ) -> Self {
        Self {
            id: benutzer.id,
            username: benutzer.username,
            name: benutzer.name,
            email: benutzer.email,
            description: benutzer.description,
            avatar: benutzer.avatar,
            token,
            sex: benutzer.sex,
            roles,
            permissions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn json_enthaelt_keinen_hash() {
        let benutzer = BenutzerRecord {
            id: UserId(1),
            username: "alice".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$geheim".into(),
            name: "Alice".into(),
            description: String::new(),
            avatar: String::new(),
            sex: 2,
            created_at: Utc::now(),
        };
        let profil = AuthentifiziertesProfil::aus_benutzer(
            benutzer,
            String::new(),
            vec!["Student".into()],
            [PermissionId(1002), PermissionId(1001)].into_iter().collect(),
        );

        let json = serde_json::to_value(&profil).unwrap();
        assert_eq!(json["user_name"], "alice");
        assert_eq!(json["roles"], serde_json::json!(["Student"]));
        assert_eq!(json["permissions"], serde_json::json!([1001, 1002]));
        assert!(!json.to_string().contains("argon2"));
    }
}

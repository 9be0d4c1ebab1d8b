//! Rollen-Katalog und Berechtigungs-Aufloesung
//!
//! Die Rollennamen stehen fest im Katalog; die Berechtigungen einer Rolle
//! kommen aus dem Credential-Store. Beim Start wird der Katalog samt
//! Standard-Berechtigungen in den Store eingespielt, damit gespeicherte und
//! Katalog-Namen uebereinstimmen.

use std::{collections::BTreeSet, sync::Arc};

use kurswerk_core::{PermissionId, RoleId};
use kurswerk_db::{models::RolleRecord, RoleRepository};

use crate::error::AuthResult;

/// Berechtigungs-Codes der Kursplattform
pub mod berechtigungen {
    use kurswerk_core::PermissionId;

    pub const KURS_ANSEHEN: PermissionId = PermissionId(1001);
    pub const KURS_BELEGEN: PermissionId = PermissionId(1002);
    pub const KURS_ERSTELLEN: PermissionId = PermissionId(1003);
    pub const KURS_BEARBEITEN: PermissionId = PermissionId(1004);
    pub const NOTEN_VERGEBEN: PermissionId = PermissionId(1005);
    pub const BENUTZER_VERWALTEN: PermissionId = PermissionId(9001);
    pub const ROLLEN_VERWALTEN: PermissionId = PermissionId(9002);
}

/// Bekannte Rollen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rolle {
    Admin,
    Lehrer,
    Student,
}

/// Rolle, die jeder neu registrierte Benutzer erhaelt
pub const STANDARD_ROLLE: Rolle = Rolle::Student;

impl Rolle {
    pub const ALLE: [Rolle; 3] = [Rolle::Admin, Rolle::Lehrer, Rolle::Student];

    pub fn id(self) -> RoleId {
        match self {
            Self::Admin => RoleId(1),
            Self::Lehrer => RoleId(2),
            Self::Student => RoleId(3),
        }
    }

    /// Anzeigename
    pub fn name(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Lehrer => "Lehrer",
            Self::Student => "Student",
        }
    }

    pub fn aus_id(id: RoleId) -> Option<Self> {
        Self::ALLE.into_iter().find(|r| r.id() == id)
    }

    /// Berechtigungen, die beim Einspielen des Katalogs vergeben werden
    pub fn standard_berechtigungen(self) -> &'static [PermissionId] {
        use berechtigungen::*;
        match self {
            Self::Admin => &[
                KURS_ANSEHEN,
                KURS_ERSTELLEN,
                KURS_BEARBEITEN,
                NOTEN_VERGEBEN,
                BENUTZER_VERWALTEN,
                ROLLEN_VERWALTEN,
            ],
            Self::Lehrer => &[KURS_ANSEHEN, KURS_ERSTELLEN, KURS_BEARBEITEN, NOTEN_VERGEBEN],
            Self::Student => &[KURS_ANSEHEN, KURS_BELEGEN],
        }
    }
}

/// Anzeigename einer Rollen-ID laut Katalog
pub fn rollen_name(id: RoleId) -> Option<&'static str> {
    Rolle::aus_id(id).map(Rolle::name)
}

/// Loest Rollen-IDs zu Berechtigungen und Namen auf
pub struct RollenService<R: RoleRepository> {
    repo: Arc<R>,
}

impl<R: RoleRepository> RollenService<R> {
    pub fn neu(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Berechtigungsmenge einer Rolle (unbekannte Rolle = leer)
    pub async fn berechtigungen(&self, role_id: RoleId) -> AuthResult<BTreeSet<PermissionId>> {
        Ok(self.repo.permissions_for_role(role_id).await?)
    }

    pub fn rollen_name(&self, role_id: RoleId) -> Option<&'static str> {
        rollen_name(role_id)
    }

    /// Spielt alle Katalog-Rollen samt Standard-Berechtigungen in den Store ein
    ///
    /// Idempotent; manuell vergebene Zusatz-Berechtigungen bleiben erhalten.
    pub async fn katalog_einspielen(&self) -> AuthResult<()> {
        for rolle in Rolle::ALLE {
            self.repo
                .upsert_role(&RolleRecord {
                    id: rolle.id(),
                    name: rolle.name().to_string(),
                })
                .await?;
            self.repo
                .grant_permissions(rolle.id(), rolle.standard_berechtigungen())
                .await?;
        }
        tracing::info!(anzahl = Rolle::ALLE.len(), "Rollen-Katalog eingespielt");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, sync::Mutex};

    use async_trait::async_trait;
    use kurswerk_db::DbResult;

    #[derive(Default)]
    struct TestRollenRepo {
        rollen: Mutex<HashMap<RoleId, String>>,
        perms: Mutex<HashMap<RoleId, BTreeSet<PermissionId>>>,
    }

    #[async_trait]
    impl RoleRepository for TestRollenRepo {
        async fn permissions_for_role(&self, role_id: RoleId) -> DbResult<BTreeSet<PermissionId>> {
            Ok(self.perms.lock().unwrap().get(&role_id).cloned().unwrap_or_default())
        }

        async fn get_role(&self, role_id: RoleId) -> DbResult<Option<RolleRecord>> {
            Ok(self
                .rollen
                .lock()
                .unwrap()
                .get(&role_id)
                .map(|name| RolleRecord { id: role_id, name: name.clone() }))
        }

        async fn upsert_role(&self, rolle: &RolleRecord) -> DbResult<()> {
            self.rollen.lock().unwrap().insert(rolle.id, rolle.name.clone());
            Ok(())
        }

        async fn grant_permissions(&self, role_id: RoleId, permissions: &[PermissionId]) -> DbResult<()> {
            self.perms
                .lock()
                .unwrap()
                .entry(role_id)
                .or_default()
                .extend(permissions.iter().copied());
            Ok(())
        }
    }

    #[test]
    fn katalog_ids_sind_eindeutig() {
        for rolle in Rolle::ALLE {
            assert_eq!(Rolle::aus_id(rolle.id()), Some(rolle));
        }
        assert_eq!(rollen_name(RoleId(3)), Some("Student"));
        assert_eq!(rollen_name(RoleId(99)), None);
    }

    #[test]
    fn standard_rolle_ist_student() {
        assert_eq!(STANDARD_ROLLE, Rolle::Student);
        assert!(STANDARD_ROLLE
            .standard_berechtigungen()
            .contains(&berechtigungen::KURS_BELEGEN));
    }

    #[tokio::test]
    async fn katalog_einspielen_ist_idempotent() {
        let repo = Arc::new(TestRollenRepo::default());
        let service = RollenService::neu(Arc::clone(&repo));

        service.katalog_einspielen().await.unwrap();
        service.katalog_einspielen().await.unwrap();

        for rolle in Rolle::ALLE {
            let gespeichert = repo.get_role(rolle.id()).await.unwrap().unwrap();
            assert_eq!(gespeichert.name, rolle.name());

            let perms = service.berechtigungen(rolle.id()).await.unwrap();
            let erwartet: BTreeSet<_> = rolle.standard_berechtigungen().iter().copied().collect();
            assert_eq!(perms, erwartet);
        }
    }

    #[tokio::test]
    async fn unbekannte_rolle_ohne_berechtigungen() {
        let service = RollenService::neu(Arc::new(TestRollenRepo::default()));
        assert!(service.berechtigungen(RoleId(42)).await.unwrap().is_empty());
        assert_eq!(service.rollen_name(RoleId(42)), None);
    }
}

//! Auth-Service fuer Kurswerk
//!
//! Zentraler Service fuer Registrierung, Login und Profil-Abfrage.
//! Nutzt die DB-Repositories, den Token-Aussteller und den Rollen-Service.
//! Nach aussen gibt jeder Workflow nur einen [`Code`] zurueck; der interne
//! Fehler wird an der Grenze protokolliert.

use std::sync::Arc;

use kurswerk_core::{Code, RoleId, UserId};
use kurswerk_db::{
    models::{BenutzerRecord, BenutzerSuche, NeuerBenutzer},
    RoleRepository, UserRepository,
};

use crate::{
    error::{AuthError, AuthResult},
    password::{passwort_hashen_async, passwort_verifizieren_async},
    profil::AuthentifiziertesProfil,
    rollen::{RollenService, STANDARD_ROLLE},
    token::{TokenAnfrage, TokenAussteller, TokenClaims},
};

/// Auth-Service – zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct AuthService<U: UserRepository, R: RoleRepository> {
    user_repo: Arc<U>,
    rollen: RollenService<R>,
    token_aussteller: Arc<dyn TokenAussteller>,
}

impl<U: UserRepository, R: RoleRepository> AuthService<U, R> {
    /// Erstellt einen neuen AuthService
    pub fn neu(
        user_repo: Arc<U>,
        rollen_repo: Arc<R>,
        token_aussteller: Arc<dyn TokenAussteller>,
    ) -> Self {
        Self {
            user_repo,
            rollen: RollenService::neu(rollen_repo),
            token_aussteller,
        }
    }

    /// Rollen-Service, z.B. zum Einspielen des Katalogs beim Start
    pub fn rollen(&self) -> &RollenService<R> {
        &self.rollen
    }

    /// Registriert einen neuen Benutzer mit der Standard-Rolle
    pub async fn registrieren(&self, username: &str, passwort: &str, email: &str) -> Result<(), Code> {
        self.registrieren_intern(username, passwort, email)
            .await
            .map(|_| ())
            .map_err(|e| zu_code("registrieren", e))
    }

    /// Meldet einen Benutzer an
    ///
    /// Liefert das Profil mit frisch signiertem Token und den Berechtigungen
    /// der primaeren Rolle.
    pub async fn anmelden(&self, username: &str, passwort: &str) -> Result<AuthentifiziertesProfil, Code> {
        self.anmelden_intern(username, passwort)
            .await
            .map_err(|e| zu_code("anmelden", e))
    }

    /// Laedt das Profil eines bereits authentifizierten Benutzers
    ///
    /// `role_id` stammt typischerweise aus dem Token. Es wird kein neues
    /// Token ausgestellt.
    pub async fn profil_laden(&self, user_id: UserId, role_id: RoleId) -> Result<AuthentifiziertesProfil, Code> {
        self.profil_laden_intern(user_id, role_id)
            .await
            .map_err(|e| zu_code("profil_laden", e))
    }

    /// Prueft ein Token und gibt dessen Claims zurueck
    pub fn token_pruefen(&self, token: &str) -> Result<TokenClaims, Code> {
        self.token_aussteller
            .pruefen(token)
            .map_err(|e| zu_code("token_pruefen", e))
    }

    // --- Interne Workflows ---

    async fn registrieren_intern(
        &self,
        username: &str,
        passwort: &str,
        email: &str,
    ) -> AuthResult<BenutzerRecord> {
        // Pruefen ob Username bereits vergeben
        if self
            .user_repo
            .get_by(BenutzerSuche::Username(username))
            .await?
            .is_some()
        {
            return Err(AuthError::BenutzernameVergeben(username.to_string()));
        }

        let passwort_hash = passwort_hashen_async(passwort.to_string()).await?;

        let benutzer = self
            .user_repo
            .create(NeuerBenutzer {
                username,
                email,
                password_hash: &passwort_hash,
            })
            .await
            .map_err(|e| {
                // Parallele Registrierung mit gleichem Namen
                if e.ist_eindeutigkeit() {
                    AuthError::BenutzernameVergeben(username.to_string())
                } else {
                    AuthError::Datenbank(e)
                }
            })?;

        if let Err(quelle) = self
            .user_repo
            .assign_roles(benutzer.id, &[STANDARD_ROLLE.id()])
            .await
        {
            self.registrierung_zurueckrollen(&benutzer).await;
            return Err(AuthError::Rollenzuweisung {
                user_id: benutzer.id,
                quelle,
            });
        }

        tracing::info!(
            user_id = %benutzer.id,
            username = %benutzer.username,
            rolle = STANDARD_ROLLE.name(),
            "Neuer Benutzer registriert"
        );

        Ok(benutzer)
    }

    /// Entfernt einen Benutzer ohne Rolle wieder
    async fn registrierung_zurueckrollen(&self, benutzer: &BenutzerRecord) {
        match self.user_repo.delete(benutzer.id).await {
            Ok(_) => tracing::warn!(
                user_id = %benutzer.id,
                username = %benutzer.username,
                "Rollenzuweisung fehlgeschlagen, Registrierung zurueckgerollt"
            ),
            Err(e) => tracing::error!(
                user_id = %benutzer.id,
                username = %benutzer.username,
                fehler = %e,
                "Rollback der Registrierung fehlgeschlagen, Benutzer ohne Rolle bleibt bestehen"
            ),
        }
    }

    async fn anmelden_intern(&self, username: &str, passwort: &str) -> AuthResult<AuthentifiziertesProfil> {
        let benutzer = self
            .user_repo
            .get_with_roles(BenutzerSuche::Username(username))
            .await?
            .ok_or_else(|| AuthError::BenutzerNichtGefunden(username.to_string()))?;

        let korrekt =
            passwort_verifizieren_async(passwort.to_string(), benutzer.benutzer.password_hash.clone())
                .await?;
        if !korrekt {
            tracing::warn!(username = %username, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::PasswortFalsch);
        }

        let rolle = benutzer
            .primaere_rolle()
            .cloned()
            .ok_or_else(|| AuthError::KeineRolle(username.to_string()))?;

        let token = self.token_aussteller.ausstellen(&TokenAnfrage {
            user_id: benutzer.benutzer.id,
            username: &benutzer.benutzer.username,
            email: &benutzer.benutzer.email,
            role_id: rolle.id,
        })?;

        let berechtigungen = self.rollen.berechtigungen(rolle.id).await?;

        tracing::info!(
            user_id = %benutzer.benutzer.id,
            username = %benutzer.benutzer.username,
            rolle = %rolle.name,
            "Benutzer angemeldet"
        );

        Ok(AuthentifiziertesProfil::aus_benutzer(
            benutzer.benutzer,
            token,
            vec![rolle.name],
            berechtigungen,
        ))
    }

    async fn profil_laden_intern(
        &self,
        user_id: UserId,
        role_id: RoleId,
    ) -> AuthResult<AuthentifiziertesProfil> {
        // Beide Lookups sind unabhaengig und laufen nebenlaeufig; ausgewertet
        // wird erst nach dem Join.
        let (benutzer, berechtigungen) = tokio::join!(
            self.user_repo.get_by(BenutzerSuche::Id(user_id)),
            self.rollen.berechtigungen(role_id),
        );

        let benutzer = benutzer?.ok_or_else(|| AuthError::BenutzerNichtGefunden(user_id.to_string()))?;
        let berechtigungen = berechtigungen?;

        let rollen = self
            .rollen
            .rollen_name(role_id)
            .map(|name| vec![name.to_string()])
            .unwrap_or_default();

        Ok(AuthentifiziertesProfil::aus_benutzer(
            benutzer,
            String::new(),
            rollen,
            berechtigungen,
        ))
    }
}

/// Bildet einen internen Fehler auf den Rueckgabecode ab und protokolliert ihn
fn zu_code(vorgang: &'static str, fehler: AuthError) -> Code {
    let code = fehler.code();
    if fehler.ist_erwartet() {
        tracing::debug!(vorgang, code = code.wert(), fehler = %fehler, "Workflow abgelehnt");
    } else {
        tracing::error!(vorgang, code = code.wert(), fehler = %fehler, "Workflow fehlgeschlagen");
    }
    code
}

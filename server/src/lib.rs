//! kurswerk-server – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Credential-Store, Auth-Service und REST-API.
//! Stellt den oeffentlichen Einstiegspunkt fuer Integrationstests bereit.

pub mod config;

use std::{future::Future, sync::Arc};

use anyhow::{Context, Result};
use config::ServerConfig;

use kurswerk_api::{AppState, KurswerkAuth, RestServer, RestServerKonfig};
use kurswerk_auth::{token::geheimnis_generieren, JwtAussteller};
use kurswerk_db::SqliteDb;
use kurswerk_observability::HealthState;

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

/// Fertig verdrahtete Subsysteme
pub struct Komponenten {
    pub db: Arc<SqliteDb>,
    pub state: AppState,
    pub health: HealthState,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Baut alle Subsysteme auf, ohne einen Port zu binden
    ///
    /// Reihenfolge:
    /// 1. Datenbankverbindung herstellen (inkl. Migrationen)
    /// 2. Token-Aussteller erstellen
    /// 3. Rollen-Katalog einspielen
    pub async fn aufbauen(&self) -> Result<Komponenten> {
        let db = Arc::new(
            SqliteDb::oeffnen(&self.config.datenbank_config())
                .await
                .context("Datenbank konnte nicht geoeffnet werden")?,
        );

        let geheimnis = match self.config.token.geheimnis() {
            Some(g) => g.to_string(),
            None => {
                tracing::warn!(
                    "Kein Token-Geheimnis konfiguriert, verwende zufaelliges Entwicklungs-Geheimnis. \
                     Tokens werden nach einem Neustart ungueltig."
                );
                geheimnis_generieren()
            }
        };
        let aussteller = Arc::new(JwtAussteller::neu(
            geheimnis.as_bytes(),
            self.config.token.lebensdauer(),
            self.config.token.aussteller.clone(),
        )?);
        tracing::info!(
            lebensdauer_stunden = aussteller.lebensdauer().num_hours(),
            aussteller = %self.config.token.aussteller,
            "Token-Aussteller bereit"
        );

        let auth = KurswerkAuth::neu(Arc::clone(&db), Arc::clone(&db), aussteller);
        auth.rollen()
            .katalog_einspielen()
            .await
            .context("Rollen-Katalog konnte nicht eingespielt werden")?;

        let db_health = Arc::clone(&db);
        let health = HealthState::neu().mit_db_pruefer(move || {
            let db = Arc::clone(&db_health);
            async move { db.erreichbar().await }
        });

        Ok(Komponenten {
            db,
            state: AppState::neu(Arc::new(auth)),
            health,
        })
    }

    /// Startet alle Server-Subsysteme und laeuft bis zum Shutdown-Signal
    pub async fn starten(self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let bind_addr = self.config.api_bind_adresse()?;
        tracing::info!(
            server_name = %self.config.server.name,
            api = %bind_addr,
            datenbank = %self.config.datenbank.url,
            "Server startet"
        );

        let Komponenten { db, state, health } = self.aufbauen().await?;

        let rest = RestServer::neu(RestServerKonfig {
            bind_addr,
            cors_origins: self.config.netzwerk.cors_origins.clone(),
        });
        let ergebnis = rest.starten(state, health, shutdown).await;

        db.schliessen().await;
        tracing::info!("Datenbank geschlossen");
        ergebnis
    }
}

//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist.

use std::net::SocketAddr;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use kurswerk_db::DatabaseConfig;
use kurswerk_observability::logging::log_level_gueltig;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Token-Einstellungen
    pub token: TokenEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Anzeigename des Servers
    pub name: String,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            name: "Kurswerk".into(),
        }
    }
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    pub bind_adresse: String,
    /// Port fuer die REST-API
    pub api_port: u16,
    /// CORS-Origins fuer REST (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            api_port: 8080,
            cors_origins: vec![],
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        let standard = DatabaseConfig::default();
        Self {
            url: standard.url,
            max_verbindungen: standard.max_verbindungen,
            wal: standard.sqlite_wal,
        }
    }
}

/// Token-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenEinstellungen {
    /// Signatur-Geheimnis (leer = beim Start zufaellig erzeugt, nur Entwicklung)
    pub geheimnis: Option<String>,
    /// Gueltigkeitsdauer in Stunden
    pub lebensdauer_stunden: i64,
    /// Aussteller-Kennung (`iss`)
    pub aussteller: String,
}

impl Default for TokenEinstellungen {
    fn default() -> Self {
        Self {
            geheimnis: None,
            lebensdauer_stunden: 24,
            aussteller: "kurswerk".into(),
        }
    }
}

impl TokenEinstellungen {
    /// Konfiguriertes Geheimnis, falls gesetzt und nicht leer
    pub fn geheimnis(&self) -> Option<&str> {
        self.geheimnis.as_deref().filter(|g| !g.trim().is_empty())
    }

    pub fn lebensdauer(&self) -> chrono::Duration {
        chrono::Duration::hours(self.lebensdauer_stunden)
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Filter-Direktive, z.B. "info" oder "info,kurswerk_auth=debug"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> Result<Self> {
        let config = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => toml::from_str::<Self>(&inhalt)
                .map_err(|e| anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Logging ist hier noch nicht initialisiert
                eprintln!("Konfigurationsdatei '{pfad}' nicht gefunden, verwende Standardwerte");
                Self::default()
            }
            Err(e) => bail!("Konfigurationsdatei '{pfad}' nicht lesbar: {e}"),
        };
        config.pruefen()?;
        Ok(config)
    }

    /// Prueft Werte, die serde allein nicht abfangen kann
    pub fn pruefen(&self) -> Result<()> {
        if self.token.lebensdauer_stunden <= 0 {
            bail!(
                "token.lebensdauer_stunden muss positiv sein, ist {}",
                self.token.lebensdauer_stunden
            );
        }
        if self.token.aussteller.trim().is_empty() {
            bail!("token.aussteller darf nicht leer sein");
        }
        if self.datenbank.max_verbindungen == 0 {
            bail!("datenbank.max_verbindungen muss mindestens 1 sein");
        }
        if !log_level_gueltig(&self.logging.level) {
            bail!("logging.level ungueltig: '{}'", self.logging.level);
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            bail!("logging.format muss 'text' oder 'json' sein, ist '{}'", self.logging.format);
        }
        self.api_bind_adresse()?;
        Ok(())
    }

    /// Gibt die Bind-Adresse fuer den REST-Server zurueck
    pub fn api_bind_adresse(&self) -> Result<SocketAddr> {
        let adresse = format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.api_port);
        adresse
            .parse()
            .map_err(|e| anyhow!("Ungueltige Bind-Adresse '{adresse}': {e}"))
    }

    pub fn datenbank_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.wal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert!(cfg.pruefen().is_ok());
        assert_eq!(cfg.netzwerk.api_port, 8080);
        assert_eq!(cfg.datenbank.url, "sqlite://kurswerk.db");
        assert_eq!(cfg.token.lebensdauer(), chrono::Duration::hours(24));
        assert_eq!(cfg.token.geheimnis(), None);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn bind_adresse() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.api_bind_adresse().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [server]
            name = "Kurswerk Test"

            [netzwerk]
            api_port = 9000
            cors_origins = ["https://kurswerk.example"]

            [token]
            geheimnis = "sehr-geheim"
            lebensdauer_stunden = 2
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.server.name, "Kurswerk Test");
        assert_eq!(cfg.netzwerk.api_port, 9000);
        assert_eq!(cfg.netzwerk.cors_origins.len(), 1);
        assert_eq!(cfg.token.geheimnis(), Some("sehr-geheim"));
        assert_eq!(cfg.token.lebensdauer(), chrono::Duration::hours(2));
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.token.aussteller, "kurswerk");
        assert!(cfg.datenbank.wal);
    }

    #[test]
    fn leeres_geheimnis_zaehlt_als_fehlend() {
        let cfg: ServerConfig = toml::from_str("[token]\ngeheimnis = \"  \"").unwrap();
        assert_eq!(cfg.token.geheimnis(), None);
    }

    #[test]
    fn ungueltige_werte_werden_abgelehnt() {
        let mut cfg = ServerConfig::default();
        cfg.token.lebensdauer_stunden = 0;
        assert!(cfg.pruefen().is_err());

        let mut cfg = ServerConfig::default();
        cfg.netzwerk.bind_adresse = "kein host".into();
        assert!(cfg.pruefen().is_err());

        let mut cfg = ServerConfig::default();
        cfg.datenbank.max_verbindungen = 0;
        assert!(cfg.pruefen().is_err());
    }

    #[test]
    fn ungueltiges_logging_wird_abgelehnt() {
        let cfg: ServerConfig = toml::from_str("[logging]\nlevel = \"verbose\"").unwrap();
        assert!(cfg.pruefen().is_err());

        let cfg: ServerConfig = toml::from_str("[logging]\nformat = \"xml\"").unwrap();
        assert!(cfg.pruefen().is_err());

        let cfg: ServerConfig =
            toml::from_str("[logging]\nlevel = \"info,kurswerk_auth=debug\"\nformat = \"json\"").unwrap();
        assert!(cfg.pruefen().is_ok());
    }

    #[test]
    fn datei_fehlt_ergibt_standard() {
        let cfg = ServerConfig::laden("/nicht/vorhanden/kurswerk.toml").unwrap();
        assert_eq!(cfg.netzwerk.api_port, 8080);
    }

    #[test]
    fn datenbank_config_uebernimmt_werte() {
        let mut cfg = ServerConfig::default();
        cfg.datenbank.url = "sqlite::memory:".into();
        cfg.datenbank.wal = false;
        let db = cfg.datenbank_config();
        assert_eq!(db.url, "sqlite::memory:");
        assert!(!db.sqlite_wal);
    }
}

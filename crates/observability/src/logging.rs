//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable (hat Vorrang vor der Konfigdatei):
//! - `KW_LOG_LEVEL`: Filter-Direktive (z.B. `info` oder `kurswerk_auth=debug`)
//! - `KW_LOG_FORMAT`: Format (`text`/`json`)

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

pub const ENV_LOG_LEVEL: &str = "KW_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "KW_LOG_FORMAT";

/// Ausgabeformat der Logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parst den Format-String; Unbekanntes faellt auf Text zurueck
    pub fn parsen(wert: &str) -> Self {
        match wert.trim() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Waehlt den Wert aus Umgebung oder Konfiguration
///
/// Eine gesetzte, nicht-leere Umgebungsvariable gewinnt.
fn env_oder(env: Option<String>, konfig: &str) -> String {
    env.filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| konfig.to_string())
}

/// Initialisiert das Logging-System.
///
/// Ungueltige Filter-Direktiven fallen auf `info` zurueck. Schlaegt fehl,
/// wenn bereits ein globaler Subscriber gesetzt ist.
pub fn logging_initialisieren(level: &str, format: &str) -> Result<()> {
    let level = env_oder(std::env::var(ENV_LOG_LEVEL).ok(), level);
    let format = LogFormat::parsen(&env_oder(std::env::var(ENV_LOG_FORMAT).ok(), format));

    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    let ergebnis = match format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(true)
            .try_init(),
        LogFormat::Text => fmt().with_env_filter(filter).with_target(true).try_init(),
    };

    ergebnis.map_err(|e| anyhow!("Logging bereits initialisiert: {e}"))
}

fn ist_level(level: &str) -> bool {
    matches!(level, "trace" | "debug" | "info" | "warn" | "error")
}

/// Validiert eine Filter-Direktive wie `info` oder `info,kurswerk_auth=debug`
pub fn log_level_gueltig(direktive: &str) -> bool {
    !direktive.trim().is_empty()
        && direktive.split(',').map(str::trim).all(|teil| match teil.rsplit_once('=') {
            Some((ziel, level)) => !ziel.is_empty() && ist_level(level),
            None => ist_level(teil),
        })
}

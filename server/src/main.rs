//! Kurswerk Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use kurswerk_observability::logging_initialisieren;
use kurswerk_server::{config::ServerConfig, Server};

#[tokio::main]
async fn main() -> Result<()> {
    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad = std::env::var("KURSWERK_CONFIG").unwrap_or_else(|_| "config.toml".into());

    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let config = ServerConfig::laden(&config_pfad)?;

    logging_initialisieren(&config.logging.level, &config.logging.format)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        "Kurswerk Server wird initialisiert"
    );

    Server::neu(config).starten(shutdown_signal()).await
}

/// Wartet auf Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(fehler = %e, "Ctrl-C-Handler konnte nicht installiert werden");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
}

//! kurswerk-api – HTTP-Schnittstelle fuer den Auth-Service
//!
//! Stellt die `/v1/`-Routen (Registrierung, Login, Profil) und den
//! Health-Check bereit. Jede Antwort steckt im Umschlag
//! `{"code", "msg", "data"}`.

pub mod rest;

pub use rest::{app, AppState, KurswerkAuth, RestServer, RestServerKonfig};

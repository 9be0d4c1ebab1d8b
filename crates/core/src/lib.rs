//! kurswerk-core – Gemeinsame Typen und Rueckgabecodes
//!
//! Dieses Crate stellt die fundamentalen Bausteine bereit, die von allen
//! anderen Kurswerk-Crates gemeinsam genutzt werden.

pub mod code;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use code::Code;
pub use types::{PermissionId, RoleId, UserId};

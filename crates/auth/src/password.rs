//! Passwort-Hashing mit Argon2id
//!
//! Stellt Einweg-Hashfunktionen mit zufaelligem Salt bereit. Die
//! Verifikation vergleicht in konstanter Zeit (`password-hash`).
//! Fuer den async-Kontext gibt es Varianten, die die CPU-Arbeit auf den
//! Blocking-Pool von tokio auslagern.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::{AuthError, AuthResult};

/// Argon2id-Parameter fuer sicheres Passwort-Hashing
///
/// Werte gemaess OWASP-Empfehlungen (Stand 2024):
/// - Speicher: 64 MiB
/// - Iterationen: 3
/// - Parallelismus: 1
fn argon2_instanz() -> AuthResult<Argon2<'static>> {
    let params = Params::new(
        64 * 1024, // m_cost: 64 MiB
        3,         // t_cost: 3 Iterationen
        1,         // p_cost: 1 Thread
        None,      // output_len: Standard (32 Bytes)
    )
    .map_err(|e| AuthError::PasswortHashing(format!("Argon2-Parameter ungueltig: {e}")))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Hasht ein Passwort mit Argon2id und einem zufaelligen Salt
///
/// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt).
pub fn passwort_hashen(passwort: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    argon2_instanz()?
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))
}

/// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
///
/// Gibt `true` zurueck wenn das Passwort korrekt ist. Ein nicht parsebarer
/// Hash ist ein Fehler, kein falsches Passwort.
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> AuthResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AuthError::HashUngueltig(e.to_string()))?;

    match argon2_instanz()?.verify_password(passwort.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
    }
}

/// Wie [`passwort_hashen`], aber auf dem Blocking-Pool
pub async fn passwort_hashen_async(passwort: String) -> AuthResult<String> {
    tokio::task::spawn_blocking(move || passwort_hashen(&passwort))
        .await
        .map_err(|e| AuthError::intern(format!("Hashing-Task abgebrochen: {e}")))?
}

/// Wie [`passwort_verifizieren`], aber auf dem Blocking-Pool
pub async fn passwort_verifizieren_async(passwort: String, hash: String) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || passwort_verifizieren(&passwort, &hash))
        .await
        .map_err(|e| AuthError::intern(format!("Verifikations-Task abgebrochen: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passwort_hashen_und_verifizieren() {
        let passwort = "sicheres_passwort_123!";
        let hash = passwort_hashen(passwort).expect("Hashing fehlgeschlagen");

        assert!(hash.starts_with("$argon2id$"), "Hash muss mit $argon2id$ beginnen");
        assert!(!hash.contains(passwort), "Klartext darf nicht im Hash stehen");

        let korrekt = passwort_verifizieren(passwort, &hash).expect("Verifikation fehlgeschlagen");
        assert!(korrekt, "Passwort muss korrekt verifiziert werden");
    }

    #[test]
    fn falsches_passwort_wird_abgelehnt() {
        let hash = passwort_hashen("pw123").expect("Hashing fehlgeschlagen");

        for falsch in ["pw124", "PW123", "pw123 ", "", "wrong"] {
            let korrekt = passwort_verifizieren(falsch, &hash).expect("Verifikation fehlgeschlagen");
            assert!(!korrekt, "'{falsch}' muss abgelehnt werden");
        }
    }

    #[test]
    fn gleiche_passwoerter_unterschiedliche_hashes() {
        let hash1 = passwort_hashen("gleiches_passwort").unwrap();
        let hash2 = passwort_hashen("gleiches_passwort").unwrap();

        assert_ne!(hash1, hash2, "Gleiche Passwoerter muessen verschiedene Hashes erzeugen (Salt)");
    }

    #[test]
    fn ungueltiges_hash_format_gibt_fehler() {
        let ergebnis = passwort_verifizieren("passwort", "kein_gueltiger_hash");
        assert!(matches!(ergebnis, Err(AuthError::HashUngueltig(_))));
    }

    #[tokio::test]
    async fn async_varianten() {
        let hash = passwort_hashen_async("geheim".into()).await.unwrap();
        assert!(passwort_verifizieren_async("geheim".into(), hash.clone()).await.unwrap());
        assert!(!passwort_verifizieren_async("falsch".into(), hash).await.unwrap());
    }
}

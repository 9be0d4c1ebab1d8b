//! Eingabepruefung fuer Request-Bodies
//!
//! Verletzungen werden als `REQUEST_PARAM_ERROR` beantwortet, bevor der
//! Auth-Service aufgerufen wird.

use std::fmt;

pub const BENUTZERNAME_MIN: usize = 3;
pub const BENUTZERNAME_MAX: usize = 32;
pub const PASSWORT_MAX: usize = 128;
pub const EMAIL_MAX: usize = 254;

/// Grund, warum eine Eingabe abgelehnt wurde
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verletzung {
    Leer(&'static str),
    Laenge { feld: &'static str, min: usize, max: usize },
    Zeichen(&'static str),
    EmailFormat,
}

impl fmt::Display for Verletzung {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leer(feld) => write!(f, "{feld} darf nicht leer sein"),
            Self::Laenge { feld, min, max } => {
                write!(f, "{feld} muss {min} bis {max} Zeichen lang sein")
            }
            Self::Zeichen(feld) => write!(f, "{feld} enthaelt ungueltige Zeichen"),
            Self::EmailFormat => write!(f, "email hat kein gueltiges Format"),
        }
    }
}

fn laenge(feld: &'static str, wert: &str, min: usize, max: usize) -> Result<(), Verletzung> {
    let n = wert.chars().count();
    if n == 0 {
        return Err(Verletzung::Leer(feld));
    }
    if n < min || n > max {
        return Err(Verletzung::Laenge { feld, min, max });
    }
    Ok(())
}

/// Benutzername: 3-32 Zeichen, Buchstaben, Ziffern und `_ - .`
pub fn benutzername(wert: &str) -> Result<(), Verletzung> {
    laenge("username", wert, BENUTZERNAME_MIN, BENUTZERNAME_MAX)?;
    if !wert
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(Verletzung::Zeichen("username"));
    }
    Ok(())
}

pub fn passwort(wert: &str) -> Result<(), Verletzung> {
    laenge("password", wert, 1, PASSWORT_MAX)
}

/// Grobe Formpruefung `lokal@domain.tld`, keine Zustellbarkeit
pub fn email(wert: &str) -> Result<(), Verletzung> {
    laenge("email", wert, 3, EMAIL_MAX)?;
    if wert.chars().any(char::is_whitespace) {
        return Err(Verletzung::EmailFormat);
    }
    let Some((lokal, domain)) = wert.split_once('@') else {
        return Err(Verletzung::EmailFormat);
    };
    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if lokal.is_empty() || domain.contains('@') || !domain_ok {
        return Err(Verletzung::EmailFormat);
    }
    Ok(())
}

//! Hilfsfunktionen fuer Header und Antworten

use axum::{
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use kurswerk_core::Code;

use crate::rest::Antwort;

/// Extrahiert den Client-IP aus den Request-Headern
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Erfolgsantwort mit Nutzdaten
pub fn erfolg<T: Serialize>(data: Option<T>) -> Response {
    Antwort::neu(Code::Ok, data).into_response()
}

/// Fehlerantwort ohne Nutzdaten
pub fn fehler_antwort(code: Code) -> Response {
    Antwort::<()>::neu(code, None).into_response()
}

/// Extrahiert Bearer-Token aus Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    #[test]
    fn client_ip_aus_x_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "192.168.1.1");
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn bearer_token_extrahieren() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer mein_token_123"));
        assert_eq!(bearer_token(&headers), Some("mein_token_123"));
    }

    #[test]
    fn bearer_token_fehlt_oder_leer() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Basic YWxpY2U6cHc="));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn fehler_status_aus_code() {
        assert_eq!(fehler_antwort(Code::DuplicateUser).status(), StatusCode::CONFLICT);
        assert_eq!(fehler_antwort(Code::TokenInvalid).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(erfolg::<()>(None).status(), StatusCode::OK);
    }
}

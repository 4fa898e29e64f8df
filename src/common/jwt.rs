// src/common/jwt.rs

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;

use crate::models::auth::TokenClaims;

/// Decodifica o payload (segundo segmento) do JWT sem validar a assinatura.
/// Quem valida a assinatura é o backend; aqui só lemos os claims.
pub fn decode_payload(token: &str) -> Option<TokenClaims> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    // Alguns emissores mantêm o padding '='
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// `true` se o `exp` já passou, se não existe ou se o token não decodifica.
pub fn is_token_expired(token: &str) -> bool {
    match decode_payload(token).and_then(|claims| claims.exp) {
        Some(exp) => exp <= Utc::now().timestamp(),
        None => true,
    }
}

pub fn get_email_from_token(token: &str) -> Option<String> {
    decode_payload(token)?.email
}

pub fn get_entidade_id_from_token(token: &str) -> Option<i64> {
    decode_payload(token)?.entidade_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fake_token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.assinatura")
    }

    #[test]
    fn test_decode_reads_claims() {
        let token = fake_token(json!({ "sub": 7, "email": "ana@maestro.com", "entidadeId": 3, "exp": 10 }));
        let claims = decode_payload(&token).expect("payload válido");
        assert_eq!(claims.email.as_deref(), Some("ana@maestro.com"));
        assert_eq!(claims.entidade_id, Some(3));
        assert_eq!(claims.exp, Some(10));
    }

    #[test]
    fn test_malformed_tokens_yield_none() {
        assert!(decode_payload("").is_none());
        assert!(decode_payload("abc").is_none());
        assert!(decode_payload("a.b").is_none());
        assert!(decode_payload("a.b.c.d").is_none());
        assert!(decode_payload("a.!!!.c").is_none());
        // base64 válido, mas não é JSON
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("não é json"));
        assert!(decode_payload(&not_json).is_none());
    }

    #[test]
    fn test_expiry() {
        let future = Utc::now().timestamp() + 3600;
        let past = Utc::now().timestamp() - 3600;
        assert!(!is_token_expired(&fake_token(json!({ "exp": future }))));
        assert!(is_token_expired(&fake_token(json!({ "exp": past }))));
        assert!(is_token_expired(&fake_token(json!({ "email": "sem-exp@x.com" }))));
        assert!(is_token_expired("lixo"));
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let header = URL_SAFE_NO_PAD.encode("{}");
        let body = base64::engine::general_purpose::URL_SAFE.encode(r#"{"email":"a@b.co"}"#);
        let token = format!("{header}.{body}.x");
        assert_eq!(get_email_from_token(&token).as_deref(), Some("a@b.co"));
    }

    #[test]
    fn test_missing_claims_are_none() {
        let token = fake_token(json!({ "exp": 1 }));
        assert!(get_email_from_token(&token).is_none());
        assert!(get_entidade_id_from_token(&token).is_none());
        assert!(get_entidade_id_from_token("x.y.z").is_none());
    }
}

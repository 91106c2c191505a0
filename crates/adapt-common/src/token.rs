//! Authentication token utilities

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use adapt_core::Snowflake;

/// Errors from token parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(&'static str),
}

/// Extract the user id embedded in an authentication token.
///
/// The first dot-separated segment of an Adapt token is the URL-safe
/// base64 encoding of the user id's decimal form.
pub fn user_id_from_token(token: &str) -> Result<Snowflake, TokenError> {
    let segment = token
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or(TokenError::Malformed("empty id segment"))?;

    let decoded = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|_| TokenError::Malformed("id segment is not base64"))?;

    let digits = std::str::from_utf8(&decoded)
        .map_err(|_| TokenError::Malformed("id segment is not utf-8"))?;

    digits
        .trim()
        .parse::<u64>()
        .map(Snowflake::new)
        .map_err(|_| TokenError::Malformed("id segment is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE;

    fn token_for(id: u64) -> String {
        format!("{}.signature.here", URL_SAFE.encode(id.to_string()))
    }

    #[test]
    fn test_extracts_user_id() {
        let token = token_for(123_456_789);
        assert_eq!(
            user_id_from_token(&token).unwrap(),
            Snowflake::new(123_456_789)
        );
    }

    #[test]
    fn test_accepts_unpadded_segment() {
        let token = format!("{}.sig", URL_SAFE_NO_PAD.encode("42"));
        assert_eq!(user_id_from_token(&token).unwrap(), Snowflake::new(42));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(user_id_from_token("!!!not-base64!!!.sig").is_err());
        assert!(user_id_from_token("").is_err());

        let not_a_number = format!("{}.sig", URL_SAFE_NO_PAD.encode("hello"));
        assert!(user_id_from_token(&not_a_number).is_err());
    }
}

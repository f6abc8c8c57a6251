use axum::http::HeaderMap;

use crate::errors::AppError;

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Checks the admin token header against the configured token.
///
/// No configured token means the admin API is disabled (403); a missing or
/// wrong header is 401.
pub fn authorize_admin(configured: Option<&str>, headers: &HeaderMap) -> Result<(), AppError> {
    let expected = configured.ok_or(AppError::Forbidden)?;
    let provided = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    if provided.as_bytes().len() == expected.as_bytes().len()
        && provided
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            headers.insert(ADMIN_TOKEN_HEADER, HeaderValue::from_str(token).unwrap());
        }
        headers
    }

    #[test]
    fn test_disabled_without_configured_token() {
        let result = authorize_admin(None, &headers(Some("anything")));
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let result = authorize_admin(Some("s3cret"), &headers(None));
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_wrong_token_is_unauthorized() {
        assert!(matches!(
            authorize_admin(Some("s3cret"), &headers(Some("s3cres"))),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            authorize_admin(Some("s3cret"), &headers(Some("s3cret-longer"))),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_matching_token_passes() {
        assert!(authorize_admin(Some("s3cret"), &headers(Some("s3cret"))).is_ok());
    }
}

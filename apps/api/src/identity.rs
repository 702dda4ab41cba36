//! Caller identity extraction.
//!
//! The external gateway verifies the caller's token and forwards only the
//! user id in the `x-glasspane-user-id` header. Roles and tenant scope are
//! re-derived from the store on every check, never read from the request.

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use glasspane_core::{AppError, CallerIdentity, UserId};

use crate::error::ApiResult;

/// Header carrying the gateway-verified user id.
pub const USER_ID_HEADER: &str = "x-glasspane-user-id";

pub async fn require_identity(mut request: Request, next: Next) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers())?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn identity_from_headers(headers: &HeaderMap) -> Result<CallerIdentity, AppError> {
    let value = headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let user_id = value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .ok_or_else(|| AppError::Unauthorized("invalid caller identity".to_owned()))?;

    Ok(CallerIdentity::new(UserId::new(user_id)))
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};
    use glasspane_core::UserId;

    use super::{USER_ID_HEADER, identity_from_headers};

    #[test]
    fn missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        assert!(identity_from_headers(&headers).is_err());
    }

    #[test]
    fn non_numeric_header_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("not-a-number"));
        assert!(identity_from_headers(&headers).is_err());
    }

    #[test]
    fn numeric_header_resolves_the_caller() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("42"));
        let identity = identity_from_headers(&headers).unwrap_or_else(|_| unreachable!());
        assert_eq!(identity.user_id(), UserId::new(42));
    }
}

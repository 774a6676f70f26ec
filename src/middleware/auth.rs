use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::database::manager::DatabaseManager;
use crate::database::repository::tenants;
use crate::error::ApiError;

/// Tenant identity resolved from the API key, injected by middleware
#[derive(Clone, Debug)]
pub struct AuthTenant {
    pub id: i32,
    pub company_name: String,
}

/// API-key authentication middleware. Resolves the `X-API-Key` header to a
/// tenant row and injects it as a request extension; short-circuits with 401
/// before any handler logic runs otherwise.
pub async fn api_key_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = extract_api_key(&headers).map_err(ApiError::unauthorized)?;

    let pool = DatabaseManager::pool().await?;
    let tenant = tenants::find_by_api_key(&pool, &api_key)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Rejected request with unknown API key");
            ApiError::unauthorized("Invalid API key")
        })?;

    request
        .extensions_mut()
        .insert(AuthTenant { id: tenant.id, company_name: tenant.company_name });

    Ok(next.run(request).await)
}

/// Extract the API key from the `X-API-Key` header
fn extract_api_key(headers: &HeaderMap) -> Result<String, String> {
    let header = headers
        .get("x-api-key")
        .ok_or_else(|| "Missing X-API-Key header".to_string())?;

    let key = header
        .to_str()
        .map_err(|_| "Invalid X-API-Key header format".to_string())?
        .trim();

    if key.is_empty() {
        return Err("Empty API key".to_string());
    }
    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_api_key_present() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("abc-123"));
        assert_eq!(extract_api_key(&headers).unwrap(), "abc-123");
    }

    #[test]
    fn test_extract_api_key_missing() {
        let headers = HeaderMap::new();
        assert!(extract_api_key(&headers).unwrap_err().contains("Missing"));
    }

    #[test]
    fn test_extract_api_key_empty() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("   "));
        assert!(extract_api_key(&headers).unwrap_err().contains("Empty"));
    }
}

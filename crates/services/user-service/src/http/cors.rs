//! Cross-origin layer built from configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer, ExposeHeaders};
use tracing::warn;

use common::CorsConfig;

const WILDCARD: &str = "*";

/// Build the CORS layer for the public API.
///
/// A `*` entry allows anything. With credentials enabled a literal wildcard is
/// not permitted by the CORS protocol, so the request's own origin, method or
/// headers are mirrored back instead.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let credentials = config.allow_credentials;

    let origins = if is_wildcard(&config.allow_origins) {
        if credentials {
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::any()
        }
    } else {
        AllowOrigin::list(parse_all(&config.allow_origins, |v| {
            HeaderValue::from_str(v).ok()
        }))
    };

    let methods = if is_wildcard(&config.allow_methods) {
        if credentials {
            AllowMethods::mirror_request()
        } else {
            AllowMethods::any()
        }
    } else {
        AllowMethods::list(parse_all(&config.allow_methods, |v| {
            Method::from_bytes(v.to_ascii_uppercase().as_bytes()).ok()
        }))
    };

    let headers = if is_wildcard(&config.allow_headers) {
        if credentials {
            AllowHeaders::mirror_request()
        } else {
            AllowHeaders::any()
        }
    } else {
        AllowHeaders::list(parse_all(&config.allow_headers, |v| {
            HeaderName::from_bytes(v.as_bytes()).ok()
        }))
    };

    let expose = if is_wildcard(&config.expose_headers) && !credentials {
        ExposeHeaders::any()
    } else {
        ExposeHeaders::list(parse_all(&config.expose_headers, |v| {
            HeaderName::from_bytes(v.as_bytes()).ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .expose_headers(expose)
        .allow_credentials(credentials)
        .max_age(Duration::from_secs(config.max_age_secs))
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == WILDCARD)
}

fn parse_all<T>(values: &[String], parse: impl Fn(&str) -> Option<T>) -> Vec<T> {
    values
        .iter()
        .filter(|v| v.as_str() != WILDCARD)
        .filter_map(|v| {
            let parsed = parse(v);
            if parsed.is_none() {
                warn!(value = %v, "Ignoring invalid CORS entry");
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_skips_invalid_and_wildcard() {
        let values = vec!["GET".to_string(), "*".to_string(), "BAD METHOD".to_string()];
        let methods = parse_all(&values, |v| Method::from_bytes(v.as_bytes()).ok());
        assert_eq!(methods, vec![Method::GET]);
    }

    #[test]
    fn test_is_wildcard() {
        assert!(is_wildcard(&["*".to_string()]));
        assert!(!is_wildcard(&["http://a.local".to_string()]));
        assert!(!is_wildcard(&[]));
    }
}

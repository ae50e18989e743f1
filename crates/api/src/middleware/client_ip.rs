use axum::extract::{ConnectInfo, Request};
use std::net::SocketAddr;

const UNKNOWN_CLIENT: &str = "unknown";

/// Rate-limit key for the caller: the first `X-Forwarded-For` hop when the
/// proxy is trusted, otherwise the peer address.
pub fn client_key(request: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(forwarded: Option<&str>, peer: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(value) = forwarded {
            builder = builder.header("x-forwarded-for", value);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        if let Some(addr) = peer {
            request
                .extensions_mut()
                .insert(ConnectInfo(addr.parse::<SocketAddr>().unwrap()));
        }
        request
    }

    #[test]
    fn test_forwarded_header_ignored_without_trust() {
        let request = request_with(Some("203.0.113.9"), Some("10.0.0.1:5000"));
        assert_eq!(client_key(&request, false), "10.0.0.1");
    }

    #[test]
    fn test_first_forwarded_hop_used_with_trust() {
        let request = request_with(Some("203.0.113.9, 10.0.0.2"), Some("10.0.0.1:5000"));
        assert_eq!(client_key(&request, true), "203.0.113.9");
    }

    #[test]
    fn test_missing_peer_is_unknown() {
        assert_eq!(client_key(&request_with(None, None), true), "unknown");
    }
}

//! Client IP extraction
//!
//! Resolves the originating client address behind a reverse proxy:
//! X-Forwarded-For (first hop) takes precedence, then X-Real-IP, then the
//! peer address of the connection itself.

use actix_web::HttpRequest;

const UNKNOWN: &str = "unknown";

/// Extract the client IP from proxy headers or the peer address
pub fn client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded) = header_value(req, "X-Forwarded-For") {
        // First entry is the original client, the rest are proxy hops
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = header_value(req, "X-Real-IP") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Extract the User-Agent header
pub fn user_agent(req: &HttpRequest) -> String {
    header_value(req, "User-Agent")
        .filter(|ua| !ua.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1, 10.0.0.2"))
            .insert_header(("X-Real-IP", "10.0.0.1"))
            .to_http_request();
        assert_eq!(client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.4"))
            .to_http_request();
        assert_eq!(client_ip(&req), "198.51.100.4");
    }

    #[test]
    fn test_unknown_without_headers_or_peer() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(client_ip(&req), "unknown");
    }

    #[test]
    fn test_user_agent_default() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(user_agent(&req), "unknown");

        let req = TestRequest::default()
            .insert_header(("User-Agent", "Mozilla/5.0"))
            .to_http_request();
        assert_eq!(user_agent(&req), "Mozilla/5.0");
    }
}

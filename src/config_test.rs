use super::*;

fn page(href: &str) -> Option<PageLocation> {
    PageLocation::parse(href)
}

fn from_page(href: &str) -> String {
    resolve_api_url(&EndpointSources { page: page(href), ..EndpointSources::default() })
}

// =============================================================================
// PageLocation
// =============================================================================

#[test]
fn page_location_parses_parts() {
    let loc = PageLocation::parse("https://news.example.com:8443/app/search?q=1").unwrap();
    assert_eq!(loc.protocol, "https:");
    assert_eq!(loc.hostname, "news.example.com");
    assert_eq!(loc.port, Some(8443));
    assert_eq!(loc.pathname, "/app/search");
    assert_eq!(loc.origin(), "https://news.example.com:8443");
}

#[test]
fn page_location_default_port_is_none() {
    let loc = PageLocation::parse("http://news.example.com/").unwrap();
    assert_eq!(loc.port, None);
    assert_eq!(loc.origin(), "http://news.example.com");
}

#[test]
fn page_location_rejects_garbage() {
    assert!(PageLocation::parse("not a url").is_none());
}

#[test]
fn page_location_outside_browser_is_none() {
    assert!(PageLocation::from_browser().is_none());
}

// =============================================================================
// priority order
// =============================================================================

#[test]
fn runtime_override_wins_over_everything() {
    let sources = EndpointSources {
        runtime_override: Some("https://override.example.com".to_owned()),
        build_time: Some("https://build.example.com".to_owned()),
        page: page("http://localhost:5173/"),
    };
    assert_eq!(resolve_api_url(&sources), "https://override.example.com");
}

#[test]
fn build_time_wins_over_heuristics() {
    let sources = EndpointSources {
        runtime_override: None,
        build_time: Some("https://build.example.com".to_owned()),
        page: page("http://10.0.0.5:30082/"),
    };
    assert_eq!(resolve_api_url(&sources), "https://build.example.com");
}

#[test]
fn loopback_page_wins_over_build_time() {
    for href in ["http://localhost:5173/", "http://127.0.0.1:8080/api/ui"] {
        let sources = EndpointSources {
            runtime_override: None,
            build_time: Some("https://build.example.com".to_owned()),
            page: page(href),
        };
        assert_eq!(resolve_api_url(&sources), LOCAL_API_URL, "href {href}");
    }
}

#[test]
fn blank_sources_are_treated_as_absent() {
    let sources = EndpointSources {
        runtime_override: Some("   ".to_owned()),
        build_time: Some(String::new()),
        page: page("http://10.0.0.5:30082/"),
    };
    assert_eq!(resolve_api_url(&sources), "http://10.0.0.5:30081");
}

#[test]
fn nothing_configured_falls_back_to_local_default() {
    assert_eq!(resolve_api_url(&EndpointSources::default()), LOCAL_API_URL);
}

// =============================================================================
// heuristics
// =============================================================================

#[test]
fn loopback_hosts_always_use_local_default() {
    for href in [
        "http://localhost:5173/",
        "http://127.0.0.1:30082/",
        "http://localhost/api/summaries",
        "http://[::1]:3000/",
    ] {
        assert_eq!(from_page(href), LOCAL_API_URL, "href {href}");
    }
}

#[test]
fn api_path_prefix_uses_page_origin() {
    assert_eq!(from_page("https://news.example.com/api/ui"), "https://news.example.com/api");
    assert_eq!(from_page("http://10.1.2.3:8080/api"), "http://10.1.2.3:8080/api");
}

#[test]
fn frontend_node_port_maps_to_backend_sibling() {
    assert_eq!(from_page("http://192.168.49.2:30082/"), "http://192.168.49.2:30081");
}

#[test]
fn clustered_host_on_other_port_uses_service_name() {
    assert_eq!(from_page("http://news.example.com/"), CLUSTER_SERVICE_URL);
}

#[test]
fn dot_local_host_is_not_clustered() {
    assert_eq!(from_page("http://devbox.local:30082/"), LOCAL_API_URL);
}

// =============================================================================
// Endpoint
// =============================================================================

#[test]
fn endpoint_url_joins_without_double_slash() {
    let endpoint = Endpoint::from(EndpointSources::with_override("http://api.test:9000/"));
    assert_eq!(endpoint.url("/health"), "http://api.test:9000/health");
}

#[test]
fn browser_endpoint_outside_browser_uses_default() {
    let base = Endpoint::Browser.base_url();
    let expected = BUILD_TIME_API_URL
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(LOCAL_API_URL);
    assert_eq!(base, expected);
}

// =============================================================================
// Timeouts
// =============================================================================

#[test]
fn default_timeouts_match_call_budgets() {
    let timeouts = Timeouts::default();
    assert_eq!(timeouts.health, Duration::from_secs(5));
    assert_eq!(timeouts.summarize, Duration::from_secs(60));
    assert_eq!(timeouts.auth, Duration::from_secs(10));
    assert_eq!(timeouts.articles, Duration::from_secs(30));
}

#[test]
fn parse_secs_accepts_positive_integers() {
    assert_eq!(parse_secs(Some(" 12 "), 5), 12);
}

#[test]
fn parse_secs_falls_back_on_invalid_or_zero() {
    assert_eq!(parse_secs(Some("soon"), 5), 5);
    assert_eq!(parse_secs(Some("0"), 5), 5);
    assert_eq!(parse_secs(None, 5), 5);
}

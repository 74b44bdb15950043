//! API endpoint resolution and client timeouts.
//!
//! SYSTEM CONTEXT
//! ==============
//! The same frontend bundle is served from a dev machine, behind an ingress
//! under `/api`, and from a cluster node port. The base URL is therefore
//! recomputed on every request from an ordered set of sources:
//!
//! 1. runtime override (`window.__API_URL__`, `NEWSBRIEF_API_URL`, `--api-url`)
//! 2. a loopback page, which always gets the local default
//! 3. build-time value (`NEWSBRIEF_BUILD_API_URL` at compile time)
//! 4. the remaining page-location heuristics
//! 5. the local default
//!
//! Resolution never fails and performs no I/O.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use reqwest::Url;

pub const LOCAL_API_URL: &str = "http://localhost:8000";
pub const CLUSTER_SERVICE_URL: &str = "http://newssummariser-service:8000";
pub const API_PATH_PREFIX: &str = "/api";
pub const FRONTEND_NODE_PORT: u16 = 30082;
pub const BACKEND_NODE_PORT: u16 = 30081;

/// Base URL baked in at compile time, if the build set one.
pub const BUILD_TIME_API_URL: Option<&str> = option_env!("NEWSBRIEF_BUILD_API_URL");

/// Env var consulted for the runtime override on native builds.
pub const API_URL_ENV: &str = "NEWSBRIEF_API_URL";

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

// =============================================================================
// PAGE LOCATION
// =============================================================================

/// The parts of the page URL the heuristics look at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme including the trailing colon, as `window.location.protocol` reports it.
    pub protocol: String,
    pub hostname: String,
    /// Explicit port, `None` when the URL uses the scheme default.
    pub port: Option<u16>,
    pub pathname: String,
}

impl PageLocation {
    /// Build a location from an absolute page URL.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        Self {
            protocol: format!("{}:", url.scheme()),
            hostname: url.host_str().unwrap_or_default().to_owned(),
            port: url.port(),
            pathname: url.path().to_owned(),
        }
    }

    /// Parse an absolute page URL. Returns `None` for anything unparseable.
    #[must_use]
    pub fn parse(href: &str) -> Option<Self> {
        Url::parse(href).ok().map(|url| Self::from_url(&url))
    }

    /// `protocol//hostname[:port]`, matching `window.location.origin`.
    #[must_use]
    pub fn origin(&self) -> String {
        match self.port {
            Some(port) => format!("{}//{}:{port}", self.protocol, self.hostname),
            None => format!("{}//{}", self.protocol, self.hostname),
        }
    }

    fn is_loopback(&self) -> bool {
        LOOPBACK_HOSTS.contains(&self.hostname.as_str())
    }

    fn is_clustered(&self) -> bool {
        !self.is_loopback() && !self.hostname.contains(".local")
    }

    /// Read `window.location`. Returns `None` outside a browser.
    #[must_use]
    pub fn from_browser() -> Option<Self> {
        #[cfg(feature = "hydrate")]
        {
            let href = web_sys::window()?.location().href().ok()?;
            Self::parse(&href)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Inputs to [`resolve_api_url`]. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointSources {
    pub runtime_override: Option<String>,
    pub build_time: Option<String>,
    pub page: Option<PageLocation>,
}

impl EndpointSources {
    /// Sources carrying only an explicit override.
    #[must_use]
    pub fn with_override(url: impl Into<String>) -> Self {
        Self { runtime_override: Some(url.into()), ..Self::default() }
    }

    /// Native sources: `NEWSBRIEF_API_URL` plus the compiled-in build value.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            runtime_override: std::env::var(API_URL_ENV).ok(),
            build_time: BUILD_TIME_API_URL.map(str::to_owned),
            page: None,
        }
    }

    /// Browser sources: `window.__API_URL__`, the build value and `window.location`.
    #[must_use]
    pub fn from_browser() -> Self {
        Self {
            runtime_override: browser_runtime_override(),
            build_time: BUILD_TIME_API_URL.map(str::to_owned),
            page: PageLocation::from_browser(),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Pick the API base URL. First match wins; see the module docs for the order.
#[must_use]
pub fn resolve_api_url(sources: &EndpointSources) -> String {
    if let Some(url) = non_empty(sources.runtime_override.as_ref()) {
        tracing::debug!(url, "api url from runtime override");
        return url.to_owned();
    }
    if sources.page.as_ref().is_some_and(PageLocation::is_loopback) {
        tracing::debug!(url = LOCAL_API_URL, "api url from loopback page");
        return LOCAL_API_URL.to_owned();
    }
    if let Some(url) = non_empty(sources.build_time.as_ref()) {
        tracing::debug!(url, "api url from build-time config");
        return url.to_owned();
    }
    if let Some(page) = &sources.page {
        if let Some(url) = resolve_from_page(page) {
            tracing::debug!(url = %url, "api url from page location");
            return url;
        }
    }
    tracing::debug!(url = LOCAL_API_URL, "api url from default");
    LOCAL_API_URL.to_owned()
}

fn resolve_from_page(page: &PageLocation) -> Option<String> {
    if page.is_loopback() {
        return Some(LOCAL_API_URL.to_owned());
    }
    if page.pathname.starts_with(API_PATH_PREFIX) {
        return Some(format!("{}{API_PATH_PREFIX}", page.origin()));
    }
    if page.is_clustered() {
        if page.port == Some(FRONTEND_NODE_PORT) {
            return Some(format!("{}//{}:{BACKEND_NODE_PORT}", page.protocol, page.hostname));
        }
        return Some(CLUSTER_SERVICE_URL.to_owned());
    }
    None
}

#[cfg(feature = "hydrate")]
fn browser_runtime_override() -> Option<String> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str("__API_URL__")).ok()?;
    value.as_string()
}

#[cfg(not(feature = "hydrate"))]
fn browser_runtime_override() -> Option<String> {
    None
}

/// Where a component gets its base URL from on each call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Fixed sources captured once (native, tests).
    Sources(EndpointSources),
    /// Re-read the browser globals on every call so a late `__API_URL__` wins.
    Browser,
}

impl Endpoint {
    #[must_use]
    pub fn base_url(&self) -> String {
        match self {
            Self::Sources(sources) => resolve_api_url(sources),
            Self::Browser => resolve_api_url(&EndpointSources::from_browser()),
        }
    }

    /// Absolute URL for `path` under the resolved base.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url().trim_end_matches('/'))
    }
}

impl From<EndpointSources> for Endpoint {
    fn from(sources: EndpointSources) -> Self {
        Self::Sources(sources)
    }
}

// =============================================================================
// TIMEOUTS
// =============================================================================

pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SUMMARIZE_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ARTICLES_TIMEOUT_SECS: u64 = 30;

/// Per-call request timeouts. Expiry surfaces as an ordinary transport failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    pub health: Duration,
    pub summarize: Duration,
    pub auth: Duration,
    pub articles: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            health: Duration::from_secs(DEFAULT_HEALTH_TIMEOUT_SECS),
            summarize: Duration::from_secs(DEFAULT_SUMMARIZE_TIMEOUT_SECS),
            auth: Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS),
            articles: Duration::from_secs(DEFAULT_ARTICLES_TIMEOUT_SECS),
        }
    }
}

impl Timeouts {
    /// Build timeouts from environment variables.
    ///
    /// - `NEWSBRIEF_HEALTH_TIMEOUT_SECS`: default 5
    /// - `NEWSBRIEF_SUMMARIZE_TIMEOUT_SECS`: default 60
    /// - `NEWSBRIEF_AUTH_TIMEOUT_SECS`: default 10
    /// - `NEWSBRIEF_ARTICLES_TIMEOUT_SECS`: default 30
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            health: env_secs("NEWSBRIEF_HEALTH_TIMEOUT_SECS", DEFAULT_HEALTH_TIMEOUT_SECS),
            summarize: env_secs("NEWSBRIEF_SUMMARIZE_TIMEOUT_SECS", DEFAULT_SUMMARIZE_TIMEOUT_SECS),
            auth: env_secs("NEWSBRIEF_AUTH_TIMEOUT_SECS", DEFAULT_AUTH_TIMEOUT_SECS),
            articles: env_secs("NEWSBRIEF_ARTICLES_TIMEOUT_SECS", DEFAULT_ARTICLES_TIMEOUT_SECS),
        }
    }
}

fn env_secs(key: &str, default: u64) -> Duration {
    Duration::from_secs(parse_secs(std::env::var(key).ok().as_deref(), default))
}

fn parse_secs(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

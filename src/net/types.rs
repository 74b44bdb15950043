//! Wire DTOs for the summarization and auth endpoints.
//!
//! DESIGN
//! ======
//! Responses are decoded leniently (`#[serde(default)]` on optional fields)
//! because the API owns these shapes and adds fields freely; unknown user
//! fields are kept in `User::extra`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ApiError;

// =============================================================================
// AUTH
// =============================================================================

/// A user as returned by `/api/auth/register` and `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Server-defined fields this client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Full name when set, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Payload returned by `/api/auth/login`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

pub const REGISTER_REQUIRED_MESSAGE: &str = "Username, password, and phone are required";

/// Body for `/api/auth/register`. Build with [`RegisterRequest::new`].
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
    phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
}

impl RegisterRequest {
    /// Trim and validate registration input.
    ///
    /// `username` and `phone` are trimmed; `password` is taken verbatim.
    /// Optional fields are dropped when blank.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` when username, password or phone is empty.
    pub fn new(
        username: &str,
        password: &str,
        phone: &str,
        email: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<Self, ApiError> {
        let username = username.trim().to_owned();
        let phone = phone.trim().to_owned();
        if username.is_empty() || password.is_empty() || phone.is_empty() {
            return Err(ApiError::Validation(REGISTER_REQUIRED_MESSAGE.to_owned()));
        }
        let optional = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };
        Ok(Self {
            username,
            password: password.to_owned(),
            phone,
            email: optional(email),
            full_name: optional(full_name),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish()
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// Output language of the generated summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(alias = "hindi")]
    Hindi,
    #[serde(alias = "english")]
    English,
}

impl Language {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hindi => "Hindi",
            Self::English => "English",
        }
    }

    #[must_use]
    pub fn articles_heading(self) -> &'static str {
        match self {
            Self::Hindi => "व्यक्तिगत लेख",
            Self::English => "Individual Articles",
        }
    }

    #[must_use]
    pub fn articles_count(self, count: usize) -> String {
        match self {
            Self::Hindi => format!("{count} लेख"),
            Self::English => format!("{count} articles"),
        }
    }

    #[must_use]
    pub fn summary_label(self) -> &'static str {
        match self {
            Self::Hindi => "सारांश:",
            Self::English => "Summary:",
        }
    }

    #[must_use]
    pub fn read_full_article(self) -> &'static str {
        match self {
            Self::Hindi => "पूरा लेख पढ़ें",
            Self::English => "Read Full Article",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hindi" | "hi" => Ok(Self::Hindi),
            "english" | "en" => Ok(Self::English),
            other => Err(format!("unknown language '{other}' (expected Hindi or English)")),
        }
    }
}

/// How far back the API should look for articles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "1d")]
    LastDay,
    #[serde(rename = "7d")]
    LastWeek,
    #[serde(rename = "all")]
    AllTime,
}

impl TimeRange {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastDay => "1d",
            Self::LastWeek => "7d",
            Self::AllTime => "all",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::LastDay => "last 24h",
            Self::LastWeek => "last 7 days",
            Self::AllTime => "all time",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" | "24h" | "day" => Ok(Self::LastDay),
            "7d" | "week" => Ok(Self::LastWeek),
            "all" | "all-time" => Ok(Self::AllTime),
            other => Err(format!("unknown time range '{other}' (expected 1d, 7d or all)")),
        }
    }
}

/// A summarization query as submitted by the user.
///
/// Serializes directly as the `/summarize` request body. `max_articles: None`
/// is the unlimited marker and goes over the wire as `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryQuery {
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub max_articles: Option<u32>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub when: TimeRange,
}

impl SummaryQuery {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Self::default() }
    }
}

/// Query parameters for `GET /articles`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArticlesQuery {
    pub query: String,
    pub location: String,
    pub max_articles: u32,
}

pub const DEFAULT_ARTICLE_LIMIT: u32 = 10;

impl ArticlesQuery {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), location: String::new(), max_articles: DEFAULT_ARTICLE_LIMIT }
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// One article in a summary or article listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_formatted: Option<String>,
}

impl Article {
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() { "No Title" } else { &self.title }
    }

    #[must_use]
    pub fn display_summary(&self) -> &str {
        if self.summary.trim().is_empty() { "No summary available" } else { &self.summary }
    }

    /// The article link, if it points anywhere.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        let link = self.link.trim();
        (!link.is_empty() && link != "#").then_some(link)
    }
}

/// Response of `POST /summarize`. Transient view state, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub articles_found: u32,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// `GET /articles` answers with either a bare list or a wrapped one.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ArticleList {
    Bare(Vec<Article>),
    Wrapped { articles: Vec<Article> },
}

impl From<ArticleList> for Vec<Article> {
    fn from(list: ArticleList) -> Self {
        match list {
            ArticleList::Bare(articles) | ArticleList::Wrapped { articles } => articles,
        }
    }
}

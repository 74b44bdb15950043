//! Plain-text rendering of results for the terminal.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use newsbrief::SearchHistoryEntry;
use newsbrief::net::types::{Article, Language, SummaryResult, User};

pub fn summary(result: &SummaryResult, with_articles: bool) -> String {
    let language = result.language;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", result.query, language.articles_count(result.articles_found as usize));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", result.summary.trim());
    if with_articles && !result.articles.is_empty() {
        let _ = writeln!(out);
        out.push_str(&articles(language, &result.articles));
    }
    out.trim_end().to_owned()
}

pub fn articles(language: Language, articles: &[Article]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", language.articles_heading(), language.articles_count(articles.len()));
    for (i, article) in articles.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {}", i + 1, article.display_title());
        let meta: Vec<&str> = [article.source.as_deref(), article.published_formatted.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();
        if !meta.is_empty() {
            let _ = writeln!(out, "   {}", meta.join(" | "));
        }
        let _ = writeln!(out, "   {} {}", language.summary_label(), article.display_summary());
        if let Some(link) = article.link() {
            let _ = writeln!(out, "   {}: {link}", language.read_full_article());
        }
    }
    out.trim_end().to_owned()
}

pub fn history(entries: &[SearchHistoryEntry]) -> String {
    if entries.is_empty() {
        return "No recent searches".to_owned();
    }
    let mut out = String::new();
    for entry in entries {
        let limit = entry.max_articles.map_or_else(|| "unlimited".to_owned(), |n| n.to_string());
        let _ = write!(out, "{}  {}", entry.id, entry.query);
        if !entry.location.is_empty() {
            let _ = write!(out, " @ {}", entry.location);
        }
        let _ = writeln!(
            out,
            "  [{}, {}, {limit}]  {}",
            entry.language,
            entry.when.label(),
            entry.recorded_at()
        );
    }
    out.trim_end().to_owned()
}

pub fn user(user: &User) -> String {
    let mut out = user.display_name().to_owned();
    if user.display_name() != user.username {
        let _ = write!(out, " ({})", user.username);
    }
    if let Some(email) = user.email.as_deref().filter(|e| !e.is_empty()) {
        let _ = write!(out, " <{email}>");
    }
    out
}

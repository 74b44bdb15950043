use newsbrief::net::types::TimeRange;
use serde_json::json;

use super::*;

fn article(title: &str, link: &str) -> Article {
    Article {
        title: title.to_owned(),
        summary: String::new(),
        link: link.to_owned(),
        source: Some("Daily".to_owned()),
        published_formatted: None,
    }
}

#[test]
fn summary_without_articles_omits_listing() {
    let result = SummaryResult {
        query: "floods".to_owned(),
        language: Language::English,
        articles_found: 2,
        summary: "Rivers rose.\n".to_owned(),
        articles: vec![article("A", "https://a")],
    };
    assert_eq!(summary(&result, false), "floods (2 articles)\n\nRivers rose.");
}

#[test]
fn summary_with_articles_uses_result_language_labels() {
    let result = SummaryResult {
        query: "बाढ़".to_owned(),
        language: Language::Hindi,
        articles_found: 1,
        summary: "सार".to_owned(),
        articles: vec![article("", "#")],
    };
    let out = summary(&result, true);
    assert!(out.contains("व्यक्तिगत लेख (1 लेख)"));
    assert!(out.contains("1. No Title"));
    assert!(out.contains("सारांश: No summary available"));
    assert!(!out.contains("पूरा लेख पढ़ें"));
}

#[test]
fn articles_list_links_and_sources() {
    let out = articles(Language::English, &[article("Storm", "https://x/1")]);
    assert_eq!(
        out,
        "Individual Articles (1 articles)\n\n1. Storm\n   Daily\n   Summary: No summary available\n   Read Full Article: https://x/1"
    );
}

#[test]
fn empty_history_has_placeholder() {
    assert_eq!(history(&[]), "No recent searches");
}

#[test]
fn history_line_shows_unlimited_marker() {
    let entry: SearchHistoryEntry = serde_json::from_value(json!({
        "id": 42,
        "query": "markets",
        "location": "Mumbai",
        "language": "English",
        "maxArticles": null,
        "when": "7d",
        "timestamp": "2026-03-01T10:00:00Z"
    }))
    .unwrap();
    assert_eq!(entry.when, TimeRange::LastWeek);
    assert_eq!(
        history(&[entry]),
        "42  markets @ Mumbai  [English, last 7 days, unlimited]  2026-03-01T10:00:00Z"
    );
}

#[test]
fn user_shows_username_when_full_name_differs() {
    let user: User = serde_json::from_value(json!({
        "username": "asha",
        "full_name": "Asha Rao",
        "email": "asha@example.com"
    }))
    .unwrap();
    assert_eq!(super::user(&user), "Asha Rao (asha) <asha@example.com>");
}

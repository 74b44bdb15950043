use time::macros::datetime;

use super::*;
use crate::storage::{KeyValueStore, MemoryStorage};

fn history() -> (SharedStore, SearchHistory) {
    let store = MemoryStorage::shared();
    (store.clone(), SearchHistory::new(store))
}

fn query(text: &str) -> SummaryQuery {
    SummaryQuery::new(text)
}

// =============================================================
// save
// =============================================================

#[test]
fn empty_store_lists_nothing() {
    let (_, h) = history();
    assert!(h.list().is_empty());
}

#[test]
fn save_inserts_at_head() {
    let (_, h) = history();
    h.save(&query("first"));
    let list = h.save(&query("second"));
    assert_eq!(list.iter().map(|e| e.query.as_str()).collect::<Vec<_>>(), ["second", "first"]);
    assert_eq!(h.list(), list);
}

#[test]
fn eleven_distinct_saves_keep_ten_most_recent() {
    let (_, h) = history();
    for i in 0..11 {
        h.save(&query(&format!("q{i}")));
    }
    let list = h.list();
    assert_eq!(list.len(), MAX_HISTORY_ITEMS);
    assert_eq!(list[0].query, "q10");
    assert_eq!(list[9].query, "q1");
    assert!(list.iter().all(|e| e.query != "q0"));
}

#[test]
fn same_search_replaces_existing_entry_at_head() {
    let (_, h) = history();
    let t0 = datetime!(2026-03-01 10:00 UTC);
    let t1 = datetime!(2026-03-01 11:00 UTC);

    h.save_at(&query("floods"), t0);
    h.save_at(&query("elections"), t0);
    let before = h.list()[1].clone();
    let list = h.save_at(&query("floods"), t1);

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].query, "floods");
    assert_eq!(list[0].timestamp, t1);
    assert!(list[0].id > before.id);
    assert_eq!(list[1].query, "elections");
}

#[test]
fn dedup_key_ignores_limit_and_time_range() {
    let (_, h) = history();
    h.save(&SummaryQuery { max_articles: Some(3), ..query("floods") });
    let list = h.save(&SummaryQuery { max_articles: None, when: TimeRange::AllTime, ..query("floods") });
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].max_articles, None);
    assert_eq!(list[0].when, TimeRange::AllTime);
}

#[test]
fn different_location_or_language_is_a_different_search() {
    let (_, h) = history();
    h.save(&query("floods"));
    h.save(&SummaryQuery { location: "Assam".to_owned(), ..query("floods") });
    let list = h.save(&SummaryQuery { language: Language::English, ..query("floods") });
    assert_eq!(list.len(), 3);
}

#[test]
fn repeated_identical_saves_leave_single_entry() {
    let (_, h) = history();
    for _ in 0..5 {
        h.save(&query("floods"));
    }
    assert_eq!(h.list().len(), 1);
}

#[test]
fn ids_stay_unique_when_clock_repeats() {
    let (_, h) = history();
    let t = datetime!(2026-03-01 10:00 UTC);
    h.save_at(&query("a"), t);
    h.save_at(&query("b"), t);
    let list = h.save_at(&query("c"), t);
    let mut ids: Vec<_> = list.iter().map(|e| e.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert!(list[0].id > list[1].id && list[1].id > list[2].id);
}

#[test]
fn id_at_ceiling_does_not_collide_with_new_entry() {
    let (store, h) = history();
    store
        .set(
            HISTORY_KEY,
            &format!(r#"[{{"id":{},"query":"stuck","timestamp":"2025-01-01T00:00:00Z"}}]"#, i64::MAX),
        )
        .unwrap();

    let list = h.save_at(&query("fresh"), datetime!(2026-03-01 10:00 UTC));
    assert_eq!(list.len(), 2);
    assert_ne!(list[0].id, list[1].id);

    let remaining = h.remove(list[0].id);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].query, "stuck");
}

#[test]
fn unlimited_submission_records_marker_and_time_range() {
    let (store, h) = history();
    let submitted = SummaryQuery {
        query: "floods".to_owned(),
        location: String::new(),
        max_articles: None,
        language: Language::Hindi,
        when: TimeRange::LastDay,
    };
    h.save(&submitted);

    let list = h.list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].max_articles, None);
    assert_eq!(list[0].when, TimeRange::LastDay);

    let raw: serde_json::Value = serde_json::from_str(&store.get(HISTORY_KEY).unwrap()).unwrap();
    assert_eq!(raw[0]["maxArticles"], serde_json::Value::Null);
    assert_eq!(raw[0]["when"], "1d");
}

// =============================================================
// remove / clear / get
// =============================================================

#[test]
fn remove_drops_matching_entry() {
    let (_, h) = history();
    h.save(&query("a"));
    let list = h.save(&query("b"));
    let remaining = h.remove(list[1].id);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].query, "b");
    assert_eq!(h.list(), remaining);
}

#[test]
fn remove_unknown_id_is_noop() {
    let (_, h) = history();
    let list = h.save(&query("a"));
    assert_eq!(h.remove(-1), list);
    assert_eq!(h.list(), list);
}

#[test]
fn clear_empties_store() {
    let (store, h) = history();
    h.save(&query("a"));
    assert!(h.clear().is_empty());
    assert!(h.list().is_empty());
    assert_eq!(store.get(HISTORY_KEY), None);
}

#[test]
fn get_and_to_query_round_trip_the_search() {
    let (_, h) = history();
    let submitted = SummaryQuery {
        query: "markets".to_owned(),
        location: "Mumbai".to_owned(),
        max_articles: Some(4),
        language: Language::English,
        when: TimeRange::LastWeek,
    };
    let id = h.save(&submitted)[0].id;
    assert_eq!(h.get(id).unwrap().to_query(), submitted);
    assert_eq!(h.get(id + 1), None);
}

#[test]
fn recorded_at_is_rfc3339() {
    let (_, h) = history();
    let list = h.save_at(&query("a"), datetime!(2026-03-01 10:15:30 UTC));
    assert_eq!(list[0].recorded_at(), "2026-03-01T10:15:30Z");
}

// =============================================================
// corruption
// =============================================================

#[test]
fn corrupt_storage_reads_empty_and_is_overwritten_on_save() {
    let (store, h) = history();
    store.set(HISTORY_KEY, "{definitely not a list").unwrap();
    assert!(h.list().is_empty());
    assert_eq!(h.save(&query("fresh")).len(), 1);
    assert_eq!(h.list()[0].query, "fresh");
}

#[test]
fn legacy_entries_without_time_range_default_to_last_day() {
    let (store, h) = history();
    store
        .set(
            HISTORY_KEY,
            r#"[{"id":1,"query":"q","location":"","language":"Hindi","maxArticles":10,"timestamp":"2025-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
    let list = h.list();
    assert_eq!(list[0].when, TimeRange::LastDay);
    assert_eq!(list[0].max_articles, Some(10));
}

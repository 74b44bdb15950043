//! # newsbrief
//!
//! Client library for the news summarization service: resolves the API
//! endpoint, keeps the auth token and search history in durable key-value
//! storage, and dispatches summarize/article requests.
//!
//! Browser glue (`localStorage`, `window.location`, `window.__API_URL__`) is
//! compiled behind the `hydrate` feature, which also exports a `start` entry
//! point for the page to call. Native builds use the same logic with injected
//! storage and page location, which is what the `cli` crate and the tests do.

pub mod app;
pub mod config;
pub mod history;
pub mod net;
pub mod session;
pub mod state;
pub mod storage;
pub mod util;

#[cfg(test)]
mod test_support;

pub use app::App;
pub use config::{Endpoint, EndpointSources, PageLocation, Timeouts};
pub use history::{SearchHistory, SearchHistoryEntry};
pub use net::error::ApiError;
pub use session::SessionStore;
pub use storage::{KeyValueStore, SharedStore, StorageError};

/// Browser entry point: console logging, theme, session check and health probe.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn start() {
    let app = App::browser();
    wasm_bindgen_futures::spawn_local(async move {
        app.launch().await;
    });
}

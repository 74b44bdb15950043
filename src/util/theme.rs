//! Theme preference persistence and toggle.
//!
//! Reads the stored preference (`light`/`dark`) and, in the browser, applies
//! it as a `data-theme` attribute on `<html>`. Without a stored preference the
//! browser's `prefers-color-scheme` decides; elsewhere the default is light.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;

use crate::storage::SharedStore;

pub const THEME_KEY: &str = "newsSummarizer_theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme preference over shared durable storage.
#[derive(Clone)]
pub struct ThemePreference {
    store: SharedStore,
}

impl fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreference").finish_non_exhaustive()
    }
}

impl ThemePreference {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Stored theme, else the system preference, else light.
    #[must_use]
    pub fn load(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .and_then(|raw| Theme::parse(&raw))
            .unwrap_or_else(system_preference)
    }

    pub fn save(&self, theme: Theme) {
        if let Err(e) = self.store.set(THEME_KEY, theme.as_str()) {
            tracing::warn!(error = %e, "failed to persist theme");
        }
    }

    /// Flip, persist and apply the theme. Returns the new theme.
    pub fn toggle(&self) -> Theme {
        let next = self.load().toggled();
        self.save(next);
        apply(next);
        next
    }
}

fn system_preference() -> Theme {
    #[cfg(feature = "hydrate")]
    {
        let dark = web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches());
        if dark { Theme::Dark } else { Theme::Light }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Theme::Light
    }
}

/// Set `data-theme` on the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.document_element())
        {
            let _ = el.set_attribute("data-theme", theme.as_str());
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = theme;
    }
}

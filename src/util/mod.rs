//! Utility helpers shared across the client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from the session and
//! query logic.

pub mod logging;
pub mod theme;

//! Page-load state owned by the app.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `desk`) and owned explicitly by
//! [`crate::App`]; nothing here is global.

pub mod auth;
pub mod desk;

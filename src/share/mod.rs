//! Weather share: hands normalized weather to third-party apps (watch
//! companions, launchers, widgets) as a single JSON document.

pub mod json;
mod service;

pub use service::{SHARE_EXTRA_KEY, ShareService};

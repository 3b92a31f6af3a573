//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, the
//! navigation state and the playback session.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;

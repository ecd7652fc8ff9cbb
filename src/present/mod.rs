//! Presentation adapters.
//!
//! Presenters receive fully composed frames and never render anything themselves.

/// PNG file presenter.
pub mod png;
/// Presenter trait and the in-memory presenter.
pub mod presenter;

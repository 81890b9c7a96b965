//! Core engine for slurp - state machine and orchestration.
//!
//! This crate contains the App state machine without TUI dependencies.
//! The busy-indicator coordinator in [`busy`] decides when the overlay
//! appears; everything else is the page machinery that feeds it signals.

mod app;
mod busy;
mod config;
mod history;
mod listing;
mod ops;
mod preview;
mod timer;
mod vault;
mod view;

pub use app::App;
pub use busy::{BusyCoordinator, BusyIndicator, DEFAULT_ACTIVATION_DELAY};
pub use config::{AppConfig, ConfigError, IndicatorConfig, PreviewConfig, SlurpConfig, config_path};
pub use history::{MAX_HISTORY, PageHistory};
pub use listing::{ListingPage, Row};
pub use ops::{OpEvent, OpId, OpKind, OpOutcome};
pub use preview::{PreviewBody, PreviewPane};
pub use timer::{ActivationTimer, ActivationToken};
pub use vault::{Vault, VaultError};
pub use view::{BusyOverlay, ConfirmPrompt, IndicatorMount, ViewState};

// Culture Desk - Core Library
// Exposes the shell, panels and business modules for the terminal UI and tests

pub mod auth;
pub mod config;
pub mod controller;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod modules;
pub mod panel;
pub mod registry;
pub mod scoring;
pub mod shell;

// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use auth::{permissions, verify, Verdict};
pub use config::{load_config, load_or_default, AppConfig};
pub use controller::{DisplayEdits, Domain, PanelController};
pub use entities::{AttributeSpec, Attributes, EntityRecord, HistoryEntry, RecordStore, ALL_CATEGORIES};
pub use error::{ModuleError, PanelError, StorageError};
pub use metrics::{MetricsFeed, MetricsSample};
pub use panel::{Panel, PanelAction, PanelContext};
pub use registry::{ModuleDescriptor, ModuleKind, ModuleRegistry, PanelLoader};
pub use shell::Shell;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 🧩 Panel - What the shell mounts
//
// Every business panel exposes its CRUD controller plus a few optional
// extras: module-specific actions bound to a key, read-only insight
// lines for the detail pane, and a tick hook for live data.

use crate::config::AppConfig;
use crate::controller::PanelController;
use crate::error::PanelError;
use crate::registry::ModuleKind;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared construction context handed to every loader
#[derive(Clone)]
pub struct PanelContext {
    /// Runtime that background tasks are spawned on
    pub runtime: tokio::runtime::Handle,
    pub config: Arc<AppConfig>,
}

impl PanelContext {
    pub fn new(runtime: tokio::runtime::Handle, config: AppConfig) -> Self {
        PanelContext {
            runtime,
            config: Arc::new(config),
        }
    }
}

/// A module-specific operation bound to a key in the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelAction {
    pub key: char,
    pub label: &'static str,
}

impl PanelAction {
    pub const fn new(key: char, label: &'static str) -> Self {
        PanelAction { key, label }
    }
}

pub trait Panel {
    fn controller(&self) -> &PanelController;

    fn controller_mut(&mut self) -> &mut PanelController;

    fn kind(&self) -> ModuleKind {
        self.controller().domain().kind()
    }

    fn actions(&self) -> &'static [PanelAction] {
        &[]
    }

    /// Run the action bound to `key`; returns a status message
    fn run_action(&mut self, key: char) -> Result<String, PanelError> {
        Err(PanelError::UnsupportedAction(key))
    }

    /// Derived read-only lines about the focused record
    fn insights(&self) -> Vec<String> {
        Vec::new()
    }

    /// Panel-wide summary shown above the list
    fn headline(&self) -> Option<String> {
        None
    }

    /// Called on every UI tick
    fn tick(&mut self) {}

    /// Token of the panel's background task, if it owns one
    fn background_task(&self) -> Option<CancellationToken> {
        None
    }

    /// Cancelled once the background task has actually exited
    fn background_finished(&self) -> Option<CancellationToken> {
        None
    }
}

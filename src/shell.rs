// 🪟 Shell - Owns the one mounted panel and performs navigation
//
// switch_to(name):
//   1. resolve the descriptor
//   2. build a fresh panel
//   3. destroy the mounted panel (cancelling its background task)
//   4. mount the new one
//
// If 1 or 2 fails the old panel is still destroyed and the container stays
// empty until the next successful switch.

use crate::error::ModuleError;
use crate::panel::{Panel, PanelContext};
use crate::registry::ModuleRegistry;
use tracing::{error, info};

pub struct MountedPanel {
    pub name: &'static str,
    pub panel: Box<dyn Panel>,
}

pub struct Shell {
    registry: ModuleRegistry,
    context: PanelContext,
    mounted: Option<MountedPanel>,
    last_error: Option<String>,
}

impl Shell {
    pub fn new(registry: ModuleRegistry, context: PanelContext) -> Self {
        Shell {
            registry,
            context,
            mounted: None,
            last_error: None,
        }
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn context(&self) -> &PanelContext {
        &self.context
    }

    pub fn switch_to(&mut self, name: &str) -> Result<(), ModuleError> {
        let built = self
            .registry
            .resolve(name)
            .and_then(|d| (d.loader)(&self.context).map(|panel| (d.name, panel)));

        if let Some(old) = self.mounted.take() {
            info!(module = old.name, "unmounting panel");
            drop(old);
        }

        match built {
            Ok((name, panel)) => {
                info!(module = name, "mounted panel");
                self.mounted = Some(MountedPanel { name, panel });
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                error!(module = name, error = %e, "failed to mount panel");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn mounted(&self) -> Option<&dyn Panel> {
        self.mounted.as_ref().map(|m| m.panel.as_ref())
    }

    pub fn mounted_mut(&mut self) -> Option<&mut (dyn Panel + 'static)> {
        self.mounted.as_mut().map(|m| m.panel.as_mut())
    }

    pub fn mounted_name(&self) -> Option<&'static str> {
        self.mounted.as_ref().map(|m| m.name)
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_none()
    }

    /// Error of the last failed switch, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn tick(&mut self) {
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.panel.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::registry::ModuleDescriptor;
    use std::time::Duration;

    fn failing_loader(_ctx: &PanelContext) -> Result<Box<dyn Panel>, ModuleError> {
        Err(ModuleError::Construction {
            module: "broken".to_string(),
            reason: "seed data unavailable".to_string(),
        })
    }

    fn shell(registry: ModuleRegistry) -> Shell {
        let context = PanelContext::new(tokio::runtime::Handle::current(), AppConfig::default());
        Shell::new(registry, context)
    }

    #[tokio::test]
    async fn test_switch_replaces_mounted_panel() {
        let mut shell = shell(ModuleRegistry::new());
        assert!(shell.is_empty());

        shell.switch_to("dashboard").unwrap();
        let feed = shell.mounted().and_then(|p| p.background_task()).unwrap();
        let finished = shell.mounted().and_then(|p| p.background_finished()).unwrap();
        assert!(!feed.is_cancelled());

        shell.switch_to("planning").unwrap();
        assert_eq!(shell.mounted_name(), Some("planning"));
        assert!(feed.is_cancelled());
        tokio::time::timeout(Duration::from_secs(1), finished.cancelled())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_module_empties_container() {
        let mut shell = shell(ModuleRegistry::new());
        shell.switch_to("resources").unwrap();

        let err = shell.switch_to("nonexistent").unwrap_err();
        assert!(matches!(err, ModuleError::UnknownModule(_)));
        assert!(shell.is_empty());
        assert!(shell.last_error().unwrap().contains("nonexistent"));

        shell.switch_to("resources").unwrap();
        assert!(shell.last_error().is_none());
    }

    #[tokio::test]
    async fn test_construction_failure_empties_container() {
        let mut registry = ModuleRegistry::new();
        registry
            .register(ModuleDescriptor {
                name: "broken",
                label: "Broken",
                loader: failing_loader,
            })
            .unwrap();
        let mut shell = shell(registry);
        shell.switch_to("dashboard").unwrap();
        let feed = shell.mounted().and_then(|p| p.background_task()).unwrap();

        let err = shell.switch_to("broken").unwrap_err();
        assert!(matches!(err, ModuleError::Construction { .. }));
        assert!(shell.is_empty());
        assert!(feed.is_cancelled());
    }

    #[tokio::test]
    async fn test_every_switch_builds_fresh_panel() {
        let mut shell = shell(ModuleRegistry::new());
        shell.switch_to("schedule").unwrap();

        let panel = shell.mounted_mut().unwrap();
        panel.controller_mut().create();
        let grown = panel.controller().store().len();

        shell.switch_to("schedule").unwrap();
        assert_eq!(shell.mounted().unwrap().controller().store().len(), grown - 1);
    }
}

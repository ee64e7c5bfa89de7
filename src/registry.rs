// 🗂️ Module Registry - Static table of the nine business modules
//
// Modules are a closed set known at compile time: a `ModuleKind` enum plus
// one plain `fn` loader per module. Resolution is by stable name.

use crate::error::ModuleError;
use crate::modules;
use crate::panel::{Panel, PanelContext};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Dashboard,
    Planning,
    Resources,
    Workflow,
    Distribution,
    Schedule,
    Analytics,
    Copyright,
    Feedback,
}

impl ModuleKind {
    /// Sidebar order
    pub const ALL: [ModuleKind; 9] = [
        ModuleKind::Dashboard,
        ModuleKind::Planning,
        ModuleKind::Resources,
        ModuleKind::Workflow,
        ModuleKind::Distribution,
        ModuleKind::Schedule,
        ModuleKind::Analytics,
        ModuleKind::Copyright,
        ModuleKind::Feedback,
    ];

    /// Stable navigation name
    pub fn name(&self) -> &'static str {
        match self {
            ModuleKind::Dashboard => "dashboard",
            ModuleKind::Planning => "planning",
            ModuleKind::Resources => "resources",
            ModuleKind::Workflow => "workflow",
            ModuleKind::Distribution => "distribution",
            ModuleKind::Schedule => "schedule",
            ModuleKind::Analytics => "analytics",
            ModuleKind::Copyright => "copyright",
            ModuleKind::Feedback => "feedback",
        }
    }

    /// Sidebar label
    pub fn label(&self) -> &'static str {
        match self {
            ModuleKind::Dashboard => "Control Panel",
            ModuleKind::Planning => "Content Planning",
            ModuleKind::Resources => "Asset Library",
            ModuleKind::Workflow => "Approval Flow",
            ModuleKind::Distribution => "Channels",
            ModuleKind::Schedule => "Release Schedule",
            ModuleKind::Analytics => "Data Insights",
            ModuleKind::Copyright => "Copyright Guard",
            ModuleKind::Feedback => "Feedback",
        }
    }

    pub fn from_name(name: &str) -> Option<ModuleKind> {
        ModuleKind::ALL.iter().copied().find(|k| k.name() == name)
    }

    fn index(&self) -> usize {
        ModuleKind::ALL.iter().position(|k| k == self).unwrap_or(0)
    }

    pub fn next(&self) -> ModuleKind {
        ModuleKind::ALL[(self.index() + 1) % ModuleKind::ALL.len()]
    }

    pub fn previous(&self) -> ModuleKind {
        let len = ModuleKind::ALL.len();
        ModuleKind::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// Builds a fresh panel on every call
pub type PanelLoader = fn(&PanelContext) -> Result<Box<dyn Panel>, ModuleError>;

#[derive(Clone, Copy)]
pub struct ModuleDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub loader: PanelLoader,
}

impl ModuleDescriptor {
    pub fn builtin(kind: ModuleKind) -> Self {
        ModuleDescriptor {
            name: kind.name(),
            label: kind.label(),
            loader: modules::loader_for(kind),
        }
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .finish()
    }
}

pub struct ModuleRegistry {
    descriptors: Vec<ModuleDescriptor>,
}

impl ModuleRegistry {
    /// Registry holding the nine built-in modules in sidebar order
    pub fn new() -> Self {
        ModuleRegistry {
            descriptors: ModuleKind::ALL
                .iter()
                .map(|kind| ModuleDescriptor::builtin(*kind))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        ModuleRegistry {
            descriptors: Vec::new(),
        }
    }

    pub fn register(&mut self, descriptor: ModuleDescriptor) -> Result<(), ModuleError> {
        if self.descriptors.iter().any(|d| d.name == descriptor.name) {
            return Err(ModuleError::Duplicate(descriptor.name.to_string()));
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<&ModuleDescriptor, ModuleError> {
        self.descriptors
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| ModuleError::UnknownModule(name.to_string()))
    }

    pub fn descriptors(&self) -> &[ModuleDescriptor] {
        &self.descriptors
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_has_nine_unique_modules() {
        let registry = ModuleRegistry::new();
        assert_eq!(registry.descriptors().len(), 9);

        for kind in ModuleKind::ALL {
            let d = registry.resolve(kind.name()).unwrap();
            assert_eq!(d.label, kind.label());
        }
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = ModuleRegistry::new();
        let err = registry.resolve("nonexistent").unwrap_err();
        assert!(matches!(err, ModuleError::UnknownModule(name) if name == "nonexistent"));
    }

    #[test]
    fn test_register_rejects_duplicate_name() {
        let mut registry = ModuleRegistry::empty();
        registry.register(ModuleDescriptor::builtin(ModuleKind::Schedule)).unwrap();

        let err = registry
            .register(ModuleDescriptor::builtin(ModuleKind::Schedule))
            .unwrap_err();
        assert!(matches!(err, ModuleError::Duplicate(_)));
        assert_eq!(registry.descriptors().len(), 1);
    }

    #[test]
    fn test_kind_names_round_trip_and_cycle() {
        for kind in ModuleKind::ALL {
            assert_eq!(ModuleKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.next().previous(), kind);
        }
        assert_eq!(ModuleKind::Feedback.next(), ModuleKind::Dashboard);
        assert_eq!(ModuleKind::Dashboard.previous(), ModuleKind::Feedback);
        assert_eq!(ModuleKind::from_name("Dashboard"), None);
    }
}

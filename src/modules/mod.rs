// Business Modules - One file per sidebar entry
//
// Each module defines:
// - a Domain (categories, attributes, scoring, seed data, create template)
// - a Panel wrapping a PanelController plus its module-specific actions
// - a `load` function, the registry's loader for that module

pub mod analytics;
pub mod copyright;
pub mod dashboard;
pub mod distribution;
pub mod feedback;
pub mod planning;
pub mod resources;
pub mod schedule;
pub mod workflow;

use crate::entities::EntityRecord;
use crate::registry::{ModuleKind, PanelLoader};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn loader_for(kind: ModuleKind) -> PanelLoader {
    match kind {
        ModuleKind::Dashboard => dashboard::load,
        ModuleKind::Planning => planning::load,
        ModuleKind::Resources => resources::load,
        ModuleKind::Workflow => workflow::load,
        ModuleKind::Distribution => distribution::load,
        ModuleKind::Schedule => schedule::load,
        ModuleKind::Analytics => analytics::load,
        ModuleKind::Copyright => copyright::load,
        ModuleKind::Feedback => feedback::load,
    }
}

/// Uniform pick from a non-empty constant table
pub(crate) fn pick<'a, T>(items: &'a [T], rng: &mut dyn RngCore) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// RNG derived from a record's identity and attributes. Visual noise drawn
/// from it stays put between redraws and moves when the record changes.
pub(crate) fn view_rng(record: &EntityRecord) -> StdRng {
    let mut hasher = DefaultHasher::new();
    record.id.hash(&mut hasher);
    for (key, value) in &record.attributes {
        key.hash(&mut hasher);
        value.to_bits().hash(&mut hasher);
    }
    StdRng::seed_from_u64(hasher.finish())
}

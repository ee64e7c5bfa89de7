// 🧬 Content Planning - Plans described by five "genes" plus a budget
//
// Score: content value model (see scoring::plan_value).
// Extras:
// - budget estimate vs. the plan's budget limit, execution risk label
// - channel fit heatmap, grade and publishing suggestion
// - narrative beats (add / clear)
// - snapshots: the plan's title and genes appended to a JSON array file
//   that is rewritten wholesale on every save; load restores the latest

use crate::controller::{Domain, PanelController};
use crate::entities::{AttributeSpec, Attributes, EntityRecord};
use crate::error::{ModuleError, PanelError, StorageError};
use crate::panel::{Panel, PanelAction, PanelContext};
use crate::registry::ModuleKind;
use crate::scoring::{self, PLAN_CHANNELS, PLAN_GENES};
use chrono::Local;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const CATEGORIES: [&str; 5] = [
    "visual art",
    "digital heritage",
    "historical deconstruction",
    "interactive performance",
    "metaverse content",
];

const ATTRIBUTES: [AttributeSpec; 6] = [
    AttributeSpec::percent("depth", "Cultural depth"),
    AttributeSpec::percent("narrative", "Narrative tension"),
    AttributeSpec::percent("visual", "Visual impact"),
    AttributeSpec::percent("interact", "Interaction"),
    AttributeSpec::percent("trend", "Trend fit"),
    AttributeSpec::new("budget_limit", "Budget limit", 1_000.0, 1_000_000.0, 1_000.0),
];

const SEED_PLANS: [(&str, &str); 4] = [
    ("Dunhuang Flying Apsaras Motion Series", "visual art"),
    ("Classic of Mountains and Seas Bestiary", "historical deconstruction"),
    ("Forbidden City Night Tour", "interactive performance"),
    ("Twenty-Four Solar Terms Virtual Garden", "metaverse content"),
];

/// Field holding the narrative beats, one per line
const BEATS_FIELD: &str = "beats";

const ACTIONS: [PanelAction; 4] = [
    PanelAction::new('S', "save snapshot"),
    PanelAction::new('L', "load latest snapshot"),
    PanelAction::new('B', "add narrative beat"),
    PanelAction::new('X', "clear narrative beats"),
];

pub struct PlanningDomain;

impl Domain for PlanningDomain {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Planning
    }

    fn id_prefix(&self) -> &'static str {
        "PLN"
    }

    fn categories(&self) -> &'static [&'static str] {
        &CATEGORIES
    }

    fn attributes(&self) -> &'static [AttributeSpec] {
        &ATTRIBUTES
    }

    fn editable_fields(&self) -> &'static [&'static str] {
        &["owner"]
    }

    fn score(&self, _category: &str, attrs: &Attributes, rng: &mut dyn RngCore) -> f64 {
        scoring::plan_value(attrs, rng)
    }

    fn seed(&self, rng: &mut dyn RngCore) -> Vec<EntityRecord> {
        SEED_PLANS
            .iter()
            .map(|(title, category)| {
                let mut record = EntityRecord::draft(*title, *category).with_field("owner", "content team");
                for gene in PLAN_GENES {
                    record = record.with_attribute(gene, rng.gen_range(30..=95) as f64);
                }
                record = record.with_attribute("budget_limit", rng.gen_range(3..=20) as f64 * 10_000.0);
                record.log("plan drafted");
                record
            })
            .collect()
    }

    fn template(&self, _rng: &mut dyn RngCore) -> EntityRecord {
        let mut record = EntityRecord::draft("New content plan", CATEGORIES[0]).with_field("owner", "");
        for gene in PLAN_GENES {
            record = record.with_attribute(gene, 50.0);
        }
        record.with_attribute("budget_limit", 50_000.0)
    }
}

// ============================================================================
// SNAPSHOTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub id: String,
    pub title: String,
    pub genes: BTreeMap<String, f64>,
    pub timestamp: String,
}

impl PlanSnapshot {
    fn capture(record: &EntityRecord) -> Self {
        PlanSnapshot {
            id: record.id.clone(),
            title: record.title.clone(),
            genes: PLAN_GENES
                .iter()
                .map(|g| (g.to_string(), record.attribute(g)))
                .collect(),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

/// Snapshots taken in this session, mirrored to one JSON file
pub struct SnapshotStore {
    path: PathBuf,
    snapshots: Vec<PlanSnapshot>,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotStore {
            path: path.into(),
            snapshots: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// "V{n} - {time}" labels, newest first
    pub fn labels(&self) -> Vec<String> {
        self.snapshots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, s)| format!("V{} - {}", i + 1, s.timestamp))
            .collect()
    }

    /// Append a snapshot and rewrite the whole file. On a write failure the
    /// in-memory list is left as it was.
    pub fn save(&mut self, snapshot: PlanSnapshot) -> Result<String, StorageError> {
        let mut next = self.snapshots.clone();
        next.push(snapshot);

        let json = serde_json::to_string_pretty(&next)?;
        fs::write(&self.path, json)?;

        self.snapshots = next;
        let label = format!("V{} - {}", self.snapshots.len(), self.snapshots[self.snapshots.len() - 1].timestamp);
        info!(path = %self.path.display(), label = %label, "plan snapshot written");
        Ok(label)
    }

    /// Read the file and return its last element
    pub fn load_latest(&self) -> Result<PlanSnapshot, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::Missing(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        let snapshots: Vec<PlanSnapshot> = serde_json::from_str(&content)?;
        snapshots
            .last()
            .cloned()
            .ok_or_else(|| StorageError::Empty(self.path.clone()))
    }
}

// ============================================================================
// PANEL
// ============================================================================

pub struct PlanningPanel {
    controller: PanelController,
    snapshots: SnapshotStore,
}

impl PlanningPanel {
    pub fn new(controller: PanelController, snapshots: SnapshotStore) -> Self {
        PlanningPanel { controller, snapshots }
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    fn save_snapshot(&mut self) -> Result<String, PanelError> {
        let record = self.controller.focused().ok_or(PanelError::NoFocus)?;
        let snapshot = PlanSnapshot::capture(record);
        let label = self.snapshots.save(snapshot)?;
        self.controller.update_focused(&format!("snapshot {} saved", label), |_, _| {})?;
        Ok(format!("Plan saved as snapshot [{}]", label))
    }

    fn load_snapshot(&mut self) -> Result<String, PanelError> {
        if self.controller.focused().is_none() {
            return Err(PanelError::NoFocus);
        }
        let snapshot = self.snapshots.load_latest()?;
        let title = snapshot.title.trim().to_string();
        if title.is_empty() {
            return Err(PanelError::validation(
                "title",
                "snapshot title is empty",
                ModuleKind::Planning.name(),
            ));
        }
        let message = format!("restored snapshot \"{}\" ({})", title, snapshot.timestamp);

        self.controller.update_focused(&message, |record, _| {
            record.title = title.clone();
            for spec in ATTRIBUTES.iter().filter(|s| PLAN_GENES.contains(&s.key)) {
                if let Some(value) = snapshot.genes.get(spec.key).filter(|v| v.is_finite()) {
                    record.attributes.insert(spec.key.to_string(), spec.clamp(*value));
                }
            }
        })?;
        Ok(format!("Restored latest snapshot: {}", title))
    }

    fn add_beat(&mut self) -> Result<String, PanelError> {
        let record = self.controller.update_focused("narrative beat added", |record, _| {
            let mut beats = beats_of(record);
            beats.push(format!("Beat {}: new narrative segment (neutral)", beats.len() + 1));
            record.set_field(BEATS_FIELD, beats.join("\n"));
        })?;
        Ok(format!("{} narrative beats", beats_of(record).len()))
    }

    fn clear_beats(&mut self) -> Result<String, PanelError> {
        self.controller.update_focused("narrative beats cleared", |record, _| {
            record.fields.remove(BEATS_FIELD);
        })?;
        Ok("Narrative beats cleared".to_string())
    }
}

fn beats_of(record: &EntityRecord) -> Vec<String> {
    record
        .field(BEATS_FIELD)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

impl Panel for PlanningPanel {
    fn controller(&self) -> &PanelController {
        &self.controller
    }

    fn controller_mut(&mut self) -> &mut PanelController {
        &mut self.controller
    }

    fn actions(&self) -> &'static [PanelAction] {
        &ACTIONS
    }

    fn run_action(&mut self, key: char) -> Result<String, PanelError> {
        match key {
            'S' => self.save_snapshot(),
            'L' => self.load_snapshot(),
            'B' => self.add_beat(),
            'X' => self.clear_beats(),
            other => Err(PanelError::UnsupportedAction(other)),
        }
    }

    fn insights(&self) -> Vec<String> {
        let Some(record) = self.controller.focused() else {
            return Vec::new();
        };
        let attrs = &record.attributes;

        let estimate = scoring::budget_estimate(attrs);
        let limit = record.attribute("budget_limit");
        let budget_status = if estimate <= limit { "within budget" } else { "overspend risk" };

        let mut rng = super::view_rng(record);
        let heatmap = PLAN_CHANNELS
            .iter()
            .zip(scoring::channel_heatmap(attrs, &mut rng))
            .map(|(channel, fit)| format!("{} {:.0}", channel, fit))
            .collect::<Vec<_>>()
            .join(" · ");

        let mut lines = vec![
            format!(
                "Content value {:.2} (grade {}): {}",
                record.score,
                scoring::plan_grade(record.score),
                scoring::plan_suggestion(record.score)
            ),
            format!("Base complexity: {:.1}%", scoring::plan_complexity(attrs)),
            format!("Estimated cost: {:.2} of {:.0} ({})", estimate, limit, budget_status),
            format!("Execution risk: {}", scoring::plan_risk(attrs).label()),
            format!("Channel fit: {}", heatmap),
            format!(
                "Spread potential {:.0}% · feasibility {:.0}%",
                (scoring::plan_complexity(attrs) * 1.1).min(100.0),
                100.0 - (record.attribute("interact") / 2.0).floor()
            ),
        ];
        lines.extend(beats_of(record));
        if !self.snapshots.is_empty() {
            lines.push(format!("Snapshots: {}", self.snapshots.labels().join(", ")));
        }
        lines
    }
}

pub fn load(ctx: &PanelContext) -> Result<Box<dyn Panel>, ModuleError> {
    let controller = PanelController::new(Box::new(PlanningDomain));
    let snapshots = SnapshotStore::new(ctx.config.storage.planning_snapshots.clone());
    Ok(Box::new(PlanningPanel::new(controller, snapshots)))
}

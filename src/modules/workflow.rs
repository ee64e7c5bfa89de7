// ✅ Approval Flow - Release requests moving through a four-stage review
//
// Stages: submission -> compliance -> final review -> closed
// Score: release confidence, a weighted consensus of three reviewers minus
// a penalty for disagreement. Deterministic.
//
// Decisions:
//   approve  => stage "closed", status "closed"
//   reject   => stage "compliance", status "rejected"

use crate::controller::{Domain, PanelController};
use crate::entities::{AttributeSpec, Attributes, EntityRecord};
use crate::error::{ModuleError, PanelError};
use crate::panel::{Panel, PanelAction, PanelContext};
use crate::registry::ModuleKind;
use crate::scoring;
use rand::{Rng, RngCore};

/// Priority doubles as the category
const CATEGORIES: [&str; 3] = ["urgent", "routine", "minor"];

const ATTRIBUTES: [AttributeSpec; 3] = [
    AttributeSpec::percent("ai_review", "AI compliance engine"),
    AttributeSpec::percent("legal_review", "Legal lead"),
    AttributeSpec::percent("chief_review", "Editor in chief"),
];

pub const STAGES: [&str; 4] = ["submission", "compliance", "final review", "closed"];

const TITLES: [&str; 4] = [
    "Forbidden City digital asset licensing",
    "Classic of Mountains and Seas AR draft",
    "Silk Road micro-documentary cut",
    "Intangible heritage crafts 4K library release",
];

const REQUESTERS: [&str; 3] = ["Content - Chen", "Operations - Li", "Engineering - Wang"];

const ACTIONS: [PanelAction; 2] = [
    PanelAction::new('A', "approve"),
    PanelAction::new('R', "reject"),
];

pub struct WorkflowDomain;

impl WorkflowDomain {
    fn task(&self, title: &str, requester: &str, rng: &mut dyn RngCore) -> EntityRecord {
        let priority = *super::pick(&CATEGORIES, rng);
        let mut record = EntityRecord::draft(title, priority)
            .with_field("requester", requester)
            .with_field("stage", STAGES[1])
            .with_field("status", "in review")
            .with_attribute("ai_review", rng.gen_range(60..=95) as f64)
            .with_attribute("legal_review", 0.0)
            .with_attribute("chief_review", 0.0);
        record.log(format!("release request submitted by {}", requester));
        record
    }
}

impl Domain for WorkflowDomain {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Workflow
    }

    fn id_prefix(&self) -> &'static str {
        "WF"
    }

    fn categories(&self) -> &'static [&'static str] {
        &CATEGORIES
    }

    fn attributes(&self) -> &'static [AttributeSpec] {
        &ATTRIBUTES
    }

    fn editable_fields(&self) -> &'static [&'static str] {
        &["requester"]
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["requester"]
    }

    fn score(&self, _category: &str, attrs: &Attributes, _rng: &mut dyn RngCore) -> f64 {
        scoring::release_confidence(attrs)
    }

    fn seed(&self, rng: &mut dyn RngCore) -> Vec<EntityRecord> {
        TITLES
            .iter()
            .map(|title| {
                let requester = *super::pick(&REQUESTERS, rng);
                self.task(title, requester, rng)
            })
            .collect()
    }

    fn template(&self, rng: &mut dyn RngCore) -> EntityRecord {
        self.task("New release request", REQUESTERS[0], rng)
    }
}

/// Stage pipeline with the current stage bracketed
pub fn stage_track(current: &str) -> String {
    STAGES
        .iter()
        .map(|s| if *s == current { format!("[{}]", s) } else { s.to_string() })
        .collect::<Vec<_>>()
        .join(" → ")
}

fn confidence_band(confidence: f64) -> &'static str {
    if confidence > 80.0 {
        "strong consensus"
    } else if confidence > 50.0 {
        "partial consensus"
    } else {
        "no consensus yet"
    }
}

pub struct WorkflowPanel {
    controller: PanelController,
}

impl WorkflowPanel {
    pub fn new(controller: PanelController) -> Self {
        WorkflowPanel { controller }
    }

    fn decide(&mut self, approve: bool) -> Result<String, PanelError> {
        let (stage, status, verdict) = if approve {
            (STAGES[3], "closed", "approved")
        } else {
            (STAGES[1], "rejected", "rejected")
        };

        let record = self
            .controller
            .update_focused(&format!("final decision: {}", verdict), |record, _| {
                record.set_field("stage", stage);
                record.set_field("status", status);
            })?;
        Ok(format!("{} {}", record.id, verdict))
    }
}

impl Panel for WorkflowPanel {
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
            'A' => self.decide(true),
            'R' => self.decide(false),
            other => Err(PanelError::UnsupportedAction(other)),
        }
    }

    fn insights(&self) -> Vec<String> {
        let Some(record) = self.controller.focused() else {
            return Vec::new();
        };
        vec![
            format!(
                "Release confidence: {:.2}% ({})",
                record.score,
                confidence_band(record.score)
            ),
            format!("Stage: {}", stage_track(record.field("stage"))),
            format!("Status: {} · requester: {}", record.field("status"), record.field("requester")),
        ]
    }
}

pub fn load(_ctx: &PanelContext) -> Result<Box<dyn Panel>, ModuleError> {
    let controller = PanelController::new(Box::new(WorkflowDomain));
    Ok(Box::new(WorkflowPanel::new(controller)))
}

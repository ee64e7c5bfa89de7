// 🛡️ Copyright Guard - Fingerprinted works and their infringement risk
//
// Score: infringement risk. Heat and channel openness push it up,
// the protection level suppresses it exponentially.
// The fingerprint is minted once per work; re-minting is an explicit action.

use crate::controller::{Domain, PanelController};
use crate::entities::{AttributeSpec, Attributes, EntityRecord, ALL_CATEGORIES};
use crate::error::{ModuleError, PanelError};
use crate::panel::{Panel, PanelAction, PanelContext};
use crate::registry::ModuleKind;
use crate::scoring;
use chrono::Local;
use rand::{Rng, RngCore};

const CATEGORIES: [&str; 4] = ["artifact model", "art film", "digital audio", "historical document"];

const ATTRIBUTES: [AttributeSpec; 3] = [
    AttributeSpec::percent("heat", "Network heat"),
    AttributeSpec::percent("openness", "Channel openness"),
    AttributeSpec::new("protection", "Protection level", 1.0, 5.0, 1.0),
];

const WORKS: [&str; 4] = [
    "Mogao Grottoes digital topology pack",
    "Forbidden City VR scene (release build)",
    "Classic of Mountains and Seas 4K motion samples",
    "Kunqu opera heritage sound bank",
];

pub const STATUSES: [&str; 3] = ["PROTECTED", "ALERT", "BREACH"];

const SEED_COUNT: usize = 15;

/// Risk above this gets the watermark warning
const HIGH_RISK: f64 = 70.0;

const ACTIONS: [PanelAction; 1] = [PanelAction::new('F', "re-mint fingerprint")];

pub struct CopyrightDomain;

impl CopyrightDomain {
    fn work(&self, title: &str, category: &str, rng: &mut dyn RngCore) -> EntityRecord {
        let registered = Local::now().format("%Y-%m-%d %H:%M").to_string();
        let mut record = EntityRecord::draft(title, category)
            .with_field("fingerprint", scoring::fingerprint(title, rng))
            .with_field("status", STATUSES[0])
            .with_field("violations", rng.gen_range(0..=15).to_string())
            .with_field("registered_at", registered)
            .with_attribute("heat", rng.gen_range(20..=95) as f64)
            .with_attribute("openness", rng.gen_range(30..=90) as f64)
            .with_attribute("protection", rng.gen_range(1..=5) as f64);
        record.log("fingerprint anchored");
        record
    }
}

impl Domain for CopyrightDomain {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Copyright
    }

    fn id_prefix(&self) -> &'static str {
        "CPRT"
    }

    fn categories(&self) -> &'static [&'static str] {
        &CATEGORIES
    }

    fn attributes(&self) -> &'static [AttributeSpec] {
        &ATTRIBUTES
    }

    fn editable_fields(&self) -> &'static [&'static str] {
        &["status"]
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["status"]
    }

    fn normalize_field(&self, key: &str, value: &str) -> String {
        match key {
            "status" => value.trim().to_uppercase(),
            _ => value.trim().to_string(),
        }
    }

    fn score(&self, _category: &str, attrs: &Attributes, rng: &mut dyn RngCore) -> f64 {
        scoring::infringement_risk(attrs, rng)
    }

    fn seed(&self, rng: &mut dyn RngCore) -> Vec<EntityRecord> {
        (0..SEED_COUNT)
            .map(|_| {
                let title = *super::pick(&WORKS, rng);
                let category = *super::pick(&CATEGORIES, rng);
                self.work(title, category, rng)
            })
            .collect()
    }

    fn template(&self, rng: &mut dyn RngCore) -> EntityRecord {
        self.work("New protected work", CATEGORIES[1], rng)
    }
}

fn advice(risk: f64) -> &'static str {
    if risk > HIGH_RISK {
        "Alert: high heat with weak protection. Large-scale redistribution is likely; embed an on-chain watermark now."
    } else {
        "Stable: current registration covers the main distribution channels. No tampering with the fingerprint detected."
    }
}

pub struct CopyrightPanel {
    controller: PanelController,
}

impl CopyrightPanel {
    pub fn new(controller: PanelController) -> Self {
        CopyrightPanel { controller }
    }

    fn remint(&mut self) -> Result<String, PanelError> {
        let record = self
            .controller
            .update_focused("fingerprint re-minted", |record, rng| {
                let minted = scoring::fingerprint(&record.title, rng);
                record.set_field("fingerprint", minted);
            })?;
        Ok(format!("{} now {}", record.id, record.field("fingerprint")))
    }
}

impl Panel for CopyrightPanel {
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
            'F' => self.remint(),
            other => Err(PanelError::UnsupportedAction(other)),
        }
    }

    fn insights(&self) -> Vec<String> {
        let Some(record) = self.controller.focused() else {
            return Vec::new();
        };
        vec![
            format!("Infringement risk: {:.2}%", record.score),
            advice(record.score).to_string(),
            format!("Fingerprint: {}", record.field("fingerprint")),
            format!(
                "Status {} · {} suspected violations · registered {}",
                record.field("status"),
                record.field("violations"),
                record.field("registered_at")
            ),
        ]
    }

    fn headline(&self) -> Option<String> {
        let works = self.controller.list("", ALL_CATEGORIES);
        let exposed = works.iter().filter(|r| r.score > HIGH_RISK).count();
        Some(format!("{} works under guard · {} high risk", works.len(), exposed))
    }
}

pub fn load(_ctx: &PanelContext) -> Result<Box<dyn Panel>, ModuleError> {
    let controller = PanelController::new(Box::new(CopyrightDomain));
    Ok(Box::new(CopyrightPanel::new(controller)))
}

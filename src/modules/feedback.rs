// 💬 Feedback - Audience comments scored by semantic resonance
//
// The record title is the raw feedback text; its attributes are extracted
// from that text once, on intake. Replying archives the item, so it leaves
// the pending pool.

use crate::controller::{Domain, PanelController};
use crate::entities::{AttributeSpec, Attributes, EntityRecord, ALL_CATEGORIES};
use crate::error::{ModuleError, PanelError};
use crate::panel::{Panel, PanelAction, PanelContext};
use crate::registry::ModuleKind;
use crate::scoring;
use rand::RngCore;
use tracing::info;

/// Source platform doubles as the category
const PLATFORMS: [&str; 5] = ["Douyin", "Bilibili", "Xiaohongshu", "Internal beta", "API"];

const ATTRIBUTES: [AttributeSpec; 4] = [
    AttributeSpec::new("sentiment", "Sentiment", 0.0, 1.0, 0.01),
    AttributeSpec::percent("aesthetics", "Art & aesthetics"),
    AttributeSpec::percent("history", "Historical fidelity"),
    AttributeSpec::percent("interaction", "Interaction design"),
];

const USERS: [&str; 4] = ["Digital wanderer", "History keeper", "VR tester", "Culture fan_01"];

const TEXTS: [&str; 4] = [
    "The Forbidden City model is rigorous and the restoration is faithful, a real tribute!",
    "Controls lag a little; the visual effects are exquisite but performance needs work.",
    "The composition has a classical painting aesthetic, please make more quality content like this.",
    "The narrative felt disjointed; effects are maxed out but the core message got lost.",
];

const SEED_COUNT: usize = 10;

const SYNC_USER: &str = "External user X";
const SYNC_PLATFORM: &str = "API";
const SYNC_TEXT: &str = "Very rigorous content, stunning visuals.";

const ACTIONS: [PanelAction; 2] = [
    PanelAction::new('Y', "reply and archive"),
    PanelAction::new('U', "sync external sources"),
];

pub struct FeedbackDomain;

impl FeedbackDomain {
    fn intake(&self, user: &str, platform: &str, text: &str, rng: &mut dyn RngCore) -> EntityRecord {
        let mut record = EntityRecord::draft(text, platform)
            .with_field("user", user)
            .with_field("status", "pending");
        record.attributes = scoring::extract_feedback_attributes(text, rng);
        record.log(format!("received from {} via {}", user, platform));
        record
    }
}

impl Domain for FeedbackDomain {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Feedback
    }

    fn id_prefix(&self) -> &'static str {
        "FBK"
    }

    fn categories(&self) -> &'static [&'static str] {
        &PLATFORMS
    }

    fn attributes(&self) -> &'static [AttributeSpec] {
        &ATTRIBUTES
    }

    fn editable_fields(&self) -> &'static [&'static str] {
        &["user"]
    }

    fn score(&self, _category: &str, attrs: &Attributes, _rng: &mut dyn RngCore) -> f64 {
        scoring::feedback_resonance(attrs)
    }

    fn seed(&self, rng: &mut dyn RngCore) -> Vec<EntityRecord> {
        // Seeds come from the four in-house sources, never the API
        let sources = &PLATFORMS[..4];
        (0..SEED_COUNT)
            .map(|_| {
                let user = *super::pick(&USERS, rng);
                let platform = *super::pick(sources, rng);
                let text = *super::pick(&TEXTS, rng);
                self.intake(user, platform, text, rng)
            })
            .collect()
    }

    fn template(&self, rng: &mut dyn RngCore) -> EntityRecord {
        self.intake("Operator", "Internal beta", "New feedback entry", rng)
    }
}

/// Suggested reply naming the strongest dimension
pub fn reply_suggestion(attrs: &Attributes) -> String {
    format!(
        "Thank you for your attention to [{}]; we will keep improving this area.",
        scoring::primary_focus(attrs)
    )
}

pub struct FeedbackPanel {
    controller: PanelController,
}

impl FeedbackPanel {
    pub fn new(controller: PanelController) -> Self {
        FeedbackPanel { controller }
    }

    fn reply(&mut self) -> Result<String, PanelError> {
        self.controller.update_focused("reply sent, archived", |record, _| {
            record.set_field("status", "replied");
        })?;
        let archived = self.controller.delete()?;
        info!(id = %archived.id, user = archived.field("user"), "feedback replied");
        Ok(format!("{} replied and moved to history", archived.id))
    }

    fn sync(&mut self) -> Result<String, PanelError> {
        let record = {
            let rng = self.controller.rng();
            FeedbackDomain.intake(SYNC_USER, SYNC_PLATFORM, SYNC_TEXT, rng)
        };
        let inserted = self.controller.insert(record);
        info!(id = %inserted.id, "external feedback synced");
        Ok(format!("Synced 1 item from {}", SYNC_PLATFORM))
    }
}

impl Panel for FeedbackPanel {
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
            'Y' => self.reply(),
            'U' => self.sync(),
            other => Err(PanelError::UnsupportedAction(other)),
        }
    }

    fn insights(&self) -> Vec<String> {
        let Some(record) = self.controller.focused() else {
            return Vec::new();
        };
        let dims = scoring::RESONANCE_DIMENSIONS
            .iter()
            .map(|(key, label, _)| format!("{} {:.0}", label, record.attribute(key)))
            .collect::<Vec<_>>()
            .join(" · ");
        vec![
            format!("Resonance index: {:.2}", record.score),
            format!("Sentiment {:.2} · {}", record.attribute("sentiment"), dims),
            format!("Primary focus: {}", scoring::primary_focus(&record.attributes)),
            format!("From {} via {} · {}", record.field("user"), record.category, record.field("status")),
            format!("Suggested reply: {}", reply_suggestion(&record.attributes)),
        ]
    }

    fn headline(&self) -> Option<String> {
        let pending = self.controller.list("", ALL_CATEGORIES).len();
        Some(format!("{} items pending", pending))
    }
}

pub fn load(_ctx: &PanelContext) -> Result<Box<dyn Panel>, ModuleError> {
    let controller = PanelController::new(Box::new(FeedbackDomain));
    Ok(Box::new(FeedbackPanel::new(controller)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn panel() -> FeedbackPanel {
        FeedbackPanel::new(PanelController::with_rng(Box::new(FeedbackDomain), StdRng::seed_from_u64(12)))
    }

    #[test]
    fn test_seeds_are_pending_with_extracted_attributes() {
        let p = panel();
        let all = p.controller().list("", ALL_CATEGORIES);
        assert_eq!(all.len(), SEED_COUNT);
        for r in all {
            assert_eq!(r.field("status"), "pending");
            assert!(TEXTS.contains(&r.title.as_str()));
            assert_ne!(r.category, "API");
            assert!(r.attributes.contains_key("sentiment"));
            assert!(r.attributes.contains_key("interaction"));
        }
    }

    #[test]
    fn test_reply_removes_item_and_clears_focus() {
        let mut p = panel();
        let id = p.controller().list("", ALL_CATEGORIES)[0].id.clone();
        p.controller_mut().select(&id).unwrap();

        let message = p.run_action('Y').unwrap();

        assert!(message.contains(&id));
        assert!(p.controller().focused_id().is_none());
        assert_eq!(p.controller().store().len(), SEED_COUNT - 1);
        assert!(matches!(p.controller_mut().select(&id), Err(PanelError::RecordNotFound(_))));
    }

    #[test]
    fn test_reply_needs_focus() {
        let mut p = panel();
        assert!(matches!(p.run_action('Y'), Err(PanelError::NoFocus)));
        assert_eq!(p.controller().store().len(), SEED_COUNT);
    }

    #[test]
    fn test_sync_inserts_api_item_at_front() {
        let mut p = panel();
        p.run_action('U').unwrap();

        let all = p.controller().list("", ALL_CATEGORIES);
        assert_eq!(all.len(), SEED_COUNT + 1);
        assert_eq!(all[0].category, "API");
        assert_eq!(all[0].title, SYNC_TEXT);
        assert_eq!(all[0].field("user"), SYNC_USER);
        assert!(all[0].id.starts_with("FBK-"));
        assert_eq!(p.controller().list("", "API").len(), 1);
    }

    #[test]
    fn test_insights_suggest_reply_on_primary_focus() {
        let mut p = panel();
        p.run_action('U').unwrap();
        let id = p.controller().list("", "API")[0].id.clone();
        p.controller_mut().select(&id).unwrap();

        let mut attrs = p.controller().focused().unwrap().attributes.clone();
        attrs.insert("history".to_string(), 100.0);
        attrs.insert("aesthetics".to_string(), 10.0);
        attrs.insert("interaction".to_string(), 10.0);
        p.controller_mut().recompute(&attrs).unwrap();

        let lines = p.insights();
        assert_eq!(lines[2], "Primary focus: Historical fidelity");
        assert!(lines[4].contains("[Historical fidelity]"));
    }
}

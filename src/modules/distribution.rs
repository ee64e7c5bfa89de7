// 📡 Channels - Distribution nodes, one per platform account
//
// The record's category is its platform; the platform's coefficients
// {reach, depth, viral} feed the spread projection, so changing the
// platform rescores the node.

use crate::controller::{Domain, PanelController};
use crate::entities::{AttributeSpec, Attributes, EntityRecord};
use crate::error::ModuleError;
use crate::panel::{Panel, PanelContext};
use crate::registry::ModuleKind;
use crate::scoring::{self, CHANNEL_PLATFORMS};
use rand::{Rng, RngCore};

const PLATFORMS: [&str; 5] = [
    CHANNEL_PLATFORMS[0].0,
    CHANNEL_PLATFORMS[1].0,
    CHANNEL_PLATFORMS[2].0,
    CHANNEL_PLATFORMS[3].0,
    CHANNEL_PLATFORMS[4].0,
];

const ATTRIBUTES: [AttributeSpec; 3] = [
    AttributeSpec::new("budget", "Budget", 500.0, 100_000.0, 500.0),
    AttributeSpec::new("content_score", "Content quality", 1.0, 100.0, 1.0),
    AttributeSpec::percent("health", "Channel health"),
];

const ACCOUNTS: [&str; 4] = [
    "Official culture account",
    "Content studio A",
    "Matrix account 01",
    "Digital spread hub",
];

pub const RADAR_AXES: [&str; 5] = ["Reach", "Depth", "Engagement", "Conversion", "Velocity"];

pub struct DistributionDomain;

impl DistributionDomain {
    fn node(&self, platform: &str, account: &str, rng: &mut dyn RngCore) -> EntityRecord {
        let mut record = EntityRecord::draft(account, platform)
            .with_field("account", account)
            .with_field("status", "ACTIVE")
            .with_field("total_impact", rng.gen_range(10_000..=1_000_000).to_string())
            .with_attribute("budget", (rng.gen_range(4..=40) * 500) as f64)
            .with_attribute("content_score", rng.gen_range(40..=95) as f64)
            .with_attribute("health", rng.gen_range(70..=98) as f64);
        record.log("node joined the distribution hub");
        record
    }
}

impl Domain for DistributionDomain {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Distribution
    }

    fn id_prefix(&self) -> &'static str {
        "NODE"
    }

    fn categories(&self) -> &'static [&'static str] {
        &PLATFORMS
    }

    fn attributes(&self) -> &'static [AttributeSpec] {
        &ATTRIBUTES
    }

    fn editable_fields(&self) -> &'static [&'static str] {
        &["account", "status"]
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["account"]
    }

    fn score(&self, category: &str, attrs: &Attributes, rng: &mut dyn RngCore) -> f64 {
        scoring::channel_efficiency(&scoring::project_distribution(category, attrs, rng))
    }

    fn seed(&self, rng: &mut dyn RngCore) -> Vec<EntityRecord> {
        PLATFORMS
            .iter()
            .map(|platform| {
                let account = *super::pick(&ACCOUNTS, rng);
                self.node(platform, account, rng)
            })
            .collect()
    }

    fn template(&self, rng: &mut dyn RngCore) -> EntityRecord {
        self.node(PLATFORMS[0], "New distribution node", rng)
    }
}

pub struct DistributionPanel {
    controller: PanelController,
}

impl DistributionPanel {
    pub fn new(controller: PanelController) -> Self {
        DistributionPanel { controller }
    }
}

impl Panel for DistributionPanel {
    fn controller(&self) -> &PanelController {
        &self.controller
    }

    fn controller_mut(&mut self) -> &mut PanelController {
        &mut self.controller
    }

    fn insights(&self) -> Vec<String> {
        let Some(record) = self.controller.focused() else {
            return Vec::new();
        };

        let mut rng = super::view_rng(record);
        let projection = scoring::project_distribution(&record.category, &record.attributes, &mut rng);
        let profile = scoring::platform_profile(&record.category);
        let radar = RADAR_AXES
            .iter()
            .zip(projection.radar(&mut rng))
            .map(|(axis, v)| format!("{} {:.0}", axis, v))
            .collect::<Vec<_>>()
            .join(" · ");

        vec![
            format!("Channel efficiency: {:.2}", record.score),
            format!(
                "Projected reach {:.0} · engagement {:.0} · ROI {:.2} · viral {:.1}",
                projection.reach, projection.engagement, projection.roi, projection.viral_score
            ),
            format!(
                "Platform profile: reach {:.2} · depth {:.2} · viral {:.1}",
                profile.reach, profile.depth, profile.viral
            ),
            format!("Radar: {}", radar),
            format!(
                "Health {:.0}% · status {} · lifetime impact {}",
                record.attribute("health"),
                record.field("status"),
                record.field("total_impact")
            ),
        ]
    }
}

pub fn load(_ctx: &PanelContext) -> Result<Box<dyn Panel>, ModuleError> {
    let controller = PanelController::new(Box::new(DistributionDomain));
    Ok(Box::new(DistributionPanel::new(controller)))
}

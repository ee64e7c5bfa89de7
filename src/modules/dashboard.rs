// 📊 Dashboard - Priority distribution plans and the live metrics wall
//
// Records: distribution plans currently being executed, scored by the
// influence model (weighted base × time decay × ±5% noise).
// Live: a MetricsFeed delivers samples; each one refreshes the headline
// influence, the load gauge, the five-axis radar and the event log.

use crate::controller::{Domain, PanelController};
use crate::entities::{AttributeSpec, Attributes, EntityRecord};
use crate::error::ModuleError;
use crate::metrics::{MetricsFeed, MetricsSample};
use crate::panel::{Panel, PanelContext};
use crate::registry::ModuleKind;
use crate::scoring;
use rand::{Rng, RngCore};
use std::collections::VecDeque;
use tokio_util::sync::CancellationToken;

const CATEGORIES: [&str; 5] = [
    "exhibition",
    "vr experience",
    "short video",
    "publication",
    "digitization",
];

const ATTRIBUTES: [AttributeSpec; 5] = [
    AttributeSpec::percent("depth", "Content depth"),
    AttributeSpec::percent("novelty", "Novelty"),
    AttributeSpec::percent("reach", "Reach"),
    AttributeSpec::percent("interact", "Interaction"),
    AttributeSpec::new("hours_passed", "Hours since release", 0.0, 168.0, 1.0),
];

const PROJECTS: [(&str, &str); 5] = [
    ("Silk Road Digital Exhibition", "exhibition"),
    ("Sanxingdui VR Experience", "vr experience"),
    ("Tang Aesthetics Short Videos", "short video"),
    ("Forbidden City Solar Terms Album", "publication"),
    ("Mogao Murals Digitization", "digitization"),
];

pub const RADAR_AXES: [&str; 5] = ["Depth", "Novelty", "Reach", "Interaction", "Brand"];

/// Newest-first event log length
pub const EVENT_LOG_CAPACITY: usize = 30;

pub struct DashboardDomain;

impl Domain for DashboardDomain {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Dashboard
    }

    fn id_prefix(&self) -> &'static str {
        "DSH"
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

    fn score(&self, _category: &str, attrs: &Attributes, rng: &mut dyn RngCore) -> f64 {
        scoring::influence(attrs, rng)
    }

    fn seed(&self, rng: &mut dyn RngCore) -> Vec<EntityRecord> {
        PROJECTS
            .iter()
            .map(|(title, category)| {
                let mut record = EntityRecord::draft(*title, *category)
                    .with_field("status", "executing")
                    .with_attribute("depth", rng.gen_range(60..=95) as f64)
                    .with_attribute("novelty", rng.gen_range(60..=95) as f64)
                    .with_attribute("reach", rng.gen_range(60..=95) as f64)
                    .with_attribute("interact", rng.gen_range(60..=95) as f64)
                    .with_attribute("hours_passed", rng.gen_range(0..=48) as f64);
                record.log("plan entered execution");
                record
            })
            .collect()
    }

    fn template(&self, _rng: &mut dyn RngCore) -> EntityRecord {
        EntityRecord::draft("New distribution plan", CATEGORIES[0])
            .with_field("status", "draft")
            .with_attribute("depth", 50.0)
            .with_attribute("novelty", 50.0)
            .with_attribute("reach", 50.0)
            .with_attribute("interact", 50.0)
            .with_attribute("hours_passed", 0.0)
    }
}

/// Headline figures refreshed by every metrics sample
#[derive(Debug, Clone, Default)]
pub struct LiveMetrics {
    pub influence: f64,
    pub active_users: u32,
    pub system_load: u32,
    pub radar: [f64; 5],
    pub events: VecDeque<String>,
    pub samples_seen: u64,
}

pub struct DashboardPanel {
    controller: PanelController,
    feed: Option<MetricsFeed>,
    live: LiveMetrics,
}

impl DashboardPanel {
    pub fn new(controller: PanelController, feed: Option<MetricsFeed>) -> Self {
        DashboardPanel {
            controller,
            feed,
            live: LiveMetrics {
                radar: [80.0, 70.0, 90.0, 65.0, 85.0],
                ..LiveMetrics::default()
            },
        }
    }

    pub fn live(&self) -> &LiveMetrics {
        &self.live
    }

    /// Fold one sample into the headline figures
    pub fn apply_sample(&mut self, sample: &MetricsSample) {
        let rng = self.controller.rng();

        // Fixed editorial profile; only reach follows the audience
        let headline: Attributes = [
            ("depth", 90.0),
            ("novelty", 85.0),
            ("reach", (sample.active_users as f64 / 50.0).min(100.0)),
            ("interact", 75.0),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();

        self.live.influence = scoring::influence(&headline, rng);
        self.live.active_users = sample.active_users;
        self.live.system_load = sample.system_load;
        self.live.radar = [(); 5].map(|_| rng.gen_range(60..=95) as f64);
        self.live.samples_seen += 1;

        self.live.events.push_front(format!(
            "[{}] external node signal: +{} users | checks passed",
            sample.timestamp.format("%H:%M:%S"),
            rng.gen_range(5..=50)
        ));
        self.live.events.truncate(EVENT_LOG_CAPACITY);
    }
}

impl Panel for DashboardPanel {
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
        let hours = record.attribute("hours_passed");
        vec![
            format!("Influence estimate: {:.2} pts", record.score),
            format!("Status: {}", record.field("status")),
            format!("Time decay: {:.3} after {} h", (-0.02 * hours).exp(), hours),
        ]
    }

    fn headline(&self) -> Option<String> {
        let radar = RADAR_AXES
            .iter()
            .zip(self.live.radar.iter())
            .map(|(axis, v)| format!("{} {:.0}", axis, v))
            .collect::<Vec<_>>()
            .join(" · ");
        Some(format!(
            "Influence {:.2} | Active users {} | Load {}% | {}",
            self.live.influence, self.live.active_users, self.live.system_load, radar
        ))
    }

    fn tick(&mut self) {
        let samples = match self.feed.as_mut() {
            Some(feed) => feed.drain(),
            None => return,
        };
        for sample in &samples {
            self.apply_sample(sample);
        }
    }

    fn background_task(&self) -> Option<CancellationToken> {
        self.feed.as_ref().map(MetricsFeed::cancellation)
    }

    fn background_finished(&self) -> Option<CancellationToken> {
        self.feed.as_ref().map(MetricsFeed::finished)
    }
}

pub fn load(ctx: &PanelContext) -> Result<Box<dyn Panel>, ModuleError> {
    let feed = MetricsFeed::spawn(&ctx.runtime, ctx.config.dashboard.poll_interval());
    let controller = PanelController::new(Box::new(DashboardDomain));
    Ok(Box::new(DashboardPanel::new(controller, Some(feed))))
}

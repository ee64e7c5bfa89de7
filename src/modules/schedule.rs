// 🕒 Release Schedule - Time slots scored against platform traffic peaks
//
// The record's category is its platform; `minute_of_day` is the slot.
// Score: gaussian resonance with the platform's nearest peak.
// Collision: another slot on the same platform less than 90 minutes away.

use crate::controller::{Domain, PanelController};
use crate::entities::{AttributeSpec, Attributes, EntityRecord, ALL_CATEGORIES};
use crate::error::ModuleError;
use crate::panel::{Panel, PanelContext};
use crate::registry::ModuleKind;
use crate::scoring::{self, SCHEDULE_PLATFORMS};
use rand::{Rng, RngCore};

const PLATFORMS: [&str; 4] = [
    SCHEDULE_PLATFORMS[0].0,
    SCHEDULE_PLATFORMS[1].0,
    SCHEDULE_PLATFORMS[2].0,
    SCHEDULE_PLATFORMS[3].0,
];

const ATTRIBUTES: [AttributeSpec; 1] = [AttributeSpec::new(
    "minute_of_day",
    "Release time (minute of day)",
    0.0,
    1439.0,
    30.0,
)];

const PLANS: [&str; 4] = [
    "Forbidden City digital creativity contest launch",
    "Twenty-Four Solar Terms: Qingming special",
    "Sanxingdui 3D artifact restoration log",
    "Intangible heritage live stream: Suzhou embroidery",
];

const PRIORITIES: [&str; 3] = ["P0 core", "P1 routine", "P2 filler"];

const SEED_COUNT: usize = 5;

/// Slots closer than this on one platform compete for the same traffic
pub const COLLISION_WINDOW_HOURS: f64 = 1.5;

pub struct ScheduleDomain;

impl Domain for ScheduleDomain {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Schedule
    }

    fn id_prefix(&self) -> &'static str {
        "SCH"
    }

    fn categories(&self) -> &'static [&'static str] {
        &PLATFORMS
    }

    fn attributes(&self) -> &'static [AttributeSpec] {
        &ATTRIBUTES
    }

    fn editable_fields(&self) -> &'static [&'static str] {
        &["priority"]
    }

    fn score(&self, category: &str, attrs: &Attributes, _rng: &mut dyn RngCore) -> f64 {
        let minute = attrs.get("minute_of_day").copied().unwrap_or(720.0);
        scoring::resonance(category, minute)
    }

    fn seed(&self, rng: &mut dyn RngCore) -> Vec<EntityRecord> {
        (0..SEED_COUNT)
            .map(|_| {
                let title = *super::pick(&PLANS, rng);
                let platform = *super::pick(&PLATFORMS, rng);
                let minute = rng.gen_range(9..=22) * 60 + if rng.gen_bool(0.5) { 30 } else { 0 };
                let mut record = EntityRecord::draft(title, platform)
                    .with_field("priority", *super::pick(&PRIORITIES, rng))
                    .with_attribute("minute_of_day", minute as f64);
                record.log("slot modelled");
                record
            })
            .collect()
    }

    fn template(&self, _rng: &mut dyn RngCore) -> EntityRecord {
        EntityRecord::draft("New digital content release", PLATFORMS[0])
            .with_field("priority", PRIORITIES[1])
            .with_attribute("minute_of_day", 12.0 * 60.0)
    }
}

/// "HH:MM" for a minute of the day
pub fn format_minute(minute_of_day: f64) -> String {
    let total = minute_of_day.round().clamp(0.0, 1439.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Warnings for slots on the same platform within the collision window.
/// The target itself is skipped by id.
pub fn collisions<'a>(target: &EntityRecord, pool: impl IntoIterator<Item = &'a EntityRecord>) -> Vec<String> {
    let hour = target.attribute("minute_of_day") / 60.0;
    pool.into_iter()
        .filter(|other| other.id != target.id && other.category == target.category)
        .filter_map(|other| {
            let gap = (hour - other.attribute("minute_of_day") / 60.0).abs();
            (gap < COLLISION_WINDOW_HOURS).then(|| {
                format!("Too close: [{}] only {} minutes apart", other.title, (gap * 60.0).round())
            })
        })
        .collect()
}

fn advice(resonance: f64) -> &'static str {
    if resonance > 85.0 {
        "Peak traffic window: expect top algorithmic placement, lock this slot."
    } else if resonance > 65.0 {
        "Decent window: avoid competitor peaks and ride the long tail."
    } else {
        "Traffic trough: move to the nearest peak (around 12:00 or 21:00)."
    }
}

pub struct SchedulePanel {
    controller: PanelController,
}

impl SchedulePanel {
    pub fn new(controller: PanelController) -> Self {
        SchedulePanel { controller }
    }
}

impl Panel for SchedulePanel {
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

        let peaks = scoring::platform_peaks(&record.category)
            .iter()
            .map(|h| format_minute(h * 60.0))
            .collect::<Vec<_>>()
            .join(", ");

        let mut lines = vec![
            format!(
                "Release at {} on {} · resonance {:.2}%",
                format_minute(record.attribute("minute_of_day")),
                record.category,
                record.score
            ),
            format!("Platform peaks: {}", peaks),
            advice(record.score).to_string(),
        ];

        let warnings = collisions(record, self.controller.store().iter());
        if warnings.is_empty() {
            lines.push("No internal collisions in this window".to_string());
        } else {
            lines.extend(warnings);
        }
        lines
    }

    fn headline(&self) -> Option<String> {
        let slots = self.controller.list("", ALL_CATEGORIES);
        let colliding = slots
            .iter()
            .filter(|r| !collisions(r, self.controller.store().iter()).is_empty())
            .count();
        Some(format!("{} slots · {} in collision", slots.len(), colliding))
    }
}

pub fn load(_ctx: &PanelContext) -> Result<Box<dyn Panel>, ModuleError> {
    let controller = PanelController::new(Box::new(ScheduleDomain));
    Ok(Box::new(SchedulePanel::new(controller)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn panel() -> SchedulePanel {
        SchedulePanel::new(PanelController::with_rng(Box::new(ScheduleDomain), StdRng::seed_from_u64(6)))
    }

    fn slot(id: &str, platform: &str, minute: f64) -> EntityRecord {
        EntityRecord::new(id.to_string(), format!("slot {}", id), platform).with_attribute("minute_of_day", minute)
    }

    #[test]
    fn test_seeds_on_half_hours_between_nine_and_ten_pm() {
        let p = panel();
        let all = p.controller().list("", ALL_CATEGORIES);
        assert_eq!(all.len(), SEED_COUNT);
        for r in all {
            let m = r.attribute("minute_of_day");
            assert!((540.0..=1350.0).contains(&m));
            assert_eq!(m % 30.0, 0.0);
        }
    }

    #[test]
    fn test_template() {
        let mut p = panel();
        let created = p.controller_mut().create().clone();
        assert_eq!(created.title, "New digital content release");
        assert_eq!(created.category, "Douyin/TikTok");
        assert_eq!(format_minute(created.attribute("minute_of_day")), "12:00");
        assert_eq!(p.controller().list("", ALL_CATEGORIES)[0].id, created.id);
    }

    #[test]
    fn test_collisions_same_platform_within_window() {
        let target = slot("A", "Bilibili", 12.0 * 60.0);
        let pool = vec![
            target.clone(),
            slot("B", "Bilibili", 13.0 * 60.0),
            slot("C", "Bilibili", 13.5 * 60.0),
            slot("D", "Xiaohongshu/RED", 12.0 * 60.0),
        ];

        let warnings = collisions(&target, &pool);
        assert_eq!(warnings, vec!["Too close: [slot B] only 60 minutes apart".to_string()]);
    }

    #[test]
    fn test_moving_slot_rescores() {
        let mut p = panel();
        let id = p.controller_mut().create().id.clone();
        p.controller_mut().select(&id).unwrap();

        let trough: Attributes = [("minute_of_day".to_string(), 180.0)].into_iter().collect();
        let low = p.controller_mut().recompute(&trough).unwrap();
        assert!(p.insights()[2].starts_with("Traffic trough"));

        let peak: Attributes = [("minute_of_day".to_string(), 1290.0)].into_iter().collect();
        let high = p.controller_mut().recompute(&peak).unwrap();
        assert!(high > low);
        assert_eq!(high, 100.0);
        assert!(p.insights()[2].starts_with("Peak traffic"));
    }

    #[test]
    fn test_format_minute() {
        assert_eq!(format_minute(0.0), "00:00");
        assert_eq!(format_minute(570.0), "09:30");
        assert_eq!(format_minute(1439.0), "23:59");
    }
}

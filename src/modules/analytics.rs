// 📈 Data Insights - Attribution reports: was it the content or the channel?
//
// Score: momentum, the residual influence expected over the next 24h.
// Extras:
// - global recalibration: every report gains 100..1000 views, then rescores
// - CSV export of the focused report into the configured export directory

use crate::controller::{Domain, PanelController};
use crate::entities::{AttributeSpec, Attributes, EntityRecord, ALL_CATEGORIES};
use crate::error::{ModuleError, PanelError, StorageError};
use crate::panel::{Panel, PanelAction, PanelContext};
use crate::registry::ModuleKind;
use crate::scoring;
use chrono::Utc;
use rand::{Rng, RngCore};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

const CATEGORIES: [&str; 4] = [
    "visual art",
    "digital heritage",
    "historical deconstruction",
    "interactive experience",
];

const ATTRIBUTES: [AttributeSpec; 4] = [
    AttributeSpec::new("views", "Views", 0.0, 1_000_000.0, 1_000.0),
    AttributeSpec::new("engagement", "Engagements", 0.0, 100_000.0, 100.0),
    AttributeSpec::new("sentiment", "Sentiment", 0.0, 1.0, 0.05),
    AttributeSpec::percent("culture_depth", "Cultural depth"),
];

const TITLES: [&str; 4] = [
    "Forbidden City snow scene attribution",
    "Classic of Mountains and Seas illustration sentiment",
    "Heritage documentary efficiency",
    "Dunhuang AR hall spread analysis",
];

const SEED_COUNT: usize = 8;

const ACTIONS: [PanelAction; 2] = [
    PanelAction::new('G', "recalibrate all reports"),
    PanelAction::new('E', "export report as CSV"),
];

pub struct AnalyticsDomain;

impl Domain for AnalyticsDomain {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Analytics
    }

    fn id_prefix(&self) -> &'static str {
        "ANL"
    }

    fn categories(&self) -> &'static [&'static str] {
        &CATEGORIES
    }

    fn attributes(&self) -> &'static [AttributeSpec] {
        &ATTRIBUTES
    }

    fn score(&self, _category: &str, attrs: &Attributes, _rng: &mut dyn RngCore) -> f64 {
        scoring::attribution(attrs).momentum
    }

    fn seed(&self, rng: &mut dyn RngCore) -> Vec<EntityRecord> {
        (0..SEED_COUNT)
            .map(|_| {
                let title = *super::pick(&TITLES, rng);
                let category = *super::pick(&CATEGORIES, rng);
                let sentiment: f64 = rng.gen_range(0.3..=0.95);
                let mut record = EntityRecord::draft(title, category)
                    .with_attribute("views", rng.gen_range(5_000..=100_000) as f64)
                    .with_attribute("engagement", rng.gen_range(200..=8_000) as f64)
                    .with_attribute("sentiment", (sentiment * 100.0).round() / 100.0)
                    .with_attribute("culture_depth", rng.gen_range(40..=95) as f64);
                record.log("spread features captured and attributed");
                record
            })
            .collect()
    }

    fn template(&self, _rng: &mut dyn RngCore) -> EntityRecord {
        EntityRecord::draft("New attribution report", CATEGORIES[0])
            .with_attribute("views", 10_000.0)
            .with_attribute("engagement", 500.0)
            .with_attribute("sentiment", 0.6)
            .with_attribute("culture_depth", 50.0)
    }
}

/// One exported report row
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
    views: f64,
    engagement: f64,
    sentiment: f64,
    culture_depth: f64,
    quality_index: f64,
    culture_drive: f64,
    channel_drive: f64,
    momentum: f64,
    exported_at: String,
}

/// Write `record` as a single-row CSV named after its id
pub fn export_report(record: &EntityRecord, dir: &Path) -> Result<PathBuf, StorageError> {
    let result = scoring::attribution(&record.attributes);
    let path = dir.join(format!("{}.csv", record.id));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.serialize(ReportRow {
        id: &record.id,
        title: &record.title,
        category: &record.category,
        views: record.attribute("views"),
        engagement: record.attribute("engagement"),
        sentiment: record.attribute("sentiment"),
        culture_depth: record.attribute("culture_depth"),
        quality_index: result.quality_index,
        culture_drive: result.culture_drive,
        channel_drive: result.channel_drive,
        momentum: result.momentum,
        exported_at: Utc::now().to_rfc3339(),
    })?;
    writer.flush()?;

    info!(path = %path.display(), "report exported");
    Ok(path)
}

pub struct AnalyticsPanel {
    controller: PanelController,
    export_dir: PathBuf,
}

impl AnalyticsPanel {
    pub fn new(controller: PanelController, export_dir: impl Into<PathBuf>) -> Self {
        AnalyticsPanel {
            controller,
            export_dir: export_dir.into(),
        }
    }

    fn recalibrate(&mut self) -> Result<String, PanelError> {
        let views = ATTRIBUTES[0];
        self.controller
            .update_all("global recalibration", |record, rng| {
                let bumped = record.attribute("views") + rng.gen_range(100..=1000) as f64;
                record.attributes.insert(views.key.to_string(), views.clamp(bumped));
            });
        Ok(format!("{} reports recalibrated", self.controller.store().len()))
    }

    fn export(&mut self) -> Result<String, PanelError> {
        let record = self.controller.focused().ok_or(PanelError::NoFocus)?;
        let path = export_report(record, &self.export_dir)?;
        self.controller
            .update_focused(&format!("exported to {}", path.display()), |_, _| {})?;
        Ok(format!("Report exported to {}", path.display()))
    }
}

impl Panel for AnalyticsPanel {
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
            'G' => self.recalibrate(),
            'E' => self.export(),
            other => Err(PanelError::UnsupportedAction(other)),
        }
    }

    fn insights(&self) -> Vec<String> {
        let Some(record) = self.controller.focused() else {
            return Vec::new();
        };
        let result = scoring::attribution(&record.attributes);
        vec![
            format!("Momentum (next 24h): {:.2}", result.momentum),
            format!("Quality index: {:.2}", result.quality_index),
            format!(
                "Attribution: culture {:.1}% · channel {:.1}%",
                result.culture_drive, result.channel_drive
            ),
            format!(
                "Views {:.0} · engagements {:.0} · sentiment {:.2}",
                record.attribute("views"),
                record.attribute("engagement"),
                record.attribute("sentiment")
            ),
        ]
    }

    fn headline(&self) -> Option<String> {
        let reports = self.controller.list("", ALL_CATEGORIES);
        if reports.is_empty() {
            return None;
        }
        let mean = reports.iter().map(|r| r.score).sum::<f64>() / reports.len() as f64;
        Some(format!("{} reports · mean momentum {:.2}", reports.len(), mean))
    }
}

pub fn load(ctx: &PanelContext) -> Result<Box<dyn Panel>, ModuleError> {
    let controller = PanelController::new(Box::new(AnalyticsDomain));
    Ok(Box::new(AnalyticsPanel::new(controller, ctx.config.storage.export_dir.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn panel(dir: &Path) -> AnalyticsPanel {
        AnalyticsPanel::new(
            PanelController::with_rng(Box::new(AnalyticsDomain), StdRng::seed_from_u64(9)),
            dir,
        )
    }

    #[test]
    fn test_seeds_eight_reports() {
        let dir = tempfile::tempdir().unwrap();
        let p = panel(dir.path());
        assert_eq!(p.controller().store().len(), SEED_COUNT);
        assert!(p.headline().unwrap().starts_with("8 reports"));
    }

    #[test]
    fn test_recalibrate_adds_views_to_every_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = panel(dir.path());
        let before: Vec<f64> = p.controller().store().iter().map(|r| r.attribute("views")).collect();

        p.run_action('G').unwrap();

        for (record, old) in p.controller().store().iter().zip(before) {
            let gained = record.attribute("views") - old;
            assert!((100.0..=1000.0).contains(&gained));
            assert_eq!(record.history.last().unwrap().message, "global recalibration");
        }
    }

    #[test]
    fn test_export_writes_header_and_one_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = panel(dir.path());
        let id = p.controller().store().iter().next().unwrap().id.clone();
        p.controller_mut().select(&id).unwrap();

        p.run_action('E').unwrap();

        let mut reader = csv::Reader::from_path(dir.path().join(format!("{}.csv", id))).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "id");
        assert_eq!(&headers[10], "momentum");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], id.as_str());
    }

    #[test]
    fn test_export_into_missing_dir_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = panel(&dir.path().join("nope"));
        let id = p.controller().store().iter().next().unwrap().id.clone();
        p.controller_mut().select(&id).unwrap();

        assert!(matches!(p.run_action('E'), Err(PanelError::Storage(_))));
    }

    #[test]
    fn test_export_needs_focus() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = panel(dir.path());
        assert!(matches!(p.run_action('E'), Err(PanelError::NoFocus)));
    }
}

// 🗄️ Asset Library - Digitized cultural assets and their valuation
//
// Score: scarcity-weighted valuation with a logarithmic boost for assets
// that have been archived for a long time.
// Tags are edited as a comma separated list and stored normalized.

use crate::controller::{Domain, PanelController};
use crate::entities::{AttributeSpec, Attributes, EntityRecord};
use crate::error::ModuleError;
use crate::panel::{Panel, PanelContext};
use crate::registry::ModuleKind;
use crate::scoring;
use rand::{Rng, RngCore};

const CATEGORIES: [&str; 4] = ["artifact 3d", "audio sample", "visual material", "document scan"];

const ATTRIBUTES: [AttributeSpec; 5] = [
    AttributeSpec::percent("scarcity", "Scarcity"),
    AttributeSpec::percent("technical", "Technical quality"),
    AttributeSpec::percent("heritage", "Heritage value"),
    AttributeSpec::percent("potential", "Market potential"),
    AttributeSpec::new("duration_months", "Months archived", 0.0, 120.0, 1.0),
];

const SAMPLES: [&str; 5] = [
    "Mogao Northern Wei mural capture",
    "Guqin open-string long sample",
    "Forbidden City architecture topology",
    "Yongle Encyclopedia fragment scan",
    "Shadow puppet motion capture pack",
];

const EXTENSIONS: [&str; 5] = [".GLB", ".WAV", ".TIFF", ".MP4", ".FBX"];

const SEED_COUNT: usize = 35;

pub struct ResourcesDomain;

impl ResourcesDomain {
    fn asset(&self, title: String, category: &str, rng: &mut dyn RngCore) -> EntityRecord {
        let mut record = EntityRecord::draft(title, category)
            .with_field("extension", *super::pick(&EXTENSIONS, rng))
            .with_field("file_size", format!("{} MB", rng.gen_range(200..=10240)))
            .with_field("tags", "core archive, digital transfer")
            .with_field("encrypted", "yes")
            .with_attribute("scarcity", rng.gen_range(35..=98) as f64)
            .with_attribute("technical", rng.gen_range(60..=99) as f64)
            .with_attribute("heritage", rng.gen_range(30..=95) as f64)
            .with_attribute("potential", rng.gen_range(40..=90) as f64)
            .with_attribute("duration_months", rng.gen_range(0..=72) as f64);
        record.log("asset mounted");
        record
    }
}

impl Domain for ResourcesDomain {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Resources
    }

    fn id_prefix(&self) -> &'static str {
        "RES"
    }

    fn categories(&self) -> &'static [&'static str] {
        &CATEGORIES
    }

    fn attributes(&self) -> &'static [AttributeSpec] {
        &ATTRIBUTES
    }

    fn editable_fields(&self) -> &'static [&'static str] {
        &["tags", "encrypted"]
    }

    /// Tags: split on commas, trim, drop empties
    fn normalize_field(&self, key: &str, value: &str) -> String {
        match key {
            "tags" => split_tags(value).join(", "),
            _ => value.trim().to_string(),
        }
    }

    fn score(&self, _category: &str, attrs: &Attributes, rng: &mut dyn RngCore) -> f64 {
        scoring::asset_valuation(attrs, rng)
    }

    fn seed(&self, rng: &mut dyn RngCore) -> Vec<EntityRecord> {
        (0..SEED_COUNT)
            .map(|i| {
                let title = format!("{}-{:03}", super::pick(&SAMPLES, rng), i);
                let category = *super::pick(&CATEGORIES, rng);
                self.asset(title, category, rng)
            })
            .collect()
    }

    fn template(&self, rng: &mut dyn RngCore) -> EntityRecord {
        self.asset("New asset intake".to_string(), "document scan", rng)
    }
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct ResourcesPanel {
    controller: PanelController,
}

impl ResourcesPanel {
    pub fn new(controller: PanelController) -> Self {
        ResourcesPanel { controller }
    }
}

impl Panel for ResourcesPanel {
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
        let months = record.attribute("duration_months");
        vec![
            format!("Valuation index: {:.2}", record.score),
            format!("Archive boost: ×{:.3} after {} months", 1.0 + (months / 12.0).ln_1p() * 0.22, months),
            format!(
                "File: {} · {} · encrypted: {}",
                record.field("extension"),
                record.field("file_size"),
                record.field("encrypted")
            ),
            format!("Tags: [{}]", split_tags(record.field("tags")).join("] [")),
        ]
    }
}

pub fn load(_ctx: &PanelContext) -> Result<Box<dyn Panel>, ModuleError> {
    let controller = PanelController::new(Box::new(ResourcesDomain));
    Ok(Box::new(ResourcesPanel::new(controller)))
}

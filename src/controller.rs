// 🎛️ Panel Controller - The CRUD state machine every business panel shares
//
// A panel = one Domain (what the records mean) + one PanelController (how
// they are listed, focused, edited, created and deleted).
//
// States: Idle (no focus) <-> Focused(id)
//   select(id)  Idle|Focused -> Focused(id)
//   delete()    Focused -> Idle
//   recompute() / save() keep the focus
//
// Every mutating operation validates first and writes second, so a
// rejected edit leaves the record exactly as it was.

use crate::entities::{generate_id, AttributeSpec, Attributes, EntityRecord, RecordStore};
use crate::error::PanelError;
use crate::registry::ModuleKind;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::BTreeMap;
use tracing::{info, warn};

// ============================================================================
// DOMAIN
// ============================================================================

/// What a business module's records are: categories, attributes, scoring,
/// seed data and the template used by `create`.
pub trait Domain {
    fn kind(&self) -> ModuleKind;

    /// Prefix for generated ids, e.g. "RES"
    fn id_prefix(&self) -> &'static str;

    /// Allowed values of `EntityRecord::category`
    fn categories(&self) -> &'static [&'static str];

    fn attributes(&self) -> &'static [AttributeSpec];

    /// Display fields `save` accepts
    fn editable_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Editable fields that may not be saved blank
    fn required_fields(&self) -> &'static [&'static str] {
        &[]
    }

    /// Canonical form of a saved display field
    fn normalize_field(&self, _key: &str, value: &str) -> String {
        value.trim().to_string()
    }

    fn score(&self, category: &str, attrs: &Attributes, rng: &mut dyn RngCore) -> f64;

    /// Records present when the panel is constructed. Ids are assigned by
    /// the controller.
    fn seed(&self, rng: &mut dyn RngCore) -> Vec<EntityRecord>;

    /// Record inserted by `create`
    fn template(&self, rng: &mut dyn RngCore) -> EntityRecord;
}

/// Title, category and display fields as edited in the detail form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayEdits {
    pub title: String,
    /// None keeps the current category
    pub category: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl DisplayEdits {
    pub fn new(title: impl Into<String>) -> Self {
        DisplayEdits {
            title: title.into(),
            category: None,
            fields: BTreeMap::new(),
        }
    }

    /// Start from a record's current values
    pub fn from_record(record: &EntityRecord) -> Self {
        DisplayEdits {
            title: record.title.clone(),
            category: Some(record.category.clone()),
            fields: record.fields.clone(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

pub struct PanelController {
    domain: Box<dyn Domain>,
    store: RecordStore,
    focus: Option<String>,
    rng: StdRng,
}

impl PanelController {
    pub fn new(domain: Box<dyn Domain>) -> Self {
        PanelController::with_rng(domain, StdRng::from_entropy())
    }

    /// Seeded construction; scores and seed data become reproducible
    pub fn with_rng(domain: Box<dyn Domain>, mut rng: StdRng) -> Self {
        let seeds = domain.seed(&mut rng);
        let mut records: Vec<EntityRecord> = Vec::with_capacity(seeds.len());

        for mut record in seeds {
            record.id = fresh_id(domain.id_prefix(), |id| records.iter().any(|r| r.id == id));
            record.score = domain.score(&record.category, &record.attributes, &mut rng);
            records.push(record);
        }

        PanelController {
            domain,
            store: RecordStore::from_records(records),
            focus: None,
            rng,
        }
    }

    pub fn domain(&self) -> &dyn Domain {
        self.domain.as_ref()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn context(&self) -> &'static str {
        self.domain.kind().name()
    }

    fn reject(&self, field: &str, message: impl Into<String>) -> PanelError {
        let message = message.into();
        warn!(module = self.context(), field, %message, "edit rejected");
        PanelError::validation(field, message, self.context())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Records matching `text` (id or title) and `category`, in store order
    pub fn list(&self, text: &str, category: &str) -> Vec<&EntityRecord> {
        self.store.filter(text, category)
    }

    /// Focus a record. On failure the current focus is unchanged.
    pub fn select(&mut self, id: &str) -> Result<&EntityRecord, PanelError> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| PanelError::RecordNotFound(id.to_string()))?;
        self.focus = Some(record.id.clone());
        Ok(record)
    }

    pub fn focused(&self) -> Option<&EntityRecord> {
        self.focus.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    fn require_focus(&self) -> Result<String, PanelError> {
        let id = self.focus.clone().ok_or(PanelError::NoFocus)?;
        if !self.store.contains(&id) {
            return Err(PanelError::RecordNotFound(id));
        }
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Apply numeric edits to the focused record and rescore it.
    /// Unknown attribute names and non-numeric values reject the whole
    /// batch; out-of-range values are clamped to their spec bounds.
    pub fn recompute(&mut self, edits: &Attributes) -> Result<f64, PanelError> {
        let id = self.require_focus()?;

        let mut staged = Vec::with_capacity(edits.len());
        for (key, value) in edits {
            let spec = self
                .domain
                .attributes()
                .iter()
                .find(|s| s.key == key.as_str())
                .ok_or_else(|| self.reject(key, "unknown attribute"))?;
            if !value.is_finite() {
                return Err(self.reject(key, "value is not a number"));
            }
            staged.push((key.clone(), spec.clamp(*value)));
        }

        let record = self
            .store
            .get_mut(&id)
            .ok_or_else(|| PanelError::RecordNotFound(id.clone()))?;
        for (key, value) in staged {
            record.attributes.insert(key, value);
        }
        record.score = self.domain.score(&record.category, &record.attributes, &mut self.rng);
        record.log(format!("score recomputed: {:.2}", record.score));

        info!(module = self.domain.kind().name(), id = %id, score = record.score, "recomputed");
        Ok(record.score)
    }

    /// Write title, category and display fields of the focused record.
    /// Rescores when the category changes.
    pub fn save(&mut self, edits: &DisplayEdits) -> Result<(), PanelError> {
        let id = self.require_focus()?;

        let title = edits.title.trim();
        if title.is_empty() {
            return Err(self.reject("title", "required field is empty"));
        }
        if let Some(category) = &edits.category {
            if !self.domain.categories().contains(&category.as_str()) {
                return Err(self.reject(
                    "category",
                    format!("'{}' is not one of {}", category, self.domain.categories().join(", ")),
                ));
            }
        }
        let current = self
            .store
            .get(&id)
            .ok_or_else(|| PanelError::RecordNotFound(id.clone()))?;
        let mut fields = Vec::with_capacity(edits.fields.len());
        for (key, value) in &edits.fields {
            if !self.domain.editable_fields().contains(&key.as_str()) {
                // Read-only fields may ride along unchanged
                if current.field(key) != value.as_str() {
                    return Err(self.reject(key, "field is read-only"));
                }
                continue;
            }
            if self.domain.required_fields().contains(&key.as_str()) && value.trim().is_empty() {
                return Err(self.reject(key, "required field is empty"));
            }
            fields.push((key.clone(), self.domain.normalize_field(key, value)));
        }

        let record = self
            .store
            .get_mut(&id)
            .ok_or_else(|| PanelError::RecordNotFound(id.clone()))?;

        record.title = title.to_string();
        let category_changed = match &edits.category {
            Some(category) if *category != record.category => {
                record.category = category.clone();
                true
            }
            _ => false,
        };
        for (key, value) in fields {
            record.set_field(&key, value);
        }
        if category_changed {
            record.score = self.domain.score(&record.category, &record.attributes, &mut self.rng);
        }
        record.log(format!("saved \"{}\"", record.title));

        info!(module = self.domain.kind().name(), id = %id, "saved");
        Ok(())
    }

    /// Mutate the focused record in place and log `message`.
    /// Used by module-specific actions (approve, reply, snapshot load, ...).
    /// The score is only redrawn when the attributes changed.
    pub fn update_focused<F>(&mut self, message: &str, apply: F) -> Result<&EntityRecord, PanelError>
    where
        F: FnOnce(&mut EntityRecord, &mut dyn RngCore),
    {
        let id = self.require_focus()?;
        let record = self
            .store
            .get_mut(&id)
            .ok_or_else(|| PanelError::RecordNotFound(id.clone()))?;

        let before = record.attributes.clone();
        apply(&mut *record, &mut self.rng);
        if record.attributes != before {
            record.score = self.domain.score(&record.category, &record.attributes, &mut self.rng);
        }
        record.log(message);
        Ok(&*record)
    }

    /// Mutate every record and log `message`, rescoring those whose attributes moved
    pub fn update_all<F>(&mut self, message: &str, mut apply: F)
    where
        F: FnMut(&mut EntityRecord, &mut dyn RngCore),
    {
        for record in self.store.iter_mut() {
            let before = record.attributes.clone();
            apply(&mut *record, &mut self.rng);
            if record.attributes != before {
                record.score = self.domain.score(&record.category, &record.attributes, &mut self.rng);
            }
            record.log(message);
        }
    }

    // ------------------------------------------------------------------
    // Create / Delete
    // ------------------------------------------------------------------

    /// Insert the module's template at the front. Focus is unchanged.
    pub fn create(&mut self) -> &EntityRecord {
        let mut record = self.domain.template(&mut self.rng);
        record.log("created from template");
        self.insert(record)
    }

    /// Insert an externally built record at the front with a fresh id
    pub fn insert(&mut self, mut record: EntityRecord) -> &EntityRecord {
        let store = &self.store;
        record.id = fresh_id(self.domain.id_prefix(), |id| store.contains(id));
        record.score = self.domain.score(&record.category, &record.attributes, &mut self.rng);

        info!(module = self.domain.kind().name(), id = %record.id, "created");
        self.store.insert_front(record)
    }

    /// Remove the focused record and clear the focus
    pub fn delete(&mut self) -> Result<EntityRecord, PanelError> {
        let id = self.require_focus()?;
        let removed = self
            .store
            .remove(&id)
            .ok_or_else(|| PanelError::RecordNotFound(id.clone()))?;
        self.focus = None;

        info!(module = self.domain.kind().name(), id = %id, "deleted");
        Ok(removed)
    }
}

/// Draw ids until one is not taken
fn fresh_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = generate_id(prefix);
        if !taken(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ALL_CATEGORIES;

    /// Score = attribute "a", so expectations are exact
    struct Fixture;

    const SPECS: [AttributeSpec; 2] = [
        AttributeSpec::percent("a", "A"),
        AttributeSpec::new("b", "B", 1.0, 5.0, 1.0),
    ];

    impl Domain for Fixture {
        fn kind(&self) -> ModuleKind {
            ModuleKind::Resources
        }
        fn id_prefix(&self) -> &'static str {
            "FIX"
        }
        fn categories(&self) -> &'static [&'static str] {
            &["categoryX", "categoryY"]
        }
        fn attributes(&self) -> &'static [AttributeSpec] {
            &SPECS
        }
        fn editable_fields(&self) -> &'static [&'static str] {
            &["owner", "note"]
        }
        fn required_fields(&self) -> &'static [&'static str] {
            &["owner"]
        }
        fn score(&self, category: &str, attrs: &Attributes, _rng: &mut dyn RngCore) -> f64 {
            let bonus = if category == "categoryY" { 1.0 } else { 0.0 };
            crate::scoring::clamp_score(attrs.get("a").copied().unwrap_or(0.0) + bonus)
        }
        fn seed(&self, _rng: &mut dyn RngCore) -> Vec<EntityRecord> {
            vec![
                EntityRecord::draft("Alpha", "categoryX").with_attribute("a", 92.0),
                EntityRecord::draft("Beta", "categoryY").with_attribute("a", 39.0),
            ]
        }
        fn template(&self, _rng: &mut dyn RngCore) -> EntityRecord {
            EntityRecord::draft("New record", "categoryX").with_attribute("a", 10.0)
        }
    }

    fn controller() -> PanelController {
        PanelController::with_rng(Box::new(Fixture), StdRng::seed_from_u64(1))
    }

    fn first_id(c: &PanelController) -> String {
        c.list("", ALL_CATEGORIES)[0].id.clone()
    }

    #[test]
    fn test_seeds_are_scored_and_identified() {
        let c = controller();
        let all = c.list("", ALL_CATEGORIES);

        assert_eq!(all.len(), 2);
        assert!(all[0].id.starts_with("FIX-"));
        assert_ne!(all[0].id, all[1].id);
        assert_eq!(all[0].score, 92.0);
        assert_eq!(all[1].score, 40.0);
    }

    #[test]
    fn test_list_by_category() {
        let c = controller();
        let result = c.list("", "categoryX");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Alpha");
        assert_eq!(result[0].score, 92.0);
    }

    #[test]
    fn test_select_unknown_keeps_focus() {
        let mut c = controller();
        let id = first_id(&c);
        c.select(&id).unwrap();

        let err = c.select("FIX-NOPE").unwrap_err();
        assert!(matches!(err, PanelError::RecordNotFound(_)));
        assert_eq!(c.focused_id(), Some(id.as_str()));
    }

    #[test]
    fn test_mutations_require_focus() {
        let mut c = controller();
        assert!(matches!(c.recompute(&Attributes::new()), Err(PanelError::NoFocus)));
        assert!(matches!(c.save(&DisplayEdits::new("x")), Err(PanelError::NoFocus)));
        assert!(matches!(c.delete(), Err(PanelError::NoFocus)));
    }

    #[test]
    fn test_recompute_clamps_and_logs() {
        let mut c = controller();
        let id = first_id(&c);
        c.select(&id).unwrap();

        let edits: Attributes = [("a".to_string(), 250.0), ("b".to_string(), 0.0)].into_iter().collect();
        let score = c.recompute(&edits).unwrap();

        let record = c.focused().unwrap();
        assert_eq!(score, 100.0);
        assert_eq!(record.attribute("a"), 100.0);
        assert_eq!(record.attribute("b"), 1.0);
        assert_eq!(record.history.len(), 1);
    }

    #[test]
    fn test_recompute_rejects_whole_batch() {
        let mut c = controller();
        let id = first_id(&c);
        c.select(&id).unwrap();

        let edits: Attributes = [("a".to_string(), 5.0), ("zzz".to_string(), 1.0)].into_iter().collect();
        let err = c.recompute(&edits).unwrap_err();

        assert!(matches!(err, PanelError::Validation { .. }));
        let record = c.focused().unwrap();
        assert_eq!(record.attribute("a"), 92.0);
        assert!(record.history.is_empty());

        let nan: Attributes = [("a".to_string(), f64::NAN)].into_iter().collect();
        assert!(c.recompute(&nan).is_err());
        assert_eq!(c.focused().unwrap().attribute("a"), 92.0);
    }

    #[test]
    fn test_save_then_select_shows_title() {
        let mut c = controller();
        let id = first_id(&c);
        c.select(&id).unwrap();

        c.save(&DisplayEdits::new("  Renamed  ").with_field("owner", "curation"))
            .unwrap();

        c.clear_focus();
        let record = c.select(&id).unwrap();
        assert_eq!(record.title, "Renamed");
        assert_eq!(record.field("owner"), "curation");
    }

    #[test]
    fn test_save_rejections_leave_record_unchanged() {
        let mut c = controller();
        let id = first_id(&c);
        c.select(&id).unwrap();

        let blank = c.save(&DisplayEdits::new("   ")).unwrap_err();
        assert!(blank.to_string().contains("title"));

        let bad_category = c.save(&DisplayEdits::new("Ok").with_category("categoryZ"));
        assert!(matches!(bad_category, Err(PanelError::Validation { .. })));

        let read_only = c.save(&DisplayEdits::new("Ok").with_field("secret", "x"));
        assert!(read_only.unwrap_err().to_string().contains("read-only"));

        let required = c.save(&DisplayEdits::new("Ok").with_field("owner", " "));
        assert!(required.is_err());

        let record = c.focused().unwrap();
        assert_eq!(record.title, "Alpha");
        assert_eq!(record.category, "categoryX");
        assert!(record.fields.is_empty());
        assert!(record.history.is_empty());
    }

    #[test]
    fn test_category_change_rescores() {
        let mut c = controller();
        let id = first_id(&c);
        c.select(&id).unwrap();

        c.save(&DisplayEdits::new("Alpha").with_category("categoryY")).unwrap();
        assert_eq!(c.focused().unwrap().score, 93.0);
    }

    #[test]
    fn test_create_inserts_at_front_without_focus_change() {
        let mut c = controller();
        let id = first_id(&c);
        c.select(&id).unwrap();

        let created = c.create().id.clone();

        let all = c.list("", ALL_CATEGORIES);
        assert_eq!(all[0].id, created);
        assert_eq!(all[0].score, 10.0);
        assert_eq!(all.len(), 3);
        assert_eq!(c.focused_id(), Some(id.as_str()));
    }

    #[test]
    fn test_delete_then_select_is_not_found() {
        let mut c = controller();
        let id = first_id(&c);
        c.select(&id).unwrap();

        let removed = c.delete().unwrap();
        assert_eq!(removed.id, id);
        assert!(c.focused_id().is_none());
        assert!(matches!(c.select(&id), Err(PanelError::RecordNotFound(_))));
        assert_eq!(c.store().len(), 1);
    }

    #[test]
    fn test_update_focused_rescores_and_logs() {
        let mut c = controller();
        let id = first_id(&c);
        c.select(&id).unwrap();

        let record = c
            .update_focused("bumped", |r, _| {
                r.attributes.insert("a".to_string(), 12.0);
            })
            .unwrap();
        assert_eq!(record.score, 12.0);
        assert_eq!(record.history.last().unwrap().message, "bumped");
    }

    #[test]
    fn test_update_focused_text_only_keeps_score() {
        let mut c = controller();
        let id = first_id(&c);
        c.select(&id).unwrap();

        // A stale score survives because no attribute moved
        let record = c
            .update_focused("noted", |r, _| {
                r.score = 77.0;
                r.set_field("note", "checked");
            })
            .unwrap();
        assert_eq!(record.score, 77.0);
        assert_eq!(record.field("note"), "checked");
        assert_eq!(record.history.last().unwrap().message, "noted");
    }

    #[test]
    fn test_update_all_touches_every_record() {
        let mut c = controller();
        c.update_all("reset", |r, _| {
            r.attributes.insert("a".to_string(), 0.0);
        });
        assert!(c.list("", ALL_CATEGORIES).iter().all(|r| r.score <= 1.0));
    }
}

// Entity Models - the record every business panel stores, and the store itself
//
// Each record has:
// - Stable identity (generated id) that never changes
// - Values (title, category, fields, numeric attributes) edited by the user
// - A derived score and an append-only history

pub mod record;
pub mod store;

pub use record::{generate_id, AttributeSpec, Attributes, EntityRecord, HistoryEntry};
pub use store::{RecordStore, ALL_CATEGORIES};

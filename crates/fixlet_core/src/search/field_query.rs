//! Field-equality query over the record store.
//!
//! # Responsibility
//! - Map query field names to record field accessors.
//! - Filter records by exact, case-sensitive field equality.
//!
//! # Invariants
//! - Unknown field names select nothing; they never raise an error.
//! - Results keep the store's current order.

use crate::model::record::FixletRecord;
use crate::repo::record_store::RecordStore;
use log::debug;

/// Reads one string field from a record.
pub type FieldAccessor = fn(&FixletRecord) -> &str;

/// Record fields that can be matched by `query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    SiteId,
    FixletId,
    Name,
    Criticality,
}

impl QueryField {
    /// Canonical snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SiteId => "site_id",
            Self::FixletId => "fixlet_id",
            Self::Name => "name",
            Self::Criticality => "criticality",
        }
    }

    pub fn accessor(self) -> FieldAccessor {
        match self {
            Self::SiteId => site_id,
            Self::FixletId => fixlet_id,
            Self::Name => name,
            Self::Criticality => criticality,
        }
    }
}

/// Accepted field names, snake_case first, then the file header spelling.
const QUERY_FIELD_NAMES: &[(&str, QueryField)] = &[
    ("site_id", QueryField::SiteId),
    ("fixlet_id", QueryField::FixletId),
    ("name", QueryField::Name),
    ("criticality", QueryField::Criticality),
    ("SiteID", QueryField::SiteId),
    ("FixletID", QueryField::FixletId),
    ("Name", QueryField::Name),
    ("Criticality", QueryField::Criticality),
];

/// Resolves a field name to its queryable field, if any.
pub fn parse_query_field(field_name: &str) -> Option<QueryField> {
    QUERY_FIELD_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == field_name)
        .map(|(_, field)| *field)
}

/// Returns every record whose `field_name` field equals `value` exactly.
///
/// An unrecognized `field_name` yields an empty result.
pub fn query<'a>(store: &'a RecordStore, field_name: &str, value: &str) -> Vec<&'a FixletRecord> {
    let Some(field) = parse_query_field(field_name) else {
        debug!("event=query module=search status=ok field=unknown hits=0");
        return Vec::new();
    };

    let accessor = field.accessor();
    let hits: Vec<&FixletRecord> = store
        .all()
        .iter()
        .filter(|record| accessor(*record) == value)
        .collect();

    debug!(
        "event=query module=search status=ok field={} hits={}",
        field.as_str(),
        hits.len()
    );
    hits
}

fn site_id(record: &FixletRecord) -> &str {
    &record.site_id
}

fn fixlet_id(record: &FixletRecord) -> &str {
    &record.fixlet_id
}

fn name(record: &FixletRecord) -> &str {
    &record.name
}

fn criticality(record: &FixletRecord) -> &str {
    &record.criticality
}

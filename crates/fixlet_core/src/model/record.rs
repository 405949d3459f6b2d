//! Fixlet record domain model.
//!
//! # Responsibility
//! - Define the canonical row shared by codec, store and session layers.
//! - Own the lossy count parsing policy used by every input path.
//!
//! # Invariants
//! - `fixlet_id` is an opaque key; duplicates are allowed.
//! - `relevant_computer_count` is never negative.
//! - Records carry no identity beyond field equality.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Header line written before any record, in positional field order.
pub const RECORD_HEADER: [&str; 5] = [
    "SiteID",
    "FixletID",
    "Name",
    "Criticality",
    "RelevantComputerCount",
];

/// One row of the fixlet dataset.
///
/// Field order matches the persisted column order; the CSV codec relies on
/// it for positional decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixletRecord {
    #[serde(rename = "SiteID")]
    pub site_id: String,
    /// Lookup and sort key.
    #[serde(rename = "FixletID")]
    pub fixlet_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Free-form category, compared case-sensitively.
    #[serde(rename = "Criticality")]
    pub criticality: String,
    #[serde(
        rename = "RelevantComputerCount",
        deserialize_with = "deserialize_count_or_zero"
    )]
    pub relevant_computer_count: u64,
}

impl FixletRecord {
    pub fn new(
        site_id: impl Into<String>,
        fixlet_id: impl Into<String>,
        name: impl Into<String>,
        criticality: impl Into<String>,
        relevant_computer_count: u64,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            fixlet_id: fixlet_id.into(),
            name: name.into(),
            criticality: criticality.into(),
            relevant_computer_count,
        }
    }
}

impl Display for FixletRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SiteID:{} FixletID:{} Name:{} Criticality:{} RelevantComputerCount:{}",
            self.site_id,
            self.fixlet_id,
            self.name,
            self.criticality,
            self.relevant_computer_count
        )
    }
}

/// Parses a relevant-computer count, returning `0` for anything unparsable.
///
/// This is intentionally lossy: blank, non-numeric, negative and overflowing
/// values all collapse to `0` without an error. Both file loading and
/// interactive entry go through this function so the two paths agree.
pub fn parse_count_or_zero(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}

fn deserialize_count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_count_or_zero(&raw))
}

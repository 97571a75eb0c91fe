// Location model representing vertices of the routing graph

use crate::models::LocationIndex;
use serde::{Deserialize, Serialize};

const ZONE_PREFIX: &str = "Zone-";

/// A named vertex of the routing graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub index: LocationIndex,
    pub name: String,
}

impl Location {
    /// Creates a new location with the given index and display name
    pub fn new<S: Into<String>>(index: LocationIndex, name: S) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// True when `zone` is a substring of this location's display name
    pub fn matches_zone(&self, zone: &str) -> bool {
        self.name.contains(zone)
    }
}

/// Expands a short zone code ("A") into a full zone label ("Zone-A").
/// The prefix is matched case-insensitively and the zone code is
/// uppercased; anything after the code is kept as given.
pub fn zone_label(input: &str) -> String {
    let trimmed = input.trim();
    let code = match trimmed.get(..ZONE_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(ZONE_PREFIX) => &trimmed[ZONE_PREFIX.len()..],
        _ => trimmed,
    };

    match code.split_once('-') {
        Some((zone, rest)) => format!("{}{}-{}", ZONE_PREFIX, zone.to_uppercase(), rest),
        None => format!("{}{}", ZONE_PREFIX, code.to_uppercase()),
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::region::{RegionMetadata, RegionStatus};

/// Per-region business data keyed by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(default)]
    pub clients: Option<u32>,
    #[serde(default)]
    pub status: Option<RegionStatus>,
}

/// Built-in presence data: (state name, clients, status).
const STATE_METADATA: &[(&str, u32, RegionStatus)] = &[
    ("Maharashtra", 1240, RegionStatus::Active),
    ("Delhi", 860, RegionStatus::Active),
    ("NCT of Delhi", 860, RegionStatus::Active),
    ("Karnataka", 720, RegionStatus::Active),
    ("Gujarat", 540, RegionStatus::Active),
    ("Tamil Nadu", 410, RegionStatus::Active),
    ("Rajasthan", 380, RegionStatus::Active),
    ("Telangana", 310, RegionStatus::Growing),
    ("Uttar Pradesh", 290, RegionStatus::Growing),
    ("West Bengal", 210, RegionStatus::Growing),
    ("Haryana", 180, RegionStatus::Growing),
    ("Kerala", 150, RegionStatus::Growing),
    ("Madhya Pradesh", 120, RegionStatus::Growing),
    ("Punjab", 90, RegionStatus::New),
    ("Andhra Pradesh", 75, RegionStatus::New),
    ("Bihar", 40, RegionStatus::New),
    ("Odisha", 35, RegionStatus::New),
    ("Orissa", 35, RegionStatus::New),
    ("Assam", 20, RegionStatus::New),
];

/// Static name → metadata lookup. Misses are not errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataTable {
    entries: HashMap<String, MetadataEntry>,
}

impl MetadataTable {
    pub fn new(entries: impl IntoIterator<Item = (String, MetadataEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(STATE_METADATA.iter().map(|&(name, clients, status)| {
            (
                name.to_string(),
                MetadataEntry {
                    clients: Some(clients),
                    status: Some(status),
                },
            )
        }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolve(&self, name: &str) -> RegionMetadata {
        match self.entries.get(name) {
            Some(entry) => RegionMetadata {
                name: name.to_string(),
                clients: entry.clients,
                status: entry.status,
            },
            None => RegionMetadata::name_only(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_hit_copies_entry() {
        let table = MetadataTable::new([(
            "Alpha".to_string(),
            MetadataEntry {
                clients: Some(10),
                status: Some(RegionStatus::Active),
            },
        )]);
        let meta = table.resolve("Alpha");
        assert_eq!(meta.name, "Alpha");
        assert_eq!(meta.clients, Some(10));
        assert_eq!(meta.status, Some(RegionStatus::Active));
    }

    #[test]
    fn resolve_miss_falls_back_to_name_only() {
        let table = MetadataTable::builtin();
        let meta = table.resolve("Lakshadweep");
        assert_eq!(meta, RegionMetadata::name_only("Lakshadweep"));
        assert_eq!(meta.clients_display(), 0);
        assert_eq!(meta.status_label(), "N/A");
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let table = MetadataTable::builtin();
        assert!(table.resolve("maharashtra").status.is_none());
        assert_eq!(
            table.resolve("Maharashtra").status,
            Some(RegionStatus::Active)
        );
    }

    #[test]
    fn table_deserializes_from_name_keyed_json() {
        let table: MetadataTable = serde_json::from_str(
            r#"{"Goa": {"clients": 12, "status": "Growing"}, "Sikkim": {}}"#,
        )
        .expect("table should parse");
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("Goa").clients_display(), 12);
        assert_eq!(table.resolve("Sikkim").status_label(), "N/A");
    }
}

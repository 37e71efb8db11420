use serde::{Deserialize, Serialize};

/// One static missile-system entry from the embedded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    /// Reach in kilometers. Zero means no coverage circle is drawn.
    pub range: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warhead: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propulsion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_platforms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Identity of a record: names are only unique within a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub category: String,
    pub name: String,
}

impl RecordKey {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }
}

impl CatalogRecord {
    /// Minimal record with no descriptive attributes.
    pub fn new(name: impl Into<String>, category: impl Into<String>, range: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            range,
            warhead: None,
            propulsion: None,
            guidance: None,
            launch_platforms: None,
            users: None,
            developed_by: None,
            notes: None,
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.category.clone(), self.name.clone())
    }

    pub fn matches_key(&self, key: &RecordKey) -> bool {
        self.category == key.category && self.name == key.name
    }

    pub fn has_coverage(&self) -> bool {
        self.range > 0.0
    }

    /// Coverage radius in meters, the unit the map surface draws in.
    pub fn range_meters(&self) -> f64 {
        self.range * 1000.0
    }

    /// Present descriptive attributes as `(label, text)` in display order.
    pub fn details(&self) -> Vec<(&'static str, &str)> {
        [
            ("Warhead", &self.warhead),
            ("Propulsion", &self.propulsion),
            ("Guidance", &self.guidance),
            ("Launch Platforms", &self.launch_platforms),
            ("Users", &self.users),
            ("Developed by", &self.developed_by),
            ("Notes", &self.notes),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|text| (label, text)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_original_field_names() {
        let json = r#"{
            "name": "Astra Mk1",
            "type": "Air-to-Air",
            "range": 110,
            "launchPlatforms": "Su-30MKI, Tejas",
            "developedBy": "DRDO"
        }"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "Air-to-Air");
        assert_eq!(record.launch_platforms.as_deref(), Some("Su-30MKI, Tejas"));
        assert_eq!(record.developed_by.as_deref(), Some("DRDO"));
        assert!(record.warhead.is_none());
    }

    #[test]
    fn details_skip_missing_attributes() {
        let mut record = CatalogRecord::new("Nag", "Surface-to-Surface", 4.0);
        record.guidance = Some("Imaging infrared".into());
        record.notes = Some("Top attack".into());
        assert_eq!(
            record.details(),
            vec![("Guidance", "Imaging infrared"), ("Notes", "Top attack")]
        );
    }

    #[test]
    fn zero_range_has_no_coverage() {
        assert!(!CatalogRecord::new("Test", "Torpedo", 0.0).has_coverage());
        assert_eq!(CatalogRecord::new("Astra", "Air-to-Air", 110.0).range_meters(), 110_000.0);
    }
}

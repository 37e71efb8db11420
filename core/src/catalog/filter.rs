use crate::catalog::record::CatalogRecord;
use std::fmt;

/// Active category restriction on the displayed catalog subset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    pub const ALL_LABEL: &'static str = "All";

    /// Maps a pick-list label back to a filter; the sentinel label means `All`.
    pub fn from_label(label: &str) -> Self {
        if label == Self::ALL_LABEL {
            Filter::All
        } else {
            Filter::Category(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Filter::All => Self::ALL_LABEL,
            Filter::Category(category) => category,
        }
    }

    pub fn matches(&self, record: &CatalogRecord) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => &record.category == category,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trips_sentinel() {
        assert_eq!(Filter::from_label("All"), Filter::All);
        assert_eq!(
            Filter::from_label("SLBM"),
            Filter::Category("SLBM".into())
        );
        assert_eq!(Filter::Category("Torpedo".into()).to_string(), "Torpedo");
    }

    #[test]
    fn category_filter_matches_exact_tag_only() {
        let record = CatalogRecord::new("Varunastra", "Torpedo", 40.0);
        assert!(Filter::All.matches(&record));
        assert!(Filter::Category("Torpedo".into()).matches(&record));
        assert!(!Filter::Category("torpedo".into()).matches(&record));
    }
}

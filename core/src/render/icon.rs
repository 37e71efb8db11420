/// Marker glyph chosen from a record's launch-platform text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerIcon {
    Aircraft,
    Submarine,
    Ship,
    MobileLauncher,
    ShoulderFired,
    GroundSystem,
    Default,
}

impl MarkerIcon {
    pub fn label(&self) -> &'static str {
        match self {
            MarkerIcon::Aircraft => "Aircraft",
            MarkerIcon::Submarine => "Submarine",
            MarkerIcon::Ship => "Ship",
            MarkerIcon::MobileLauncher => "Mobile launcher",
            MarkerIcon::ShoulderFired => "Shoulder-fired",
            MarkerIcon::GroundSystem => "Ground system",
            MarkerIcon::Default => "Launch site",
        }
    }
}

/// Evaluated top to bottom, first hit wins. Submarine stays ahead of the
/// ship row since naval submarine platforms mention both.
const PLATFORM_RULES: &[(&[&str], MarkerIcon)] = &[
    (
        &[
            "aircraft",
            "su-30mki",
            "tejas",
            "rafale",
            "mirage",
            "apache",
            "p-8i",
            "helicopter",
            "mig-29",
            "jaguar",
        ],
        MarkerIcon::Aircraft,
    ),
    (&["submarine", "arihant"], MarkerIcon::Submarine),
    (&["ship", "warship", "naval", "vls"], MarkerIcon::Ship),
    (
        &["mobile", "vehicle", "road", "tracked", "launcher"],
        MarkerIcon::MobileLauncher,
    ),
    (&["shoulder", "manpad"], MarkerIcon::ShoulderFired),
    (&["ground-based", "fixed"], MarkerIcon::GroundSystem),
];

pub fn classify_platform(platform: Option<&str>) -> MarkerIcon {
    let Some(platform) = platform else {
        return MarkerIcon::Default;
    };
    let platform = platform.to_lowercase();
    PLATFORM_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| platform.contains(keyword)))
        .map(|(_, icon)| *icon)
        .unwrap_or(MarkerIcon::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_platform_is_default() {
        assert_eq!(classify_platform(None), MarkerIcon::Default);
        assert_eq!(classify_platform(Some("")), MarkerIcon::Default);
        assert_eq!(classify_platform(Some("Coastal battery")), MarkerIcon::Default);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_platform(Some("SU-30MKI, Tejas")), MarkerIcon::Aircraft);
        assert_eq!(classify_platform(Some("MANPADS team")), MarkerIcon::ShoulderFired);
    }

    #[test]
    fn submarine_wins_over_ship_and_launcher_terms() {
        assert_eq!(
            classify_platform(Some("Submarine launch tubes on warship-class launcher")),
            MarkerIcon::Submarine
        );
        assert_eq!(classify_platform(Some("INS Arihant")), MarkerIcon::Submarine);
    }

    #[test]
    fn aircraft_wins_over_everything() {
        assert_eq!(
            classify_platform(Some("P-8I aircraft and submarine")),
            MarkerIcon::Aircraft
        );
    }

    #[test]
    fn launcher_outranks_ground_terms() {
        assert_eq!(
            classify_platform(Some("Fixed ground-based launcher")),
            MarkerIcon::MobileLauncher
        );
        assert_eq!(
            classify_platform(Some("Fixed ground-based site")),
            MarkerIcon::GroundSystem
        );
    }

    #[test]
    fn naval_terms_map_to_ship() {
        assert_eq!(classify_platform(Some("Naval VLS")), MarkerIcon::Ship);
        assert_eq!(classify_platform(Some("Mobile VLS")), MarkerIcon::Ship);
    }
}

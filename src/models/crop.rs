use super::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Growing season identifier.
///
/// Comparison is by identifier and is case-sensitive: `"rabi"` is the rabi
/// season, `"Rabi"` is an unknown season that matches nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Season {
    Rabi,
    Kharif,
    Zaid,
    Other(String),
}

impl Season {
    pub fn known() -> &'static [Season] {
        &[Season::Rabi, Season::Kharif, Season::Zaid]
    }

    pub fn from_id(id: &str) -> Self {
        match id {
            "rabi" => Season::Rabi,
            "kharif" => Season::Kharif,
            "zaid" => Season::Zaid,
            other => Season::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Season::Rabi => "rabi",
            Season::Kharif => "kharif",
            Season::Zaid => "zaid",
            Season::Other(id) => id,
        }
    }

    /// Identifier with its first letter upper-cased, as shown on season tags.
    pub fn label(&self) -> String {
        capitalize(self.id())
    }
}

impl PartialEq for Season {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Season {}

impl std::hash::Hash for Season {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl From<String> for Season {
    fn from(id: String) -> Self {
        Season::from_id(&id)
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.id().to_string()
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One crop reference entry. Loaded once with the catalog and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub local_names: BTreeMap<String, String>,
    pub season: Season,
    #[serde(default)]
    pub soil_requirement: String,
    #[serde(default)]
    pub water_requirement: String,
    #[serde(default)]
    pub temperature_range: String,
    #[serde(default)]
    pub growing_period: String,
    #[serde(default)]
    pub applicable_states: BTreeSet<String>,
}

impl CropRecord {
    pub fn new(id: u32, name: impl Into<String>, season: Season) -> Self {
        Self {
            id,
            name: name.into(),
            local_names: BTreeMap::new(),
            season,
            soil_requirement: String::new(),
            water_requirement: String::new(),
            temperature_range: String::new(),
            growing_period: String::new(),
            applicable_states: BTreeSet::new(),
        }
    }

    pub fn with_local_name(mut self, code: &str, name: impl Into<String>) -> Self {
        self.local_names.insert(code.to_string(), name.into());
        self
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applicable_states
            .extend(states.into_iter().map(Into::into));
        self
    }

    pub fn with_details(
        mut self,
        soil: impl Into<String>,
        water: impl Into<String>,
        temperature: impl Into<String>,
        growing_period: impl Into<String>,
    ) -> Self {
        self.soil_requirement = soil.into();
        self.water_requirement = water.into();
        self.temperature_range = temperature.into();
        self.growing_period = growing_period.into();
        self
    }

    /// Localized name for `lang`, falling back to the English entry and then
    /// to the canonical name.
    pub fn display_name(&self, lang: Language) -> &str {
        self.local_names
            .get(lang.code())
            .or_else(|| self.local_names.get(Language::En.code()))
            .map(String::as_str)
            .unwrap_or(&self.name)
    }

    pub fn grows_in(&self, state: &str) -> bool {
        self.applicable_states.contains(state)
    }
}

/// Turns a region identifier such as `uttar-pradesh` into `Uttar Pradesh`.
pub fn region_label(id: &str) -> String {
    id.split('-')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheat() -> CropRecord {
        CropRecord::new(1, "Wheat", Season::Rabi)
            .with_local_name("hi", "गेहूं")
            .with_local_name("pa", "ਕਣਕ")
            .with_states(["punjab", "haryana"])
    }

    #[test]
    fn season_from_id_is_case_sensitive() {
        assert_eq!(Season::from_id("rabi"), Season::Rabi);
        assert_eq!(Season::from_id("kharif"), Season::Kharif);
        assert_eq!(Season::from_id("Rabi"), Season::Other("Rabi".into()));
        assert_ne!(Season::from_id("Rabi"), Season::Rabi);
    }

    #[test]
    fn season_other_with_known_id_equals_known() {
        assert_eq!(Season::Other("zaid".into()), Season::Zaid);
    }

    #[test]
    fn season_label_capitalizes() {
        assert_eq!(Season::Rabi.label(), "Rabi");
        assert_eq!(Season::Other("summer".into()).label(), "Summer");
        assert_eq!(Season::Other(String::new()).label(), "");
    }

    #[test]
    fn season_serializes_as_identifier() {
        let json = serde_json::to_string(&Season::Kharif).unwrap();
        assert_eq!(json, "\"kharif\"");
        let parsed: Season = serde_json::from_str("\"winter\"").unwrap();
        assert_eq!(parsed, Season::Other("winter".into()));
    }

    #[test]
    fn display_name_uses_selected_language() {
        assert_eq!(wheat().display_name(Language::Hi), "गेहूं");
        assert_eq!(wheat().display_name(Language::Pa), "ਕਣਕ");
    }

    #[test]
    fn display_name_falls_back_to_english_entry() {
        let crop = wheat().with_local_name("en", "Common wheat");
        assert_eq!(crop.display_name(Language::Ta), "Common wheat");
    }

    #[test]
    fn display_name_falls_back_to_canonical_name() {
        assert_eq!(wheat().display_name(Language::Ta), "Wheat");
        assert_eq!(wheat().display_name(Language::En), "Wheat");
    }

    #[test]
    fn grows_in_is_exact() {
        let crop = wheat();
        assert!(crop.grows_in("punjab"));
        assert!(!crop.grows_in("Punjab"));
        assert!(!crop.grows_in("kerala"));
    }

    #[test]
    fn region_label_formats_identifiers() {
        assert_eq!(region_label("uttar-pradesh"), "Uttar Pradesh");
        assert_eq!(region_label("punjab"), "Punjab");
        assert_eq!(region_label(""), "");
    }
}

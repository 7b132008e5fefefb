use crate::error::{Result, SmartFarmError};
use crate::logic::filter::{filter, FilterCriteria};
use crate::models::{CropRecord, Season};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Immutable crop reference data. Cloning shares the underlying records.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Arc<[CropRecord]>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(records: Vec<CropRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(SmartFarmError::InvalidData(format!(
                    "duplicate crop id {} ({})",
                    record.id, record.name
                )));
            }
        }
        Ok(Self {
            records: records.into(),
        })
    }

    pub fn builtin() -> Self {
        Self {
            records: builtin_records().into(),
        }
    }

    /// Loads records from a `.yaml`/`.yml` or `.json` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SmartFarmError::Config(format!("Failed to read catalog {:?}: {}", path, e))
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let records: Vec<CropRecord> = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(SmartFarmError::Config(format!(
                    "Unsupported catalog format {:?} (expected .yaml, .yml or .json)",
                    path
                )))
            }
        };

        let catalog = Self::new(records)?;
        tracing::info!(path = %path.display(), crops = catalog.len(), "Loaded crop catalog");
        Ok(catalog)
    }

    /// The configured catalog file, or the bundled records.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn records(&self) -> &[CropRecord] {
        &self.records
    }

    pub fn get(&self, id: u32) -> Option<&CropRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct seasons in first-seen order.
    pub fn seasons(&self) -> Vec<Season> {
        let mut out: Vec<Season> = Vec::new();
        for record in self.records.iter() {
            if !out.contains(&record.season) {
                out.push(record.season.clone());
            }
        }
        out
    }

    /// Distinct region identifiers, sorted.
    pub fn states(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(|r| r.applicable_states.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&CropRecord> {
        filter(&self.records, criteria)
    }
}

fn builtin_records() -> Vec<CropRecord> {
    vec![
        CropRecord::new(1, "Wheat", Season::Rabi)
            .with_local_name("hi", "गेहूं")
            .with_local_name("mr", "गहू")
            .with_local_name("bn", "গম")
            .with_local_name("te", "గోధుమ")
            .with_local_name("ta", "கோதுமை")
            .with_local_name("kn", "ಗೋಧಿ")
            .with_local_name("gu", "ઘઉં")
            .with_local_name("pa", "ਕਣਕ")
            .with_local_name("ml", "ഗോതമ്പ്")
            .with_local_name("or", "ଗହମ")
            .with_details(
                "Well-drained loamy soil",
                "450-650mm per season",
                "20-25°C",
                "November - April",
            )
            .with_states(["punjab", "haryana", "uttar-pradesh", "madhya-pradesh"]),
        CropRecord::new(2, "Rice", Season::Kharif)
            .with_local_name("hi", "चावल")
            .with_local_name("mr", "तांदूळ")
            .with_local_name("bn", "ধান")
            .with_local_name("te", "వరి")
            .with_local_name("ta", "நெல்")
            .with_local_name("kn", "ಭತ್ತ")
            .with_local_name("gu", "ચોખા")
            .with_local_name("pa", "ਚੌਲ")
            .with_local_name("ml", "നെല്ല്")
            .with_local_name("or", "ଧାନ")
            .with_details(
                "Clayey loam with good water retention",
                "1000-1500mm per season",
                "20-35°C",
                "June - November",
            )
            .with_states([
                "west-bengal",
                "uttar-pradesh",
                "punjab",
                "andhra-pradesh",
                "tamil-nadu",
                "odisha",
            ]),
        CropRecord::new(3, "Maize", Season::Kharif)
            .with_local_name("hi", "मक्का")
            .with_local_name("mr", "मका")
            .with_local_name("bn", "ভুট্টা")
            .with_local_name("te", "మొక్కజొన్న")
            .with_local_name("kn", "ಮೆಕ್ಕೆಜೋಳ")
            .with_local_name("gu", "મકાઈ")
            .with_local_name("pa", "ਮੱਕੀ")
            .with_details(
                "Well-drained fertile loam",
                "500-800mm per season",
                "21-27°C",
                "June - October",
            )
            .with_states([
                "karnataka",
                "madhya-pradesh",
                "bihar",
                "maharashtra",
                "telangana",
            ]),
        CropRecord::new(4, "Cotton", Season::Kharif)
            .with_local_name("hi", "कपास")
            .with_local_name("mr", "कापूस")
            .with_local_name("gu", "કપાસ")
            .with_local_name("te", "పత్తి")
            .with_local_name("pa", "ਕਪਾਹ")
            .with_details(
                "Black cotton soil (regur)",
                "700-1200mm per season",
                "21-30°C",
                "April - December",
            )
            .with_states(["gujarat", "maharashtra", "telangana", "punjab", "haryana"]),
        CropRecord::new(5, "Mustard", Season::Rabi)
            .with_local_name("hi", "सरसों")
            .with_local_name("pa", "ਸਰ੍ਹੋਂ")
            .with_local_name("bn", "সরিষা")
            .with_local_name("gu", "રાઈ")
            .with_details(
                "Sandy loam to loam",
                "250-400mm per season",
                "10-25°C",
                "October - March",
            )
            .with_states(["rajasthan", "haryana", "madhya-pradesh", "uttar-pradesh"]),
        CropRecord::new(6, "Chickpea", Season::Rabi)
            .with_local_name("hi", "चना")
            .with_local_name("mr", "हरभरा")
            .with_local_name("te", "శనగ")
            .with_local_name("gu", "ચણા")
            .with_local_name("pa", "ਛੋਲੇ")
            .with_details(
                "Well-drained sandy loam",
                "300-400mm per season",
                "15-25°C",
                "October - March",
            )
            .with_states(["madhya-pradesh", "rajasthan", "maharashtra", "karnataka"]),
        CropRecord::new(7, "Sugarcane", Season::Kharif)
            .with_local_name("hi", "गन्ना")
            .with_local_name("mr", "ऊस")
            .with_local_name("ta", "கரும்பு")
            .with_local_name("te", "చెరకు")
            .with_local_name("kn", "ಕಬ್ಬು")
            .with_details(
                "Deep rich loamy soil",
                "1500-2500mm per year",
                "20-35°C",
                "February - January",
            )
            .with_states(["uttar-pradesh", "maharashtra", "karnataka", "tamil-nadu"]),
        CropRecord::new(8, "Watermelon", Season::Zaid)
            .with_local_name("hi", "तरबूज")
            .with_local_name("mr", "कलिंगड")
            .with_local_name("ta", "தர்பூசணி")
            .with_local_name("bn", "তরমুজ")
            .with_details(
                "Sandy loam",
                "400-600mm per season",
                "24-30°C",
                "February - May",
            )
            .with_states(["uttar-pradesh", "rajasthan", "karnataka", "andhra-pradesh"]),
        CropRecord::new(9, "Cucumber", Season::Zaid)
            .with_local_name("hi", "खीरा")
            .with_local_name("mr", "काकडी")
            .with_local_name("bn", "শসা")
            .with_details(
                "Well-drained loam rich in organic matter",
                "350-500mm per season",
                "18-30°C",
                "February - June",
            )
            .with_states(["uttar-pradesh", "haryana", "punjab", "west-bengal"]),
        CropRecord::new(10, "Green Gram", Season::Zaid)
            .with_local_name("hi", "मूंग")
            .with_local_name("mr", "मूग")
            .with_local_name("te", "పెసలు")
            .with_local_name("ta", "பச்சைப் பயறு")
            .with_details(
                "Loam to sandy loam",
                "250-350mm per season",
                "25-35°C",
                "March - June",
            )
            .with_states(["rajasthan", "maharashtra", "andhra-pradesh", "karnataka"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use std::io::Write;

    #[test]
    fn builtin_ids_are_unique() {
        assert!(Catalog::new(builtin_records()).is_ok());
        assert_eq!(Catalog::builtin().len(), builtin_records().len());
    }

    #[test]
    fn builtin_wheat_matches_reference_entry() {
        let catalog = Catalog::builtin();
        let wheat = catalog.get(1).unwrap();
        assert_eq!(wheat.name, "Wheat");
        assert_eq!(wheat.season, Season::Rabi);
        assert_eq!(wheat.local_names.len(), 10);
        assert_eq!(wheat.display_name(Language::Hi), "गेहूं");
        assert!(wheat.grows_in("madhya-pradesh"));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let records = vec![
            CropRecord::new(1, "Wheat", Season::Rabi),
            CropRecord::new(1, "Barley", Season::Rabi),
        ];
        assert!(matches!(
            Catalog::new(records),
            Err(SmartFarmError::InvalidData(_))
        ));
    }

    #[test]
    fn seasons_in_first_seen_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.seasons(),
            vec![Season::Rabi, Season::Kharif, Season::Zaid]
        );
    }

    #[test]
    fn states_are_sorted_and_distinct() {
        let states = Catalog::builtin().states();
        let mut sorted = states.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(states, sorted);
        assert!(states.contains(&"punjab".to_string()));
    }

    #[test]
    fn catalog_filter_delegates() {
        let catalog = Catalog::builtin();
        let result = catalog.filter(&FilterCriteria::new().with_search("गेहूं"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);

        let kharif = catalog.filter(&FilterCriteria::new().with_season(Season::Kharif));
        assert!(kharif.iter().all(|r| r.season == Season::Kharif));
        assert_eq!(kharif.len(), 4);
    }

    #[test]
    fn load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            r#"
- id: 7
  name: Barley
  local_names:
    hi: जौ
  season: rabi
  applicable_states: [rajasthan]
- id: 8
  name: Millet
  season: summer
"#
        )
        .unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(7).unwrap().display_name(Language::Hi), "जौ");
        assert_eq!(
            catalog.get(8).unwrap().season,
            Season::Other("summer".into())
        );
        assert!(catalog.get(8).unwrap().applicable_states.is_empty());
    }

    #[test]
    fn load_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "Rice", "season": "kharif", "applicable_states": ["odisha"]}}]"#
        )
        .unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        assert!(catalog.get(1).unwrap().grows_in("odisha"));
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        assert!(matches!(
            Catalog::from_path(file.path()),
            Err(SmartFarmError::Config(_))
        ));
    }

    #[test]
    fn load_without_path_uses_builtin() {
        let catalog = Catalog::load(None).unwrap();
        assert_eq!(catalog.len(), Catalog::builtin().len());
    }
}

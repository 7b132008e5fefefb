use crate::models::{CropRecord, Season};

/// Optional constraints for one catalog query. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: Option<String>,
    pub season: Option<Season>,
    pub state: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank terms are treated as no search.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = non_empty(term.into());
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = if season.id().is_empty() {
            None
        } else {
            Some(season)
        };
        self
    }

    pub fn with_season_id(self, id: &str) -> Self {
        self.with_season(Season::from_id(id))
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = non_empty(state.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_none() && self.season.is_none() && self.state.is_none()
    }

    pub fn matches(&self, record: &CropRecord) -> bool {
        if let Some(ref term) = self.search_term {
            if !matches_search(record, &term.to_lowercase()) {
                return false;
            }
        }

        if let Some(ref season) = self.season {
            if record.season != *season {
                return false;
            }
        }

        if let Some(ref state) = self.state {
            if !record.grows_in(state) {
                return false;
            }
        }

        true
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// `needle` must already be lower-cased.
fn matches_search(record: &CropRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record
            .local_names
            .values()
            .any(|name| name.to_lowercase().contains(needle))
}

/// Stable filter: the records satisfying every present criterion, in input order.
pub fn filter<'a>(records: &'a [CropRecord], criteria: &FilterCriteria) -> Vec<&'a CropRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheat() -> CropRecord {
        CropRecord::new(1, "Wheat", Season::Rabi)
            .with_local_name("hi", "गेहूं")
            .with_states(["punjab", "haryana"])
    }

    fn sample() -> Vec<CropRecord> {
        vec![
            wheat(),
            CropRecord::new(2, "Rice", Season::Kharif)
                .with_local_name("hi", "चावल")
                .with_local_name("ta", "அரிசி")
                .with_states(["punjab", "west-bengal", "tamil-nadu"]),
            CropRecord::new(3, "Mustard", Season::Rabi)
                .with_local_name("hi", "सरसों")
                .with_states(["rajasthan", "haryana"]),
            CropRecord::new(4, "Watermelon", Season::Zaid)
                .with_local_name("hi", "तरबूज")
                .with_states(["uttar-pradesh"]),
            CropRecord::new(5, "Buckwheat", Season::Other("summer".into()))
                .with_states(["himachal-pradesh"]),
        ]
    }

    fn ids(records: &[&CropRecord]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    fn criteria_grid() -> Vec<FilterCriteria> {
        let terms = [None, Some("wheat"), Some("RI"), Some("सर"), Some("zzz")];
        let seasons = [None, Some("rabi"), Some("kharif"), Some("Rabi")];
        let states = [None, Some("punjab"), Some("haryana"), Some("kerala")];

        let mut out = Vec::new();
        for term in terms {
            for season in seasons {
                for state in states {
                    let mut c = FilterCriteria::new();
                    if let Some(t) = term {
                        c = c.with_search(t);
                    }
                    if let Some(s) = season {
                        c = c.with_season_id(s);
                    }
                    if let Some(s) = state {
                        c = c.with_state(s);
                    }
                    out.push(c);
                }
            }
        }
        out
    }

    #[test]
    fn empty_criteria_returns_everything_in_order() {
        let records = sample();
        let result = filter(&records, &FilterCriteria::default());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        let criteria = FilterCriteria::new()
            .with_search("")
            .with_season_id("")
            .with_state("");
        assert!(criteria.is_empty());
        let records = sample();
        assert_eq!(filter(&records, &criteria).len(), records.len());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = sample();
        let result = filter(&records, &FilterCriteria::new().with_search("WHEAT"));
        assert_eq!(ids(&result), vec![1, 5]);

        let result = filter(&records, &FilterCriteria::new().with_search("eat"));
        assert_eq!(ids(&result), vec![1, 5]);
    }

    #[test]
    fn search_matches_local_names() {
        let records = sample();
        let result = filter(&records, &FilterCriteria::new().with_search("अरिसी"));
        assert!(result.is_empty());
        let result = filter(&records, &FilterCriteria::new().with_search("அரி"));
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn search_soundness_and_completeness() {
        let records = sample();
        for term in ["i", "wheat", "ce", "र", "melon", "x"] {
            let result = filter(&records, &FilterCriteria::new().with_search(term));
            let needle = term.to_lowercase();
            for record in &records {
                let contains = record.name.to_lowercase().contains(&needle)
                    || record
                        .local_names
                        .values()
                        .any(|n| n.to_lowercase().contains(&needle));
                let included = result.iter().any(|r| r.id == record.id);
                assert_eq!(contains, included, "term {:?}, record {}", term, record.name);
            }
        }
    }

    #[test]
    fn season_is_exact_match() {
        let records = sample();
        let rabi = filter(&records, &FilterCriteria::new().with_season(Season::Rabi));
        assert_eq!(ids(&rabi), vec![1, 3]);

        let capitalised = filter(&records, &FilterCriteria::new().with_season_id("Rabi"));
        assert!(capitalised.is_empty());

        let custom = filter(&records, &FilterCriteria::new().with_season_id("summer"));
        assert_eq!(ids(&custom), vec![5]);
    }

    #[test]
    fn state_is_exact_membership() {
        let records = sample();
        let result = filter(&records, &FilterCriteria::new().with_state("haryana"));
        assert_eq!(ids(&result), vec![1, 3]);

        let result = filter(&records, &FilterCriteria::new().with_state("Haryana"));
        assert!(result.is_empty());

        let result = filter(&records, &FilterCriteria::new().with_state("prad"));
        assert!(result.is_empty());
    }

    #[test]
    fn unknown_criteria_yield_empty_result() {
        let records = sample();
        let criteria = FilterCriteria::new().with_season_id("monsoon");
        assert!(filter(&records, &criteria).is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let records = sample();
        for criteria in criteria_grid() {
            let once: Vec<CropRecord> = filter(&records, &criteria).into_iter().cloned().collect();
            let twice = filter(&once, &criteria);
            assert_eq!(ids(&twice), once.iter().map(|r| r.id).collect::<Vec<_>>());
        }
    }

    #[test]
    fn filter_preserves_relative_order() {
        let records = sample();
        for criteria in criteria_grid() {
            let result = filter(&records, &criteria);
            let positions: Vec<usize> = result
                .iter()
                .map(|r| records.iter().position(|x| x.id == r.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", criteria);
        }
    }

    #[test]
    fn combined_criteria_equal_intersection() {
        let records = sample();
        for criteria in criteria_grid() {
            let combined = ids(&filter(&records, &criteria));

            let mut by_search = FilterCriteria::new();
            by_search.search_term = criteria.search_term.clone();
            let mut by_season = FilterCriteria::new();
            by_season.season = criteria.season.clone();
            let mut by_state = FilterCriteria::new();
            by_state.state = criteria.state.clone();

            let a = ids(&filter(&records, &by_search));
            let b = ids(&filter(&records, &by_season));
            let c = ids(&filter(&records, &by_state));
            let intersection: Vec<u32> = a
                .into_iter()
                .filter(|id| b.contains(id) && c.contains(id))
                .collect();

            assert_eq!(combined, intersection, "{:?}", criteria);
        }
    }

    #[test]
    fn filter_does_not_mutate_input() {
        let records = sample();
        let before = records.clone();
        let criteria = FilterCriteria::new().with_search("a").with_state("punjab");
        let _ = filter(&records, &criteria);
        assert_eq!(records, before);
    }

    #[test]
    fn wheat_scenario() {
        let records = vec![wheat()];

        let result = filter(&records, &FilterCriteria::new().with_search("गेहूं"));
        assert_eq!(result, vec![&records[0]]);

        let result = filter(&records, &FilterCriteria::new().with_season_id("kharif"));
        assert!(result.is_empty());

        let result = filter(&records, &FilterCriteria::new().with_state("punjab"));
        assert_eq!(result, vec![&records[0]]);

        let result = filter(&records, &FilterCriteria::new().with_search("rice"));
        assert!(result.is_empty());
    }

    #[test]
    fn empty_record_list() {
        let records: Vec<CropRecord> = Vec::new();
        let criteria = FilterCriteria::new().with_search("wheat");
        assert!(filter(&records, &criteria).is_empty());
    }
}

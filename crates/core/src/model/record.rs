use serde::{Deserialize, Serialize};

/// One in-scope row of the sales dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Country or aggregate label (e.g. "China", "World", "EU27").
    pub region: String,
    pub year: i32,
    /// Always the configured parameter literal after loading.
    pub parameter: String,
    /// Always the configured unit literal after loading.
    pub unit: String,
    /// Sales count.
    pub value: f64,
}

/// The full set of in-scope records, loaded once and never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years present in the dataset, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str, year: i32, value: f64) -> SalesRecord {
        SalesRecord {
            region: region.into(),
            year,
            parameter: "EV sales".into(),
            unit: "Vehicles".into(),
            value,
        }
    }

    #[test]
    fn years_are_sorted_and_distinct() {
        let dataset = Dataset::new(vec![
            record("World", 2021, 1.0),
            record("China", 2019, 1.0),
            record("World", 2019, 1.0),
            record("USA", 2023, 1.0),
        ]);
        assert_eq!(dataset.years(), vec![2019, 2021, 2023]);
        assert_eq!(dataset.len(), 4);
    }

    #[test]
    fn empty_dataset_has_no_years() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert!(dataset.years().is_empty());
    }
}

use std::collections::BTreeMap;

/// Normalized counts: key -> probability, summing to one.
pub type ProbabilityTable = BTreeMap<String, f64>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, u64>,
}

impl FrequencyTable {
    pub fn add(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or_default()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Divides every count by the table total. A table without counts
    /// normalizes to an empty distribution.
    pub fn normalize(&self) -> ProbabilityTable {
        let total = self.total();
        if total == 0 {
            return ProbabilityTable::new();
        }
        let total = total as f64;
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total))
            .collect()
    }
}

/// Two-level counts, e.g. tag -> word -> count.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NestedFrequencyTable {
    rows: BTreeMap<String, FrequencyTable>,
}

impl NestedFrequencyTable {
    pub fn add(&mut self, outer: &str, inner: &str) {
        match self.rows.get_mut(outer) {
            Some(row) => row.add(inner),
            None => {
                let mut row = FrequencyTable::default();
                row.add(inner);
                self.rows.insert(outer.to_string(), row);
            }
        }
    }

    pub fn row(&self, outer: &str) -> Option<&FrequencyTable> {
        self.rows.get(outer)
    }

    pub fn get(&self, outer: &str, inner: &str) -> u64 {
        self.row(outer).map(|r| r.get(inner)).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &FrequencyTable)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Normalizes each row on its own. Rows whose total is zero are dropped.
    pub fn normalize(&self) -> BTreeMap<String, ProbabilityTable> {
        self.rows
            .iter()
            .filter(|(_, row)| row.total() > 0)
            .map(|(k, row)| (k.clone(), row.normalize()))
            .collect()
    }
}

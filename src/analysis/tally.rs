use std::collections::HashMap;
use std::hash::Hash;

/// Frequency counter that remembers first-seen order.
///
/// Ranking is a stable sort on descending count, so equal counts keep the
/// order in which keys were first observed.
#[derive(Debug, Clone)]
pub struct FrequencyTally<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K> Default for FrequencyTally<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> FrequencyTally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn count(&self, key: &K) -> usize {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `limit` most frequent keys, most frequent first.
    pub fn top(&self, limit: usize) -> Vec<K> {
        let mut ranked: Vec<&(K, usize)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(limit)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_orders_by_count_then_first_seen() {
        let mut tally = FrequencyTally::new();
        for key in ["a", "b", "c", "b", "c", "d"] {
            tally.add(key);
        }
        assert_eq!(tally.top(10), vec!["b", "c", "a", "d"]);
        assert_eq!(tally.top(2), vec!["b", "c"]);
        assert_eq!(tally.count(&"b"), 2);
        assert_eq!(tally.count(&"z"), 0);
        assert_eq!(tally.len(), 4);
    }

    #[test]
    fn empty_tally_yields_nothing() {
        let tally: FrequencyTally<String> = FrequencyTally::new();
        assert!(tally.is_empty());
        assert!(tally.top(5).is_empty());
    }
}

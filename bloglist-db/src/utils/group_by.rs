use std::{collections::HashMap, hash::Hash};

/// Groups values by key while remembering the order in which keys were first seen.
///
/// Iteration yields groups in first-occurrence order, which is what the
/// per-author reductions rely on for their tie-breaking.
#[derive(Debug, Clone)]
pub struct GroupBy<K, A> {
    index: HashMap<K, usize>,
    groups: Vec<(K, A)>,
}

impl<K, A> Default for GroupBy<K, A> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<K, A> GroupBy<K, A>
where
    K: Eq + Hash + Clone,
    A: Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accumulator for `key`, creating an empty one on first sight.
    pub fn entry(&mut self, key: K) -> &mut A {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.index.insert(key.clone(), idx);
                self.groups.push((key, A::default()));
                idx
            }
        };
        &mut self.groups[idx].1
    }
}

impl<K, A> IntoIterator for GroupBy<K, A> {
    type Item = (K, A);
    type IntoIter = std::vec::IntoIter<(K, A)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_keep_first_seen_order() {
        let mut groups: GroupBy<&str, u64> = GroupBy::new();
        for key in ["b", "a", "b", "c", "a", "b"] {
            *groups.entry(key) += 1;
        }

        let collected: Vec<_> = groups.into_iter().collect();
        assert_eq!(collected, vec![("b", 3), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn test_empty_group_by() {
        let groups: GroupBy<String, u64> = GroupBy::new();
        assert_eq!(groups.into_iter().count(), 0);
    }

    #[test]
    fn test_option_keys_are_distinct_groups() {
        let mut groups: GroupBy<Option<&str>, Vec<u64>> = GroupBy::new();
        groups.entry(None).push(1);
        groups.entry(Some("x")).push(2);
        groups.entry(None).push(3);

        let collected: Vec<_> = groups.into_iter().collect();
        assert_eq!(collected, vec![(None, vec![1, 3]), (Some("x"), vec![2])]);
    }
}

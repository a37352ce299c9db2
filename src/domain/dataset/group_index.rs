// ============================================================
// GROUP INDEX
// ============================================================
// Partition of table rows by exact value of a grouping column

use std::collections::HashMap;

use serde::Serialize;

use super::RecordTable;

/// Row count of one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub group: String,
    pub count: usize,
}

/// Rows sharing one key, in table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    pub rows: Vec<usize>,
}

/// Groups listed in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    groups: Vec<Group>,
}

impl GroupIndex {
    pub fn build(table: &RecordTable, column: usize) -> Self {
        let mut position: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<Group> = Vec::new();

        for (row, cell) in table.column(column).enumerate() {
            let key = cell.render();
            match position.get(&*key) {
                Some(&slot) => groups[slot].rows.push(row),
                None => {
                    position.insert(key.to_string(), groups.len());
                    groups.push(Group {
                        key: key.into_owned(),
                        rows: vec![row],
                    });
                }
            }
        }

        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(|g| g.rows.len()).collect()
    }

    /// Size of the smallest group, `None` when there are no groups
    pub fn min_size(&self) -> Option<usize> {
        self.groups.iter().map(|g| g.rows.len()).min()
    }

    pub fn distribution(&self) -> Vec<GroupCount> {
        rank_counts(
            self.groups
                .iter()
                .map(|g| GroupCount {
                    group: g.key.clone(),
                    count: g.rows.len(),
                })
                .collect(),
        )
    }
}

/// Value counts of `keys`, largest first; ties keep first-appearance order
pub fn distribution<'a, I>(keys: I) -> Vec<GroupCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<GroupCount> = Vec::new();
    for key in keys {
        match position.get(key) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                position.insert(key, counts.len());
                counts.push(GroupCount {
                    group: key.to_string(),
                    count: 1,
                });
            }
        }
    }
    rank_counts(counts)
}

/// Order counts largest first; equal counts keep their relative order
pub fn rank_counts(mut counts: Vec<GroupCount>) -> Vec<GroupCount> {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Cell;

    fn table(languages: &[&str]) -> RecordTable {
        RecordTable::from_rows(
            vec!["language".to_string()],
            languages.iter().map(|l| vec![Cell::text(*l)]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let index = GroupIndex::build(&table(&["rust", "go", "rust", "python", "go"]), 0);
        let keys: Vec<_> = index.groups().iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["rust", "go", "python"]);
        assert_eq!(index.groups()[0].rows, vec![0, 2]);
        assert_eq!(index.sizes(), vec![2, 2, 1]);
        assert_eq!(index.min_size(), Some(1));
    }

    #[test]
    fn test_keys_are_exact_strings() {
        let index = GroupIndex::build(&table(&["Rust", "rust", "rust ", ""]), 0);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_distribution_sorted_by_count() {
        let counts = distribution(["go", "rust", "rust", "python", "go", "go"]);
        let pairs: Vec<_> = counts.iter().map(|c| (c.group.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("go", 3), ("rust", 2), ("python", 1)]);
    }

    #[test]
    fn test_empty_table_has_no_groups() {
        let index = GroupIndex::build(&table(&[]), 0);
        assert!(index.is_empty());
        assert_eq!(index.min_size(), None);
        assert!(index.distribution().is_empty());
    }
}

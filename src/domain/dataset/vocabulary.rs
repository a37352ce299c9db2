use std::collections::BTreeSet;

use serde::Serialize;

/// Sorted, de-duplicated set of tags observed in one list column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Vocabulary {
    tags: Vec<String>,
}

impl Vocabulary {
    pub fn from_tag_lists<'a, I>(lists: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec<String>>,
    {
        let unique: BTreeSet<&str> = lists
            .into_iter()
            .flat_map(|tags| tags.iter().map(String::as_str))
            .collect();
        Self {
            tags: unique.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.tags.binary_search_by(|t| t.as_str().cmp(tag)).ok()
    }

    /// One-hot vector for a row's tags. Repeated tags still yield a single 1.
    pub fn indicators(&self, row_tags: &[String]) -> Vec<bool> {
        let mut bits = vec![false; self.tags.len()];
        for tag in row_tags {
            if let Some(i) = self.index_of(tag) {
                bits[i] = true;
            }
        }
        bits
    }

    /// `<prefix>_<tag>` for every tag, in vocabulary order
    pub fn column_names(&self, prefix: &str) -> Vec<String> {
        self.tags
            .iter()
            .map(|tag| format!("{}_{}", prefix, tag))
            .collect()
    }
}

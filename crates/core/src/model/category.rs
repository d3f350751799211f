use std::collections::BTreeMap;

use crate::model::ids::CategoryId;

/// Read-only mapping from category id to category name.
///
/// Fetched once per session from the catalog; iteration is ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: BTreeMap<CategoryId, String>,
}

impl CategoryMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: CategoryId, name: impl Into<String>) {
        self.entries.insert(id, name.into());
    }

    /// Look up a category name by id.
    #[must_use]
    pub fn name(&self, id: CategoryId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, id: CategoryId) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &str)> {
        self.entries.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

impl FromIterator<(CategoryId, String)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (CategoryId, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

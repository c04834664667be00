// Content registry - Read-only catalog of dashboards
use crate::domain::dashboard::{Category, DashboardEntry};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    entries: Arc<[DashboardEntry]>,
}

/// One section of the listing page
#[derive(Debug, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a Category,
    pub badge: &'a str,
    pub entries: Vec<&'a DashboardEntry>,
}

impl ContentRegistry {
    /// Concatenate provider collections in declaration order.
    /// Duplicate ids are kept; lookups return the first declaration.
    pub fn from_collections(collections: Vec<Vec<DashboardEntry>>) -> Self {
        let entries: Vec<DashboardEntry> = collections.into_iter().flatten().collect();

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(&entry.id) {
                tracing::warn!(
                    id = %entry.id,
                    title = %entry.title,
                    "Duplicate dashboard id; entry is shadowed by an earlier declaration"
                );
            }
        }

        tracing::debug!("Content registry built with {} entries", entries.len());

        Self {
            entries: entries.into(),
        }
    }

    pub fn get_all(&self) -> &[DashboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First entry satisfying the predicate, in registry order
    pub fn find<P>(&self, predicate: P) -> Option<&DashboardEntry>
    where
        P: Fn(&DashboardEntry) -> bool,
    {
        self.entries.iter().find(|entry| predicate(entry))
    }

    /// Group entries for the listing page.
    /// Known categories come first in display order, unknown ones follow in
    /// order of first appearance. Registry order is kept inside a group.
    pub fn by_category(&self) -> Vec<CategoryGroup<'_>> {
        let mut categories: Vec<&Category> = Vec::new();
        for entry in self.entries.iter() {
            if !categories.contains(&&entry.category) {
                categories.push(&entry.category);
            }
        }
        categories.sort_by_key(|c| c.display_rank().unwrap_or(usize::MAX));

        categories
            .into_iter()
            .map(|category| CategoryGroup {
                category,
                badge: category.badge(),
                entries: self
                    .entries
                    .iter()
                    .filter(|e| &e.category == category)
                    .collect(),
            })
            .collect()
    }
}

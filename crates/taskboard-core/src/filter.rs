//! The active filter set narrowing which tasks are listed.

use serde::{Deserialize, Serialize};

/// Query constraints applied to the task listing.
///
/// An absent key means "no constraint". Two filter sets with the same
/// key/value pairs are identical regardless of how they were built;
/// equality is structural, never identity-based, so a freshly merged
/// but value-equal set compares equal to its predecessor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
}

impl FilterSet {
    /// The empty filter set: no constraints.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no constraint is active.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge a partial set of filter changes into this set.
    ///
    /// Keys absent from the patch are preserved; a key set to the
    /// empty string is cleared (form "All" options reset this way).
    pub fn merge(&mut self, patch: FilterPatch) {
        fn fold(slot: &mut Option<String>, change: Option<String>) {
            if let Some(value) = change {
                *slot = if value.is_empty() { None } else { Some(value) };
            }
        }
        fold(&mut self.status, patch.status);
        fold(&mut self.priority, patch.priority);
        fold(&mut self.search, patch.search);
        fold(&mut self.assigned_to, patch.assigned_to);
        fold(&mut self.created_by, patch.created_by);
    }

    /// Projection over the keys whose changes trigger a re-fetch.
    ///
    /// Search is excluded: free-text input drives explicit fetches
    /// from the view, not the reactive path.
    pub fn watch_key(&self) -> FilterWatchKey {
        FilterWatchKey {
            status: self.status.clone(),
            priority: self.priority.clone(),
            assigned_to: self.assigned_to.clone(),
            created_by: self.created_by.clone(),
        }
    }

    /// Wire query parameters for the listing endpoint.
    /// Only recognized, non-empty keys are emitted.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let pairs = [
            ("status", &self.status),
            ("priority", &self.priority),
            ("search", &self.search),
            ("assignedTo", &self.assigned_to),
            ("createdBy", &self.created_by),
        ];
        for (key, value) in pairs {
            if let Some(v) = value {
                if !v.is_empty() {
                    params.push((key, v.clone()));
                }
            }
        }
        params
    }
}

/// A partial filter change. `None` keys are left untouched by
/// [`FilterSet::merge`]; `Some("")` clears the key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
}

impl FilterPatch {
    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status = Some(value.into());
        self
    }

    pub fn priority(mut self, value: impl Into<String>) -> Self {
        self.priority = Some(value.into());
        self
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(value.into());
        self
    }

    pub fn assigned_to(mut self, value: impl Into<String>) -> Self {
        self.assigned_to = Some(value.into());
        self
    }

    pub fn created_by(mut self, value: impl Into<String>) -> Self {
        self.created_by = Some(value.into());
        self
    }
}

/// Value snapshot of the reactive filter keys. Compared for equality
/// to decide whether a filter change warrants a new listing fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterWatchKey {
    status: Option<String>,
    priority: Option<String>,
    assigned_to: Option<String>,
    created_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_preserves_absent_keys() {
        let mut filters = FilterSet::empty();
        filters.merge(FilterPatch::default().status("pending"));
        filters.merge(FilterPatch::default().priority("urgent"));

        assert_eq!(filters.status.as_deref(), Some("pending"));
        assert_eq!(filters.priority.as_deref(), Some("urgent"));
    }

    #[test]
    fn test_merge_empty_string_clears_key() {
        let mut filters = FilterSet::empty();
        filters.merge(FilterPatch::default().status("pending"));
        filters.merge(FilterPatch::default().status(""));

        assert!(filters.is_empty());
    }

    #[test]
    fn test_value_equality_ignores_construction_path() {
        let mut a = FilterSet::empty();
        a.merge(FilterPatch::default().status("pending").priority("high"));

        let mut b = FilterSet::empty();
        b.merge(FilterPatch::default().priority("high"));
        b.merge(FilterPatch::default().status("pending"));

        assert_eq!(a, b);
        assert_eq!(a.watch_key(), b.watch_key());
    }

    #[test]
    fn test_watch_key_ignores_search() {
        let mut a = FilterSet::empty();
        a.merge(FilterPatch::default().status("pending"));
        let mut b = a.clone();
        b.merge(FilterPatch::default().search("deploy"));

        assert_ne!(a, b);
        assert_eq!(a.watch_key(), b.watch_key());
    }

    #[test]
    fn test_query_params_skip_empty_keys() {
        let mut filters = FilterSet::empty();
        filters.merge(
            FilterPatch::default()
                .priority("urgent")
                .assigned_to("u42"),
        );

        let params = filters.query_params();
        assert_eq!(
            params,
            vec![
                ("priority", "urgent".to_string()),
                ("assignedTo", "u42".to_string()),
            ]
        );
    }
}

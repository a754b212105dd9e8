//! Pagination descriptor and the paged listing response.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Position of the current page within the full (filtered) result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number.
    pub current_page: u32,

    /// Total pages for the applied filter set, at least 1.
    pub total_pages: u32,

    /// Total tasks matching the applied filter set.
    pub total_tasks: u64,

    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Descriptor for an empty, unfetched store.
    pub fn empty() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_tasks: 0,
            has_next_page: false,
            has_prev_page: false,
        }
    }

    /// Checks the structural invariant the server is expected to uphold:
    /// `has_next_page == current_page < total_pages` and
    /// `has_prev_page == current_page > 1`.
    pub fn is_consistent(&self) -> bool {
        self.current_page >= 1
            && self.total_pages >= 1
            && self.has_next_page == (self.current_page < self.total_pages)
            && self.has_prev_page == (self.current_page > 1)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty()
    }
}

/// One page of tasks plus its pagination descriptor, as returned by
/// the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_descriptor_is_consistent() {
        assert!(Pagination::empty().is_consistent());
    }

    #[test]
    fn test_consistency_check() {
        let middle = Pagination {
            current_page: 2,
            total_pages: 3,
            total_tasks: 25,
            has_next_page: true,
            has_prev_page: true,
        };
        assert!(middle.is_consistent());

        let broken = Pagination {
            has_next_page: true,
            ..Pagination::empty()
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_single_page_of_eight() {
        // Page 1 of 1 with 8 tasks: neither direction available.
        let page = Pagination {
            current_page: 1,
            total_pages: 1,
            total_tasks: 8,
            has_next_page: false,
            has_prev_page: false,
        };
        assert!(page.is_consistent());
    }

    #[test]
    fn test_decodes_wire_names() {
        let json = r#"{
            "currentPage": 1,
            "totalPages": 4,
            "totalTasks": 37,
            "hasNextPage": true,
            "hasPrevPage": false
        }"#;
        let p: Pagination = serde_json::from_str(json).unwrap();
        assert_eq!(p.total_tasks, 37);
        assert!(p.is_consistent());
    }
}

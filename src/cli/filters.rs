//! Filter enums for CLI list commands

use clap::ValueEnum;

use crate::core::entity::OrderStatus;

/// Order status filter for `order list`
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Open orders only
    Open,
    /// Closed orders only
    Closed,
    /// Orders in progress only
    InProgress,
    /// Orders waiting for information only
    NeedInfo,
    /// Everything not closed
    Active,
    /// All statuses - default
    #[default]
    All,
}

impl StatusFilter {
    /// Check if a status matches this filter
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self.exact() {
            Some(wanted) => status == wanted,
            None => *self == StatusFilter::All || status != OrderStatus::Closed,
        }
    }

    /// The single status this filter selects, if it selects exactly one
    ///
    /// Exact filters can be pushed down to the store query.
    pub fn exact(&self) -> Option<OrderStatus> {
        match self {
            StatusFilter::Open => Some(OrderStatus::Open),
            StatusFilter::Closed => Some(OrderStatus::Closed),
            StatusFilter::InProgress => Some(OrderStatus::InProgress),
            StatusFilter::NeedInfo => Some(OrderStatus::NeedInfo),
            StatusFilter::Active | StatusFilter::All => None,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.exact() {
            Some(status) => write!(f, "{}", status),
            None if *self == StatusFilter::Active => write!(f, "active"),
            None => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::Open.matches(OrderStatus::Open));
        assert!(!StatusFilter::Open.matches(OrderStatus::Closed));

        assert!(StatusFilter::Active.matches(OrderStatus::InProgress));
        assert!(StatusFilter::Active.matches(OrderStatus::NeedInfo));
        assert!(!StatusFilter::Active.matches(OrderStatus::Closed));

        assert!(StatusFilter::All.matches(OrderStatus::Closed));
    }

    #[test]
    fn test_exact_filters() {
        assert_eq!(StatusFilter::NeedInfo.exact(), Some(OrderStatus::NeedInfo));
        assert_eq!(StatusFilter::Active.exact(), None);
        assert_eq!(StatusFilter::All.exact(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusFilter::InProgress.to_string(), "in progress");
        assert_eq!(StatusFilter::Active.to_string(), "active");
    }
}

//! Dependency tagging for semantic categorization.

use std::time::Duration;

/// Well-known dependency categories of the storefront API.
///
/// Each tag carries a default timeout and retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// Product catalog lookups (`/products/{id}`).
    Catalog,
    /// Stock/availability checks (`/stock/{id}`).
    Inventory,
    /// Custom dependency with name.
    Custom(&'static str),
}

impl DependencyTag {
    /// Get the default timeout for this dependency type.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Catalog => Duration::from_millis(3000),
            Self::Inventory => Duration::from_millis(2000),
            Self::Custom(_) => Duration::from_millis(5000),
        }
    }

    /// Get the default max retries for this dependency type.
    pub fn default_max_retries(&self) -> u32 {
        match self {
            Self::Inventory => 1,
            _ => 0,
        }
    }

    /// Get the name of this dependency.
    pub fn name(&self) -> &str {
        match self {
            Self::Catalog => "catalog",
            Self::Inventory => "inventory",
            Self::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

//! Department categories and how questions are routed to them.
//!
//! - [`Category`]: the closed set of departments
//! - [`keywords`]: deterministic keyword fast path
//! - [`parsing`]: interpretation of a model's classification reply

pub mod keywords;
pub mod parsing;

pub use keywords::{KeywordRouter, KeywordSet};

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A department bucket (Value Object)
///
/// The token returned by [`Category::as_str`] is stable: it is the wire form,
/// the classification-prompt answer token, and the storage path segment of
/// the category's retrieval index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Human resources and finance (leave, payroll, expenses, insurance)
    HrFinance,
    /// Information technology (VPN, accounts, devices, network)
    It,
}

impl Category {
    /// All categories, in routing priority order.
    pub const ALL: [Category; 2] = [Category::HrFinance, Category::It];

    /// Stable boundary token
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::HrFinance => "hr_finance",
            Category::It => "it",
        }
    }

    /// Label shown to staff
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::HrFinance => "人事財務",
            Category::It => "資訊",
        }
    }

    /// Directory name of this category's index or document bucket.
    pub fn path_segment(&self) -> &'static str {
        self.as_str()
    }

    /// Inverse of [`Category::path_segment`].
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        segment.parse().ok()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hr_finance" => Ok(Category::HrFinance),
            "it" => Ok(Category::It),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}

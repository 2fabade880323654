//! # Access Policy Configuration
//!
//! ## Role
//! Selects how much index validation the access paths perform. The enclosing
//! likelihood engine owns its configuration surface; this type is meant to be
//! embedded there (it derives `serde` traits for that reason).
//!
//! ## Modes
//! - `Checked` (default): every element access validates each axis index
//!   against its extent and fails fast with a descriptive message.
//! - `Unchecked`: per-axis validation becomes a debug assertion. The flat
//!   offset is still bounds-checked against the borrowed slice, so an
//!   out-of-range axis index reads a different element instead of stray memory.
//!
//! ## Example
//! ```
//! use genotensor::config::CheckMode;
//!
//! let mode: CheckMode = serde_json::from_str("\"unchecked\"").unwrap();
//! assert!(!mode.is_checked());
//! assert!(CheckMode::default().is_checked());
//! ```

use serde::{Deserialize, Serialize};

/// Index validation policy for views and Kronecker products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Validate every axis index on access
    #[default]
    Checked,
    /// Validate axis indices in debug builds only
    Unchecked,
}

impl CheckMode {
    /// Whether per-axis validation runs in release builds
    #[inline]
    pub const fn is_checked(self) -> bool {
        matches!(self, CheckMode::Checked)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CheckMode::Checked => "checked",
            CheckMode::Unchecked => "unchecked",
        }
    }
}

impl std::fmt::Display for CheckMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

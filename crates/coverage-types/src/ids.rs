//! Strongly-typed identifiers for teams and events.
//!
//! Team numbers and event keys travel together through every stage of the
//! analysis. Wrapping them prevents a team number from being used where an
//! event key is expected (and vice versa) and gives both a stable ordering
//! for deterministic iteration.

use serde::{Deserialize, Serialize};

/// Generates `Display` and two-way `From` conversions for a key newtype.
macro_rules! impl_key_conversions {
    ($name:ident, $inner:ty) => {
        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(key: $name) -> Self {
                key.0
            }
        }
    };
}

/// A registered team's number (e.g. `3314`).
///
/// Ordering is numeric, which is what the max-team-number bound and the
/// lower-number tie-break both rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamNumber(pub u32);

impl TeamNumber {
    /// Return the inner numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl_key_conversions!(TeamNumber, u32);

/// A unique event key within a district and year (e.g. `2025miket`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKey(pub String);

impl EventKey {
    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl_key_conversions!(EventKey, String);

use crate::error::DocumentError;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Responsive size bucket, ordered smallest to largest.
///
/// `Xlg` is the ultimate fallback: lookups cascade upward and stop there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xxs,
    Xs,
    Sm,
    Md,
    Lg,
    Xlg,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::Xxs,
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xlg,
    ];

    pub const FALLBACK: Breakpoint = Breakpoint::Xlg;

    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Xxs => "xxs",
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xlg => "xlg",
        }
    }

    /// Key used inside a multi-breakpoint value (`"$md"`).
    pub fn storage_key(self) -> &'static str {
        match self {
            Breakpoint::Xxs => "$xxs",
            Breakpoint::Xs => "$xs",
            Breakpoint::Sm => "$sm",
            Breakpoint::Md => "$md",
            Breakpoint::Lg => "$lg",
            Breakpoint::Xlg => "$xlg",
        }
    }

    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix('$').and_then(|name| name.parse().ok())
    }

    /// This breakpoint followed by every larger one, ending at `Xlg`.
    pub fn cascade(self) -> impl Iterator<Item = Breakpoint> {
        Self::ALL.into_iter().skip(self as usize)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Breakpoint {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|bp| bp.name() == s)
            .ok_or_else(|| DocumentError::InvalidBreakpoint(s.to_string()))
    }
}

/// Whether a value is stored per breakpoint.
///
/// Any object with at least one `$<breakpoint>` key qualifies. Empty objects
/// and objects with only other keys never do.
pub fn is_multi_breakpoint(value: &Value) -> bool {
    match value {
        Value::Object(map) => map
            .keys()
            .any(|key| Breakpoint::from_storage_key(key).is_some()),
        _ => false,
    }
}

/// Breakpoints a multi-breakpoint value carries a key for, in cascade order.
pub fn breakpoint_keys(value: &Value) -> Vec<Breakpoint> {
    match value {
        Value::Object(map) => Breakpoint::ALL
            .iter()
            .copied()
            .filter(|bp| map.contains_key(bp.storage_key()))
            .collect(),
        _ => Vec::new(),
    }
}

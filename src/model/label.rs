//! Class labels and their integer encoding.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UjaranError;

/// The three target classes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Label {
    /// Not hate speech.
    Netral = 0,
    /// Hate speech targeting race or ethnicity.
    Ras = 1,
    /// Hate speech targeting religion.
    Agama = 2,
}

impl Label {
    /// Every label, in id order.
    pub const ALL: [Label; 3] = [Label::Netral, Label::Ras, Label::Agama];

    /// Integer id used by the classifier.
    pub fn id(self) -> usize {
        self as usize
    }

    /// Label for an integer id.
    pub fn from_id(id: usize) -> Option<Label> {
        Self::ALL.get(id).copied()
    }

    /// Canonical name as it appears in datasets.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Netral => "Netral",
            Label::Ras => "Ras",
            Label::Agama => "Agama",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = UjaranError;

    /// Parse a label name, ignoring surrounding whitespace and ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                UjaranError::input(format!(
                    "unknown label {name:?}; expected one of Netral, Ras, Agama"
                ))
            })
    }
}

/// Label name -> id.
pub fn map_target() -> BTreeMap<String, usize> {
    Label::ALL
        .into_iter()
        .map(|label| (label.as_str().to_string(), label.id()))
        .collect()
}

/// Id -> label name.
pub fn reverse_map() -> BTreeMap<usize, String> {
    Label::ALL
        .into_iter()
        .map(|label| (label.id(), label.as_str().to_string()))
        .collect()
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ClassificationError;

/// The closed set of labels the dog model can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationResult {
    #[serde(rename = "dog")]
    Dog,
    #[serde(rename = "not_dog")]
    NotDog,
}

impl ClassificationResult {
    pub const ALL: [ClassificationResult; 2] = [Self::Dog, Self::NotDog];

    /// Identifier the model uses for this label.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::NotDog => "not_dog",
        }
    }

    pub fn is_dog(&self) -> bool {
        matches!(self, Self::Dog)
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Exact, case-sensitive match against the model identifiers.
impl FromStr for ClassificationResult {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.identifier() == s)
            .ok_or_else(|| ClassificationError::UnknownLabel(s.to_string()))
    }
}

/// One ranked entry returned by the inference layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub label: String,
    pub confidence: f32,
}

impl Observation {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Resolve a ranked observation list to a label.
///
/// `None` means the model produced no result set at all. Only the first
/// (highest-ranked) entry is consulted.
pub fn resolve_top_label(
    observations: Option<&[Observation]>,
) -> Result<ClassificationResult, ClassificationError> {
    let observations = observations.ok_or(ClassificationError::NoModelResult)?;
    let top = observations
        .first()
        .ok_or(ClassificationError::NoObservations)?;
    top.label.parse()
}

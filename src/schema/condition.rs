use serde::{Deserialize, Serialize};

use super::materials::Value;

/// A point in an experiment's manipulation space.
///
/// Each slot is a small integer whose meaning is fixed by the experiment
/// variant (e.g. slot 0 = "agent is topical", slot 1 = "agent is subject").
/// `None` marks a slot the variant deliberately leaves unset; it
/// serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition(Vec<Option<u8>>);

impl Condition {
    pub fn new(slots: Vec<Option<u8>>) -> Self {
        Self(slots)
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn slots(&self) -> &[Option<u8>] {
        &self.0
    }

    /// The value at `index`, or `None` if the slot is absent or unset.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied().flatten()
    }

    /// Slot digits concatenated, e.g. `"010"`. Unset slots render as `x`.
    pub fn key(&self) -> String {
        self.0
            .iter()
            .map(|slot| match slot {
                Some(v) => v.to_string(),
                None => "x".to_string(),
            })
            .collect()
    }
}

impl<const N: usize> From<[u8; N]> for Condition {
    fn from(slots: [u8; N]) -> Self {
        Self(slots.iter().map(|v| Some(*v)).collect())
    }
}

impl<const N: usize> From<[Option<u8>; N]> for Condition {
    fn from(slots: [Option<u8>; N]) -> Self {
        Self(slots.to_vec())
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Some(v) => write!(f, "{v}")?,
                None => f.write_str("None")?,
            }
        }
        f.write_str(")")
    }
}

/// How a trial identifies its condition in the output.
///
/// Experimental trials carry their condition tuple; fillers carry a label
/// list starting with `"filler"` followed by their class values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConditionId {
    Experimental(Condition),
    Filler(Vec<Value>),
}

impl ConditionId {
    /// Build a filler label from its class values.
    pub fn filler(labels: impl IntoIterator<Item = Value>) -> Self {
        let mut all = vec![Value::from("filler")];
        all.extend(labels);
        ConditionId::Filler(all)
    }

    pub fn is_filler(&self) -> bool {
        matches!(self, ConditionId::Filler(_))
    }
}

/// Errors raised while rendering trials from materials.
use thiserror::Error;

use crate::schema::condition::Condition;
use crate::schema::materials::{Item, Value};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("item {item}: field '{field}' {reason}")]
    MalformedField {
        item: String,
        field: String,
        reason: String,
    },
    #[error("insufficient materials in '{pool}': requested {requested} items, {available} usable")]
    InsufficientMaterials {
        pool: String,
        requested: usize,
        available: usize,
    },
    #[error("unknown placeholder subtype '{subtype}' for PERSON{id}")]
    UnknownPlaceholderSubtype { id: String, subtype: String },
    #[error("no unique name found after {0} draws; name corpus exhausted")]
    NameCorpusExhausted(usize),
    #[error("condition {condition} has no usable slot {slot}")]
    ConditionSlot { condition: Condition, slot: usize },
    #[error("condition space is empty")]
    EmptyConditionSpace,
}

impl RenderError {
    pub(crate) fn malformed(item: &Item, field: &str, reason: &str) -> Self {
        RenderError::MalformedField {
            item: item
                .id()
                .map(Value::to_string)
                .unwrap_or_else(|| "<no id>".to_string()),
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Read a condition slot, treating an absent or unset slot as a
/// configuration defect.
pub(crate) fn slot(condition: &Condition, index: usize) -> Result<u8, RenderError> {
    condition.get(index).ok_or_else(|| RenderError::ConditionSlot {
        condition: condition.clone(),
        slot: index,
    })
}

/// Read a 0/1 condition slot as a flag.
pub(crate) fn flag_slot(condition: &Condition, index: usize) -> Result<bool, RenderError> {
    match slot(condition, index)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(RenderError::ConditionSlot {
            condition: condition.clone(),
            slot: index,
        }),
    }
}

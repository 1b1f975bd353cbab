/// Materials filtering and sampling, and condition sampling.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::error::RenderError;
use crate::schema::condition::Condition;
use crate::schema::materials::Item;

/// Why an item was dropped before sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    Excluded,
    MissingField(String),
    EmptyField(String),
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::Excluded => f.write_str("marked for exclusion"),
            DropReason::MissingField(field) => write!(f, "missing field '{field}'"),
            DropReason::EmptyField(field) => write!(f, "empty field '{field}'"),
        }
    }
}

/// Returns true if the item is not excluded, has every `required` field
/// filled, and carries every `present` field at all. `present` fields may
/// hold `false` or `""`.
pub fn is_usable(item: &Item, required: &[&str], present: &[&str]) -> bool {
    !item.is_excluded()
        && required.iter().all(|field| item.is_filled(field))
        && present.iter().all(|field| item.get(field).is_some())
}

/// Every reason `item` would be dropped; empty for usable items.
pub fn drop_reasons(item: &Item, required: &[&str], present: &[&str]) -> Vec<DropReason> {
    let mut reasons = Vec::new();
    if item.is_excluded() {
        reasons.push(DropReason::Excluded);
    }
    for field in required {
        match item.get(field) {
            None => reasons.push(DropReason::MissingField(field.to_string())),
            Some(v) if v.is_empty() => reasons.push(DropReason::EmptyField(field.to_string())),
            Some(_) => {}
        }
    }
    for field in present {
        if item.get(field).is_none() {
            reasons.push(DropReason::MissingField(field.to_string()));
        }
    }
    reasons
}

/// Keep the usable items, preserving order.
pub fn filter_items<'m, I>(items: I, required: &[&str], present: &[&str]) -> Vec<&'m Item>
where
    I: IntoIterator<Item = &'m Item>,
{
    items
        .into_iter()
        .filter(|item| is_usable(item, required, present))
        .collect()
}

/// Draw `n` distinct items uniformly at random.
pub fn sample_items<'m>(
    items: &[&'m Item],
    n: usize,
    pool: &str,
    rng: &mut StdRng,
) -> Result<Vec<&'m Item>, RenderError> {
    if n > items.len() {
        return Err(RenderError::InsufficientMaterials {
            pool: pool.to_string(),
            requested: n,
            available: items.len(),
        });
    }
    Ok(items.choose_multiple(rng, n).copied().collect())
}

/// Draw `n` conditions independently, with replacement.
///
/// Repeats are expected: balance across conditions comes from many
/// sessions in aggregate, not from any single one. Listing a condition
/// twice in `space` doubles its weight.
pub fn sample_conditions(
    space: &[Condition],
    n: usize,
    rng: &mut StdRng,
) -> Result<Vec<Condition>, RenderError> {
    if space.is_empty() {
        return Err(RenderError::EmptyConditionSpace);
    }
    Ok((0..n)
        .map(|_| space[rng.gen_range(0..space.len())].clone())
        .collect())
}

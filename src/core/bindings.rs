/// Variable binding cache: per-trial person placeholder resolution.
use rand::rngs::StdRng;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::error::RenderError;
use crate::core::names::{Gender, NameCorpus};

/// Upper bound on redraws when looking for a name not yet used in the trial.
const MAX_NAME_DRAWS: usize = 1000;

/// Subtype bound alongside every person: the possessive determiner.
pub const POSSESSIVE: &str = "POSS";

/// Maps placeholder keys (`PERSON1`, `PERSON1_POSS`) to their resolved text
/// for the duration of one trial.
///
/// Once `PERSON<n>` is bound, every later reference to it or one of its
/// subtypes returns the same value. Distinct persons never share a first
/// name. Not meant to outlive the trial it was created for.
#[derive(Debug, Clone, Default)]
pub struct BindingCache {
    bindings: FxHashMap<String, String>,
    names: FxHashSet<String>,
}

fn binding_key(id: &str, subtype: Option<&str>) -> String {
    match subtype {
        Some(sub) => format!("PERSON{id}_{sub}"),
        None => format!("PERSON{id}"),
    }
}

impl BindingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every binding.
    pub fn reset(&mut self) {
        self.bindings.clear();
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The bound value for a placeholder, if any.
    pub fn get(&self, id: &str, subtype: Option<&str>) -> Option<&str> {
        self.bindings
            .get(&binding_key(id, subtype))
            .map(String::as_str)
    }

    /// Resolve `PERSON<id>[_<subtype>]`, binding a fresh person on first use.
    pub fn resolve(
        &mut self,
        id: &str,
        subtype: Option<&str>,
        corpus: &NameCorpus,
        rng: &mut StdRng,
    ) -> Result<String, RenderError> {
        if self.bindings.contains_key(&binding_key(id, None)) {
            return self
                .get(id, subtype)
                .map(str::to_string)
                .ok_or_else(|| RenderError::UnknownPlaceholderSubtype {
                    id: id.to_string(),
                    subtype: subtype.unwrap_or_default().to_string(),
                });
        }

        let (name, gender) = self.draw_unique_name(corpus, rng)?;
        self.names.insert(name.clone());
        self.bindings.insert(binding_key(id, None), name);
        self.bindings.insert(
            binding_key(id, Some(POSSESSIVE)),
            gender.possessive().to_string(),
        );

        self.resolve(id, subtype, corpus, rng)
    }

    fn draw_unique_name(
        &self,
        corpus: &NameCorpus,
        rng: &mut StdRng,
    ) -> Result<(String, Gender), RenderError> {
        for _ in 0..MAX_NAME_DRAWS {
            let (name, gender) = corpus.draw(rng, None);
            if !self.names.contains(&name) {
                return Ok((name, gender));
            }
        }
        Err(RenderError::NameCorpusExhausted(MAX_NAME_DRAWS))
    }
}

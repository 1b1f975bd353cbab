/// Field processor: placeholder substitution in materials text.
use rand::rngs::StdRng;

use crate::core::bindings::BindingCache;
use crate::core::error::RenderError;
use crate::core::names::NameCorpus;
use crate::schema::materials::{Item, Value};

const PLACEHOLDER_PREFIX: &str = "%PERSON";

/// A piece of materials text split around person placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Text emitted as-is.
    Literal(&'t str),
    /// `%PERSON<id>%` or `%PERSON<id>_<subtype>%`.
    Person {
        id: &'t str,
        subtype: Option<&'t str>,
    },
}

/// Split `text` into literal runs and person placeholders.
///
/// A `%` that does not start a well-formed placeholder stays literal.
pub fn parse_placeholders(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('%') {
        let start = cursor + offset;
        match match_placeholder(&text[start..]) {
            Some((len, id, subtype)) => {
                if literal_start < start {
                    segments.push(Segment::Literal(&text[literal_start..start]));
                }
                segments.push(Segment::Person { id, subtype });
                cursor = start + len;
                literal_start = cursor;
            }
            None => cursor = start + 1,
        }
    }

    if literal_start < text.len() {
        segments.push(Segment::Literal(&text[literal_start..]));
    }
    segments
}

/// Match a placeholder at the start of `s`, returning its byte length,
/// digit id and optional subtype.
fn match_placeholder(s: &str) -> Option<(usize, &str, Option<&str>)> {
    let rest = s.strip_prefix(PLACEHOLDER_PREFIX)?;
    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let id = &rest[..digits];
    let after = &rest[digits..];
    let head = PLACEHOLDER_PREFIX.len() + digits;

    if after.starts_with('%') {
        return Some((head + 1, id, None));
    }

    let sub = after.strip_prefix('_')?;
    let end = sub.find('%')?;
    if end == 0 {
        return None;
    }
    // '_' + subtype + closing '%'
    Some((head + 1 + end + 1, id, Some(&sub[..end])))
}

/// Resolves materials fields for one trial.
///
/// Owns the trial's [`BindingCache`], so a processor must not be reused
/// across trials; create a new one (or call [`FieldProcessor::reset`]) for
/// each.
pub struct FieldProcessor<'a> {
    corpus: &'a NameCorpus,
    rng: &'a mut StdRng,
    cache: BindingCache,
}

impl<'a> FieldProcessor<'a> {
    pub fn new(corpus: &'a NameCorpus, rng: &'a mut StdRng) -> Self {
        Self {
            corpus,
            rng,
            cache: BindingCache::new(),
        }
    }

    pub fn reset(&mut self) {
        self.cache.reset();
    }

    pub fn cache(&self) -> &BindingCache {
        &self.cache
    }

    /// Substitute every person placeholder in `item[field]`.
    pub fn process(&mut self, item: &Item, field: &str) -> Result<String, RenderError> {
        let text = require_text(item, field)?;
        self.substitute(text)
    }

    /// Like [`FieldProcessor::process`], but an absent or empty field yields
    /// `None`.
    pub fn process_optional(
        &mut self,
        item: &Item,
        field: &str,
    ) -> Result<Option<String>, RenderError> {
        match item.text(field) {
            Some(text) if !text.is_empty() => self.substitute(text).map(Some),
            _ => Ok(None),
        }
    }

    pub fn substitute(&mut self, text: &str) -> Result<String, RenderError> {
        let mut out = String::with_capacity(text.len());
        for segment in parse_placeholders(text) {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Person { id, subtype } => {
                    let value = self.cache.resolve(id, subtype, self.corpus, self.rng)?;
                    out.push_str(&value);
                }
            }
        }
        Ok(out)
    }
}

/// The text of a field that must be present.
pub fn require_text<'i>(item: &'i Item, field: &str) -> Result<&'i str, RenderError> {
    match item.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(RenderError::malformed(item, field, "is not text")),
        None => Err(RenderError::malformed(item, field, "is missing")),
    }
}

/// A yes/no field that must be present. Null counts as no.
pub fn require_flag(item: &Item, field: &str) -> Result<bool, RenderError> {
    item.get(field)
        .map(Value::is_truthy)
        .ok_or_else(|| RenderError::malformed(item, field, "is missing"))
}

/// The item's row identifier.
pub fn require_id(item: &Item) -> Result<Value, RenderError> {
    item.id()
        .cloned()
        .ok_or_else(|| RenderError::malformed(item, "id", "is missing"))
}

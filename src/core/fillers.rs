/// Filler trial builders.
///
/// Balanced fillers split the requested count evenly between two rating
/// classes; the other kinds draw from the whole pool.
use rand::rngs::StdRng;
use tracing::debug;

use crate::core::error::RenderError;
use crate::core::experiment::FillerBuilder;
use crate::core::fields::{require_id, require_text, FieldProcessor};
use crate::core::names::NameCorpus;
use crate::core::phrase::sentence;
use crate::core::sampling::sample_items;
use crate::schema::condition::ConditionId;
use crate::schema::materials::{Item, MaterialsSet, Value};
use crate::schema::trial::{GoodBad, Measure, Presentation, SentenceOptions, Sentences, Trial};

/// Rating classes of comprehension fillers.
pub const EMPTY_FULL: [&str; 2] = ["empty", "full"];
/// Rating classes of acceptability fillers.
pub const BAD_GOOD: [&str; 2] = ["bad", "good"];

/// How a balanced filler is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalancedFormat {
    /// `sentence` plus `prompt`.
    Prompted,
    /// One-element `sentences` list plus `prompt`.
    PromptedSequence,
    /// `sentence` only.
    Acceptability,
    /// `sentence`, `prompt` and slider labels.
    Slider,
}

/// Fillers drawn half from each of two `rating` classes.
#[derive(Debug, Clone)]
pub struct BalancedFillers {
    classes: [&'static str; 2],
    format: BalancedFormat,
}

impl BalancedFillers {
    /// The first class receives `⌊n/2⌋` fillers, the second the rest.
    pub fn new(classes: [&'static str; 2], format: BalancedFormat) -> Self {
        Self { classes, format }
    }

    pub fn empty_full(format: BalancedFormat) -> Self {
        Self::new(EMPTY_FULL, format)
    }

    pub fn bad_good(format: BalancedFormat) -> Self {
        Self::new(BAD_GOOD, format)
    }

    fn render(
        &self,
        item: &Item,
        class: &str,
        materials_id: &str,
        fields: &mut FieldProcessor<'_>,
    ) -> Result<Trial, RenderError> {
        let text = sentence(&fields.process(item, "sentence")?);
        let presentation = match self.format {
            BalancedFormat::Prompted => Presentation {
                sentence: Some(text),
                prompt: Some(fields.process(item, "prompt")?),
                ..Default::default()
            },
            BalancedFormat::PromptedSequence => Presentation {
                sentences: Some(Sentences::Sequence(vec![text])),
                prompt: Some(fields.process(item, "prompt")?),
                ..Default::default()
            },
            BalancedFormat::Acceptability => Presentation {
                sentence: Some(text),
                ..Default::default()
            },
            BalancedFormat::Slider => {
                let label_max = fields.process(item, "label_max")?;
                let label_min = if require_text(item, "scale type")? == "fill" {
                    "0% / empty"
                } else {
                    "0% / not covered at all"
                };
                Presentation {
                    sentence: Some(text),
                    prompt: Some(fields.process(item, "prompt")?),
                    slider_labels: Some([label_min.to_string(), format!("100% / {label_max}")]),
                    measure: Some(Measure::Slider),
                    ..Default::default()
                }
            }
        };

        let materials_id = match self.format {
            BalancedFormat::Prompted | BalancedFormat::Acceptability => None,
            BalancedFormat::PromptedSequence | BalancedFormat::Slider => {
                Some(materials_id.to_string())
            }
        };

        Ok(Trial {
            materials_id,
            item_id: require_id(item)?,
            condition_id: ConditionId::filler([Value::from(class)]),
            lexicon: None,
            presentation,
        })
    }
}

impl FillerBuilder for BalancedFillers {
    fn build_fillers(
        &self,
        materials: &MaterialsSet,
        count: usize,
        corpus: &NameCorpus,
        rng: &mut StdRng,
    ) -> Result<Vec<Trial>, RenderError> {
        let first = count / 2;
        let mut chosen = Vec::with_capacity(count);
        for (class, n) in self.classes.iter().zip([first, count - first]) {
            let pool: Vec<&Item> = materials
                .items
                .iter()
                .filter(|item| item.text("rating") == Some(*class))
                .collect();
            debug!(
                materials = %materials.name,
                class = *class,
                available = pool.len(),
                requested = n,
                "filler class"
            );
            let pool_name = format!("{} ({class})", materials.name);
            for item in sample_items(&pool, n, &pool_name, rng)? {
                chosen.push((item, *class));
            }
        }

        let mut trials = Vec::with_capacity(chosen.len());
        for (item, class) in chosen {
            let mut fields = FieldProcessor::new(corpus, rng);
            trials.push(self.render(item, class, &materials.name, &mut fields)?);
        }
        Ok(trials)
    }
}

/// How a prefix and its completion are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionJoin {
    /// "<prefix>, <conj> <completion>."
    Conjoined,
    /// "<Prefix>. <Completion>."
    Sentences,
}

/// Production fillers offering a good and a bad completion of a prefix.
#[derive(Debug, Clone)]
pub struct CompletionFillers {
    join: CompletionJoin,
}

impl CompletionFillers {
    pub fn new(join: CompletionJoin) -> Self {
        Self { join }
    }

    fn render(
        &self,
        item: &Item,
        materials_id: &str,
        fields: &mut FieldProcessor<'_>,
    ) -> Result<Trial, RenderError> {
        let prefix = fields.process(item, "prefix")?;
        let good = fields.process(item, "good_completion")?;
        let bad = fields.process(item, "bad_completion")?;

        let (sentences, conjunction) = match self.join {
            CompletionJoin::Conjoined => {
                let conj = fields.process(item, "conj")?;
                let pair = GoodBad {
                    good: sentence(&format!("{prefix}, {conj} {good}")),
                    bad: sentence(&format!("{prefix}, {conj} {bad}")),
                };
                (pair, Some(conj))
            }
            CompletionJoin::Sentences => {
                let lead = sentence(&prefix);
                let pair = GoodBad {
                    good: format!("{lead} {}", sentence(&good)),
                    bad: format!("{lead} {}", sentence(&bad)),
                };
                (pair, None)
            }
        };

        Ok(Trial {
            materials_id: Some(materials_id.to_string()),
            item_id: require_id(item)?,
            condition_id: ConditionId::filler([require_value(item, "manipulation")?]),
            lexicon: None,
            presentation: Presentation {
                sentences: Some(Sentences::GoodBad(sentences)),
                conjunction,
                ..Default::default()
            },
        })
    }
}

impl FillerBuilder for CompletionFillers {
    fn build_fillers(
        &self,
        materials: &MaterialsSet,
        count: usize,
        corpus: &NameCorpus,
        rng: &mut StdRng,
    ) -> Result<Vec<Trial>, RenderError> {
        let pool: Vec<&Item> = materials.items.iter().collect();
        let mut trials = Vec::with_capacity(count);
        for item in sample_items(&pool, count, &materials.name, rng)? {
            let mut fields = FieldProcessor::new(corpus, rng);
            trials.push(self.render(item, &materials.name, &mut fields)?);
        }
        Ok(trials)
    }
}

/// Production fillers offering a good and a bad sentence to choose from.
#[derive(Debug, Clone, Default)]
pub struct SentenceOptionFillers;

impl SentenceOptionFillers {
    fn render(
        &self,
        item: &Item,
        materials_id: &str,
        fields: &mut FieldProcessor<'_>,
    ) -> Result<Trial, RenderError> {
        let options = GoodBad {
            good: sentence(&fields.process(item, "good_sentence")?),
            bad: sentence(&fields.process(item, "bad_sentence")?),
        };
        Ok(Trial {
            materials_id: Some(materials_id.to_string()),
            item_id: require_id(item)?,
            condition_id: ConditionId::filler([
                require_value(item, "manipulation")?,
                require_value(item, "bad_ungrammatical")?,
            ]),
            lexicon: None,
            presentation: Presentation {
                sentence_options: Some(SentenceOptions::GoodBad(options)),
                ..Default::default()
            },
        })
    }
}

impl FillerBuilder for SentenceOptionFillers {
    fn build_fillers(
        &self,
        materials: &MaterialsSet,
        count: usize,
        corpus: &NameCorpus,
        rng: &mut StdRng,
    ) -> Result<Vec<Trial>, RenderError> {
        let pool: Vec<&Item> = materials.items.iter().collect();
        let mut trials = Vec::with_capacity(count);
        for item in sample_items(&pool, count, &materials.name, rng)? {
            let mut fields = FieldProcessor::new(corpus, rng);
            trials.push(self.render(item, &materials.name, &mut fields)?);
        }
        Ok(trials)
    }
}

fn require_value(item: &Item, field: &str) -> Result<Value, RenderError> {
    item.get(field)
        .cloned()
        .ok_or_else(|| RenderError::malformed(item, field, "is missing"))
}

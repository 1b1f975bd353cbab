/// Spray-load alternation experiments: "Mary sprayed paint on the wall" vs.
/// "Mary sprayed the wall with paint".
///
/// Condition slots: 0 = theme is the direct object, 1 = location phrase is
/// heavy, 2 = theme phrase is heavy.
use std::collections::BTreeMap;

use crate::core::error::{flag_slot, RenderError};
use crate::core::experiment::{Experiment, ExperimentalBuilder};
use crate::core::fields::{require_flag, require_id, require_text, FieldProcessor};
use crate::core::fillers::{BalancedFillers, BalancedFormat, SentenceOptionFillers};
use crate::core::phrase::{copula, how_much_question, join_words, sentence};
use crate::schema::condition::{Condition, ConditionId};
use crate::schema::materials::Item;
use crate::schema::trial::{
    Lexicon, Measure, Presentation, SentenceOptions, Sentences, SprayLoadLexicon, Trial,
    VerbForms, WeightedPhrase,
};

pub const SPRAY_LOAD_FIELDS: &[&str] = &[
    "S",
    "T",
    "T heavy",
    "V",
    "V pres",
    "V past simp",
    "L",
    "L heavy",
    "P",
    "scale type",
];

/// Number flags of the theme and location phrases.
pub const SPRAY_LOAD_FLAG_FIELDS: &[&str] = &["T plural?", "L plural?"];

/// Materials image columns and the keys they are exposed under.
const IMAGE_FIELDS: [(&str, &str); 4] = [
    ("image max", "max"),
    ("image mid intention complete", "mid_intention_complete"),
    ("image mid intention incomplete", "mid_intention_incomplete"),
    ("image min", "min"),
];

pub const IMAGE_PROMPT_SUFFIX: &str =
    "<br/>Pick the image which is best described by the sentence.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprayLoadTask {
    /// Read one sentence and rate how full or covered the location is.
    /// With `images`, trials that have images ask for a picture choice
    /// instead.
    ConstructionMeaning { images: bool },
    /// Choose between the locative and theme-object sentences at a fixed
    /// phrase weight.
    Weight,
}

pub struct SprayLoadBuilder {
    task: SprayLoadTask,
    conditions: Vec<Condition>,
}

impl SprayLoadBuilder {
    pub fn new(task: SprayLoadTask, conditions: Vec<Condition>) -> Self {
        Self { task, conditions }
    }

    fn lexicon(
        &self,
        item: &Item,
        fields: &mut FieldProcessor<'_>,
    ) -> Result<SprayLoadLexicon, RenderError> {
        let images = IMAGE_FIELDS
            .iter()
            .filter_map(|(column, key)| {
                item.text(column)
                    .filter(|path| !path.is_empty())
                    .map(|path| (key.to_string(), path.to_string()))
            })
            .collect();

        Ok(SprayLoadLexicon {
            images,
            subject: fields.process(item, "S")?,
            theme: WeightedPhrase {
                light: fields.process(item, "T")?,
                heavy: fields.process(item, "T heavy")?,
                is_plural: require_flag(item, "T plural?")?,
            },
            location: WeightedPhrase {
                light: fields.process(item, "L")?,
                heavy: fields.process(item, "L heavy")?,
                is_plural: require_flag(item, "L plural?")?,
            },
            verb: VerbForms {
                lemma: fields.process(item, "V")?,
                present: fields.process(item, "V pres")?,
                past_simple: fields.process(item, "V past simp")?,
            },
            scale_type: require_text(item, "scale type")?.to_string(),
            preposition: fields.process(item, "P")?,
            prompt_preposition: fields
                .process_optional(item, "Prompt P")?
                .unwrap_or_default(),
        })
    }

    fn present(
        &self,
        item: &Item,
        lex: &SprayLoadLexicon,
        condition: &Condition,
    ) -> Result<Presentation, RenderError> {
        let all = all_sentences(lex);

        match self.task {
            SprayLoadTask::ConstructionMeaning { images } => {
                let chosen = lookup(
                    &all,
                    [
                        flag_slot(condition, 0)?,
                        flag_slot(condition, 1)?,
                        flag_slot(condition, 2)?,
                    ],
                    condition,
                )?;
                let mut prompt = how_much_question(
                    &lex.theme.light,
                    lex.theme.is_plural,
                    &lex.prompt_preposition,
                    &lex.location.light,
                );
                let mut measure = Measure::Slider;
                if images && !lex.images.is_empty() {
                    prompt.push_str(IMAGE_PROMPT_SUFFIX);
                    measure = Measure::ForcedChoiceImages;
                }
                Ok(Presentation {
                    sentence: Some(chosen),
                    sentences: Some(Sentences::ByCondition(all)),
                    prompt: Some(prompt),
                    slider_labels: Some(slider_labels(item, lex)?),
                    measure: Some(measure),
                    ..Default::default()
                })
            }
            SprayLoadTask::Weight => {
                let l_heavy = flag_slot(condition, 1)?;
                let t_heavy = flag_slot(condition, 2)?;
                let mut options = BTreeMap::new();
                options.insert(0, lookup(&all, [false, l_heavy, t_heavy], condition)?);
                options.insert(1, lookup(&all, [true, l_heavy, t_heavy], condition)?);
                Ok(Presentation {
                    sentences: Some(Sentences::ByCondition(all)),
                    sentence_options: Some(SentenceOptions::ByConstruction(options)),
                    ..Default::default()
                })
            }
        }
    }
}

impl ExperimentalBuilder for SprayLoadBuilder {
    fn required_fields(&self) -> &[&'static str] {
        SPRAY_LOAD_FIELDS
    }

    fn flag_fields(&self) -> &[&'static str] {
        SPRAY_LOAD_FLAG_FIELDS
    }

    fn condition_space(&self) -> &[Condition] {
        &self.conditions
    }

    fn build_trial(
        &self,
        item: &Item,
        condition: &Condition,
        materials_id: &str,
        fields: &mut FieldProcessor<'_>,
    ) -> Result<Trial, RenderError> {
        let lexicon = self.lexicon(item, fields)?;
        let presentation = self.present(item, &lexicon, condition)?;
        Ok(Trial {
            materials_id: Some(materials_id.to_string()),
            item_id: require_id(item)?,
            condition_id: ConditionId::Experimental(condition.clone()),
            lexicon: Some(Lexicon::SprayLoad(lexicon)),
            presentation,
        })
    }
}

fn sentence_key(flags: [bool; 3]) -> String {
    flags.iter().map(|&f| if f { '1' } else { '0' }).collect()
}

/// The sentence for `flags`. A key that was never built is reported
/// against the condition's object-choice slot.
fn lookup(
    all: &BTreeMap<String, String>,
    flags: [bool; 3],
    condition: &Condition,
) -> Result<String, RenderError> {
    all.get(&sentence_key(flags))
        .cloned()
        .ok_or_else(|| RenderError::ConditionSlot {
            condition: condition.clone(),
            slot: 0,
        })
}

/// The sentence for every combination of object choice and phrase weight,
/// keyed `"<theme is object><location heavy><theme heavy>"`.
pub fn all_sentences(lex: &SprayLoadLexicon) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for theme_object in [false, true] {
        for location_heavy in [false, true] {
            for theme_heavy in [false, true] {
                let location = lex.location.pick(location_heavy);
                let theme = lex.theme.pick(theme_heavy);
                let postverbal = if theme_object {
                    join_words([theme, &lex.preposition, location.trim_matches(',')])
                } else {
                    join_words([location, "with", theme.trim_matches(',')])
                };
                let clause = join_words([
                    lex.subject.as_str(),
                    &lex.verb.past_simple,
                    &postverbal,
                ]);
                out.insert(
                    sentence_key([theme_object, location_heavy, theme_heavy]),
                    sentence(&clause),
                );
            }
        }
    }
    out
}

/// Slider end labels for the item's scale type.
fn slider_labels(item: &Item, lex: &SprayLoadLexicon) -> Result<[String; 2], RenderError> {
    let (min, state) = match lex.scale_type.as_str() {
        "cover" => ("0% / none", "completely covered"),
        "fill" => ("0% / empty", "completely full"),
        other => {
            return Err(RenderError::malformed(
                item,
                "scale type",
                &format!("has unknown value '{other}'"),
            ))
        }
    };
    let max = format!(
        "100% / {}",
        join_words([lex.location.light.as_str(), copula(lex.location.is_plural), state])
    );
    Ok([min.to_string(), max])
}

fn object_choice_space() -> Vec<Condition> {
    // phrase weight fixed to light
    vec![Condition::from([0, 0, 0]), Condition::from([1, 0, 0])]
}

pub fn construction_meaning(name: &str) -> Experiment {
    Experiment::new(
        name,
        32,
        20,
        Box::new(SprayLoadBuilder::new(
            SprayLoadTask::ConstructionMeaning { images: false },
            object_choice_space(),
        )),
        Box::new(BalancedFillers::empty_full(BalancedFormat::Slider)),
    )
}

pub fn weight(name: &str) -> Experiment {
    Experiment::new(
        name,
        32,
        20,
        Box::new(SprayLoadBuilder::new(
            SprayLoadTask::Weight,
            // object choice is the response, so slot 0 stays unset
            vec![
                Condition::from([None, Some(0), Some(0)]),
                Condition::from([None, Some(1), Some(0)]),
                Condition::from([None, Some(0), Some(1)]),
            ],
        )),
        Box::new(SentenceOptionFillers),
    )
}

pub fn construction_meaning_with_images(name: &str) -> Experiment {
    Experiment::new(
        name,
        32,
        20,
        Box::new(SprayLoadBuilder::new(
            SprayLoadTask::ConstructionMeaning { images: true },
            object_choice_space(),
        )),
        Box::new(BalancedFillers::empty_full(BalancedFormat::Slider)),
    )
    .with_lead_measure(Measure::ForcedChoiceImages)
}

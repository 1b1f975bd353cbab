use serde::Serialize;
use std::collections::BTreeMap;

use super::condition::ConditionId;
use super::materials::Value;

/// A pair of values keyed by which entity plays the role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ByRole<T> {
    pub agent: T,
    pub location: T,
}

impl<T> ByRole<T> {
    /// The agent's value if `agent` is true, otherwise the location's.
    pub fn pick(&self, agent: bool) -> &T {
        if agent {
            &self.agent
        } else {
            &self.location
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ByRole<U> {
        ByRole {
            agent: f(&self.agent),
            location: f(&self.location),
        }
    }
}

/// A well-formed and an ill-formed rendering of the same filler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoodBad {
    pub good: String,
    pub bad: String,
}

/// The rendered sentence collections a trial can expose.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Sentences {
    /// Shown in order, e.g. a setup sentence followed by the critical one.
    Sequence(Vec<String>),
    /// One full sentence per choice of grammatical subject.
    ByRole(ByRole<String>),
    GoodBad(GoodBad),
    /// Every condition's sentence, keyed by condition key (`"010"`).
    ByCondition(BTreeMap<String, String>),
}

impl Sentences {
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Sentences::Sequence(list) => list.iter().map(String::as_str).collect(),
            Sentences::ByRole(r) => vec![r.agent.as_str(), r.location.as_str()],
            Sentences::GoodBad(gb) => vec![gb.good.as_str(), gb.bad.as_str()],
            Sentences::ByCondition(map) => map.values().map(String::as_str).collect(),
        }
    }
}

/// Alternatives a participant chooses between in production tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SentenceOptions {
    /// Keyed by construction: 0 = locative, 1 = theme-object.
    ByConstruction(BTreeMap<u8, String>),
    GoodBad(GoodBad),
}

impl SentenceOptions {
    pub fn texts(&self) -> Vec<&str> {
        match self {
            SentenceOptions::ByConstruction(map) => map.values().map(String::as_str).collect(),
            SentenceOptions::GoodBad(gb) => vec![gb.good.as_str(), gb.bad.as_str()],
        }
    }
}

/// Response widget the frontend should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Slider,
    ForcedChoiceImages,
}

/// Critical clause variants of the swarm alternation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalClauses {
    /// "Bees are swarming in the garden"
    pub agent: String,
    /// "The garden is swarming with bees"
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonalternating: Option<String>,
}

/// Pronouns standing in for an already-given entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnaphorPronouns {
    pub agent_pronoun_subject: String,
    pub agent_pronoun_object: String,
    pub location_pronoun_subject: String,
    pub location_pronoun_object: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwarmLexicon {
    pub agent: String,
    pub location: String,
    pub verb: String,
    pub agent_plural: bool,
    pub location_plural: bool,
    pub location_determiner: String,
    pub preposition: String,
    pub prompt_preposition: String,
    pub conjunction: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<AnaphorPronouns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_clause: Option<ByRole<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_clause: Option<ByRole<String>>,
    pub critical_clause: CriticalClauses,
}

/// A noun phrase with a short and a long ("heavy") rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedPhrase {
    pub light: String,
    pub heavy: String,
    pub is_plural: bool,
}

impl WeightedPhrase {
    pub fn pick(&self, heavy: bool) -> &str {
        if heavy {
            &self.heavy
        } else {
            &self.light
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerbForms {
    pub lemma: String,
    pub present: String,
    #[serde(rename = "past simp")]
    pub past_simple: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprayLoadLexicon {
    pub images: BTreeMap<String, String>,
    pub subject: String,
    pub theme: WeightedPhrase,
    pub location: WeightedPhrase,
    pub verb: VerbForms,
    pub scale_type: String,
    pub preposition: String,
    pub prompt_preposition: String,
}

/// Lexical slots resolved for an experimental trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lexicon {
    Swarm(SwarmLexicon),
    SprayLoad(SprayLoadLexicon),
}

/// Presentation fields shown to the participant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Presentation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentences: Option<Sentences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence_options: Option<SentenceOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider_labels: Option<[String; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<Measure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conjunction: Option<String>,
}

/// One rendered trial, experimental or filler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trial {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials_id: Option<String>,
    pub item_id: Value,
    pub condition_id: ConditionId,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub lexicon: Option<Lexicon>,
    #[serde(flatten)]
    pub presentation: Presentation,
}

impl Trial {
    pub fn is_filler(&self) -> bool {
        self.condition_id.is_filler()
    }

    /// Every participant-facing sentence this trial carries.
    pub fn sentence_texts(&self) -> Vec<&str> {
        let p = &self.presentation;
        let mut texts = Vec::new();
        if let Some(ref s) = p.sentence {
            texts.push(s.as_str());
        }
        if let Some(ref s) = p.sentences {
            texts.extend(s.texts());
        }
        if let Some(ref o) = p.sentence_options {
            texts.extend(o.texts());
        }
        texts
    }
}

/// The response payload for one experiment session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSet {
    pub experiment: String,
    pub materials_id: String,
    pub trials: Vec<Trial>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::condition::Condition;

    fn filler_trial() -> Trial {
        Trial {
            materials_id: None,
            item_id: Value::Int(4),
            condition_id: ConditionId::filler([Value::from("good")]),
            lexicon: None,
            presentation: Presentation {
                sentence: Some("The cat sat on the mat.".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn by_role_pick() {
        let r = ByRole {
            agent: "a".to_string(),
            location: "l".to_string(),
        };
        assert_eq!(r.pick(true), "a");
        assert_eq!(r.pick(false), "l");
        assert_eq!(r.map(|s| s.len()).agent, 1);
    }

    #[test]
    fn filler_serializes_flat() {
        let json = serde_json::to_value(filler_trial()).unwrap();
        assert_eq!(json["item_id"], 4);
        assert_eq!(json["condition_id"][0], "filler");
        assert_eq!(json["sentence"], "The cat sat on the mat.");
        assert!(json.get("materials_id").is_none());
        assert!(json.get("prompt").is_none());
    }

    #[test]
    fn sentence_options_keys_serialize_as_strings() {
        let mut map = BTreeMap::new();
        map.insert(0u8, "Locative.".to_string());
        map.insert(1u8, "Theme.".to_string());
        let trial = Trial {
            materials_id: Some("spray".to_string()),
            item_id: Value::Int(1),
            condition_id: ConditionId::Experimental(Condition::from([None, Some(0), Some(1)])),
            lexicon: None,
            presentation: Presentation {
                sentence_options: Some(SentenceOptions::ByConstruction(map)),
                measure: Some(Measure::ForcedChoiceImages),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&trial).unwrap();
        assert_eq!(json["sentence_options"]["0"], "Locative.");
        assert_eq!(json["measure"], "forced_choice_images");
        assert_eq!(json["condition_id"], serde_json::json!([null, 0, 1]));
        assert_eq!(trial.sentence_texts(), vec!["Locative.", "Theme."]);
    }

    #[test]
    fn sentence_texts_collects_all() {
        let mut trial = filler_trial();
        trial.presentation.sentences = Some(Sentences::Sequence(vec![
            "One.".to_string(),
            "Two.".to_string(),
        ]));
        assert_eq!(
            trial.sentence_texts(),
            vec!["The cat sat on the mat.", "One.", "Two."]
        );
        assert!(trial.is_filler());
    }
}

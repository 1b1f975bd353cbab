/// Swarm-alternation experiments: "Bees are swarming in the garden" vs.
/// "The garden is swarming with bees".
///
/// Condition slot 0 marks whether the agent is the topical (or given)
/// entity; slot 1 picks the critical clause's subject: 0 = location,
/// 1 = agent, 2 = the non-alternating control clause.
use crate::core::error::{flag_slot, slot, RenderError};
use crate::core::experiment::{Experiment, ExperimentalBuilder};
use crate::core::fields::{require_flag, require_id, FieldProcessor};
use crate::core::fillers::{BalancedFillers, BalancedFormat, CompletionFillers, CompletionJoin};
use crate::core::phrase::{copula, how_much_question, join_words, progressive, sentence};
use crate::schema::condition::{Condition, ConditionId};
use crate::schema::materials::Item;
use crate::schema::trial::{
    AnaphorPronouns, ByRole, CriticalClauses, Lexicon, Presentation, Sentences, SwarmLexicon,
    Trial,
};

pub const SWARM_FIELDS: &[&str] = &[
    "A", "L", "V", "P", "prompt P", "L det", "topic A", "topic L", "conj",
];

/// Number flags read by every swarm variant.
pub const SWARM_FLAG_FIELDS: &[&str] = &["A countable?", "L plural?"];

pub const GIVEN_FIELDS: &[&str] = &[
    "given A",
    "given L",
    "given A pron subj",
    "given A pron obj",
    "given L pron subj",
    "given L pron obj",
];

pub const NONALTERNATING_FIELDS: &[&str] = &[
    "non alternating given A",
    "non alternating given A.P",
    "non alternating given L",
];

/// How the entity made salient before the critical clause is introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmFrame {
    /// A topic-setting clause; the critical clause repeats both full NPs.
    Topic,
    /// A setup clause introduces a referent that the critical clause
    /// picks up with a pronoun.
    Given { nonalternating: bool },
}

/// What the participant sees and does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmTask {
    /// Rate quantity after reading the critical sentence.
    ConstructionMeaning,
    /// Choose between agent- and location-subject continuations of a topic.
    Topicality,
    /// Judge the critical sentence.
    Acceptability,
    /// Choose between continuations of a setup sentence.
    Givenness,
    /// Setup plus critical sentence, then a quantity question.
    FullComprehension,
    /// Judge setup plus critical sentence.
    PrefixedAcceptability,
}

pub struct SwarmBuilder {
    frame: SwarmFrame,
    task: SwarmTask,
    required: Vec<&'static str>,
    conditions: Vec<Condition>,
}

impl SwarmBuilder {
    pub fn new(frame: SwarmFrame, task: SwarmTask, conditions: Vec<Condition>) -> Self {
        let mut required = SWARM_FIELDS.to_vec();
        if let SwarmFrame::Given { nonalternating } = frame {
            required.extend_from_slice(GIVEN_FIELDS);
            if nonalternating {
                required.extend_from_slice(NONALTERNATING_FIELDS);
            }
        }
        Self {
            frame,
            task,
            required,
            conditions,
        }
    }

    /// Resolve the lexical slots and build every clause variant. Returns the
    /// lexicon and the clause pair that precedes the critical clause.
    fn lexicon(
        &self,
        item: &Item,
        condition: &Condition,
        fields: &mut FieldProcessor<'_>,
    ) -> Result<(SwarmLexicon, ByRole<String>), RenderError> {
        let agent = fields.process(item, "A")?;
        let location = fields.process(item, "L")?;
        let verb = fields.process(item, "V")?;
        let agent_plural = require_flag(item, "A countable?")?;
        let location_plural = require_flag(item, "L plural?")?;
        let location_determiner = fields.process(item, "L det")?;
        let preposition = fields.process(item, "P")?;
        let prompt_preposition = fields.process(item, "prompt P")?;
        let conjunction = fields.process(item, "conj")?;

        let location_np = join_words([location_determiner.as_str(), location.as_str()]);
        let verbing = progressive(&verb);

        let (lead, critical, pronouns) = match self.frame {
            SwarmFrame::Topic => {
                let topic = ByRole {
                    agent: fields.process(item, "topic A")?,
                    location: fields.process(item, "topic L")?,
                };
                let critical = CriticalClauses {
                    agent: join_words([
                        agent.as_str(),
                        copula(agent_plural),
                        &verbing,
                        &preposition,
                        &location_np,
                    ]),
                    location: join_words([
                        location_np.as_str(),
                        copula(location_plural),
                        &verbing,
                        "with",
                        &agent,
                    ]),
                    nonalternating: None,
                };
                (topic, critical, None)
            }
            SwarmFrame::Given { nonalternating } => {
                let pronouns = AnaphorPronouns {
                    agent_pronoun_subject: fields.process(item, "given A pron subj")?,
                    agent_pronoun_object: fields.process(item, "given A pron obj")?,
                    location_pronoun_subject: fields.process(item, "given L pron subj")?,
                    location_pronoun_object: fields.process(item, "given L pron obj")?,
                };
                let setup = ByRole {
                    agent: fields.process(item, "given A")?,
                    location: fields.process(item, "given L")?,
                };
                let agent_given = flag_slot(condition, 0)?;

                let agent_clause = if agent_given {
                    join_words([
                        pronouns.agent_pronoun_subject.as_str(),
                        copula(agent_plural),
                        &verbing,
                        &preposition,
                        &location_np,
                    ])
                } else {
                    join_words([
                        agent.as_str(),
                        copula(agent_plural),
                        &verbing,
                        &preposition,
                        &pronouns.location_pronoun_object,
                    ])
                };
                let location_clause = if agent_given {
                    join_words([
                        location_np.as_str(),
                        copula(location_plural),
                        &verbing,
                        "with",
                        &pronouns.agent_pronoun_object,
                    ])
                } else {
                    join_words([
                        pronouns.location_pronoun_subject.as_str(),
                        copula(location_plural),
                        &verbing,
                        "with",
                        &agent,
                    ])
                };

                let control = if nonalternating {
                    let predicate = fields.process(item, "non alternating given A")?;
                    Some(if agent_given {
                        let particle = fields.process(item, "non alternating given A.P")?;
                        join_words([
                            pronouns.agent_pronoun_subject.as_str(),
                            copula(agent_plural),
                            &predicate,
                            &particle,
                            &location_np,
                        ])
                    } else {
                        let determiner = fields
                            .process_optional(item, "non alternating given L.det")?
                            .unwrap_or_default();
                        let given_location = fields.process(item, "non alternating given L")?;
                        join_words([
                            determiner.as_str(),
                            &agent,
                            copula(agent_plural),
                            &predicate,
                            &given_location,
                        ])
                    })
                } else {
                    None
                };

                let critical = CriticalClauses {
                    agent: agent_clause,
                    location: location_clause,
                    nonalternating: control,
                };
                (setup, critical, Some(pronouns))
            }
        };

        let (topic_clause, setup_clause) = match self.frame {
            SwarmFrame::Topic => (Some(lead.clone()), None),
            SwarmFrame::Given { .. } => (None, Some(lead.clone())),
        };

        let lexicon = SwarmLexicon {
            agent,
            location,
            verb,
            agent_plural,
            location_plural,
            location_determiner,
            preposition,
            prompt_preposition,
            conjunction,
            pronouns,
            topic_clause,
            setup_clause,
            critical_clause: critical,
        };
        Ok((lexicon, lead))
    }

    fn present(
        &self,
        lex: &SwarmLexicon,
        lead: &ByRole<String>,
        condition: &Condition,
    ) -> Result<Presentation, RenderError> {
        let presentation = match self.task {
            SwarmTask::ConstructionMeaning => Presentation {
                sentence: Some(sentence(select_critical(&lex.critical_clause, condition)?)),
                prompt: Some(quantity_prompt(lex)),
                ..Default::default()
            },
            SwarmTask::Acceptability => Presentation {
                sentence: Some(sentence(select_critical(&lex.critical_clause, condition)?)),
                ..Default::default()
            },
            SwarmTask::Topicality => {
                let topic = lead.pick(flag_slot(condition, 0)?);
                let critical = &lex.critical_clause;
                Presentation {
                    sentences: Some(Sentences::ByRole(ByRole {
                        agent: sentence(&format!("{topic}, {} {}", lex.conjunction, critical.agent)),
                        location: sentence(&format!(
                            "{topic}, {} {}",
                            lex.conjunction, critical.location
                        )),
                    })),
                    ..Default::default()
                }
            }
            SwarmTask::Givenness => {
                let setup = sentence(lead.pick(flag_slot(condition, 0)?));
                let critical = &lex.critical_clause;
                Presentation {
                    sentences: Some(Sentences::ByRole(ByRole {
                        agent: format!("{setup} {}", sentence(&critical.agent)),
                        location: format!("{setup} {}", sentence(&critical.location)),
                    })),
                    ..Default::default()
                }
            }
            SwarmTask::FullComprehension => Presentation {
                sentences: Some(Sentences::Sequence(setup_and_critical(lex, lead, condition)?)),
                prompt: Some(quantity_prompt(lex)),
                ..Default::default()
            },
            SwarmTask::PrefixedAcceptability => {
                let pair = setup_and_critical(lex, lead, condition)?;
                Presentation {
                    sentence: Some(pair.join("\n")),
                    sentences: Some(Sentences::Sequence(pair)),
                    ..Default::default()
                }
            }
        };
        Ok(presentation)
    }
}

impl ExperimentalBuilder for SwarmBuilder {
    fn required_fields(&self) -> &[&'static str] {
        &self.required
    }

    fn flag_fields(&self) -> &[&'static str] {
        SWARM_FLAG_FIELDS
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
        let (lexicon, lead) = self.lexicon(item, condition, fields)?;
        let presentation = self.present(&lexicon, &lead, condition)?;
        Ok(Trial {
            materials_id: Some(materials_id.to_string()),
            item_id: require_id(item)?,
            condition_id: ConditionId::Experimental(condition.clone()),
            lexicon: Some(Lexicon::Swarm(lexicon)),
            presentation,
        })
    }
}

/// The critical clause whose subject condition slot 1 selects.
fn select_critical<'c>(
    critical: &'c CriticalClauses,
    condition: &Condition,
) -> Result<&'c str, RenderError> {
    let defect = || RenderError::ConditionSlot {
        condition: condition.clone(),
        slot: 1,
    };
    match slot(condition, 1)? {
        0 => Ok(&critical.location),
        1 => Ok(&critical.agent),
        2 => critical.nonalternating.as_deref().ok_or_else(defect),
        _ => Err(defect()),
    }
}

fn setup_and_critical(
    lex: &SwarmLexicon,
    lead: &ByRole<String>,
    condition: &Condition,
) -> Result<Vec<String>, RenderError> {
    let setup = lead.pick(flag_slot(condition, 0)?);
    let critical = select_critical(&lex.critical_clause, condition)?;
    Ok(vec![sentence(setup), sentence(critical)])
}

/// "How many bees are in the garden?"
fn quantity_prompt(lex: &SwarmLexicon) -> String {
    how_much_question(
        &lex.agent,
        lex.agent_plural,
        &lex.prompt_preposition,
        &join_words([lex.location_determiner.as_str(), &lex.location]),
    )
}

fn all_given_subject() -> Vec<Condition> {
    vec![
        Condition::from([0, 0]),
        Condition::from([0, 1]),
        Condition::from([1, 0]),
        Condition::from([1, 1]),
    ]
}

/// Does construction choice change the inferred quantity?
pub fn construction_meaning(name: &str) -> Experiment {
    Experiment::new(
        name,
        30,
        18,
        Box::new(SwarmBuilder::new(
            SwarmFrame::Topic,
            SwarmTask::ConstructionMeaning,
            // topic is not manipulated here
            vec![Condition::from([0, 0]), Condition::from([0, 1])],
        )),
        Box::new(BalancedFillers::empty_full(BalancedFormat::Prompted)),
    )
}

pub fn topicality(name: &str) -> Experiment {
    Experiment::new(
        name,
        30,
        18,
        Box::new(SwarmBuilder::new(
            SwarmFrame::Topic,
            SwarmTask::Topicality,
            vec![Condition::from([0, 1]), Condition::from([1, 1])],
        )),
        Box::new(CompletionFillers::new(CompletionJoin::Conjoined)),
    )
}

pub fn acceptability(name: &str) -> Experiment {
    Experiment::new(
        name,
        38,
        18,
        Box::new(SwarmBuilder::new(
            SwarmFrame::Topic,
            SwarmTask::Acceptability,
            vec![Condition::from([0, 0]), Condition::from([0, 1])],
        )),
        Box::new(BalancedFillers::bad_good(BalancedFormat::Acceptability)),
    )
}

pub fn givenness(name: &str) -> Experiment {
    Experiment::new(
        name,
        30,
        18,
        Box::new(SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: false,
            },
            SwarmTask::Givenness,
            vec![Condition::from([0, 1]), Condition::from([1, 1])],
        )),
        Box::new(CompletionFillers::new(CompletionJoin::Sentences)),
    )
}

pub fn full_comprehension(name: &str) -> Experiment {
    Experiment::new(
        name,
        30,
        18,
        Box::new(SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: false,
            },
            SwarmTask::FullComprehension,
            all_given_subject(),
        )),
        Box::new(BalancedFillers::empty_full(BalancedFormat::PromptedSequence)),
    )
}

pub fn prefixed_acceptability(name: &str) -> Experiment {
    Experiment::new(
        name,
        38,
        18,
        Box::new(SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: false,
            },
            SwarmTask::PrefixedAcceptability,
            all_given_subject(),
        )),
        Box::new(BalancedFillers::bad_good(BalancedFormat::Acceptability)),
    )
}

pub fn nonalternating_control(name: &str) -> Experiment {
    let mut conditions = all_given_subject();
    conditions.push(Condition::from([0, 2]));
    conditions.push(Condition::from([1, 2]));
    Experiment::new(
        name,
        30,
        18,
        Box::new(SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: true,
            },
            SwarmTask::FullComprehension,
            conditions,
        )),
        Box::new(BalancedFillers::empty_full(BalancedFormat::PromptedSequence)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::names::NameCorpus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bees() -> Item {
        Item::new()
            .with("id", 1)
            .with("A", "bees")
            .with("L", "garden")
            .with("V", "swarm")
            .with("P", "in")
            .with("prompt P", "in")
            .with("L det", "the")
            .with("A countable?", true)
            .with("L plural?", false)
            .with("topic A", "%PERSON1% is looking for butterflies")
            .with("topic L", "%PERSON1% wants to relax in %PERSON1_POSS% garden")
            .with("conj", "but")
            .with("given A", "there are bees everywhere")
            .with("given L", "%PERSON1% has a garden")
            .with("given A pron subj", "they")
            .with("given A pron obj", "them")
            .with("given L pron subj", "it")
            .with("given L pron obj", "it")
            .with("non alternating given A", "buzzing")
            .with("non alternating given A.P", "around")
            .with("non alternating given L", "loudly")
            .with("non alternating given L.det", "")
    }

    fn build(builder: &SwarmBuilder, condition: [u8; 2], seed: u64) -> Trial {
        let corpus = NameCorpus::builtin();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut fields = FieldProcessor::new(&corpus, &mut rng);
        builder
            .build_trial(&bees(), &Condition::from(condition), "swarm-000", &mut fields)
            .unwrap()
    }

    fn lexicon(trial: &Trial) -> &SwarmLexicon {
        match trial.lexicon {
            Some(Lexicon::Swarm(ref lex)) => lex,
            _ => panic!("expected swarm lexicon"),
        }
    }

    #[test]
    fn topic_frame_critical_clauses() {
        let builder = SwarmBuilder::new(
            SwarmFrame::Topic,
            SwarmTask::ConstructionMeaning,
            vec![Condition::from([0, 1])],
        );
        let trial = build(&builder, [0, 1], 1);
        let lex = lexicon(&trial);
        assert_eq!(lex.critical_clause.agent, "bees are swarming in the garden");
        assert_eq!(lex.critical_clause.location, "the garden is swarming with bees");
        assert_eq!(
            trial.presentation.sentence.as_deref(),
            Some("Bees are swarming in the garden.")
        );
        assert_eq!(
            trial.presentation.prompt.as_deref(),
            Some("How many bees are in the garden?")
        );
        assert_eq!(trial.materials_id.as_deref(), Some("swarm-000"));
    }

    #[test]
    fn location_subject_sentence() {
        let builder = SwarmBuilder::new(
            SwarmFrame::Topic,
            SwarmTask::Acceptability,
            vec![Condition::from([0, 0])],
        );
        let trial = build(&builder, [0, 0], 2);
        assert_eq!(
            trial.presentation.sentence.as_deref(),
            Some("The garden is swarming with bees.")
        );
    }

    #[test]
    fn topic_clause_binds_person_consistently() {
        let builder = SwarmBuilder::new(
            SwarmFrame::Topic,
            SwarmTask::Topicality,
            vec![Condition::from([0, 1])],
        );
        let trial = build(&builder, [0, 1], 3);
        let topic = lexicon(&trial).topic_clause.clone().unwrap();
        let name = topic.agent.split(' ').next().unwrap().to_string();
        assert!(topic.location.starts_with(&name));
        assert!(!topic.location.contains('%'));

        match trial.presentation.sentences {
            Some(Sentences::ByRole(ref s)) => {
                assert!(s.agent.starts_with(&name));
                assert!(s.location.ends_with("but the garden is swarming with bees."));
                assert!(s.agent.ends_with("but bees are swarming in the garden."));
            }
            ref other => panic!("unexpected sentences {other:?}"),
        }
    }

    #[test]
    fn given_agent_uses_agent_pronouns() {
        let builder = SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: false,
            },
            SwarmTask::FullComprehension,
            all_given_subject(),
        );
        let trial = build(&builder, [1, 1], 4);
        let lex = lexicon(&trial);
        assert_eq!(lex.critical_clause.agent, "they are swarming in the garden");
        assert_eq!(lex.critical_clause.location, "the garden is swarming with them");
        assert_eq!(
            trial.presentation.sentences,
            Some(Sentences::Sequence(vec![
                "There are bees everywhere.".to_string(),
                "They are swarming in the garden.".to_string(),
            ]))
        );
    }

    #[test]
    fn given_location_uses_location_pronouns() {
        let builder = SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: false,
            },
            SwarmTask::PrefixedAcceptability,
            all_given_subject(),
        );
        let trial = build(&builder, [0, 0], 5);
        let lex = lexicon(&trial);
        assert_eq!(lex.critical_clause.agent, "bees are swarming in it");
        assert_eq!(lex.critical_clause.location, "it is swarming with bees");

        let sentence = trial.presentation.sentence.clone().unwrap();
        let (setup, critical) = sentence.split_once('\n').unwrap();
        assert!(setup.ends_with("has a garden."));
        assert_eq!(critical, "It is swarming with bees.");
    }

    #[test]
    fn givenness_offers_both_continuations() {
        let builder = SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: false,
            },
            SwarmTask::Givenness,
            vec![Condition::from([1, 1])],
        );
        let trial = build(&builder, [1, 1], 6);
        assert_eq!(
            trial.presentation.sentences,
            Some(Sentences::ByRole(ByRole {
                agent: "There are bees everywhere. They are swarming in the garden.".to_string(),
                location: "There are bees everywhere. The garden is swarming with them."
                    .to_string(),
            }))
        );
    }

    #[test]
    fn nonalternating_control_clause() {
        let builder = SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: true,
            },
            SwarmTask::FullComprehension,
            vec![Condition::from([1, 2]), Condition::from([0, 2])],
        );
        let given = build(&builder, [1, 2], 7);
        assert_eq!(
            lexicon(&given).critical_clause.nonalternating.as_deref(),
            Some("they are buzzing around the garden")
        );
        match given.presentation.sentences {
            Some(Sentences::Sequence(ref s)) => {
                assert_eq!(s[1], "They are buzzing around the garden.")
            }
            ref other => panic!("unexpected sentences {other:?}"),
        }

        let not_given = build(&builder, [0, 2], 8);
        assert_eq!(
            lexicon(&not_given).critical_clause.nonalternating.as_deref(),
            Some("bees are buzzing loudly")
        );
    }

    #[test]
    fn nonalternating_determiner_is_processed() {
        let builder = SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: true,
            },
            SwarmTask::FullComprehension,
            vec![Condition::from([0, 2])],
        );
        let item = bees().with("non alternating given L.det", "%PERSON1%'s");
        let corpus = NameCorpus::builtin();
        let mut rng = StdRng::seed_from_u64(21);
        let mut fields = FieldProcessor::new(&corpus, &mut rng);
        let trial = builder
            .build_trial(&item, &Condition::from([0, 2]), "swarm-000", &mut fields)
            .unwrap();

        let lex = lexicon(&trial);
        let owner = lex
            .setup_clause
            .as_ref()
            .unwrap()
            .location
            .strip_suffix(" has a garden")
            .unwrap()
            .to_string();
        assert_eq!(
            lex.critical_clause.nonalternating.as_deref(),
            Some(format!("{owner}'s bees are buzzing loudly").as_str())
        );
    }

    #[test]
    fn item_without_number_flag_is_never_sampled() {
        use crate::schema::materials::{MaterialsSet, Value};

        let mut unflagged = bees().with("id", 1);
        unflagged.fields.remove("A countable?");
        let set = MaterialsSet::new(
            "swarm-000",
            vec![bees().with("id", 0), unflagged, bees().with("id", 2)],
        );
        let corpus = NameCorpus::builtin();

        let experiment = acceptability("02_acceptability_swarm").with_trial_counts(2, 2);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let trials = experiment
                .build_experimental_trials(&set, &corpus, &mut rng)
                .unwrap();
            assert!(trials.iter().all(|t| t.item_id != Value::Int(1)));
        }

        let experiment = acceptability("02_acceptability_swarm").with_trial_counts(3, 3);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            experiment.build_experimental_trials(&set, &corpus, &mut rng),
            Err(RenderError::InsufficientMaterials { available: 2, .. })
        ));
    }

    #[test]
    fn control_slot_without_control_clause_is_a_defect() {
        let builder = SwarmBuilder::new(
            SwarmFrame::Topic,
            SwarmTask::Acceptability,
            vec![Condition::from([0, 2])],
        );
        let corpus = NameCorpus::builtin();
        let mut rng = StdRng::seed_from_u64(1);
        let mut fields = FieldProcessor::new(&corpus, &mut rng);
        let err = builder
            .build_trial(&bees(), &Condition::from([0, 2]), "m", &mut fields)
            .unwrap_err();
        assert!(matches!(err, RenderError::ConditionSlot { slot: 1, .. }));
    }

    #[test]
    fn required_fields_follow_frame() {
        let topic = SwarmBuilder::new(SwarmFrame::Topic, SwarmTask::Acceptability, vec![]);
        assert_eq!(topic.required_fields(), SWARM_FIELDS);

        let control = SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: true,
            },
            SwarmTask::FullComprehension,
            vec![],
        );
        let required = control.required_fields();
        assert!(required.contains(&"given L pron obj"));
        assert!(required.contains(&"non alternating given A.P"));
        assert!(!required.contains(&"non alternating given L.det"));
    }

    #[test]
    fn serialized_trial_shape() {
        let builder = SwarmBuilder::new(
            SwarmFrame::Given {
                nonalternating: false,
            },
            SwarmTask::FullComprehension,
            all_given_subject(),
        );
        let trial = build(&builder, [1, 0], 9);
        let json = serde_json::to_value(&trial).unwrap();
        assert_eq!(json["item_id"], 1);
        assert_eq!(json["condition_id"], serde_json::json!([1, 0]));
        assert_eq!(json["agent_plural"], true);
        assert_eq!(json["agent_pronoun_subject"], "they");
        assert_eq!(json["setup_clause"]["agent"], "there are bees everywhere");
        assert!(json.get("topic_clause").is_none());
        assert_eq!(json["sentences"][1], "The garden is swarming with them.");
    }
}

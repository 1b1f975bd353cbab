/// Name generator: draws first names with a gender tag for person
/// placeholders.
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NameError {
    #[error("name corpus has no {0} names")]
    EmptyCorpus(Gender),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Possessive determiner: "his" or "her".
    pub fn possessive(&self) -> &'static str {
        match self {
            Self::Male => "his",
            Self::Female => "her",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Male => "male",
            Self::Female => "female",
        })
    }
}

const MALE_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Donald", "Steven", "Paul", "Andrew",
    "Joshua", "Kenneth", "Kevin", "Brian", "George", "Edward", "Ronald", "Timothy", "Jason",
    "Jeffrey", "Ryan", "Jacob", "Gary", "Nicholas", "Eric", "Jonathan", "Stephen", "Larry",
    "Justin", "Scott", "Brandon", "Benjamin", "Samuel", "Gregory", "Frank", "Alexander",
    "Raymond", "Patrick", "Jack", "Dennis", "Jerry", "Tyler", "Aaron", "Henry", "Adam",
    "Douglas", "Nathan", "Peter", "Zachary", "Kyle", "Walter", "Harold", "Carl", "Arthur",
];

const FEMALE_NAMES: &[&str] = &[
    "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan", "Jessica",
    "Sarah", "Karen", "Nancy", "Lisa", "Betty", "Margaret", "Sandra", "Ashley", "Kimberly",
    "Emily", "Donna", "Michelle", "Dorothy", "Carol", "Amanda", "Melissa", "Deborah",
    "Stephanie", "Rebecca", "Sharon", "Laura", "Cynthia", "Kathleen", "Amy", "Shirley",
    "Angela", "Helen", "Anna", "Brenda", "Pamela", "Nicole", "Emma", "Samantha", "Katherine",
    "Christine", "Debra", "Rachel", "Catherine", "Carolyn", "Janet", "Ruth", "Maria",
    "Heather", "Diane", "Virginia", "Julie", "Joyce", "Victoria", "Olivia", "Kelly", "Christina",
    "Lauren", "Joan", "Evelyn",
];

/// A first-name corpus split by gender.
///
/// Both lists are guaranteed non-empty, so every draw succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct NameCorpus {
    male: Vec<String>,
    female: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RonCorpus {
    male: Vec<String>,
    female: Vec<String>,
}

impl TryFrom<RonCorpus> for NameCorpus {
    type Error = NameError;

    fn try_from(raw: RonCorpus) -> Result<Self, Self::Error> {
        NameCorpus::new(raw.male, raw.female)
    }
}

impl Default for NameCorpus {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NameCorpus {
    pub fn new(male: Vec<String>, female: Vec<String>) -> Result<Self, NameError> {
        if male.is_empty() {
            return Err(NameError::EmptyCorpus(Gender::Male));
        }
        if female.is_empty() {
            return Err(NameError::EmptyCorpus(Gender::Female));
        }
        Ok(Self { male, female })
    }

    /// Common US first names compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            male: MALE_NAMES.iter().map(|s| s.to_string()).collect(),
            female: FEMALE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load a corpus from a RON file of the form `(male: [...], female: [...])`.
    pub fn load_from_ron(path: &Path) -> Result<NameCorpus, NameError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<NameCorpus, NameError> {
        let raw: RonCorpus = ron::from_str(input)?;
        raw.try_into()
    }

    /// Number of distinct names available for `gender`.
    pub fn len(&self, gender: Gender) -> usize {
        self.names(gender).len()
    }

    fn names(&self, gender: Gender) -> &[String] {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    /// Draw a first name. Without a requested gender, male and female are
    /// equally likely.
    pub fn draw(&self, rng: &mut StdRng, gender: Option<Gender>) -> (String, Gender) {
        let gender = gender.unwrap_or_else(|| {
            if rng.gen_bool(0.5) {
                Gender::Female
            } else {
                Gender::Male
            }
        });
        let pool = self.names(gender);
        let idx = rng.gen_range(0..pool.len());
        (pool[idx].clone(), gender)
    }
}

use std::collections::BTreeMap;
use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::vector::lenient_f64;

/// Highest answer on every questionnaire item. 0 means "unanswered".
pub const MAX_ANSWER: u8 = 5;

/// The three questionnaires a user completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    Innate,
    Private,
    Imposed,
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Innate => f.write_str("innate"),
            Self::Private => f.write_str("private"),
            Self::Imposed => f.write_str("imposed"),
        }
    }
}

/// Answers to one questionnaire, keyed by 1-based question index.
///
/// Reads are total: an index that was never answered reads as 0. Serializes
/// to and from the `"q{n}_answer"` record shape produced upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "BTreeMap<String, u8>")]
pub struct AnswerSet {
    answers: BTreeMap<usize, u8>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional answers; `values[0]` is question 1.
    pub fn from_answers(values: &[u8]) -> Self {
        let mut set = Self::new();
        for (offset, value) in values.iter().enumerate() {
            set.insert(offset + 1, *value);
        }
        set
    }

    /// Converts a loosely typed record. Unknown keys are dropped, non-numeric
    /// values read as 0, fractional values are rounded and everything is
    /// clamped to `0..=MAX_ANSWER`.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let mut set = Self::new();
        for (key, value) in record {
            let Some(index) = question_index(key) else {
                trace!("ignoring answer key {key:?}");
                continue;
            };
            set.insert(index, lenient_answer(value));
        }
        set
    }

    pub fn insert(&mut self, index: usize, value: u8) {
        if index == 0 {
            return;
        }
        self.answers.insert(index, value.min(MAX_ANSWER));
    }

    pub fn get(&self, index: usize) -> u8 {
        self.answers.get(&index).copied().unwrap_or(0)
    }

    pub fn answer(&self, index: usize) -> f64 {
        f64::from(self.get(index))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|v| **v > 0).count()
    }
}

impl From<Map<String, Value>> for AnswerSet {
    fn from(record: Map<String, Value>) -> Self {
        Self::from_record(&record)
    }
}

impl From<AnswerSet> for BTreeMap<String, u8> {
    fn from(set: AnswerSet) -> Self {
        set.answers
            .into_iter()
            .map(|(idx, v)| (format!("q{idx}_answer"), v))
            .collect()
    }
}

fn question_index(key: &str) -> Option<usize> {
    let trimmed = key.trim();
    let body = trimmed.strip_prefix('q').or_else(|| trimmed.strip_prefix('Q'))?;
    let digits = body.strip_suffix("_answer").unwrap_or(body);
    match digits.parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(idx) => Some(idx),
    }
}

fn lenient_answer(value: &Value) -> u8 {
    lenient_f64(value).round().clamp(0.0, f64::from(MAX_ANSWER)) as u8
}

/// Raw answers for all three instruments, any of which may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAnswers {
    #[serde(default)]
    pub innate: Option<AnswerSet>,
    #[serde(default, alias = "surface")]
    pub private: Option<AnswerSet>,
    #[serde(default, alias = "public")]
    pub imposed: Option<AnswerSet>,
}

impl UserAnswers {
    pub fn get(&self, instrument: Instrument) -> Option<&AnswerSet> {
        match instrument {
            Instrument::Innate => self.innate.as_ref(),
            Instrument::Private => self.private.as_ref(),
            Instrument::Imposed => self.imposed.as_ref(),
        }
    }
}

//! Multiple-choice quiz
//!
//! An alternative to self-graded flashcards: the learner picks the right
//! translation out of several. Distractors come from the same HSK level when
//! possible so the choices stay plausible. The answer maps onto the normal
//! grade scale, so quiz results feed the same scheduler and statistics.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::srs::Grade;
use crate::vocabulary::VocabularyItem;

/// Default number of choices per question
pub const DEFAULT_CHOICES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("a question needs at least 2 choices, got {0}")]
    TooFewChoices(usize),

    #[error("no distractors available for '{0}'")]
    NoDistractors(String),

    #[error("choice {index} out of range (question has {len})")]
    ChoiceOutOfRange { index: usize, len: usize },
}

/// One question: a word and shuffled candidate translations
///
/// The correct index stays out of the serialized form so a front end only
/// learns it after answering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub item: VocabularyItem,
    pub choices: Vec<String>,
    #[serde(skip)]
    pub correct_index: usize,
}

impl QuizQuestion {
    /// Grade a picked choice. A wrong pick is `Again`, a right one `Good`.
    pub fn answer(&self, index: usize) -> Result<Grade, QuizError> {
        if index >= self.choices.len() {
            return Err(QuizError::ChoiceOutOfRange {
                index,
                len: self.choices.len(),
            });
        }
        Ok(Grade::from_known(index == self.correct_index))
    }

    pub fn correct_choice(&self) -> &str {
        &self.choices[self.correct_index]
    }
}

/// Build a question for `target` with up to `choices` options.
///
/// Distractors never repeat the target's translation. Fewer options than
/// requested are returned when the pool is too small, but at least one
/// distractor is required.
pub fn build_question<R: Rng + ?Sized>(
    target: &VocabularyItem,
    pool: &[VocabularyItem],
    choices: usize,
    rng: &mut R,
) -> Result<QuizQuestion, QuizError> {
    if choices < 2 {
        return Err(QuizError::TooFewChoices(choices));
    }

    let answer = target.translation();
    let mut same_level: Vec<String> = Vec::new();
    let mut other_level: Vec<String> = Vec::new();
    for item in pool.iter().filter(|item| item.id != target.id) {
        let translation = item.translation();
        if translation == answer
            || same_level.contains(&translation)
            || other_level.contains(&translation)
        {
            continue;
        }
        if item.hsk_level == target.hsk_level {
            same_level.push(translation);
        } else {
            other_level.push(translation);
        }
    }

    same_level.shuffle(rng);
    other_level.shuffle(rng);

    let mut options: Vec<String> = same_level
        .into_iter()
        .chain(other_level)
        .take(choices - 1)
        .collect();
    if options.is_empty() {
        return Err(QuizError::NoDistractors(target.id.clone()));
    }

    options.push(answer.clone());
    options.shuffle(rng);
    let correct_index = options
        .iter()
        .position(|option| *option == answer)
        .ok_or_else(|| QuizError::NoDistractors(target.id.clone()))?;

    debug!(id = %target.id, choices = options.len(), "built quiz question");

    Ok(QuizQuestion {
        item: target.clone(),
        choices: options,
        correct_index,
    })
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{BlockId, QuizId};
use crate::model::quiz::{Block, BlockKind, QuizContent};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("block {0} is not part of this quiz")]
    UnknownBlock(BlockId),

    #[error("block {block} does not accept {attempted:?} input")]
    KindMismatch { block: BlockId, attempted: BlockKind },

    #[error("block {block} has no option {value:?}")]
    UnknownOption { block: BlockId, value: String },
}

/// One answer line sent to the server.
///
/// Multiple-choice blocks produce one line per selected option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerInput {
    pub block_id: BlockId,
    pub answer_text: String,
}

/// Body of `POST /api/quizzes/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub quiz_id: QuizId,
    pub answers: Vec<AnswerInput>,
}

/// Current input state of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockInput {
    Single(Option<usize>),
    Multiple(Vec<bool>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SheetEntry {
    block_id: BlockId,
    options: Vec<String>,
    input: BlockInput,
}

impl SheetEntry {
    fn from_block(block: &Block) -> Self {
        let options: Vec<String> = block.answers.iter().map(|o| o.text.clone()).collect();
        let input = match block.kind {
            BlockKind::SingleChoice => BlockInput::Single(None),
            BlockKind::MultipleChoice => BlockInput::Multiple(vec![false; options.len()]),
            BlockKind::Text => BlockInput::Text(String::new()),
        };
        Self {
            block_id: block.id,
            options,
            input,
        }
    }

    fn position(&self, value: &str) -> Result<usize, AnswerError> {
        self.options
            .iter()
            .position(|option| option == value)
            .ok_or_else(|| AnswerError::UnknownOption {
                block: self.block_id,
                value: value.to_string(),
            })
    }

    fn collect_into(&self, out: &mut Vec<AnswerInput>) {
        let line = |text: &str| AnswerInput {
            block_id: self.block_id,
            answer_text: text.to_string(),
        };
        match &self.input {
            BlockInput::Single(Some(idx)) => {
                if let Some(text) = self.options.get(*idx) {
                    out.push(line(text));
                }
            }
            BlockInput::Single(None) => {}
            BlockInput::Multiple(checked) => {
                out.extend(
                    self.options
                        .iter()
                        .zip(checked)
                        .filter(|(_, on)| **on)
                        .map(|(text, _)| line(text)),
                );
            }
            BlockInput::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(line(trimmed));
                }
            }
        }
    }
}

/// Answers a student has entered so far, one entry per rendered block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSheet {
    entries: Vec<SheetEntry>,
}

impl AnswerSheet {
    /// Empty sheet with one entry per block, in display order.
    #[must_use]
    pub fn for_quiz(quiz: &QuizContent) -> Self {
        Self {
            entries: quiz
                .ordered_blocks()
                .into_iter()
                .map(SheetEntry::from_block)
                .collect(),
        }
    }

    fn entry_mut(&mut self, block_id: BlockId) -> Result<&mut SheetEntry, AnswerError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.block_id == block_id)
            .ok_or(AnswerError::UnknownBlock(block_id))
    }

    /// Choose the option of a single-choice block, replacing any previous choice.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError` for unknown blocks/options or non single-choice blocks.
    pub fn select(&mut self, block_id: BlockId, value: &str) -> Result<(), AnswerError> {
        let entry = self.entry_mut(block_id)?;
        let idx = entry.position(value)?;
        match &mut entry.input {
            BlockInput::Single(selected) => {
                *selected = Some(idx);
                Ok(())
            }
            _ => Err(AnswerError::KindMismatch {
                block: block_id,
                attempted: BlockKind::SingleChoice,
            }),
        }
    }

    /// Check or uncheck an option of a multiple-choice block.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError` for unknown blocks/options or non multiple-choice blocks.
    pub fn set_checked(
        &mut self,
        block_id: BlockId,
        value: &str,
        checked: bool,
    ) -> Result<(), AnswerError> {
        let entry = self.entry_mut(block_id)?;
        let idx = entry.position(value)?;
        match &mut entry.input {
            BlockInput::Multiple(flags) => {
                flags[idx] = checked;
                Ok(())
            }
            _ => Err(AnswerError::KindMismatch {
                block: block_id,
                attempted: BlockKind::MultipleChoice,
            }),
        }
    }

    /// Replace the free text of a text block. Stored untrimmed.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError` for unknown or non-text blocks.
    pub fn set_text(&mut self, block_id: BlockId, text: impl Into<String>) -> Result<(), AnswerError> {
        let entry = self.entry_mut(block_id)?;
        match &mut entry.input {
            BlockInput::Text(current) => {
                *current = text.into();
                Ok(())
            }
            _ => Err(AnswerError::KindMismatch {
                block: block_id,
                attempted: BlockKind::Text,
            }),
        }
    }

    #[must_use]
    pub fn input(&self, block_id: BlockId) -> Option<&BlockInput> {
        self.entries
            .iter()
            .find(|entry| entry.block_id == block_id)
            .map(|entry| &entry.input)
    }

    #[must_use]
    pub fn is_selected(&self, block_id: BlockId, value: &str) -> bool {
        let Some(entry) = self.entries.iter().find(|entry| entry.block_id == block_id) else {
            return false;
        };
        let Ok(idx) = entry.position(value) else {
            return false;
        };
        match &entry.input {
            BlockInput::Single(selected) => *selected == Some(idx),
            BlockInput::Multiple(flags) => flags[idx],
            BlockInput::Text(_) => false,
        }
    }

    /// Answer lines for every block that has something to submit.
    #[must_use]
    pub fn collect(&self) -> Vec<AnswerInput> {
        let mut out = Vec::new();
        for entry in &self.entries {
            entry.collect_into(&mut out);
        }
        out
    }

    #[must_use]
    pub fn to_submission(&self, quiz_id: QuizId) -> Submission {
        Submission {
            quiz_id,
            answers: self.collect(),
        }
    }
}

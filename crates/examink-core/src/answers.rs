//! In-memory answer store keyed by question index.
//!
//! The drawing canvas hands every change to [`AnswerStore::record_drawing`] and
//! is reseeded from [`AnswerStore::initial_drawing`] when the question is shown again.

use crate::stroke::{DrawingData, DrawingError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which input a written answer was last edited in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    #[default]
    Text,
    Draw,
}

/// Everything recorded for one written question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub drawing: Option<DrawingData>,
    #[serde(default)]
    pub mode: AnswerMode,
}

impl QuestionAnswer {
    /// Whether the taker has produced anything for this question.
    pub fn is_answered(&self) -> bool {
        !self.text.trim().is_empty() || self.drawing.as_ref().is_some_and(|d| !d.is_empty())
    }
}

/// Answers for a whole exam.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerStore {
    answers: BTreeMap<usize, QuestionAnswer>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the drawing for `question` with the full stroke list.
    pub fn record_drawing(&mut self, question: usize, data: &DrawingData) {
        log::debug!("Question {}: drawing now has {} strokes", question, data.len());
        self.answers.entry(question).or_default().drawing = Some(data.clone());
    }

    pub fn set_text(&mut self, question: usize, text: impl Into<String>) {
        self.answers.entry(question).or_default().text = text.into();
    }

    pub fn set_mode(&mut self, question: usize, mode: AnswerMode) {
        self.answers.entry(question).or_default().mode = mode;
    }

    pub fn answer(&self, question: usize) -> Option<&QuestionAnswer> {
        self.answers.get(&question)
    }

    /// Drawing to seed the canvas with when `question` is shown.
    pub fn initial_drawing(&self, question: usize) -> Option<DrawingData> {
        self.answers.get(&question)?.drawing.clone()
    }

    /// Number of questions with a non-empty answer.
    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|a| a.is_answered()).count()
    }

    pub fn to_json(&self) -> Result<String, DrawingError> {
        Ok(serde_json::to_string(self)?)
    }
}

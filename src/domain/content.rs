//! Question content blob.
//!
//! A question's renderable structure is stored as a single JSON text column.
//! The persistence layer never interprets it; these types exist so fixtures
//! and rendering collaborators agree on the shape:
//!
//! ```json
//! {
//!   "stem": "...",
//!   "choices": [{ "id": "A", "text": "...", "isCorrect": true }],
//!   "correct": ["A"],
//!   "shuffleChoices": true
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use examprep_store::domain::{Choice, QuestionContent};
//!
//! let content = QuestionContent {
//!     stem: "Pick one".into(),
//!     choices: vec![Choice::new("A", "Yes", true), Choice::new("B", "No", false)],
//!     correct: vec!["A".into()],
//!     shuffle_choices: false,
//! };
//!
//! let json = content.to_json().unwrap();
//! assert!(json.contains("\"isCorrect\":true"));
//! assert!(content.is_consistent());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl Choice {
    pub fn new(id: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
        }
    }
}

/// Multiple-choice question payload stored in `questions.content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionContent {
    /// Question text shown above the choices.
    pub stem: String,
    /// Answer options in display order.
    pub choices: Vec<Choice>,
    /// Ids of the correct choices.
    pub correct: Vec<String>,
    /// Whether the renderer may shuffle `choices`.
    pub shuffle_choices: bool,
}

impl QuestionContent {
    /// Serialize to the compact JSON stored in the database.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored content blob.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Choices flagged as correct, in display order.
    pub fn correct_choices(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter().filter(|c| c.is_correct)
    }

    /// True when `correct` names exactly the choices flagged `isCorrect`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let flagged: Vec<&str> = self.correct_choices().map(|c| c.id.as_str()).collect();
        flagged.len() == self.correct.len()
            && self.correct.iter().all(|id| flagged.contains(&id.as_str()))
    }
}

//! Exam content records.
//!
//! Plain values mirroring rows of the `exams`, `topics`, `questions` and
//! `content_packs` tables. Timestamps are Unix milliseconds, matching how
//! the schema stores them.

use super::content::QuestionContent;

/// A certification exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
}

/// A node in an exam's topic tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: String,
    pub exam_id: String,
    /// Parent topic, `None` for a root knowledge area.
    pub parent_id: Option<String>,
    pub name: String,
    pub sort_order: i64,
}

/// Question kind stored in `questions.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    SingleChoice,
    MultipleChoice,
}

impl QuestionKind {
    /// Kind implied by the answer key: more than one correct id means
    /// multiple choice.
    #[must_use]
    pub fn for_content(content: &QuestionContent) -> Self {
        if content.correct.len() > 1 {
            Self::MultipleChoice
        } else {
            Self::SingleChoice
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::MultipleChoice => "multiple_choice",
        }
    }
}

/// A practice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub exam_id: String,
    pub topic_id: String,
    pub kind: QuestionKind,
    pub difficulty: i64,
    pub content: QuestionContent,
    pub explanation: Option<String>,
}

/// An installed content pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPack {
    pub id: String,
    pub exam_id: String,
    pub version: String,
    /// Hex-encoded SHA-256 of the pack archive.
    pub sha256: String,
}

//! Storage-agnostic domain types.

mod content;
mod exam;

pub use content::{Choice, QuestionContent};
pub use exam::{ContentPack, Exam, Question, QuestionKind, Topic};

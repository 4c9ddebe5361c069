//! Canned development data.
//!
//! Rows are written with `ON CONFLICT(id) DO UPDATE`, so loading twice keeps
//! one row per primary key holding the latest values. Unlike `INSERT OR
//! REPLACE`, this never deletes the parent row and so never trips the
//! foreign keys of dependent topics and questions.

use chrono::Utc;
use tracing::info;

use crate::domain::{Choice, ContentPack, Exam, Question, QuestionContent, QuestionKind, Topic};
use crate::error::Result;
use crate::port::outbound::database::StoreConnection;

const UPSERT_EXAM: &str = "INSERT INTO exams (id, name, version, description, created_at, updated_at)
     VALUES (?, ?, ?, ?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET
         name = excluded.name,
         version = excluded.version,
         description = excluded.description,
         updated_at = excluded.updated_at";

const UPSERT_TOPIC: &str = "INSERT INTO topics (id, exam_id, parent_id, name, sort_order)
     VALUES (?, ?, ?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET
         exam_id = excluded.exam_id,
         parent_id = excluded.parent_id,
         name = excluded.name,
         sort_order = excluded.sort_order";

const UPSERT_QUESTION: &str = "INSERT INTO questions
         (id, exam_id, topic_id, type, difficulty, content, explanation, created_at, updated_at)
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET
         exam_id = excluded.exam_id,
         topic_id = excluded.topic_id,
         type = excluded.type,
         difficulty = excluded.difficulty,
         content = excluded.content,
         explanation = excluded.explanation,
         updated_at = excluded.updated_at";

const UPSERT_CONTENT_PACK: &str = "INSERT INTO content_packs (id, exam_id, version, installed_at, sha256)
     VALUES (?, ?, ?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET
         exam_id = excluded.exam_id,
         version = excluded.version,
         installed_at = excluded.installed_at,
         sha256 = excluded.sha256";

/// One exam with a topic, a question and its installed content pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSet {
    pub exam: Exam,
    pub topic: Topic,
    pub question: Question,
    pub content_pack: ContentPack,
}

impl Default for FixtureSet {
    fn default() -> Self {
        Self::cbap()
    }
}

impl FixtureSet {
    /// The CBAP sample exam.
    #[must_use]
    pub fn cbap() -> Self {
        let content = QuestionContent {
            stem: "Which activity is part of Business Analysis Planning?".into(),
            choices: vec![
                Choice::new("A", "Planning stakeholder engagement", true),
                Choice::new("B", "Validating solution performance", false),
                Choice::new("C", "Conducting elicitation workshops", false),
                Choice::new("D", "Assessing enterprise limitations", false),
            ],
            correct: vec!["A".into()],
            shuffle_choices: true,
        };

        Self {
            exam: Exam {
                id: "cbap".into(),
                name: "Certified Business Analysis Professional".into(),
                version: "v3".into(),
                description: Some("IIBA CBAP certification based on the BABOK Guide v3".into()),
            },
            topic: Topic {
                id: "cbap-planning".into(),
                exam_id: "cbap".into(),
                parent_id: None,
                name: "Business Analysis Planning and Monitoring".into(),
                sort_order: 1,
            },
            question: Question {
                id: "cbap-q-0001".into(),
                exam_id: "cbap".into(),
                topic_id: "cbap-planning".into(),
                kind: QuestionKind::for_content(&content),
                difficulty: 2,
                content,
                explanation: Some(
                    "Planning stakeholder engagement is a task of the Business Analysis \
                     Planning and Monitoring knowledge area."
                        .into(),
                ),
            },
            content_pack: ContentPack {
                id: "cbap-core".into(),
                exam_id: "cbap".into(),
                version: "1.0.0".into(),
                sha256: "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08".into(),
            },
        }
    }
}

/// Upsert every row of `fixtures`.
///
/// # Errors
/// Engine errors are returned as raised.
pub fn load_fixtures<C: StoreConnection>(conn: &mut C, fixtures: &FixtureSet) -> Result<()> {
    let now = Utc::now().timestamp_millis();
    let FixtureSet {
        exam,
        topic,
        question,
        content_pack,
    } = fixtures;

    conn.execute(
        UPSERT_EXAM,
        &[
            exam.id.as_str().into(),
            exam.name.as_str().into(),
            exam.version.as_str().into(),
            exam.description.clone().into(),
            now.into(),
            now.into(),
        ],
    )?;

    conn.execute(
        UPSERT_TOPIC,
        &[
            topic.id.as_str().into(),
            topic.exam_id.as_str().into(),
            topic.parent_id.clone().into(),
            topic.name.as_str().into(),
            topic.sort_order.into(),
        ],
    )?;

    conn.execute(
        UPSERT_QUESTION,
        &[
            question.id.as_str().into(),
            question.exam_id.as_str().into(),
            question.topic_id.as_str().into(),
            question.kind.as_str().into(),
            question.difficulty.into(),
            question.content.to_json()?.into(),
            question.explanation.clone().into(),
            now.into(),
            now.into(),
        ],
    )?;

    conn.execute(
        UPSERT_CONTENT_PACK,
        &[
            content_pack.id.as_str().into(),
            content_pack.exam_id.as_str().into(),
            content_pack.version.as_str().into(),
            now.into(),
            content_pack.sha256.as_str().into(),
        ],
    )?;

    info!(exam = %exam.id, "Loaded fixtures");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbap_question_has_single_correct_answer() {
        let content = FixtureSet::cbap().question.content;

        assert_eq!(content.choices.len(), 4);
        assert!(content.is_consistent());
        let ids: Vec<_> = content.choices.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn fixture_rows_reference_the_fixture_exam() {
        let set = FixtureSet::default();
        assert_eq!(set.topic.exam_id, set.exam.id);
        assert_eq!(set.question.exam_id, set.exam.id);
        assert_eq!(set.question.topic_id, set.topic.id);
        assert_eq!(set.content_pack.exam_id, set.exam.id);
        assert_eq!(set.content_pack.sha256.len(), 64);
    }
}

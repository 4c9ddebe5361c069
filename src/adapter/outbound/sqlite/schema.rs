//! Schema DDL applied by migrations.
//!
//! Statements use `IF NOT EXISTS` so a batch that failed half-way can be
//! re-run from the top. Timestamps are Unix milliseconds.

/// Migration tracking table, created before any migration runs.
pub const MIGRATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    version TEXT NOT NULL UNIQUE,
    applied_at INTEGER NOT NULL
);";

/// `001_initial`: exam content, practice attempts, progress and preferences.
pub const INITIAL: &str = r#"
CREATE TABLE IF NOT EXISTS exams (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    version TEXT NOT NULL,
    description TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS topics (
    id TEXT PRIMARY KEY NOT NULL,
    exam_id TEXT NOT NULL REFERENCES exams(id),
    parent_id TEXT REFERENCES topics(id),
    name TEXT NOT NULL,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS questions (
    id TEXT PRIMARY KEY NOT NULL,
    exam_id TEXT NOT NULL REFERENCES exams(id),
    topic_id TEXT NOT NULL REFERENCES topics(id),
    type TEXT NOT NULL,
    difficulty INTEGER NOT NULL DEFAULT 1,
    content TEXT NOT NULL,
    explanation TEXT,
    version INTEGER NOT NULL DEFAULT 1,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS exhibits (
    id TEXT PRIMARY KEY NOT NULL,
    exam_id TEXT NOT NULL REFERENCES exams(id),
    kind TEXT NOT NULL,
    uri TEXT NOT NULL,
    mime_type TEXT,
    width INTEGER,
    height INTEGER,
    alt_text TEXT
);

CREATE TABLE IF NOT EXISTS question_exhibits (
    question_id TEXT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
    exhibit_id TEXT NOT NULL REFERENCES exhibits(id) ON DELETE CASCADE,
    position INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (question_id, exhibit_id)
);

CREATE TABLE IF NOT EXISTS attempts (
    id TEXT PRIMARY KEY NOT NULL,
    exam_id TEXT NOT NULL REFERENCES exams(id),
    mode TEXT NOT NULL,
    started_at INTEGER NOT NULL,
    completed_at INTEGER,
    score REAL,
    total_questions INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS attempt_items (
    id TEXT PRIMARY KEY NOT NULL,
    attempt_id TEXT NOT NULL REFERENCES attempts(id) ON DELETE CASCADE,
    question_id TEXT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
    response TEXT,
    is_correct INTEGER,
    flagged INTEGER NOT NULL DEFAULT 0,
    time_spent_ms INTEGER,
    answered_at INTEGER
);

CREATE TABLE IF NOT EXISTS progress (
    exam_id TEXT NOT NULL REFERENCES exams(id),
    topic_id TEXT NOT NULL REFERENCES topics(id),
    questions_seen INTEGER NOT NULL DEFAULT 0,
    questions_correct INTEGER NOT NULL DEFAULT 0,
    mastery REAL NOT NULL DEFAULT 0,
    last_practiced_at INTEGER,
    PRIMARY KEY (exam_id, topic_id)
);

CREATE TABLE IF NOT EXISTS user_preferences (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS content_packs (
    id TEXT PRIMARY KEY NOT NULL,
    exam_id TEXT NOT NULL REFERENCES exams(id),
    version TEXT NOT NULL,
    installed_at INTEGER NOT NULL,
    sha256 TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_topics_exam ON topics(exam_id);
CREATE INDEX IF NOT EXISTS idx_questions_exam_topic ON questions(exam_id, topic_id);
CREATE INDEX IF NOT EXISTS idx_exhibits_exam ON exhibits(exam_id);
CREATE INDEX IF NOT EXISTS idx_attempts_exam ON attempts(exam_id);
CREATE INDEX IF NOT EXISTS idx_attempt_items_attempt ON attempt_items(attempt_id);
CREATE INDEX IF NOT EXISTS idx_content_packs_exam ON content_packs(exam_id);
"#;

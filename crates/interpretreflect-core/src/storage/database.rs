//! SQLite-based storage for events, scores, and outcomes.
//!
//! Three collaborator roles behind one database:
//! - events store: the four log types, insert-only, queryable by user
//!   and time range
//! - scores store: complexity upserted by task id, capacity snapshots and
//!   outcomes appended
//! - kv store: serialized pattern-engine state checkpoints

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StoreError;
use crate::events::{
    AssignmentLog, EmotionLog, EventHistory, ResetLog, WellnessActionLog,
};
use crate::load::capacity::CognitiveCapacity;
use crate::load::complexity::AssignmentComplexity;
use crate::load::outcome::AssignmentOutcome;

/// SQLite database for InterpretReflect data.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/interpretreflect/reflect.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("reflect.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests and dry runs).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS emotion_logs (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     TEXT NOT NULL,
                emotion     TEXT NOT NULL,
                intensity   INTEGER NOT NULL,
                timestamp   TEXT NOT NULL,
                context     TEXT
            );

            CREATE TABLE IF NOT EXISTS assignment_logs (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id         TEXT NOT NULL,
                assignment_type TEXT NOT NULL,
                duration_min    INTEGER NOT NULL,
                difficulty      TEXT NOT NULL,
                emotion_after   TEXT,
                timestamp       TEXT NOT NULL,
                completed       INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS reset_logs (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id       TEXT NOT NULL,
                reset_type    TEXT NOT NULL,
                timestamp     TEXT NOT NULL,
                effectiveness INTEGER,
                skipped       INTEGER NOT NULL,
                reason        TEXT
            );

            CREATE TABLE IF NOT EXISTS wellness_actions (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id       TEXT NOT NULL,
                action        TEXT NOT NULL,
                category      TEXT NOT NULL,
                timestamp     TEXT NOT NULL,
                duration_min  INTEGER,
                effectiveness INTEGER
            );

            CREATE TABLE IF NOT EXISTS assignment_complexity (
                task_id                     TEXT PRIMARY KEY,
                domain                      TEXT NOT NULL,
                domain_expertise_score      REAL NOT NULL,
                stakes_score                REAL NOT NULL,
                time_pressure_score         REAL NOT NULL,
                emotional_intensity_score   REAL NOT NULL,
                technical_jargon_score      REAL NOT NULL,
                multitasking_score          REAL NOT NULL,
                cultural_sensitivity_score  REAL NOT NULL,
                total_complexity_score      REAL NOT NULL,
                scored_at                   TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS capacity_snapshots (
                id                            INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id                       TEXT NOT NULL,
                measured_at                   TEXT NOT NULL,
                available_capacity            REAL NOT NULL,
                working_memory_load           REAL NOT NULL,
                attention_reserve             REAL NOT NULL,
                decision_fatigue_level        REAL NOT NULL,
                multitasking_efficiency       REAL NOT NULL,
                error_rate_under_pressure     REAL NOT NULL,
                high_load_performance         REAL NOT NULL,
                medical_terminology_capacity  REAL NOT NULL,
                legal_complexity_capacity     REAL NOT NULL,
                technical_jargon_capacity     REAL NOT NULL,
                emotional_resilience_capacity REAL NOT NULL,
                recovery_rate                 REAL NOT NULL,
                optimal_break_duration        INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS assignment_outcomes (
                id                      INTEGER PRIMARY KEY AUTOINCREMENT,
                task_id                 TEXT NOT NULL,
                user_id                 TEXT NOT NULL,
                performance_score       INTEGER NOT NULL,
                stress_level            INTEGER NOT NULL,
                actual_recovery_minutes INTEGER,
                completed_at            TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_emotion_logs_user_ts ON emotion_logs(user_id, timestamp);
            CREATE INDEX IF NOT EXISTS idx_assignment_logs_user_ts ON assignment_logs(user_id, timestamp);
            CREATE INDEX IF NOT EXISTS idx_reset_logs_user_ts ON reset_logs(user_id, timestamp);
            CREATE INDEX IF NOT EXISTS idx_wellness_actions_user_ts ON wellness_actions(user_id, timestamp);
            CREATE INDEX IF NOT EXISTS idx_capacity_user_measured ON capacity_snapshots(user_id, measured_at);",
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Events store
    // ------------------------------------------------------------------

    /// Record an emotion log.
    pub fn insert_emotion(&self, user_id: &str, log: &EmotionLog) -> Result<i64, StoreError> {
        let context = log
            .context
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO emotion_logs (user_id, emotion, intensity, timestamp, context)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                log.emotion,
                log.intensity,
                log.timestamp.to_rfc3339(),
                context,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Record an assignment log.
    pub fn insert_assignment(&self, user_id: &str, log: &AssignmentLog) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO assignment_logs
             (user_id, assignment_type, duration_min, difficulty, emotion_after, timestamp, completed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user_id,
                log.assignment_type,
                log.duration_minutes,
                log.difficulty.as_str(),
                log.emotion_after,
                log.timestamp.to_rfc3339(),
                log.completed,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Record a reset log.
    pub fn insert_reset(&self, user_id: &str, log: &ResetLog) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO reset_logs (user_id, reset_type, timestamp, effectiveness, skipped, reason)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id,
                log.reset_type,
                log.timestamp.to_rfc3339(),
                log.effectiveness,
                log.skipped,
                log.reason,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Record a wellness action.
    pub fn insert_wellness_action(
        &self,
        user_id: &str,
        log: &WellnessActionLog,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO wellness_actions
             (user_id, action, category, timestamp, duration_min, effectiveness)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id,
                log.action,
                log.category.as_str(),
                log.timestamp.to_rfc3339(),
                log.duration_minutes,
                log.effectiveness,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Materialize a user's event history at or after `since`, each slice
    /// ordered by timestamp.
    pub fn event_history(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<EventHistory, StoreError> {
        let since_str = since.to_rfc3339();

        let mut stmt = self.conn.prepare(
            "SELECT emotion, intensity, timestamp, context FROM emotion_logs
             WHERE user_id = ?1 AND timestamp >= ?2 ORDER BY timestamp",
        )?;
        let emotions = stmt
            .query_map(params![user_id, since_str], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u8>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|(emotion, intensity, ts, context)| {
                Ok(EmotionLog {
                    emotion,
                    intensity,
                    timestamp: parse_ts(&ts)?,
                    context: context
                        .map(|c| serde_json::from_str(&c))
                        .transpose()
                        .map_err(|e| StoreError::QueryFailed(e.to_string()))?,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT assignment_type, duration_min, difficulty, emotion_after, timestamp, completed
             FROM assignment_logs
             WHERE user_id = ?1 AND timestamp >= ?2 ORDER BY timestamp",
        )?;
        let assignments = stmt
            .query_map(params![user_id, since_str], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, bool>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(
                |(assignment_type, duration_minutes, difficulty, emotion_after, ts, completed)| {
                    Ok(AssignmentLog {
                        assignment_type,
                        duration_minutes,
                        difficulty: difficulty
                            .parse()
                            .map_err(|e: crate::error::ValidationError| {
                                StoreError::QueryFailed(e.to_string())
                            })?,
                        emotion_after,
                        timestamp: parse_ts(&ts)?,
                        completed,
                    })
                },
            )
            .collect::<Result<Vec<_>, StoreError>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT reset_type, timestamp, effectiveness, skipped, reason FROM reset_logs
             WHERE user_id = ?1 AND timestamp >= ?2 ORDER BY timestamp",
        )?;
        let resets = stmt
            .query_map(params![user_id, since_str], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<u8>>(2)?,
                    row.get::<_, bool>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|(reset_type, ts, effectiveness, skipped, reason)| {
                Ok(ResetLog {
                    reset_type,
                    timestamp: parse_ts(&ts)?,
                    effectiveness,
                    skipped,
                    reason,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT action, category, timestamp, duration_min, effectiveness FROM wellness_actions
             WHERE user_id = ?1 AND timestamp >= ?2 ORDER BY timestamp",
        )?;
        let wellness_actions = stmt
            .query_map(params![user_id, since_str], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<u32>>(3)?,
                    row.get::<_, Option<u8>>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|(action, category, ts, duration_minutes, effectiveness)| {
                Ok(WellnessActionLog {
                    action,
                    category: category
                        .parse()
                        .map_err(|e: crate::error::ValidationError| {
                            StoreError::QueryFailed(e.to_string())
                        })?,
                    timestamp: parse_ts(&ts)?,
                    duration_minutes,
                    effectiveness,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(EventHistory {
            emotions,
            assignments,
            resets,
            wellness_actions,
        })
    }

    // ------------------------------------------------------------------
    // Scores store
    // ------------------------------------------------------------------

    /// Upsert a complexity score, keyed by task id.
    pub fn upsert_complexity(&self, complexity: &AssignmentComplexity) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO assignment_complexity
             (task_id, domain, domain_expertise_score, stakes_score, time_pressure_score,
              emotional_intensity_score, technical_jargon_score, multitasking_score,
              cultural_sensitivity_score, total_complexity_score, scored_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(task_id) DO UPDATE SET
                domain = excluded.domain,
                domain_expertise_score = excluded.domain_expertise_score,
                stakes_score = excluded.stakes_score,
                time_pressure_score = excluded.time_pressure_score,
                emotional_intensity_score = excluded.emotional_intensity_score,
                technical_jargon_score = excluded.technical_jargon_score,
                multitasking_score = excluded.multitasking_score,
                cultural_sensitivity_score = excluded.cultural_sensitivity_score,
                total_complexity_score = excluded.total_complexity_score,
                scored_at = excluded.scored_at",
            params![
                complexity.task_id,
                complexity.domain,
                complexity.domain_expertise_score,
                complexity.stakes_score,
                complexity.time_pressure_score,
                complexity.emotional_intensity_score,
                complexity.technical_jargon_score,
                complexity.multitasking_score,
                complexity.cultural_sensitivity_score,
                complexity.total_complexity_score,
                complexity.scored_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Fetch the complexity score for a task, if one has been recorded.
    pub fn get_complexity(&self, task_id: &str) -> Result<Option<AssignmentComplexity>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT task_id, domain, domain_expertise_score, stakes_score, time_pressure_score,
                    emotional_intensity_score, technical_jargon_score, multitasking_score,
                    cultural_sensitivity_score, total_complexity_score, scored_at
             FROM assignment_complexity WHERE task_id = ?1",
        )?;

        let mut rows = stmt.query_map(params![task_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, f64>(5)?,
                row.get::<_, f64>(6)?,
                row.get::<_, f64>(7)?,
                row.get::<_, f64>(8)?,
                row.get::<_, f64>(9)?,
                row.get::<_, String>(10)?,
            ))
        })?;

        match rows.next() {
            Some(row) => {
                let (
                    task_id,
                    domain,
                    domain_expertise_score,
                    stakes_score,
                    time_pressure_score,
                    emotional_intensity_score,
                    technical_jargon_score,
                    multitasking_score,
                    cultural_sensitivity_score,
                    total_complexity_score,
                    scored_at,
                ) = row?;
                Ok(Some(AssignmentComplexity {
                    task_id,
                    domain,
                    domain_expertise_score,
                    stakes_score,
                    time_pressure_score,
                    emotional_intensity_score,
                    technical_jargon_score,
                    multitasking_score,
                    cultural_sensitivity_score,
                    total_complexity_score,
                    scored_at: parse_ts(&scored_at)?,
                }))
            }
            None => Ok(None),
        }
    }

    /// Append a capacity snapshot to the time series.
    pub fn append_capacity(&self, capacity: &CognitiveCapacity) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO capacity_snapshots
             (user_id, measured_at, available_capacity, working_memory_load, attention_reserve,
              decision_fatigue_level, multitasking_efficiency, error_rate_under_pressure,
              high_load_performance, medical_terminology_capacity, legal_complexity_capacity,
              technical_jargon_capacity, emotional_resilience_capacity, recovery_rate,
              optimal_break_duration)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                capacity.user_id,
                capacity.measured_at.to_rfc3339(),
                capacity.available_capacity,
                capacity.working_memory_load,
                capacity.attention_reserve,
                capacity.decision_fatigue_level,
                capacity.multitasking_efficiency,
                capacity.error_rate_under_pressure,
                capacity.high_load_performance,
                capacity.medical_terminology_capacity,
                capacity.legal_complexity_capacity,
                capacity.technical_jargon_capacity,
                capacity.emotional_resilience_capacity,
                capacity.recovery_rate,
                capacity.optimal_break_duration,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent capacity snapshot for a user, if any.
    pub fn latest_capacity(&self, user_id: &str) -> Result<Option<CognitiveCapacity>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, measured_at, available_capacity, working_memory_load,
                    attention_reserve, decision_fatigue_level, multitasking_efficiency,
                    error_rate_under_pressure, high_load_performance,
                    medical_terminology_capacity, legal_complexity_capacity,
                    technical_jargon_capacity, emotional_resilience_capacity,
                    recovery_rate, optimal_break_duration
             FROM capacity_snapshots WHERE user_id = ?1
             ORDER BY measured_at DESC, id DESC LIMIT 1",
        )?;

        let mut rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                [
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, f64>(5)?,
                    row.get::<_, f64>(6)?,
                    row.get::<_, f64>(7)?,
                    row.get::<_, f64>(8)?,
                    row.get::<_, f64>(9)?,
                    row.get::<_, f64>(10)?,
                    row.get::<_, f64>(11)?,
                    row.get::<_, f64>(12)?,
                    row.get::<_, f64>(13)?,
                ],
                row.get::<_, u32>(14)?,
            ))
        })?;

        match rows.next() {
            Some(row) => {
                let (user_id, measured_at, f, optimal_break_duration) = row?;
                Ok(Some(CognitiveCapacity {
                    user_id,
                    measured_at: parse_ts(&measured_at)?,
                    available_capacity: f[0],
                    working_memory_load: f[1],
                    attention_reserve: f[2],
                    decision_fatigue_level: f[3],
                    multitasking_efficiency: f[4],
                    error_rate_under_pressure: f[5],
                    high_load_performance: f[6],
                    medical_terminology_capacity: f[7],
                    legal_complexity_capacity: f[8],
                    technical_jargon_capacity: f[9],
                    emotional_resilience_capacity: f[10],
                    recovery_rate: f[11],
                    optimal_break_duration,
                }))
            }
            None => Ok(None),
        }
    }

    /// Append an assignment outcome record.
    pub fn append_outcome(&self, outcome: &AssignmentOutcome) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO assignment_outcomes
             (task_id, user_id, performance_score, stress_level, actual_recovery_minutes,
              completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                outcome.task_id,
                outcome.user_id,
                outcome.performance_score,
                outcome.stress_level,
                outcome.actual_recovery_minutes,
                outcome.completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    // ------------------------------------------------------------------
    // Key-value store
    // ------------------------------------------------------------------

    /// Fetch a kv entry.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query_map(params![key], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(value) => Ok(Some(value?)),
            None => Ok(None),
        }
    }

    /// Insert or replace a kv entry.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

fn parse_ts(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::QueryFailed(format!("bad timestamp '{s}': {e}")))
}

//! # InterpretReflect Core Library
//!
//! This library provides the core business logic for InterpretReflect,
//! a wellness and professional-development tool for sign-language and
//! spoken-language interpreters. It implements a CLI-first philosophy
//! where all operations are available via a standalone CLI binary, with
//! any richer surface being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Pattern Detection Engine**: a declarative catalog of detection
//!   rules evaluated against a user's event history, surfacing nudges
//!   once a rule has matched often enough
//! - **Cognitive Load Balancing**: deterministic complexity and capacity
//!   scoring combined into explainable routing recommendations
//! - **Storage**: SQLite-based event/score storage and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`PatternState`]: per-user engine state passed into the stateless
//!   analysis functions
//! - [`LoadBalancer`]: store-backed scoring and routing with best-effort
//!   persistence
//! - [`Database`]: events, scores, outcomes, and state checkpoints
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod load;
pub mod patterns;
pub mod storage;

pub use error::{ConfigError, CoreError, Result, RoutingError, StoreError, ValidationError};
pub use events::{
    AssignmentLog, Difficulty, EmotionContext, EmotionLog, EventHistory, ResetLog,
    WellnessActionLog, WellnessCategory,
};
pub use load::{
    outcome_adjustment, recommend_routing, score_complexity, AssignmentComplexity,
    AssignmentOutcome, CapacityUpdate, CognitiveCapacity, ComplexityWeights, EmotionalIntensity,
    LoadBalancer, RiskLevel, RoutingRecommendation, Stakes, TaskAttributes, TimePressure,
};
pub use patterns::{
    active_nudges, analyze, catalog, dismiss_nudge, recommendations, NudgeAction, NudgeKind,
    NudgePriority, PatternNudge, PatternState, RecommendationTag, RuleId, Timeframe, UserPattern,
};
pub use storage::{Config, Database};

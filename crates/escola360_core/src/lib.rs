//! Core domain logic for Escola 360 curriculum planning.
//! This crate is the single source of truth for plan and library invariants.

pub mod config;
pub mod db;
pub mod generator;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use generator::request::{
    AssessmentRequest, GenerationRequest, PlanRequest, QuestionBankRequest, QuestionQuantities,
    RegenerateUnitRequest, RubricRequest, SlideDeckRequest, TextRequest,
};
pub use generator::response::{parse_artifact, GenerationError, GenerationResult};
pub use generator::{ContentGenerator, GeneratedArtifact};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::artifact::{
    ArtifactValidationError, AssessmentConfig, EducationalContent, GeneratedAssessment, Question,
    Rubric, Slide, SlideDeck,
};
pub use model::catalog::{
    Bimester, CurriculumStandard, GradeLevel, MethodologyStrategy, QuestionType, Subject,
};
pub use model::context::PlanningContext;
pub use model::library::{LibraryItem, LibraryItemId, LibraryItemType};
pub use model::plan::{BimesterPlan, LessonPlanPatch, LessonPlanUnit};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use service::library_service::{LibraryError, LibraryResult, LibraryService};
pub use service::plan_mutation::{apply_unit_update, AssessmentEdit};
pub use service::planning_session::{
    GenerationAction, GenerationKind, PendingGeneration, PlanningSession, SessionError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

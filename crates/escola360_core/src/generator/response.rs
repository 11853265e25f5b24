//! Generator failure taxonomy and response validation.
//!
//! # Responsibility
//! - Turn raw generator output into validated artifacts or typed failures.
//!
//! # Invariants
//! - Nothing produced by a generator reaches a plan without passing
//!   [`ArtifactShape::check_shape`].
//! - Transport failures and malformed content stay distinguishable.

use crate::model::artifact::{
    validate_questions, ArtifactValidationError, EducationalContent, GeneratedAssessment, Question,
    Rubric, SlideDeck, ValidationResult,
};
use crate::model::plan::{BimesterPlan, LessonPlanUnit};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GenerationResult<T> = Result<T, GenerationError>;

/// Failure of one generator call.
#[derive(Debug)]
pub enum GenerationError {
    /// Remote call rejected, timed out or could not be sent.
    Transport(String),
    /// Remote call succeeded without a body.
    EmptyResponse,
    /// Body does not match the declared schema.
    SchemaMismatch(serde_json::Error),
    /// Body parsed but violates a structural rule.
    Invalid(ArtifactValidationError),
    /// Generator answered with a different artifact kind than requested.
    UnexpectedArtifact {
        expected: &'static str,
        actual: &'static str,
    },
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "generator request failed: {message}"),
            Self::EmptyResponse => write!(f, "generator returned an empty response"),
            Self::SchemaMismatch(err) => {
                write!(f, "generator response does not match schema: {err}")
            }
            Self::Invalid(err) => write!(f, "generator response is invalid: {err}"),
            Self::UnexpectedArtifact { expected, actual } => {
                write!(f, "generator returned {actual}, expected {expected}")
            }
        }
    }
}

impl Error for GenerationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SchemaMismatch(err) => Some(err),
            Self::Invalid(err) => Some(err),
            Self::Transport(_) | Self::EmptyResponse | Self::UnexpectedArtifact { .. } => None,
        }
    }
}

impl From<ArtifactValidationError> for GenerationError {
    fn from(value: ArtifactValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Structural check applied to everything a generator returns.
pub trait ArtifactShape {
    fn check_shape(&self) -> ValidationResult;
}

impl ArtifactShape for BimesterPlan {
    fn check_shape(&self) -> ValidationResult {
        self.validate()
    }
}

impl ArtifactShape for LessonPlanUnit {
    fn check_shape(&self) -> ValidationResult {
        self.validate()
    }
}

impl ArtifactShape for EducationalContent {
    fn check_shape(&self) -> ValidationResult {
        self.validate()
    }
}

impl ArtifactShape for Vec<Question> {
    fn check_shape(&self) -> ValidationResult {
        validate_questions(self)
    }
}

impl ArtifactShape for SlideDeck {
    fn check_shape(&self) -> ValidationResult {
        self.validate()
    }
}

impl ArtifactShape for GeneratedAssessment {
    fn check_shape(&self) -> ValidationResult {
        self.validate()
    }
}

impl ArtifactShape for Rubric {
    fn check_shape(&self) -> ValidationResult {
        self.validate()
    }
}

/// Passes `value` through when its shape is valid.
pub fn checked<T: ArtifactShape>(value: T) -> GenerationResult<T> {
    value.check_shape()?;
    Ok(value)
}

/// Parses a raw JSON generator body into a validated artifact.
///
/// Adapters over text-producing model APIs call this on the response body.
///
/// # Errors
/// - `EmptyResponse` when `raw` is absent or blank.
/// - `SchemaMismatch` when the JSON does not deserialize into `T`.
/// - `Invalid` when the value violates a structural rule.
pub fn parse_artifact<T>(raw: Option<&str>) -> GenerationResult<T>
where
    T: DeserializeOwned + ArtifactShape,
{
    let body = raw.map(str::trim).filter(|body| !body.is_empty());
    let Some(body) = body else {
        return Err(GenerationError::EmptyResponse);
    };
    let value = serde_json::from_str::<T>(body).map_err(GenerationError::SchemaMismatch)?;
    checked(value)
}

//! Attachable generated artifacts.
//!
//! # Responsibility
//! - Define the documents a generator can attach to one lesson-plan unit.
//! - Provide structural validation for generator output.
//!
//! # Invariants
//! - JSON field names follow the persisted library format (camelCase).
//! - `validate()` never inspects prose quality, only shape.

use crate::model::catalog::QuestionType;
use chrono::{Local, NaiveDate};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Visual themes a slide deck can be rendered with.
pub const SLIDE_THEMES: [&str; 5] = ["Indigo", "Emerald", "Violet", "Amber", "Rose"];
/// Theme used by viewers when a deck carries none.
pub const DEFAULT_SLIDE_THEME: &str = "Indigo";

/// Structural violation found in generator output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactValidationError {
    /// A required text field is blank.
    EmptyField(&'static str),
    /// A required list is empty.
    EmptyList(&'static str),
    /// A multiple-choice question offers fewer than two options.
    MissingOptions { question_index: usize },
}

impl Display for ArtifactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` must not be empty"),
            Self::EmptyList(field) => write!(f, "`{field}` must contain at least one entry"),
            Self::MissingOptions { question_index } => write!(
                f,
                "multiple-choice question #{question_index} must offer at least two options"
            ),
        }
    }
}

impl Error for ArtifactValidationError {}

pub type ValidationResult = Result<(), ArtifactValidationError>;

pub(crate) fn require_text(value: &str, field: &'static str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ArtifactValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_items<T>(items: &[T], field: &'static str) -> ValidationResult {
    if items.is_empty() {
        return Err(ArtifactValidationError::EmptyList(field));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextbookSection {
    pub subtitle: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryItem {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationKind {
    Video,
    Book,
    Article,
    Site,
}

/// Complementary material suggested alongside a didactic text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_or_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Didactic text written for one unit topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationalContent {
    pub title: String,
    pub introduction: String,
    pub sections: Vec<TextbookSection>,
    #[serde(default)]
    pub glossary: Vec<GlossaryItem>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub references: Vec<String>,
}

impl EducationalContent {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.title, "educationalText.title")?;
        require_items(&self.sections, "educationalText.sections")
    }
}

/// One question or playful activity.
///
/// Answer fields are optional because their meaning depends on `kind`:
/// multiple choice uses `options`/`correct_answer`/`justification`, the other
/// formats use `answer_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub statement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bncc_alignment: Option<String>,
}

impl Question {
    pub fn new(kind: QuestionType, statement: impl Into<String>) -> Self {
        Self {
            kind,
            statement: statement.into(),
            options: None,
            correct_answer: None,
            justification: None,
            answer_key: None,
            bncc_alignment: None,
        }
    }
}

/// Validates a generated batch of questions.
pub fn validate_questions(questions: &[Question]) -> ValidationResult {
    require_items(questions, "questions")?;
    for (index, question) in questions.iter().enumerate() {
        require_text(&question.statement, "question.statement")?;
        if question.kind == QuestionType::MultipleChoice {
            let option_count = question.options.as_ref().map_or(0, Vec::len);
            if option_count < 2 {
                return Err(ArtifactValidationError::MissingOptions {
                    question_index: index,
                });
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub content: String,
}

/// Presentation generated for one unit topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDeck {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub slides: Vec<Slide>,
}

impl SlideDeck {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.title, "slideDeck.title")?;
        require_items(&self.slides, "slideDeck.slides")
    }

    /// Theme to render with, falling back to [`DEFAULT_SLIDE_THEME`].
    pub fn theme_or_default(&self) -> &str {
        self.theme.as_deref().unwrap_or(DEFAULT_SLIDE_THEME)
    }

    /// Picks a random theme when the deck has none, so the choice persists
    /// with the deck.
    pub fn ensure_theme(&mut self) {
        let missing = self
            .theme
            .as_deref()
            .map_or(true, |theme| theme.trim().is_empty());
        if missing {
            let theme = SLIDE_THEMES
                .choose(&mut rand::rng())
                .copied()
                .unwrap_or(DEFAULT_SLIDE_THEME);
            self.theme = Some(theme.to_string());
        }
    }
}

/// Header and scoring layout of a printable assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentConfig {
    pub school_name: String,
    pub professor_name: String,
    /// Display date, `dd/mm/yyyy`.
    pub date: String,
    pub total_value: f64,
    pub mc_count: u32,
    pub mc_value: f64,
    pub essay_count: u32,
    pub essay_value: f64,
}

impl AssessmentConfig {
    /// Default layout dated for `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            school_name: "Escola 360".to_string(),
            professor_name: String::new(),
            date: date.format("%d/%m/%Y").to_string(),
            total_value: 10.0,
            mc_count: 5,
            mc_value: 1.0,
            essay_count: 2,
            essay_value: 2.5,
        }
    }

    /// Points reachable with the configured counts and per-question values.
    pub fn scored_total(&self) -> f64 {
        f64::from(self.mc_count) * self.mc_value + f64::from(self.essay_count) * self.essay_value
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self::for_date(Local::now().date_naive())
    }
}

/// Formal assessment assembled from a config and generated questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAssessment {
    pub header: AssessmentConfig,
    pub questions: Vec<Question>,
    pub topic: String,
    pub grade: String,
    pub subject: String,
    pub bimester: String,
}

impl GeneratedAssessment {
    pub fn validate(&self) -> ValidationResult {
        validate_questions(&self.questions)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricLevel {
    pub level_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricCriterion {
    pub name: String,
    pub levels: Vec<RubricLevel>,
}

/// Grading rubric for a unit's methodology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    pub title: String,
    pub criteria: Vec<RubricCriterion>,
}

impl Rubric {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.title, "rubric.title")?;
        require_items(&self.criteria, "rubric.criteria")
    }
}

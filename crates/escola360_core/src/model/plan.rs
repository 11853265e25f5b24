//! Bimester plan and lesson-plan unit model.
//!
//! # Responsibility
//! - Define the working document edited by a planning session.
//! - Define the partial-update shape consumed by the mutation engine.
//!
//! # Invariants
//! - `LessonPlanUnit` JSON names match the persisted library format, which
//!   mixes snake_case (generator schema) and camelCase (attached artifacts).
//! - Absent optional fields are omitted on write and read back as `None`.
//! - `LessonPlanPatch::apply` only overwrites fields the patch carries.

use crate::model::artifact::{
    require_items, require_text, EducationalContent, GeneratedAssessment, Question, Rubric,
    SlideDeck, ValidationResult,
};
use crate::model::catalog::MethodologyStrategy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BnccSkill {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub title: String,
    pub description: String,
    pub duration: String,
}

/// Assessment proposal written into the unit by the plan generator.
///
/// Distinct from [`GeneratedAssessment`], which is a full printable test
/// attached later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentProposal {
    pub title: String,
    pub methodology: String,
    pub criteria: String,
}

/// Universal-design adaptations for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionAdaptations {
    pub general: String,
    pub adhd: String,
    pub autism: String,
    pub dyslexia: String,
    pub high_abilities: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterdisciplinaryConnection {
    pub subject: String,
    pub description: String,
}

/// One thematic unit of a bimester plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonPlanUnit {
    pub topic: String,
    pub objectives: Vec<String>,
    pub content_summary: String,
    pub methodology: String,
    /// Set only after the unit has been rewritten around a strategy.
    #[serde(
        rename = "selectedStrategy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_strategy: Option<MethodologyStrategy>,
    #[serde(default)]
    pub bncc_skills: Vec<BnccSkill>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub assessments: Vec<AssessmentProposal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusion: Option<InclusionAdaptations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interdisciplinary: Option<Vec<InterdisciplinaryConnection>>,
    #[serde(
        rename = "educationalText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub educational_text: Option<EducationalContent>,
    /// Append-only; new batches are concatenated after existing questions.
    #[serde(
        rename = "questionBank",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub question_bank: Option<Vec<Question>>,
    #[serde(rename = "slideDeck", default, skip_serializing_if = "Option::is_none")]
    pub slide_deck: Option<SlideDeck>,
    #[serde(
        rename = "generatedAssessment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_assessment: Option<GeneratedAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric: Option<Rubric>,
}

impl LessonPlanUnit {
    /// Creates a unit with only the descriptive core filled in.
    pub fn new(
        topic: impl Into<String>,
        content_summary: impl Into<String>,
        methodology: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            objectives: Vec::new(),
            content_summary: content_summary.into(),
            methodology: methodology.into(),
            selected_strategy: None,
            bncc_skills: Vec::new(),
            activities: Vec::new(),
            assessments: Vec::new(),
            inclusion: None,
            interdisciplinary: None,
            educational_text: None,
            question_bank: None,
            slide_deck: None,
            generated_assessment: None,
            rubric: None,
        }
    }

    pub fn validate(&self) -> ValidationResult {
        require_text(&self.topic, "plan.topic")
    }

    /// Number of questions in the bank; an absent bank counts as empty.
    pub fn question_count(&self) -> usize {
        self.question_bank.as_ref().map_or(0, Vec::len)
    }
}

/// Partial update for one unit. `None` means "leave the field untouched".
///
/// Optional unit fields cannot be cleared through a patch; artifacts are only
/// ever attached or replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonPlanPatch {
    pub topic: Option<String>,
    pub objectives: Option<Vec<String>>,
    pub content_summary: Option<String>,
    pub methodology: Option<String>,
    pub selected_strategy: Option<MethodologyStrategy>,
    pub bncc_skills: Option<Vec<BnccSkill>>,
    pub activities: Option<Vec<Activity>>,
    pub assessments: Option<Vec<AssessmentProposal>>,
    pub inclusion: Option<InclusionAdaptations>,
    pub interdisciplinary: Option<Vec<InterdisciplinaryConnection>>,
    pub educational_text: Option<EducationalContent>,
    pub question_bank: Option<Vec<Question>>,
    pub slide_deck: Option<SlideDeck>,
    pub generated_assessment: Option<GeneratedAssessment>,
    pub rubric: Option<Rubric>,
}

impl LessonPlanPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Shallow-merges this patch into `unit`.
    pub fn apply(self, unit: &mut LessonPlanUnit) {
        if let Some(topic) = self.topic {
            unit.topic = topic;
        }
        if let Some(objectives) = self.objectives {
            unit.objectives = objectives;
        }
        if let Some(content_summary) = self.content_summary {
            unit.content_summary = content_summary;
        }
        if let Some(methodology) = self.methodology {
            unit.methodology = methodology;
        }
        if let Some(strategy) = self.selected_strategy {
            unit.selected_strategy = Some(strategy);
        }
        if let Some(bncc_skills) = self.bncc_skills {
            unit.bncc_skills = bncc_skills;
        }
        if let Some(activities) = self.activities {
            unit.activities = activities;
        }
        if let Some(assessments) = self.assessments {
            unit.assessments = assessments;
        }
        if let Some(inclusion) = self.inclusion {
            unit.inclusion = Some(inclusion);
        }
        if let Some(interdisciplinary) = self.interdisciplinary {
            unit.interdisciplinary = Some(interdisciplinary);
        }
        if let Some(text) = self.educational_text {
            unit.educational_text = Some(text);
        }
        if let Some(bank) = self.question_bank {
            unit.question_bank = Some(bank);
        }
        if let Some(deck) = self.slide_deck {
            unit.slide_deck = Some(deck);
        }
        if let Some(assessment) = self.generated_assessment {
            unit.generated_assessment = Some(assessment);
        }
        if let Some(rubric) = self.rubric {
            unit.rubric = Some(rubric);
        }
    }
}

/// Plan for one school term: an overview plus its thematic units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BimesterPlan {
    pub overview: String,
    pub plans: Vec<LessonPlanUnit>,
}

impl BimesterPlan {
    pub fn new(overview: impl Into<String>, plans: Vec<LessonPlanUnit>) -> Self {
        Self {
            overview: overview.into(),
            plans,
        }
    }

    pub fn unit_count(&self) -> usize {
        self.plans.len()
    }

    pub fn validate(&self) -> ValidationResult {
        require_items(&self.plans, "plans")?;
        self.plans.iter().try_for_each(LessonPlanUnit::validate)
    }
}

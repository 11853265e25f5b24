//! Typed request descriptors, one per artifact kind.

use crate::model::artifact::AssessmentConfig;
use crate::model::catalog::{
    Bimester, CurriculumStandard, GradeLevel, MethodologyStrategy, QuestionType, Subject,
};
use std::collections::BTreeMap;

/// Upper bound for questions requested per question type in one batch.
pub const MAX_QUESTIONS_PER_TYPE: u32 = 20;

/// Requested number of questions per type.
///
/// Quantities are clamped to `0..=MAX_QUESTIONS_PER_TYPE`; types never set
/// count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionQuantities {
    counts: BTreeMap<QuestionType, u32>,
}

impl QuestionQuantities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`QuestionQuantities::set`].
    pub fn with(mut self, kind: QuestionType, quantity: u32) -> Self {
        self.set(kind, quantity);
        self
    }

    pub fn set(&mut self, kind: QuestionType, quantity: u32) {
        self.counts.insert(kind, quantity.min(MAX_QUESTIONS_PER_TYPE));
    }

    pub fn get(&self, kind: QuestionType) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Returns whether at least one type has a positive quantity.
    pub fn has_selection(&self) -> bool {
        self.counts.values().any(|quantity| *quantity > 0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Types with a positive quantity, in catalog order.
    pub fn selected(&self) -> impl Iterator<Item = (QuestionType, u32)> + '_ {
        self.counts
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(kind, quantity)| (*kind, *quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub grade: GradeLevel,
    pub subject: Subject,
    pub bimester: Bimester,
    pub curriculum: CurriculumStandard,
    pub extra_context: String,
}

/// Rewrite of one unit around a new methodology, keeping topic and
/// objectives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerateUnitRequest {
    pub grade: GradeLevel,
    pub subject: Subject,
    pub curriculum: CurriculumStandard,
    pub topic: String,
    pub objectives: Vec<String>,
    pub strategy: MethodologyStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    pub grade: GradeLevel,
    pub subject: Subject,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBankRequest {
    pub grade: GradeLevel,
    pub subject: Subject,
    pub topic: String,
    pub quantities: QuestionQuantities,
    /// Alternatives each multiple-choice question must offer.
    pub mc_alternatives: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideDeckRequest {
    pub grade: GradeLevel,
    pub subject: Subject,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentRequest {
    pub grade: GradeLevel,
    pub subject: Subject,
    pub bimester: Bimester,
    pub topic: String,
    pub config: AssessmentConfig,
    pub mc_alternatives: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubricRequest {
    pub grade: GradeLevel,
    pub subject: Subject,
    pub topic: String,
    pub methodology: String,
}

/// Any request a planning session can issue for one unit.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    RegenerateUnit(RegenerateUnitRequest),
    Text(TextRequest),
    QuestionBank(QuestionBankRequest),
    SlideDeck(SlideDeckRequest),
    Assessment(AssessmentRequest),
    Rubric(RubricRequest),
}

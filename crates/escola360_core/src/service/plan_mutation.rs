//! Plan mutation engine.
//!
//! # Responsibility
//! - Apply partial updates to exactly one unit of a bimester plan.
//! - Spell out the per-artifact update policy (replace vs append) as named
//!   functions instead of a generic deep merge.
//!
//! # Invariants
//! - Every function returns a new plan; the input plan is never modified.
//! - Units other than the targeted one keep their value.
//! - [`apply_unit_update`] replaces fields; it never merges sequences.
//! - A unit index outside the plan is a caller bug and panics.

use crate::model::artifact::{EducationalContent, GeneratedAssessment, Question, Rubric, SlideDeck};
use crate::model::catalog::MethodologyStrategy;
use crate::model::plan::{BimesterPlan, LessonPlanPatch, LessonPlanUnit};

/// In-place edit of one question inside a unit's generated assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentEdit {
    Statement(String),
    Option { index: usize, value: String },
}

/// Shallow-merges `patch` into `plan.plans[index]`.
///
/// # Panics
/// - When `index >= plan.plans.len()`.
pub fn apply_unit_update(
    plan: &BimesterPlan,
    index: usize,
    patch: LessonPlanPatch,
) -> BimesterPlan {
    assert_unit_index(plan, index);
    let mut next = plan.clone();
    patch.apply(&mut next.plans[index]);
    next
}

/// Replaces the unit's didactic text.
pub fn attach_educational_text(
    plan: &BimesterPlan,
    index: usize,
    text: EducationalContent,
) -> BimesterPlan {
    apply_unit_update(
        plan,
        index,
        LessonPlanPatch {
            educational_text: Some(text),
            ..LessonPlanPatch::default()
        },
    )
}

/// Appends a generated batch after the unit's existing questions.
///
/// An absent bank is treated as empty.
pub fn append_question_batch(
    plan: &BimesterPlan,
    index: usize,
    batch: Vec<Question>,
) -> BimesterPlan {
    assert_unit_index(plan, index);
    let mut bank = plan.plans[index].question_bank.clone().unwrap_or_default();
    bank.extend(batch);
    apply_unit_update(
        plan,
        index,
        LessonPlanPatch {
            question_bank: Some(bank),
            ..LessonPlanPatch::default()
        },
    )
}

/// Replaces the unit's slide deck.
pub fn attach_slide_deck(plan: &BimesterPlan, index: usize, deck: SlideDeck) -> BimesterPlan {
    apply_unit_update(
        plan,
        index,
        LessonPlanPatch {
            slide_deck: Some(deck),
            ..LessonPlanPatch::default()
        },
    )
}

/// Replaces the unit's generated assessment.
pub fn attach_generated_assessment(
    plan: &BimesterPlan,
    index: usize,
    assessment: GeneratedAssessment,
) -> BimesterPlan {
    apply_unit_update(
        plan,
        index,
        LessonPlanPatch {
            generated_assessment: Some(assessment),
            ..LessonPlanPatch::default()
        },
    )
}

/// Replaces the unit's rubric.
pub fn attach_rubric(plan: &BimesterPlan, index: usize, rubric: Rubric) -> BimesterPlan {
    apply_unit_update(
        plan,
        index,
        LessonPlanPatch {
            rubric: Some(rubric),
            ..LessonPlanPatch::default()
        },
    )
}

/// Records the strategy a regeneration targets, before it resolves.
pub fn select_strategy(
    plan: &BimesterPlan,
    index: usize,
    strategy: MethodologyStrategy,
) -> BimesterPlan {
    apply_unit_update(
        plan,
        index,
        LessonPlanPatch {
            selected_strategy: Some(strategy),
            ..LessonPlanPatch::default()
        },
    )
}

/// Builds the patch for a unit rewritten around `strategy`.
///
/// Every field the regenerated unit carries replaces the current one, except
/// the didactic text, question bank and slide deck, which the current unit
/// keeps. Assessment and rubric survive unless the regenerated unit carries
/// its own.
pub fn regeneration_patch(
    regenerated: LessonPlanUnit,
    strategy: MethodologyStrategy,
) -> LessonPlanPatch {
    LessonPlanPatch {
        topic: Some(regenerated.topic),
        objectives: Some(regenerated.objectives),
        content_summary: Some(regenerated.content_summary),
        methodology: Some(regenerated.methodology),
        selected_strategy: Some(strategy),
        bncc_skills: Some(regenerated.bncc_skills),
        activities: Some(regenerated.activities),
        assessments: Some(regenerated.assessments),
        inclusion: regenerated.inclusion,
        interdisciplinary: regenerated.interdisciplinary,
        educational_text: None,
        question_bank: None,
        slide_deck: None,
        generated_assessment: regenerated.generated_assessment,
        rubric: regenerated.rubric,
    }
}

/// Applies a regenerated unit; see [`regeneration_patch`] for what is kept.
pub fn apply_regeneration(
    plan: &BimesterPlan,
    index: usize,
    regenerated: LessonPlanUnit,
    strategy: MethodologyStrategy,
) -> BimesterPlan {
    apply_unit_update(plan, index, regeneration_patch(regenerated, strategy))
}

/// Edits one question of the unit's generated assessment.
///
/// Returns an unchanged copy when the unit has no assessment.
///
/// # Panics
/// - When `index`, `question_index` or the option index is out of range.
pub fn edit_assessment_question(
    plan: &BimesterPlan,
    index: usize,
    question_index: usize,
    edit: AssessmentEdit,
) -> BimesterPlan {
    assert_unit_index(plan, index);
    let Some(mut assessment) = plan.plans[index].generated_assessment.clone() else {
        return plan.clone();
    };

    let question_count = assessment.questions.len();
    let question = assessment
        .questions
        .get_mut(question_index)
        .unwrap_or_else(|| {
            panic!("question index {question_index} out of range for assessment with {question_count} questions")
        });

    match edit {
        AssessmentEdit::Statement(statement) => question.statement = statement,
        AssessmentEdit::Option { index: option_index, value } => {
            let options = question.options.get_or_insert_with(Vec::new);
            let option_count = options.len();
            let slot = options.get_mut(option_index).unwrap_or_else(|| {
                panic!("option index {option_index} out of range for question with {option_count} options")
            });
            *slot = value;
        }
    }

    attach_generated_assessment(plan, index, assessment)
}

fn assert_unit_index(plan: &BimesterPlan, index: usize) {
    assert!(
        index < plan.plans.len(),
        "unit index {index} out of range for plan with {} units",
        plan.plans.len()
    );
}

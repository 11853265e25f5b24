mod support;

use async_trait::async_trait;
use escola360_core::{
    AssessmentRequest, Bimester, BimesterPlan, ContentGenerator, EducationalContent,
    GeneratedArtifact, GenerationAction, GenerationError, GenerationKind, GenerationResult,
    GradeLevel, LessonPlanUnit, LibraryItemType, LibraryService, MemoryKeyValueStore,
    MethodologyStrategy, PlanRequest, PlanningContext, PlanningSession, Question,
    QuestionBankRequest, QuestionQuantities, QuestionType, RegenerateUnitRequest, Rubric,
    RubricRequest, SessionError, SlideDeck, SlideDeckRequest, Subject, TextRequest,
};
use serde_json::json;
use std::sync::Mutex;

/// Scripted generator that records the operations it receives.
#[derive(Default)]
struct MockGenerator {
    fail: bool,
    themeless_decks: bool,
    calls: Mutex<Vec<String>>,
}

impl MockGenerator {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn record(&self, call: String) -> GenerationResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(GenerationError::Transport("503 service unavailable".to_string()));
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn generate_plan(&self, request: &PlanRequest) -> GenerationResult<BimesterPlan> {
        self.record(format!("plan:{}", request.subject.label()))?;
        Ok(support::plan(&["Frações", "Decimais", "Porcentagem"]))
    }

    async fn regenerate_unit(
        &self,
        request: &RegenerateUnitRequest,
    ) -> GenerationResult<LessonPlanUnit> {
        self.record(format!("regenerate:{}", request.topic))?;
        let mut unit = support::unit(&request.topic);
        unit.methodology = format!("Reescrita com {}", request.strategy.label());
        Ok(unit)
    }

    async fn generate_text(&self, request: &TextRequest) -> GenerationResult<EducationalContent> {
        self.record(format!("text:{}", request.topic))?;
        Ok(support::text(&format!("Texto sobre {}", request.topic)))
    }

    async fn generate_question_bank(
        &self,
        request: &QuestionBankRequest,
    ) -> GenerationResult<Vec<Question>> {
        self.record(format!("questions:{}", request.quantities.total()))?;
        Ok(request
            .quantities
            .selected()
            .flat_map(|(kind, quantity)| {
                (0..quantity).map(move |i| {
                    let statement = format!("{} {i}", kind.label());
                    support::question(kind, &statement)
                })
            })
            .collect())
    }

    async fn generate_slide_deck(&self, request: &SlideDeckRequest) -> GenerationResult<SlideDeck> {
        self.record(format!("slides:{}", request.topic))?;
        let theme = (!self.themeless_decks).then_some("Indigo");
        Ok(support::deck(6, theme))
    }

    async fn generate_assessment_questions(
        &self,
        request: &AssessmentRequest,
    ) -> GenerationResult<Vec<Question>> {
        self.record(format!("assessment:{}", request.mc_alternatives))?;
        Ok(support::assessment().questions)
    }

    async fn generate_rubric(&self, request: &RubricRequest) -> GenerationResult<Rubric> {
        self.record(format!("rubric:{}", request.topic))?;
        Ok(support::rubric())
    }
}

fn context() -> PlanningContext {
    PlanningContext::new(GradeLevel::Ef5, Subject::Math, Bimester::First)
}

fn session_with_plan() -> PlanningSession {
    PlanningSession::with_plan(context(), support::plan(&["Frações", "Decimais", "Porcentagem"]))
}

fn plan_of(session: &PlanningSession) -> &BimesterPlan {
    session.plan().expect("session should hold a plan")
}

#[tokio::test]
async fn generate_plan_replaces_the_working_plan() {
    let generator = MockGenerator::default();
    let mut session = PlanningSession::new(context());
    assert!(session.plan().is_none());

    let plan = session.generate_plan(&generator).await.unwrap();
    assert_eq!(plan.unit_count(), 3);
    assert_eq!(session.epoch(), 1);
    assert_eq!(generator.calls(), vec!["plan:Matemática".to_string()]);
}

#[tokio::test]
async fn failed_plan_generation_keeps_the_previous_plan() {
    let mut session = session_with_plan();
    let before = plan_of(&session).clone();

    let err = session.generate_plan(&MockGenerator::failing()).await.unwrap_err();

    assert!(matches!(err, SessionError::PlanGeneration(GenerationError::Transport(_))));
    assert_eq!(plan_of(&session), &before);
}

#[tokio::test]
async fn slide_deck_lands_on_the_requested_unit_only() {
    let generator = MockGenerator::default();
    let mut session = session_with_plan();
    let before = plan_of(&session).clone();

    session
        .run(&generator, 1, GenerationAction::SlideDeck)
        .await
        .unwrap();

    let plan = plan_of(&session);
    let deck = plan.plans[1].slide_deck.as_ref().unwrap();
    assert_eq!(deck.slides.len(), 6);
    assert_eq!(deck.theme_or_default(), "Indigo");
    assert_eq!(plan.plans[0], before.plans[0]);
    assert_eq!(plan.plans[2], before.plans[2]);
    assert!(!session.is_busy(1, GenerationKind::SlideDeck));
}

#[tokio::test]
async fn themeless_decks_get_a_theme_assigned() {
    let generator = MockGenerator {
        themeless_decks: true,
        ..MockGenerator::default()
    };
    let mut session = session_with_plan();

    session
        .run(&generator, 0, GenerationAction::SlideDeck)
        .await
        .unwrap();

    let deck = plan_of(&session).plans[0].slide_deck.as_ref().unwrap();
    assert!(deck.theme.is_some());
}

#[tokio::test]
async fn question_batches_accumulate_across_runs() {
    let generator = MockGenerator::default();
    let mut session = session_with_plan();

    let first = QuestionQuantities::new()
        .with(QuestionType::MultipleChoice, 2)
        .with(QuestionType::Essay, 1);
    session
        .run(&generator, 0, GenerationAction::QuestionBank(first))
        .await
        .unwrap();
    let second = QuestionQuantities::new().with(QuestionType::Playful, 2);
    session
        .run(&generator, 0, GenerationAction::QuestionBank(second))
        .await
        .unwrap();

    let bank = plan_of(&session).plans[0].question_bank.as_ref().unwrap();
    assert_eq!(bank.len(), 5);
    assert_eq!(bank[0].kind, QuestionType::MultipleChoice);
    assert_eq!(bank[4].kind, QuestionType::Playful);
}

#[tokio::test]
async fn empty_question_selection_never_reaches_the_generator() {
    let generator = MockGenerator::default();
    let mut session = session_with_plan();
    let before = plan_of(&session).clone();

    let err = session
        .run(&generator, 0, GenerationAction::QuestionBank(QuestionQuantities::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::EmptyQuestionSelection { index: 0 }));
    assert!(generator.calls().is_empty());
    assert_eq!(plan_of(&session), &before);
}

#[tokio::test]
async fn regeneration_rewrites_the_unit_and_keeps_artifacts() {
    let generator = MockGenerator::default();
    let mut session = session_with_plan();
    session
        .run(&generator, 0, GenerationAction::EducationalText)
        .await
        .unwrap();

    session
        .run(
            &generator,
            0,
            GenerationAction::Regenerate(MethodologyStrategy::Gamification),
        )
        .await
        .unwrap();

    let unit = &plan_of(&session).plans[0];
    assert_eq!(unit.methodology, "Reescrita com Gamificação");
    assert_eq!(unit.selected_strategy, Some(MethodologyStrategy::Gamification));
    assert_eq!(
        unit.educational_text.as_ref().unwrap().title,
        "Texto sobre Frações"
    );
}

#[tokio::test]
async fn failed_regeneration_keeps_the_optimistic_strategy() {
    let mut session = session_with_plan();
    let before = plan_of(&session).plans[2].clone();

    let err = session
        .run(
            &MockGenerator::failing(),
            2,
            GenerationAction::Regenerate(MethodologyStrategy::Steam),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Generation {
            index: 2,
            kind: GenerationKind::Regeneration,
            ..
        }
    ));
    let unit = &plan_of(&session).plans[2];
    assert_eq!(unit.selected_strategy, Some(MethodologyStrategy::Steam));
    assert_eq!(unit.methodology, before.methodology);
    assert!(!session.is_busy(2, GenerationKind::Regeneration));
}

#[tokio::test]
async fn failed_generation_can_be_retried() {
    let mut session = session_with_plan();
    let err = session
        .run(&MockGenerator::failing(), 0, GenerationAction::Rubric)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("try again"));
    assert!(plan_of(&session).plans[0].rubric.is_none());

    session
        .run(&MockGenerator::default(), 0, GenerationAction::Rubric)
        .await
        .unwrap();
    assert_eq!(plan_of(&session).plans[0].rubric, Some(support::rubric()));
}

#[tokio::test]
async fn assessment_header_comes_from_the_request() {
    let generator = MockGenerator::default();
    let mut session = session_with_plan();

    session
        .run(
            &generator,
            0,
            GenerationAction::Assessment(support::assessment_config()),
        )
        .await
        .unwrap();

    let assessment = plan_of(&session).plans[0].generated_assessment.as_ref().unwrap();
    assert_eq!(assessment.header, support::assessment_config());
    assert_eq!(assessment.topic, "Frações");
    assert_eq!(assessment.grade, "5º Ano do Ensino Fundamental");
    assert_eq!(assessment.subject, "Matemática");
    assert_eq!(assessment.bimester, "1º Bimestre");
    assert_eq!(generator.calls(), vec!["assessment:4".to_string()]);
}

#[test]
fn same_generation_on_the_same_unit_is_rejected_while_pending() {
    let mut session = session_with_plan();
    let pending = session.begin(0, GenerationAction::SlideDeck).unwrap();

    let err = session.begin(0, GenerationAction::SlideDeck).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Busy {
            index: 0,
            kind: GenerationKind::SlideDeck
        }
    ));

    // Other kinds and other units stay available.
    let text = session.begin(0, GenerationAction::EducationalText).unwrap();
    let other_unit = session.begin(1, GenerationAction::SlideDeck).unwrap();
    assert_eq!(
        session.busy_kinds(0),
        vec![GenerationKind::EducationalText, GenerationKind::SlideDeck]
    );

    session
        .complete(pending, Ok(GeneratedArtifact::SlideDeck(support::deck(3, Some("Rose")))))
        .unwrap();
    session
        .complete(text, Ok(GeneratedArtifact::Text(support::text("Texto"))))
        .unwrap();
    session
        .complete(other_unit, Ok(GeneratedArtifact::SlideDeck(support::deck(4, Some("Teal")))))
        .unwrap();
    assert!(session.busy_kinds(0).is_empty());
}

#[test]
fn concurrent_regenerations_complete_in_either_order() {
    let mut session = session_with_plan();
    let first = session
        .begin(0, GenerationAction::Regenerate(MethodologyStrategy::Hybrid))
        .unwrap();
    let third = session
        .begin(2, GenerationAction::Regenerate(MethodologyStrategy::Storytelling))
        .unwrap();
    let middle_before = plan_of(&session).plans[1].clone();

    let mut third_unit = support::unit("Porcentagem");
    third_unit.methodology = "Narrativa de uma feira".to_string();
    session
        .complete(third, Ok(GeneratedArtifact::Unit(third_unit)))
        .unwrap();
    let mut first_unit = support::unit("Frações");
    first_unit.methodology = "Estações rotativas".to_string();
    session
        .complete(first, Ok(GeneratedArtifact::Unit(first_unit)))
        .unwrap();

    let plan = plan_of(&session);
    assert_eq!(plan.plans[0].methodology, "Estações rotativas");
    assert_eq!(plan.plans[0].selected_strategy, Some(MethodologyStrategy::Hybrid));
    assert_eq!(plan.plans[1], middle_before);
    assert_eq!(plan.plans[2].methodology, "Narrativa de uma feira");
    assert_eq!(
        plan.plans[2].selected_strategy,
        Some(MethodologyStrategy::Storytelling)
    );
}

#[test]
fn concurrent_slide_decks_land_on_their_own_units() {
    let mut session = session_with_plan();
    let first = session.begin(0, GenerationAction::SlideDeck).unwrap();
    let third = session.begin(2, GenerationAction::SlideDeck).unwrap();

    session
        .complete(third, Ok(GeneratedArtifact::SlideDeck(support::deck(5, Some("Amber")))))
        .unwrap();
    session
        .complete(first, Ok(GeneratedArtifact::SlideDeck(support::deck(6, Some("Indigo")))))
        .unwrap();

    let plan = plan_of(&session);
    assert_eq!(plan.plans[0].slide_deck.as_ref().unwrap().slides.len(), 6);
    assert!(plan.plans[1].slide_deck.is_none());
    assert_eq!(plan.plans[2].slide_deck.as_ref().unwrap().slides.len(), 5);
}

#[test]
fn responses_for_a_replaced_plan_are_discarded() {
    let mut session = session_with_plan();
    let pending = session.begin(0, GenerationAction::Rubric).unwrap();

    let fresh = support::plan(&["Geometria"]);
    session.replace_plan(fresh.clone());

    let err = session
        .complete(pending, Ok(GeneratedArtifact::Rubric(support::rubric())))
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::StalePlan {
            index: 0,
            kind: GenerationKind::Rubric
        }
    ));
    assert_eq!(plan_of(&session), &fresh);
}

#[test]
fn mismatched_artifact_is_a_generation_failure() {
    let mut session = session_with_plan();
    let pending = session.begin(1, GenerationAction::Rubric).unwrap();

    let err = session
        .complete(pending, Ok(GeneratedArtifact::Text(support::text("Texto"))))
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Generation {
            source: GenerationError::UnexpectedArtifact { .. },
            ..
        }
    ));
    assert!(plan_of(&session).plans[1].rubric.is_none());
    assert!(plan_of(&session).plans[1].educational_text.is_none());
}

#[test]
fn actions_without_a_plan_are_rejected() {
    let mut session = PlanningSession::new(context());
    let err = session.begin(0, GenerationAction::Rubric).unwrap_err();
    assert!(matches!(err, SessionError::NoPlan));

    let library = LibraryService::new(MemoryKeyValueStore::new());
    let err = session
        .save_to_library(&library, LibraryItemType::Planning, "Plano")
        .unwrap_err();
    assert!(matches!(err, SessionError::NoPlan));
    assert!(library.list().is_empty());
}

#[test]
#[should_panic(expected = "unit index 7 out of range")]
fn generation_for_a_missing_unit_is_fatal() {
    let mut session = session_with_plan();
    let _ = session.begin(7, GenerationAction::SlideDeck);
}

#[test]
fn save_copies_the_plan_with_context_metadata() {
    let mut session = session_with_plan();
    let library = LibraryService::new(MemoryKeyValueStore::new());

    let item = session
        .save_to_library(&library, LibraryItemType::Planning, "  Test Plan  ")
        .unwrap();
    assert_eq!(item.title, "Test Plan");
    assert_eq!(item.metadata["grade"], json!("5º Ano do Ensino Fundamental"));
    assert_eq!(item.metadata["subject"], json!("Matemática"));

    session
        .update_unit(
            0,
            escola360_core::LessonPlanPatch {
                topic: Some("Editado".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(library.get(item.id).unwrap().content.plans[0].topic, "Frações");
}

#[test]
fn blank_title_falls_back_to_the_context_title() {
    let session = session_with_plan();
    let library = LibraryService::new(MemoryKeyValueStore::new());

    let item = session
        .save_to_library(&library, LibraryItemType::Planning, "   ")
        .unwrap();

    assert_eq!(
        item.title,
        "Planejamento 5º Ano do Ensino Fundamental - Matemática - 1º Bimestre"
    );
}

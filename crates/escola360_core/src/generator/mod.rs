//! Content generator port.
//!
//! # Responsibility
//! - Define the capability that authors plans and artifacts remotely.
//! - Route unit-scoped requests and validate whatever comes back.
//!
//! # Invariants
//! - One call per request; the port has no retry and no streaming.
//! - Artifacts returned by [`dispatch`] have passed shape validation.
//! - Slide decks leave [`dispatch`] with a theme.

pub mod request;
pub mod response;

use crate::model::artifact::{EducationalContent, GeneratedAssessment, Question, Rubric, SlideDeck};
use crate::model::plan::{BimesterPlan, LessonPlanUnit};
use async_trait::async_trait;
use request::{
    AssessmentRequest, GenerationRequest, PlanRequest, QuestionBankRequest, RegenerateUnitRequest,
    RubricRequest, SlideDeckRequest, TextRequest,
};
use response::{checked, GenerationResult};

/// Remote authoring capability, one operation per artifact kind.
///
/// Implementations wrap a generative model API. Each call either returns the
/// whole artifact or fails.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_plan(&self, request: &PlanRequest) -> GenerationResult<BimesterPlan>;

    /// Rewrites a unit around `request.strategy`. The returned unit does not
    /// need to carry attached artifacts.
    async fn regenerate_unit(
        &self,
        request: &RegenerateUnitRequest,
    ) -> GenerationResult<LessonPlanUnit>;

    async fn generate_text(&self, request: &TextRequest) -> GenerationResult<EducationalContent>;

    async fn generate_question_bank(
        &self,
        request: &QuestionBankRequest,
    ) -> GenerationResult<Vec<Question>>;

    /// May leave `theme` empty; [`dispatch`] assigns one.
    async fn generate_slide_deck(&self, request: &SlideDeckRequest) -> GenerationResult<SlideDeck>;

    /// Returns only the questions; the header is assembled locally.
    async fn generate_assessment_questions(
        &self,
        request: &AssessmentRequest,
    ) -> GenerationResult<Vec<Question>>;

    async fn generate_rubric(&self, request: &RubricRequest) -> GenerationResult<Rubric>;
}

// Compile-time assertion: the port is usable as `dyn ContentGenerator`.
const _: () = {
    fn _assert_object_safe(_: &dyn ContentGenerator) {}
};

/// Validated result of a unit-scoped generation.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedArtifact {
    Unit(LessonPlanUnit),
    Text(EducationalContent),
    Questions(Vec<Question>),
    SlideDeck(SlideDeck),
    Assessment(GeneratedAssessment),
    Rubric(Rubric),
}

impl GeneratedArtifact {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Unit(_) => "lesson plan unit",
            Self::Text(_) => "educational text",
            Self::Questions(_) => "question bank",
            Self::SlideDeck(_) => "slide deck",
            Self::Assessment(_) => "assessment",
            Self::Rubric(_) => "rubric",
        }
    }
}

/// Builds the printable assessment from its request and generated questions.
pub fn assemble_assessment(
    request: &AssessmentRequest,
    questions: Vec<Question>,
) -> GeneratedAssessment {
    GeneratedAssessment {
        header: request.config.clone(),
        questions,
        topic: request.topic.clone(),
        grade: request.grade.label().to_string(),
        subject: request.subject.label().to_string(),
        bimester: request.bimester.label().to_string(),
    }
}

/// Generates a whole plan and validates it.
pub async fn generate_plan<G>(
    generator: &G,
    request: &PlanRequest,
) -> GenerationResult<BimesterPlan>
where
    G: ContentGenerator + ?Sized,
{
    checked(generator.generate_plan(request).await?)
}

/// Sends one unit-scoped request to the matching generator operation.
pub async fn dispatch<G>(
    generator: &G,
    request: &GenerationRequest,
) -> GenerationResult<GeneratedArtifact>
where
    G: ContentGenerator + ?Sized,
{
    let artifact = match request {
        GenerationRequest::RegenerateUnit(request) => {
            GeneratedArtifact::Unit(checked(generator.regenerate_unit(request).await?)?)
        }
        GenerationRequest::Text(request) => {
            GeneratedArtifact::Text(checked(generator.generate_text(request).await?)?)
        }
        GenerationRequest::QuestionBank(request) => GeneratedArtifact::Questions(checked(
            generator.generate_question_bank(request).await?,
        )?),
        GenerationRequest::SlideDeck(request) => {
            let mut deck = checked(generator.generate_slide_deck(request).await?)?;
            deck.ensure_theme();
            GeneratedArtifact::SlideDeck(deck)
        }
        GenerationRequest::Assessment(request) => {
            let questions = generator.generate_assessment_questions(request).await?;
            GeneratedArtifact::Assessment(checked(assemble_assessment(request, questions))?)
        }
        GenerationRequest::Rubric(request) => {
            GeneratedArtifact::Rubric(checked(generator.generate_rubric(request).await?)?)
        }
    };
    Ok(artifact)
}

//! Planning session: the working plan and its in-flight generations.
//!
//! # Responsibility
//! - Own the working bimester plan of one UI session.
//! - Run unit-scoped generations as explicit two-phase transitions
//!   (`begin` issues intent, `complete` applies the result or the failure).
//! - Copy the working plan into the library on explicit save.
//!
//! # Invariants
//! - At most one generation per (unit, kind) is in flight.
//! - Regeneration writes `selectedStrategy` at `begin`; a failed
//!   regeneration leaves it in place.
//! - A failed generation leaves the plan as `begin` left it.
//! - Responses addressed to a plan that has since been replaced wholesale are
//!   discarded.

use crate::generator::request::{
    AssessmentRequest, GenerationRequest, PlanRequest, QuestionBankRequest, QuestionQuantities,
    RegenerateUnitRequest, RubricRequest, SlideDeckRequest, TextRequest,
};
use crate::generator::response::{GenerationError, GenerationResult};
use crate::generator::{self, ContentGenerator, GeneratedArtifact};
use crate::model::artifact::AssessmentConfig;
use crate::model::catalog::MethodologyStrategy;
use crate::model::context::PlanningContext;
use crate::model::library::{LibraryItem, LibraryItemType};
use crate::model::plan::{BimesterPlan, LessonPlanPatch, LessonPlanUnit};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::library_service::{LibraryError, LibraryService};
use crate::service::plan_mutation::{self, AssessmentEdit};
use log::{info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unit-scoped generation kinds, each tracked independently per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GenerationKind {
    Regeneration,
    EducationalText,
    QuestionBank,
    SlideDeck,
    Assessment,
    Rubric,
}

impl GenerationKind {
    /// Action name shown in failure notices.
    pub fn label(self) -> &'static str {
        match self {
            Self::Regeneration => "methodology regeneration",
            Self::EducationalText => "educational text",
            Self::QuestionBank => "question bank",
            Self::SlideDeck => "slide deck",
            Self::Assessment => "assessment",
            Self::Rubric => "rubric",
        }
    }
}

/// What the user asked to generate for one unit.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationAction {
    Regenerate(MethodologyStrategy),
    EducationalText,
    QuestionBank(QuestionQuantities),
    SlideDeck,
    Assessment(AssessmentConfig),
    Rubric,
}

impl GenerationAction {
    pub fn kind(&self) -> GenerationKind {
        match self {
            Self::Regenerate(_) => GenerationKind::Regeneration,
            Self::EducationalText => GenerationKind::EducationalText,
            Self::QuestionBank(_) => GenerationKind::QuestionBank,
            Self::SlideDeck => GenerationKind::SlideDeck,
            Self::Assessment(_) => GenerationKind::Assessment,
            Self::Rubric => GenerationKind::Rubric,
        }
    }
}

/// Issued generation awaiting its result.
#[derive(Debug)]
pub struct PendingGeneration {
    index: usize,
    kind: GenerationKind,
    epoch: u64,
    request: GenerationRequest,
}

impl PendingGeneration {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> GenerationKind {
        self.kind
    }

    /// Request to hand to [`generator::dispatch`].
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

/// Session-level failure.
#[derive(Debug)]
pub enum SessionError {
    /// No plan has been generated or loaded yet.
    NoPlan,
    /// The same generation is already running for this unit.
    Busy { index: usize, kind: GenerationKind },
    /// Question-bank request with every quantity at zero.
    EmptyQuestionSelection { index: usize },
    /// The plan was replaced while the generation was in flight.
    StalePlan { index: usize, kind: GenerationKind },
    /// Whole-plan generation failed.
    PlanGeneration(GenerationError),
    /// Unit generation failed; retryable.
    Generation {
        index: usize,
        kind: GenerationKind,
        source: GenerationError,
    },
    Library(LibraryError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPlan => write!(f, "no plan loaded"),
            Self::Busy { index, kind } => {
                write!(f, "{} is already being generated for unit #{index}", kind.label())
            }
            Self::EmptyQuestionSelection { index } => write!(
                f,
                "select at least one question type before generating questions for unit #{index}"
            ),
            Self::StalePlan { index, kind } => write!(
                f,
                "discarded {} for unit #{index}: plan was replaced",
                kind.label()
            ),
            Self::PlanGeneration(err) => {
                write!(f, "failed to generate the bimester plan; try again: {err}")
            }
            Self::Generation {
                index,
                kind,
                source,
            } => write!(
                f,
                "failed to generate {} for unit #{index}; try again: {source}",
                kind.label()
            ),
            Self::Library(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PlanGeneration(err) => Some(err),
            Self::Generation { source, .. } => Some(source),
            Self::Library(err) => Some(err),
            Self::NoPlan
            | Self::Busy { .. }
            | Self::EmptyQuestionSelection { .. }
            | Self::StalePlan { .. } => None,
        }
    }
}

impl From<LibraryError> for SessionError {
    fn from(value: LibraryError) -> Self {
        Self::Library(value)
    }
}

/// Working state of one planning screen.
#[derive(Debug)]
pub struct PlanningSession {
    context: PlanningContext,
    plan: Option<BimesterPlan>,
    epoch: u64,
    in_flight: BTreeSet<(usize, GenerationKind)>,
}

impl PlanningSession {
    pub fn new(context: PlanningContext) -> Self {
        Self {
            context,
            plan: None,
            epoch: 0,
            in_flight: BTreeSet::new(),
        }
    }

    /// Creates a session around an existing plan, e.g. one opened from the
    /// library.
    pub fn with_plan(context: PlanningContext, plan: BimesterPlan) -> Self {
        let mut session = Self::new(context);
        session.replace_plan(plan);
        session
    }

    pub fn context(&self) -> &PlanningContext {
        &self.context
    }

    pub fn plan(&self) -> Option<&BimesterPlan> {
        self.plan.as_ref()
    }

    /// Counter bumped each time the plan is replaced wholesale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_busy(&self, index: usize, kind: GenerationKind) -> bool {
        self.in_flight.contains(&(index, kind))
    }

    /// Kinds currently generating for unit `index`.
    pub fn busy_kinds(&self, index: usize) -> Vec<GenerationKind> {
        self.in_flight
            .iter()
            .filter(|(unit, _)| *unit == index)
            .map(|(_, kind)| *kind)
            .collect()
    }

    /// Replaces the working plan; in-flight generations become stale.
    pub fn replace_plan(&mut self, plan: BimesterPlan) {
        self.epoch += 1;
        self.in_flight.clear();
        info!(
            "event=plan_replace module=session status=ok epoch={} units={}",
            self.epoch,
            plan.unit_count()
        );
        self.plan = Some(plan);
    }

    pub fn plan_request(&self) -> PlanRequest {
        PlanRequest {
            grade: self.context.grade,
            subject: self.context.subject,
            bimester: self.context.bimester,
            curriculum: self.context.curriculum,
            extra_context: self.context.extra_context.clone(),
        }
    }

    /// Generates a new plan and replaces the working plan with it.
    ///
    /// On failure the previous plan is kept.
    pub async fn generate_plan<G>(&mut self, generator: &G) -> Result<&BimesterPlan, SessionError>
    where
        G: ContentGenerator + ?Sized,
    {
        let request = self.plan_request();
        match generator::generate_plan(generator, &request).await {
            Ok(plan) => {
                self.replace_plan(plan);
                self.plan.as_ref().ok_or(SessionError::NoPlan)
            }
            Err(err) => {
                warn!("event=plan_generate module=session status=error error={err}");
                Err(SessionError::PlanGeneration(err))
            }
        }
    }

    /// Applies a manual edit to one unit.
    ///
    /// # Panics
    /// - When `index` is outside the plan.
    pub fn update_unit(
        &mut self,
        index: usize,
        patch: LessonPlanPatch,
    ) -> Result<(), SessionError> {
        let plan = self.plan.as_ref().ok_or(SessionError::NoPlan)?;
        self.plan = Some(plan_mutation::apply_unit_update(plan, index, patch));
        Ok(())
    }

    /// Edits one question of a unit's generated assessment.
    pub fn edit_assessment_question(
        &mut self,
        index: usize,
        question_index: usize,
        edit: AssessmentEdit,
    ) -> Result<(), SessionError> {
        let plan = self.plan.as_ref().ok_or(SessionError::NoPlan)?;
        self.plan = Some(plan_mutation::edit_assessment_question(
            plan,
            index,
            question_index,
            edit,
        ));
        Ok(())
    }

    /// Phase one: validates and records the intent to generate.
    ///
    /// # Panics
    /// - When `index` is outside the plan.
    ///
    /// # Errors
    /// - `NoPlan`, `Busy`, or `EmptyQuestionSelection`; the plan is untouched.
    pub fn begin(
        &mut self,
        index: usize,
        action: GenerationAction,
    ) -> Result<PendingGeneration, SessionError> {
        let plan = self.plan.as_ref().ok_or(SessionError::NoPlan)?;
        let unit = unit_at(plan, index);
        let kind = action.kind();

        if self.in_flight.contains(&(index, kind)) {
            return Err(SessionError::Busy { index, kind });
        }
        if let GenerationAction::QuestionBank(quantities) = &action {
            if !quantities.has_selection() {
                return Err(SessionError::EmptyQuestionSelection { index });
            }
        }

        let request = self.build_request(unit, action);
        if let GenerationRequest::RegenerateUnit(regenerate) = &request {
            let next = plan_mutation::select_strategy(plan, index, regenerate.strategy);
            self.plan = Some(next);
        }

        self.in_flight.insert((index, kind));
        info!(
            "event=generation_begin module=session status=start unit={index} kind={} epoch={}",
            kind.label(),
            self.epoch
        );
        Ok(PendingGeneration {
            index,
            kind,
            epoch: self.epoch,
            request,
        })
    }

    /// Phase two: applies the generator outcome for a pending generation.
    ///
    /// # Errors
    /// - `StalePlan` when the plan was replaced since `begin`.
    /// - `Generation` when the generator failed or answered with the wrong
    ///   artifact; the unit keeps its state from `begin`.
    pub fn complete(
        &mut self,
        pending: PendingGeneration,
        outcome: GenerationResult<GeneratedArtifact>,
    ) -> Result<(), SessionError> {
        let PendingGeneration {
            index,
            kind,
            epoch,
            request,
        } = pending;

        if epoch != self.epoch {
            warn!(
                "event=generation_complete module=session status=stale unit={index} kind={} epoch={epoch} current_epoch={}",
                kind.label(),
                self.epoch
            );
            return Err(SessionError::StalePlan { index, kind });
        }
        self.in_flight.remove(&(index, kind));

        let artifact = match outcome {
            Ok(artifact) => artifact,
            Err(source) => {
                warn!(
                    "event=generation_complete module=session status=error unit={index} kind={} error={source}",
                    kind.label()
                );
                return Err(SessionError::Generation {
                    index,
                    kind,
                    source,
                });
            }
        };

        let plan = self.plan.as_ref().ok_or(SessionError::NoPlan)?;
        let next = match (request, artifact) {
            (GenerationRequest::RegenerateUnit(request), GeneratedArtifact::Unit(unit)) => {
                plan_mutation::apply_regeneration(plan, index, unit, request.strategy)
            }
            (GenerationRequest::Text(_), GeneratedArtifact::Text(text)) => {
                plan_mutation::attach_educational_text(plan, index, text)
            }
            (GenerationRequest::QuestionBank(_), GeneratedArtifact::Questions(batch)) => {
                plan_mutation::append_question_batch(plan, index, batch)
            }
            (GenerationRequest::SlideDeck(_), GeneratedArtifact::SlideDeck(deck)) => {
                plan_mutation::attach_slide_deck(plan, index, deck)
            }
            (GenerationRequest::Assessment(_), GeneratedArtifact::Assessment(assessment)) => {
                plan_mutation::attach_generated_assessment(plan, index, assessment)
            }
            (GenerationRequest::Rubric(_), GeneratedArtifact::Rubric(rubric)) => {
                plan_mutation::attach_rubric(plan, index, rubric)
            }
            (_, artifact) => {
                let source = GenerationError::UnexpectedArtifact {
                    expected: kind.label(),
                    actual: artifact.kind_name(),
                };
                warn!(
                    "event=generation_complete module=session status=error unit={index} kind={} error={source}",
                    kind.label()
                );
                return Err(SessionError::Generation {
                    index,
                    kind,
                    source,
                });
            }
        };

        self.plan = Some(next);
        info!(
            "event=generation_complete module=session status=ok unit={index} kind={}",
            kind.label()
        );
        Ok(())
    }

    /// Runs one generation end to end: `begin`, the generator call, `complete`.
    pub async fn run<G>(
        &mut self,
        generator: &G,
        index: usize,
        action: GenerationAction,
    ) -> Result<(), SessionError>
    where
        G: ContentGenerator + ?Sized,
    {
        let pending = self.begin(index, action)?;
        let outcome = generator::dispatch(generator, pending.request()).await;
        self.complete(pending, outcome)
    }

    /// Saves a copy of the working plan to the library.
    ///
    /// A blank `title` falls back to [`PlanningContext::default_title`].
    pub fn save_to_library<S: KeyValueStore>(
        &self,
        library: &LibraryService<S>,
        kind: LibraryItemType,
        title: &str,
    ) -> Result<LibraryItem, SessionError> {
        let plan = self.plan.as_ref().ok_or(SessionError::NoPlan)?;
        let title = if title.trim().is_empty() {
            self.context.default_title()
        } else {
            title.trim().to_string()
        };
        let item = library.save(kind, title, plan, self.context.to_metadata())?;
        Ok(item)
    }

    fn build_request(&self, unit: &LessonPlanUnit, action: GenerationAction) -> GenerationRequest {
        let context = &self.context;
        let topic = unit.topic.clone();
        match action {
            GenerationAction::Regenerate(strategy) => {
                GenerationRequest::RegenerateUnit(RegenerateUnitRequest {
                    grade: context.grade,
                    subject: context.subject,
                    curriculum: context.curriculum,
                    topic,
                    objectives: unit.objectives.clone(),
                    strategy,
                })
            }
            GenerationAction::EducationalText => GenerationRequest::Text(TextRequest {
                grade: context.grade,
                subject: context.subject,
                topic,
            }),
            GenerationAction::QuestionBank(quantities) => {
                GenerationRequest::QuestionBank(QuestionBankRequest {
                    grade: context.grade,
                    subject: context.subject,
                    topic,
                    quantities,
                    mc_alternatives: context.grade.multiple_choice_alternatives(),
                })
            }
            GenerationAction::SlideDeck => GenerationRequest::SlideDeck(SlideDeckRequest {
                grade: context.grade,
                subject: context.subject,
                topic,
            }),
            GenerationAction::Assessment(config) => {
                GenerationRequest::Assessment(AssessmentRequest {
                    grade: context.grade,
                    subject: context.subject,
                    bimester: context.bimester,
                    topic,
                    config,
                    mc_alternatives: context.grade.multiple_choice_alternatives(),
                })
            }
            GenerationAction::Rubric => GenerationRequest::Rubric(RubricRequest {
                grade: context.grade,
                subject: context.subject,
                topic,
                methodology: unit.methodology.clone(),
            }),
        }
    }
}

fn unit_at(plan: &BimesterPlan, index: usize) -> &LessonPlanUnit {
    plan.plans.get(index).unwrap_or_else(|| {
        panic!(
            "unit index {index} out of range for plan with {} units",
            plan.plans.len()
        )
    })
}

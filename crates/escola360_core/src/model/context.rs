//! Planning context shared by every generation request of a session.

use crate::model::catalog::{Bimester, CurriculumStandard, GradeLevel, Subject};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Scalar parameters chosen on the planning screen before generating a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningContext {
    pub grade: GradeLevel,
    pub subject: Subject,
    pub bimester: Bimester,
    pub curriculum: CurriculumStandard,
    /// Free-text observations forwarded to the generator.
    #[serde(default)]
    pub extra_context: String,
}

impl PlanningContext {
    pub fn new(grade: GradeLevel, subject: Subject, bimester: Bimester) -> Self {
        Self {
            grade,
            subject,
            bimester,
            curriculum: CurriculumStandard::Bncc,
            extra_context: String::new(),
        }
    }

    pub fn with_curriculum(mut self, curriculum: CurriculumStandard) -> Self {
        self.curriculum = curriculum;
        self
    }

    pub fn with_extra_context(mut self, extra_context: impl Into<String>) -> Self {
        self.extra_context = extra_context.into();
        self
    }

    /// Title suggested when saving the plan to the library.
    pub fn default_title(&self) -> String {
        format!(
            "Planejamento {} - {} - {}",
            self.grade.label(),
            self.subject.label(),
            self.bimester.label()
        )
    }

    /// Metadata value attached to library records saved from this context.
    pub fn to_metadata(&self) -> serde_json::Value {
        json!({
            "grade": self.grade.label(),
            "subject": self.subject.label(),
            "bimester": self.bimester.label(),
            "curriculum": self.curriculum.label(),
        })
    }
}

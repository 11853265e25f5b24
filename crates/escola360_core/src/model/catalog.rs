//! Curriculum catalog enumerations.
//!
//! # Responsibility
//! - Name the closed vocabularies used to parameterize generation requests.
//! - Keep the Portuguese display label as the serialized form.
//!
//! # Invariants
//! - `label()` and the serde representation of every variant are identical.

use serde::{Deserialize, Serialize};

const HIGH_SCHOOL_MARKER: &str = "Ensino Médio";

/// School year targeted by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "1º Ano do Ensino Fundamental")]
    Ef1,
    #[serde(rename = "2º Ano do Ensino Fundamental")]
    Ef2,
    #[serde(rename = "3º Ano do Ensino Fundamental")]
    Ef3,
    #[serde(rename = "4º Ano do Ensino Fundamental")]
    Ef4,
    #[serde(rename = "5º Ano do Ensino Fundamental")]
    Ef5,
    #[serde(rename = "6º Ano do Ensino Fundamental")]
    Ef6,
    #[serde(rename = "7º Ano do Ensino Fundamental")]
    Ef7,
    #[serde(rename = "8º Ano do Ensino Fundamental")]
    Ef8,
    #[serde(rename = "9º Ano do Ensino Fundamental")]
    Ef9,
    #[serde(rename = "1º Ano do Ensino Médio")]
    Em1,
    #[serde(rename = "2º Ano do Ensino Médio")]
    Em2,
    #[serde(rename = "3º Ano do Ensino Médio")]
    Em3,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 12] = [
        Self::Ef1,
        Self::Ef2,
        Self::Ef3,
        Self::Ef4,
        Self::Ef5,
        Self::Ef6,
        Self::Ef7,
        Self::Ef8,
        Self::Ef9,
        Self::Em1,
        Self::Em2,
        Self::Em3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Ef1 => "1º Ano do Ensino Fundamental",
            Self::Ef2 => "2º Ano do Ensino Fundamental",
            Self::Ef3 => "3º Ano do Ensino Fundamental",
            Self::Ef4 => "4º Ano do Ensino Fundamental",
            Self::Ef5 => "5º Ano do Ensino Fundamental",
            Self::Ef6 => "6º Ano do Ensino Fundamental",
            Self::Ef7 => "7º Ano do Ensino Fundamental",
            Self::Ef8 => "8º Ano do Ensino Fundamental",
            Self::Ef9 => "9º Ano do Ensino Fundamental",
            Self::Em1 => "1º Ano do Ensino Médio",
            Self::Em2 => "2º Ano do Ensino Médio",
            Self::Em3 => "3º Ano do Ensino Médio",
        }
    }

    pub fn is_high_school(self) -> bool {
        self.label().contains(HIGH_SCHOOL_MARKER)
    }

    /// Number of alternatives a multiple-choice question must offer.
    pub fn multiple_choice_alternatives(self) -> u8 {
        if self.is_high_school() {
            5
        } else {
            4
        }
    }
}

/// Curricular component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "Língua Portuguesa")]
    Portuguese,
    #[serde(rename = "Matemática")]
    Math,
    #[serde(rename = "História")]
    History,
    #[serde(rename = "Geografia")]
    Geography,
    #[serde(rename = "Ciências")]
    Science,
    #[serde(rename = "Artes")]
    Arts,
    #[serde(rename = "Educação Física")]
    PhysicalEducation,
    #[serde(rename = "Inglês")]
    English,
    #[serde(rename = "Física")]
    Physics,
    #[serde(rename = "Química")]
    Chemistry,
    #[serde(rename = "Biologia")]
    Biology,
    #[serde(rename = "Sociologia")]
    Sociology,
    #[serde(rename = "Filosofia")]
    Philosophy,
    #[serde(rename = "Ensino Religioso")]
    Religion,
    #[serde(rename = "Itinerários Formativos")]
    FormativeItineraries,
}

const COMMON_SUBJECTS: [Subject; 7] = [
    Subject::Portuguese,
    Subject::Math,
    Subject::History,
    Subject::Geography,
    Subject::Arts,
    Subject::PhysicalEducation,
    Subject::English,
];

impl Subject {
    pub fn label(self) -> &'static str {
        match self {
            Self::Portuguese => "Língua Portuguesa",
            Self::Math => "Matemática",
            Self::History => "História",
            Self::Geography => "Geografia",
            Self::Science => "Ciências",
            Self::Arts => "Artes",
            Self::PhysicalEducation => "Educação Física",
            Self::English => "Inglês",
            Self::Physics => "Física",
            Self::Chemistry => "Química",
            Self::Biology => "Biologia",
            Self::Sociology => "Sociologia",
            Self::Philosophy => "Filosofia",
            Self::Religion => "Ensino Religioso",
            Self::FormativeItineraries => "Itinerários Formativos",
        }
    }

    /// Subjects offered for one grade, in display order.
    ///
    /// High school splits sciences into Physics/Chemistry/Biology and adds the
    /// humanities block; elementary grades get Science and Religion instead.
    pub fn available_for(grade: GradeLevel) -> Vec<Subject> {
        let mut subjects = COMMON_SUBJECTS.to_vec();
        if grade.is_high_school() {
            subjects.extend([
                Self::Physics,
                Self::Chemistry,
                Self::Biology,
                Self::Sociology,
                Self::Philosophy,
                Self::FormativeItineraries,
            ]);
        } else {
            subjects.extend([Self::Science, Self::Religion]);
        }
        subjects
    }

    /// Returns whether generated material should keep examples in English.
    pub fn is_english(self) -> bool {
        self == Self::English
    }
}

/// School term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bimester {
    #[serde(rename = "1º Bimestre")]
    First,
    #[serde(rename = "2º Bimestre")]
    Second,
    #[serde(rename = "3º Bimestre")]
    Third,
    #[serde(rename = "4º Bimestre")]
    Fourth,
}

impl Bimester {
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "1º Bimestre",
            Self::Second => "2º Bimestre",
            Self::Third => "3º Bimestre",
            Self::Fourth => "4º Bimestre",
        }
    }
}

/// Curriculum document a plan is aligned to: the national base or a state
/// curriculum layered on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CurriculumStandard {
    #[serde(rename = "BNCC (Padrão Nacional)")]
    Bncc,
    #[serde(rename = "Acre (Referencial Curricular do Acre)")]
    Ac,
    #[serde(rename = "Amapá (Referencial Curricular Amapaense)")]
    Ap,
    #[serde(rename = "Amazonas (Referencial Curricular Amazonense)")]
    Am,
    #[serde(rename = "Pará (Documento Curricular do Pará)")]
    Pa,
    #[serde(rename = "Rondônia (Referencial Curricular de Rondônia)")]
    Ro,
    #[serde(rename = "Roraima (Documento Curricular de Roraima)")]
    Rr,
    #[serde(rename = "Tocantins (DCT - Documento Curricular do Tocantins)")]
    To,
    #[serde(rename = "Alagoas (Referencial Curricular de Alagoas)")]
    Al,
    #[serde(rename = "Bahia (DCRC - Documento Curricular Referencial da Bahia)")]
    Ba,
    #[serde(rename = "Ceará (DCRC - Documento Curricular Referencial do Ceará)")]
    Ce,
    #[serde(rename = "Maranhão (Documento Curricular do Território Maranhense)")]
    Ma,
    #[serde(rename = "Paraíba (Proposta Curricular do Estado da Paraíba)")]
    Pb,
    #[serde(rename = "Pernambuco (Currículo de Pernambuco)")]
    Pe,
    #[serde(rename = "Piauí (Currículo do Piauí)")]
    Pi,
    #[serde(rename = "Rio Grande do Norte (Documento Curricular do RN)")]
    Rn,
    #[serde(rename = "Sergipe (Currículo de Sergipe)")]
    Se,
    #[serde(rename = "Distrito Federal (Currículo em Movimento)")]
    Df,
    #[serde(rename = "Goiás (DC-GO - Documento Curricular de Goiás)")]
    Go,
    #[serde(rename = "Mato Grosso (DRC-MT)")]
    Mt,
    #[serde(rename = "Mato Grosso do Sul (Referencial Curricular de MS)")]
    Ms,
    #[serde(rename = "Espírito Santo (Currículo do Espírito Santo)")]
    Es,
    #[serde(rename = "Minas Gerais (CRMG - Currículo Referência de Minas Gerais)")]
    Mg,
    #[serde(rename = "Rio de Janeiro (Documento Curricular do Rio de Janeiro)")]
    Rj,
    #[serde(rename = "São Paulo (Currículo Paulista)")]
    Sp,
    #[serde(rename = "Paraná (Referencial Curricular do Paraná)")]
    Pr,
    #[serde(rename = "Rio Grande do Sul (Referencial Curricular Gaúcho)")]
    Rs,
    #[serde(
        rename = "Santa Catarina (Currículo Base da Educação Infantil e Ensino Fundamental do Território Catarinense)"
    )]
    Sc,
}

impl CurriculumStandard {
    pub fn label(self) -> &'static str {
        match self {
            Self::Bncc => "BNCC (Padrão Nacional)",
            Self::Ac => "Acre (Referencial Curricular do Acre)",
            Self::Ap => "Amapá (Referencial Curricular Amapaense)",
            Self::Am => "Amazonas (Referencial Curricular Amazonense)",
            Self::Pa => "Pará (Documento Curricular do Pará)",
            Self::Ro => "Rondônia (Referencial Curricular de Rondônia)",
            Self::Rr => "Roraima (Documento Curricular de Roraima)",
            Self::To => "Tocantins (DCT - Documento Curricular do Tocantins)",
            Self::Al => "Alagoas (Referencial Curricular de Alagoas)",
            Self::Ba => "Bahia (DCRC - Documento Curricular Referencial da Bahia)",
            Self::Ce => "Ceará (DCRC - Documento Curricular Referencial do Ceará)",
            Self::Ma => "Maranhão (Documento Curricular do Território Maranhense)",
            Self::Pb => "Paraíba (Proposta Curricular do Estado da Paraíba)",
            Self::Pe => "Pernambuco (Currículo de Pernambuco)",
            Self::Pi => "Piauí (Currículo do Piauí)",
            Self::Rn => "Rio Grande do Norte (Documento Curricular do RN)",
            Self::Se => "Sergipe (Currículo de Sergipe)",
            Self::Df => "Distrito Federal (Currículo em Movimento)",
            Self::Go => "Goiás (DC-GO - Documento Curricular de Goiás)",
            Self::Mt => "Mato Grosso (DRC-MT)",
            Self::Ms => "Mato Grosso do Sul (Referencial Curricular de MS)",
            Self::Es => "Espírito Santo (Currículo do Espírito Santo)",
            Self::Mg => "Minas Gerais (CRMG - Currículo Referência de Minas Gerais)",
            Self::Rj => "Rio de Janeiro (Documento Curricular do Rio de Janeiro)",
            Self::Sp => "São Paulo (Currículo Paulista)",
            Self::Pr => "Paraná (Referencial Curricular do Paraná)",
            Self::Rs => "Rio Grande do Sul (Referencial Curricular Gaúcho)",
            Self::Sc => {
                "Santa Catarina (Currículo Base da Educação Infantil e Ensino Fundamental do Território Catarinense)"
            }
        }
    }

    pub fn is_national(self) -> bool {
        self == Self::Bncc
    }

    /// Region the curriculum belongs to: `Nacional` for the national base,
    /// otherwise the state name that prefixes the label.
    pub fn region_name(self) -> &'static str {
        if self.is_national() {
            return "Nacional";
        }
        let label = self.label();
        label.split(" (").next().unwrap_or(label)
    }
}

/// Active methodology a unit can be rewritten around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MethodologyStrategy {
    #[serde(rename = "Expositiva Dialogada (Padrão)")]
    Traditional,
    #[serde(rename = "PBL - Aprendizagem Baseada em Projetos")]
    ProjectBased,
    #[serde(rename = "Gamificação")]
    Gamification,
    #[serde(rename = "Sala de Aula Invertida")]
    FlippedClassroom,
    #[serde(rename = "Ensino Híbrido (Rotação por Estações)")]
    Hybrid,
    #[serde(rename = "Storytelling (Narrativa)")]
    Storytelling,
    #[serde(rename = "Instruction by Peers (Instrução por Pares)")]
    PeerInstruction,
    #[serde(rename = "STEAM (Science, Tech, Eng, Arts, Math)")]
    Steam,
}

impl MethodologyStrategy {
    pub fn label(self) -> &'static str {
        match self {
            Self::Traditional => "Expositiva Dialogada (Padrão)",
            Self::ProjectBased => "PBL - Aprendizagem Baseada em Projetos",
            Self::Gamification => "Gamificação",
            Self::FlippedClassroom => "Sala de Aula Invertida",
            Self::Hybrid => "Ensino Híbrido (Rotação por Estações)",
            Self::Storytelling => "Storytelling (Narrativa)",
            Self::PeerInstruction => "Instruction by Peers (Instrução por Pares)",
            Self::Steam => "STEAM (Science, Tech, Eng, Arts, Math)",
        }
    }
}

/// Question or activity format inside a question bank or assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "Múltipla Escolha")]
    MultipleChoice,
    #[serde(rename = "Dissertativa")]
    Essay,
    #[serde(rename = "Pesquisa")]
    Research,
    #[serde(rename = "Atividade Lúdica")]
    Playful,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        Self::MultipleChoice,
        Self::Essay,
        Self::Research,
        Self::Playful,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::MultipleChoice => "Múltipla Escolha",
            Self::Essay => "Dissertativa",
            Self::Research => "Pesquisa",
            Self::Playful => "Atividade Lúdica",
        }
    }
}

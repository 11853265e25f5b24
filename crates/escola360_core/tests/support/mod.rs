#![allow(dead_code)]

use escola360_core::model::artifact::{
    GlossaryItem, Recommendation, RecommendationKind, RubricCriterion, RubricLevel,
    TextbookSection,
};
use escola360_core::model::plan::{
    Activity, AssessmentProposal, BnccSkill, InclusionAdaptations, InterdisciplinaryConnection,
};
use escola360_core::{
    AssessmentConfig, BimesterPlan, EducationalContent, GeneratedAssessment, LessonPlanUnit,
    MethodologyStrategy, Question, QuestionType, Rubric, Slide, SlideDeck,
};

pub fn unit(topic: &str) -> LessonPlanUnit {
    let mut unit = LessonPlanUnit::new(
        topic,
        format!("Resumo de {topic}"),
        "Aula expositiva dialogada com exercícios.",
    );
    unit.objectives = vec![format!("Compreender {topic}")];
    unit.bncc_skills = vec![BnccSkill {
        code: "EF05MA03".to_string(),
        description: "Identificar e representar frações.".to_string(),
    }];
    unit.activities = vec![Activity {
        title: "Pizza de frações".to_string(),
        description: "Dividir círculos de papel.".to_string(),
        duration: "50 min".to_string(),
    }];
    unit.assessments = vec![AssessmentProposal {
        title: "Lista de exercícios".to_string(),
        methodology: "Individual".to_string(),
        criteria: "Acertos".to_string(),
    }];
    unit
}

pub fn plan(topics: &[&str]) -> BimesterPlan {
    BimesterPlan::new(
        "Visão geral do bimestre",
        topics.iter().map(|topic| unit(topic)).collect(),
    )
}

pub fn question(kind: QuestionType, statement: &str) -> Question {
    let mut question = Question::new(kind, statement);
    if kind == QuestionType::MultipleChoice {
        question.options = Some(vec![
            "A) 1/2".to_string(),
            "B) 1/3".to_string(),
            "C) 1/4".to_string(),
            "D) 1/5".to_string(),
        ]);
        question.correct_answer = Some("A".to_string());
        question.justification = Some("Metade do todo.".to_string());
    } else {
        question.answer_key = Some("Resposta esperada.".to_string());
    }
    question.bncc_alignment = Some("EF05MA03".to_string());
    question
}

pub fn text(title: &str) -> EducationalContent {
    EducationalContent {
        title: title.to_string(),
        introduction: "Introdução ao tema.".to_string(),
        sections: vec![TextbookSection {
            subtitle: "O que é uma fração".to_string(),
            content: "Uma **fração** representa partes de um todo.".to_string(),
        }],
        glossary: vec![GlossaryItem {
            term: "Numerador".to_string(),
            definition: "Número de partes consideradas.".to_string(),
        }],
        recommendations: vec![Recommendation {
            kind: RecommendationKind::Video,
            title: "Frações na cozinha".to_string(),
            author_or_source: Some("Canal Matemática".to_string()),
            description: None,
        }],
        references: vec!["BRASIL. Base Nacional Comum Curricular. 2018.".to_string()],
    }
}

pub fn deck(slide_count: usize, theme: Option<&str>) -> SlideDeck {
    SlideDeck {
        title: "Frações".to_string(),
        theme: theme.map(str::to_string),
        slides: (0..slide_count)
            .map(|i| Slide {
                title: format!("Slide {}", i + 1),
                content: "Conteúdo sintetizado.".to_string(),
            })
            .collect(),
    }
}

pub fn assessment_config() -> AssessmentConfig {
    AssessmentConfig {
        school_name: "Escola 360".to_string(),
        professor_name: "Prof. Silva".to_string(),
        date: "10/03/2026".to_string(),
        total_value: 10.0,
        mc_count: 2,
        mc_value: 2.5,
        essay_count: 1,
        essay_value: 5.0,
    }
}

pub fn assessment() -> GeneratedAssessment {
    GeneratedAssessment {
        header: assessment_config(),
        questions: vec![
            question(QuestionType::MultipleChoice, "Qual fração representa metade?"),
            question(QuestionType::Essay, "Explique o que é denominador."),
        ],
        topic: "Frações".to_string(),
        grade: "5º Ano do Ensino Fundamental".to_string(),
        subject: "Matemática".to_string(),
        bimester: "1º Bimestre".to_string(),
    }
}

pub fn rubric() -> Rubric {
    Rubric {
        title: "Rubrica de frações".to_string(),
        criteria: vec![RubricCriterion {
            name: "Clareza".to_string(),
            levels: vec![
                RubricLevel {
                    level_name: "Iniciante".to_string(),
                    description: "Explica com ajuda.".to_string(),
                },
                RubricLevel {
                    level_name: "Avançado".to_string(),
                    description: "Explica com autonomia.".to_string(),
                },
            ],
        }],
    }
}

/// Unit with every optional field populated.
pub fn fully_enriched_unit(topic: &str) -> LessonPlanUnit {
    let mut unit = unit(topic);
    unit.selected_strategy = Some(MethodologyStrategy::Gamification);
    unit.inclusion = Some(InclusionAdaptations {
        general: "Materiais concretos.".to_string(),
        adhd: "Tarefas curtas.".to_string(),
        autism: "Rotina visual.".to_string(),
        dyslexia: "Enunciados lidos em voz alta.".to_string(),
        high_abilities: "Desafio com frações equivalentes.".to_string(),
    });
    unit.interdisciplinary = Some(vec![InterdisciplinaryConnection {
        subject: "Ciências".to_string(),
        description: "Medidas em receitas.".to_string(),
    }]);
    unit.educational_text = Some(text("Frações no cotidiano"));
    unit.question_bank = Some(vec![
        question(QuestionType::MultipleChoice, "Quanto é 1/2 + 1/2?"),
        question(QuestionType::Playful, "Jogo da memória de frações."),
    ]);
    unit.slide_deck = Some(deck(6, Some("Emerald")));
    unit.generated_assessment = Some(assessment());
    unit.rubric = Some(rubric());
    unit
}

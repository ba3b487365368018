#![allow(dead_code)]

use serde_json::{json, Value};
use swot_advisor::domain::model::{InputField, UserInput};

pub const GENERATE_CONTENT_PATH: &str = "/v1beta/models/gemini-test:generateContent";

pub fn complete_input() -> UserInput {
    let mut input = UserInput::default();
    input.business_idea = "Padaria artesanal com entrega por assinatura".to_string();
    input.problem_solved = "Falta de pão fresco de qualidade no bairro".to_string();
    input.target_audience = "Famílias de classe média da zona sul".to_string();
    input.solution_vision = "Assinatura semanal com entrega às 7h".to_string();
    input.differentiators = "Fermentação natural e ingredientes locais".to_string();
    input.strengths = "Experiência de dez anos como padeiro".to_string();
    input.weaknesses = "Pouco capital de giro disponível".to_string();
    input.founder_dependency = "Sim, eu sou o único padeiro por enquanto".to_string();
    input
}

pub fn analysis_json() -> Value {
    json!({
        "swotMatrix": {
            "strengths": [
                {"factor": "Know-how técnico", "justification": "Dez anos de experiência"}
            ],
            "weaknesses": [
                {"factor": "Capital limitado", "justification": "Pouco caixa"},
                {"factor": "Dependência do fundador", "justification": "Único padeiro"}
            ],
            "opportunities": [
                {"factor": "Demanda por artesanal", "justification": "Tendência de consumo"}
            ],
            "threats": [
                {"factor": "Redes de supermercado", "justification": "Preço menor"},
                {"factor": "Alta da farinha", "justification": "Inflação de insumos"},
                {"factor": "Novos concorrentes", "justification": "Barreira de entrada baixa"}
            ]
        },
        "towsMatrix": {
            "soStrategies": ["Lançar plano premium"],
            "woStrategies": ["Buscar microcrédito"],
            "stStrategies": ["Fidelizar assinantes"],
            "wtStrategies": ["Treinar um ajudante"]
        },
        "strategicAlerts": ["Registrar a marca"],
        "finalSynthesis": "Negócio viável com atenção ao caixa.",
        "suggestedCNAEs": ["1091-1/02 - Fabricação de produtos de padaria"],
        "applicableTaxes": ["DAS (MEI)"],
        "estimatedTaxPercentage": "Valor fixo mensal (DAS)"
    })
}

/// Wraps an answer the way `generateContent` returns it.
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}}
        ]
    })
}

pub fn fill_all(values: &UserInput, mut set: impl FnMut(InputField, String)) {
    for field in InputField::ALL {
        set(field, values.get(field).to_string());
    }
}

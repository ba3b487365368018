use schemars::JsonSchema;
use crate::utils::error::ErrorKind;
use serde::{Deserialize, Deserializer, Serialize};

/// The eight free-text answers describing a business idea.
///
/// Missing keys deserialize to empty strings; the endpoint trusts the shape
/// and leaves validation to the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInput {
    pub business_idea: String,
    pub problem_solved: String,
    pub target_audience: String,
    pub solution_vision: String,
    pub differentiators: String,
    pub strengths: String,
    pub weaknesses: String,
    pub founder_dependency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputField {
    BusinessIdea,
    ProblemSolved,
    TargetAudience,
    SolutionVision,
    Differentiators,
    Strengths,
    Weaknesses,
    FounderDependency,
}

impl InputField {
    /// Form order.
    pub const ALL: [InputField; 8] = [
        InputField::BusinessIdea,
        InputField::ProblemSolved,
        InputField::TargetAudience,
        InputField::SolutionVision,
        InputField::Differentiators,
        InputField::Strengths,
        InputField::Weaknesses,
        InputField::FounderDependency,
    ];

    /// Wire key, also used as the prompt placeholder name.
    pub fn key(self) -> &'static str {
        match self {
            InputField::BusinessIdea => "businessIdea",
            InputField::ProblemSolved => "problemSolved",
            InputField::TargetAudience => "targetAudience",
            InputField::SolutionVision => "solutionVision",
            InputField::Differentiators => "differentiators",
            InputField::Strengths => "strengths",
            InputField::Weaknesses => "weaknesses",
            InputField::FounderDependency => "founderDependency",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            InputField::BusinessIdea => "Ideia do Negócio",
            InputField::ProblemSolved => "Problema Resolvido",
            InputField::TargetAudience => "Público-Alvo Percebido",
            InputField::SolutionVision => "Visão de Solução",
            InputField::Differentiators => "Diferenciais Percebidos",
            InputField::Strengths => "Pontos Fortes Internos Percebidos",
            InputField::Weaknesses => "Pontos Fracos Internos Percebidos",
            InputField::FounderDependency => "Dependência do Fundador",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            InputField::BusinessIdea => "Qual é o conceito central do seu negócio?",
            InputField::ProblemSolved => "Qual dor específica do cliente sua ideia resolve?",
            InputField::TargetAudience => "Quem são seus principais clientes?",
            InputField::SolutionVision => "Como seu produto ou serviço resolve o problema?",
            InputField::Differentiators => {
                "O que torna sua solução única em comparação com os concorrentes?"
            }
            InputField::Strengths => "Quais recursos ou habilidades internas lhe dão uma vantagem?",
            InputField::Weaknesses => "Quais limitações ou lacunas internas você possui?",
            InputField::FounderDependency => {
                "O quanto o negócio depende das habilidades pessoais ou da rede de contatos do fundador?"
            }
        }
    }
}

impl UserInput {
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::BusinessIdea => &self.business_idea,
            InputField::ProblemSolved => &self.problem_solved,
            InputField::TargetAudience => &self.target_audience,
            InputField::SolutionVision => &self.solution_vision,
            InputField::Differentiators => &self.differentiators,
            InputField::Strengths => &self.strengths,
            InputField::Weaknesses => &self.weaknesses,
            InputField::FounderDependency => &self.founder_dependency,
        }
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        let slot = match field {
            InputField::BusinessIdea => &mut self.business_idea,
            InputField::ProblemSolved => &mut self.problem_solved,
            InputField::TargetAudience => &mut self.target_audience,
            InputField::SolutionVision => &mut self.solution_vision,
            InputField::Differentiators => &mut self.differentiators,
            InputField::Strengths => &mut self.strengths,
            InputField::Weaknesses => &mut self.weaknesses,
            InputField::FounderDependency => &mut self.founder_dependency,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SwotFactor {
    pub factor: String,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SwotMatrix {
    pub strengths: Vec<SwotFactor>,
    pub weaknesses: Vec<SwotFactor>,
    pub opportunities: Vec<SwotFactor>,
    pub threats: Vec<SwotFactor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TowsMatrix {
    pub so_strategies: Vec<String>,
    pub wo_strategies: Vec<String>,
    pub st_strategies: Vec<String>,
    pub wt_strategies: Vec<String>,
}

/// Full analysis returned by the model. Request scoped, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwotAnalysisResult {
    pub swot_matrix: SwotMatrix,
    pub tows_matrix: TowsMatrix,
    pub strategic_alerts: Vec<String>,
    pub final_synthesis: String,
    #[serde(rename = "suggestedCNAEs")]
    pub suggested_cnaes: Vec<String>,
    pub applicable_taxes: Vec<String>,
    pub estimated_tax_percentage: String,
}

/// Body of every non-200 endpoint response.
///
/// Reading is lenient: a missing `error` is empty and an unrecognised
/// `kind` is dropped, so the message still reaches the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_kind"
    )]
    pub kind: Option<ErrorKind>,
}

fn lenient_kind<'de, D>(deserializer: D) -> Result<Option<ErrorKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_input_missing_keys_default_to_empty() {
        let input: UserInput =
            serde_json::from_str(r#"{"businessIdea": "Padaria artesanal"}"#).unwrap();
        assert_eq!(input.business_idea, "Padaria artesanal");
        assert_eq!(input.founder_dependency, "");
    }

    #[test]
    fn test_field_keys_round_trip_through_from_key() {
        for field in InputField::ALL {
            assert_eq!(InputField::from_key(field.key()), Some(field));
        }
        assert_eq!(InputField::from_key("unknown"), None);
    }

    #[test]
    fn test_result_uses_original_wire_names() {
        let json = serde_json::json!({
            "swotMatrix": {"strengths": [], "weaknesses": [], "opportunities": [], "threats": []},
            "towsMatrix": {"soStrategies": ["a"], "woStrategies": [], "stStrategies": [], "wtStrategies": []},
            "strategicAlerts": [],
            "finalSynthesis": "ok",
            "suggestedCNAEs": ["1091-1/02"],
            "applicableTaxes": [],
            "estimatedTaxPercentage": "6% a 15%"
        });
        let result: SwotAnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.suggested_cnaes, vec!["1091-1/02".to_string()]);
        assert_eq!(result.tows_matrix.so_strategies.len(), 1);
    }

    #[test]
    fn test_envelope_tolerates_missing_error_and_unknown_kind() {
        let empty: ErrorEnvelope = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.error, "");
        assert_eq!(empty.kind, None);

        let unknown: ErrorEnvelope =
            serde_json::from_str(r#"{"error": "Quota exceeded for model", "kind": "quota"}"#)
                .unwrap();
        assert_eq!(unknown.error, "Quota exceeded for model");
        assert_eq!(unknown.kind, None);

        let tagged: ErrorEnvelope =
            serde_json::from_str(r#"{"error": "x", "kind": "credential"}"#).unwrap();
        assert_eq!(tagged.kind, Some(ErrorKind::Credential));
    }
}

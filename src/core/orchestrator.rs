//! Client-side flow: form → loading → result or error → back to the form.

use crate::core::form::FormState;
use crate::domain::model::{SwotAnalysisResult, UserInput};
use crate::domain::ports::AnalysisService;
use crate::utils::error::{ErrorKind, Result, SwotError};

pub const CONFIGURATION_MESSAGE: &str = "Configuração incompleta: A chave de API não foi encontrada no servidor. Verifique as variáveis de ambiente do servidor (API_KEY).";

pub const CREDENTIAL_MESSAGE: &str = "Erro da API do Google: A chave de API parece ser inválida, não tem faturamento ativado ou sua região não é suportada. Verifique suas credenciais no Google Cloud.";

/// Exactly one view is active at a time. The form only exists in `Form`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Form(FormState),
    Loading,
    Error(String),
    Result(Box<SwotAnalysisResult>),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Form(_) => "form",
            ViewState::Loading => "loading",
            ViewState::Error(_) => "error",
            ViewState::Result(_) => "result",
        }
    }
}

/// Tagged kind wins; untagged messages fall back to substring matching.
pub fn classify_failure(tag: Option<ErrorKind>, message: &str) -> ErrorKind {
    if let Some(kind) = tag {
        return kind;
    }
    if message.contains("encontrada no servidor") || message.contains("API key is not configured")
    {
        ErrorKind::Configuration
    } else if message.contains("API key not valid") || message.contains("permission denied") {
        ErrorKind::Credential
    } else {
        ErrorKind::Generic
    }
}

pub fn user_message(kind: ErrorKind, raw: &str) -> String {
    match kind {
        ErrorKind::Configuration => CONFIGURATION_MESSAGE.to_string(),
        ErrorKind::Credential => CREDENTIAL_MESSAGE.to_string(),
        ErrorKind::Generic => format!(
            "Falha ao gerar a análise: {}. Verifique os logs do servidor para mais detalhes.",
            raw
        ),
    }
}

/// User-facing text for a failed submission.
pub fn describe_failure(err: &SwotError) -> String {
    let tag = match err {
        SwotError::RemoteError { kind, .. } => *kind,
        other => match other.kind() {
            ErrorKind::Generic => None,
            kind => Some(kind),
        },
    };
    let raw = err.to_string();
    user_message(classify_failure(tag, &raw), &raw)
}

pub struct Orchestrator<S: AnalysisService> {
    service: S,
    state: ViewState,
}

impl<S: AnalysisService> Orchestrator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: ViewState::Form(FormState::new()),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn form(&self) -> Option<&FormState> {
        match &self.state {
            ViewState::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match &mut self.state {
            ViewState::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&SwotAnalysisResult> {
        match &self.state {
            ViewState::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Form → Loading. Returns the input to send, or `None` when not in the
    /// form or when any field fails validation (errors stay on the form).
    pub fn begin_submit(&mut self) -> Option<UserInput> {
        let ViewState::Form(form) = &mut self.state else {
            return None;
        };
        if !form.validate_all() {
            tracing::debug!("Submission blocked: {} field error(s)", form.errors().len());
            return None;
        }
        let input = form.values().clone();
        self.state = ViewState::Loading;
        Some(input)
    }

    /// Loading → Result | Error. Ignored in any other state.
    pub fn finish(&mut self, outcome: Result<SwotAnalysisResult>) {
        if self.state != ViewState::Loading {
            return;
        }
        self.state = match outcome {
            Ok(result) => ViewState::Result(Box::new(result)),
            Err(e) => {
                tracing::error!("❌ Analysis failed: {} (kind: {:?})", e, e.kind());
                ViewState::Error(describe_failure(&e))
            }
        };
    }

    /// Runs one full round trip. Returns false when nothing was sent.
    pub async fn submit(&mut self) -> bool {
        let Some(input) = self.begin_submit() else {
            return false;
        };
        let outcome = self.service.generate(&input).await;
        self.finish(outcome);
        true
    }

    /// Error | Result → fresh Form.
    pub fn reset(&mut self) -> bool {
        match self.state {
            ViewState::Error(_) | ViewState::Result(_) => {
                self.state = ViewState::Form(FormState::new());
                true
            }
            _ => false,
        }
    }
}

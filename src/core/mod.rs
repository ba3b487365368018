pub mod endpoint;
pub mod form;
pub mod orchestrator;
pub mod prompt;
pub mod report;

pub use crate::domain::model::{SwotAnalysisResult, UserInput};
pub use crate::domain::ports::{AnalysisService, ConfigProvider, ModelInvoker};
pub use crate::utils::error::Result;

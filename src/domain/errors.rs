use thiserror::Error;

/// Rejection of a wizard transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Por favor, preencha a placa da ambulância e o nome do responsável.")]
    MissingIdentification,
}

/// Failure to hand the record over to the spreadsheet endpoint.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("ERRO: A URL da planilha não foi configurada.")]
    EndpointNotConfigured,

    /// Transport-level failure; the detail is kept for the log only.
    #[error("Falha ao comunicar com a planilha. Verifique a URL do script.")]
    Communication { detail: String },

    #[error("Falha ao preparar os dados para envio: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SubmitError {
    pub fn communication(detail: impl Into<String>) -> Self {
        Self::Communication { detail: detail.into() }
    }
}

pub type SubmitResult<T> = Result<T, SubmitError>;

pub type StudioResult<T> = Result<T, StudioError>;

#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("export failed: {0}")]
    ExportFailure(String),

    #[error("an export is already in progress")]
    ExportBusy,

    #[error("clipboard error: {0}")]
    ClipboardFailure(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StudioError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::ExportFailure(msg.into())
    }

    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::ClipboardFailure(msg.into())
    }

    /// Re-tag any failure raised while capturing an export as an [`StudioError::ExportFailure`].
    ///
    /// `ExportBusy` passes through untouched so callers can still tell a rejected trigger apart
    /// from a failed capture.
    pub(crate) fn into_export_failure(self) -> Self {
        match self {
            Self::ExportFailure(_) | Self::ExportBusy => self,
            other => Self::ExportFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

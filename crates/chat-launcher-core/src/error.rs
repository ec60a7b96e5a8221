/// Failures raised by launcher collaborators.
///
/// None of these ever reach the page: the controller logs each one at the call
/// site and falls back to a safe state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LauncherError {
    #[error("window is unavailable")]
    WindowUnavailable,
    #[error("document is unavailable")]
    DocumentUnavailable,
    #[error("document body is unavailable")]
    BodyUnavailable,
    #[error("failed to create launcher icon: {0}")]
    ElementCreation(String),
    #[error("failed to style launcher icon: {0}")]
    Style(String),
    #[error("failed to wire launcher icon click handler: {0}")]
    ClickHandler(String),
    #[error("failed to detach launcher icon: {0}")]
    Detach(String),
    #[error("failed to dispatch message: {0}")]
    Dispatch(String),
    #[error("storage is unavailable: {0}")]
    StorageUnavailable(String),
    #[error("failed to read storage key {key}: {message}")]
    StorageRead { key: String, message: String },
}

impl LauncherError {
    /// Whether the error means the document could not host an icon yet.
    #[must_use]
    pub fn is_dom_unavailable(&self) -> bool {
        matches!(
            self,
            Self::WindowUnavailable | Self::DocumentUnavailable | Self::BodyUnavailable
        )
    }
}

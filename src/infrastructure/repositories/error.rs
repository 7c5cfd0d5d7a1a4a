/// Failure talking to the TTS server.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// Non-success status. `message` is the server's `detail` when it sent
    /// one, otherwise a status based fallback.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Invalid server response: {0}")]
    Decode(String),

    #[error("Failed to read local file: {0}")]
    LocalFile(String),
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn server(status: u16, detail: Option<String>) -> Self {
        let message = detail
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {}", status));
        Self::Server { status, message }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

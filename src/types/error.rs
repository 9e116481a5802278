use serenity::model::id::ChannelId;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum BotError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Missing permission: {permission}")]
    MissingPermission { permission: String },

    #[error("Channel unavailable: {channel_id}")]
    ChannelUnavailable { channel_id: ChannelId },

    #[error("Discord API error during {operation}: {message}")]
    Platform { operation: String, message: String },
}

impl BotError {
    /// Returns true if this error was caused by user input/action rather than a
    /// platform failure. User errors are logged at WARN and echoed back to the
    /// user verbatim; everything else gets a generic notice.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::MissingPermission { .. }
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn missing_permission(permission: impl Into<String>) -> Self {
        Self::MissingPermission {
            permission: permission.into(),
        }
    }

    pub fn channel_unavailable(channel_id: ChannelId) -> Self {
        Self::ChannelUnavailable { channel_id }
    }

    pub fn platform(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Platform {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

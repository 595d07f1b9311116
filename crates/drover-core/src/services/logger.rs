//! Named logging channel handed to consumers.

/// A logger bound to a channel name.
///
/// Every record is forwarded to `tracing` with the channel attached as a
/// field, so subscriber filters and formatters apply unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    channel: String,
}

impl Logger {
    /// Create a logger for `channel`.
    #[must_use]
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }

    /// The channel name.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn error(&self, message: &str) {
        tracing::error!(channel = %self.channel, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!(channel = %self.channel, "{}", message);
    }

    pub fn info(&self, message: &str) {
        tracing::info!(channel = %self.channel, "{}", message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!(channel = %self.channel, "{}", message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new("drover")
    }
}

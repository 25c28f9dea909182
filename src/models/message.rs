//! Outbound channel messages.

/// A single send to the notification channel. All bodies are HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Photo by URL with a short caption
    Photo { url: String, caption: String },

    /// Text message
    Text {
        text: String,
        /// Suppress the link preview (set when a photo already went out)
        disable_preview: bool,
    },
}

impl OutboundMessage {
    /// The caption or text body.
    pub fn body(&self) -> &str {
        match self {
            Self::Photo { caption, .. } => caption,
            Self::Text { text, .. } => text,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Photo { .. } => "photo",
            Self::Text { .. } => "text",
        }
    }
}

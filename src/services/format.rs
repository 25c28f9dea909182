// src/services/format.rs

//! Message composition.
//!
//! Every piece of article text is escaped before it is measured, and cuts
//! only happen inside the escaped text, so the fixed markup around it is
//! always emitted whole.

use crate::models::{CandidateItem, DetailContent, FormatConfig, MessagesConfig, OutboundMessage};
use crate::utils::text::{escape, escape_attr, escape_truncated, truncate_graphemes, utf16_len};

const ELLIPSIS: &str = "...";

/// Builds the outbound messages for one article.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    format: FormatConfig,
    messages: MessagesConfig,
}

impl MessageFormatter {
    pub fn new(format: FormatConfig, messages: MessagesConfig) -> Self {
        Self { format, messages }
    }

    /// One text message, or a photo with a short caption followed by the
    /// full text when an image is known. The detail image wins over the
    /// listing preview.
    pub fn format(&self, item: &CandidateItem, detail: &DetailContent) -> Vec<OutboundMessage> {
        let text = self.long_form(item, &detail.text);
        match detail.image.as_ref().or(item.image.as_ref()) {
            Some(image) => vec![
                OutboundMessage::Photo {
                    url: image.clone(),
                    caption: self.caption(item),
                },
                OutboundMessage::Text {
                    text,
                    disable_preview: true,
                },
            ],
            None => vec![OutboundMessage::Text {
                text,
                disable_preview: false,
            }],
        }
    }

    /// Title, source label and link, within the caption limit.
    pub fn caption(&self, item: &CandidateItem) -> String {
        let limit = self.format.caption_limit;
        let head = "📰 <b>";
        let tail = format!(
            "</b>\n🌐 <i>{}</i>\n🔗 <a href=\"{}\">{}</a>",
            escape(&item.source),
            escape_attr(&item.link),
            escape(&self.messages.read_full),
        );

        let fixed = utf16_len(head) + utf16_len(&tail);
        if fixed > limit {
            return escape_truncated(&item.title, limit).0;
        }
        let (title, _) = escape_truncated(&item.title, limit - fixed);
        format!("{head}{title}{tail}")
    }

    /// Title, source label, excerpt and link, within the text limit.
    ///
    /// The excerpt is the first `excerpt_chars` characters of the body with
    /// an ellipsis when it was shortened. If the title eats the whole
    /// budget the excerpt is dropped before the title is cut.
    pub fn long_form(&self, item: &CandidateItem, body: &str) -> String {
        let limit = self.format.text_limit;
        let excerpt = self.excerpt(body);

        let head = "📰 <b>";
        let middle = format!("</b>\n🌐 <i>{}</i>\n\n", escape(&item.source));
        let tail = format!(
            "🔗 <a href=\"{}\">{}</a>",
            escape_attr(&item.link),
            escape(&self.messages.continue_reading),
        );
        let separator = if excerpt.is_empty() { "" } else { "\n\n" };

        let fixed =
            utf16_len(head) + utf16_len(&middle) + utf16_len(separator) + utf16_len(&tail);
        if fixed > limit {
            return escape_truncated(&item.title, limit).0;
        }

        let budget = limit - fixed;
        let (title, _) = escape_truncated(&item.title, budget);
        let (excerpt, cut) = escape_truncated(&excerpt, budget - utf16_len(&title));
        if cut {
            log::debug!("Excerpt for {} cut to fit {limit} UTF-16 units", item.link);
        }
        let separator = if excerpt.is_empty() { "" } else { separator };

        format!("{head}{title}{middle}{excerpt}{separator}{tail}")
    }

    fn excerpt(&self, body: &str) -> String {
        let body = body.trim();
        let prefix = truncate_graphemes(body, self.format.excerpt_chars);
        if prefix.len() < body.len() {
            format!("{}{ELLIPSIS}", prefix.trim_end())
        } else {
            prefix.to_string()
        }
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(FormatConfig::default(), MessagesConfig::default())
    }
}

//! Embed model and serenity embed builders
//!
//! Platform-neutral embed description used by command handlers, converted
//! to a serenity `CreateEmbed` at the send boundary.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add author links and inline fields for the stats embed
//! - 1.0.0: Initial embed model with success/fail accents

use crate::core::response::{
    truncate_for_embed, truncate_to, EMBED_TITLE_LIMIT, FIELD_NAME_LIMIT, FIELD_VALUE_LIMIT,
};
use serenity::builder::CreateEmbed;

/// Accent for success notices
pub const SUCCESS_COLOR: u32 = 0x2ECC71;
/// Accent for failure notices
pub const FAIL_COLOR: u32 = 0xFF0000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Outbound embed, built by handlers and rendered by the platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub color: Option<u32>,
    pub author: Option<EmbedAuthor>,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn author(mut self, name: impl Into<String>, url: Option<String>) -> Self {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            url,
        });
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl ToString, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.to_string(),
            inline,
        });
        self
    }

    /// Look up a field value by name
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Build a serenity embed, clamping every part to Discord limits
pub fn to_create_embed(embed: &Embed) -> CreateEmbed {
    let mut out = CreateEmbed::default();
    if let Some(title) = &embed.title {
        out.title(truncate_to(title, EMBED_TITLE_LIMIT));
    }
    if let Some(description) = &embed.description {
        out.description(truncate_for_embed(description));
    }
    if let Some(image) = &embed.image {
        out.image(image);
    }
    if let Some(thumbnail) = &embed.thumbnail {
        out.thumbnail(thumbnail);
    }
    if let Some(color) = embed.color {
        out.color(color);
    }
    if let Some(author) = &embed.author {
        out.author(|a| {
            a.name(&author.name);
            if let Some(url) = &author.url {
                a.url(url);
            }
            a
        });
    }
    for field in &embed.fields {
        out.field(
            truncate_to(&field.name, FIELD_NAME_LIMIT),
            truncate_to(&field.value, FIELD_VALUE_LIMIT),
            field.inline,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_parts() {
        let embed = Embed::new()
            .title("Title")
            .description("Body")
            .image("https://example.com/a.png")
            .color(SUCCESS_COLOR)
            .field("Wins", 10, true);

        assert_eq!(embed.title.as_deref(), Some("Title"));
        assert_eq!(embed.description.as_deref(), Some("Body"));
        assert_eq!(embed.image.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(embed.color, Some(SUCCESS_COLOR));
        assert_eq!(embed.field_value("Wins"), Some("10"));
        assert!(embed.fields[0].inline);
    }

    #[test]
    fn test_to_create_embed_builds_successfully() {
        let embed = Embed::new()
            .title("Stats")
            .thumbnail("https://example.com/emblem.png")
            .author("PlayerOne [ABC]", Some("https://example.com/p".to_string()))
            .field("Kills", 100, true);
        // CreateEmbed is opaque; building without panic is the check
        let _ = to_create_embed(&embed);
    }

    #[test]
    fn test_to_create_embed_long_text() {
        let embed = Embed::new()
            .title("t".repeat(500))
            .description("d".repeat(5000))
            .field("n".repeat(300), "v".repeat(2000), false);
        let _ = to_create_embed(&embed);
    }
}

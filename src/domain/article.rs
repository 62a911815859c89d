use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Characters of original text shown in the detail view.
pub const ORIGINAL_EXCERPT_CHARS: usize = 400;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Technology,
    Business,
    Economy,
    Markets,
    Other(String),
}

impl Category {
    /// Label as sent by the API.
    pub fn wire_label(&self) -> &str {
        match self {
            Category::Technology => "Tecnología",
            Category::Business => "Negocios",
            Category::Economy => "Economía",
            Category::Markets => "Mercados",
            Category::Other(label) => label,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::Economy => "Economy",
            Category::Markets => "Markets",
            Category::Other(label) => label,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.trim() {
            "Tecnología" | "Technology" => Category::Technology,
            "Negocios" | "Business" => Category::Business,
            "Economía" | "Economy" => Category::Economy,
            "Mercados" | "Markets" => Category::Markets,
            _ => Category::Other(label),
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::from(label.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.wire_label().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One AI-summarised news item. Identity is its position in the current feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "contenido_ia", default)]
    pub ai_summary: Option<String>,
    #[serde(rename = "contenido_original", default)]
    pub original_content: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(
        rename = "fecha_publicacion",
        default,
        deserialize_with = "deserialize_published_at"
    )]
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(title: impl Into<String>, category: impl Into<Category>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            ai_summary: None,
            original_content: None,
            source_url: None,
            published_at: None,
        }
    }

    pub fn display_summary(&self) -> &str {
        self.ai_summary.as_deref().unwrap_or("")
    }

    /// Leading slice of the original text, or `None` when the API had none.
    pub fn original_excerpt(&self) -> Option<String> {
        let content = self.original_content.as_deref()?;
        let decoded = html_escape::decode_html_entities(content);
        Some(decoded.chars().take(ORIGINAL_EXCERPT_CHARS).collect())
    }
}

/// Accepts RFC 3339 or the naive ISO-8601 timestamps the API emits.
/// Anything unparsable is dropped rather than failing the whole feed.
fn deserialize_published_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_article() {
        let json = r#"{
            "id": "3f1c",
            "titulo": "Nuevo chip",
            "categoria": "Tecnología",
            "contenido_ia": "Resumen",
            "contenido_original": "Texto &amp; más",
            "source_url": "https://example.com/a",
            "fecha_publicacion": "2024-05-01T10:30:00.123456"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Nuevo chip");
        assert_eq!(article.category, Category::Technology);
        assert_eq!(article.display_summary(), "Resumen");
        assert_eq!(article.original_excerpt().as_deref(), Some("Texto & más"));
        assert_eq!(
            article.published_at.map(|d| d.format("%Y-%m-%d %H:%M").to_string()),
            Some("2024-05-01 10:30".to_string())
        );
    }

    #[test]
    fn test_nullable_fields_default_to_none() {
        let json = r#"{"titulo": "x", "categoria": "Negocios", "contenido_ia": null}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.category, Category::Business);
        assert!(article.ai_summary.is_none());
        assert!(article.original_excerpt().is_none());
        assert!(article.published_at.is_none());
    }

    #[test]
    fn test_bad_date_does_not_fail_article() {
        let json = r#"{"titulo": "x", "categoria": "Mercados", "fecha_publicacion": "yesterday"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.published_at.is_none());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::from("Economía"), Category::Economy);
        assert_eq!(Category::from("Markets"), Category::Markets);
        assert_eq!(Category::from("Deportes"), Category::Other("Deportes".into()));
        assert_eq!(Category::Technology.wire_label(), "Tecnología");
        assert_eq!(Category::Other("Deportes".into()).to_string(), "Deportes");
    }

    #[test]
    fn test_original_excerpt_truncates_by_chars() {
        let mut article = Article::new("t", Category::Technology);
        article.original_content = Some("é".repeat(ORIGINAL_EXCERPT_CHARS + 50));
        let excerpt = article.original_excerpt().unwrap();
        assert_eq!(excerpt.chars().count(), ORIGINAL_EXCERPT_CHARS);
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2024-05-01T10:30:00+02:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "08:30");
    }
}

//! Front-matter parsing for local markdown posts

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Front-matter that could not be read
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid JSON front-matter")]
    Json(#[from] serde_json::Error),

    #[error("unterminated JSON front-matter")]
    Unterminated,
}

/// Accepts `tags: notes` as well as `tags: [notes, rust]`
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(tag)) => vec![tag],
        Some(OneOrMany::Many(tags)) => tags,
        None => Vec::new(),
    })
}

/// Front-matter data of a post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    /// Posts are published unless marked otherwise
    pub published: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            slug: None,
            date: None,
            tags: Vec::new(),
            published: true,
            extra: HashMap::new(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Ok(Self::parse_yaml(content));
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> (Self, &str) {
        let rest = content[3..].trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return (FrontMatter::default(), content);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        // A leading `---` may just be a thematic break
        if !yaml_content.lines().any(looks_like_yaml_key) {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        // ;;; {...} ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            let end_pos = rest.find(";;;").ok_or(FrontMatterError::Unterminated)?;
            let fm: FrontMatter = serde_json::from_str(&rest[..end_pos])?;
            let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);
            return Ok((fm, remaining));
        }

        let mut depth = 0usize;
        let mut end_pos = None;
        for (i, c) in content.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        end_pos = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        let end_pos = end_pos.ok_or(FrontMatterError::Unterminated)?;
        let fm: FrontMatter = serde_json::from_str(&content[..end_pos])?;
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);
        Ok((fm, remaining))
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// `key:` followed by a space or end of line, where key is a plain
/// identifier and not a URL scheme
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }
    let Some((key, after)) = trimmed.split_once(':') else {
        return false;
    };
    let is_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp");
    is_key && (after.is_empty() || after.starts_with(' '))
}

/// Parse a date string in the formats authors and CMS exports use.
/// Naive times are taken as UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: [&str; 6] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
slug: hello
date: 2024-01-15 10:30:00
tags:
  - rust
  - garden
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.slug, Some("hello".to_string()));
        assert_eq!(fm.tags, vec!["rust", "garden"]);
        assert!(fm.published);
        assert!(remaining.contains("This is the content."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "tags": ["a", "b"]}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Test Post".to_string()));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_unterminated_json_frontmatter() {
        let err = FrontMatter::parse(";;; {\"title\": \"x\"}").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: Single\ntags: Notes\npublished: false\n---\nBody\n";

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
        assert!(!fm.published);
        assert_eq!(remaining, "Body\n");
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = "\n---\n\nSome text with [[Links]]\n\n---\nMore content here.\n";

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("Some text"));
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = "---\nCheck out https://example.com/path\n---\nMore content.\n";

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_parse_date_formats() {
        let fm = FrontMatter {
            date: Some("2024-01-15 10:30:00".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");

        let dt = parse_date_string("2024-02-03").unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-02-03");

        let dt = parse_date_string("2024-02-03T10:00:00.000+02:00").unwrap();
        assert_eq!(dt.format("%H").to_string(), "08");

        assert!(parse_date_string("next tuesday").is_none());
    }
}

//! Shared types for the classification pipeline.

use serde::{Deserialize, Serialize};

/// Productivity category of a message.
///
/// Serialized with the Portuguese labels the API contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Requires a follow-up action from the team.
    #[serde(rename = "Produtivo")]
    Productive,
    /// Social or promotional content — no action needed.
    #[serde(rename = "Improdutivo")]
    Unproductive,
}

impl Category {
    /// Wire label for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Productive => "Produtivo",
            Self::Unproductive => "Improdutivo",
        }
    }

    /// Parse a label, tolerating case differences (remote backends are not
    /// always exact about capitalization).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "produtivo" => Some(Self::Productive),
            "improdutivo" => Some(Self::Unproductive),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category plus its suggested reply, produced atomically — one never
/// exists without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub reply: String,
}

impl Classification {
    pub fn new(category: Category, reply: impl Into<String>) -> Self {
        Self {
            category,
            reply: reply.into(),
        }
    }
}

/// A classification plus which backend actually produced it.
#[derive(Debug, Clone)]
pub struct ClassifyOutcome {
    pub classification: Classification,
    /// True only when the remote backend's result was used for this
    /// request — false on fallback even with the remote backend enabled.
    pub used_ai: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_to_portuguese_labels() {
        assert_eq!(
            serde_json::to_value(Category::Productive).unwrap(),
            "Produtivo"
        );
        assert_eq!(
            serde_json::to_value(Category::Unproductive).unwrap(),
            "Improdutivo"
        );
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("Produtivo"), Some(Category::Productive));
        assert_eq!(Category::parse("IMPRODUTIVO"), Some(Category::Unproductive));
        assert_eq!(Category::parse("  produtivo "), Some(Category::Productive));
        assert_eq!(Category::parse("spam"), None);
    }

    #[test]
    fn category_display_matches_wire_label() {
        assert_eq!(Category::Productive.to_string(), "Produtivo");
        assert_eq!(Category::Unproductive.to_string(), "Improdutivo");
    }
}

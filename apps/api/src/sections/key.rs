//! Section keys: the identifiers the layout engine places and orders.
//!
//! Built-in sections form a closed set; custom sections carry an opaque id generated
//! when the user creates them. On the wire both are plain strings: a string matching a
//! built-in name is that built-in, anything else is a custom id.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix for generated custom section ids. Keeps them clear of built-in names.
pub const CUSTOM_PREFIX: &str = "custom_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinSection {
    Contact,
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
    Certifications,
}

impl BuiltinSection {
    /// Canonical document order. Registry and default order both follow it.
    pub const CANONICAL: [BuiltinSection; 7] = [
        BuiltinSection::Contact,
        BuiltinSection::Summary,
        BuiltinSection::Skills,
        BuiltinSection::Experience,
        BuiltinSection::Education,
        BuiltinSection::Projects,
        BuiltinSection::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinSection::Contact => "contact",
            BuiltinSection::Summary => "summary",
            BuiltinSection::Skills => "skills",
            BuiltinSection::Experience => "experience",
            BuiltinSection::Education => "education",
            BuiltinSection::Projects => "projects",
            BuiltinSection::Certifications => "certifications",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::CANONICAL.into_iter().find(|b| b.as_str() == value)
    }

    /// Optional built-ins are only part of a document when it opts in.
    pub fn is_optional(&self) -> bool {
        matches!(self, BuiltinSection::Contact | BuiltinSection::Summary)
    }

    /// Region a built-in lands in when a layout is first created.
    pub fn default_in_sidebar(&self) -> bool {
        matches!(
            self,
            BuiltinSection::Contact
                | BuiltinSection::Skills
                | BuiltinSection::Education
                | BuiltinSection::Certifications
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            BuiltinSection::Contact => "Contact",
            BuiltinSection::Summary => "Summary",
            BuiltinSection::Skills => "Skills",
            BuiltinSection::Experience => "Experience",
            BuiltinSection::Education => "Education",
            BuiltinSection::Projects => "Projects",
            BuiltinSection::Certifications => "Certifications",
        }
    }
}

/// Id of a user-created section, e.g. `custom_5f0c…`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomSectionId(String);

impl CustomSectionId {
    pub fn generate() -> Self {
        Self(format!("{CUSTOM_PREFIX}{}", Uuid::new_v4()))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomSectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionKey {
    Builtin(BuiltinSection),
    Custom(CustomSectionId),
}

impl SectionKey {
    pub fn as_str(&self) -> &str {
        match self {
            SectionKey::Builtin(b) => b.as_str(),
            SectionKey::Custom(id) => id.as_str(),
        }
    }

    pub fn builtin(&self) -> Option<BuiltinSection> {
        match self {
            SectionKey::Builtin(b) => Some(*b),
            SectionKey::Custom(_) => None,
        }
    }

    /// Where the key lands when a layout is created from scratch.
    /// Custom sections always start in main.
    pub fn default_in_sidebar(&self) -> bool {
        self.builtin().is_some_and(|b| b.default_in_sidebar())
    }
}

impl From<BuiltinSection> for SectionKey {
    fn from(value: BuiltinSection) -> Self {
        SectionKey::Builtin(value)
    }
}

impl From<CustomSectionId> for SectionKey {
    fn from(value: CustomSectionId) -> Self {
        SectionKey::Custom(value)
    }
}

impl From<String> for SectionKey {
    fn from(value: String) -> Self {
        match BuiltinSection::parse(&value) {
            Some(b) => SectionKey::Builtin(b),
            None => SectionKey::Custom(CustomSectionId(value)),
        }
    }
}

impl From<&str> for SectionKey {
    fn from(value: &str) -> Self {
        SectionKey::from(value.to_string())
    }
}

impl From<SectionKey> for String {
    fn from(value: SectionKey) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

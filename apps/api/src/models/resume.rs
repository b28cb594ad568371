use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::template::CustomTemplate;
use crate::render::TemplateStyle;
use crate::sections::key::{BuiltinSection, CustomSectionId};
use crate::sections::layout::LayoutAssignment;
use crate::sections::order::SectionOrder;

/// The persisted resume document, one per owner.
///
/// `section_order` and `layout` are optional at rest: documents written before the
/// layout editor existed have neither. Reconciliation fills them in on every load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub custom_sections: Vec<CustomSection>,
    /// Optional built-ins (`contact`, `summary`) the document opts into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_sections: Option<Vec<BuiltinSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_order: Option<SectionOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutAssignment>,
    /// Column structure for the `custom` style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_template: Option<CustomTemplate>,
    /// Fields this service does not model, carried through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResumeDocument {
    pub fn custom_section(&self, id: &CustomSectionId) -> Option<&CustomSection> {
        self.custom_sections.iter().find(|s| &s.id == id)
    }

    pub fn custom_section_mut(&mut self, id: &CustomSectionId) -> Option<&mut CustomSection> {
        self.custom_sections.iter_mut().find(|s| &s.id == id)
    }

    /// Public username, trimmed. Blank means the document is not published.
    pub fn username(&self) -> Option<&str> {
        self.personal_info
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub template: TemplateStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSection {
    pub id: CustomSectionId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// The columns of a `resumes` row that loading reads.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub owner_id: Uuid,
    pub document: sqlx::types::Json<ResumeDocument>,
}

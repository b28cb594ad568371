use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sections::key::SectionKey;

/// Column structure chosen in the template builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnLayout {
    #[default]
    Single,
    TwoColumn,
    ThreeColumn,
}

/// Sections listed per column. `center_column` is only read by three-column layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnConfig {
    pub left_column: Vec<SectionKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_column: Option<Vec<SectionKey>>,
    pub right_column: Vec<SectionKey>,
}

/// The user-built template the `custom` style renders with.
///
/// Its section lists are the template's own and are never reconciled; planning
/// skips keys that left the registry and places new ones itself. Styling fields
/// (fonts, colours, spacing) are carried in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTemplate {
    #[serde(default)]
    pub layout: ColumnLayout,
    #[serde(default)]
    pub section_order: Vec<SectionKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_config: Option<ColumnConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

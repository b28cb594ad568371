//! How each visual style consumes the shared layout.

use serde::{Deserialize, Serialize};

use crate::sections::key::BuiltinSection;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateStyle {
    #[default]
    Classic,
    Modern,
    Minimalist,
    TwoColumn,
    Colorful,
    Custom,
}

/// How a style turns (layout, order) into regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Everything in one column following the section order, `lead` sections first.
    SingleColumn { lead: &'static [BuiltinSection] },
    /// Regions follow the document's layout. `header` sections open whichever region
    /// holds them, and the single column in single mode; `main_lead` sections open
    /// main in two-region mode only.
    #[serde(rename_all = "camelCase")]
    SharedLayout {
        header: &'static [BuiltinSection],
        main_lead: &'static [BuiltinSection],
    },
    /// Columns come from the document's custom template; without one, the shared
    /// layout is used with nothing pinned.
    CustomColumns,
    /// The style's own split. Sections outside both lists follow the order in main.
    FixedSplit {
        sidebar: &'static [BuiltinSection],
        main: &'static [BuiltinSection],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub style: TemplateStyle,
    pub name: &'static str,
    /// False when the style ignores the user's sidebar/main customisation. A custom
    /// template with its own columns also ignores it; its plan says so.
    pub honors_shared_layout: bool,
    pub placement: Placement,
}

const HEADER_LEAD: &[BuiltinSection] = &[BuiltinSection::Contact, BuiltinSection::Summary];

pub static TEMPLATES: [TemplateDescriptor; 6] = [
    TemplateDescriptor {
        style: TemplateStyle::Classic,
        name: "Classic",
        honors_shared_layout: true,
        placement: Placement::SingleColumn { lead: HEADER_LEAD },
    },
    TemplateDescriptor {
        style: TemplateStyle::Modern,
        name: "Modern",
        honors_shared_layout: false,
        placement: Placement::FixedSplit {
            sidebar: &[
                BuiltinSection::Contact,
                BuiltinSection::Skills,
                BuiltinSection::Education,
            ],
            main: &[
                BuiltinSection::Summary,
                BuiltinSection::Experience,
                BuiltinSection::Projects,
                BuiltinSection::Certifications,
            ],
        },
    },
    TemplateDescriptor {
        style: TemplateStyle::Minimalist,
        name: "Minimalist",
        honors_shared_layout: true,
        placement: Placement::SingleColumn { lead: HEADER_LEAD },
    },
    TemplateDescriptor {
        style: TemplateStyle::TwoColumn,
        name: "Two Column",
        honors_shared_layout: true,
        placement: Placement::SharedLayout {
            header: &[BuiltinSection::Contact],
            main_lead: &[BuiltinSection::Summary],
        },
    },
    TemplateDescriptor {
        style: TemplateStyle::Colorful,
        name: "Colorful",
        honors_shared_layout: true,
        placement: Placement::SingleColumn { lead: HEADER_LEAD },
    },
    TemplateDescriptor {
        style: TemplateStyle::Custom,
        name: "Custom",
        honors_shared_layout: true,
        placement: Placement::CustomColumns,
    },
];

pub fn descriptor(style: TemplateStyle) -> &'static TemplateDescriptor {
    match style {
        TemplateStyle::Classic => &TEMPLATES[0],
        TemplateStyle::Modern => &TEMPLATES[1],
        TemplateStyle::Minimalist => &TEMPLATES[2],
        TemplateStyle::TwoColumn => &TEMPLATES[3],
        TemplateStyle::Colorful => &TEMPLATES[4],
        TemplateStyle::Custom => &TEMPLATES[5],
    }
}

// Template renderer contract.
// Turns a reconciled resume into per-region section sequences for each visual style.
// Markup and styling live in the front end; this module only decides placement.

pub mod descriptor;
pub mod plan;

pub use descriptor::{TemplateDescriptor, TemplateStyle, TEMPLATES};
pub use plan::{plan_for_document, plan_render, RenderPlan};

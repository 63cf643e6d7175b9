//! Template literals and their virtual documents.

pub mod template_finder;
pub mod template_part;
pub mod virtual_document;

pub use template_finder::find_tagged_templates;
pub use template_part::{ExpressionPlaceholder, TemplatePart};
pub use virtual_document::{DocumentKind, DocumentPart, VirtualDocument};

//! Element schema: what tags exist and which members they accept.

pub mod builtin;
pub mod custom_data;
pub mod dom_schema;
pub mod html_tag;
pub mod security_schema;
pub mod store;

pub use builtin::builtin_collection;
pub use custom_data::user_collection;
pub use html_tag::{
    HtmlDataCollection, HtmlDataSource, HtmlMember, HtmlMemberKind, HtmlTag, MemberType,
    SourceKind,
};
pub use security_schema::{security_context, SecurityContext};
pub use store::{HtmlStore, HtmlTagView};

//! Security-sensitive bindings.
//!
//! Maps `tag|attribute` pairs to the context their value is interpreted in.
//! With the `ClosureSafeTypes` system enabled, a dynamic value bound to one of
//! these pairs must be one of the trusted nominal types of its context.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use ts::SimpleType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityContext {
    Html,
    Style,
    Url,
    ResourceUrl,
}

impl SecurityContext {
    /// Nominal type names accepted in the context.
    pub fn trusted_type_names(&self) -> &'static [&'static str] {
        match self {
            SecurityContext::Html => &["SafeHtml", "TrustedHTML"],
            SecurityContext::Style => &["SafeStyle"],
            SecurityContext::Url => &["SafeUrl", "TrustedResourceUrl"],
            SecurityContext::ResourceUrl => &["TrustedResourceUrl", "TrustedScriptURL"],
        }
    }

    /// Plain strings are sanitized at runtime for URL bindings.
    pub fn accepts_string(&self) -> bool {
        matches!(self, SecurityContext::Url)
    }

    /// Whether a value of type `ty` may be bound in this context.
    pub fn accepts(&self, ty: &SimpleType) -> bool {
        if ty.is_any() {
            return true;
        }
        named_union_members(ty)
            .into_iter()
            .all(|member| self.accepts_member(member))
    }

    fn accepts_member(&self, ty: &SimpleType) -> bool {
        if self.accepts_string()
            && matches!(ty.resolved(), SimpleType::String | SimpleType::StringLiteral(_))
        {
            return true;
        }
        let names = self.trusted_type_names();
        alias_chain(ty).any(|name| names.contains(&name))
    }
}

impl fmt::Display for SecurityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityContext::Html => write!(f, "HTML"),
            SecurityContext::Style => write!(f, "STYLE"),
            SecurityContext::Url => write!(f, "URL"),
            SecurityContext::ResourceUrl => write!(f, "RESOURCE_URL"),
        }
    }
}

/// Union members with their declared names kept. Aliases of unions are
/// expanded; aliases of anything else stay intact so the name can be matched.
fn named_union_members(ty: &SimpleType) -> Vec<&SimpleType> {
    match ty {
        SimpleType::Union(types) => types.iter().flat_map(named_union_members).collect(),
        SimpleType::Alias { target, .. } if matches!(target.as_ref(), SimpleType::Union(_)) => {
            named_union_members(target)
        }
        other => vec![other],
    }
}

/// Every declared name along the alias chain of a type.
fn alias_chain(ty: &SimpleType) -> impl Iterator<Item = &str> {
    let mut current = Some(ty);
    std::iter::from_fn(move || {
        while let Some(ty) = current {
            current = match ty {
                SimpleType::Alias { target, .. } | SimpleType::GenericInstance { target, .. } => {
                    Some(target.as_ref())
                }
                _ => None,
            };
            if let Some(name) = ty.name() {
                return Some(name);
            }
        }
        None
    })
}

/// Lower-cased `tag|attribute` to context. `*` matches every tag.
static SECURITY_SCHEMA: Lazy<HashMap<String, SecurityContext>> = Lazy::new(|| {
    let mut schema = HashMap::new();

    register_context(
        &mut schema,
        SecurityContext::Html,
        &["iframe|srcdoc", "*|innerhtml", "*|outerhtml"],
    );

    register_context(&mut schema, SecurityContext::Style, &["*|style"]);

    register_context(
        &mut schema,
        SecurityContext::Url,
        &[
            "*|formaction",
            "area|href",
            "area|ping",
            "audio|src",
            "a|href",
            "a|ping",
            "blockquote|cite",
            "body|background",
            "del|cite",
            "form|action",
            "img|src",
            "input|src",
            "ins|cite",
            "q|cite",
            "source|src",
            "track|src",
            "video|poster",
            "video|src",
        ],
    );

    register_context(
        &mut schema,
        SecurityContext::ResourceUrl,
        &[
            "applet|code",
            "applet|codebase",
            "base|href",
            "embed|src",
            "frame|src",
            "head|profile",
            "html|manifest",
            "iframe|src",
            "link|href",
            "object|codebase",
            "object|data",
            "script|src",
        ],
    );

    schema
});

fn register_context(
    schema: &mut HashMap<String, SecurityContext>,
    ctx: SecurityContext,
    specs: &[&str],
) {
    for spec in specs {
        schema.insert(spec.to_lowercase(), ctx);
    }
}

/// The security context of binding `name` on `tag`, if it is sensitive.
pub fn security_context(tag: &str, name: &str) -> Option<SecurityContext> {
    let tag = tag.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    SECURITY_SCHEMA
        .get(&format!("{}|{}", tag, name))
        .or_else(|| SECURITY_SCHEMA.get(&format!("*|{}", name)))
        .copied()
}

//! Simple Types
//!
//! A structural, host-independent description of a TypeScript-like type.
//! The type oracle answers queries in this vocabulary; the analyzer never sees
//! host compiler objects.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Coarse classification of a [`SimpleType`], used for quick kind tests.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u32 {
        const ANY = 1;
        const UNKNOWN = 1 << 1;
        const STRING = 1 << 2;
        const NUMBER = 1 << 3;
        const BOOLEAN = 1 << 4;
        const BIGINT = 1 << 5;
        const STRING_LITERAL = 1 << 6;
        const NUMBER_LITERAL = 1 << 7;
        const BOOLEAN_LITERAL = 1 << 8;
        const BIGINT_LITERAL = 1 << 9;
        const ES_SYMBOL = 1 << 10;
        const VOID = 1 << 11;
        const UNDEFINED = 1 << 12;
        const NULL = 1 << 13;
        const NEVER = 1 << 14;
        const OBJECT = 1 << 15;
        const FUNCTION = 1 << 16;
        const ARRAY = 1 << 17;
        const TUPLE = 1 << 18;
        const UNION = 1 << 19;
        const INTERSECTION = 1 << 20;
        const ALIAS = 1 << 21;
        const GENERIC_INSTANCE = 1 << 22;

        const NULLISH = Self::NULL.bits() | Self::UNDEFINED.bits() | Self::VOID.bits();
        const PRIMITIVE = Self::STRING.bits()
            | Self::NUMBER.bits()
            | Self::BOOLEAN.bits()
            | Self::BIGINT.bits()
            | Self::STRING_LITERAL.bits()
            | Self::NUMBER_LITERAL.bits()
            | Self::BOOLEAN_LITERAL.bits()
            | Self::BIGINT_LITERAL.bits()
            | Self::ES_SYMBOL.bits();
    }
}

/// How an object type was declared. Only used for display and name matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Literal,
    Interface,
    Class,
}

/// A named member of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTypeMember {
    pub name: String,
    pub ty: SimpleType,
    pub optional: bool,
}

impl SimpleTypeMember {
    pub fn new(name: impl Into<String>, ty: SimpleType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A parameter of a function type.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTypeParameter {
    pub name: String,
    pub ty: SimpleType,
    pub optional: bool,
    pub rest: bool,
}

impl SimpleTypeParameter {
    pub fn new(name: impl Into<String>, ty: SimpleType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            rest: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimpleType {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    String,
    Number,
    Boolean,
    BigInt,
    EsSymbol,
    StringLiteral(String),
    NumberLiteral(f64),
    BooleanLiteral(bool),
    BigIntLiteral(String),
    Union(Vec<SimpleType>),
    Intersection(Vec<SimpleType>),
    Object {
        name: Option<String>,
        kind: ObjectKind,
        members: Vec<SimpleTypeMember>,
    },
    Function {
        name: Option<String>,
        parameters: Vec<SimpleTypeParameter>,
        return_type: Box<SimpleType>,
    },
    Array(Box<SimpleType>),
    Tuple(Vec<SimpleType>),
    /// A named type alias. Assignability always looks through to `target`.
    Alias {
        name: String,
        target: Box<SimpleType>,
    },
    /// An instantiation of a generic declaration, e.g. `DirectiveResult<typeof X>`.
    GenericInstance {
        name: String,
        type_arguments: Vec<SimpleType>,
        target: Box<SimpleType>,
    },
}

impl SimpleType {
    pub fn string_literal(value: impl Into<String>) -> Self {
        SimpleType::StringLiteral(value.into())
    }

    /// Build a union, flattening nested unions and dropping duplicates.
    /// A union of a single member collapses to that member.
    pub fn union(types: impl IntoIterator<Item = SimpleType>) -> Self {
        let mut flat: Vec<SimpleType> = Vec::new();
        for ty in types {
            match ty {
                SimpleType::Union(inner) => {
                    for member in inner {
                        if !flat.contains(&member) {
                            flat.push(member);
                        }
                    }
                }
                other => {
                    if !flat.contains(&other) {
                        flat.push(other);
                    }
                }
            }
        }
        match flat.len() {
            0 => SimpleType::Never,
            1 => flat.remove(0),
            _ => SimpleType::Union(flat),
        }
    }

    pub fn function(parameters: Vec<SimpleTypeParameter>, return_type: SimpleType) -> Self {
        SimpleType::Function {
            name: None,
            parameters,
            return_type: Box::new(return_type),
        }
    }

    pub fn interface(name: impl Into<String>, members: Vec<SimpleTypeMember>) -> Self {
        SimpleType::Object {
            name: Some(name.into()),
            kind: ObjectKind::Interface,
            members,
        }
    }

    pub fn object_literal(members: Vec<SimpleTypeMember>) -> Self {
        SimpleType::Object {
            name: None,
            kind: ObjectKind::Literal,
            members,
        }
    }

    pub fn alias(name: impl Into<String>, target: SimpleType) -> Self {
        SimpleType::Alias {
            name: name.into(),
            target: Box::new(target),
        }
    }

    /// Strip aliases and generic instantiations down to the structural type.
    pub fn resolved(&self) -> &SimpleType {
        let mut current = self;
        loop {
            match current {
                SimpleType::Alias { target, .. } | SimpleType::GenericInstance { target, .. } => {
                    current = target;
                }
                other => return other,
            }
        }
    }

    /// The declared name of the type, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            SimpleType::Alias { name, .. } | SimpleType::GenericInstance { name, .. } => {
                Some(name.as_str())
            }
            SimpleType::Object { name, .. } | SimpleType::Function { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    pub fn flags(&self) -> TypeFlags {
        match self {
            SimpleType::Any => TypeFlags::ANY,
            SimpleType::Unknown => TypeFlags::UNKNOWN,
            SimpleType::Never => TypeFlags::NEVER,
            SimpleType::Void => TypeFlags::VOID,
            SimpleType::Undefined => TypeFlags::UNDEFINED,
            SimpleType::Null => TypeFlags::NULL,
            SimpleType::String => TypeFlags::STRING,
            SimpleType::Number => TypeFlags::NUMBER,
            SimpleType::Boolean => TypeFlags::BOOLEAN,
            SimpleType::BigInt => TypeFlags::BIGINT,
            SimpleType::EsSymbol => TypeFlags::ES_SYMBOL,
            SimpleType::StringLiteral(_) => TypeFlags::STRING_LITERAL,
            SimpleType::NumberLiteral(_) => TypeFlags::NUMBER_LITERAL,
            SimpleType::BooleanLiteral(_) => TypeFlags::BOOLEAN_LITERAL,
            SimpleType::BigIntLiteral(_) => TypeFlags::BIGINT_LITERAL,
            SimpleType::Union(_) => TypeFlags::UNION,
            SimpleType::Intersection(_) => TypeFlags::INTERSECTION,
            SimpleType::Object { .. } => TypeFlags::OBJECT,
            SimpleType::Function { .. } => TypeFlags::FUNCTION,
            SimpleType::Array(_) => TypeFlags::ARRAY,
            SimpleType::Tuple(_) => TypeFlags::TUPLE,
            SimpleType::Alias { .. } => TypeFlags::ALIAS,
            SimpleType::GenericInstance { .. } => TypeFlags::GENERIC_INSTANCE,
        }
    }

    /// Union of the flags of every member, looking through aliases and unions.
    pub fn deep_flags(&self) -> TypeFlags {
        match self.resolved() {
            SimpleType::Union(types) => types
                .iter()
                .fold(TypeFlags::empty(), |acc, ty| acc | ty.deep_flags()),
            other => other.flags(),
        }
    }

    /// True when the type is `any`, or a union containing `any`.
    pub fn is_any(&self) -> bool {
        self.deep_flags().contains(TypeFlags::ANY)
    }

    pub fn is_any_or_unknown(&self) -> bool {
        self.deep_flags().intersects(TypeFlags::ANY | TypeFlags::UNKNOWN)
    }

    /// True when `null`, `undefined` or `void` is one of the possible values.
    pub fn is_nullable(&self) -> bool {
        self.deep_flags().intersects(TypeFlags::NULLISH)
    }

    /// The members of a union after resolving aliases, or the type itself.
    pub fn union_members(&self) -> Vec<&SimpleType> {
        match self.resolved() {
            SimpleType::Union(types) => types.iter().flat_map(|ty| ty.union_members()).collect(),
            other => vec![other],
        }
    }

    /// Remove `null`, `undefined` and `void` from a union.
    pub fn without_nullish(&self) -> SimpleType {
        let kept: Vec<SimpleType> = self
            .union_members()
            .into_iter()
            .filter(|ty| !ty.flags().intersects(TypeFlags::NULLISH))
            .cloned()
            .collect();
        SimpleType::union(kept)
    }

    /// Look up a member on an object or intersection type.
    pub fn member(&self, name: &str) -> Option<&SimpleTypeMember> {
        match self.resolved() {
            SimpleType::Object { members, .. } => members.iter().find(|m| m.name == name),
            SimpleType::Intersection(types) => types.iter().find_map(|ty| ty.member(name)),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.resolved(), SimpleType::Function { .. })
    }
}

impl fmt::Display for SimpleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleType::Any => write!(f, "any"),
            SimpleType::Unknown => write!(f, "unknown"),
            SimpleType::Never => write!(f, "never"),
            SimpleType::Void => write!(f, "void"),
            SimpleType::Undefined => write!(f, "undefined"),
            SimpleType::Null => write!(f, "null"),
            SimpleType::String => write!(f, "string"),
            SimpleType::Number => write!(f, "number"),
            SimpleType::Boolean => write!(f, "boolean"),
            SimpleType::BigInt => write!(f, "bigint"),
            SimpleType::EsSymbol => write!(f, "symbol"),
            SimpleType::StringLiteral(value) => write!(f, "\"{}\"", value),
            SimpleType::NumberLiteral(value) => write!(f, "{}", format_number(*value)),
            SimpleType::BooleanLiteral(value) => write!(f, "{}", value),
            SimpleType::BigIntLiteral(value) => write!(f, "{}n", value),
            SimpleType::Union(types) => write_joined(f, types, " | "),
            SimpleType::Intersection(types) => write_joined(f, types, " & "),
            SimpleType::Object { name: Some(name), .. } => write!(f, "{}", name),
            SimpleType::Object { name: None, members, .. } => {
                if members.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    let optional = if member.optional { "?" } else { "" };
                    write!(f, "{}{}: {}", member.name, optional, member.ty)?;
                }
                write!(f, " }}")
            }
            SimpleType::Function {
                parameters,
                return_type,
                ..
            } => {
                write!(f, "(")?;
                for (i, param) in parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    let rest = if param.rest { "..." } else { "" };
                    let optional = if param.optional { "?" } else { "" };
                    write!(f, "{}{}{}: {}", rest, param.name, optional, param.ty)?;
                }
                write!(f, ") => {}", return_type)
            }
            SimpleType::Array(element) => match element.as_ref() {
                SimpleType::Union(_) | SimpleType::Function { .. } => write!(f, "({})[]", element),
                _ => write!(f, "{}[]", element),
            },
            SimpleType::Tuple(elements) => {
                write!(f, "[")?;
                write_joined(f, elements, ", ")?;
                write!(f, "]")
            }
            SimpleType::Alias { name, .. } => write!(f, "{}", name),
            SimpleType::GenericInstance {
                name,
                type_arguments,
                ..
            } => {
                write!(f, "{}<", name)?;
                write_joined(f, type_arguments, ", ")?;
                write!(f, ">")
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, types: &[SimpleType], separator: &str) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

/// Format a number the way a JavaScript engine stringifies it (`1`, not `1.0`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

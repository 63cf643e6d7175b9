//! Built-in HTML data decoded from the DOM schema.

use super::dom_schema::{
    property_to_attribute, DomElement, DomNamespace, DomPropertyType, DOM_SCHEMA,
};
use super::html_tag::{HtmlDataCollection, HtmlDataSource, HtmlMember, HtmlMemberKind, HtmlTag};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use ts::{SimpleType, SimpleTypeMember};

/// Plain decoded data; member records are built fresh for every absorb.
static BUILTIN: Lazy<BuiltinCollection> = Lazy::new(build_builtin_collection);

struct BuiltinCollection {
    tags: Vec<(String, Vec<BuiltinMember>)>,
    global: Vec<BuiltinMember>,
}

#[derive(Clone)]
struct BuiltinMember {
    kind: HtmlMemberKind,
    name: String,
    ty: SimpleType,
    primitive_array: bool,
}

impl BuiltinMember {
    fn to_member(&self, source: &HtmlDataSource, tag: Option<&str>) -> HtmlMember {
        let mut member = HtmlMember::new(self.kind, self.name.clone(), source.clone())
            .with_type(self.ty.clone());
        member.primitive_array = self.primitive_array;
        member.from_tag = tag.map(str::to_string);
        member
    }
}

/// A fresh copy of the built-in collection.
pub fn builtin_collection() -> HtmlDataCollection {
    let source = HtmlDataSource::builtin();
    let tags = BUILTIN
        .tags
        .iter()
        .map(|(name, members)| {
            let mut tag = HtmlTag::new(name.clone(), source.clone());
            for member in members {
                tag.add_member(member.to_member(&source, Some(name)));
            }
            tag
        })
        .collect();
    let global = BUILTIN
        .global
        .iter()
        .map(|member| member.to_member(&source, None))
        .collect();

    HtmlDataCollection { tags, global }
}

fn build_builtin_collection() -> BuiltinCollection {
    let global_element = DOM_SCHEMA.html_element().cloned().unwrap_or_default();
    let mut global = element_members(&global_element, |_| true);
    for correction in global_corrections() {
        global.retain(|m| !(m.kind == correction.kind && m.name == correction.name));
        global.push(correction);
    }

    let global_names: HashSet<(HtmlMemberKind, String)> =
        global.iter().map(|m| (m.kind, m.name.clone())).collect();

    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for (name, namespace, element) in DOM_SCHEMA.elements() {
        // `:svg:a` and friends share their name with an HTML element; HTML wins.
        if namespace != DomNamespace::Html && DOM_SCHEMA.entry(name).is_some() {
            continue;
        }
        if !seen.insert(name.to_string()) {
            continue;
        }
        let members = element_members(element, |member| {
            !global_names.contains(&(member.kind, member.name.clone()))
        });
        tags.push((name.to_string(), members));
    }

    tracing::debug!(tags = tags.len(), global = global.len(), "decoded builtin html data");
    BuiltinCollection { tags, global }
}

fn element_members(
    element: &DomElement,
    keep: impl Fn(&BuiltinMember) -> bool,
) -> Vec<BuiltinMember> {
    let mut members = Vec::new();

    for (property, kind) in &element.properties {
        let ty = match kind {
            DomPropertyType::String => SimpleType::String,
            DomPropertyType::Number => SimpleType::Number,
            DomPropertyType::Boolean => SimpleType::Boolean,
            DomPropertyType::Object => SimpleType::Any,
        };
        members.push(BuiltinMember {
            kind: HtmlMemberKind::Property,
            name: property.clone(),
            ty: ty.clone(),
            primitive_array: false,
        });
        if *kind != DomPropertyType::Object {
            members.push(BuiltinMember {
                kind: HtmlMemberKind::Attribute,
                name: property_to_attribute(property),
                ty,
                primitive_array: false,
            });
        }
    }

    for event in &element.events {
        members.push(BuiltinMember {
            kind: HtmlMemberKind::Event,
            name: event.clone(),
            ty: event_type(event),
            primitive_array: false,
        });
    }

    members.retain(|member| keep(member));
    members
}

/// Attributes every element accepts that the property table misses or types
/// too loosely.
fn global_corrections() -> Vec<BuiltinMember> {
    let attribute = |name: &str, ty: SimpleType, primitive_array: bool| BuiltinMember {
        kind: HtmlMemberKind::Attribute,
        name: name.to_string(),
        ty,
        primitive_array,
    };

    let mut corrections = vec![
        attribute("class", SimpleType::String, true),
        attribute("part", SimpleType::String, true),
        attribute("role", SimpleType::String, true),
        attribute("slot", SimpleType::String, false),
        attribute("style", SimpleType::String, false),
        attribute("id", SimpleType::String, false),
        attribute("tabindex", SimpleType::Number, false),
        attribute("exportparts", SimpleType::String, false),
        attribute("is", SimpleType::String, false),
    ];

    // ARIA attributes are reflected by `%aria*` object properties in the table.
    if let Some(element) = DOM_SCHEMA.entry("[element]") {
        for property in element.properties.keys() {
            if let Some(rest) = property.strip_prefix("aria") {
                if rest.ends_with("Element") || rest.ends_with("Elements") {
                    continue;
                }
                let name = format!("aria-{}", rest.to_ascii_lowercase());
                corrections.push(attribute(&name, SimpleType::String, false));
            }
        }
    }

    corrections
}

/// The event object type passed to listeners of a DOM event.
pub fn event_type(event: &str) -> SimpleType {
    let name = match event {
        "click" | "dblclick" | "auxclick" | "contextmenu" | "mousedown" | "mouseup"
        | "mouseenter" | "mouseleave" | "mousemove" | "mouseout" | "mouseover" => "MouseEvent",
        "keydown" | "keypress" | "keyup" => "KeyboardEvent",
        "focus" | "blur" => "FocusEvent",
        "input" | "beforeinput" => "InputEvent",
        "wheel" | "mousewheel" => "WheelEvent",
        "drag" | "dragend" | "dragenter" | "dragleave" | "dragover" | "dragstart" | "drop" => {
            "DragEvent"
        }
        "copy" | "cut" | "paste" => "ClipboardEvent",
        "animationend" | "animationiteration" | "animationstart" => "AnimationEvent",
        "transitioncancel" | "transitionend" | "transitionrun" | "transitionstart" => {
            "TransitionEvent"
        }
        name if name.starts_with("pointer") || name.ends_with("pointercapture") => "PointerEvent",
        _ => "Event",
    };
    SimpleType::interface(name, vec![SimpleTypeMember::new("type", SimpleType::String)])
}

//! Rules over component declarations rather than template markup.

use super::{RuleContext, RuleHooks, RuleMeta, RuleModule, RuleReport};
use crate::config::Severity;
use crate::context::discovery::ComponentDefinition;
use crate::parse_util::Range;
use once_cell::sync::Lazy;
use regex::Regex;

/// `PotentialCustomElementName` from the HTML standard.
static CUSTOM_ELEMENT_NAME: Lazy<Regex> = Lazy::new(|| {
    let pcen_char = r"[-._0-9a-z\x{B7}\x{C0}-\x{D6}\x{D8}-\x{F6}\x{F8}-\x{37D}\x{37F}-\x{1FFF}\x{200C}-\x{200D}\x{203F}-\x{2040}\x{2070}-\x{218F}\x{2C00}-\x{2FEF}\x{3001}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFFD}\x{10000}-\x{EFFFF}]";
    Regex::new(&format!("^[a-z]{pcen_char}*-{pcen_char}*$")).unwrap()
});

const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

pub fn is_valid_custom_element_name(name: &str) -> bool {
    CUSTOM_ELEMENT_NAME.is_match(name) && !RESERVED_NAMES.contains(&name)
}

pub struct NoInvalidTagName;

impl RuleModule for NoInvalidTagName {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("no-invalid-tag-name", Severity::Error, Severity::Error, RuleHooks::MEMBER)
    }

    fn visit_component(
        &self,
        definition: &ComponentDefinition,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        let name = definition.tag_name.as_str();
        if is_valid_custom_element_name(name) {
            return Ok(());
        }

        let reason = if RESERVED_NAMES.contains(&name) {
            "it is reserved by the HTML standard"
        } else if !name.contains('-') {
            "custom element names must contain a hyphen"
        } else {
            "custom element names must start with a lowercase ASCII letter and contain no uppercase letters or spaces"
        };
        let location = definition.tag_name_range.unwrap_or(Range::empty(0));
        ctx.report(
            RuleReport::new(format!("'{}' is not a valid custom element name: {}.", name, reason), location)
                .suggestion("See https://html.spec.whatwg.org/multipage/custom-elements.html#valid-custom-element-name"),
        );
        Ok(())
    }
}

//! User-provided HTML data.
//!
//! Reads the editor custom-data format (`{ "version", "tags", "globalAttributes",
//! "valueSets" }`) plus the `globalTags`, `globalAttributes` and `globalEvents`
//! configuration lists into one User collection.

use super::html_tag::{HtmlDataCollection, HtmlDataSource, HtmlMember, HtmlMemberKind, HtmlTag};
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use serde::Deserialize;
use ts::SimpleType;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomHtmlData {
    pub version: Option<f64>,
    pub tags: Vec<CustomTag>,
    pub global_attributes: Vec<CustomAttribute>,
    pub value_sets: Vec<CustomValueSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomTag {
    pub name: String,
    pub description: Option<serde_json::Value>,
    pub attributes: Vec<CustomAttribute>,
    pub properties: Vec<CustomNamedItem>,
    pub events: Vec<CustomNamedItem>,
    pub slots: Vec<CustomNamedItem>,
    pub css_parts: Vec<CustomNamedItem>,
    pub css_properties: Vec<CustomNamedItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomAttribute {
    pub name: String,
    pub description: Option<serde_json::Value>,
    pub values: Vec<CustomValue>,
    pub value_set: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomValue {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomValueSet {
    pub name: String,
    pub values: Vec<CustomValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomNamedItem {
    pub name: String,
    pub description: Option<serde_json::Value>,
}

/// The value set name marking a valueless (boolean) attribute.
const VOID_VALUE_SET: &str = "v";

/// Build the User collection from configuration. Malformed custom data
/// entries are logged and skipped.
pub fn user_collection(config: &AnalyzerConfig) -> HtmlDataCollection {
    let source = HtmlDataSource::user();
    let mut collection = HtmlDataCollection::default();

    for value in &config.custom_html_data {
        match parse_custom_data(value) {
            Ok(data) => merge_custom_data(&mut collection, &data, &source),
            Err(err) => tracing::warn!(error = %err, "ignoring custom html data"),
        }
    }

    for tag in &config.global_tags {
        if !collection.tags.iter().any(|t| t.name.eq_ignore_ascii_case(tag)) {
            collection.tags.push(HtmlTag::new(tag.as_str(), source.clone()));
        }
    }
    for attribute in &config.global_attributes {
        collection.global.push(
            HtmlMember::new(HtmlMemberKind::Attribute, attribute.to_ascii_lowercase(), source.clone())
                .with_type(SimpleType::Any),
        );
    }
    for event in &config.global_events {
        collection.global.push(
            HtmlMember::new(HtmlMemberKind::Event, event.as_str(), source.clone())
                .with_type(SimpleType::Any),
        );
    }

    collection
}

/// One `customHtmlData` entry: an object in the custom-data format, or a
/// string holding the same JSON.
pub fn parse_custom_data(value: &serde_json::Value) -> Result<CustomHtmlData> {
    let data = match value {
        serde_json::Value::String(text) => serde_json::from_str(text)?,
        other => CustomHtmlData::deserialize(other)?,
    };
    validate(&data)?;
    Ok(data)
}

fn validate(data: &CustomHtmlData) -> Result<()> {
    if let Some(tag) = data.tags.iter().find(|tag| tag.name.trim().is_empty()) {
        return Err(AnalyzerError::MalformedSchema {
            origin: "customHtmlData".to_string(),
            message: format!("tag without a name ({} attributes)", tag.attributes.len()),
        });
    }
    Ok(())
}

fn merge_custom_data(
    collection: &mut HtmlDataCollection,
    data: &CustomHtmlData,
    source: &HtmlDataSource,
) {
    for custom in &data.tags {
        let mut tag = HtmlTag::new(custom.name.as_str(), source.clone());
        tag.description = custom.description.as_ref().and_then(description_text);

        for attribute in &custom.attributes {
            tag.add_member(attribute_member(attribute, data, source).from_tag(tag.name.clone()));
        }
        let items = [
            (HtmlMemberKind::Property, &custom.properties),
            (HtmlMemberKind::Event, &custom.events),
            (HtmlMemberKind::Slot, &custom.slots),
            (HtmlMemberKind::CssPart, &custom.css_parts),
            (HtmlMemberKind::CssProperty, &custom.css_properties),
        ];
        for (kind, items) in items {
            for item in items {
                let mut member = HtmlMember::new(kind, item.name.as_str(), source.clone())
                    .from_tag(tag.name.clone());
                if kind != HtmlMemberKind::Slot {
                    member = member.with_type(SimpleType::Any);
                }
                member.description = item.description.as_ref().and_then(description_text);
                tag.add_member(member);
            }
        }
        collection.tags.push(tag);
    }

    for attribute in &data.global_attributes {
        collection.global.push(attribute_member(attribute, data, source));
    }
}

fn attribute_member(
    attribute: &CustomAttribute,
    data: &CustomHtmlData,
    source: &HtmlDataSource,
) -> HtmlMember {
    let mut member = HtmlMember::new(
        HtmlMemberKind::Attribute,
        attribute.name.to_ascii_lowercase(),
        source.clone(),
    )
    .with_type(attribute_type(attribute, data));
    member.description = attribute.description.as_ref().and_then(description_text);
    member
}

/// `valueSet: "v"` is a boolean attribute; enumerated values become a union
/// of string literals; anything else is a string.
fn attribute_type(attribute: &CustomAttribute, data: &CustomHtmlData) -> SimpleType {
    let mut values: Vec<&CustomValue> = attribute.values.iter().collect();
    match attribute.value_set.as_deref() {
        Some(VOID_VALUE_SET) => return SimpleType::Boolean,
        Some(set) => {
            if let Some(value_set) = data.value_sets.iter().find(|vs| vs.name == set) {
                values.extend(value_set.values.iter());
            }
        }
        None => {}
    }

    if values.is_empty() {
        return SimpleType::String;
    }
    SimpleType::union(
        values
            .into_iter()
            .map(|value| SimpleType::string_literal(value.name.clone())),
    )
}

/// Descriptions are either a plain string or `{ kind, value }` markup content.
fn description_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Object(map) => map
            .get("value")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    }
}

//! iCalendar serializer (RFC 5545).
//!
//! Properties are written in a canonical order per component kind so the
//! same calendar always renders to the same bytes. Child components keep
//! their insertion order.

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::rfc::ical::core::{Component, ICalendar, Parameter, Property, Value};

const PARAM_ORDER: &[&str] = &["VALUE", "TZID"];

/// Serializes an iCalendar document to a string.
#[must_use]
pub fn serialize(ical: &ICalendar) -> String {
    serialize_component(&ical.root)
}

/// Serializes a component and its children to a string.
#[must_use]
pub fn serialize_component(component: &Component) -> String {
    let mut result = fold_line(&format!("BEGIN:{}", component.kind));

    let order = component.kind.property_order();
    for prop in ordered_by_name(&component.properties, order, |p| p.name.as_str()) {
        result.push_str(&serialize_property(prop));
    }

    for child in &component.children {
        result.push_str(&serialize_component(child));
    }

    result.push_str(&fold_line(&format!("END:{}", component.kind)));
    result
}

/// Serializes a property to a folded content line.
#[must_use]
pub fn serialize_property(prop: &Property) -> String {
    let mut line = prop.name.clone();

    for param in ordered_by_name(&prop.params, PARAM_ORDER, |p| p.name.as_str()) {
        line.push(';');
        line.push_str(&serialize_parameter(param));
    }

    line.push(':');
    line.push_str(&serialize_value(&prop.value, &prop.raw_value));

    fold_line(&line)
}

fn serialize_parameter(param: &Parameter) -> String {
    let values: Vec<String> = param
        .values
        .iter()
        .map(|v| escape_param_value(v.as_str()))
        .collect();
    format!("{}={}", param.name, values.join(","))
}

/// TEXT is escaped; every other value type is already in wire form.
fn serialize_value(value: &Value, raw_value: &str) -> String {
    match value {
        Value::Text(s) => escape_text(s),
        _ => raw_value.to_string(),
    }
}

/// Returns `items` with the names in `order` first, remaining items after in original order.
fn ordered_by_name<'a, T>(items: &'a [T], order: &[&str], name: impl Fn(&T) -> &str) -> Vec<&'a T> {
    let mut ordered: Vec<&T> = Vec::with_capacity(items.len());

    for &wanted in order {
        ordered.extend(items.iter().filter(|item| name(item).eq_ignore_ascii_case(wanted)));
    }
    ordered.extend(
        items
            .iter()
            .filter(|item| !order.iter().any(|n| name(item).eq_ignore_ascii_case(n))),
    );

    ordered
}

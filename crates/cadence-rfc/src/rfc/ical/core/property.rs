//! Content-line properties (RFC 5545 §3.8).

use super::{DateTime, Parameter, RRule, Value};
use crate::error::{RfcError, RfcResult};

/// One property: uppercase name, parameters, typed value and its wire text.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    /// Parameters in insertion order.
    pub params: Vec<Parameter>,
    pub value: Value,
    /// Value as written on the wire, before text escaping.
    pub raw_value: String,
}

impl Property {
    fn build(name: impl Into<String>, params: Vec<Parameter>, value: Value, raw_value: String) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            value,
            raw_value,
        }
    }

    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let text = value.into();
        Self::build(name, Vec::new(), Value::Text(text.clone()), text)
    }

    /// Date-time property. Zoned values get a `TZID` parameter.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: DateTime) -> Self {
        let params = dt.tzid().map(Parameter::tzid).into_iter().collect();
        let raw = dt.to_string();
        Self::build(name, params, Value::DateTime(dt), raw)
    }

    /// ## Summary
    /// `RRULE` property for `rrule`.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` if the rule has no `FREQ`.
    pub fn recur(rrule: RRule) -> RfcResult<Self> {
        if rrule.freq.is_none() {
            return Err(RfcError::ValidationError("RRULE requires FREQ".to_string()));
        }
        let raw = rrule.to_string();
        Ok(Self::build("RRULE", Vec::new(), Value::Recur(Box::new(rrule)), raw))
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))?
            .value()
    }

    pub fn add_param(&mut self, param: Parameter) {
        self.params.push(param);
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}

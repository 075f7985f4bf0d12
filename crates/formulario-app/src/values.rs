// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::schema::{FieldKind, FormDefinition};

/// One raw input value as typed by the user. Text fields carry whatever the
/// input box holds; flags mirror a checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Text(_) => None,
            Self::Flag(value) => Some(*value),
        }
    }
}

/// Current user-entered values for one form instance, keyed by field name.
/// Created from a definition's defaults and reset to them after a successful
/// submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    by_field: BTreeMap<String, FieldValue>,
}

impl FormValues {
    pub fn defaults_for(definition: &FormDefinition) -> Self {
        let mut by_field = BTreeMap::new();
        for field in &definition.fields {
            let value = match field.kind {
                FieldKind::Text => FieldValue::Text(String::new()),
                FieldKind::Flag => FieldValue::Flag(false),
            };
            by_field.insert(field.name.clone(), value);
        }
        Self { by_field }
    }

    /// Replaces a text field's value. Returns false (and changes nothing) for
    /// unknown fields and for flag fields.
    pub fn set_text(&mut self, field: &str, value: &str) -> bool {
        match self.by_field.get_mut(field) {
            Some(FieldValue::Text(current)) => {
                *current = value.to_owned();
                true
            }
            _ => false,
        }
    }

    /// Replaces a flag field's value. Returns false (and changes nothing) for
    /// unknown fields and for text fields.
    pub fn set_flag(&mut self, field: &str, value: bool) -> bool {
        match self.by_field.get_mut(field) {
            Some(FieldValue::Flag(current)) => {
                *current = value;
                true
            }
            _ => false,
        }
    }

    pub fn text(&self, field: &str) -> &str {
        self.by_field
            .get(field)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }

    pub fn flag(&self, field: &str) -> bool {
        self.by_field
            .get(field)
            .and_then(FieldValue::as_flag)
            .unwrap_or_default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.by_field.get(field)
    }

    pub fn reset(&mut self, definition: &FormDefinition) {
        *self = Self::defaults_for(definition);
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::values::FormValues;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
}

/// Declarative constraints checked against raw input. Length rules count
/// characters, not bytes. Format rules (`Email`, `Digits`) are skipped for
/// empty text so optional fields stay optional; pair them with `Required`
/// when the field must be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    Digits,
    MustAccept,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub wire_name: String,
    pub label: String,
    pub kind: FieldKind,
    pub rules: Vec<FieldRule>,
}

impl FieldSpec {
    pub fn text(name: &str, wire_name: &str, label: &str, rules: Vec<FieldRule>) -> Self {
        Self {
            name: name.to_owned(),
            wire_name: wire_name.to_owned(),
            label: label.to_owned(),
            kind: FieldKind::Text,
            rules,
        }
    }

    pub fn flag(name: &str, wire_name: &str, label: &str, rules: Vec<FieldRule>) -> Self {
        Self {
            name: name.to_owned(),
            wire_name: wire_name.to_owned(),
            label: label.to_owned(),
            kind: FieldKind::Flag,
            rules,
        }
    }

    /// Checks this field against the current values. Returns the first
    /// failing rule's message so the presentation layer shows one issue per
    /// field at a time.
    pub fn check(&self, values: &FormValues) -> Option<String> {
        match self.kind {
            FieldKind::Text => self.check_text(values.text(&self.name)),
            FieldKind::Flag => self.check_flag(values.flag(&self.name)),
        }
    }

    fn check_text(&self, value: &str) -> Option<String> {
        for rule in &self.rules {
            match rule {
                FieldRule::Required if value.trim().is_empty() => {
                    return Some(format!(
                        "{} is required -- enter a value and retry",
                        self.label
                    ));
                }
                FieldRule::MinLength(min) if value.chars().count() < *min => {
                    return Some(format!(
                        "{} must have at least {min} characters",
                        self.label
                    ));
                }
                FieldRule::MaxLength(max) if value.chars().count() > *max => {
                    return Some(format!("{} cannot exceed {max} characters", self.label));
                }
                FieldRule::Email if !value.is_empty() && !is_well_formed_email(value) => {
                    return Some(format!("{} must be a valid email address", self.label));
                }
                FieldRule::Digits
                    if !value.is_empty()
                        && !value.chars().all(|ch| ch.is_ascii_digit()) =>
                {
                    return Some(format!("{} must contain digits only", self.label));
                }
                _ => {}
            }
        }
        None
    }

    fn check_flag(&self, value: bool) -> Option<String> {
        for rule in &self.rules {
            if matches!(rule, FieldRule::MustAccept) && !value {
                return Some(format!(
                    "{} must be accepted before submitting",
                    self.label
                ));
            }
        }
        None
    }
}

/// One parameterized form: field list, constraints, and wire mapping. The
/// built-in definitions cover the two variants this crate replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefinition {
    pub name: String,
    pub submit_path: String,
    pub fields: Vec<FieldSpec>,
}

impl FormDefinition {
    /// The document form: a title and a body, submitted to the documents
    /// backend for category prediction.
    pub fn document() -> Self {
        Self {
            name: "document".to_owned(),
            submit_path: "/documents".to_owned(),
            fields: vec![
                FieldSpec::text(
                    "titulo",
                    "title",
                    "Title",
                    vec![FieldRule::MinLength(5), FieldRule::MaxLength(100)],
                ),
                FieldSpec::text(
                    "texto",
                    "content",
                    "Body",
                    vec![FieldRule::MinLength(20), FieldRule::MaxLength(1000)],
                ),
            ],
        }
    }

    /// The contact form: no real backend, normally paired with the simulated
    /// transport.
    pub fn contact() -> Self {
        Self {
            name: "contact".to_owned(),
            submit_path: "/contact".to_owned(),
            fields: vec![
                FieldSpec::text(
                    "nombre",
                    "name",
                    "Name",
                    vec![
                        FieldRule::Required,
                        FieldRule::MinLength(3),
                        FieldRule::MaxLength(80),
                    ],
                ),
                FieldSpec::text(
                    "correo",
                    "email",
                    "Email",
                    vec![FieldRule::Required, FieldRule::Email],
                ),
                FieldSpec::text(
                    "telefono",
                    "phone",
                    "Phone",
                    vec![FieldRule::Digits, FieldRule::MaxLength(15)],
                ),
                FieldSpec::text(
                    "mensaje",
                    "message",
                    "Message",
                    vec![FieldRule::MinLength(10), FieldRule::MaxLength(500)],
                ),
                FieldSpec::flag(
                    "acepta_terminos",
                    "accepted_terms",
                    "Terms",
                    vec![FieldRule::MustAccept],
                ),
            ],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Full validation pass: every field checked, failures keyed by field
    /// name. Empty result means the form may be submitted.
    pub fn validate(&self, values: &FormValues) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for field in &self.fields {
            if let Some(message) = field.check(values) {
                errors.insert(field.name.clone(), message);
            }
        }
        errors
    }
}

/// Per-field validation failure messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    by_field: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.by_field.insert(field.into(), message.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.by_field.remove(field)
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.by_field.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn clear(&mut self) {
        self.by_field.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.by_field.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_field
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

fn is_well_formed_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
}

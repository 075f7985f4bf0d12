// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{ResponseRecord, SubmissionState};
use crate::schema::{FormDefinition, ValidationErrors};
use crate::values::FormValues;

/// Notifications for the presentation layer, emitted by every state
/// transition so it can re-render exactly what changed.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    FieldEdited(String),
    FieldErrorSet { field: String, message: String },
    FieldErrorCleared(String),
    SubmissionStateChanged(SubmissionState),
    SubmissionRejected { error_count: usize },
    ResponseReceived(ResponseRecord),
    FailureReported(String),
    FormReset,
}

/// One form instance: values, per-field errors, and the submission
/// lifecycle. The presentation layer mutates it through `edit_*` and reads
/// it back through the accessors; the submission controller drives
/// `begin_submit`/`complete_*` around the wire call.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    definition: FormDefinition,
    values: FormValues,
    errors: ValidationErrors,
    submission: SubmissionState,
    response: Option<ResponseRecord>,
    failure: Option<String>,
}

impl FormState {
    pub fn new(definition: FormDefinition) -> Self {
        let values = FormValues::defaults_for(&definition);
        Self {
            definition,
            values,
            errors: ValidationErrors::default(),
            submission: SubmissionState::Idle,
            response: None,
            failure: None,
        }
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn response(&self) -> Option<&ResponseRecord> {
        self.response.as_ref()
    }

    pub fn failure_message(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn edit_text(&mut self, field: &str, value: &str) -> Vec<FormEvent> {
        if !self.values.set_text(field, value) {
            return Vec::new();
        }
        let mut events = vec![FormEvent::FieldEdited(field.to_owned())];
        self.leave_terminal_state(&mut events);
        self.recheck_field(field, &mut events);
        events
    }

    pub fn edit_flag(&mut self, field: &str, value: bool) -> Vec<FormEvent> {
        if !self.values.set_flag(field, value) {
            return Vec::new();
        }
        let mut events = vec![FormEvent::FieldEdited(field.to_owned())];
        self.leave_terminal_state(&mut events);
        self.recheck_field(field, &mut events);
        events
    }

    /// Gate for the submission controller. Runs the full validation pass;
    /// on failure the per-field errors are recorded and the state stays
    /// `Idle` with no wire activity. A submit while not `Idle` is ignored,
    /// so a double-click cannot put two requests in flight.
    pub fn begin_submit(&mut self) -> Vec<FormEvent> {
        if !self.submission.accepts_submit() {
            return Vec::new();
        }

        let fresh = self.definition.validate(&self.values);
        let mut events = Vec::new();
        self.apply_errors(fresh, &mut events);

        if !self.errors.is_empty() {
            events.push(FormEvent::SubmissionRejected {
                error_count: self.errors.len(),
            });
            return events;
        }

        self.submission = SubmissionState::Submitting;
        events.push(FormEvent::SubmissionStateChanged(self.submission));
        events
    }

    /// Applied by the controller after the wire call resolves. Values reset
    /// to defaults only here, after the success is confirmed.
    pub fn complete_success(&mut self, record: ResponseRecord) -> Vec<FormEvent> {
        if self.submission != SubmissionState::Submitting {
            return Vec::new();
        }
        self.submission = SubmissionState::Succeeded;
        self.failure = None;
        self.response = Some(record.clone());
        self.values.reset(&self.definition);
        vec![
            FormEvent::SubmissionStateChanged(SubmissionState::Succeeded),
            FormEvent::ResponseReceived(record),
        ]
    }

    pub fn complete_failure(&mut self, message: impl Into<String>) -> Vec<FormEvent> {
        if self.submission != SubmissionState::Submitting {
            return Vec::new();
        }
        let message = message.into();
        self.submission = SubmissionState::Failed;
        self.failure = Some(message.clone());
        vec![
            FormEvent::SubmissionStateChanged(SubmissionState::Failed),
            FormEvent::FailureReported(message),
        ]
    }

    /// The "timed reset" hook: back to defaults and `Idle` from any state.
    pub fn reset(&mut self) -> Vec<FormEvent> {
        self.values.reset(&self.definition);
        self.errors.clear();
        self.response = None;
        self.failure = None;
        let mut events = vec![FormEvent::FormReset];
        if self.submission != SubmissionState::Idle {
            self.submission = SubmissionState::Idle;
            events.push(FormEvent::SubmissionStateChanged(SubmissionState::Idle));
        }
        events
    }

    fn leave_terminal_state(&mut self, events: &mut Vec<FormEvent>) {
        if self.submission.is_terminal() {
            self.submission = SubmissionState::Idle;
            self.response = None;
            self.failure = None;
            events.push(FormEvent::SubmissionStateChanged(SubmissionState::Idle));
        }
    }

    // Re-checks only the edited field, and only once a validation pass has
    // flagged it: errors clear field-by-field as corrected, while untouched
    // fields stay quiet until the user actually submits.
    fn recheck_field(&mut self, field: &str, events: &mut Vec<FormEvent>) {
        if self.errors.message_for(field).is_none() {
            return;
        }
        let Some(spec) = self.definition.field(field) else {
            return;
        };
        match spec.check(&self.values) {
            Some(message) => {
                if self.errors.message_for(field) != Some(message.as_str()) {
                    self.errors.insert(field, message.clone());
                    events.push(FormEvent::FieldErrorSet {
                        field: field.to_owned(),
                        message,
                    });
                }
            }
            None => {
                self.errors.remove(field);
                events.push(FormEvent::FieldErrorCleared(field.to_owned()));
            }
        }
    }

    fn apply_errors(&mut self, fresh: ValidationErrors, events: &mut Vec<FormEvent>) {
        let stale: Vec<String> = self
            .errors
            .fields()
            .filter(|field| fresh.message_for(field).is_none())
            .map(str::to_owned)
            .collect();
        for field in stale {
            self.errors.remove(&field);
            events.push(FormEvent::FieldErrorCleared(field));
        }
        for (field, message) in fresh.iter() {
            if self.errors.message_for(field) != Some(message) {
                self.errors.insert(field, message);
                events.push(FormEvent::FieldErrorSet {
                    field: field.to_owned(),
                    message: message.to_owned(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FormEvent, FormState};
    use crate::model::{RecordId, ResponseRecord, SubmissionState};
    use crate::schema::FormDefinition;
    use crate::values::FormValues;

    fn filled_document_state() -> FormState {
        let mut state = FormState::new(FormDefinition::document());
        state.edit_text("titulo", "Informe anual");
        state.edit_text("texto", "Ingresos y gastos del segundo trimestre.");
        state
    }

    fn sample_record() -> ResponseRecord {
        ResponseRecord {
            id: RecordId::Number(1),
            title: "T".to_owned(),
            category: "C".to_owned(),
        }
    }

    #[test]
    fn begin_submit_with_valid_values_enters_submitting() {
        let mut state = filled_document_state();

        let events = state.begin_submit();
        assert_eq!(state.submission(), SubmissionState::Submitting);
        assert_eq!(
            events,
            vec![FormEvent::SubmissionStateChanged(SubmissionState::Submitting)],
        );
    }

    #[test]
    fn begin_submit_with_invalid_values_records_errors_and_stays_idle() {
        let mut state = FormState::new(FormDefinition::document());

        let events = state.begin_submit();
        assert_eq!(state.submission(), SubmissionState::Idle);
        assert_eq!(state.errors().len(), 2);
        assert!(events.contains(&FormEvent::SubmissionRejected { error_count: 2 }));
    }

    #[test]
    fn begin_submit_is_ignored_outside_idle() {
        let mut state = filled_document_state();
        state.begin_submit();

        assert!(state.begin_submit().is_empty());
        assert_eq!(state.submission(), SubmissionState::Submitting);
    }

    #[test]
    fn correcting_a_field_clears_only_its_error() {
        let mut state = FormState::new(FormDefinition::document());
        state.begin_submit();
        assert_eq!(state.errors().len(), 2);

        let events = state.edit_text("titulo", "Informe anual");
        assert!(events.contains(&FormEvent::FieldErrorCleared("titulo".to_owned())));
        assert!(state.errors().message_for("titulo").is_none());
        assert!(state.errors().message_for("texto").is_some());
    }

    #[test]
    fn editing_an_unflagged_field_stays_quiet() {
        let mut state = FormState::new(FormDefinition::document());

        let events = state.edit_text("titulo", "Hi");
        assert_eq!(events, vec![FormEvent::FieldEdited("titulo".to_owned())]);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn editing_a_still_invalid_field_updates_its_message() {
        let mut state = FormState::new(FormDefinition::document());
        state.begin_submit();
        let before = state.errors().message_for("titulo").map(str::to_owned);

        state.edit_text("titulo", "x".repeat(101).as_str());
        let after = state.errors().message_for("titulo").map(str::to_owned);
        assert_ne!(before, after);
        assert!(after.expect("titulo should still fail").contains("exceed"));
    }

    #[test]
    fn success_resets_values_and_keeps_record_for_display() {
        let mut state = filled_document_state();
        state.begin_submit();

        let events = state.complete_success(sample_record());
        assert_eq!(state.submission(), SubmissionState::Succeeded);
        assert_eq!(state.response(), Some(&sample_record()));
        assert_eq!(
            state.values(),
            &FormValues::defaults_for(&FormDefinition::document()),
        );
        assert!(events.contains(&FormEvent::ResponseReceived(sample_record())));
    }

    #[test]
    fn failure_keeps_values_for_manual_retry() {
        let mut state = filled_document_state();
        state.begin_submit();

        state.complete_failure("bad");
        assert_eq!(state.submission(), SubmissionState::Failed);
        assert_eq!(state.failure_message(), Some("bad"));
        assert_eq!(state.values().text("titulo"), "Informe anual");
    }

    #[test]
    fn completions_are_ignored_outside_submitting() {
        let mut state = filled_document_state();

        assert!(state.complete_success(sample_record()).is_empty());
        assert!(state.complete_failure("late").is_empty());
        assert_eq!(state.submission(), SubmissionState::Idle);
    }

    #[test]
    fn next_edit_leaves_terminal_states() {
        let mut state = filled_document_state();
        state.begin_submit();
        state.complete_failure("bad");

        let events = state.edit_text("titulo", "Informe corregido");
        assert_eq!(state.submission(), SubmissionState::Idle);
        assert_eq!(state.failure_message(), None);
        assert!(events.contains(&FormEvent::SubmissionStateChanged(SubmissionState::Idle)));

        state.begin_submit();
        state.complete_success(sample_record());
        state.edit_text("titulo", "Otro informe");
        assert_eq!(state.submission(), SubmissionState::Idle);
        assert_eq!(state.response(), None);
    }

    #[test]
    fn reset_restores_a_pristine_form() {
        let mut state = filled_document_state();
        state.begin_submit();
        state.complete_failure("bad");

        let events = state.reset();
        assert_eq!(state.submission(), SubmissionState::Idle);
        assert!(state.errors().is_empty());
        assert_eq!(state.failure_message(), None);
        assert_eq!(
            state.values(),
            &FormValues::defaults_for(&FormDefinition::document()),
        );
        assert!(events.contains(&FormEvent::FormReset));
    }
}

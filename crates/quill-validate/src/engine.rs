//! Pure validation of draft values against a [`RuleSet`].

use std::collections::BTreeMap;

use quill_model::{DraftPatch, DraftRecord, Field};

use crate::ErrorMap;
use crate::rules::RuleSet;

/// Read access to field values, whole or partial.
///
/// A field that is absent validates as an empty string.
pub trait FieldValues {
    fn value(&self, field: Field) -> Option<&str>;
}

impl FieldValues for DraftRecord {
    fn value(&self, field: Field) -> Option<&str> {
        Some(self.get(field))
    }
}

impl FieldValues for DraftPatch {
    fn value(&self, field: Field) -> Option<&str> {
        self.get(field)
    }
}

/// Validate the fields governed by `step`.
///
/// Fields the step has no rule for are ignored. A step index with no
/// definition yields an empty map.
pub fn validate(rules: &RuleSet, step: usize, values: &impl FieldValues) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let Some(definition) = rules.step(step) else {
        return errors;
    };
    for (field, rule) in definition.rules() {
        let raw = values.value(field).unwrap_or_default();
        if let Some(message) = rule.check(field, raw) {
            errors.insert(field, message);
        }
    }
    tracing::debug!(step, error_count = errors.len(), "validated step");
    errors
}

/// Result of validating every step against a complete record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormCheck {
    /// Error maps of the failing steps only.
    pub step_errors: BTreeMap<usize, ErrorMap>,
}

impl FormCheck {
    pub fn is_valid(&self) -> bool {
        self.step_errors.is_empty()
    }

    /// Earliest step with at least one error.
    pub fn first_invalid_step(&self) -> Option<usize> {
        self.step_errors.keys().next().copied()
    }

    pub fn errors_for(&self, step: usize) -> Option<&ErrorMap> {
        self.step_errors.get(&step)
    }

    /// Total number of field errors across all steps.
    pub fn error_count(&self) -> usize {
        self.step_errors.values().map(ErrorMap::len).sum()
    }
}

/// Validate every step of `rules` against the same values.
pub fn validate_all(rules: &RuleSet, values: &impl FieldValues) -> FormCheck {
    let step_errors = rules
        .steps()
        .map(|step| (step.index(), validate(rules, step.index(), values)))
        .filter(|(_, errors)| !errors.is_empty())
        .collect();
    FormCheck { step_errors }
}

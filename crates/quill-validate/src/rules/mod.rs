//! Declarative validation rules grouped by wizard step.

mod blog;

use std::ops::RangeInclusive;

use regex::Regex;

use quill_model::Field;

/// Inclusive bounds on the number of characters in a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        self.range().contains(&len)
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

/// Rule attached to one field.
///
/// A value is trimmed before it is checked. An empty value fails only when the
/// rule is `required`; a non-empty value must satisfy both the length bounds
/// and the pattern, otherwise `message` is reported.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    pub required: bool,
    pub pattern: Option<Regex>,
    pub length: Option<LengthBounds>,
    pub message: String,
}

impl ValidationRule {
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: true,
            pattern: None,
            length: None,
            message: message.into(),
        }
    }

    pub fn optional(message: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(message)
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    #[must_use]
    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.length = Some(LengthBounds::new(min, max));
        self
    }

    /// Check a raw value, returning the message to show if it is invalid.
    pub fn check(&self, field: Field, raw: &str) -> Option<String> {
        let value = raw.trim();
        if value.is_empty() {
            return self
                .required
                .then(|| format!("{} is required", field.label()));
        }
        if let Some(bounds) = self.length
            && !bounds.contains(value.chars().count())
        {
            return Some(self.message.clone());
        }
        if let Some(pattern) = &self.pattern
            && !pattern.is_match(value)
        {
            return Some(self.message.clone());
        }
        None
    }
}

/// The fields governed by one step and their rules.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    index: usize,
    rules: Vec<(Field, ValidationRule)>,
}

impl StepDefinition {
    /// Create an empty step. Step indices are 1-based.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            rules: Vec::new(),
        }
    }

    /// Attach a rule. A second rule for the same field replaces the first.
    #[must_use]
    pub fn rule(mut self, field: Field, rule: ValidationRule) -> Self {
        self.rules.retain(|(existing, _)| *existing != field);
        self.rules.push((field, rule));
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn governs(&self, field: Field) -> bool {
        self.rules.iter().any(|(f, _)| *f == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules.iter().map(|(field, _)| *field)
    }

    pub fn rule_for(&self, field: Field) -> Option<&ValidationRule> {
        self.rules
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, rule)| rule)
    }

    pub fn rules(&self) -> impl Iterator<Item = (Field, &ValidationRule)> + '_ {
        self.rules.iter().map(|(field, rule)| (*field, rule))
    }

    /// Fields whose rule is `required`.
    pub fn required_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules
            .iter()
            .filter(|(_, rule)| rule.required)
            .map(|(field, _)| *field)
    }
}

/// The full, static set of step definitions for a form.
#[derive(Debug, Clone)]
pub struct RuleSet {
    steps: Vec<StepDefinition>,
}

impl RuleSet {
    /// Build a rule set. Steps are ordered by index.
    pub fn new(mut steps: Vec<StepDefinition>) -> Self {
        steps.sort_by_key(StepDefinition::index);
        Self { steps }
    }

    pub fn step(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.index == index)
    }

    pub fn steps(&self) -> impl Iterator<Item = &StepDefinition> + '_ {
        self.steps.iter()
    }

    /// Number of steps (the highest step index).
    pub fn step_count(&self) -> usize {
        self.steps.last().map_or(0, StepDefinition::index)
    }

    /// Step that governs `field`, if any.
    pub fn step_for(&self, field: Field) -> Option<usize> {
        self.steps
            .iter()
            .find(|step| step.governs(field))
            .map(StepDefinition::index)
    }
}

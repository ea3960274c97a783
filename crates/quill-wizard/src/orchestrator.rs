//! The form orchestrator: draft ownership, step sequencing, and gating.

use quill_model::{DraftPatch, DraftRecord, Field};
use quill_validate::{ErrorMap, FormCheck, RuleSet, validate, validate_all};
use tracing::debug;

use crate::error::{Result, WizardError};
use crate::step::{StepView, ValuesChanged};
use crate::steps::blog_steps;

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Moved forward after the step validated.
    Advanced { from: usize, to: usize },
    /// Moved back one step.
    Retreated { from: usize, to: usize },
    /// Validation failed; the error map now holds the step's messages.
    Blocked { step: usize },
    /// The last step validated; there is nowhere further to go.
    Completed { step: usize },
    /// Already on the first step.
    Unchanged { step: usize },
}

/// Owns the draft for one create/edit session and sequences its steps.
///
/// Lives only as long as the editor that created it.
pub struct FormOrchestrator {
    rules: RuleSet,
    steps: Vec<Box<dyn StepView>>,
    draft: DraftRecord,
    current: usize,
    errors: ErrorMap,
    step_valid: bool,
    form_valid: bool,
}

impl std::fmt::Debug for FormOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormOrchestrator")
            .field("current", &self.current)
            .field("step_count", &self.steps.len())
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl FormOrchestrator {
    /// Build an orchestrator over `steps`, which must be numbered `1..=N` in
    /// order. `rules` must define each of those steps exactly once.
    pub fn new(rules: RuleSet, steps: Vec<Box<dyn StepView>>) -> Result<Self> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        if rules.step_count() != steps.len() {
            return Err(WizardError::StepCountMismatch {
                rules: rules.step_count(),
                views: steps.len(),
            });
        }
        for step in 1..=steps.len() {
            match rules.steps().filter(|def| def.index() == step).count() {
                0 => return Err(WizardError::MissingStepRules { step }),
                1 => {}
                _ => return Err(WizardError::DuplicateStepRules { step }),
            }
        }
        for (position, view) in steps.iter().enumerate() {
            if view.step() != position + 1 {
                return Err(WizardError::StepMismatch {
                    position,
                    expected: position + 1,
                    found: view.step(),
                });
            }
        }
        Ok(Self::build(rules, steps))
    }

    /// The three-step post editor with an empty draft.
    pub fn blog() -> Self {
        Self::build(RuleSet::blog(), blog_steps())
    }

    fn build(rules: RuleSet, steps: Vec<Box<dyn StepView>>) -> Self {
        let mut form = Self {
            rules,
            steps,
            draft: DraftRecord::default(),
            current: 1,
            errors: ErrorMap::new(),
            step_valid: false,
            form_valid: false,
        };
        form.enter_current_step();
        form
    }

    /// Seed the draft with caller data (edit mode).
    #[must_use]
    pub fn with_initial(mut self, initial: &DraftRecord) -> Self {
        self.seed(initial);
        self
    }

    /// Merge caller data that may arrive after the user started typing.
    ///
    /// Non-empty caller values win per field; fields the caller leaves empty
    /// keep what is already in the draft. Returns `true` if the draft changed.
    pub fn seed(&mut self, initial: &DraftRecord) -> bool {
        let changed = self.draft.merge_initial(initial);
        if changed {
            debug!(step = self.current, "seeded draft with initial data");
            self.steps[self.current - 1].load(&self.draft);
            self.recompute_validity();
        }
        changed
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_first_step(&self) -> bool {
        self.current == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current == self.steps.len()
    }

    pub fn current_view(&self) -> &dyn StepView {
        self.steps[self.current - 1].as_ref()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Messages from the latest validation of the current step.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The draft as merged so far.
    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    /// Type into a field of the current step.
    pub fn input(&mut self, field: Field, value: &str) -> Result<()> {
        let step = self.current;
        let view = &mut self.steps[step - 1];
        if !view.governs(field) {
            return Err(WizardError::FieldNotOnStep { field, step });
        }
        if let Some(change) = view.set_value(field, value) {
            self.handle_values_changed(change);
        }
        Ok(())
    }

    /// React to a step committing new values.
    ///
    /// Only fields governed by the emitting step are merged. Errors of the
    /// merged fields are dropped and validity is recomputed.
    pub fn handle_values_changed(&mut self, change: ValuesChanged) {
        let Some(patch) = self.governed_patch(change.step, change.values) else {
            return;
        };
        self.draft.apply(&patch);
        for field in patch.fields() {
            self.errors.remove(field);
        }
        self.recompute_validity();
    }

    /// Validate the current step and advance if it passes.
    pub fn next(&mut self) -> Transition {
        let step = self.current;
        let pulled = self.pull_current();

        let mut candidate = self.draft.clone();
        candidate.apply(&pulled);
        let errors = validate(&self.rules, step, &candidate);
        if !errors.is_empty() {
            debug!(step, error_count = errors.len(), "step blocked by validation");
            self.errors = errors;
            self.recompute_validity();
            return Transition::Blocked { step };
        }

        self.draft.apply(&pulled);
        for field in pulled.fields() {
            self.errors.remove(field);
        }

        if self.is_last_step() {
            self.recompute_validity();
            return Transition::Completed { step };
        }

        self.current += 1;
        self.enter_current_step();
        debug!(from = step, to = self.current, "advanced step");
        Transition::Advanced {
            from: step,
            to: self.current,
        }
    }

    /// Go back one step without validating.
    pub fn previous(&mut self) -> Transition {
        let step = self.current;
        if step == 1 {
            return Transition::Unchanged { step };
        }
        self.current -= 1;
        self.enter_current_step();
        debug!(from = step, to = self.current, "returned to step");
        Transition::Retreated {
            from: step,
            to: self.current,
        }
    }

    /// Jump to `step`, typically the first invalid one after a failed submit.
    pub fn set_current_step(&mut self, step: usize) -> Result<()> {
        if step == 0 || step > self.steps.len() {
            return Err(WizardError::StepOutOfRange {
                step,
                step_count: self.steps.len(),
            });
        }
        self.current = step;
        self.enter_current_step();
        Ok(())
    }

    /// Validate the current step in place and keep the messages.
    pub fn validate_current_step(&mut self) -> &ErrorMap {
        self.errors = validate(&self.rules, self.current, &self.draft);
        &self.errors
    }

    /// The complete draft, including whatever the current step holds.
    pub fn form_data(&mut self) -> DraftRecord {
        let pulled = self.pull_current();
        self.draft.apply(&pulled);
        self.draft.clone()
    }

    /// Re-validate every step against the full merged draft.
    pub fn validate_all_steps(&mut self) -> FormCheck {
        let data = self.form_data();
        let check = validate_all(&self.rules, &data);
        debug!(
            valid = check.is_valid(),
            first_invalid_step = ?check.first_invalid_step(),
            "validated all steps"
        );
        check
    }

    /// Whether the current step would pass validation right now.
    pub fn is_current_step_valid(&self) -> bool {
        self.step_valid
    }

    /// Whether every step would pass validation right now.
    pub fn is_form_valid(&self) -> bool {
        self.form_valid
    }

    fn pull_current(&self) -> DraftPatch {
        let view = &self.steps[self.current - 1];
        self.governed_patch(view.step(), view.current_values())
            .unwrap_or_default()
    }

    /// Restrict `values` to the fields `step` governs.
    fn governed_patch(&self, step: usize, values: DraftPatch) -> Option<DraftPatch> {
        let definition = self.rules.step(step)?;
        let view = self.steps.get(step.checked_sub(1)?)?;
        Some(values.retain(|field| definition.governs(field) && view.governs(field)))
    }

    fn enter_current_step(&mut self) {
        self.errors.clear();
        self.steps[self.current - 1].load(&self.draft);
        self.recompute_validity();
    }

    fn recompute_validity(&mut self) {
        self.step_valid = validate(&self.rules, self.current, &self.draft).is_empty();
        self.form_valid = validate_all(&self.rules, &self.draft).is_valid();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::{BodyStep, IdentityStep};

    fn fill_identity(form: &mut FormOrchestrator) {
        form.input(Field::Title, "Hello World").unwrap();
        form.input(Field::Category, "Tech-News").unwrap();
    }

    #[test]
    fn starts_on_first_step_with_empty_draft() {
        let form = FormOrchestrator::blog();
        assert_eq!(form.current_step(), 1);
        assert_eq!(form.step_count(), 3);
        assert_eq!(form.draft(), &DraftRecord::default());
        assert!(form.errors().is_empty());
        assert!(!form.is_current_step_valid());
    }

    #[test]
    fn short_title_blocks_next() {
        let mut form = FormOrchestrator::blog();
        form.input(Field::Title, "Hi").unwrap();
        form.input(Field::Category, "Tech").unwrap();
        assert_eq!(form.next(), Transition::Blocked { step: 1 });
        assert_eq!(form.current_step(), 1);
        assert_eq!(
            form.errors().get(Field::Title),
            Some("Title must be between 3 and 100 characters")
        );
    }

    #[test]
    fn valid_identity_advances() {
        let mut form = FormOrchestrator::blog();
        fill_identity(&mut form);
        assert!(form.is_current_step_valid());
        assert_eq!(form.next(), Transition::Advanced { from: 1, to: 2 });
        assert_eq!(form.current_view().title(), "Content");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn typing_clears_only_that_fields_error() {
        let mut form = FormOrchestrator::blog();
        form.next();
        assert_eq!(form.errors().len(), 2);
        form.input(Field::Title, "Hello").unwrap();
        assert!(!form.errors().contains(Field::Title));
        assert!(form.errors().contains(Field::Category));
    }

    #[test]
    fn previous_keeps_merged_values() {
        let mut form = FormOrchestrator::blog();
        fill_identity(&mut form);
        form.next();
        form.input(Field::Description, "half typed").unwrap();
        assert_eq!(form.previous(), Transition::Retreated { from: 2, to: 1 });
        assert_eq!(form.draft().title, "Hello World");
        assert_eq!(form.draft().description, "half typed");
        let values = form.current_view().current_values();
        assert_eq!(values.get(Field::Category), Some("Tech-News"));
    }

    #[test]
    fn previous_on_first_step_is_a_no_op() {
        let mut form = FormOrchestrator::blog();
        assert_eq!(form.previous(), Transition::Unchanged { step: 1 });
    }

    #[test]
    fn input_to_foreign_field_is_rejected() {
        let mut form = FormOrchestrator::blog();
        assert_eq!(
            form.input(Field::Tags, "rust"),
            Err(WizardError::FieldNotOnStep {
                field: Field::Tags,
                step: 1
            })
        );
    }

    #[test]
    fn last_step_completes_without_advancing() {
        let mut form = FormOrchestrator::blog();
        fill_identity(&mut form);
        form.next();
        form.input(Field::Description, "x".repeat(50).as_str()).unwrap();
        form.next();
        assert_eq!(form.next(), Transition::Completed { step: 3 });
        assert_eq!(form.current_step(), 3);
        assert!(form.is_form_valid());
    }

    #[test]
    fn set_current_step_bounds() {
        let mut form = FormOrchestrator::blog();
        assert!(form.set_current_step(3).is_ok());
        assert_eq!(form.current_step(), 3);
        assert_eq!(
            form.set_current_step(4),
            Err(WizardError::StepOutOfRange {
                step: 4,
                step_count: 3
            })
        );
        assert!(form.set_current_step(0).is_err());
    }

    #[test]
    fn seed_does_not_clobber_typed_values() {
        let mut form = FormOrchestrator::blog();
        form.input(Field::Category, "News").unwrap();
        let changed = form.seed(&DraftRecord {
            title: "Draft".into(),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(form.draft().title, "Draft");
        assert_eq!(form.draft().category, "News");
        assert_eq!(form.current_view().current_values().get(Field::Title), Some("Draft"));
    }

    #[test]
    fn mismatched_views_are_rejected() {
        let steps: Vec<Box<dyn StepView>> =
            vec![Box::new(BodyStep::default()), Box::new(IdentityStep::default())];
        let rules = RuleSet::new(vec![
            quill_validate::StepDefinition::new(1),
            quill_validate::StepDefinition::new(2),
        ]);
        assert!(matches!(
            FormOrchestrator::new(rules, steps),
            Err(WizardError::StepMismatch { position: 0, .. })
        ));
    }

    #[test]
    fn gap_in_rule_steps_is_rejected() {
        let rules = RuleSet::new(vec![
            quill_validate::StepDefinition::new(1),
            quill_validate::StepDefinition::new(3),
        ]);
        assert_eq!(
            FormOrchestrator::new(rules, blog_steps()).unwrap_err(),
            WizardError::MissingStepRules { step: 2 }
        );
    }

    #[test]
    fn repeated_rule_step_is_rejected() {
        let rules = RuleSet::new(vec![
            quill_validate::StepDefinition::new(1),
            quill_validate::StepDefinition::new(2),
            quill_validate::StepDefinition::new(2),
            quill_validate::StepDefinition::new(3),
        ]);
        assert_eq!(
            FormOrchestrator::new(rules, blog_steps()).unwrap_err(),
            WizardError::DuplicateStepRules { step: 2 }
        );
    }

    #[test]
    fn foreign_values_in_a_change_are_ignored() {
        let mut form = FormOrchestrator::blog();
        form.handle_values_changed(ValuesChanged {
            step: 1,
            values: DraftPatch::new()
                .with(Field::Title, "Kept")
                .with(Field::Description, "smuggled in"),
        });
        assert_eq!(form.draft().title, "Kept");
        assert_eq!(form.draft().description, "");
    }
}

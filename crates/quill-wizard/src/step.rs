//! The contract every wizard step implements.

use quill_model::{DraftPatch, DraftRecord, Field};

/// Notification that a step committed new input.
///
/// Emitted synchronously by [`StepView::set_value`] so the orchestrator can
/// merge the values and recompute validity right away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesChanged {
    pub step: usize,
    pub values: DraftPatch,
}

/// One page of the wizard.
///
/// A step view owns the transient input of its own fields only. It never
/// talks to other steps or to storage; it returns its current values when
/// asked.
pub trait StepView {
    /// 1-based position of this step.
    fn step(&self) -> usize;

    /// Heading shown above the step.
    fn title(&self) -> &'static str;

    /// Fields this step owns, in display order.
    fn fields(&self) -> &'static [Field];

    fn governs(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    /// Current values of every owned field.
    fn current_values(&self) -> DraftPatch;

    /// Replace the transient input with the draft's values.
    fn load(&mut self, draft: &DraftRecord);

    /// Set the raw input of one field.
    ///
    /// Returns `None` if the field is not owned by this step.
    fn set_value(&mut self, field: Field, value: &str) -> Option<ValuesChanged>;

    /// Emit the current values without changing them (focus leaving the step).
    fn commit(&self) -> ValuesChanged {
        ValuesChanged {
            step: self.step(),
            values: self.current_values(),
        }
    }
}

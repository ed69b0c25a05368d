//! Setting controls: a binding model paired with the external value it mirrors.
//!
//! [`SettingControl`] is what a front-end holds per setting. Every mutating
//! call ends with [`SettingControl::sync`], which pumps external changes into
//! the model and the model's adjustments back out, tagged as internal.
//!
//! The object-safe [`Setting`] trait lets a panel keep integer and float
//! settings side by side as `Box<dyn Setting>`.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::bound::BoundValue;
use crate::converter::{DecimalConverter, NumericKind};
use crate::model::NumericBinding;
use crate::range::DecimalRange;

/// Read-only view of a setting for rendering and reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingSnapshot {
    pub name: String,
    pub kind: NumericKind,
    pub quantity: Decimal,
    pub value: String,
    pub field_text: String,
    pub slider_position: f64,
    pub slider_lower: String,
    pub slider_upper: String,
    pub maximum_range: DecimalRange,
    pub step_size: String,
    pub step_number: Decimal,
    pub snap_to_step: bool,
    pub dragging: bool,
}

pub trait Setting {
    fn name(&self) -> &str;

    fn kind(&self) -> NumericKind;

    fn snapshot(&self) -> SettingSnapshot;

    fn field_text(&self) -> &str;

    fn set_field_text(&mut self, text: &str);

    /// Commits the field text. `false` when it was not a number and reverted.
    fn commit_text(&mut self) -> bool;

    fn revert_text(&mut self);

    fn increment(&mut self, steps: u32);

    fn decrement(&mut self, steps: u32);

    fn begin_drag(&mut self);

    fn drag_to(&mut self, position: f64) -> bool;

    fn end_drag(&mut self);

    fn is_dragging(&self) -> bool;

    fn rescale(&mut self, factor: Decimal);

    fn set_slider_range(&mut self, range: DecimalRange);

    fn reset_slider_range(&mut self);

    /// Writes the external value as its owner would. Goes through the model's
    /// change handling, so snapping and clamping apply.
    fn set_external(&mut self, value: Decimal);

    /// Like [`set_external`](Self::set_external) from text. `false` when the
    /// text is not a number.
    fn set_external_text(&mut self, text: &str) -> bool;

    /// Canonical text of the external value.
    fn external_text(&self) -> String;

    /// Current quantity position in the slider, for rendering.
    fn slider_position(&self) -> f64;
}

pub struct SettingControl<C: DecimalConverter> {
    name: String,
    binding: NumericBinding<C>,
    bound: BoundValue<C::Value>,
}

impl<C: DecimalConverter> SettingControl<C> {
    pub fn new(
        name: impl Into<String>,
        converter: C,
        value: C::Value,
        initial_range: Option<DecimalRange>,
        maximum_range: DecimalRange,
        snap_to_step: bool,
    ) -> Self {
        let binding =
            NumericBinding::new(converter, value, initial_range, maximum_range, snap_to_step);
        let mut control = Self {
            name: name.into(),
            binding,
            bound: BoundValue::new(value),
        };
        control.sync();
        control
    }

    pub fn binding(&self) -> &NumericBinding<C> {
        &self.binding
    }

    pub fn bound(&self) -> &BoundValue<C::Value> {
        &self.bound
    }

    /// External owner write, followed by a sync.
    pub fn set_external_value(&mut self, value: C::Value) {
        self.bound.set(value);
        self.sync();
    }

    /// Pumps one round of changes in both directions.
    pub fn sync(&mut self) {
        if let Some(value) = self.bound.poll_change() {
            self.binding.value_changed(value);
        }
        if let Some(value) = self.binding.take_outgoing() {
            self.bound.set_internal(value);
        }
    }
}

impl<C: DecimalConverter> Setting for SettingControl<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NumericKind {
        self.binding.converter().kind()
    }

    fn snapshot(&self) -> SettingSnapshot {
        let b = &self.binding;
        SettingSnapshot {
            name: self.name.clone(),
            kind: self.kind(),
            quantity: b.quantity(),
            value: b.converter().value_to_string(b.value()),
            field_text: b.field_text().to_string(),
            slider_position: b.slider_position(),
            slider_lower: b.slider_lower_text(),
            slider_upper: b.slider_upper_text(),
            maximum_range: b.maximum_range(),
            step_size: b.step_size_text(),
            step_number: b.step_number(),
            snap_to_step: b.snaps_to_step(),
            dragging: b.is_slider_active(),
        }
    }

    fn field_text(&self) -> &str {
        self.binding.field_text()
    }

    fn set_field_text(&mut self, text: &str) {
        self.binding.set_field_text(text);
    }

    fn commit_text(&mut self) -> bool {
        let accepted = self.binding.apply_field_text();
        self.sync();
        accepted
    }

    fn revert_text(&mut self) {
        self.binding.revert_field_text();
    }

    fn increment(&mut self, steps: u32) {
        self.binding.apply_increment(steps);
        self.sync();
    }

    fn decrement(&mut self, steps: u32) {
        self.binding.apply_decrement(steps);
        self.sync();
    }

    fn begin_drag(&mut self) {
        self.binding.begin_slider_drag();
    }

    fn drag_to(&mut self, position: f64) -> bool {
        let applied = self.binding.set_slider_position(position);
        self.sync();
        applied
    }

    fn end_drag(&mut self) {
        self.binding.end_slider_drag();
    }

    fn is_dragging(&self) -> bool {
        self.binding.is_slider_active()
    }

    fn rescale(&mut self, factor: Decimal) {
        self.binding.rescale_slider(factor);
    }

    fn set_slider_range(&mut self, range: DecimalRange) {
        self.binding.set_slider_range(range);
    }

    fn reset_slider_range(&mut self) {
        self.binding.reset_slider_range();
    }

    fn set_external(&mut self, value: Decimal) {
        let value = self.binding.converter().decimal_to_value(value);
        self.set_external_value(value);
    }

    fn set_external_text(&mut self, text: &str) -> bool {
        match self.binding.converter().parse_decimal(text) {
            Some(value) => {
                self.set_external(value);
                true
            }
            None => false,
        }
    }

    fn external_text(&self) -> String {
        self.binding.converter().value_to_string(self.bound.get())
    }

    fn slider_position(&self) -> f64 {
        self.binding.slider_position()
    }
}

//! Numeric binding model: one decimal quantity projected onto field text,
//! a slider position and a step grid.
//!
//! Mutation sources:
//! - external value pushes ([`NumericBinding::value_changed`])
//! - text entry ([`NumericBinding::apply_field_text`])
//! - steppers and slider drags ([`NumericBinding::apply_increment`],
//!   [`NumericBinding::set_slider_position`])
//!
//! After every mutation the field text renders the quantity, and the slider
//! position is re-derived from it unless the slider itself is being dragged.
//! Every path except text entry keeps the quantity inside the maximum range.

use rust_decimal::prelude::*;
use tracing::{debug, trace, warn};

use crate::converter::{snap, step_number_of, DecimalConverter};
use crate::range::DecimalRange;

#[derive(Debug, Clone)]
pub struct NumericBinding<C: DecimalConverter> {
    converter: C,
    quantity: Decimal,
    maximum_range: DecimalRange,
    slider_range: DecimalRange,
    step_size: Decimal,
    step_number: Decimal,
    field_text: String,
    slider_position: f64,
    snap_to_step: bool,
    slider_active: bool,
    /// Last host value known to be held by the external binding.
    external: C::Value,
    /// Host value waiting to be written to the external binding.
    outgoing: Option<C::Value>,
}

impl<C: DecimalConverter> NumericBinding<C> {
    /// Builds the model around `initial_value`.
    ///
    /// The slider range defaults to `maximum_range`. A given `initial_range`
    /// is clamped into `maximum_range` and then widened to contain the
    /// initial value.
    pub fn new(
        converter: C,
        initial_value: C::Value,
        initial_range: Option<DecimalRange>,
        maximum_range: DecimalRange,
        snap_to_step: bool,
    ) -> Self {
        let value = maximum_range.clamp(converter.value_to_decimal(initial_value));
        let slider_range = match initial_range {
            Some(range) => range
                .clamped_to(&maximum_range)
                .expanded_to_include(value),
            None => maximum_range,
        };
        let step_size = step_size_for(&converter, &slider_range, &maximum_range);

        let (quantity, slider_range) = if snap_to_step {
            (
                maximum_range.clamp(snap(value, step_size)),
                snap_range(&slider_range, step_size, &maximum_range),
            )
        } else {
            (value, slider_range)
        };

        let mut binding = Self {
            field_text: converter.decimal_to_string(quantity),
            slider_position: slider_range.fraction_of(quantity),
            step_number: step_number_of(quantity, step_size),
            converter,
            quantity,
            maximum_range,
            slider_range,
            step_size,
            snap_to_step,
            slider_active: false,
            external: initial_value,
            outgoing: None,
        };
        // Clamping or snapping may already have moved the value away from the caller's.
        binding.queue_outgoing();
        binding
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Commits the current field text.
    ///
    /// Parsed text is taken verbatim: no clamping to the maximum range and no
    /// step alignment. Unparseable text is discarded and the field reverts.
    /// Returns whether the text was accepted.
    pub fn apply_field_text(&mut self) -> bool {
        match self.converter.parse_decimal(&self.field_text) {
            Some(parsed) => {
                self.step_number = step_number_of(parsed, self.step_size);
                self.commit(parsed, true);
                true
            }
            None => {
                debug!(text = %self.field_text, "unparseable field text, reverting");
                self.revert_field_text();
                false
            }
        }
    }

    pub fn apply_increment(&mut self, steps: u32) {
        self.step_by(Decimal::from(steps));
    }

    pub fn apply_decrement(&mut self, steps: u32) {
        self.step_by(-Decimal::from(steps));
    }

    /// The external binding changed by some means other than this model's writes.
    pub fn value_changed(&mut self, value: C::Value) {
        self.external = value;

        let decimal = self.converter.value_to_decimal(value);
        let candidate = if self.snap_to_step {
            snap(decimal, self.step_size)
        } else {
            decimal
        };
        let mut quantity = self.maximum_range.clamp(candidate);
        self.step_number = step_number_of(quantity, self.step_size);

        // Keep the current representation when only the scale differs (5 vs 5.0).
        if quantity == self.quantity {
            quantity = self.quantity;
        }
        self.commit(quantity, true);
    }

    /// Zooms the slider around the current quantity. `factor < 1` narrows the
    /// range, `factor > 1` widens it. The quantity is left untouched.
    pub fn rescale_slider(&mut self, factor: Decimal) {
        if factor <= Decimal::ZERO {
            warn!(%factor, "ignoring non-positive slider rescale factor");
            return;
        }
        let q = self.quantity;
        let lower = q.saturating_sub(factor.saturating_mul(q.saturating_sub(self.slider_range.lower())));
        let upper = q.saturating_add(factor.saturating_mul(self.slider_range.upper().saturating_sub(q)));
        self.set_slider_range(DecimalRange::from_bounds(lower, upper));
    }

    /// Replaces the slider range. The range is clamped into the maximum
    /// range and the step size recomputed for it; the quantity is unchanged.
    pub fn set_slider_range(&mut self, range: DecimalRange) {
        let clamped = range.clamped_to(&self.maximum_range);
        self.step_size = step_size_for(&self.converter, &clamped, &self.maximum_range);
        self.slider_range = if self.snap_to_step {
            snap_range(&clamped, self.step_size, &self.maximum_range)
        } else {
            clamped
        };
        self.step_number = step_number_of(self.quantity, self.step_size);
        self.slider_position = self.slider_range.fraction_of(self.quantity);
        trace!(
            slider_range = %self.slider_range,
            step_size = %self.step_size,
            "slider range updated"
        );
    }

    /// Restores the slider to span the whole maximum range.
    pub fn reset_slider_range(&mut self) {
        self.set_slider_range(self.maximum_range);
    }

    pub fn begin_slider_drag(&mut self) {
        self.slider_active = true;
    }

    /// Ends a drag and re-derives the slider position from the quantity.
    pub fn end_slider_drag(&mut self) {
        if std::mem::take(&mut self.slider_active) {
            self.slider_position = self.slider_range.fraction_of(self.quantity);
        }
    }

    /// Live slider write. Only applied while a drag is active; returns whether
    /// the write was applied.
    ///
    /// The position is kept as given. The quantity is the nearest step
    /// multiple at that position, clamped into the maximum range.
    pub fn set_slider_position(&mut self, position: f64) -> bool {
        if !self.slider_active {
            debug!(position, "slider not active, ignoring position write");
            return false;
        }
        if !position.is_finite() {
            debug!(position, "non-finite slider position, ignoring");
            return false;
        }
        self.slider_position = position;

        let fraction = Decimal::from_f64(position).unwrap_or(Decimal::ZERO);
        let raw = self.slider_range.interpolate(fraction);
        let mut step_number = step_number_of(raw, self.step_size);
        let mut quantity = step_number.saturating_mul(self.step_size);
        if !self.maximum_range.contains(quantity) {
            quantity = self.maximum_range.clamp(quantity);
            step_number = step_number_of(quantity, self.step_size);
        }
        self.step_number = step_number;
        self.commit(quantity, false);
        true
    }

    /// Keystroke write into the text field. Not parsed until committed.
    pub fn set_field_text(&mut self, text: impl Into<String>) {
        self.field_text = text.into();
    }

    /// Discards an uncommitted text edit.
    pub fn revert_field_text(&mut self) {
        self.field_text = self.converter.decimal_to_string(self.quantity);
    }

    /// Host value the external binding should be set to, if any.
    pub fn take_outgoing(&mut self) -> Option<C::Value> {
        self.outgoing.take()
    }

    // ── Projections ──────────────────────────────────────────────────

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// The quantity as a host value.
    pub fn value(&self) -> C::Value {
        self.converter.decimal_to_value(self.quantity)
    }

    pub fn maximum_range(&self) -> DecimalRange {
        self.maximum_range
    }

    pub fn slider_range(&self) -> DecimalRange {
        self.slider_range
    }

    pub fn step_size(&self) -> Decimal {
        self.step_size
    }

    pub fn step_number(&self) -> Decimal {
        self.step_number
    }

    pub fn field_text(&self) -> &str {
        &self.field_text
    }

    pub fn slider_position(&self) -> f64 {
        self.slider_position
    }

    pub fn snaps_to_step(&self) -> bool {
        self.snap_to_step
    }

    pub fn is_slider_active(&self) -> bool {
        self.slider_active
    }

    pub fn slider_lower_text(&self) -> String {
        self.converter.decimal_to_string(self.slider_range.lower())
    }

    pub fn slider_upper_text(&self) -> String {
        self.converter.decimal_to_string(self.slider_range.upper())
    }

    // Not routed through the converter: integer rendering would round a fractional step.
    pub fn step_size_text(&self) -> String {
        crate::converter::canonical_string(self.step_size)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn step_by(&mut self, delta: Decimal) {
        let step_number = self.step_number.saturating_add(delta);
        let candidate = step_number.saturating_mul(self.step_size);

        let (quantity, step_number) = if candidate > self.maximum_range.upper() {
            let bound = self.maximum_range.upper();
            (bound, step_number_of(bound, self.step_size))
        } else if candidate < self.maximum_range.lower() {
            let bound = self.maximum_range.lower();
            (bound, step_number_of(bound, self.step_size))
        } else {
            (candidate, step_number)
        };

        self.step_number = step_number;
        self.commit(quantity, true);
    }

    fn commit(&mut self, quantity: Decimal, update_slider: bool) {
        self.quantity = quantity;
        self.field_text = self.converter.decimal_to_string(quantity);
        if update_slider {
            self.slider_position = self.slider_range.fraction_of(quantity);
        }
        self.queue_outgoing();
        trace!(
            quantity = %quantity,
            step_number = %self.step_number,
            slider_position = self.slider_position,
            "quantity committed"
        );
    }

    /// Queues the quantity for the external binding when its host value differs.
    fn queue_outgoing(&mut self) {
        let value = self.converter.decimal_to_value(self.quantity);
        if value != self.external {
            self.external = value;
            self.outgoing = Some(value);
        }
    }
}

/// Step size for a slider range. A collapsed slider range borrows the step
/// of the maximum range so it keeps the setting's resolution.
fn step_size_for<C: DecimalConverter>(
    converter: &C,
    slider_range: &DecimalRange,
    maximum: &DecimalRange,
) -> Decimal {
    if slider_range.width() > Decimal::ZERO {
        converter.make_step_size(slider_range)
    } else {
        converter.make_step_size(maximum)
    }
}

/// Rounds both bounds onto the step grid without shrinking the range, then
/// clamps back into `maximum`.
fn snap_range(range: &DecimalRange, step_size: Decimal, maximum: &DecimalRange) -> DecimalRange {
    let mut lower = snap(range.lower(), step_size);
    if lower > range.lower() {
        lower = lower.saturating_sub(step_size);
    }
    let mut upper = snap(range.upper(), step_size);
    if upper < range.upper() {
        upper = upper.saturating_add(step_size);
    }
    DecimalRange::from_bounds(lower, upper).clamped_to(maximum)
}

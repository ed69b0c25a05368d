//! Property tests for binding invariants.
//!
//! Uses proptest to verify:
//! 1. Clamping at a maximum bound is idempotent
//! 2. With snapping, every non-text mutation leaves the quantity on the step grid
//! 3. Field text parses back to the quantity after every non-text mutation
//! 4. Slider ranges never leave the maximum range
//! 5. Rescaling the slider never changes the quantity

use proptest::prelude::*;
use rust_decimal::Decimal;

use stepdial_core::converter::DecimalConverter;
use stepdial_core::{DecimalRange, FloatConverter, IntegerConverter, NumericBinding};

// ── Strategies (proptest) ────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Mutation {
    Increment(u32),
    Decrement(u32),
    External(i64),
    Drag(f64),
}

fn arb_mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (1..200_u32).prop_map(Mutation::Increment),
        (1..200_u32).prop_map(Mutation::Decrement),
        (-20_000..20_000_i64).prop_map(Mutation::External),
        (-0.5..1.5_f64).prop_map(Mutation::Drag),
    ]
}

/// Maximum ranges whose bounds sit on their own auto step grid.
fn arb_aligned_range() -> impl Strategy<Value = DecimalRange> {
    prop_oneof![
        Just((0, 1000)),
        Just((-500, 500)),
        Just((1000, 12000)),
        Just((0, 100)),
        Just((-10, 10)),
    ]
    .prop_map(|(lower, upper)| {
        DecimalRange::new(Decimal::from(lower), Decimal::from(upper)).unwrap()
    })
}

fn arb_range_bounds() -> impl Strategy<Value = (i64, i64)> {
    (-50_000..50_000_i64, -50_000..50_000_i64)
}

fn apply_int(b: &mut NumericBinding<IntegerConverter>, m: &Mutation) {
    match *m {
        Mutation::Increment(n) => b.apply_increment(n),
        Mutation::Decrement(n) => b.apply_decrement(n),
        Mutation::External(v) => b.value_changed(v),
        Mutation::Drag(p) => {
            b.begin_slider_drag();
            b.set_slider_position(p);
            b.end_slider_drag();
        }
    }
}

fn apply_float(b: &mut NumericBinding<FloatConverter>, m: &Mutation) {
    match *m {
        Mutation::Increment(n) => b.apply_increment(n),
        Mutation::Decrement(n) => b.apply_decrement(n),
        // Hundredths, so the external value exercises fractional input.
        Mutation::External(v) => b.value_changed(v as f64 / 100.0),
        Mutation::Drag(p) => {
            b.begin_slider_drag();
            b.set_slider_position(p);
            b.end_slider_drag();
        }
    }
}

// ── 1. Idempotent clamping ───────────────────────────────────────────

proptest! {
    #[test]
    fn increments_at_upper_bound_are_idempotent(
        (lower, upper) in arb_range_bounds(),
        extra in 1..50_u32,
    ) {
        let max = DecimalRange::from_bounds(Decimal::from(lower), Decimal::from(upper));
        let mut b = NumericBinding::new(IntegerConverter, lower, None, max, true);
        b.apply_increment(u32::MAX / 2);
        prop_assert_eq!(b.quantity(), max.upper());
        for _ in 0..extra {
            b.apply_increment(1);
            prop_assert_eq!(b.quantity(), max.upper());
        }
    }

    #[test]
    fn decrements_at_lower_bound_are_idempotent(
        (lower, upper) in arb_range_bounds(),
        extra in 1..50_u32,
    ) {
        let max = DecimalRange::from_bounds(Decimal::from(lower), Decimal::from(upper));
        let mut b = NumericBinding::new(IntegerConverter, upper, None, max, true);
        b.apply_decrement(u32::MAX / 2);
        prop_assert_eq!(b.quantity(), max.lower());
        for _ in 0..extra {
            b.apply_decrement(1);
            prop_assert_eq!(b.quantity(), max.lower());
        }
    }
}

// ── 2. Snap invariant ────────────────────────────────────────────────

proptest! {
    #[test]
    fn snapped_integer_quantity_stays_on_grid(
        max in arb_aligned_range(),
        mutations in prop::collection::vec(arb_mutation(), 1..40),
    ) {
        let start = IntegerConverter.decimal_to_value(max.lower());
        let mut b = NumericBinding::new(IntegerConverter, start, None, max, true);
        for m in &mutations {
            apply_int(&mut b, m);
            prop_assert!((b.quantity() % b.step_size()).is_zero(), "{} not on grid {}", b.quantity(), b.step_size());
            prop_assert_eq!(b.quantity(), b.step_number() * b.step_size());
            prop_assert!(b.maximum_range().contains(b.quantity()));
        }
    }

    #[test]
    fn snapped_float_quantity_stays_on_grid(
        max in arb_aligned_range(),
        mutations in prop::collection::vec(arb_mutation(), 1..40),
    ) {
        let mut b = NumericBinding::new(FloatConverter, 0.0, None, max, true);
        for m in &mutations {
            apply_float(&mut b, m);
            prop_assert!((b.quantity() % b.step_size()).is_zero());
            prop_assert!(b.maximum_range().contains(b.quantity()));
        }
    }
}

// ── 3. Text round trip ───────────────────────────────────────────────

proptest! {
    #[test]
    fn field_text_parses_back_to_quantity(
        max in arb_aligned_range(),
        mutations in prop::collection::vec(arb_mutation(), 1..40),
    ) {
        let mut b = NumericBinding::new(FloatConverter, 0.0, None, max, true);
        for m in &mutations {
            apply_float(&mut b, m);
            prop_assert_eq!(b.converter().parse_decimal(b.field_text()), Some(b.quantity()));
        }
    }
}

// ── 4. Range containment ─────────────────────────────────────────────

proptest! {
    #[test]
    fn slider_range_stays_inside_maximum(
        max in arb_aligned_range(),
        (a, b) in arb_range_bounds(),
        snap in any::<bool>(),
    ) {
        let start = IntegerConverter.decimal_to_value(max.lower());
        let mut binding = NumericBinding::new(IntegerConverter, start, None, max, snap);
        binding.set_slider_range(DecimalRange::from_bounds(Decimal::from(a), Decimal::from(b)));
        prop_assert!(binding.slider_range().is_within(&max));
        prop_assert!(binding.step_size() > Decimal::ZERO);
    }
}

// ── 5. Value-preserving rescale ──────────────────────────────────────

proptest! {
    #[test]
    fn rescale_keeps_quantity(
        max in arb_aligned_range(),
        mutations in prop::collection::vec(arb_mutation(), 0..10),
        factors in prop::collection::vec(1..400_i64, 1..10),
    ) {
        let mut b = NumericBinding::new(FloatConverter, 0.0, None, max, true);
        for m in &mutations {
            apply_float(&mut b, m);
        }
        let quantity = b.quantity();
        for factor in factors {
            // Factors from 0.01 to 3.99.
            b.rescale_slider(Decimal::new(factor, 2));
            prop_assert_eq!(b.quantity(), quantity);
            prop_assert!(b.slider_range().is_within(&max));
            prop_assert!(b.step_size() > Decimal::ZERO);
        }
    }
}

//! Two-way sync between a setting control and its external value.
//!
//! Simulates an event loop: each tick the owner may write, then the control
//! syncs. The loop must settle after the first tick with no ping-pong.

use rust_decimal_macros::dec;

use stepdial_core::{
    parse_operations, DecimalRange, FloatConverter, IntegerConverter, PanelConfig, Setting,
    SettingControl,
};

fn exposure() -> SettingControl<FloatConverter> {
    SettingControl::new(
        "exposure",
        FloatConverter,
        0.0,
        None,
        DecimalRange::new(dec!(-5), dec!(5)).unwrap(),
        true,
    )
}

#[test]
fn owner_write_settles_in_one_tick() {
    let mut c = exposure();
    c.set_external_value(1.234);
    // Snapped to the 0.1 grid and written back as an internal change.
    assert_eq!(c.bound().get(), 1.2);
    for _ in 0..5 {
        c.sync();
        assert_eq!(c.bound().get(), 1.2);
        assert_eq!(c.binding().quantity(), dec!(1.2));
    }
    assert!(!c.bound().has_pending_change());
}

#[test]
fn model_edits_are_not_reprocessed() {
    let mut c = exposure();
    c.increment(4);
    assert_eq!(c.bound().get(), 0.4);
    c.set_field_text("abc");
    c.sync();
    // The echo tick must not have re-run value_changed, which would reset the field text.
    assert_eq!(c.field_text(), "abc");
    c.revert_text();
    assert_eq!(c.field_text(), "0.4");
}

#[test]
fn owner_write_after_model_edit_wins() {
    let mut c = SettingControl::new(
        "volume",
        IntegerConverter,
        500,
        None,
        DecimalRange::new(dec!(0), dec!(1000)).unwrap(),
        true,
    );
    c.increment(1);
    c.set_external_value(900);
    assert_eq!(c.binding().quantity(), dec!(900));
    assert_eq!(c.field_text(), "900");
}

#[test]
fn text_escape_hatch_propagates_outward() {
    let mut c = exposure();
    c.set_field_text("42.42");
    c.commit_text();
    assert_eq!(c.bound().get(), 42.42);
    c.sync();
    assert_eq!(c.binding().quantity(), dec!(42.42));
}

#[test]
fn scripted_panel_session() {
    let panel = PanelConfig::default_panel();
    let mut settings = panel.build().unwrap();
    let volume = settings
        .iter_mut()
        .find(|s| s.name() == "volume")
        .unwrap();

    for op in parse_operations("inc:3 rescale:0.5 inc:7 range:0..1000 value:2000").unwrap() {
        op.apply(volume.as_mut());
    }
    let snapshot = volume.snapshot();
    assert_eq!(snapshot.quantity, dec!(1000));
    assert_eq!(snapshot.slider_lower, "0");
    assert_eq!(snapshot.slider_upper, "1000");
    assert_eq!(snapshot.step_size, "10");
    assert_eq!(volume.external_text(), "1000");
}

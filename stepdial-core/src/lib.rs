//! StepDial core: numeric setting binding with decimal quantity, field text,
//! slider position and step size kept mutually consistent.
//!
//! This crate contains:
//! - Decimal converters per host numeric kind, with step-size derivation
//! - The binding model and its mutation paths (text, steppers, slider, external value)
//! - The external value holder with echo suppression
//! - Setting controls pairing the two, behind an object-safe `Setting` trait
//! - A text syntax for scripted operations
//! - TOML panel configuration

pub mod bound;
pub mod config;
pub mod control;
pub mod converter;
pub mod error;
pub mod model;
pub mod range;
pub mod script;

pub use bound::BoundValue;
pub use config::{PanelConfig, SettingConfig};
pub use control::{Setting, SettingControl, SettingSnapshot};
pub use converter::{DecimalConverter, FloatConverter, IntegerConverter, NumericKind};
pub use error::{ConfigError, RangeError, ScriptError};
pub use model::NumericBinding;
pub use range::DecimalRange;
pub use script::{parse_operations, Operation};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: model types can move to another thread with the panel.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<NumericBinding<IntegerConverter>>();
        require_sync::<NumericBinding<IntegerConverter>>();
        require_send::<NumericBinding<FloatConverter>>();
        require_sync::<NumericBinding<FloatConverter>>();
        require_send::<SettingControl<IntegerConverter>>();
        require_sync::<SettingControl<FloatConverter>>();
        require_send::<BoundValue<f64>>();
        require_send::<DecimalRange>();
        require_send::<PanelConfig>();
        require_send::<SettingSnapshot>();
        require_send::<Operation>();
    }
}

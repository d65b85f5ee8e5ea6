//! Conversion between raw per-component values and flattened values.
//!
//! The sequence order of a multi-component value is the control's declared
//! component order (see [`Control::components`](crate::Control)). The same
//! order is used in both directions, so a value read with `get` can be
//! written back unchanged with `set`.

use crate::camera::{ControlValue, ControlValues};
use crate::error::UvcError;

/// Flatten a raw value: one component yields a single number, anything
/// else yields the component values as a sequence in order.
pub fn flatten_control_values(values: &ControlValues) -> ControlValue {
    let flat: Vec<i64> = values.values().collect();

    if let [single] = flat[..] {
        return ControlValue::Single(single);
    }

    ControlValue::Multiple(flat)
}

/// Map a flattened value back onto named components.
///
/// Fails with [`UvcError::InvalidValue`] when the number of values does not
/// match the number of components.
pub fn unflatten_control_value(
    control: &str,
    component_names: &[&str],
    value: &ControlValue,
) -> Result<ControlValues, UvcError> {
    let values = value.as_slice();

    if values.len() != component_names.len() {
        return Err(UvcError::InvalidValue {
            control: control.to_string(),
            reason: format!(
                "expected {} value(s) ({}), got {}",
                component_names.len(),
                component_names.join(", "),
                values.len()
            ),
        });
    }

    Ok(component_names.iter().copied().zip(values.iter().copied()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, i64)]) -> ControlValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn one_component_flattens_to_number() {
        assert_eq!(flatten_control_values(&raw(&[("x", 5)])), ControlValue::Single(5));
    }

    #[test]
    fn several_components_flatten_in_order() {
        assert_eq!(
            flatten_control_values(&raw(&[("pan", 3), ("tilt", 7)])),
            ControlValue::Multiple(vec![3, 7])
        );
        assert_eq!(
            flatten_control_values(&raw(&[("tilt", 7), ("pan", 3)])),
            ControlValue::Multiple(vec![7, 3])
        );
    }

    #[test]
    fn empty_flattens_to_empty_sequence() {
        assert_eq!(flatten_control_values(&ControlValues::new()), ControlValue::Multiple(vec![]));
    }

    #[test]
    fn unflatten_pairs_names_in_order() {
        let values =
            unflatten_control_value("absolute_pan_tilt", &["pan", "tilt"], &ControlValue::Multiple(vec![3, 7]))
                .unwrap();
        assert_eq!(values, raw(&[("pan", 3), ("tilt", 7)]));
        assert_eq!(flatten_control_values(&values), ControlValue::Multiple(vec![3, 7]));
    }

    #[test]
    fn unflatten_rejects_count_mismatch() {
        let err = unflatten_control_value("absolute_pan_tilt", &["pan", "tilt"], &ControlValue::Single(1))
            .unwrap_err();
        match err {
            UvcError::InvalidValue { control, reason } => {
                assert_eq!(control, "absolute_pan_tilt");
                assert!(reason.contains("expected 2"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

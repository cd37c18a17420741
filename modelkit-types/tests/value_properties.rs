//! Property tests for JSON number handling.

use modelkit_types::{FieldValue, NumberMode};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    /// Whole floats narrow to the same integer.
    #[test]
    fn narrow_mode_recovers_whole_numbers(i in -1_000_000_000i64..1_000_000_000) {
        let v = FieldValue::from_json(&json!(i as f64), NumberMode::Narrow);
        prop_assert_eq!(v, FieldValue::Int(i));
    }

    /// Exact mode never changes a float into an integer.
    #[test]
    fn exact_mode_preserves_float_tag(f in -1.0e9f64..1.0e9) {
        let v = FieldValue::from_json(&json!(f), NumberMode::Exact);
        prop_assert_eq!(v, FieldValue::Float(f));
    }

    /// Strings survive a trip through JSON unchanged.
    #[test]
    fn strings_survive_json(s in "[a-zA-Z0-9 ]{0,40}") {
        let v = FieldValue::from(s.clone());
        prop_assert_eq!(FieldValue::from_json(&v.to_json(), NumberMode::Exact), v);
    }
}

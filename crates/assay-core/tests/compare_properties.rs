use assay_core::{compare, FloatWidth, IntWidth, Outcome, Reflect, Type, Value};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::int),
        any::<u32>().prop_map(|v| v.reflect()),
        any::<i8>().prop_map(|v| v.reflect()),
        (-1.0e9..1.0e9_f64).prop_map(Value::float),
        ".{0,12}".prop_map(Value::str),
        proptest::collection::vec(any::<u8>(), 0..8).prop_map(Value::Bytes),
    ]
}

fn composite() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| Value::seq(Type::Dyn("any".into()), items)),
            proptest::collection::vec(inner.clone(), 0..3).prop_map(|items| {
                let fields = items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, value)| (format!("f{idx}"), value));
                Value::structure("Record", fields)
            }),
            inner.prop_map(Value::pointer_to),
        ]
    })
}

proptest! {
    #[test]
    fn comparison_is_reflexive(value in composite()) {
        prop_assert_eq!(compare(&value, &value.clone()), Outcome::Equal);
    }

    #[test]
    fn absent_never_equals_present(value in composite()) {
        prop_assert_eq!(compare(&Value::Absent, &value), Outcome::NotEqual);
        prop_assert_eq!(compare(&value, &Value::Absent), Outcome::NotEqual);
    }

    #[test]
    fn integers_compare_through_float_conversion(value in -1_000_000_i64..1_000_000) {
        prop_assert_eq!(compare(&Value::int(value), &Value::float(value as f64)), Outcome::Equal);
        prop_assert_eq!(compare(&Value::int(value), &Value::float(value as f64 + 0.5)), Outcome::NotEqual);
    }
}

#[test]
fn absent_equals_absent() {
    assert_eq!(compare(&Value::Absent, &Value::Absent), Outcome::Equal);
    assert_eq!(
        compare(&Value::Absent, &Value::nil_seq(Type::Str)),
        Outcome::Equal
    );
}

#[test]
fn nan_equals_nan() {
    let nan = Value::float(f64::NAN);
    assert_eq!(compare(&nan, &nan), Outcome::Equal);
    assert_eq!(compare(&nan, &Value::float(1.0)), Outcome::NotEqual);
    assert_eq!(
        compare(&Value::float(f64::NAN), &Value::float32(f32::NAN)),
        Outcome::Equal
    );
    assert_eq!(
        compare(&nan, &Value::float32(f32::MAX)),
        Outcome::NotEqual
    );
}

#[test]
fn conversion_runs_from_expected_to_actual() {
    let narrow = Value::Int {
        width: IntWidth::W8,
        value: 44,
    };
    assert_eq!(compare(&Value::int(300), &narrow), Outcome::Equal);
    assert_eq!(compare(&narrow, &Value::int(300)), Outcome::NotEqual);
    assert_eq!(
        compare(&Value::float(2.9), &Value::int(2)),
        Outcome::Equal
    );
    assert_eq!(
        compare(&Value::int(1), &Value::Float { width: FloatWidth::F32, value: 1.0 }),
        Outcome::Equal
    );
}

#[test]
fn unrelated_types_are_incomparable() {
    assert_eq!(compare(&Value::str("42"), &Value::int(42)), Outcome::Incomparable);
    assert_eq!(compare(&Value::Bool(true), &Value::int(1)), Outcome::Incomparable);
    assert_eq!(
        compare(&vec![1_i64].reflect(), &vec![1_i32].reflect()),
        Outcome::Incomparable
    );
    assert_eq!(
        compare(&Value::structure("A", Vec::<(String, Value)>::new()), &().reflect()),
        Outcome::Incomparable
    );
}

#[test]
fn strings_and_bytes_convert() {
    assert_eq!(
        compare(&Value::str("hi"), &Value::Bytes(b"hi".to_vec())),
        Outcome::Equal
    );
    assert_eq!(
        compare(&Value::Bytes(b"hi".to_vec()), &Value::str("ho")),
        Outcome::NotEqual
    );
}

#[test]
fn byte_vectors_are_byte_values() {
    let buffer = b"abc".to_vec().reflect();
    assert_eq!(compare(&"abc".reflect(), &buffer), Outcome::Equal);
    assert_eq!(compare(&"abd".reflect(), &buffer), Outcome::NotEqual);
    assert_eq!(compare(&buffer, &"abc".reflect()), Outcome::Equal);
    assert_eq!(compare(&Value::Bytes(b"abc".to_vec()), &buffer), Outcome::Equal);
    assert_eq!(compare(&buffer, &Value::Bytes(b"abd".to_vec())), Outcome::NotEqual);
}

#[test]
fn maps_with_repeated_keys_compare_symmetrically() {
    let int = Type::Int(IntWidth::W64);
    let repeated = Value::map(
        Type::Str,
        int.clone(),
        vec![(Value::str("a"), Value::int(1)), (Value::str("a"), Value::int(1))],
    );
    let distinct = Value::map(
        Type::Str,
        int,
        vec![(Value::str("a"), Value::int(1)), (Value::str("b"), Value::int(2))],
    );
    assert_eq!(compare(&repeated, &distinct), Outcome::NotEqual);
    assert_eq!(compare(&distinct, &repeated), Outcome::NotEqual);
}

#[test]
fn structures_compare_deeply() {
    let left = Box::new(vec!["a".to_string(), "b".to_string()]).reflect();
    let right = Box::new(vec!["a".to_string(), "b".to_string()]).reflect();
    assert_eq!(compare(&left, &right), Outcome::Equal);
    let other = Box::new(vec!["a".to_string()]).reflect();
    assert_eq!(compare(&left, &other), Outcome::NotEqual);
}

#[test]
fn errors_compare_by_message() {
    let left = Value::from_error(&std::fmt::Error);
    let right = Value::from_error(&std::fmt::Error);
    assert_eq!(compare(&left, &right), Outcome::Equal);
    assert_eq!(compare(&Value::nil_error(), &left), Outcome::NotEqual);
}

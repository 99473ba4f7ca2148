use assay_core::{is_nil_like, IntWidth, Reflect, Type, Value};

fn unset_references() -> Vec<(&'static str, Value)> {
    let int = Type::Int(IntWidth::W64);
    vec![
        ("absent", Value::Absent),
        ("channel", Value::nil_chan(int.clone())),
        ("function", Value::nil_func("fn()")),
        ("mapping", Value::nil_map(Type::Str, int.clone())),
        ("pointer", Value::nil_pointer(Type::Struct("Point".into()))),
        ("interface", Value::nil_error()),
        ("sequence", Value::nil_seq(int)),
    ]
}

#[test]
fn unset_reference_kinds_are_nil_like() {
    for (kind, value) in unset_references() {
        assert!(is_nil_like(&value), "unset {kind} should be nil-like");
    }
}

#[test]
fn interface_holding_unset_pointer_is_nil_like() {
    let value = Value::boxed("any", Value::nil_pointer(Type::Bool));
    assert!(is_nil_like(&value));
}

#[test]
fn zero_values_are_not_nil_like() {
    let zeroed = Value::structure("Point", [("x", Value::int(0)), ("y", Value::int(0))]);
    let candidates = [
        zeroed,
        ().reflect(),
        0_i32.reflect(),
        0.0_f64.reflect(),
        false.reflect(),
        String::new().reflect(),
        Value::seq(Type::Str, Vec::new()),
        Value::map(Type::Str, Type::Str, Vec::new()),
        [0_u8; 0].reflect(),
    ];
    for value in candidates {
        assert!(!is_nil_like(&value), "{value:?} should not be nil-like");
    }
}

#[test]
fn populated_references_are_not_nil_like() {
    let values = [
        Value::pointer_to(Value::int(42)),
        Value::func("fn()", 0x10),
        Value::chan(Type::Bool, 7, Vec::new()),
        Value::from_error(&std::fmt::Error),
    ];
    for value in values {
        assert!(!is_nil_like(&value), "{value:?} should not be nil-like");
    }
}

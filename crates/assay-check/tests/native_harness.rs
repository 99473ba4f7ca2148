use assay_check::{Type, Value};

#[test]
fn free_functions_pass_quietly() {
    assay_check::equal(42, 42)
        .not_equal(1, 2)
        .is_true(true)
        .nil(Value::nil_seq(Type::Str))
        .not_nil("x")
        .len(2, vec!["a", "b"]);
    assay_check::present(1);
    assay_check::error(Some(&std::fmt::Error), &["an error occurred when formatting an argument"]);
    assay_check::panics(|| panic!("expected"));
}

#[test]
#[should_panic(expected = "\nExpected:\n1\ngot:\n2")]
fn failing_equal_panics_with_diff() {
    assay_check::equal(1, 2);
}

#[test]
#[should_panic(expected = "to not equal:")]
fn failing_not_equal_panics_with_diff() {
    assay_check::not_equal("same", "same");
}

#[test]
#[should_panic(expected = "Cannot get the length of 3.5")]
fn len_of_float_panics() {
    assay_check::len(1, 3.5);
}

#[test]
#[should_panic(expected = "native_harness.rs")]
fn failure_names_the_test_file() {
    assay_check::is_false(true);
}

use reckon::{is_variable_code, resolve_code, OpTable, Operation};
use std::f64::consts::PI;

#[test]
fn unknown_codes_yield_none() {
    let table = OpTable::new();
    assert!(table.lookup("BOGUS").is_none());
    assert!(table.lookup("inv_BOGUS").is_none());
    assert!(table.lookup("").is_none());
}

#[test]
fn every_lowercase_letter_is_a_variable() {
    let table = OpTable::new();
    for c in 'a'..='z' {
        let code = c.to_string();
        assert!(is_variable_code(&code));
        assert!(matches!(table.lookup(&code), Some(Operation::Memory)));
    }
    assert!(!is_variable_code("aa"));
    assert!(!is_variable_code("A"));
    assert!(!is_variable_code("π"));
    assert!(!is_variable_code(""));
}

#[test]
fn resolve_code_folds_mode_flags() {
    assert_eq!(resolve_code("sin", false, true), "sinDeg");
    assert_eq!(resolve_code("sin", false, false), "sinRad");
    assert_eq!(resolve_code("sin", true, false), "inv_sinRad");
    assert_eq!(resolve_code("tan", true, true), "inv_tanDeg");
    assert_eq!(resolve_code("√", true, false), "inv_√");
    assert_eq!(resolve_code("+", false, true), "+");
}

#[test]
fn factorial_entries() {
    let table = OpTable::new();
    let Some(Operation::Unary(f)) = table.lookup("!") else {
        panic!("`!` must be a unary operation");
    };
    assert_eq!(f(0.0), 1.0);
    assert_eq!(f(1.0), 1.0);
    assert_eq!(f(5.0), 120.0);
}

#[test]
fn inverse_arithmetic_entries() {
    let table = OpTable::new();
    let Some(Operation::Binary(power)) = table.lookup("inv_×") else {
        panic!("`inv_×` must be binary");
    };
    assert_eq!(power(2.0, 10.0), 1024.0);

    let Some(Operation::Binary(root)) = table.lookup("inv_÷") else {
        panic!("`inv_÷` must be binary");
    };
    assert!((root(8.0, 3.0) - 2.0).abs() < 1e-12);
}

#[test]
fn constants_and_trig_entries() {
    let table = OpTable::new();
    assert!(matches!(table.lookup("π"), Some(Operation::Constant(v)) if v == PI));

    let Some(Operation::Unary(sin_deg)) = table.lookup("sinDeg") else {
        panic!("`sinDeg` must be unary");
    };
    assert!((sin_deg(90.0) - 1.0).abs() < 1e-12);

    let Some(Operation::Unary(asin_deg)) = table.lookup("inv_sinDeg") else {
        panic!("`inv_sinDeg` must be unary");
    };
    assert!((asin_deg(1.0) - 90.0).abs() < 1e-12);
}

#[test]
fn equals_resolves_with_and_without_inverse() {
    let table = OpTable::new();
    assert!(matches!(table.lookup("="), Some(Operation::Equals)));
    assert!(matches!(table.lookup("inv_="), Some(Operation::Equals)));
}

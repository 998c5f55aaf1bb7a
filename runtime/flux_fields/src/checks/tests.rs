use super::*;
use flux_any::make_any_input;
use pretty_assertions::assert_eq;

#[test]
fn custom_check_runs_the_predicate() {
    let check = InputCheck::new("even", |v: &i32| v % 2 == 0);
    assert!(check.accepts(&make_any_input(4)));
    assert!(!check.accepts(&make_any_input(3)));
    assert_eq!(check.description(), "even");
}

#[test]
fn wrong_type_fails_the_check() {
    let check = InputCheck::new("even", |v: &i32| v % 2 == 0);
    assert!(!check.accepts(&make_any_input(4.0_f64)));
}

#[test]
fn greater_than_describes_itself() {
    let check = greater_than(0.0_f64);
    assert_eq!(check.description(), "> 0.0");
    assert!(check.accepts(&make_any_input(1.0_f64)));
    assert!(!check.accepts(&make_any_input(0.0_f64)));
}

#[test]
fn less_than_compares_strictly() {
    let check = less_than(10_i32);
    assert!(check.accepts(&make_any_input(9)));
    assert!(!check.accepts(&make_any_input(10)));
}

#[test]
fn not_equal_rejects_the_bound() {
    let check = not_equal(4_i32);
    assert_eq!(check.description(), "!= 4");
    assert!(check.accepts(&make_any_input(3)));
    assert!(!check.accepts(&make_any_input(4)));
}

#[test]
fn in_range_is_a_closed_interval() {
    let check = in_range(0_i32, 5_i32);
    assert_eq!(check.description(), "in [0, 5]");
    assert!(check.accepts(&make_any_input(0)));
    assert!(check.accepts(&make_any_input(5)));
    assert!(!check.accepts(&make_any_input(6)));
}

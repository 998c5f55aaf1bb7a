use super::*;
use crate::test_fixtures::{Area, OneOut};
use pretty_assertions::assert_eq;

#[test]
fn lambda_with_no_inputs_returns_its_value() {
    let module = make_lambda::<OneOut, _>(|()| Ok((2,))).unwrap();
    let (value,) = module.run_as::<OneOut>(()).unwrap();
    assert_eq!(value, 2);
}

#[test]
fn lambda_receives_the_unwrapped_inputs() {
    let module = make_lambda::<Area, _>(|(d1, d2)| Ok((d1 * d2,))).unwrap();
    let (area,) = module.run_as::<Area>((2.0, 3.5)).unwrap();
    assert_eq!(area, 7.0);
}

#[test]
fn lambda_errors_propagate_unchanged() {
    let module = make_lambda::<OneOut, _>(|()| {
        Err(ModuleError::Runtime {
            reason: "deliberate".to_string(),
        })
    })
    .unwrap();
    assert!(matches!(
        module.run_as::<OneOut>(()),
        Err(ModuleError::Runtime { .. })
    ));
}

#[test]
fn facade_returns_its_fixed_values() {
    let module = make_facade::<OneOut>((2,)).unwrap();
    let (value,) = module.run_as::<OneOut>(()).unwrap();
    assert_eq!(value, 2);
}

#[test]
fn facades_are_not_memoizable_until_asked() {
    let module = make_facade::<OneOut>((2,)).unwrap();
    assert!(!module.is_memoizable());
    module.turn_on_memoization();
    assert!(module.is_memoizable());
}

#[test]
fn lambdas_satisfy_their_contract() {
    let module = make_lambda::<Area, _>(|(d1, d2)| Ok((d1 * d2,))).unwrap();
    assert!(module.satisfies::<Area>());
    assert!(!module.satisfies::<OneOut>());
}

#[test]
fn lambdas_rerun_every_call() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let module = make_lambda::<OneOut, _>(move |()| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok((2,))
    })
    .unwrap();
    module.run_as::<OneOut>(()).unwrap();
    // A fresh unlocked copy runs again: no cache, no memoization.
    module.unlocked_copy().run_as::<OneOut>(()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

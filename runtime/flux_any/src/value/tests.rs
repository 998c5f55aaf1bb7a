use super::*;
use std::sync::Arc;

#[test]
fn eq_value_matches_same_type_and_value() {
    let a: Box<dyn FieldValue> = Box::new(3_i32);
    let b: Box<dyn FieldValue> = Box::new(3_i32);
    assert!(a.eq_value(b.as_ref()));
}

#[test]
fn eq_value_rejects_different_types() {
    let a: Box<dyn FieldValue> = Box::new(3_i32);
    let b: Box<dyn FieldValue> = Box::new(3_i64);
    assert!(!a.eq_value(b.as_ref()));
}

#[test]
fn partial_cmp_orders_same_type() {
    let a: Box<dyn FieldValue> = Box::new(1.5_f64);
    let b: Box<dyn FieldValue> = Box::new(2.5_f64);
    assert_eq!(a.partial_cmp_value(b.as_ref()), Some(Ordering::Less));
}

#[test]
fn partial_cmp_is_none_across_types() {
    let a: Box<dyn FieldValue> = Box::new(1.5_f64);
    let b: Box<dyn FieldValue> = Box::new(String::from("x"));
    assert_eq!(a.partial_cmp_value(b.as_ref()), None);
}

#[test]
fn clone_boxed_is_a_distinct_allocation() {
    let a: Box<dyn FieldValue> = Box::new(vec![1, 2, 3]);
    let b = a.clone_boxed();
    assert!(a.eq_value(b.as_ref()));
    let a_ptr: *const Vec<i32> = a.as_any().downcast_ref::<Vec<i32>>().unwrap();
    let b_ptr: *const Vec<i32> = b.as_any().downcast_ref::<Vec<i32>>().unwrap();
    assert_ne!(a_ptr, b_ptr);
}

#[test]
fn arc_downcast_round_trips() {
    let a: Arc<dyn FieldValue> = Arc::new(String::from("hello"));
    let any = a.into_any_arc();
    let s = any.downcast::<String>().unwrap();
    assert_eq!(*s, "hello");
}

#[test]
fn fingerprint_distinguishes_values() {
    let mut fp_a = Fingerprinter::new();
    42_i32.fingerprint(&mut fp_a).unwrap();
    let mut fp_b = Fingerprinter::new();
    43_i32.fingerprint(&mut fp_b).unwrap();
    assert_ne!(fp_a.finish(), fp_b.finish());
}

#[test]
fn fingerprint_distinguishes_types_with_equal_bytes() {
    // 1u32 and 1i32 encode identically; the type name disambiguates.
    let mut fp_a = Fingerprinter::new();
    1_u32.fingerprint(&mut fp_a).unwrap();
    let mut fp_b = Fingerprinter::new();
    1_i32.fingerprint(&mut fp_b).unwrap();
    assert_ne!(fp_a.finish(), fp_b.finish());
}

#[test]
fn fingerprint_is_deterministic() {
    let value = vec![1.0_f64, 2.0, 3.0];
    let mut fp_a = Fingerprinter::new();
    value.fingerprint(&mut fp_a).unwrap();
    let mut fp_b = Fingerprinter::new();
    value.fingerprint(&mut fp_b).unwrap();
    assert_eq!(fp_a.finish(), fp_b.finish());
}

//! End-to-end behavior of declared record types.

use std::sync::Arc;

use structbase::{FieldSpec, StructError, StructType, Symbol, Value, struct_type};

fn point() -> Arc<StructType> {
    struct_type!(Point { x, y })
}

fn config() -> Arc<StructType> {
    struct_type!(Config { x: 5, y: true })
}

fn flags() -> Arc<StructType> {
    struct_type!(unordered Flags { x: 5, y: true })
}

#[test]
fn positional_binding() {
    let point = point();
    let bs = point
        .construct(&[Value::from(2), Value::from("blah")], &[])
        .unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(2)));
    assert_eq!(bs.get("y"), Some(&Value::from("blah")));
}

#[test]
fn keyword_binding() {
    let point = point();
    let bs = point
        .construct(&[], &[("x", Value::from(2)), ("y", Value::from("blah"))])
        .unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(2)));
    assert_eq!(bs.get("y"), Some(&Value::from("blah")));
}

#[test]
fn mixed_binding() {
    let point = point();
    let bs = point
        .construct(&[Value::from(2)], &[("y", Value::from("blah"))])
        .unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(2)));
    assert_eq!(bs.get("y"), Some(&Value::from("blah")));
}

#[test]
fn unbound_fields_are_null() {
    let point = point();
    let bs = point.construct(&[Value::from(2)], &[]).unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(2)));
    assert_eq!(bs.get("y"), Some(&Value::Null));

    let bs = point.construct(&[], &[("y", Value::from(2))]).unwrap();
    assert_eq!(bs.get("x"), Some(&Value::Null));
    assert_eq!(bs.get("y"), Some(&Value::from(2)));
}

#[test]
fn keyword_wins_over_positional() {
    let point = point();
    let bs = point
        .construct(&[Value::from(1), Value::from(2)], &[("x", Value::from(7))])
        .unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(7)));
    assert_eq!(bs.get("y"), Some(&Value::from(2)));
}

#[test]
fn excess_positional_arguments_dropped() {
    let point = point();
    let bs = point
        .construct(
            &[Value::from(1), Value::from(2), Value::from(3), Value::from(4)],
            &[],
        )
        .unwrap();
    let expected = point
        .construct(&[Value::from(1), Value::from(2)], &[])
        .unwrap();
    assert_eq!(bs, expected);
}

#[test]
fn unknown_keyword_rejected() {
    let point = point();
    let err = point
        .construct(&[], &[("z", Value::from(1))])
        .unwrap_err();
    assert_eq!(err, StructError::unknown_field("Point", "z"));
}

#[test]
fn comparisons() {
    let point = point();
    let small = point
        .construct(&[Value::from(1), Value::from("irrelevant")], &[])
        .unwrap();
    let medium = point
        .construct(&[Value::from(2), Value::from(5)], &[])
        .unwrap();
    let another_medium = point
        .construct(&[Value::from(2), Value::from(5)], &[])
        .unwrap();
    let large = point
        .construct(&[Value::from(2), Value::from(15)], &[])
        .unwrap();

    assert_eq!(medium, another_medium);

    assert!(small < medium);
    assert!(small < large);
    assert!(small <= medium);
    assert!(small <= large);
    assert!(medium < large);
    assert!(medium <= another_medium);
    assert!(another_medium <= medium);

    assert!(medium > small);
    assert!(large > small);
    assert!(medium >= small);
    assert!(large >= medium);
    assert!(large > medium);
    assert!(medium >= another_medium);
    assert!(another_medium >= medium);

    assert!(small != medium);
    assert!(medium != small);
    assert!(medium != large);
    assert!(large != medium);
}

#[test]
fn cross_type_comparison() {
    let point = point();
    // Same name, same shape, separate declaration: a distinct type.
    let doppelganger = struct_type!(Point { x, y });
    let a = point
        .construct(&[Value::from(1), Value::from(2)], &[])
        .unwrap();
    let b = doppelganger
        .construct(&[Value::from(1), Value::from(2)], &[])
        .unwrap();

    assert_ne!(a, b);
    assert_eq!(a.partial_cmp(&b), None);
    assert!(!(a < b));
    assert!(!(a > b));
    assert_eq!(
        a.try_cmp(&b),
        Err(StructError::not_comparable("Point", "Point"))
    );
}

#[test]
fn incomparable_field_values_poison_ordering() {
    let point = point();
    let ints = point
        .construct(&[Value::from(1), Value::from(2)], &[])
        .unwrap();
    let strings = point
        .construct(&[Value::from("a"), Value::from("b")], &[])
        .unwrap();

    assert_ne!(ints, strings);
    assert_eq!(ints.partial_cmp(&strings), None);
    assert!(ints.try_cmp(&strings).is_err());
}

#[test]
fn repr() {
    let point = point();
    let bs = point
        .construct(&[Value::from(1), Value::from("irrelevant")], &[])
        .unwrap();
    assert_eq!(bs.to_string(), "Point(x=1, y='irrelevant')");
    assert_eq!(format!("{bs:?}"), "Point(x=1, y='irrelevant')");
}

#[test]
fn repr_is_stable_for_equal_records() {
    let point = point();
    let a = point
        .construct(&[Value::from(2), Value::from(5)], &[])
        .unwrap();
    let b = point
        .construct(&[], &[("y", Value::from(5)), ("x", Value::from(2))])
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn hashing() {
    let point = point();
    let small = point
        .construct(&[Value::from(1), Value::from("irrelevant")], &[])
        .unwrap();
    let medium = point
        .construct(&[Value::from(2), Value::from(5)], &[])
        .unwrap();
    let another_medium = point
        .construct(&[Value::from(2), Value::from(5)], &[])
        .unwrap();
    let large = point
        .construct(&[Value::from(2), Value::from(15)], &[])
        .unwrap();

    assert_ne!(
        small.try_hash_value().unwrap(),
        medium.try_hash_value().unwrap()
    );
    assert_ne!(
        medium.try_hash_value().unwrap(),
        large.try_hash_value().unwrap()
    );
    assert_eq!(
        medium.try_hash_value().unwrap(),
        another_medium.try_hash_value().unwrap()
    );
}

#[test]
fn equal_numeric_records_hash_equal() {
    let point = point();
    let ints = point
        .construct(&[Value::from(1), Value::from(2)], &[])
        .unwrap();
    let floats = point
        .construct(&[Value::from(1.0), Value::from(2.0)], &[])
        .unwrap();
    assert_eq!(ints, floats);
    assert_eq!(
        ints.try_hash_value().unwrap(),
        floats.try_hash_value().unwrap()
    );
}

#[test]
fn unhashable_field_value() {
    let point = point();
    let bs = point
        .construct(&[Value::from(1), Value::list(vec![])], &[])
        .unwrap();
    assert_eq!(bs.try_hash_value().unwrap_err(), StructError::Unhashable("list"));
}

#[test]
fn to_map() {
    let point = point();
    let bs = point
        .construct(&[Value::from(1), Value::from(2)], &[])
        .unwrap();
    let map = bs.to_map(false);

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&Symbol::intern("x")), Some(&Value::from(1)));
    assert_eq!(map.get(&Symbol::intern("y")), Some(&Value::from(2)));
    // Declaration order carries over.
    let names: Vec<_> = map.keys().map(|k| k.to_string()).collect();
    assert_eq!(names, ["x", "y"]);
}

#[test]
fn to_map_copy_semantics() {
    let point = point();
    let list = Value::list(vec![]);
    let bs = point
        .construct(&[Value::from(1), list.clone()], &[])
        .unwrap();
    let aliased = bs.to_map(false);
    let copied = bs.to_map(true);

    list.as_list().unwrap().write().push(Value::from(1));

    let y = Symbol::intern("y");
    assert_eq!(aliased.get(&y), Some(&Value::list(vec![Value::from(1)])));
    assert_eq!(copied.get(&y), Some(&Value::list(vec![])));
}

#[test]
fn ordered_defaults() {
    let config = config();
    let bs = config.construct(&[], &[]).unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(5)));
    assert_eq!(bs.get("y"), Some(&Value::from(true)));

    let bs = config.construct(&[Value::from(0)], &[]).unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(0)));
    assert_eq!(bs.get("y"), Some(&Value::from(true)));

    let bs = config.construct(&[], &[("y", Value::from(false))]).unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(5)));
    assert_eq!(bs.get("y"), Some(&Value::from(false)));
}

#[test]
fn unordered_defaults() {
    let flags = flags();
    let bs = flags.construct(&[], &[]).unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(5)));
    assert_eq!(bs.get("y"), Some(&Value::from(true)));

    let bs = flags.construct(&[], &[("x", Value::from(0))]).unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(0)));
    assert_eq!(bs.get("y"), Some(&Value::from(true)));
}

#[test]
fn unordered_rejects_positional() {
    let flags = flags();
    assert_eq!(
        flags.construct(&[Value::from(0)], &[]).unwrap_err(),
        StructError::positional_on_unordered("Flags")
    );
    assert_eq!(
        flags
            .construct(&[Value::from(false)], &[("x", Value::from(0))])
            .unwrap_err(),
        StructError::positional_on_unordered("Flags")
    );
}

#[test]
fn defaults_are_not_shared_between_instances() {
    let holder = struct_type!(Holder { items: Vec::<Value>::new() });
    let a = holder.construct(&[], &[]).unwrap();
    let b = holder.construct(&[], &[]).unwrap();

    a.get("items")
        .unwrap()
        .as_list()
        .unwrap()
        .write()
        .push(Value::from(1));

    assert_ne!(a, b);
    assert_eq!(b.get("items"), Some(&Value::list(vec![])));
}

#[test]
fn set_rebinds_fields() {
    let point = point();
    let mut bs = point
        .construct(&[Value::from(1), Value::from(2)], &[])
        .unwrap();
    bs.set("x", Value::from(9)).unwrap();
    assert_eq!(bs.get("x"), Some(&Value::from(9)));
    assert_eq!(
        bs.set("z", Value::from(0)).unwrap_err(),
        StructError::unknown_field("Point", "z")
    );
}

#[test]
fn iteration_is_ordered_and_restartable() {
    let point = point();
    let bs = point
        .construct(&[Value::from(1), Value::from(2)], &[])
        .unwrap();

    let names: Vec<_> = bs.iter().map(|(name, _)| name.to_string()).collect();
    assert_eq!(names, ["x", "y"]);

    let first: Vec<_> = bs.iter().collect();
    let second: Vec<_> = (&bs).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(bs.iter().len(), 2);
}

#[test]
fn shared_field_values_alias() {
    let point = point();
    let list = Value::list(vec![Value::from(1)]);
    let a = point
        .construct(&[list.clone(), Value::from(0)], &[])
        .unwrap();
    let b = a.clone();

    // Shallow clones observe each other's container mutations.
    a.get("x").unwrap().as_list().unwrap().write().push(Value::from(2));
    assert_eq!(
        b.get("x"),
        Some(&Value::list(vec![Value::from(1), Value::from(2)]))
    );

    // A deep clone does not.
    let isolated = a.deep_clone();
    list.as_list().unwrap().write().push(Value::from(3));
    assert_eq!(isolated.get("x").unwrap().as_list().unwrap().read().len(), 2);
}

#[test]
fn nested_records() {
    let point = point();
    let wrapper = struct_type!(Wrapper { inner, tag });
    let p = point
        .construct(&[Value::from(1), Value::from(2)], &[])
        .unwrap();
    let w = wrapper
        .construct(&[Value::from(p.clone()), Value::from("w")], &[])
        .unwrap();

    assert_eq!(w.to_string(), "Wrapper(inner=Point(x=1, y=2), tag='w')");
    assert!(w.try_hash_value().is_ok());

    let w2 = wrapper
        .construct(&[Value::from(p), Value::from("w")], &[])
        .unwrap();
    assert_eq!(w, w2);
    assert_eq!(
        w.try_hash_value().unwrap(),
        w2.try_hash_value().unwrap()
    );
}

#[test]
fn empty_field_list() {
    let unit = StructType::new("Unit", FieldSpec::names(Vec::<&str>::new()).unwrap());
    let u = unit.construct(&[], &[]).unwrap();
    assert!(u.is_empty());
    assert_eq!(u.to_string(), "Unit()");
    assert_eq!(u, unit.construct(&[], &[]).unwrap());
}

use crate::error::Error;
use crate::{Compound, List, Tag, Value};

#[test]
fn value_tags_are_fixed() {
    assert_eq!(Value::Byte(0).tag(), Tag::Byte);
    assert_eq!(Value::String("".into()).tag(), Tag::String);
    assert_eq!(Value::List(List::default()).tag(), Tag::List);
    assert_eq!(Value::Compound(Compound::new()).tag(), Tag::Compound);
    assert_eq!(Value::LongArray(vec![]).tag(), Tag::LongArray);
}

#[test]
fn list_rejects_mismatched_element() {
    let mut list = List::new(Tag::Int).unwrap();
    list.push(1i32).unwrap();

    let err = list.push("nope").unwrap_err();
    assert!(matches!(
        err,
        Error::ListElementMismatch {
            expected: Tag::Int,
            actual: Tag::String,
        }
    ));
    assert_eq!(list.len(), 1);
}

#[test]
fn empty_list_adopts_first_element_tag() {
    let mut list = List::default();
    assert_eq!(list.element_tag(), Tag::End);

    list.push(3.5f64).unwrap();
    assert_eq!(list.element_tag(), Tag::Double);
    assert!(list.push(1i8).is_err());
}

#[test]
fn end_typed_list_cannot_be_created_explicitly() {
    assert!(List::new(Tag::End).is_err());
}

#[test]
fn list_insert_and_set_validate() {
    let mut list = List::new(Tag::Short).unwrap();
    list.push(1i16).unwrap();
    list.push(3i16).unwrap();

    list.insert(1, 2i16).unwrap();
    assert!(list.insert(0, 9i64).is_err());

    let old = list.set(0, 10i16).unwrap();
    assert_eq!(old, Value::Short(1));
    assert!(list.set(0, "wrong").is_err());

    let values: Vec<_> = list.iter().cloned().collect();
    assert_eq!(
        values,
        vec![Value::Short(10), Value::Short(2), Value::Short(3)]
    );
}

#[test]
fn list_from_values_checks_homogeneity() {
    let ok = List::try_from(vec![Value::Int(1), Value::Int(2)]).unwrap();
    assert_eq!(ok.element_tag(), Tag::Int);

    let err = List::try_from(vec![Value::Int(1), Value::Byte(2)]);
    assert!(err.is_err());
}

#[test]
fn list_from_primitive_vecs() {
    let list = List::from(vec![1i32, 2, 3]);
    assert_eq!(list.element_tag(), Tag::Int);
    assert_eq!(list[2], Value::Int(3));

    let list = List::from(vec!["a", "b"]);
    assert_eq!(list.element_tag(), Tag::String);

    // Empty vectors still produce a typed list.
    let list = List::from(Vec::<f64>::new());
    assert_eq!(list.element_tag(), Tag::Double);
    assert!(list.is_empty());
    assert!(list.clone().push(1i8).is_err());
}

#[test]
fn compound_preserves_insertion_order() {
    let mut compound = Compound::new();
    compound.insert("zebra", 1i32);
    compound.insert("apple", 2i32);
    compound.insert("mango", 3i32);
    compound.remove("apple");
    compound.insert("apple", 4i32);

    let keys: Vec<_> = compound.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zebra", "mango", "apple"]);
}

#[test]
fn compound_insert_replaces() {
    let mut compound = Compound::new();
    assert_eq!(compound.insert("a", 1i32), None);
    assert_eq!(compound.insert("a", 2i32), Some(Value::Int(1)));
    assert_eq!(compound.int("a"), Some(2));
    assert_eq!(compound.len(), 1);
}

#[test]
fn typed_getters() {
    let mut compound = Compound::new();
    compound.insert("b", 1i8);
    compound.insert("s", "text");
    compound.insert("arr", vec![1i64, 2]);

    assert_eq!(compound.byte("b"), Some(1));
    assert_eq!(compound.string("s"), Some("text"));
    assert_eq!(compound.long_array("arr"), Some(&[1i64, 2][..]));
    // Wrong type reads as absent.
    assert_eq!(compound.int("b"), None);
    assert_eq!(compound.string("missing"), None);
}

#[test]
fn byte_bool_view() {
    assert_eq!(Value::Byte(1).as_bool(), Some(true));
    assert_eq!(Value::Byte(0).as_bool(), Some(false));
    // Only exactly 1 reads as true; other values are preserved verbatim.
    assert_eq!(Value::Byte(2).as_bool(), Some(false));
    assert_eq!(Value::from(true), Value::Byte(1));
    assert_eq!(Value::Int(1).as_bool(), None);
}

#[test]
fn clone_is_deep() {
    let mut inner = List::new(Tag::Int).unwrap();
    inner.push(1i32).unwrap();

    let mut original = Compound::new();
    original.insert("list", inner);
    original.insert("data", vec![1i8, 2, 3]);

    let mut copy = original.clone();
    assert_eq!(copy, original);

    match copy.get_mut("data") {
        Some(Value::ByteArray(data)) => data[0] = 99,
        _ => panic!("expected byte array"),
    }

    assert_ne!(copy, original);
    assert_eq!(original.byte_array("data"), Some(&[1i8, 2, 3][..]));
}

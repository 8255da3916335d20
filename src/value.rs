use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::Tag;

/// A complete NBT value. It owns its data. Compounds and lists own their
/// children recursively, so [`Clone`] produces a fully independent deep copy.
///
/// A value does not carry its own name: names exist only as the keys of the
/// enclosing [`Compound`], and the name of the root tag travels alongside the
/// root value at the read/write API boundary. List elements are positional
/// and have no name, which the model makes unrepresentable rather than
/// merely invalid.
///
/// There is no `End` variant. The End sentinel exists purely on the wire, as
/// a compound's terminator byte and as the element type of the canonical
/// empty list; it can never be built or written as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Value {
    /// The wire tag for this value. Fixed for the life of the value.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v as i64),
            Value::Short(v) => Some(v as i64),
            Value::Int(v) => Some(v as i64),
            Value::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Boolean view of a Byte tag. NBT has no boolean type; by convention
    /// only a byte equal to 1 reads as true, other values are preserved
    /// verbatim and read as false.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Byte(v) => Some(v == 1),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Value {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(u16, Short, as i16);
from!(i32, Int);
from!(u32, Int, as i32);
from!(i64, Long);
from!(u64, Long, as i64);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(Vec<i8>, ByteArray);
from!(Vec<i32>, IntArray);
from!(Vec<i64>, LongArray);
from!(List, List);
from!(Compound, Compound);

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}

/// An ordered sequence of values that all share one tag.
///
/// A list declares its element tag up front. The empty list created by
/// [`List::default`] is End-typed: it accepts the first element of any tag
/// and adopts that tag. Once a list is typed, pushing a value of a different
/// tag fails with [`Error::ListElementMismatch`]; an End-typed element can
/// never exist because [`Value`] has no End variant.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element: Tag,
    values: Vec<Value>,
}

impl Default for List {
    /// The canonical empty, typeless list: element tag End, no elements.
    fn default() -> Self {
        List {
            element: Tag::End,
            values: Vec::new(),
        }
    }
}

impl List {
    /// Create an empty list that will only accept elements of `element`.
    ///
    /// Fails with [`Error::UnexpectedEndTag`] for [`Tag::End`]; use
    /// [`List::default`] for the empty typeless list.
    pub fn new(element: Tag) -> Result<Self> {
        if element == Tag::End {
            return Err(Error::UnexpectedEndTag);
        }
        Ok(List {
            element,
            values: Vec::new(),
        })
    }

    /// The declared element tag. [`Tag::End`] only for the empty typeless
    /// list.
    pub fn element_tag(&self) -> Tag {
        self.element
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Append a value, adopting its tag if the list is still typeless.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check(&value)?;
        self.values.push(value);
        Ok(())
    }

    /// Insert a value at `index`, shifting later elements.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check(&value)?;
        self.values.insert(index, value);
        Ok(())
    }

    /// Replace the element at `index`, returning the previous value.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        self.check(&value)?;
        Ok(std::mem::replace(&mut self.values[index], value))
    }

    pub fn remove(&mut self, index: usize) -> Value {
        self.values.remove(index)
    }

    fn check(&mut self, value: &Value) -> Result<()> {
        if self.element == Tag::End && self.values.is_empty() {
            self.element = value.tag();
        } else if value.tag() != self.element {
            return Err(Error::ListElementMismatch {
                expected: self.element,
                actual: value.tag(),
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<Value>> for List {
    type Error = Error;

    /// Build a list from values, failing if they are not all of one tag.
    fn try_from(values: Vec<Value>) -> Result<Self> {
        let mut list = List::default();
        for value in values {
            list.push(value)?;
        }
        Ok(list)
    }
}

// Building a list of one primitive type cannot violate homogeneity, so
// these conversions are infallible; an empty vector still yields a list
// typed for its element.
macro_rules! list_from {
    ($($type:ty => $tag:ident),* $(,)?) => {$(
        impl From<Vec<$type>> for List {
            fn from(values: Vec<$type>) -> Self {
                List {
                    element: Tag::$tag,
                    values: values.into_iter().map(Value::from).collect(),
                }
            }
        }
    )*};
}
list_from! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
}

impl From<Vec<&str>> for List {
    fn from(values: Vec<&str>) -> Self {
        List {
            element: Tag::String,
            values: values.into_iter().map(Value::from).collect(),
        }
    }
}

impl std::ops::Index<usize> for List {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// A mapping from name to value, preserving insertion order.
///
/// The key *is* the child's name, so every member is named by construction
/// and names can never fall out of sync with keys. Renaming a member is
/// [`Compound::remove`] followed by [`Compound::insert`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound(IndexMap<String, Value>);

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member, returning the previous value for that name if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.0.get_mut(name)
    }

    /// Remove a member, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    pub fn byte(&self, name: &str) -> Option<i8> {
        match self.get(name) {
            Some(&Value::Byte(v)) => Some(v),
            _ => None,
        }
    }

    pub fn short(&self, name: &str) -> Option<i16> {
        match self.get(name) {
            Some(&Value::Short(v)) => Some(v),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name) {
            Some(&Value::Int(v)) => Some(v),
            _ => None,
        }
    }

    pub fn long(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(&Value::Long(v)) => Some(v),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name) {
            Some(&Value::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn double(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(&Value::Double(v)) => Some(v),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn list(&self, name: &str) -> Option<&List> {
        self.get(name).and_then(Value::as_list)
    }

    pub fn compound(&self, name: &str) -> Option<&Compound> {
        self.get(name).and_then(Value::as_compound)
    }

    pub fn byte_array(&self, name: &str) -> Option<&[i8]> {
        match self.get(name) {
            Some(Value::ByteArray(v)) => Some(v),
            _ => None,
        }
    }

    pub fn int_array(&self, name: &str) -> Option<&[i32]> {
        match self.get(name) {
            Some(Value::IntArray(v)) => Some(v),
            _ => None,
        }
    }

    pub fn long_array(&self, name: &str) -> Option<&[i64]> {
        match self.get(name) {
            Some(Value::LongArray(v)) => Some(v),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Compound(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Compound {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())))
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

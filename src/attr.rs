/*!
# Attribute Store

Every node, every edge and the graph itself carry an [`AttrMap`]: a mapping from string keys to
tagged [`AttrValue`]s. Values are tagged at the boundary (see the `From` impls and the [`attrs!`]
macro), so algorithms that read e.g. a capacity or a weight can check the kind they receive.

```
use lgraphs::{attrs, attr::AttrValue};

let mut a = attrs! { "capacity" => 3, "label" => "s" };
a.update(attrs! { "capacity" => 4.5 });

assert_eq!(a.get("capacity"), Some(&AttrValue::Float(4.5)));
assert_eq!(a.len(), 2);
```
*/

use std::fmt::Debug;

use fxhash::FxHashMap;

use crate::error::{GraphError, Result};

/// A single attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Map(AttrMap),
}

impl AttrValue {
    /// Returns the value as `f64` if it is numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(x) => Some(*x as f64),
            AttrValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Int(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&AttrMap> {
        match self {
            AttrValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Str(_) => "string",
            AttrValue::Bool(_) => "bool",
            AttrValue::Map(_) => "map",
        }
    }
}

macro_rules! impl_from_numeric {
    ($variant:ident as $target:ty => $($t:ty),+) => {
        $(
            impl From<$t> for AttrValue {
                fn from(value: $t) -> Self {
                    AttrValue::$variant(value as $target)
                }
            }
        )+
    };
}

impl_from_numeric!(Int as i64 => i8, i16, i32, i64, u8, u16, u32);
impl_from_numeric!(Float as f64 => f32, f64);

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<AttrMap> for AttrValue {
    fn from(value: AttrMap) -> Self {
        AttrValue::Map(value)
    }
}

/// String-keyed attribute mapping attached to nodes, edges and graphs
#[derive(Clone, Default, PartialEq)]
pub struct AttrMap {
    entries: FxHashMap<String, AttrValue>,
}

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut AttrValue> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a value and returns the previous value of this key, if any
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<AttrValue>
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.entries.remove(key)
    }

    /// Merges `other` into `self`; values of `other` win on conflicting keys
    pub fn update(&mut self, other: AttrMap) {
        self.entries.extend(other.entries);
    }

    /// Same as [`AttrMap::update`] without consuming `other`
    pub fn update_from(&mut self, other: &AttrMap) {
        for (key, value) in other.iter() {
            self.entries.insert(key.to_owned(), value.clone());
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Reads a numeric attribute.
    ///
    /// Returns `Ok(None)` if the key is absent and an [`GraphError::Algorithm`] if the
    /// stored value is not numeric.
    pub fn numeric(&self, key: &str) -> Result<Option<f64>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| {
                GraphError::Algorithm(format!(
                    "attribute `{key}` holds a {} where a number is required",
                    value.kind_name()
                ))
            }),
        }
    }
}

impl Debug for AttrMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for AttrMap
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for AttrMap
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for AttrMap {
    type Item = (String, AttrValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Builds an [`AttrMap`] from `key => value` pairs
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::attr::AttrMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::attr::AttrMap::new();
        $(
            map.insert($key, $value);
        )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn update_last_write_wins() {
        let mut a = attrs! { "w" => 1, "c" => "red" };
        a.update(attrs! { "w" => 2.5, "flag" => true });

        assert_eq!(a.len(), 3);
        assert_eq!(a.get("w"), Some(&AttrValue::Float(2.5)));
        assert_eq!(a.get("c").and_then(AttrValue::as_str), Some("red"));
        assert_eq!(a.get("flag").and_then(AttrValue::as_bool), Some(true));
    }

    #[test]
    fn numeric_access() {
        let a = attrs! { "int" => 3, "float" => 0.5, "str" => "x" };

        assert_eq!(a.numeric("int"), Ok(Some(3.0)));
        assert_eq!(a.numeric("float"), Ok(Some(0.5)));
        assert_eq!(a.numeric("missing"), Ok(None));
        assert_eq!(
            a.numeric("str").map_err(|e| e.kind()),
            Err(ErrorKind::AlgorithmError)
        );
    }

    #[test]
    fn nested_maps() {
        let inner = attrs! { "x" => 1 };
        let outer = attrs! { "pos" => inner.clone() };

        assert_eq!(outer.get("pos").and_then(AttrValue::as_map), Some(&inner));
        assert_eq!(attrs! {}.len(), 0);
    }
}

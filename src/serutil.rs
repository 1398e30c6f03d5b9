use {
    log::debug,
    serde::{
        de::{
            self,
            value::SeqAccessDeserializer,
            Deserializer, IntoDeserializer, SeqAccess, Unexpected, Visitor,
        },
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::{
        fmt::{Formatter, Result as FmtResult},
        marker::PhantomData,
        mem,
    },
};

/// Implement Display for a given class by formatting it as pretty-printed JSON.
#[macro_export]
macro_rules! display_json {
    ($cls:ident) => {
        impl std::fmt::Display for $cls {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let buf = Vec::new();
                let serde_formatter = ::serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = ::serde_json::Serializer::with_formatter(buf, serde_formatter);
                match self.serialize(&mut ser) {
                    Ok(()) => (),
                    Err(e) => {
                        ::log::error!("Failed to serialize: {}", e);
                        return Err(::std::fmt::Error {});
                    }
                };
                match std::str::from_utf8(&ser.into_inner()) {
                    Ok(s) => write!(f, "{}", s),
                    Err(e) => {
                        ::log::error!("JSON serialization contained non-UTF-8 characters: {}", e);
                        Err(::std::fmt::Error {})
                    }
                }
            }
        }
    };
}

/// Implement FromStr for a given class by parsing it as JSON.
#[macro_export]
macro_rules! from_str_json {
    ($cls:ident) => {
        impl ::std::str::FromStr for $cls {
            type Err = ::serde_json::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match ::serde_json::from_str::<Self>(s) {
                    Ok(result) => Ok(result),
                    Err(e) => {
                        ::log::debug!("Failed to parse: {}: {:?}", s, e);
                        Err(e)
                    }
                }
            }
        }
    };
}

/// A value set for a condition key: a bare string or a list of strings.
///
/// IAM treats a one-element list and a bare string as equivalent; equality
/// here does the same. The single/list distinction is preserved so that a
/// value entered as a bare string serializes back as one.
#[derive(Clone, Debug)]
pub enum StringList {
    Single(String),
    List(Vec<String>),
}

impl StringList {
    pub fn to_vec(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::List(s_list) => s_list.iter().map(String::as_str).collect(),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(s) => vec![s],
            Self::List(s_list) => s_list,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::List(s_list) => s_list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::List(s_list) => s_list.is_empty(),
        }
    }

    /// Folds `other` into this value set, deduplicating while preserving
    /// first-seen order. A bare string becomes a list only once a second
    /// distinct value arrives.
    pub fn merge(&mut self, other: StringList) {
        let was_single = matches!(self, Self::Single(_));
        let mut values = mem::replace(self, Self::List(Vec::new())).into_vec();
        for value in other.into_vec() {
            if !values.contains(&value) {
                values.push(value);
            }
        }

        *self = if was_single && values.len() == 1 {
            Self::Single(values.swap_remove(0))
        } else {
            Self::List(values)
        };
    }
}

impl PartialEq for StringList {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Single(my_el), Self::Single(other_el)) => my_el == other_el,
            (Self::Single(my_el), Self::List(other_el)) => other_el.len() == 1 && my_el == &other_el[0],
            (Self::List(my_el), Self::Single(other_el)) => my_el.len() == 1 && &my_el[0] == other_el,
            (Self::List(my_el), Self::List(other_el)) => my_el == other_el,
        }
    }
}

impl Eq for StringList {}

impl From<&str> for StringList {
    fn from(v: &str) -> Self {
        Self::Single(v.to_string())
    }
}

impl From<String> for StringList {
    fn from(v: String) -> Self {
        Self::Single(v)
    }
}

impl From<Vec<String>> for StringList {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

impl From<Vec<&str>> for StringList {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StringList {
    fn from(v: [&str; N]) -> Self {
        Self::List(v.iter().map(ToString::to_string).collect())
    }
}

struct StringListVisitor {}

impl<'de> Visitor<'de> for StringListVisitor {
    type Value = StringList;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "string or list of strings")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        let deserializer = SeqAccessDeserializer::new(access);
        match Vec::<String>::deserialize(deserializer) {
            Ok(l) => Ok(StringList::List(l)),
            Err(e) => {
                debug!("Failed to deserialize string list: {:?}", e);
                Err(<A::Error as de::Error>::invalid_value(Unexpected::Seq, &self))
            }
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(StringList::Single(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for StringList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StringListVisitor {})
    }
}

impl Serialize for StringList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(v) => v.serialize(serializer),
            Self::List(v) => v.serialize(serializer),
        }
    }
}

/// Accepts a JSON field that is either a bare element or a list of elements,
/// normalizing to a Vec. Deserialization convenience only; serialization of
/// builder output always writes lists.
pub(crate) struct OneOrMany<T>(pub(crate) Vec<T>);

struct OneOrManyVisitor<T> {
    phantom: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for OneOrManyVisitor<T> {
    type Value = Vec<T>;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "a value or a list of values")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(vec![T::deserialize(v.into_deserializer())?])
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = match access.size_hint() {
            Some(size) => Vec::with_capacity(size),
            None => Vec::new(),
        };

        while let Some(item) = access.next_element()? {
            result.push(item);
        }

        Ok(result)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_any(OneOrManyVisitor {
                phantom: PhantomData,
            })
            .map(OneOrMany)
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::serutil::{OneOrMany, StringList},
        pretty_assertions::{assert_eq, assert_ne},
    };

    #[test_log::test]
    fn test_eq() {
        let s1a = StringList::Single("a".to_string());
        let s1b = StringList::List(vec!["a".to_string()]);
        let s2 = StringList::List(vec!["a".to_string(), "b".to_string()]);
        let s3 = StringList::List(vec![]);

        assert_eq!(s1a, s1b);
        assert_eq!(s1b, s1a);
        assert_ne!(s1a, s2);
        assert_ne!(s2, s1a);
        assert_ne!(s1a, s3);

        assert_eq!(s1a.len(), 1);
        assert_eq!(s2.len(), 2);
        assert_eq!(s3.len(), 0);
        assert!(!s1a.is_empty());
        assert!(!s2.is_empty());
        assert!(s3.is_empty());

        assert_eq!(s2.to_vec(), vec!["a", "b"]);
        assert_eq!(s1a.clone().into_vec(), vec!["a".to_string()]);
    }

    #[test_log::test]
    fn test_merge() {
        // Two distinct values become a list.
        let mut values = StringList::from("a");
        values.merge(StringList::from("b"));
        assert_eq!(values, StringList::from(["a", "b"]));

        // A repeated value is dropped, and a bare string stays bare.
        let mut values = StringList::from("a");
        values.merge(StringList::from("a"));
        assert_eq!(values, StringList::Single("a".to_string()));
        assert_eq!(serde_json::to_string(&values).unwrap(), r#""a""#);

        // A one-element list stays a list even when the merge adds nothing.
        let mut values = StringList::from(["a"]);
        values.merge(StringList::from("a"));
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"["a"]"#);

        // First-seen order is preserved across merges.
        let mut values = StringList::from(["b", "a"]);
        values.merge(StringList::from(["c", "a", "d"]));
        assert_eq!(values.to_vec(), vec!["b", "a", "c", "d"]);
    }

    #[test_log::test]
    fn test_serde() {
        let single: StringList = serde_json::from_str(r#""a""#).unwrap();
        assert_eq!(single, StringList::Single("a".to_string()));
        assert_eq!(serde_json::to_string(&single).unwrap(), r#""a""#);

        let list: StringList = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(list, StringList::from(["a", "b"]));
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a","b"]"#);

        let e = serde_json::from_str::<StringList>("[3]").unwrap_err();
        assert!(e.to_string().contains("invalid value"));
    }

    #[test_log::test]
    fn test_one_or_many() {
        let single: OneOrMany<String> = serde_json::from_str(r#""a""#).unwrap();
        assert_eq!(single.0, vec!["a".to_string()]);

        let list: OneOrMany<String> = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(list.0, vec!["a".to_string(), "b".to_string()]);
    }
}

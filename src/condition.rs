use {
    crate::{from_str_json, operator::Operator, serutil::StringList},
    chrono::{DateTime, SecondsFormat, Utc},
    serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::collections::{
        btree_map::{Entry, Iter},
        BTreeMap,
    },
};

/// The key → value(s) entries under one condition operator.
pub type ConditionMap = BTreeMap<String, StringList>;

/// The `Condition` element of a statement: operator → key → value(s).
///
/// Repeated entries for the same (operator, key) pair accumulate; the first
/// call's values are never discarded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Condition {
    map: BTreeMap<Operator, ConditionMap>,
}

from_str_json!(Condition);

impl Condition {
    #[inline]
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn get(&self, operator: &Operator) -> Option<&ConditionMap> {
        self.map.get(operator)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Operator, ConditionMap> {
        self.map.iter()
    }

    /// Adds values for a key under an operator. An existing entry for the
    /// same (operator, key) pair is merged, not overwritten: values are
    /// appended with duplicates dropped, preserving first-seen order.
    pub fn put<K, V>(&mut self, operator: Operator, key: K, values: V)
    where
        K: Into<String>,
        V: Into<StringList>,
    {
        let map = self.map.entry(operator).or_insert_with(ConditionMap::new);
        match map.entry(key.into()) {
            Entry::Vacant(entry) => {
                entry.insert(values.into());
            }
            Entry::Occupied(entry) => entry.into_mut().merge(values.into()),
        }
    }
}

impl Default for Condition {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Condition {
    type Item = (&'a Operator, &'a ConditionMap);
    type IntoIter = Iter<'a, Operator, ConditionMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::deserialize(deserializer)?;

        Ok(Self {
            map,
        })
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

// Scalar condition values are carried in their string form, matching what
// the IAM console emits for boolean and numeric operators.

impl From<bool> for StringList {
    fn from(v: bool) -> Self {
        Self::Single(v.to_string())
    }
}

impl From<i32> for StringList {
    fn from(v: i32) -> Self {
        Self::Single(v.to_string())
    }
}

impl From<i64> for StringList {
    fn from(v: i64) -> Self {
        Self::Single(v.to_string())
    }
}

impl From<u32> for StringList {
    fn from(v: u32) -> Self {
        Self::Single(v.to_string())
    }
}

impl From<u64> for StringList {
    fn from(v: u64) -> Self {
        Self::Single(v.to_string())
    }
}

impl From<f64> for StringList {
    fn from(v: f64) -> Self {
        Self::Single(v.to_string())
    }
}

/// Rendered in the ISO 8601 form date operators expect.
impl From<DateTime<Utc>> for StringList {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Single(v.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{condop, serutil::StringList, Condition},
        chrono::{TimeZone, Utc},
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_merge_does_not_overwrite() {
        let mut condition = Condition::new();
        condition.put(condop::StringLike, "aws:TagKeys", "a");
        condition.put(condop::StringLike, "aws:TagKeys", "b");

        let map = condition.get(&condop::StringLike).unwrap();
        assert_eq!(map["aws:TagKeys"], StringList::from(["a", "b"]));
        assert_eq!(condition.len(), 1);
    }

    #[test_log::test]
    fn test_merge_dedup() {
        let mut condition = Condition::new();
        condition.put(condop::StringEquals, "ec2:Region", ["us-east-1", "us-west-2"]);
        condition.put(condop::StringEquals, "ec2:Region", ["us-west-2", "eu-west-1"]);

        let map = condition.get(&condop::StringEquals).unwrap();
        assert_eq!(map["ec2:Region"].to_vec(), vec!["us-east-1", "us-west-2", "eu-west-1"]);
    }

    #[test_log::test]
    fn test_operators_stay_separate() {
        let mut condition = Condition::new();
        condition.put(condop::StringEquals, "aws:PrincipalOrgID", "o-1234567890");
        condition.put(condop::StringLike, "aws:PrincipalOrgID", "o-*");

        assert_eq!(condition.len(), 2);
        assert_eq!(condition.get(&condop::StringEquals).unwrap()["aws:PrincipalOrgID"], StringList::from("o-1234567890"));
        assert_eq!(condition.get(&condop::StringLike).unwrap()["aws:PrincipalOrgID"], StringList::from("o-*"));

        let collected: Vec<_> = (&condition).into_iter().map(|(operator, _)| operator.to_string()).collect();
        assert_eq!(collected, vec!["StringEquals", "StringLike"]);
    }

    #[test_log::test]
    fn test_single_value_stays_string() {
        let mut condition = Condition::new();
        condition.put(condop::StringLike, "aws:ResourceTag/Env", "prod");

        let json = serde_json::to_string(&condition).unwrap();
        assert_eq!(json, r#"{"StringLike":{"aws:ResourceTag/Env":"prod"}}"#);
    }

    #[test_log::test]
    fn test_scalar_values() {
        let mut condition = Condition::new();
        condition.put(condop::Bool, "aws:SecureTransport", true);
        condition.put(condop::NumericLessThan, "aws:MultiFactorAuthAge", 3600);
        condition.put(
            condop::DateLessThanEquals,
            "aws:CurrentTime",
            Utc.with_ymd_and_hms(2020, 4, 1, 0, 0, 0).unwrap(),
        );

        assert_eq!(condition.get(&condop::Bool).unwrap()["aws:SecureTransport"], StringList::from("true"));
        assert_eq!(condition.get(&condop::NumericLessThan).unwrap()["aws:MultiFactorAuthAge"], StringList::from("3600"));
        assert_eq!(
            condition.get(&condop::DateLessThanEquals).unwrap()["aws:CurrentTime"],
            StringList::from("2020-04-01T00:00:00.000Z")
        );
    }

    #[test_log::test]
    fn test_from_str() {
        let condition = Condition::from_str(r#"{"StringEquals": {"ec2:Region": ["us-west-2", "us-east-1"]}}"#).unwrap();
        assert_eq!(condition.len(), 1);
        assert_eq!(
            condition.get(&condop::StringEquals).unwrap()["ec2:Region"],
            StringList::from(["us-west-2", "us-east-1"])
        );
        assert!(Condition::from_str(r#"{"Foo": {"ec2:Region": "us-west-2"}}"#).is_err());

        let empty = Condition::default();
        assert!(empty.is_empty());
        assert!(empty.get(&condop::StringEquals).is_none());
    }
}

use {
    crate::AspenBuilderError,
    serde::{
        de::{self, Deserializer, Unexpected, Visitor},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The base comparison of a condition operator, before any set-operator
/// prefix or `IfExists` suffix is applied.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum BaseOp {
    StringEquals,
    StringNotEquals,
    StringEqualsIgnoreCase,
    StringNotEqualsIgnoreCase,
    StringLike,
    StringNotLike,
    NumericEquals,
    NumericNotEquals,
    NumericLessThan,
    NumericLessThanEquals,
    NumericGreaterThan,
    NumericGreaterThanEquals,
    DateEquals,
    DateNotEquals,
    DateLessThan,
    DateLessThanEquals,
    DateGreaterThan,
    DateGreaterThanEquals,
    Bool,
    BinaryEquals,
    IpAddress,
    NotIpAddress,
    ArnEquals,
    ArnLike,
    ArnNotEquals,
    ArnNotLike,
    Null,
}

impl BaseOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StringEquals => "StringEquals",
            Self::StringNotEquals => "StringNotEquals",
            Self::StringEqualsIgnoreCase => "StringEqualsIgnoreCase",
            Self::StringNotEqualsIgnoreCase => "StringNotEqualsIgnoreCase",
            Self::StringLike => "StringLike",
            Self::StringNotLike => "StringNotLike",
            Self::NumericEquals => "NumericEquals",
            Self::NumericNotEquals => "NumericNotEquals",
            Self::NumericLessThan => "NumericLessThan",
            Self::NumericLessThanEquals => "NumericLessThanEquals",
            Self::NumericGreaterThan => "NumericGreaterThan",
            Self::NumericGreaterThanEquals => "NumericGreaterThanEquals",
            Self::DateEquals => "DateEquals",
            Self::DateNotEquals => "DateNotEquals",
            Self::DateLessThan => "DateLessThan",
            Self::DateLessThanEquals => "DateLessThanEquals",
            Self::DateGreaterThan => "DateGreaterThan",
            Self::DateGreaterThanEquals => "DateGreaterThanEquals",
            Self::Bool => "Bool",
            Self::BinaryEquals => "BinaryEquals",
            Self::IpAddress => "IpAddress",
            Self::NotIpAddress => "NotIpAddress",
            Self::ArnEquals => "ArnEquals",
            Self::ArnLike => "ArnLike",
            Self::ArnNotEquals => "ArnNotEquals",
            Self::ArnNotLike => "ArnNotLike",
            Self::Null => "Null",
        }
    }
}

impl Display for BaseOp {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for BaseOp {
    type Err = AspenBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "StringEquals" => Ok(Self::StringEquals),
            "StringNotEquals" => Ok(Self::StringNotEquals),
            "StringEqualsIgnoreCase" => Ok(Self::StringEqualsIgnoreCase),
            "StringNotEqualsIgnoreCase" => Ok(Self::StringNotEqualsIgnoreCase),
            "StringLike" => Ok(Self::StringLike),
            "StringNotLike" => Ok(Self::StringNotLike),
            "NumericEquals" => Ok(Self::NumericEquals),
            "NumericNotEquals" => Ok(Self::NumericNotEquals),
            "NumericLessThan" => Ok(Self::NumericLessThan),
            "NumericLessThanEquals" => Ok(Self::NumericLessThanEquals),
            "NumericGreaterThan" => Ok(Self::NumericGreaterThan),
            "NumericGreaterThanEquals" => Ok(Self::NumericGreaterThanEquals),
            "DateEquals" => Ok(Self::DateEquals),
            "DateNotEquals" => Ok(Self::DateNotEquals),
            "DateLessThan" => Ok(Self::DateLessThan),
            "DateLessThanEquals" => Ok(Self::DateLessThanEquals),
            "DateGreaterThan" => Ok(Self::DateGreaterThan),
            "DateGreaterThanEquals" => Ok(Self::DateGreaterThanEquals),
            "Bool" => Ok(Self::Bool),
            "BinaryEquals" => Ok(Self::BinaryEquals),
            "IpAddress" => Ok(Self::IpAddress),
            "NotIpAddress" => Ok(Self::NotIpAddress),
            "ArnEquals" => Ok(Self::ArnEquals),
            "ArnLike" => Ok(Self::ArnLike),
            "ArnNotEquals" => Ok(Self::ArnNotEquals),
            "ArnNotLike" => Ok(Self::ArnNotLike),
            "Null" => Ok(Self::Null),
            _ => Err(AspenBuilderError::InvalidConditionOperator(s.to_string())),
        }
    }
}

/// A multivalued-context set operator, prefixed to the base operator.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SetOperator {
    ForAllValues,
    ForAnyValue,
}

impl Display for SetOperator {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::ForAllValues => f.write_str("ForAllValues"),
            Self::ForAnyValue => f.write_str("ForAnyValue"),
        }
    }
}

/// A complete condition operator: base comparison, optional set-operator
/// prefix, optional `IfExists` suffix. Renders as, e.g.,
/// `ForAnyValue:StringEqualsIfExists`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Operator {
    base: BaseOp,
    set_operator: Option<SetOperator>,
    if_exists: bool,
}

impl Operator {
    #[inline]
    pub const fn new(base: BaseOp) -> Self {
        Self {
            base,
            set_operator: None,
            if_exists: false,
        }
    }

    #[inline]
    pub fn base(&self) -> BaseOp {
        self.base
    }

    #[inline]
    pub fn set_operator(&self) -> Option<SetOperator> {
        self.set_operator
    }

    #[inline]
    pub fn is_if_exists(&self) -> bool {
        self.if_exists
    }

    /// Applies the `IfExists` suffix. `Null` has no `IfExists` form; the
    /// suffix is never valid there and [FromStr] rejects it.
    #[inline]
    pub const fn if_exists(self) -> Self {
        Self {
            base: self.base,
            set_operator: self.set_operator,
            if_exists: true,
        }
    }

    #[inline]
    pub const fn for_all_values(self) -> Self {
        Self {
            base: self.base,
            set_operator: Some(SetOperator::ForAllValues),
            if_exists: self.if_exists,
        }
    }

    #[inline]
    pub const fn for_any_value(self) -> Self {
        Self {
            base: self.base,
            set_operator: Some(SetOperator::ForAnyValue),
            if_exists: self.if_exists,
        }
    }
}

impl Default for Operator {
    /// `StringLike`, the operator applied when a caller names none.
    fn default() -> Self {
        op::StringLike
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        if let Some(set_operator) = self.set_operator {
            write!(f, "{}:", set_operator)?;
        }

        f.write_str(self.base.name())?;

        if self.if_exists {
            f.write_str("IfExists")?;
        }

        Ok(())
    }
}

impl FromStr for Operator {
    type Err = AspenBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (set_operator, rest) = if let Some(rest) = s.strip_prefix("ForAllValues:") {
            (Some(SetOperator::ForAllValues), rest)
        } else if let Some(rest) = s.strip_prefix("ForAnyValue:") {
            (Some(SetOperator::ForAnyValue), rest)
        } else {
            (None, s)
        };

        let (rest, if_exists) = match rest.strip_suffix("IfExists") {
            Some(rest) => (rest, true),
            None => (rest, false),
        };

        let base = match BaseOp::from_str(rest) {
            Ok(base) => base,
            Err(_) => return Err(AspenBuilderError::InvalidConditionOperator(s.to_string())),
        };

        if if_exists && base == BaseOp::Null {
            return Err(AspenBuilderError::InvalidConditionOperator(s.to_string()));
        }

        Ok(Self {
            base,
            set_operator,
            if_exists,
        })
    }
}

struct OperatorVisitor {}

impl<'de> Visitor<'de> for OperatorVisitor {
    type Value = Operator;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "a condition operator")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match Operator::from_str(v) {
            Ok(operator) => Ok(operator),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(OperatorVisitor {})
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Unmodified condition operators, one constant per base comparison. Apply
/// [Operator::if_exists], [Operator::for_all_values], or
/// [Operator::for_any_value] for the modified forms.
#[allow(non_upper_case_globals)]
pub mod op {
    use super::{BaseOp, Operator};

    /// The `StringEquals` operator.
    pub const StringEquals: Operator = Operator::new(BaseOp::StringEquals);

    /// The `StringNotEquals` operator.
    pub const StringNotEquals: Operator = Operator::new(BaseOp::StringNotEquals);

    /// The `StringEqualsIgnoreCase` operator.
    pub const StringEqualsIgnoreCase: Operator = Operator::new(BaseOp::StringEqualsIgnoreCase);

    /// The `StringNotEqualsIgnoreCase` operator.
    pub const StringNotEqualsIgnoreCase: Operator = Operator::new(BaseOp::StringNotEqualsIgnoreCase);

    /// The `StringLike` operator.
    pub const StringLike: Operator = Operator::new(BaseOp::StringLike);

    /// The `StringNotLike` operator.
    pub const StringNotLike: Operator = Operator::new(BaseOp::StringNotLike);

    /// The `NumericEquals` operator.
    pub const NumericEquals: Operator = Operator::new(BaseOp::NumericEquals);

    /// The `NumericNotEquals` operator.
    pub const NumericNotEquals: Operator = Operator::new(BaseOp::NumericNotEquals);

    /// The `NumericLessThan` operator.
    pub const NumericLessThan: Operator = Operator::new(BaseOp::NumericLessThan);

    /// The `NumericLessThanEquals` operator.
    pub const NumericLessThanEquals: Operator = Operator::new(BaseOp::NumericLessThanEquals);

    /// The `NumericGreaterThan` operator.
    pub const NumericGreaterThan: Operator = Operator::new(BaseOp::NumericGreaterThan);

    /// The `NumericGreaterThanEquals` operator.
    pub const NumericGreaterThanEquals: Operator = Operator::new(BaseOp::NumericGreaterThanEquals);

    /// The `DateEquals` operator.
    pub const DateEquals: Operator = Operator::new(BaseOp::DateEquals);

    /// The `DateNotEquals` operator.
    pub const DateNotEquals: Operator = Operator::new(BaseOp::DateNotEquals);

    /// The `DateLessThan` operator.
    pub const DateLessThan: Operator = Operator::new(BaseOp::DateLessThan);

    /// The `DateLessThanEquals` operator.
    pub const DateLessThanEquals: Operator = Operator::new(BaseOp::DateLessThanEquals);

    /// The `DateGreaterThan` operator.
    pub const DateGreaterThan: Operator = Operator::new(BaseOp::DateGreaterThan);

    /// The `DateGreaterThanEquals` operator.
    pub const DateGreaterThanEquals: Operator = Operator::new(BaseOp::DateGreaterThanEquals);

    /// The `Bool` operator.
    pub const Bool: Operator = Operator::new(BaseOp::Bool);

    /// The `BinaryEquals` operator.
    pub const BinaryEquals: Operator = Operator::new(BaseOp::BinaryEquals);

    /// The `IpAddress` operator.
    pub const IpAddress: Operator = Operator::new(BaseOp::IpAddress);

    /// The `NotIpAddress` operator.
    pub const NotIpAddress: Operator = Operator::new(BaseOp::NotIpAddress);

    /// The `ArnEquals` operator.
    pub const ArnEquals: Operator = Operator::new(BaseOp::ArnEquals);

    /// The `ArnLike` operator.
    pub const ArnLike: Operator = Operator::new(BaseOp::ArnLike);

    /// The `ArnNotEquals` operator.
    pub const ArnNotEquals: Operator = Operator::new(BaseOp::ArnNotEquals);

    /// The `ArnNotLike` operator.
    pub const ArnNotLike: Operator = Operator::new(BaseOp::ArnNotLike);

    /// The `Null` operator.
    pub const Null: Operator = Operator::new(BaseOp::Null);
}

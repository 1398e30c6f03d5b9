use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Debug, Eq, PartialEq)]
pub enum AspenBuilderError {
    InvalidAction(String),
    InvalidConditionOperator(String),
    InvalidEffect(String),
    MissingActions,
    ServiceMismatch {
        expected: String,
        found: String,
    },
    UnknownResourceType {
        service: String,
        name: String,
    },
    UnresolvedPlaceholders {
        arn: String,
        tokens: Vec<String>,
    },
}

impl Display for AspenBuilderError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidAction(action) => write!(f, "Invalid action: {}", action),
            Self::InvalidConditionOperator(operator) => write!(f, "Invalid condition operator: {}", operator),
            Self::InvalidEffect(effect) => write!(f, "Invalid effect: {}", effect),
            Self::MissingActions => f.write_str("Statement has no actions"),
            Self::ServiceMismatch {
                expected,
                found,
            } => write!(f, "Service prefix mismatch: expected {}, found {}", expected, found),
            Self::UnknownResourceType {
                service,
                name,
            } => write!(f, "Unknown resource type for service {}: {}", service, name),
            Self::UnresolvedPlaceholders {
                arn,
                tokens,
            } => write!(f, "Unresolved ARN placeholders in {}: {}", arn, tokens.join(", ")),
        }
    }
}

impl Error for AspenBuilderError {}

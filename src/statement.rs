use {
    crate::{display_json, from_str_json, serutil::OneOrMany, Action, AspenBuilderError, Condition, Effect},
    serde::{
        de::{self, Deserializer, MapAccess, Visitor},
        ser::{SerializeMap, Serializer},
        Deserialize, Serialize,
    },
    std::fmt::{Formatter, Result as FmtResult},
};

/// One complete IAM policy statement: `Sid?`, `Effect`, `Action`, `Resource`,
/// `Condition?`. Produced by [crate::StatementBuilder::build]; immutable
/// thereafter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Statement {
    sid: Option<String>,
    effect: Effect,
    action: Vec<Action>,
    resource: Vec<String>,
    condition: Option<Condition>,
}

impl Statement {
    pub(crate) fn new(
        sid: Option<String>,
        effect: Effect,
        action: Vec<Action>,
        resource: Vec<String>,
        condition: Option<Condition>,
    ) -> Self {
        Self {
            sid,
            effect,
            action,
            resource,
            condition,
        }
    }

    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    #[inline]
    pub fn action(&self) -> &[Action] {
        &self.action
    }

    #[inline]
    pub fn resource(&self) -> &[String] {
        &self.resource
    }

    #[inline]
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}

display_json!(Statement);
from_str_json!(Statement);

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(sid) = &self.sid {
            map.serialize_entry("Sid", sid)?;
        }
        map.serialize_entry("Effect", &self.effect)?;
        map.serialize_entry("Action", &self.action)?;
        map.serialize_entry("Resource", &self.resource)?;
        if let Some(condition) = &self.condition {
            map.serialize_entry("Condition", condition)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StatementVisitor {})
    }
}

struct StatementVisitor;

impl<'de> Visitor<'de> for StatementVisitor {
    type Value = Statement;

    fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
        formatter.write_str("a map of statement properties")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Statement, A::Error> {
        let mut sid: Option<String> = None;
        let mut effect: Option<Effect> = None;
        let mut action: Option<Vec<Action>> = None;
        let mut resource: Option<Vec<String>> = None;
        let mut condition: Option<Condition> = None;

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "Sid" => {
                    if sid.is_some() {
                        return Err(de::Error::duplicate_field("Sid"));
                    }

                    sid = Some(access.next_value::<String>()?);
                }
                "Effect" => {
                    if effect.is_some() {
                        return Err(de::Error::duplicate_field("Effect"));
                    }

                    effect = Some(access.next_value::<Effect>()?);
                }
                "Action" => {
                    if action.is_some() {
                        return Err(de::Error::duplicate_field("Action"));
                    }

                    action = Some(access.next_value::<OneOrMany<Action>>()?.0);
                }
                "Resource" => {
                    if resource.is_some() {
                        return Err(de::Error::duplicate_field("Resource"));
                    }

                    resource = Some(access.next_value::<OneOrMany<String>>()?.0);
                }
                "Condition" => {
                    if condition.is_some() {
                        return Err(de::Error::duplicate_field("Condition"));
                    }

                    condition = Some(access.next_value::<Condition>()?);
                }
                _ => {
                    return Err(de::Error::unknown_field(&key, &["Sid", "Effect", "Action", "Resource", "Condition"]));
                }
            }
        }

        let effect = effect.ok_or_else(|| de::Error::missing_field("Effect"))?;
        let action = action.ok_or_else(|| de::Error::missing_field("Action"))?;
        let resource = resource.ok_or_else(|| de::Error::missing_field("Resource"))?;

        if action.is_empty() {
            return Err(de::Error::custom(AspenBuilderError::MissingActions));
        }

        Ok(Statement::new(sid, effect, action, resource, condition.filter(|c| !c.is_empty())))
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{Action, Condition, Effect, Statement},
        indoc::indoc,
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_typical_statement_import() {
        let statement_str = indoc! { r#"
            {
                "Sid": "1",
                "Effect": "Allow",
                "Action": [
                    "ec2:Get*",
                    "ecs:*"
                ],
                "Resource": [
                    "arn:aws:ec2:us-east-1:123456789012:instance/i-01234567890abcdef"
                ],
                "Condition": {
                    "StringEquals": {
                        "ec2:Region": [
                            "us-west-2",
                            "us-east-1"
                        ]
                    }
                }
            }"# };
        let statement = Statement::from_str(statement_str).unwrap();

        assert_eq!(statement.sid(), Some("1"));
        assert_eq!(statement.effect(), &Effect::Allow);
        assert_eq!(statement.action().len(), 2);
        assert_eq!(statement.action()[0], Action::new("ec2", "Get*").unwrap());
        assert_eq!(statement.resource().len(), 1);
        assert!(statement.condition().is_some());

        // Round trip through the Display form.
        assert_eq!(statement.to_string(), statement_str);
        assert_eq!(statement, statement.clone());
    }

    #[test_log::test]
    fn test_single_values_accepted() {
        let statement = Statement::from_str(
            r#"{"Effect": "Deny", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::my-bucket/*"}"#,
        )
        .unwrap();
        assert_eq!(statement.sid(), None);
        assert_eq!(statement.effect(), &Effect::Deny);
        assert_eq!(statement.action(), &[Action::new("s3", "GetObject").unwrap()]);
        assert_eq!(statement.resource(), &["arn:aws:s3:::my-bucket/*".to_string()]);
        assert!(statement.condition().is_none());

        // Single values still serialize as lists.
        assert_eq!(
            statement.to_string(),
            indoc! { r#"
            {
                "Effect": "Deny",
                "Action": [
                    "s3:GetObject"
                ],
                "Resource": [
                    "arn:aws:s3:::my-bucket/*"
                ]
            }"# }
        );
    }

    #[test_log::test]
    fn test_condition_omitted_when_empty() {
        let statement = Statement::new(
            None,
            Effect::Allow,
            vec![Action::new("s3", "ListBucket").unwrap()],
            vec!["*".to_string()],
            None,
        );
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(value.get("Condition"), None);
        assert_eq!(value.get("Sid"), None);

        // An empty Condition map on import is dropped, not kept as {}.
        let statement =
            Statement::from_str(r#"{"Effect": "Allow", "Action": "s3:ListBucket", "Resource": "*", "Condition": {}}"#)
                .unwrap();
        assert!(statement.condition().is_none());
    }

    #[test_log::test]
    fn test_bad_statements() {
        let e = Statement::from_str(r#"{"Action": "s3:ListBucket", "Resource": "*"}"#).unwrap_err();
        assert_eq!(e.to_string(), "missing field `Effect` at line 1 column 44");

        let e = Statement::from_str(r#"{"Effect": "Allow", "Resource": "*"}"#).unwrap_err();
        assert_eq!(e.to_string(), "missing field `Action` at line 1 column 36");

        let e = Statement::from_str(r#"{"Effect": "Allow", "Action": "s3:ListBucket"}"#).unwrap_err();
        assert_eq!(e.to_string(), "missing field `Resource` at line 1 column 46");

        let e = Statement::from_str(r#"{"Effect": "Allow", "Action": [], "Resource": "*"}"#).unwrap_err();
        assert!(e.to_string().starts_with("Statement has no actions"));

        let e = Statement::from_str(r#"{"Effect": "Allow", "Effect": "Deny", "Action": "s3:*", "Resource": "*"}"#)
            .unwrap_err();
        assert!(e.to_string().starts_with("duplicate field `Effect`"));

        let e = Statement::from_str(r#"{"Effect": "Allow", "Action": "s3:*", "Resource": "*", "Instance": "i-0"}"#)
            .unwrap_err();
        assert!(e.to_string().starts_with("unknown field `Instance`"));

        let e = Statement::from_str(r#"{"Effect": "Allow", "Action": {"s3": "ListBucket"}, "Resource": "*"}"#)
            .unwrap_err();
        assert!(e.to_string().contains("a value or a list of values"));
    }

    #[test_log::test]
    fn test_condition_in_statement() {
        let mut condition = Condition::new();
        condition.put(crate::condop::Bool, "aws:SecureTransport", true);
        let statement = Statement::new(
            Some("AllowTls".to_string()),
            Effect::Allow,
            vec![Action::new("s3", "GetObject").unwrap()],
            vec!["arn:aws:s3:::my-bucket/*".to_string()],
            Some(condition),
        );

        assert_eq!(
            statement.to_string(),
            indoc! { r#"
            {
                "Sid": "AllowTls",
                "Effect": "Allow",
                "Action": [
                    "s3:GetObject"
                ],
                "Resource": [
                    "arn:aws:s3:::my-bucket/*"
                ],
                "Condition": {
                    "Bool": {
                        "aws:SecureTransport": "true"
                    }
                }
            }"# }
        );
    }
}

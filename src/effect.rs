use {
    crate::AspenBuilderError,
    serde::{Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl Default for Effect {
    #[inline]
    fn default() -> Self {
        Self::Allow
    }
}

impl Display for Effect {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Allow => f.write_str("Allow"),
            Self::Deny => f.write_str("Deny"),
        }
    }
}

impl FromStr for Effect {
    type Err = AspenBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Allow" => Ok(Self::Allow),
            "Deny" => Ok(Self::Deny),
            _ => Err(AspenBuilderError::InvalidEffect(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{AspenBuilderError, Effect},
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_display() {
        assert_eq!(format!("{}", Effect::Allow), "Allow");
        assert_eq!(format!("{}", Effect::Deny), "Deny");
    }

    #[test_log::test]
    fn test_default() {
        assert_eq!(Effect::default(), Effect::Allow);
    }

    #[test_log::test]
    fn test_from_str() {
        assert_eq!(Effect::from_str("Allow").unwrap(), Effect::Allow);
        assert_eq!(Effect::from_str("Deny").unwrap(), Effect::Deny);
        assert_eq!(
            Effect::from_str("allow").unwrap_err(),
            AspenBuilderError::InvalidEffect("allow".to_string())
        );
        assert_eq!(Effect::from_str("Maybe").unwrap_err().to_string(), "Invalid effect: Maybe");
    }

    #[test_log::test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&Effect::Deny).unwrap(), r#""Deny""#);
        assert_eq!(serde_json::from_str::<Effect>(r#""Allow""#).unwrap(), Effect::Allow);
        assert!(serde_json::from_str::<Effect>(r#""Never""#).is_err());
    }
}

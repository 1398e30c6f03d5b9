use {
    lazy_static::lazy_static,
    log::debug,
    regex::{Captures, Regex},
    serde::{Deserialize, Serialize},
    std::{
        collections::BTreeMap,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\$\{([A-Za-z0-9_]+)\}").unwrap();
}

/// The partition substituted when the caller supplies none.
const DEFAULT_PARTITION: &str = "aws";

/// The value substituted for `Region`/`Account` when the caller supplies
/// none. Service tables are split between the two conventions; the choice
/// travels with each resolution request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AbsentDefault {
    /// Substitute `*`: all regions/accounts.
    Star,

    /// Substitute the empty string.
    Empty,
}

impl AbsentDefault {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Star => "*",
            Self::Empty => "",
        }
    }
}

impl Default for AbsentDefault {
    #[inline]
    fn default() -> Self {
        Self::Star
    }
}

/// An ARN pattern containing `${Name}` tokens, e.g.
/// `arn:${Partition}:devicefarm:${Region}:${Account}:project:${ResourceId}`.
///
/// Templates are resolved at the moment a resource is added to a statement;
/// only the resolved ARN is retained.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ArnTemplate {
    template: String,
}

impl ArnTemplate {
    pub fn new<S: Into<String>>(template: S) -> Self {
        Self {
            template: template.into(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// The token names appearing in the template, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        TOKEN.captures_iter(&self.template).filter_map(|caps| caps.get(1)).map(|m| m.as_str()).collect()
    }

    /// Substitutes every token for which `values` has an answer. `Partition`,
    /// `Region`, and `Account` always have an answer (their defaults); any
    /// other token without a non-empty caller value is left in the output
    /// verbatim and reported in the resolution.
    pub fn resolve(&self, values: &PlaceholderValues) -> Resolution {
        let mut unresolved = Vec::new();
        let arn = TOKEN
            .replace_all(&self.template, |caps: &Captures| {
                let name = &caps[1];
                match values.lookup(name) {
                    Some(value) => value,
                    None => {
                        debug!("No substitution for token ${{{}}} in {}", name, self.template);
                        unresolved.push(name.to_string());
                        caps[0].to_string()
                    }
                }
            })
            .into_owned();

        Resolution {
            arn,
            unresolved,
        }
    }
}

impl Display for ArnTemplate {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.template)
    }
}

impl From<&str> for ArnTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for ArnTemplate {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

/// Substitution values for one [ArnTemplate::resolve] call. An empty string
/// counts as absent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlaceholderValues {
    partition: Option<String>,
    region: Option<String>,
    account: Option<String>,
    absent: AbsentDefault,
    values: BTreeMap<String, String>,
}

impl PlaceholderValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values whose `Region`/`Account` fall back to the given default when
    /// the caller supplies neither.
    pub fn with_absent(absent: AbsentDefault) -> Self {
        Self {
            absent,
            ..Default::default()
        }
    }

    pub fn partition<S: Into<String>>(mut self, partition: S) -> Self {
        self.partition = Some(partition.into());
        self
    }

    pub fn region<S: Into<String>>(mut self, region: S) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn account<S: Into<String>>(mut self, account: S) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Sets the value for a resource-identifier token.
    pub fn value<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    fn lookup(&self, name: &str) -> Option<String> {
        match name {
            "Partition" => Some(nonempty(&self.partition).unwrap_or(DEFAULT_PARTITION).to_string()),
            "Region" => Some(nonempty(&self.region).unwrap_or(self.absent.as_str()).to_string()),
            "Account" => Some(nonempty(&self.account).unwrap_or(self.absent.as_str()).to_string()),
            _ => self.values.get(name).filter(|v| !v.is_empty()).cloned(),
        }
    }
}

fn nonempty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// The outcome of resolving one template: the ARN (with any unanswered
/// tokens left in place) and the names of those tokens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    pub(crate) arn: String,
    pub(crate) unresolved: Vec<String>,
}

impl Resolution {
    #[inline]
    pub fn arn(&self) -> &str {
        &self.arn
    }

    #[inline]
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    #[inline]
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }

    #[inline]
    pub fn into_arn(self) -> String {
        self.arn
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.arn)
    }
}

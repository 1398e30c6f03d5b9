use {
    crate::{
        arn::{ArnTemplate, PlaceholderValues, Resolution},
        operator::{op, Operator},
        service::{AccessLevel, ServiceTable},
        serutil::StringList,
        Action, AspenBuilderError, Condition, Effect, Statement,
    },
    log::warn,
    regex::Regex,
};

/// Disposition of ARN template tokens that resolve to nothing: pass them
/// through verbatim or fail the build.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OnUnresolved {
    Keep,
    Fail,
}

impl Default for OnUnresolved {
    #[inline]
    fn default() -> Self {
        Self::Keep
    }
}

/// Accumulates one statement's actions, resources, and conditions, then
/// serializes them into the canonical IAM shape via [StatementBuilder::build].
///
/// Each builder is fixed to one service prefix; action names and unqualified
/// condition keys are qualified with it automatically. Use one builder per
/// statement and discard it after `build`.
#[derive(Clone, Debug)]
pub struct StatementBuilder {
    service_prefix: String,
    sid: Option<String>,
    effect: Effect,
    actions: Vec<String>,
    resources: Vec<String>,
    condition: Condition,
    unresolved: Vec<Resolution>,
    on_unresolved: OnUnresolved,
}

impl StatementBuilder {
    /// A builder for statements over the given service prefix.
    pub fn for_service<S: Into<String>>(prefix: S) -> Self {
        Self {
            service_prefix: prefix.into(),
            sid: None,
            effect: Effect::default(),
            actions: Vec::new(),
            resources: Vec::new(),
            condition: Condition::new(),
            unresolved: Vec::new(),
            on_unresolved: OnUnresolved::default(),
        }
    }

    /// A builder bound to a service table's prefix.
    pub fn for_table(table: &ServiceTable) -> Self {
        Self::for_service(table.prefix())
    }

    pub fn sid<S: Into<String>>(&mut self, sid: S) -> &mut Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn effect(&mut self, effect: Effect) -> &mut Self {
        self.effect = effect;
        self
    }

    pub fn allow(&mut self) -> &mut Self {
        self.effect(Effect::Allow)
    }

    pub fn deny(&mut self) -> &mut Self {
        self.effect(Effect::Deny)
    }

    /// Selects the handling of unresolved ARN template tokens for this
    /// builder. The default is [OnUnresolved::Keep].
    pub fn on_unresolved(&mut self, on_unresolved: OnUnresolved) -> &mut Self {
        self.on_unresolved = on_unresolved;
        self
    }

    /// Appends `<prefix>:<name>` to the statement's actions. Adding a name
    /// twice is a no-op. Names are validated at [StatementBuilder::build].
    pub fn add_action<S: AsRef<str>>(&mut self, name: S) -> &mut Self {
        let name = name.as_ref();
        if !self.actions.iter().any(|existing| existing == name) {
            self.actions.push(name.to_string());
        }
        self
    }

    pub fn add_actions<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.add_action(name);
        }
        self
    }

    /// Verifies that the table's prefix matches this builder's service prefix.
    fn check_table(&self, table: &ServiceTable) -> Result<(), AspenBuilderError> {
        if self.service_prefix != table.prefix() {
            return Err(AspenBuilderError::ServiceMismatch {
                expected: self.service_prefix.clone(),
                found: table.prefix().to_string(),
            });
        }
        Ok(())
    }

    /// Appends every action in the table.
    pub fn add_all_actions(&mut self, table: &ServiceTable) -> Result<&mut Self, AspenBuilderError> {
        self.check_table(table)?;
        for descriptor in table.actions() {
            self.add_action(descriptor.name());
        }
        Ok(self)
    }

    /// Appends every action in the table carrying the given access level.
    pub fn add_access_level_actions(
        &mut self,
        table: &ServiceTable,
        access_level: AccessLevel,
    ) -> Result<&mut Self, AspenBuilderError> {
        self.check_table(table)?;
        for descriptor in table.actions() {
            if descriptor.access_level() == access_level {
                self.add_action(descriptor.name());
            }
        }
        Ok(self)
    }

    /// Appends every action in the table whose name matches the regex.
    pub fn add_matching_actions(&mut self, table: &ServiceTable, re: &Regex) -> Result<&mut Self, AspenBuilderError> {
        self.check_table(table)?;
        for descriptor in table.actions() {
            if re.is_match(descriptor.name()) {
                self.add_action(descriptor.name());
            }
        }
        Ok(self)
    }

    /// Resolves the template against `values` and appends the result. Once
    /// any resource is added, the implicit `"*"` default is suppressed.
    /// Tokens with no substitution stay in the ARN verbatim and are recorded;
    /// see [StatementBuilder::on_unresolved] and [StatementBuilder::unresolved].
    pub fn add_resource(&mut self, template: &ArnTemplate, values: &PlaceholderValues) -> &mut Self {
        let resolution = template.resolve(values);
        if !resolution.is_fully_resolved() {
            warn!("Unresolved ARN placeholders in {}: {}", resolution.arn(), resolution.unresolved().join(", "));
            self.unresolved.push(resolution.clone());
        }

        self.resources.push(resolution.into_arn());
        self
    }

    /// Appends a pre-resolved resource ARN as-is.
    pub fn add_resource_arn<S: Into<String>>(&mut self, arn: S) -> &mut Self {
        self.resources.push(arn.into());
        self
    }

    /// Looks up a resource type in the table and resolves its ARN template
    /// against `values`.
    pub fn on_resource_type(
        &mut self,
        table: &ServiceTable,
        name: &str,
        values: &PlaceholderValues,
    ) -> Result<&mut Self, AspenBuilderError> {
        self.check_table(table)?;
        let descriptor = match table.resource_type(name) {
            Some(descriptor) => descriptor,
            None => {
                return Err(AspenBuilderError::UnknownResourceType {
                    service: table.prefix().to_string(),
                    name: name.to_string(),
                })
            }
        };

        Ok(self.add_resource(descriptor.arn_template(), values))
    }

    /// Adds a condition with the default `StringLike` operator.
    pub fn add_condition<K, V>(&mut self, key: K, values: V) -> &mut Self
    where
        K: AsRef<str>,
        V: Into<StringList>,
    {
        self.add_condition_op(op::StringLike, key, values)
    }

    /// Adds a condition under an explicit operator. A key without a `:` is
    /// qualified with the builder's service prefix. Values for an already
    /// present (operator, key) pair are merged, never overwritten.
    pub fn add_condition_op<K, V>(&mut self, operator: Operator, key: K, values: V) -> &mut Self
    where
        K: AsRef<str>,
        V: Into<StringList>,
    {
        let key = key.as_ref();
        let key = if !key.contains(':') && !self.service_prefix.is_empty() {
            format!("{}:{}", self.service_prefix, key)
        } else {
            key.to_string()
        };

        self.condition.put(operator, key, values);
        self
    }

    /// The resolutions recorded so far that still contain `${...}` tokens.
    pub fn unresolved(&self) -> &[Resolution] {
        &self.unresolved
    }

    /// Produces the statement. Fails if no action was ever added, if an
    /// action name is invalid, or if unresolved placeholders exist and this
    /// builder was set to [OnUnresolved::Fail]. `Resource` falls back to
    /// `["*"]` when no resource was added; `Condition` is omitted entirely
    /// when no condition was added.
    pub fn build(&self) -> Result<Statement, AspenBuilderError> {
        if self.actions.is_empty() {
            return Err(AspenBuilderError::MissingActions);
        }

        if self.on_unresolved == OnUnresolved::Fail {
            if let Some(resolution) = self.unresolved.first() {
                return Err(AspenBuilderError::UnresolvedPlaceholders {
                    arn: resolution.arn().to_string(),
                    tokens: resolution.unresolved().to_vec(),
                });
            }
        }

        let mut action = Vec::with_capacity(self.actions.len());
        for name in &self.actions {
            action.push(Action::new(self.service_prefix.as_str(), name.as_str())?);
        }

        let resource = if self.resources.is_empty() {
            vec!["*".to_string()]
        } else {
            self.resources.clone()
        };

        let condition = if self.condition.is_empty() {
            None
        } else {
            Some(self.condition.clone())
        };

        Ok(Statement::new(self.sid.clone(), self.effect, action, resource, condition))
    }
}

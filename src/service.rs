use {
    crate::{arn::ArnTemplate, display_json, from_str_json},
    derive_builder::Builder,
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The documentation-facing classification attached to each action. Not
/// consumed by statement assembly other than for access-level selection.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum AccessLevel {
    Read,
    Write,
    List,
    Tagging,
    #[serde(rename = "Permissions management")]
    PermissionsManagement,
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Read => f.write_str("Read"),
            Self::Write => f.write_str("Write"),
            Self::List => f.write_str("List"),
            Self::Tagging => f.write_str("Tagging"),
            Self::PermissionsManagement => f.write_str("Permissions management"),
        }
    }
}

/// One action's row in a service table: its name plus descriptive metadata.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ActionDescriptor {
    #[builder(setter(into))]
    name: String,

    access_level: AccessLevel,

    #[builder(setter(into, strip_option), default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[builder(setter(into), default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    resource_types: Vec<String>,

    #[builder(setter(into), default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    condition_keys: Vec<String>,
}

impl ActionDescriptor {
    pub fn builder() -> ActionDescriptorBuilder {
        ActionDescriptorBuilder::default()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn resource_types(&self) -> &[String] {
        &self.resource_types
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }
}

/// One resource type's row in a service table: its name, ARN template, and
/// the condition keys that apply to it.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ResourceTypeDescriptor {
    #[builder(setter(into))]
    name: String,

    #[builder(setter(into))]
    arn_template: ArnTemplate,

    #[builder(setter(into), default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    condition_keys: Vec<String>,
}

impl ResourceTypeDescriptor {
    pub fn builder() -> ResourceTypeDescriptorBuilder {
        ResourceTypeDescriptorBuilder::default()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn arn_template(&self) -> &ArnTemplate {
        &self.arn_template
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }
}

/// The permission table for one service: the prefix plus every action and
/// resource type it defines. One value of this type carries everything the
/// builder needs to assemble statements for that service.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ServiceTable {
    #[builder(setter(into))]
    prefix: String,

    #[builder(setter(into), default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    actions: Vec<ActionDescriptor>,

    #[builder(setter(into), default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    resource_types: Vec<ResourceTypeDescriptor>,
}

display_json!(ServiceTable);
from_str_json!(ServiceTable);

impl ServiceTable {
    pub fn builder() -> ServiceTableBuilder {
        ServiceTableBuilder::default()
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    #[inline]
    pub fn resource_types(&self) -> &[ResourceTypeDescriptor] {
        &self.resource_types
    }

    pub fn action(&self, name: &str) -> Option<&ActionDescriptor> {
        self.actions.iter().find(|descriptor| descriptor.name() == name)
    }

    pub fn resource_type(&self, name: &str) -> Option<&ResourceTypeDescriptor> {
        self.resource_types.iter().find(|descriptor| descriptor.name() == name)
    }
}

#![warn(clippy::all)]
pub(crate) mod action;
pub(crate) mod arn;
pub(crate) mod builder;
pub(crate) mod condition;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod global;
pub(crate) mod operator;
pub(crate) mod service;
pub(crate) mod statement;

#[macro_use]
pub(crate) mod serutil;

pub use {
    action::Action,
    arn::{AbsentDefault, ArnTemplate, PlaceholderValues, Resolution},
    builder::{OnUnresolved, StatementBuilder},
    condition::{Condition, ConditionMap},
    effect::Effect,
    error::AspenBuilderError,
    operator::{op as condop, BaseOp, Operator, SetOperator},
    service::{
        AccessLevel, ActionDescriptor, ActionDescriptorBuilder, ActionDescriptorBuilderError, ResourceTypeDescriptor,
        ResourceTypeDescriptorBuilder, ResourceTypeDescriptorBuilderError, ServiceTable, ServiceTableBuilder,
        ServiceTableBuilderError,
    },
    serutil::StringList,
    statement::Statement,
};

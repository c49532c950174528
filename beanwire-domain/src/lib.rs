//! Domain logic: decide how every member of a class is wired into bean plans.
//!
//! This crate owns *which* plans exist and what they record. It does not own how plans
//! are serialized or emitted; that's `beanwire-core` and `beanwire-render`.

mod adapter;
mod classifier;
mod error;
mod guard;
mod ordering;
mod ports;
mod proxy;
mod rules;
mod strategy;

pub use adapter::{AdapterIndex, AdapterSynthesizer};
pub use classifier::Classifier;
pub use error::{ConfigurationError, RULE_KEYS};
pub use ordering::{classification_order, MemberSlot};
pub use ports::{AopHelper, DefaultAopHelper};
pub use proxy::ProxyOrchestrator;
pub use strategy::{
    ClassificationStrategy, ConfigurationPropertyHandler, NoopPropertyHandler, ProcessingMode,
    PropertyContext, PropertyHandler,
};

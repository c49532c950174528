//! Per-member classification rules. Each function returns the member's disposition;
//! the first matching rule wins.

pub(crate) mod aop;
pub(crate) mod executable;
pub(crate) mod field;
pub(crate) mod method;
pub(crate) mod property;

//! CLI command implementations.

pub(crate) mod analyze;
pub(crate) mod currencies;
pub(crate) mod serve;
pub(crate) mod template;

//! Configuration errors, raised before any computation starts.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unrecognized method token: {0:?}")]
    UnknownMethod(String),

    #[error("at least one method token is required")]
    NoMethods,

    #[error("region selection names a region that does not exist: {0:?}")]
    UnknownRegion(String),

    #[error("no regions left to analyse")]
    NoRegions,

    #[error("region name appears more than once: {0:?}")]
    DuplicateRegion(String),

    #[error("random sample size must be positive")]
    ZeroSampleSize,
}

//! Status code registry and the success/error operation flag

pub mod code;
pub mod registry;

pub use code::{StatusClass, StatusCode};
pub use registry::{init, StatusRegistry, UNKNOWN_DESCRIPTION};

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// General outcome of an operation, as reported in API payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Function signatures as fetched from a package's normalized modules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::normalized::NormalizedType;

/// `package::module::function` call target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionTarget {
    pub package: String,
    pub module: String,
    pub function: String,
}

impl FunctionTarget {
    pub fn new(package: &str, module: &str, function: &str) -> Self {
        Self {
            package: package.to_string(),
            module: module.to_string(),
            function: function.to_string(),
        }
    }

    /// Parse `0xPKG::module::function`.
    pub fn parse(target: &str) -> Option<Self> {
        let parts: Vec<&str> = target.trim().split("::").collect();
        match parts.as_slice() {
            [package, module, function]
                if !package.is_empty() && !module.is_empty() && !function.is_empty() =>
            {
                Some(Self::new(package, module, function))
            }
            _ => None,
        }
    }
}

impl fmt::Display for FunctionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

/// Declared parameters of one function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub target: FunctionTarget,
    pub type_parameter_count: usize,
    pub parameters: Vec<NormalizedType>,
}

impl FunctionSignature {
    /// Parameters the user supplies values for: the declared list minus a
    /// trailing execution-context parameter, if there is one.
    pub fn user_parameters(&self) -> &[NormalizedType] {
        match self.parameters.split_last() {
            Some((last, rest)) if last.is_tx_context() => rest,
            _ => &self.parameters,
        }
    }

    pub fn takes_tx_context(&self) -> bool {
        self.user_parameters().len() != self.parameters.len()
    }
}

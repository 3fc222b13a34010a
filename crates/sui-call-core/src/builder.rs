//! Call argument allocation.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use sui_types::base_types::ObjectID;
use sui_types::transaction::Argument;

use sui_call_types::{EncodedArgument, FunctionTarget};

/// Allocates call arguments on a pending transaction.
pub trait ArgumentBuilder {
    /// Add a pure input holding BCS bytes.
    fn pure(&mut self, bytes: Vec<u8>) -> Result<Argument>;

    /// Add an object input. Ownership and mutability are resolved by the
    /// transaction builder, not here.
    fn object(&mut self, id: ObjectID) -> Result<Argument>;

    /// Collect object arguments into one vector argument.
    fn make_object_vector(&mut self, elements: Vec<Argument>) -> Result<Argument>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallInput {
    Pure {
        #[serde(with = "hex_bytes")]
        bytes: Vec<u8>,
    },
    Object {
        id: ObjectID,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuilderCommand {
    MakeObjectVector { elements: Vec<Argument> },
}

/// In-memory [`ArgumentBuilder`].
///
/// Object inputs are deduplicated by ID; every pure value gets its own input.
#[derive(Debug, Default)]
pub struct CallArgBuilder {
    inputs: Vec<CallInput>,
    objects: HashMap<ObjectID, u16>,
    commands: Vec<BuilderCommand>,
}

impl CallArgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &[CallInput] {
        &self.inputs
    }

    pub fn commands(&self) -> &[BuilderCommand] {
        &self.commands
    }

    fn push_input(&mut self, input: CallInput) -> Result<u16> {
        let idx = u16::try_from(self.inputs.len())
            .map_err(|_| anyhow!("too many call inputs ({})", self.inputs.len()))?;
        self.inputs.push(input);
        Ok(idx)
    }

    /// Finish into a [`PreparedCall`].
    pub fn finish(
        self,
        target: FunctionTarget,
        type_arguments: Vec<String>,
        arguments: Vec<Argument>,
        encoded: Vec<EncodedArgument>,
    ) -> PreparedCall {
        PreparedCall {
            target,
            type_arguments,
            inputs: self.inputs,
            commands: self.commands,
            arguments,
            encoded,
        }
    }
}

impl ArgumentBuilder for CallArgBuilder {
    fn pure(&mut self, bytes: Vec<u8>) -> Result<Argument> {
        Ok(Argument::Input(self.push_input(CallInput::Pure { bytes })?))
    }

    fn object(&mut self, id: ObjectID) -> Result<Argument> {
        if let Some(idx) = self.objects.get(&id) {
            return Ok(Argument::Input(*idx));
        }
        let idx = self.push_input(CallInput::Object { id })?;
        self.objects.insert(id, idx);
        Ok(Argument::Input(idx))
    }

    fn make_object_vector(&mut self, elements: Vec<Argument>) -> Result<Argument> {
        let idx = u16::try_from(self.commands.len())
            .map_err(|_| anyhow!("too many commands ({})", self.commands.len()))?;
        self.commands
            .push(BuilderCommand::MakeObjectVector { elements });
        Ok(Argument::Result(idx))
    }
}

/// A fully encoded Move call, ready for signing and submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedCall {
    pub target: FunctionTarget,
    pub type_arguments: Vec<String>,
    pub inputs: Vec<CallInput>,
    pub commands: Vec<BuilderCommand>,
    /// One argument per user-facing parameter, in declared order.
    pub arguments: Vec<Argument>,
    pub encoded: Vec<EncodedArgument>,
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}

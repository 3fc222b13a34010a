//! Argument encoding.
//!
//! [`encode_argument`] maps validated raw input to an [`EncodedArgument`]
//! using the declared type; [`allocate`] turns that into call arguments on an
//! [`ArgumentBuilder`], BCS-encoding pure values on the way.
//!
//! Only the orchestrator calls these, and only after every parameter has
//! validated. Misuse still yields an [`EncodeError`] rather than a panic.

use anyhow::Context;
use move_core_types::account_address::AccountAddress;
use move_core_types::identifier::Identifier;
use move_core_types::language_storage::{StructTag, TypeTag};
use move_core_types::u256::U256;
use std::fmt;
use sui_types::base_types::ObjectID;
use sui_types::transaction::Argument;

use sui_call_types::{EncodedArgument, NormalizedType, RawInput, ScalarWidth};

use crate::builder::ArgumentBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A value does not parse as its declared type.
    InvalidInput { type_name: String, reason: String },
    /// Raw input shape (single vs. array) does not fit the type.
    ShapeMismatch { type_name: String },
    /// The type still contains a generic parameter.
    UnresolvedTypeParameter(u16),
    /// A pure vector element was not a scalar.
    MixedVector,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::InvalidInput { type_name, reason } => {
                write!(f, "cannot encode value as {}: {}", type_name, reason)
            }
            EncodeError::ShapeMismatch { type_name } => {
                write!(f, "input shape does not match type {}", type_name)
            }
            EncodeError::UnresolvedTypeParameter(idx) => {
                write!(f, "type parameter T{} has no type argument", idx)
            }
            EncodeError::MixedVector => write!(f, "pure vector contains a non-scalar element"),
        }
    }
}

impl std::error::Error for EncodeError {}

fn first_type_parameter(ty: &NormalizedType) -> Option<u16> {
    match ty {
        NormalizedType::TypeParameter(idx) => Some(*idx),
        NormalizedType::Scalar(_) => None,
        NormalizedType::Vector(inner)
        | NormalizedType::Reference(inner)
        | NormalizedType::MutableReference(inner) => first_type_parameter(inner),
        NormalizedType::Struct(s) => s.type_arguments.iter().find_map(first_type_parameter),
    }
}

/// Encode one raw input against its declared type.
pub fn encode_argument(raw: &RawInput, ty: &NormalizedType) -> Result<EncodedArgument, EncodeError> {
    if let Some(idx) = first_type_parameter(ty) {
        return Err(EncodeError::UnresolvedTypeParameter(idx));
    }

    match (raw, ty) {
        (RawInput::Single(s), NormalizedType::Scalar(width)) => Ok(EncodedArgument::Pure {
            width: *width,
            raw: s.clone(),
        }),
        (RawInput::Many(items), NormalizedType::Vector(element)) => {
            let elements = items
                .iter()
                .map(|item| encode_argument(&RawInput::Single(item.clone()), element))
                .collect::<Result<Vec<_>, _>>()?;
            let element_width = match element.as_ref() {
                NormalizedType::Scalar(width) => Some(*width),
                _ => None,
            };
            Ok(EncodedArgument::PureVector {
                element_width,
                elements,
            })
        }
        (
            RawInput::Single(id),
            NormalizedType::Struct(_)
            | NormalizedType::Reference(_)
            | NormalizedType::MutableReference(_),
        ) => Ok(EncodedArgument::ObjectRef { id: id.clone() }),
        (
            RawInput::Many(_),
            NormalizedType::Reference(inner) | NormalizedType::MutableReference(inner),
        ) if matches!(inner.strip_references(), NormalizedType::Vector(_)) => {
            encode_argument(raw, inner.strip_references())
        }
        _ => Err(EncodeError::ShapeMismatch {
            type_name: ty.type_name(),
        }),
    }
}

/// BCS bytes of one scalar literal.
///
/// Integers are parsed exactly at their declared width; nothing goes
/// through floating point.
pub fn pure_bytes(width: ScalarWidth, raw: &str) -> Result<Vec<u8>, EncodeError> {
    let invalid = |reason: String| EncodeError::InvalidInput {
        type_name: width.to_string(),
        reason,
    };

    let bytes = match width {
        ScalarWidth::U8 => bcs::to_bytes(&raw.parse::<u8>().map_err(|e| invalid(e.to_string()))?),
        ScalarWidth::U16 => {
            bcs::to_bytes(&raw.parse::<u16>().map_err(|e| invalid(e.to_string()))?)
        }
        ScalarWidth::U32 => {
            bcs::to_bytes(&raw.parse::<u32>().map_err(|e| invalid(e.to_string()))?)
        }
        ScalarWidth::U64 => {
            bcs::to_bytes(&raw.parse::<u64>().map_err(|e| invalid(e.to_string()))?)
        }
        ScalarWidth::U128 => {
            bcs::to_bytes(&raw.parse::<u128>().map_err(|e| invalid(e.to_string()))?)
        }
        ScalarWidth::U256 => {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(format!("not a decimal integer: {raw}")));
            }
            let value = U256::from_str_radix(raw, 10).map_err(|e| invalid(e.to_string()))?;
            bcs::to_bytes(&value)
        }
        ScalarWidth::Bool => bcs::to_bytes(&raw.eq_ignore_ascii_case("true")),
        ScalarWidth::Address => {
            let address =
                AccountAddress::from_hex_literal(raw).map_err(|e| invalid(e.to_string()))?;
            bcs::to_bytes(&address)
        }
    };
    bytes.map_err(|e| invalid(e.to_string()))
}

/// ULEB128 length prefix, as BCS writes sequence lengths.
pub fn encode_uleb128(mut value: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            bytes.push(byte);
            break;
        } else {
            bytes.push(byte | 0x80);
        }
    }
    bytes
}

/// BCS bytes of a homogeneous scalar vector.
pub fn pure_vector_bytes(
    width: ScalarWidth,
    elements: &[EncodedArgument],
) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = encode_uleb128(elements.len());
    for element in elements {
        match element {
            EncodedArgument::Pure { raw, .. } => bytes.extend(pure_bytes(width, raw)?),
            _ => return Err(EncodeError::MixedVector),
        }
    }
    Ok(bytes)
}

fn object_id(raw: &str) -> Result<ObjectID, EncodeError> {
    ObjectID::from_hex_literal(raw.trim()).map_err(|e| EncodeError::InvalidInput {
        type_name: "object".to_string(),
        reason: e.to_string(),
    })
}

/// Allocate an encoded argument on `builder`.
///
/// A scalar vector is one pure input. A vector of objects allocates each
/// element as an object input and then a single make-vector command.
pub fn allocate<B: ArgumentBuilder + ?Sized>(
    builder: &mut B,
    encoded: &EncodedArgument,
) -> anyhow::Result<Argument> {
    match encoded {
        EncodedArgument::Pure { width, raw } => builder.pure(pure_bytes(*width, raw)?),
        EncodedArgument::PureVector {
            element_width: Some(width),
            elements,
        } => builder.pure(pure_vector_bytes(*width, elements)?),
        EncodedArgument::PureVector {
            element_width: None,
            elements,
        } => {
            let args = elements
                .iter()
                .map(|element| allocate(builder, element))
                .collect::<anyhow::Result<Vec<_>>>()?;
            builder.make_object_vector(args)
        }
        EncodedArgument::ObjectRef { id } => builder.object(object_id(id)?),
    }
}

/// Encode and allocate every `(raw, param)` pair in order.
///
/// Returns the call arguments alongside the encoded values they came from.
/// Errors name the index of the parameter that failed.
pub fn prepare_arguments<B: ArgumentBuilder + ?Sized>(
    builder: &mut B,
    raws: &[RawInput],
    params: &[NormalizedType],
) -> anyhow::Result<(Vec<Argument>, Vec<EncodedArgument>)> {
    let mut arguments = Vec::with_capacity(params.len());
    let mut encoded = Vec::with_capacity(params.len());
    for (idx, (raw, ty)) in raws.iter().zip(params).enumerate() {
        let argument = encode_argument(raw, ty)
            .with_context(|| format!("Failed to encode parameter {}", idx))?;
        let allocated = allocate(builder, &argument)
            .with_context(|| format!("Failed to encode parameter {}", idx))?;
        arguments.push(allocated);
        encoded.push(argument);
    }
    Ok((arguments, encoded))
}

/// Convert a concrete type argument to a [`TypeTag`].
///
/// References are not valid type arguments.
pub fn to_type_tag(ty: &NormalizedType) -> Result<TypeTag, EncodeError> {
    let invalid = |reason: String| EncodeError::InvalidInput {
        type_name: ty.type_name(),
        reason,
    };
    let tag = match ty {
        NormalizedType::Scalar(width) => match width {
            ScalarWidth::U8 => TypeTag::U8,
            ScalarWidth::U16 => TypeTag::U16,
            ScalarWidth::U32 => TypeTag::U32,
            ScalarWidth::U64 => TypeTag::U64,
            ScalarWidth::U128 => TypeTag::U128,
            ScalarWidth::U256 => TypeTag::U256,
            ScalarWidth::Bool => TypeTag::Bool,
            ScalarWidth::Address => TypeTag::Address,
        },
        NormalizedType::Vector(inner) => TypeTag::Vector(Box::new(to_type_tag(inner)?)),
        NormalizedType::Struct(s) => TypeTag::Struct(Box::new(StructTag {
            address: AccountAddress::from_hex_literal(&s.address)
                .map_err(|e| invalid(e.to_string()))?,
            module: Identifier::new(s.module.as_str()).map_err(|e| invalid(e.to_string()))?,
            name: Identifier::new(s.name.as_str()).map_err(|e| invalid(e.to_string()))?,
            type_params: s
                .type_arguments
                .iter()
                .map(to_type_tag)
                .collect::<Result<Vec<_>, _>>()?,
        })),
        NormalizedType::Reference(_) | NormalizedType::MutableReference(_) => {
            return Err(invalid("reference types cannot be type arguments".to_string()))
        }
        NormalizedType::TypeParameter(idx) => {
            return Err(EncodeError::UnresolvedTypeParameter(*idx))
        }
    };
    Ok(tag)
}

//! Normalized Move parameter types.
//!
//! A [`NormalizedType`] is the closed, recursive form of a function parameter
//! type as reported by a package's normalized module. Everything downstream
//! (classification, naming, validation, encoding) matches on it exhaustively.
//!
//! # Example
//!
//! ```
//! use sui_call_types::normalized::{NormalizedType, ScalarWidth, TypeCategory};
//!
//! let coin = NormalizedType::structure(
//!     "0x2",
//!     "coin",
//!     "Coin",
//!     vec![NormalizedType::structure("0x2", "sui", "SUI", vec![])],
//! );
//! assert_eq!(coin.type_name(), "0x2::coin::Coin<0x2::sui::SUI>");
//!
//! let by_ref = NormalizedType::Reference(Box::new(coin.clone()));
//! assert_eq!(by_ref.category(), TypeCategory::Complex);
//! assert_eq!(by_ref.type_name(), coin.type_name());
//!
//! let bytes = NormalizedType::vector(NormalizedType::Scalar(ScalarWidth::U8));
//! assert_eq!(bytes.type_name(), "Vector<U8>");
//! ```

use move_core_types::account_address::AccountAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::framework;

/// Leaf widths a pure argument can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarWidth {
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Bool,
    Address,
}

impl ScalarWidth {
    pub const ALL: [ScalarWidth; 8] = [
        ScalarWidth::U8,
        ScalarWidth::U16,
        ScalarWidth::U32,
        ScalarWidth::U64,
        ScalarWidth::U128,
        ScalarWidth::U256,
        ScalarWidth::Bool,
        ScalarWidth::Address,
    ];

    /// Canonical width name used in rendered type names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarWidth::U8 => "U8",
            ScalarWidth::U16 => "U16",
            ScalarWidth::U32 => "U32",
            ScalarWidth::U64 => "U64",
            ScalarWidth::U128 => "U128",
            ScalarWidth::U256 => "U256",
            ScalarWidth::Bool => "Bool",
            ScalarWidth::Address => "Address",
        }
    }

    /// Parse either Move source spelling (`u64`, `address`) or the canonical
    /// width name (`U64`, `Address`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "u8" | "U8" => Some(ScalarWidth::U8),
            "u16" | "U16" => Some(ScalarWidth::U16),
            "u32" | "U32" => Some(ScalarWidth::U32),
            "u64" | "U64" => Some(ScalarWidth::U64),
            "u128" | "U128" => Some(ScalarWidth::U128),
            "u256" | "U256" => Some(ScalarWidth::U256),
            "bool" | "Bool" => Some(ScalarWidth::Bool),
            "address" | "Address" => Some(ScalarWidth::Address),
            _ => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        self.bits().is_some()
    }

    /// Bit width of integer scalars, `None` for `Bool` and `Address`.
    pub fn bits(&self) -> Option<u32> {
        match self {
            ScalarWidth::U8 => Some(8),
            ScalarWidth::U16 => Some(16),
            ScalarWidth::U32 => Some(32),
            ScalarWidth::U64 => Some(64),
            ScalarWidth::U128 => Some(128),
            ScalarWidth::U256 => Some(256),
            ScalarWidth::Bool | ScalarWidth::Address => None,
        }
    }
}

impl fmt::Display for ScalarWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A struct type identity, possibly instantiated with type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructRef {
    pub address: String,
    pub module: String,
    pub name: String,
    #[serde(default)]
    pub type_arguments: Vec<NormalizedType>,
}

impl StructRef {
    /// `address::module::name` without type arguments.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}::{}", self.address, self.module, self.name)
    }

    /// True if this is `0x2::tx_context::TxContext`, in short or long address form.
    pub fn is_tx_context(&self) -> bool {
        self.type_arguments.is_empty()
            && framework::is_tx_context_name(&self.qualified_name())
    }
}

/// A function parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalizedType {
    Scalar(ScalarWidth),
    Vector(Box<NormalizedType>),
    Struct(StructRef),
    Reference(Box<NormalizedType>),
    MutableReference(Box<NormalizedType>),
    TypeParameter(u16),
}

/// How a parameter is rendered and handled by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    /// Single-line text input.
    Scalar,
    /// One text input per element.
    Vector,
    /// Object identifier input.
    Complex,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeCategory::Scalar => "scalar",
            TypeCategory::Vector => "vector",
            TypeCategory::Complex => "complex",
        };
        f.write_str(s)
    }
}

impl NormalizedType {
    pub fn vector(element: NormalizedType) -> Self {
        NormalizedType::Vector(Box::new(element))
    }

    pub fn structure(
        address: &str,
        module: &str,
        name: &str,
        type_arguments: Vec<NormalizedType>,
    ) -> Self {
        NormalizedType::Struct(StructRef {
            address: address.to_string(),
            module: module.to_string(),
            name: name.to_string(),
            type_arguments,
        })
    }

    /// Bucket the type into its input category, looking through references.
    pub fn category(&self) -> TypeCategory {
        match self {
            NormalizedType::Vector(_) => TypeCategory::Vector,
            NormalizedType::Struct(_) => TypeCategory::Complex,
            NormalizedType::Reference(inner) | NormalizedType::MutableReference(inner) => {
                inner.category()
            }
            NormalizedType::Scalar(_) | NormalizedType::TypeParameter(_) => TypeCategory::Scalar,
        }
    }

    /// Canonical fully-qualified name.
    ///
    /// References are invisible here: an on-chain object's value type never
    /// carries reference-ness, and this string is compared against it.
    pub fn type_name(&self) -> String {
        self.to_string()
    }

    /// The type with every outer `&`/`&mut` removed.
    pub fn strip_references(&self) -> &NormalizedType {
        match self {
            NormalizedType::Reference(inner) | NormalizedType::MutableReference(inner) => {
                inner.strip_references()
            }
            other => other,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            NormalizedType::Reference(_) | NormalizedType::MutableReference(_)
        )
    }

    /// True for `TxContext`, `&TxContext` and `&mut TxContext`.
    pub fn is_tx_context(&self) -> bool {
        match self.strip_references() {
            NormalizedType::Struct(s) => s.is_tx_context(),
            _ => false,
        }
    }

    pub fn has_type_parameters(&self) -> bool {
        match self {
            NormalizedType::TypeParameter(_) => true,
            NormalizedType::Scalar(_) => false,
            NormalizedType::Vector(inner)
            | NormalizedType::Reference(inner)
            | NormalizedType::MutableReference(inner) => inner.has_type_parameters(),
            NormalizedType::Struct(s) => s.type_arguments.iter().any(|t| t.has_type_parameters()),
        }
    }

    /// Replace `TypeParameter(i)` with `type_args[i]`.
    ///
    /// Indices with no corresponding argument are left in place.
    pub fn substitute(&self, type_args: &[NormalizedType]) -> NormalizedType {
        match self {
            NormalizedType::TypeParameter(idx) => type_args
                .get(*idx as usize)
                .cloned()
                .unwrap_or(NormalizedType::TypeParameter(*idx)),
            NormalizedType::Scalar(w) => NormalizedType::Scalar(*w),
            NormalizedType::Vector(inner) => NormalizedType::vector(inner.substitute(type_args)),
            NormalizedType::Reference(inner) => {
                NormalizedType::Reference(Box::new(inner.substitute(type_args)))
            }
            NormalizedType::MutableReference(inner) => {
                NormalizedType::MutableReference(Box::new(inner.substitute(type_args)))
            }
            NormalizedType::Struct(s) => NormalizedType::Struct(StructRef {
                address: s.address.clone(),
                module: s.module.clone(),
                name: s.name.clone(),
                type_arguments: s
                    .type_arguments
                    .iter()
                    .map(|t| t.substitute(type_args))
                    .collect(),
            }),
        }
    }

    /// The same type with every struct address in full 64-digit form.
    ///
    /// On-chain type strings always carry long addresses, so a type written
    /// as `0x2::sui::SUI` must be widened before its name can match one.
    /// Addresses that do not parse are kept as written.
    pub fn with_long_addresses(&self) -> NormalizedType {
        match self {
            NormalizedType::Scalar(w) => NormalizedType::Scalar(*w),
            NormalizedType::TypeParameter(idx) => NormalizedType::TypeParameter(*idx),
            NormalizedType::Vector(inner) => NormalizedType::vector(inner.with_long_addresses()),
            NormalizedType::Reference(inner) => {
                NormalizedType::Reference(Box::new(inner.with_long_addresses()))
            }
            NormalizedType::MutableReference(inner) => {
                NormalizedType::MutableReference(Box::new(inner.with_long_addresses()))
            }
            NormalizedType::Struct(s) => NormalizedType::Struct(StructRef {
                address: AccountAddress::from_hex_literal(&s.address)
                    .map(|a| a.to_canonical_string(true))
                    .unwrap_or_else(|_| s.address.clone()),
                module: s.module.clone(),
                name: s.name.clone(),
                type_arguments: s
                    .type_arguments
                    .iter()
                    .map(|t| t.with_long_addresses())
                    .collect(),
            }),
        }
    }
}

impl fmt::Display for NormalizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedType::Scalar(w) => f.write_str(w.as_str()),
            NormalizedType::Vector(inner) => write!(f, "Vector<{inner}>"),
            NormalizedType::Struct(s) => {
                write!(f, "{}", s.qualified_name())?;
                if !s.type_arguments.is_empty() {
                    let args: Vec<String> =
                        s.type_arguments.iter().map(|t| t.to_string()).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
            NormalizedType::Reference(inner) | NormalizedType::MutableReference(inner) => {
                write!(f, "{inner}")
            }
            NormalizedType::TypeParameter(idx) => write!(f, "T{idx}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sui() -> NormalizedType {
        NormalizedType::structure("0x2", "sui", "SUI", vec![])
    }

    fn coin_of(inner: NormalizedType) -> NormalizedType {
        NormalizedType::structure("0xabc", "coin", "Coin", vec![inner])
    }

    #[test]
    fn test_category_unwraps_references() {
        let vec_u8 = NormalizedType::vector(NormalizedType::Scalar(ScalarWidth::U8));
        assert_eq!(vec_u8.category(), TypeCategory::Vector);
        assert_eq!(
            NormalizedType::Reference(Box::new(vec_u8)).category(),
            TypeCategory::Vector
        );
        assert_eq!(
            NormalizedType::MutableReference(Box::new(sui())).category(),
            TypeCategory::Complex
        );
        assert_eq!(
            NormalizedType::Scalar(ScalarWidth::Address).category(),
            TypeCategory::Scalar
        );
        assert_eq!(
            NormalizedType::TypeParameter(0).category(),
            TypeCategory::Scalar
        );
    }

    #[test]
    fn test_struct_names() {
        assert_eq!(sui().type_name(), "0x2::sui::SUI");
        assert_eq!(
            coin_of(sui()).type_name(),
            "0xabc::coin::Coin<0x2::sui::SUI>"
        );

        let pair = NormalizedType::structure(
            "0x1",
            "pool",
            "Pool",
            vec![sui(), NormalizedType::Scalar(ScalarWidth::U64)],
        );
        assert_eq!(pair.type_name(), "0x1::pool::Pool<0x2::sui::SUI, U64>");
    }

    #[test]
    fn test_names_distinguish_generic_arguments() {
        let usdc = NormalizedType::structure("0x2", "sui", "USDC", vec![]);
        assert_ne!(coin_of(sui()).type_name(), coin_of(usdc).type_name());

        let swapped_a = NormalizedType::structure("0x1", "m", "P", vec![sui(), coin_of(sui())]);
        let swapped_b = NormalizedType::structure("0x1", "m", "P", vec![coin_of(sui()), sui()]);
        assert_ne!(swapped_a.type_name(), swapped_b.type_name());
    }

    #[test]
    fn test_reference_name_is_transparent() {
        let coin = coin_of(sui());
        let by_ref = NormalizedType::Reference(Box::new(coin.clone()));
        let by_mut = NormalizedType::MutableReference(Box::new(coin.clone()));
        assert_eq!(by_ref.type_name(), coin.type_name());
        assert_eq!(by_mut.type_name(), coin.type_name());
    }

    #[test]
    fn test_nested_vector_name() {
        let t = NormalizedType::vector(NormalizedType::vector(coin_of(sui())));
        assert_eq!(
            t.type_name(),
            "Vector<Vector<0xabc::coin::Coin<0x2::sui::SUI>>>"
        );
        assert_eq!(NormalizedType::TypeParameter(3).type_name(), "T3");
    }

    #[test]
    fn test_tx_context_detection() {
        let short = NormalizedType::structure("0x2", "tx_context", "TxContext", vec![]);
        let long = NormalizedType::structure(
            "0x0000000000000000000000000000000000000000000000000000000000000002",
            "tx_context",
            "TxContext",
            vec![],
        );
        assert!(short.is_tx_context());
        assert!(NormalizedType::MutableReference(Box::new(long)).is_tx_context());
        assert!(!NormalizedType::structure("0x3", "tx_context", "TxContext", vec![]).is_tx_context());
        assert!(!sui().is_tx_context());
    }

    #[test]
    fn test_substitute_type_parameters() {
        let generic = NormalizedType::Reference(Box::new(NormalizedType::structure(
            "0xabc",
            "coin",
            "Coin",
            vec![NormalizedType::TypeParameter(0)],
        )));
        assert!(generic.has_type_parameters());

        let concrete = generic.substitute(&[sui()]);
        assert!(!concrete.has_type_parameters());
        assert_eq!(concrete.type_name(), "0xabc::coin::Coin<0x2::sui::SUI>");
        assert!(concrete.is_reference());

        let unbound = NormalizedType::TypeParameter(2).substitute(&[sui()]);
        assert_eq!(unbound, NormalizedType::TypeParameter(2));
    }

    #[test]
    fn test_long_addresses_match_on_chain_names() {
        let generic = NormalizedType::MutableReference(Box::new(NormalizedType::structure(
            "0x0000000000000000000000000000000000000000000000000000000000000002",
            "coin",
            "Coin",
            vec![NormalizedType::TypeParameter(0)],
        )));
        let type_arg = sui().with_long_addresses();
        assert_eq!(
            generic.substitute(&[type_arg]).type_name(),
            "0x0000000000000000000000000000000000000000000000000000000000000002::coin::Coin<\
             0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI>"
        );

        let nested = NormalizedType::vector(coin_of(sui())).with_long_addresses();
        assert_eq!(
            nested.type_name(),
            "Vector<0x0000000000000000000000000000000000000000000000000000000000000abc::coin::Coin<\
             0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI>>"
        );
        assert_eq!(
            NormalizedType::Scalar(ScalarWidth::U64).with_long_addresses(),
            NormalizedType::Scalar(ScalarWidth::U64)
        );
    }

    #[test]
    fn test_scalar_width_names() {
        for w in ScalarWidth::ALL {
            assert_eq!(ScalarWidth::from_name(w.as_str()), Some(w));
        }
        assert_eq!(ScalarWidth::from_name("u128"), Some(ScalarWidth::U128));
        assert_eq!(ScalarWidth::from_name("signer"), None);
        assert!(ScalarWidth::U256.is_integer());
        assert!(!ScalarWidth::Address.is_integer());
    }
}

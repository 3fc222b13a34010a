//! Type-directed validation of raw form input.
//!
//! Every `(RawInput, NormalizedType)` pair gets a [`Verdict`]. Scalars are
//! checked against a fixed grammar, vectors element by element, and
//! struct/reference slots by resolving the object identifier and comparing
//! the on-chain type string with the declared type name. Nothing escapes as an
//! error: resolver failures become [`Verdict::Unknown`].

use futures::future::{join_all, BoxFuture, FutureExt};
use move_core_types::u256::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sui_call_types::{NormalizedType, RawInput, ScalarWidth};

use crate::resolver::{NetworkContext, ObjectTypeResolver};

/// Outcome of validating one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Valid,
    /// The input is definitely wrong for the type.
    Invalid,
    /// An object lookup failed, so the input could not be checked.
    Unknown,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Fold element verdicts: any `Invalid` wins, then any `Unknown`.
    fn combine(self, other: Verdict) -> Verdict {
        match (self, other) {
            (Verdict::Invalid, _) | (_, Verdict::Invalid) => Verdict::Invalid,
            (Verdict::Unknown, _) | (_, Verdict::Unknown) => Verdict::Unknown,
            _ => Verdict::Valid,
        }
    }

    fn from_bool(ok: bool) -> Verdict {
        if ok {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

/// Check a decimal integer literal: ASCII digits only, and within the width
/// when `check_range` is set.
pub fn is_valid_integer(raw: &str, width: ScalarWidth, check_range: bool) -> bool {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if !check_range {
        return true;
    }
    match width {
        ScalarWidth::U8 => raw.parse::<u8>().is_ok(),
        ScalarWidth::U16 => raw.parse::<u16>().is_ok(),
        ScalarWidth::U32 => raw.parse::<u32>().is_ok(),
        ScalarWidth::U64 => raw.parse::<u64>().is_ok(),
        ScalarWidth::U128 => raw.parse::<u128>().is_ok(),
        ScalarWidth::U256 => U256::from_str_radix(raw, 10).is_ok(),
        ScalarWidth::Bool | ScalarWidth::Address => false,
    }
}

pub fn is_valid_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("false")
}

/// `0x` followed by exactly 64 hex digits, either case.
pub fn is_valid_address(raw: &str) -> bool {
    match raw.strip_prefix("0x") {
        Some(hex) => hex.len() == 64 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Grammar check for a single scalar literal.
pub fn is_valid_scalar(raw: &str, width: ScalarWidth, check_range: bool) -> bool {
    match width {
        ScalarWidth::Bool => is_valid_bool(raw),
        ScalarWidth::Address => is_valid_address(raw),
        _ => is_valid_integer(raw, width, check_range),
    }
}

/// Validates raw input against parameter types.
///
/// The network context is fixed at construction and passed to every
/// resolver call.
pub struct Validator<'a, R: ?Sized> {
    resolver: &'a R,
    ctx: &'a NetworkContext,
    check_ranges: bool,
}

impl<'a, R: ObjectTypeResolver + ?Sized> Validator<'a, R> {
    pub fn new(resolver: &'a R, ctx: &'a NetworkContext) -> Self {
        Self {
            resolver,
            ctx,
            check_ranges: true,
        }
    }

    pub fn with_range_checks(mut self, check_ranges: bool) -> Self {
        self.check_ranges = check_ranges;
        self
    }

    /// `true` only for a [`Verdict::Valid`] outcome.
    pub async fn validate(&self, raw: &RawInput, ty: &NormalizedType) -> bool {
        self.verdict(raw, ty).await.is_valid()
    }

    pub fn verdict<'b>(&'b self, raw: &'b RawInput, ty: &'b NormalizedType) -> BoxFuture<'b, Verdict> {
        async move {
            if ty.has_type_parameters() {
                return Verdict::Invalid;
            }
            match (raw, ty) {
                (RawInput::Single(s), NormalizedType::Scalar(width)) => {
                    Verdict::from_bool(is_valid_scalar(s, *width, self.check_ranges))
                }
                (RawInput::Many(items), NormalizedType::Vector(element)) => {
                    let mut verdict = Verdict::Valid;
                    for item in items {
                        let single = RawInput::Single(item.clone());
                        verdict = verdict.combine(self.verdict(&single, element).await);
                        if verdict == Verdict::Invalid {
                            break;
                        }
                    }
                    verdict
                }
                (RawInput::Single(id), NormalizedType::Struct(_)) => {
                    self.check_identity(id, ty).await
                }
                (
                    RawInput::Single(id),
                    NormalizedType::Reference(inner) | NormalizedType::MutableReference(inner),
                ) => self.check_identity(id, inner).await,
                (
                    RawInput::Many(_),
                    NormalizedType::Reference(inner) | NormalizedType::MutableReference(inner),
                ) if matches!(inner.strip_references(), NormalizedType::Vector(_)) => {
                    self.verdict(raw, inner.strip_references()).await
                }
                _ => Verdict::Invalid,
            }
        }
        .boxed()
    }

    /// Resolve `object_id` and compare its type string with `expected`'s name.
    async fn check_identity(&self, object_id: &str, expected: &NormalizedType) -> Verdict {
        let expected_name = expected.type_name();
        match self.resolver.resolve(object_id, self.ctx).await {
            Ok(actual) => {
                let verdict = Verdict::from_bool(actual == expected_name);
                debug!(
                    object_id = object_id,
                    expected = %expected_name,
                    actual = %actual,
                    verdict = ?verdict,
                    "object identity check"
                );
                verdict
            }
            Err(e) => {
                debug!(object_id = object_id, error = %e, "object lookup failed");
                Verdict::Unknown
            }
        }
    }

    /// Validate every parameter, returning verdicts aligned with `params`.
    ///
    /// A parameter with no raw input is `Invalid`. Extra raw inputs are
    /// ignored.
    pub async fn validate_all(
        &self,
        params: &[NormalizedType],
        raws: &[RawInput],
        concurrent: bool,
    ) -> Vec<Verdict> {
        if concurrent {
            let checks = params.iter().enumerate().map(|(idx, ty)| async move {
                match raws.get(idx) {
                    Some(raw) => self.verdict(raw, ty).await,
                    None => Verdict::Invalid,
                }
            });
            join_all(checks).await
        } else {
            let mut verdicts = Vec::with_capacity(params.len());
            for (idx, ty) in params.iter().enumerate() {
                let verdict = match raws.get(idx) {
                    Some(raw) => self.verdict(raw, ty).await,
                    None => Verdict::Invalid,
                };
                verdicts.push(verdict);
            }
            verdicts
        }
    }
}

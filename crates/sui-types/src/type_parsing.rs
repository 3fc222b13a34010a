//! Type string parsing utilities.
//!
//! Parses Move type syntax into a [`NormalizedType`]. Used wherever a
//! parameter type arrives as text (CLI flags, fixtures, type arguments).

use move_core_types::account_address::AccountAddress;
use move_core_types::identifier::Identifier;

use crate::normalized::{NormalizedType, ScalarWidth};

/// Parse a Move type string into a NormalizedType.
///
/// Supports:
/// - Scalars: `bool`, `u8` .. `u256`, `address` (canonical `U8`/`Bool` spellings too)
/// - Vector types: `vector<T>` or `Vector<T>`
/// - Struct types: `0x2::module::Struct` or `0x2::module::Struct<T1, T2>`
/// - References: `&T`, `&mut T`
/// - Type parameters: `T0`, `T1`, ...
///
/// Struct addresses are kept exactly as written so that rendered names match
/// the spelling the caller supplied.
///
/// # Examples
///
/// ```
/// use sui_call_types::type_parsing::parse_normalized_type;
///
/// let t = parse_normalized_type("&mut 0x2::coin::Coin<0x2::sui::SUI>").unwrap();
/// assert!(t.is_reference());
/// assert_eq!(t.type_name(), "0x2::coin::Coin<0x2::sui::SUI>");
/// ```
pub fn parse_normalized_type(type_str: &str) -> Option<NormalizedType> {
    let type_str = type_str.trim();

    if let Some(rest) = type_str.strip_prefix("&mut ") {
        return Some(NormalizedType::MutableReference(Box::new(
            parse_normalized_type(rest)?,
        )));
    }
    if let Some(rest) = type_str.strip_prefix('&') {
        return Some(NormalizedType::Reference(Box::new(parse_normalized_type(
            rest,
        )?)));
    }

    if let Some(width) = ScalarWidth::from_name(type_str) {
        return Some(NormalizedType::Scalar(width));
    }

    if let Some(idx) = type_str
        .strip_prefix('T')
        .and_then(|digits| digits.parse::<u16>().ok())
    {
        return Some(NormalizedType::TypeParameter(idx));
    }

    // Handle vector types
    if let Some(inner) = type_str
        .strip_prefix("vector<")
        .or_else(|| type_str.strip_prefix("Vector<"))
        .and_then(|s| s.strip_suffix('>'))
    {
        return Some(NormalizedType::vector(parse_normalized_type(inner)?));
    }

    // Handle struct types: 0x<address>::<module>::<name><type_args>
    let (base_type, type_args_str) = if let Some(angle_pos) = type_str.find('<') {
        (&type_str[..angle_pos], Some(&type_str[angle_pos..]))
    } else {
        (type_str, None)
    };

    let parts: Vec<&str> = base_type.split("::").collect();
    if parts.len() != 3 {
        return None;
    }

    let address = parts[0];
    AccountAddress::from_hex_literal(address).ok()?;
    let module = Identifier::new(parts[1]).ok()?;
    let name = Identifier::new(parts[2]).ok()?;

    let type_arguments = match type_args_str {
        Some(args_str) => parse_type_args(args_str)?,
        None => vec![],
    };

    Some(NormalizedType::structure(
        address,
        module.as_str(),
        name.as_str(),
        type_arguments,
    ))
}

/// Parse type arguments string like "<T1, T2, T3>".
fn parse_type_args(args_str: &str) -> Option<Vec<NormalizedType>> {
    let inner = args_str.strip_prefix('<')?.strip_suffix('>')?;
    if inner.trim().is_empty() {
        return Some(vec![]);
    }
    split_type_params(inner)
        .into_iter()
        .map(parse_normalized_type)
        .collect()
}

/// Split type parameters respecting nested angle brackets.
///
/// Given "A, B<C, D>, E", returns ["A", "B<C, D>", "E"] by tracking bracket depth.
pub fn split_type_params(s: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth = 0;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                result.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < s.len() {
        result.push(s[start..].trim());
    }

    result
}

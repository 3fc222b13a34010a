//! Validation and encoding properties over the public engine API.

mod common;

use common::*;
use sui_call_core::encoder::pure_bytes;
use sui_call_core::{
    encode_argument, InMemoryObjectResolver, ResolveError, Validator, Verdict,
};
use sui_call_types::{EncodedArgument, NormalizedType, RawInput, ScalarWidth};

fn pure_of(encoded: &EncodedArgument) -> Vec<u8> {
    match encoded {
        EncodedArgument::Pure { width, raw } => pure_bytes(*width, raw).unwrap(),
        other => panic!("expected pure argument, got {:?}", other),
    }
}

#[tokio::test]
async fn test_scalar_widths_round_trip() {
    let resolver = InMemoryObjectResolver::new();
    let ctx = test_context();
    let validator = Validator::new(&resolver, &ctx);

    let cases: [(ScalarWidth, &str); 6] = [
        (ScalarWidth::U8, "255"),
        (ScalarWidth::U16, "65535"),
        (ScalarWidth::U32, "4294967295"),
        (ScalarWidth::U64, "18446744073709551615"),
        (ScalarWidth::U128, "340282366920938463463374607431768211455"),
        (ScalarWidth::U256, "9007199254740993"),
    ];

    for (width, raw) in cases {
        let ty = NormalizedType::Scalar(width);
        let input = RawInput::from(raw);
        assert!(validator.validate(&input, &ty).await, "{} as {}", raw, width);

        let bytes = pure_of(&encode_argument(&input, &ty).unwrap());
        let decoded = match width {
            ScalarWidth::U8 => bcs::from_bytes::<u8>(&bytes).unwrap().to_string(),
            ScalarWidth::U16 => bcs::from_bytes::<u16>(&bytes).unwrap().to_string(),
            ScalarWidth::U32 => bcs::from_bytes::<u32>(&bytes).unwrap().to_string(),
            ScalarWidth::U64 => bcs::from_bytes::<u64>(&bytes).unwrap().to_string(),
            ScalarWidth::U128 => bcs::from_bytes::<u128>(&bytes).unwrap().to_string(),
            _ => bcs::from_bytes::<move_core_types::u256::U256>(&bytes)
                .unwrap()
                .to_string(),
        };
        assert_eq!(decoded, raw);
    }
}

#[tokio::test]
async fn test_u64_max_is_exact() {
    let input = RawInput::from("18446744073709551615");
    let bytes = pure_of(&encode_argument(&input, &u64_type()).unwrap());
    assert_eq!(bcs::from_bytes::<u64>(&bytes).unwrap(), 18446744073709551615u64);
}

#[tokio::test]
async fn test_range_checks_are_configurable() {
    let resolver = InMemoryObjectResolver::new();
    let ctx = test_context();

    let strict = Validator::new(&resolver, &ctx);
    assert!(!strict.validate(&"999".into(), &u8_type()).await);

    let permissive = Validator::new(&resolver, &ctx).with_range_checks(false);
    assert!(permissive.validate(&"999".into(), &u8_type()).await);
    assert!(!permissive.validate(&"0x10".into(), &u8_type()).await);
}

#[tokio::test]
async fn test_address_grammar() {
    let resolver = InMemoryObjectResolver::new();
    let ctx = test_context();
    let validator = Validator::new(&resolver, &ctx);
    let address = NormalizedType::Scalar(ScalarWidth::Address);

    let full = format!("0x{}", "a".repeat(64));
    let short = format!("0x{}", "a".repeat(63));
    let no_prefix = "a".repeat(64);
    let mixed_case = format!("0x{}", "aA".repeat(32));

    assert!(validator.validate(&full.as_str().into(), &address).await);
    assert!(validator.validate(&mixed_case.as_str().into(), &address).await);
    assert!(!validator.validate(&short.as_str().into(), &address).await);
    assert!(!validator.validate(&no_prefix.as_str().into(), &address).await);
}

#[tokio::test]
async fn test_vector_homogeneity() {
    let resolver = InMemoryObjectResolver::new();
    let ctx = test_context();
    let validator = Validator::new(&resolver, &ctx);
    let bytes = NormalizedType::vector(u8_type());

    assert!(!validator.validate(&vec!["1", "2", "x"].into(), &bytes).await);
    assert!(validator.validate(&vec!["1", "2", "3"].into(), &bytes).await);
    assert!(validator.validate(&RawInput::Many(vec![]), &bytes).await);
}

#[tokio::test]
async fn test_struct_identity_is_exact() {
    let expected = coin_of(sui_type());
    let ctx = test_context();

    let matching = InMemoryObjectResolver::new()
        .with_object("O1", "0xabc::coin::Coin<0x2::sui::SUI>");
    assert!(
        Validator::new(&matching, &ctx)
            .validate(&"O1".into(), &expected)
            .await
    );

    let wrong_generic = InMemoryObjectResolver::new()
        .with_object("O1", "0xabc::coin::Coin<0x2::sui::USDC>");
    assert!(
        !Validator::new(&wrong_generic, &ctx)
            .validate(&"O1".into(), &expected)
            .await
    );

    let wrong_case = InMemoryObjectResolver::new()
        .with_object("O1", "0xabc::coin::coin<0x2::sui::SUI>");
    assert!(
        !Validator::new(&wrong_case, &ctx)
            .validate(&"O1".into(), &expected)
            .await
    );
}

#[tokio::test]
async fn test_reference_transparency() {
    let coin = coin_of(sui_type());
    let ctx = test_context();

    for response in [
        "0xabc::coin::Coin<0x2::sui::SUI>",
        "0xabc::coin::Coin<0x2::sui::USDC>",
    ] {
        let resolver = InMemoryObjectResolver::new().with_object("O1", response);
        let validator = Validator::new(&resolver, &ctx);

        let by_value = validator.verdict(&"O1".into(), &coin).await;
        let by_ref = validator
            .verdict(&"O1".into(), &NormalizedType::Reference(Box::new(coin.clone())))
            .await;
        let by_mut_ref = validator
            .verdict(
                &"O1".into(),
                &NormalizedType::MutableReference(Box::new(coin.clone())),
            )
            .await;

        assert_eq!(by_value, by_ref, "response {}", response);
        assert_eq!(by_value, by_mut_ref, "response {}", response);
    }
}

#[tokio::test]
async fn test_resolver_errors_never_validate() {
    let ctx = test_context();
    let errors = [
        ResolveError::NotFound {
            object_id: "O1".into(),
        },
        ResolveError::Transient {
            object_id: "O1".into(),
            message: "connection reset".into(),
        },
        ResolveError::Malformed {
            object_id: "O1".into(),
        },
    ];

    for error in errors {
        let resolver = InMemoryObjectResolver::new()
            .with_object("O1", "0x2::clock::Clock")
            .with_failure("O1", error);
        let validator = Validator::new(&resolver, &ctx);
        assert_eq!(
            validator.verdict(&"O1".into(), &clock_type()).await,
            Verdict::Unknown
        );
    }
}

#[tokio::test]
async fn test_vector_of_objects_checks_each_identity() {
    let resolver = InMemoryObjectResolver::new()
        .with_object("C1", "0xabc::coin::Coin<0x2::sui::SUI>")
        .with_object("C2", "0xabc::coin::Coin<0x2::sui::USDC>");
    let ctx = test_context();
    let validator = Validator::new(&resolver, &ctx);
    let coins = NormalizedType::vector(coin_of(sui_type()));

    assert!(validator.validate(&vec!["C1", "C1"].into(), &coins).await);
    assert!(!validator.validate(&vec!["C1", "C2"].into(), &coins).await);
}

//! Proptest generators for property-based testing.

use proptest::prelude::*;

use scorelive_core::{Category, DeviceCredential, FormBody, ScoreSystem, TournamentType};

use crate::fixtures::credential_with;

/// Generate a device code.
pub fn device_code() -> impl Strategy<Value = String> {
    "[A-Z0-9]{4,12}".prop_map(String::from)
}

/// Generate a non-empty client secret.
pub fn client_secret() -> impl Strategy<Value = String> {
    "[a-f0-9]{16,64}".prop_map(String::from)
}

/// Generate a unit id.
pub fn unit_id() -> impl Strategy<Value = u32> {
    1u32..100_000
}

/// Generate a store domain (a server identity string).
pub fn domain() -> impl Strategy<Value = String> {
    "https://[a-z]{2,10}\\.example/".prop_map(String::from)
}

/// Generate a full credential.
pub fn credential() -> impl Strategy<Value = DeviceCredential> {
    (device_code(), client_secret(), unit_id())
        .prop_map(|(code, secret, unit)| credential_with(&code, &secret, unit))
}

/// Generate form parameter keys the server would accept.
pub fn form_key() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,15}".prop_map(String::from)
}

/// Generate arbitrary printable form values, including characters that
/// need escaping.
pub fn form_value() -> impl Strategy<Value = String> {
    "[ -~]{0,32}".prop_map(String::from)
}

/// Generate a form body with up to `max_pairs` entries.
pub fn form_body(max_pairs: usize) -> impl Strategy<Value = FormBody> {
    prop::collection::vec((form_key(), form_value()), 0..=max_pairs)
        .prop_map(FormBody::from_pairs)
}

/// Generate a category.
pub fn category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::MensSingles),
        Just(Category::WomensSingles),
        Just(Category::MensDoubles),
        Just(Category::WomensDoubles),
        Just(Category::MixedDoubles),
    ]
}

/// Generate a score system.
pub fn score_system() -> impl Strategy<Value = ScoreSystem> {
    prop_oneof![
        Just(ScoreSystem::Standard),
        Just(ScoreSystem::Elitserien),
        Just(ScoreSystem::FiveSet11),
        Just(ScoreSystem::FiveSet11Max15),
    ]
}

/// Generate a tournament type.
pub fn tournament_type() -> impl Strategy<Value = TournamentType> {
    prop_oneof![
        Just(TournamentType::Individual),
        Just(TournamentType::Series),
        Just(TournamentType::MultiSeries),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorelive_core::sign;

    proptest! {
        #[test]
        fn test_sign_deterministic(credential in credential(), body in form_body(6)) {
            let bytes = body.encode();
            let t1 = sign(&credential, &bytes).unwrap();
            let t2 = sign(&credential, &bytes).unwrap();
            prop_assert_eq!(t1.as_str(), t2.as_str());
        }

        #[test]
        fn test_sign_shape(credential in credential(), body in form_body(6)) {
            let token = sign(&credential, &body.encode()).unwrap();
            let token = token.as_str();
            prop_assert!(token.starts_with(&credential.device_code));
            let digest = &token[credential.device_code.len()..];
            prop_assert_eq!(digest.len(), 64);
            prop_assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }

        #[test]
        fn test_nonced_bodies_never_reuse_signatures(
            credential in credential(),
            body in form_body(6),
        ) {
            let b1 = body.clone().with_nonce().encode();
            let b2 = body.with_nonce().encode();
            prop_assert_ne!(
                sign(&credential, &b1).unwrap().as_str().to_string(),
                sign(&credential, &b2).unwrap().as_str().to_string()
            );
        }

        #[test]
        fn test_form_encoding_is_ascii(body in form_body(8)) {
            prop_assert!(body.encode().iter().all(u8::is_ascii));
        }

        #[test]
        fn test_codes_roundtrip(category in category(), system in score_system(), kind in tournament_type()) {
            prop_assert_eq!(Category::parse(category.as_str()).unwrap(), category);
            prop_assert_eq!(ScoreSystem::parse(system.as_str()).unwrap(), system);
            prop_assert_eq!(TournamentType::parse(kind.as_str()).unwrap(), kind);
        }
    }
}

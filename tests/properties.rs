use lilith_creds::buffer::ImmutableBuffer;
use lilith_creds::constants::plugin::MAX_SYNC_METADATA;
use lilith_creds::creds::call::CallCredentials;
use lilith_creds::creds::channel::ChannelCredentials;
use lilith_creds::metadata::{is_legal_key, MetadataArray};
use lilith_creds::plugin::bridge::MetadataStatus;
use lilith_creds::plugin::context::AuthMetadataContext;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn nonempty_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 1..64)
}

proptest! {
    #[test]
    fn hash_key_is_deterministic(
        key in nonempty_bytes(),
        chain in nonempty_bytes()
    ) {
        let a = ChannelCredentials::create_ssl(
            None,
            Some(ImmutableBuffer::from(key.clone())),
            Some(ImmutableBuffer::from(chain.clone())),
        ).unwrap();
        let b = ChannelCredentials::create_ssl(
            None,
            Some(ImmutableBuffer::from(key)),
            Some(ImmutableBuffer::from(chain)),
        ).unwrap();

        prop_assert!(!a.hash_key().is_empty());
        prop_assert_eq!(a.hash_key(), b.hash_key());
    }

    #[test]
    fn hash_key_separates_distinct_material(
        key1 in nonempty_bytes(),
        chain1 in nonempty_bytes(),
        key2 in nonempty_bytes(),
        chain2 in nonempty_bytes()
    ) {
        // The digest runs over the concatenation, so only
        // concatenation-distinct pairs are required to differ.
        let concat1 = [key1.as_slice(), chain1.as_slice()].concat();
        let concat2 = [key2.as_slice(), chain2.as_slice()].concat();
        prop_assume!(concat1 != concat2);

        let a = ChannelCredentials::create_ssl(
            None,
            Some(ImmutableBuffer::from(key1)),
            Some(ImmutableBuffer::from(chain1)),
        ).unwrap();
        let b = ChannelCredentials::create_ssl(
            None,
            Some(ImmutableBuffer::from(key2)),
            Some(ImmutableBuffer::from(chain2)),
        ).unwrap();
        prop_assert_ne!(a.hash_key(), b.hash_key());
    }

    #[test]
    fn half_a_pair_never_produces_an_identity(key in nonempty_bytes()) {
        let a = ChannelCredentials::create_ssl(
            None,
            Some(ImmutableBuffer::from(key.clone())),
            None,
        ).unwrap();
        let b = ChannelCredentials::create_ssl(
            None,
            None,
            Some(ImmutableBuffer::from(key)),
        ).unwrap();
        prop_assert_eq!(a.hash_key(), "");
        prop_assert_eq!(b.hash_key(), "");
    }

    #[test]
    fn key_legality_never_panics(key in "\\PC*") {
        let _ = is_legal_key(&key);
    }

    #[test]
    fn metadata_decoding_is_total(values in proptest::collection::vec(
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-zA-Z0-9 ]{0,16}".prop_map(Value::String),
        ],
        0..6,
    )) {
        // Arbitrary value shapes under legal keys: decoding must reject
        // or accept, never panic.
        let mut map = Map::new();
        for (i, value) in values.into_iter().enumerate() {
            map.insert(format!("key{i}"), value);
        }
        let _ = MetadataArray::from_map(&map);
    }

    #[test]
    fn bridge_never_copies_past_capacity(n in 0usize..12) {
        let cred = CallCredentials::create_from_plugin(Arc::new(
            move |_: &AuthMetadataContext| {
                let mut map = Map::new();
                for i in 0..n {
                    map.insert(format!("key{i}"), json!("value"));
                }
                Ok(Value::Object(map))
            },
        )).unwrap();

        let md = cred.request_metadata("https://svc", "Get").unwrap();
        if n <= MAX_SYNC_METADATA {
            prop_assert_eq!(md.status, MetadataStatus::Ok);
            prop_assert_eq!(md.entries.len(), n);
            for (i, entry) in md.entries.iter().enumerate() {
                let expected_key = format!("key{i}");
                    prop_assert_eq!(entry.key.as_bytes(), expected_key.as_bytes());
            }
        } else {
            prop_assert_eq!(md.status, MetadataStatus::Internal);
            prop_assert_eq!(md.entries.len(), 0);
            prop_assert!(md.error_details.is_some());
        }
    }

    #[test]
    fn buffer_equality_matches_content(a in any::<Vec<u8>>(), b in any::<Vec<u8>>()) {
        let buf_a = ImmutableBuffer::from(a.clone());
        let buf_b = ImmutableBuffer::from(b.clone());
        prop_assert_eq!(buf_a == buf_b, a == b);
        prop_assert_eq!(buf_a.share(), buf_a);
    }
}

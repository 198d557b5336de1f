use std::collections::BTreeMap;

use super::*;

#[test]
fn test_key_type_from_reply() {
    assert_eq!(KeyType::from_reply("string"), KeyType::String);
    assert_eq!(KeyType::from_reply("list"), KeyType::List);
    assert_eq!(KeyType::from_reply("set"), KeyType::Set);
    assert_eq!(KeyType::from_reply("zset"), KeyType::ZSet);
    assert_eq!(KeyType::from_reply("hash"), KeyType::Hash);
    assert_eq!(KeyType::from_reply("none"), KeyType::None);
    assert_eq!(
        KeyType::from_reply("stream"),
        KeyType::Other("stream".to_string())
    );
}

#[test]
fn test_key_type_display_and_exists() {
    assert_eq!(format!("{}", KeyType::ZSet), "zset");
    assert_eq!(format!("{}", KeyType::Other("stream".into())), "stream");
    assert!(KeyType::String.exists());
    assert!(!KeyType::None.exists());
}

#[test]
fn test_value_serializes_untagged() {
    let value = Value::from("bar");
    assert_eq!(serde_json::to_string(&value).unwrap(), r#""bar""#);

    let value = Value::List(vec!["a".into(), "b".into()]);
    assert_eq!(serde_json::to_string(&value).unwrap(), r#"["a","b"]"#);

    let mut fields = BTreeMap::new();
    fields.insert("port".to_string(), "80".to_string());
    fields.insert("host".to_string(), "web01".to_string());
    let value = Value::Hash(fields);
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"host":"web01","port":"80"}"#
    );
}

#[test]
fn test_value_as_str_and_key_type() {
    assert_eq!(Value::from("bar").as_str(), Some("bar"));
    assert_eq!(Value::Set(vec![]).as_str(), None);
    assert_eq!(Value::SortedSet(vec![]).key_type(), KeyType::ZSet);
}

#[test]
fn test_mock_store_reads_by_type() {
    let mut store = MockStore::new();
    store.insert("foo", "bar");

    let kind = store.key_type("foo").expect("type");
    assert_eq!(kind, KeyType::String);

    let value = store.read("foo", &kind).expect("read");
    assert_eq!(value, Some(Value::from("bar")));

    assert_eq!(
        store.calls(),
        vec![
            StoreCall::Type("foo".to_string()),
            StoreCall::Read("foo".to_string(), KeyType::String),
        ]
    );
}

#[test]
fn test_mock_store_missing_key() {
    let mut store = MockStore::new();

    assert_eq!(store.key_type("missing").expect("type"), KeyType::None);
    assert_eq!(store.read("missing", &KeyType::String).expect("read"), None);
}

#[test]
fn test_mock_store_type_override_without_value() {
    let mut store = MockStore::new();
    store.set_type("foo", KeyType::String);

    assert_eq!(store.key_type("foo").expect("type"), KeyType::String);
    assert_eq!(store.read("foo", &KeyType::String).expect("read"), None);
}

#[test]
fn test_mock_store_unsupported_type() {
    let mut store = MockStore::new();
    let kind = KeyType::Other("stream".to_string());

    let err = store.read("events", &kind).unwrap_err();
    assert!(matches!(err, StoreError::UnsupportedType { ref kind, .. } if kind == "stream"));
    assert!(!err.is_connection_error());
}

#[test]
fn test_mock_store_connect_shares_state() {
    let store = MockStore::new();
    store.insert("foo", "bar");

    let mut conn = store
        .connect(&LookupOptions::default())
        .expect("should connect");
    conn.key_type("foo").expect("type");

    assert_eq!(store.connect_count(), 1);
    assert_eq!(store.queried_keys(), vec!["foo".to_string()]);
    assert_eq!(store.call_count(), 2);

    store.clear_calls();
    assert_eq!(store.call_count(), 0);
}

#[test]
fn test_mock_store_connection_failure() {
    let store = MockStore::new();
    store.fail_connections("connection refused");

    let err = store.connect(&LookupOptions::default()).unwrap_err();

    assert!(err.is_connection_error());
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn test_redis_connector_keeps_base_config() {
    let config = crate::config::StoreConfig {
        port: 6390,
        ..Default::default()
    };
    let connector = RedisConnector::new(config.clone());

    assert_eq!(connector.config(), &config);
}

use record_vault::consts::IV_LEN;
use record_vault::core::listing;
use record_vault::{CoreError, Plaintext, StoreState};
use tempfile::tempdir;

mod common;
use common::store;

fn keys_of(store: &record_vault::RecordStore) -> Vec<Plaintext> {
    store.keys().collect::<Result<Vec<_>, _>>().unwrap()
}

#[test]
fn test_set_then_get_is_case_insensitive() {
    common::setup();
    let mut store = store("secret");
    store.set("User", "a").unwrap();

    assert_eq!(store.get("user").unwrap().unwrap(), "a");
    assert_eq!(store.get("USER").unwrap().unwrap(), "a");
    assert_eq!(store.get("User").unwrap().unwrap(), "a");
    assert!(store.get("other").unwrap().is_none());
}

#[test]
fn test_set_replaces_existing_key() {
    let mut store = store("secret");
    store.set("k", "v1").unwrap();
    store.set("K", "v2").unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("k").unwrap().unwrap(), "v2");
    // original casing of the latest set is kept
    assert_eq!(keys_of(&store), vec![Plaintext::from("K")]);
}

#[test]
fn test_set_replaces_in_place_preserving_order() {
    let mut store = store("secret");
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.set("c", "3").unwrap();
    store.set("b", "20").unwrap();

    assert_eq!(
        keys_of(&store),
        vec![Plaintext::from("a"), Plaintext::from("b"), Plaintext::from("c")]
    );
    assert_eq!(store.entry(1).unwrap().unwrap().1, "20");
}

#[test]
fn test_set_purges_later_duplicates_from_add() {
    let mut store = store("secret");
    store.add("k", "1").unwrap();
    store.set("x", "x").unwrap();
    store.add("K", "2").unwrap();
    assert_eq!(store.len(), 3);

    store.set("k", "3").unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("k").unwrap().unwrap(), "3");
    assert_eq!(
        keys_of(&store),
        vec![Plaintext::from("k"), Plaintext::from("x")]
    );
}

#[test]
fn test_add_keeps_duplicates_and_get_returns_first() {
    let mut store = store("secret");
    store.add("tag", "red").unwrap();
    store.add("TAG", "blue").unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.get("tag").unwrap().unwrap(), "red");
    assert_eq!(
        keys_of(&store),
        vec![Plaintext::from("tag"), Plaintext::from("TAG")]
    );
}

#[test]
fn test_set_list_sets_first_and_adds_rest() {
    let mut store = store("secret");
    store.set("color", "old").unwrap();
    store.set_list("color", ["red", "green", "blue"]).unwrap();

    assert_eq!(store.len(), 3);
    let values: Vec<Plaintext> = store.iter().map(|pair| pair.unwrap().1).collect();
    assert_eq!(
        values,
        vec![
            Plaintext::from("red"),
            Plaintext::from("green"),
            Plaintext::from("blue")
        ]
    );

    store.set_list("color", Vec::<&str>::new()).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_delete_removes_all_matches_and_is_idempotent() {
    let mut store = store("secret");
    store.add("k", "1").unwrap();
    store.set("other", "x").unwrap();
    store.add("K", "2").unwrap();

    store.delete("k").unwrap();
    assert_eq!(store.len(), 1);
    assert!(!store.contains("k").unwrap());
    assert!(store.contains("OTHER").unwrap());

    store.delete("k").unwrap();
    store.delete("never-set").unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn test_get_variants() {
    let mut store = store("secret");
    store.set("count", "42").unwrap();
    store.set("name", "zenqi").unwrap();

    assert_eq!(store.get_or("missing", "fallback").unwrap(), "fallback");
    assert_eq!(store.get_or("name", "fallback").unwrap(), "zenqi");

    assert_eq!(store.get_parsed("count", 0u32).unwrap(), 42);
    assert_eq!(store.get_parsed("name", 7u32).unwrap(), 7);
    assert_eq!(store.get_parsed("missing", 9u32).unwrap(), 9);

    assert_eq!(store.require("NAME").unwrap(), "zenqi");
    match store.require("missing") {
        Err(CoreError::KeyNotFound(key)) => assert_eq!(key, "missing"),
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
}

#[test]
fn test_pop_returns_value_and_removes_key() {
    let mut store = store("secret");
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();

    assert_eq!(store.pop("A").unwrap().unwrap(), "1");
    assert!(store.pop("a").unwrap().is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_values_may_be_binary() {
    let mut store = store("secret");
    store.set("blob", [0xdeu8, 0xad, 0xbe, 0xef]).unwrap();
    assert_eq!(
        store.get("blob").unwrap().unwrap(),
        Plaintext::Bytes(vec![0xde, 0xad, 0xbe, 0xef])
    );
}

#[test]
fn test_empty_or_blank_fields_are_rejected() {
    let mut store = store("secret");
    assert!(matches!(store.set("", "v"), Err(CoreError::EmptyField)));
    assert!(matches!(store.set("k", " "), Err(CoreError::EmptyField)));
    assert!(matches!(store.add("k", ""), Err(CoreError::EmptyField)));
    assert!(store.is_empty());
}

#[test]
fn test_keys_is_restartable() {
    let mut store = store("secret");
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();

    assert_eq!(store.keys().count(), 2);
    assert_eq!(keys_of(&store), keys_of(&store));
}

#[test]
fn test_fields_are_individually_encrypted() {
    let mut store = store("secret");
    store.set("same", "same").unwrap();
    store.add("SAME", "same").unwrap();

    let records = store.records();
    assert_ne!(records[0].key(), records[0].value());
    assert_ne!(records[0].value(), records[1].value());
    assert!(!records[0].key().windows(4).any(|w| w == b"same"));
}

#[test]
fn test_blob_layer_uses_its_own_iv() {
    let mut store = store("secret");
    store.set("a", "1").unwrap();
    let blob = store.to_blob().unwrap();

    let record = &store.records()[0];
    assert_ne!(blob[..IV_LEN], record.key()[..IV_LEN]);
    assert_ne!(blob[..IV_LEN], record.value()[..IV_LEN]);
    assert_eq!(
        store.cipher().decrypt(&blob).unwrap(),
        listing::render(store.records()).as_str()
    );
}

#[test]
fn test_load_empty_blob_is_empty_store() {
    let mut store = store("secret");
    store.set("a", "1").unwrap();
    store.load(&[]).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.state(), StoreState::Empty);
}

#[test]
fn test_save_then_load_roundtrip() {
    common::setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.sd");

    let mut original = store("secret");
    original.set("a", "1").unwrap();
    original.set("b", "2").unwrap();
    original.save(&path, None).unwrap();

    let blob = std::fs::read(&path).unwrap();
    let mut reopened = store("secret");
    reopened.load(&blob).unwrap();

    assert_eq!(reopened.get("a").unwrap().unwrap(), "1");
    assert_eq!(reopened.get("b").unwrap().unwrap(), "2");
    // reload keeps inner ciphertext byte-for-byte
    assert_eq!(reopened.records(), original.records());
}

#[test]
fn test_save_writes_explicit_data_verbatim() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("raw.sd");

    let mut source = store("secret");
    source.set("k", "v").unwrap();
    let blob = source.to_blob().unwrap();

    let mut other = store("secret");
    other.save(&path, Some(&blob)).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), blob);
}

#[test]
fn test_load_with_wrong_password_fails() {
    let mut store_a = store("secret");
    store_a.set("username", "zenqi").unwrap();
    let blob = store_a.to_blob().unwrap();

    let mut wrong = store("wrong");
    assert!(matches!(wrong.load(&blob), Err(CoreError::Password(_))));
}

#[test]
fn test_load_rejects_non_listing_plaintext() {
    let source = store("secret");
    let blob = source.cipher().encrypt(b"{'not': 'a listing'}").unwrap();

    let mut store = store("secret");
    match store.load(&blob) {
        Err(CoreError::Password(reason)) => assert!(reason.contains("malformed")),
        other => panic!("expected Password error, got {other:?}"),
    }
}

#[test]
fn test_load_rejects_binary_plaintext() {
    let source = store("secret");
    let blob = source.cipher().encrypt(&[0xff, 0xfe, 0xfd]).unwrap();

    let mut store = store("secret");
    assert!(matches!(store.load(&blob), Err(CoreError::Password(_))));
}

#[test]
fn test_state_transitions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.sd");

    let mut store = store("secret");
    assert_eq!(store.state(), StoreState::Empty);

    store.set("a", "1").unwrap();
    assert_eq!(store.state(), StoreState::Populated);

    store.save(&path, None).unwrap();
    assert_eq!(store.state(), StoreState::Persisted);

    store.set("b", "2").unwrap();
    assert_eq!(store.state(), StoreState::Populated);

    let blob = std::fs::read(&path).unwrap();
    store.load(&blob).unwrap();
    assert_eq!(store.state(), StoreState::Populated);
    assert_eq!(store.len(), 1);

    store.clear();
    assert_eq!(store.state(), StoreState::Empty);
}

#[test]
fn test_summary_masks_password() {
    let mut store = store("secret");
    store.set("username", "zenqi").unwrap();
    store.set("email", "z@example.com").unwrap();

    assert_eq!(
        store.summary().unwrap(),
        "RecordStore(password=****et, length=2, keys=['username', 'email'])"
    );
    assert!(!format!("{store:?}").contains("secret"));
}

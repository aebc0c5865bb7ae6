// tests/unit_bfadd_test.rs

use bytes::Bytes;
use scalable_bloom::commands::BloomCommand;
use scalable_bloom::config::Config;
use scalable_bloom::error::BloomError;
use scalable_bloom::reply::Reply;
use scalable_bloom::store::Store;

fn args(items: &[&str]) -> Vec<Bytes> {
    items.iter().map(|s| Bytes::from(s.to_string())).collect()
}

#[tokio::test]
async fn bfadd_creates_filter_and_returns_added_count() {
    let store = Store::new(Config::default());
    let cmd = BloomCommand::parse("BFADD", &args(&["k", "ERROR", "0.01", "ELEMENTS", "a", "b", "c"]))
        .unwrap();
    let (reply, outcome) = cmd.execute(&store).await.unwrap();
    assert_eq!(reply, Reply::Integer(3));
    assert_eq!(
        outcome,
        scalable_bloom::commands::command_trait::WriteOutcome::Write { keys_modified: 1 }
    );

    let exists = BloomCommand::parse("BFEXIST", &args(&["k", "a"])).unwrap();
    let (reply, _) = exists.execute(&store).await.unwrap();
    assert_eq!(reply, Reply::Integer(1));
}

#[tokio::test]
async fn bfadd_with_differing_error_on_existing_key_is_rejected() {
    let store = Store::new(Config::default());
    let first = BloomCommand::parse("BFADD", &args(&["k", "ERROR", "0.01", "ELEMENTS", "a"])).unwrap();
    first.execute(&store).await.unwrap();

    let second =
        BloomCommand::parse("BFADD", &args(&["k", "ERROR", "0.02", "ELEMENTS", "b"])).unwrap();
    let err = second.execute(&store).await.unwrap_err();
    assert_eq!(err, BloomError::FrozenEpsilon);

    let count = BloomCommand::parse("BFCOUNT", &args(&["k"])).unwrap();
    let (reply, _) = count.execute(&store).await.unwrap();
    assert_eq!(reply, Reply::Integer(1));
}

#[tokio::test]
async fn bfadd_repeated_identical_element_sets_no_new_bits() {
    let store = Store::new(Config::default());
    let first = BloomCommand::parse("BFADD", &args(&["k", "ELEMENTS", "x"])).unwrap();
    let (reply, _) = first.execute(&store).await.unwrap();
    assert_eq!(reply, Reply::Integer(1));

    let second = BloomCommand::parse("BFADD", &args(&["k", "ELEMENTS", "x"])).unwrap();
    let (reply, outcome) = second.execute(&store).await.unwrap();
    assert_eq!(reply, Reply::Integer(0));
    assert_eq!(
        outcome,
        scalable_bloom::commands::command_trait::WriteOutcome::DidNotWrite
    );
}

#[tokio::test]
async fn bfadd_rejects_missing_elements_clause() {
    let err = BloomCommand::parse("BFADD", &args(&["k"])).unwrap_err();
    assert_eq!(err, BloomError::WrongArgumentCount("BFADD".to_string()));
}

#[tokio::test]
async fn bfadd_rejects_unknown_option() {
    let err = BloomCommand::parse("BFADD", &args(&["k", "BOGUS", "ELEMENTS", "a"])).unwrap_err();
    assert_eq!(err, BloomError::InvalidOption("BOGUS".to_string()));
}

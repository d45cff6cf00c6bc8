//! Assertion helpers with descriptive failure messages.

use std::fmt::Debug;

use fungible_admin_core::{ErrorKind, FungibleError, MemoryStore};

/// Assert that `result` failed with an error of `kind` and return the error.
pub fn assert_kind<T: Debug>(result: Result<T, FungibleError>, kind: ErrorKind) -> FungibleError {
    match result {
        Ok(v) => panic!("expected {:?} error, got Ok({:?})", kind, v),
        Err(e) => {
            assert_eq!(e.kind(), kind, "wrong error kind: {}", e);
            e
        }
    }
}

/// Assert that an error message contains expected text (case-insensitive).
pub fn assert_error_contains<E: std::fmt::Display>(error: E, expected_text: &str, context: &str) {
    let error_str = error.to_string().to_lowercase();
    assert!(
        error_str.contains(&expected_text.to_lowercase()),
        "{}: error message should contain '{}', got: {}",
        context,
        expected_text,
        error
    );
}

/// Assert that `store` still has the digest captured in `before`.
pub fn assert_state_unchanged(store: &MemoryStore, before: [u8; 32], context: &str) {
    assert_eq!(
        store.state_digest(),
        before,
        "{}: ledger state should be unchanged",
        context
    );
}

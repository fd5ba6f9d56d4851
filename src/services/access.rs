//! Ownership and access-control policy
//!
//! Pure decision functions invoked as a guard before handler bodies touch
//! the store. Three outcomes are possible:
//!
//! - `Proceed`: the actor may perform the operation.
//! - `NotFound`: the resource is hidden from this actor. A non-owner is
//!   never told the resource exists, so authorization failures surface as
//!   a 404, not a 403.
//! - `RedirectToLogin`: an anonymous actor attempted an operation that
//!   requires an identity; the caller redirects to the login page with a
//!   `next` parameter pointing back at the original target.
//!
//! Notes are private in every respect, including reads and list
//! membership. Comments are publicly readable; only mutation is gated on
//! authorship.

use serde::{Deserialize, Serialize};

/// Operation requested against a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Read,
    List,
    Edit,
    Delete,
}

impl Operation {
    /// Whether the operation changes stored state
    pub fn is_mutation(&self) -> bool {
        matches!(self, Operation::Edit | Operation::Delete)
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The actor may perform the operation
    Proceed,
    /// The resource is hidden from this actor
    NotFound,
    /// The actor must authenticate first
    RedirectToLogin,
}

/// Access check for a note.
///
/// Every operation on a note is owner-only. Anonymous actors are sent to
/// the login page; authenticated non-owners get a not-found outcome.
pub fn note_access(actor: Option<i64>, owner_id: i64, _operation: Operation) -> AccessDecision {
    match actor {
        None => AccessDecision::RedirectToLogin,
        Some(id) if id == owner_id => AccessDecision::Proceed,
        Some(_) => AccessDecision::NotFound,
    }
}

/// Access check for a comment.
///
/// Reads are public; edit and delete require authorship. Anonymous actors
/// attempting a mutation are sent to the login page.
pub fn comment_access(actor: Option<i64>, author_id: i64, operation: Operation) -> AccessDecision {
    if !operation.is_mutation() {
        return AccessDecision::Proceed;
    }
    match actor {
        None => AccessDecision::RedirectToLogin,
        Some(id) if id == author_id => AccessDecision::Proceed,
        Some(_) => AccessDecision::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: i64 = 1;
    const STRANGER: i64 = 2;

    #[test]
    fn test_note_owner_has_full_access() {
        for op in [Operation::Read, Operation::List, Operation::Edit, Operation::Delete] {
            assert_eq!(note_access(Some(OWNER), OWNER, op), AccessDecision::Proceed);
        }
    }

    #[test]
    fn test_note_hidden_from_non_owner() {
        for op in [Operation::Read, Operation::List, Operation::Edit, Operation::Delete] {
            assert_eq!(note_access(Some(STRANGER), OWNER, op), AccessDecision::NotFound);
        }
    }

    #[test]
    fn test_note_anonymous_redirects() {
        for op in [Operation::Read, Operation::List, Operation::Edit, Operation::Delete] {
            assert_eq!(note_access(None, OWNER, op), AccessDecision::RedirectToLogin);
        }
    }

    #[test]
    fn test_comment_read_is_public() {
        assert_eq!(comment_access(None, OWNER, Operation::Read), AccessDecision::Proceed);
        assert_eq!(
            comment_access(Some(STRANGER), OWNER, Operation::Read),
            AccessDecision::Proceed
        );
    }

    #[test]
    fn test_comment_mutation_is_author_only() {
        for op in [Operation::Edit, Operation::Delete] {
            assert_eq!(comment_access(Some(OWNER), OWNER, op), AccessDecision::Proceed);
            assert_eq!(comment_access(Some(STRANGER), OWNER, op), AccessDecision::NotFound);
            assert_eq!(comment_access(None, OWNER, op), AccessDecision::RedirectToLogin);
        }
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn operation_strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            Just(Operation::Read),
            Just(Operation::List),
            Just(Operation::Edit),
            Just(Operation::Delete),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// A non-owner is never allowed to touch a note, and never sees a
        /// forbidden-style acknowledgement that it exists.
        #[test]
        fn non_owner_never_proceeds_on_notes(
            actor in 1i64..1000,
            owner in 1i64..1000,
            op in operation_strategy(),
        ) {
            let decision = note_access(Some(actor), owner, op);
            if actor == owner {
                prop_assert_eq!(decision, AccessDecision::Proceed);
            } else {
                prop_assert_eq!(decision, AccessDecision::NotFound);
            }
        }

        /// Anonymous actors are always redirected, never told "not found",
        /// for operations that require an identity.
        #[test]
        fn anonymous_is_redirected_not_hidden(
            owner in 1i64..1000,
            op in operation_strategy(),
        ) {
            prop_assert_eq!(note_access(None, owner, op), AccessDecision::RedirectToLogin);
            if op.is_mutation() {
                prop_assert_eq!(comment_access(None, owner, op), AccessDecision::RedirectToLogin);
            } else {
                prop_assert_eq!(comment_access(None, owner, op), AccessDecision::Proceed);
            }
        }

        /// Comment authorship gates exactly the mutating operations.
        #[test]
        fn comment_reads_never_blocked(
            actor in proptest::option::of(1i64..1000),
            author in 1i64..1000,
        ) {
            prop_assert_eq!(comment_access(actor, author, Operation::Read), AccessDecision::Proceed);
            prop_assert_eq!(comment_access(actor, author, Operation::List), AccessDecision::Proceed);
        }
    }
}

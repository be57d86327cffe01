//! Authorization signatures
//!
//! This module implements the permission signature engine:
//! - grant signatures: one compact string per concrete access capability a
//!   principal holds, derived from their role assignments
//! - filter signatures: the cartesian product of a search request's filter
//!   criteria
//!
//! A downstream query layer joins both sets against the precomputed per-task
//! signature column; nothing here touches storage. Both builders are pure
//! functions over immutable snapshots and never fail: absent attributes,
//! unmapped classifications and empty filter lists all degrade to the
//! wildcard token.

mod filter_signatures;
mod provider;
mod role_signatures;

pub use filter_signatures::build_filter_signatures;
pub use provider::{InMemoryRoleAssignmentProvider, RoleAssignmentProvider};
pub use role_signatures::build_role_signatures;

use crate::models::search::RequestContext;

/// Token meaning "unconstrained" in a signature field.
pub const WILDCARD: &str = "*";

/// Single-character access mode encoded into grant signatures:
/// manage / available-tasks / read.
pub fn permission_token(context: Option<RequestContext>) -> char {
    match context {
        Some(RequestContext::AllWork) => 'm',
        Some(RequestContext::AvailableTasks) => 'a',
        None => 'r',
    }
}

fn abbreviation_or_wildcard(abbreviation: Option<char>) -> String {
    match abbreviation {
        Some(code) => code.to_string(),
        None => WILDCARD.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_token_covers_all_contexts() {
        assert_eq!(permission_token(Some(RequestContext::AllWork)), 'm');
        assert_eq!(permission_token(Some(RequestContext::AvailableTasks)), 'a');
        assert_eq!(permission_token(None), 'r');
    }

    #[test]
    fn missing_abbreviation_renders_as_wildcard() {
        assert_eq!(abbreviation_or_wildcard(Some('U')), "U");
        assert_eq!(abbreviation_or_wildcard(None), WILDCARD);
    }
}

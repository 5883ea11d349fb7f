//! Role dominance relation.
//!
//! A closed table mapping each role to the set of roles it subsumes. The
//! relation is a strict partial order, not a total one: `Custom` and
//! `Marketing` are siblings above `Enterprise`, and neither dominates the
//! other. New roles default to "not included" until added here explicitly.

use crate::role::Role;

/// Returns the roles subsumed by `role`, excluding `role` itself.
///
/// The table is static configuration: defined once, never mutated at
/// runtime.
#[must_use]
pub const fn subordinates(role: Role) -> &'static [Role] {
    match role {
        Role::Free => &[],
        Role::Essential => &[Role::Free],
        Role::Pro => &[Role::Essential, Role::Free],
        Role::Enterprise => &[Role::Pro, Role::Essential, Role::Free],
        Role::Custom | Role::Marketing => {
            &[Role::Enterprise, Role::Pro, Role::Essential, Role::Free]
        }
        Role::Admin => &[
            Role::Custom,
            Role::Marketing,
            Role::Enterprise,
            Role::Pro,
            Role::Essential,
            Role::Free,
        ],
        Role::GodMode => &[
            Role::Admin,
            Role::Custom,
            Role::Marketing,
            Role::Enterprise,
            Role::Pro,
            Role::Essential,
            Role::Free,
        ],
    }
}

/// Whether `actor` implicitly includes `subject`.
///
/// True iff `subject` is in `actor`'s closure, or the two are equal
/// (reflexive).
///
/// # Examples
///
/// ```
/// use av_access::{includes, Role};
///
/// assert!(includes(Role::Admin, Role::Free));
/// assert!(!includes(Role::Free, Role::Admin));
/// assert!(includes(Role::Pro, Role::Pro));
/// ```
#[must_use]
pub fn includes(actor: Role, subject: Role) -> bool {
    actor == subject || subordinates(actor).contains(&subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexive() {
        for role in Role::all() {
            assert!(includes(*role, *role), "{role} should include itself");
        }
    }

    #[test]
    fn test_god_mode_includes_every_role() {
        for role in Role::all() {
            assert!(includes(Role::GodMode, *role));
        }
    }

    #[test]
    fn test_not_symmetric() {
        assert!(includes(Role::Admin, Role::Free));
        assert!(!includes(Role::Free, Role::Admin));
    }

    #[test]
    fn test_free_is_minimum() {
        for role in Role::all() {
            assert!(includes(*role, Role::Free));
        }
        for role in Role::all() {
            if *role != Role::Free {
                assert!(!includes(Role::Free, *role));
            }
        }
    }

    #[test]
    fn test_enterprise_closure_exact() {
        let closure = subordinates(Role::Enterprise);
        assert_eq!(closure, &[Role::Pro, Role::Essential, Role::Free]);
        assert!(!includes(Role::Enterprise, Role::Custom));
        assert!(!includes(Role::Enterprise, Role::Marketing));
    }

    #[test]
    fn test_custom_and_marketing_are_siblings() {
        // Both sit above Enterprise, neither dominates the other.
        assert!(includes(Role::Custom, Role::Enterprise));
        assert!(includes(Role::Marketing, Role::Enterprise));
        assert!(!includes(Role::Custom, Role::Marketing));
        assert!(!includes(Role::Marketing, Role::Custom));
    }

    #[test]
    fn test_no_role_lists_itself() {
        for role in Role::all() {
            assert!(
                !subordinates(*role).contains(role),
                "{role} must not appear in its own closure"
            );
        }
    }

    #[test]
    fn test_acyclic() {
        // If a dominates b (a != b), b must not dominate a.
        for a in Role::all() {
            for b in Role::all() {
                if a != b && includes(*a, *b) {
                    assert!(!includes(*b, *a), "cycle between {a} and {b}");
                }
            }
        }
    }

    #[test]
    fn test_closures_are_transitively_closed() {
        // Everything a subordinate dominates is also in the table directly.
        for role in Role::all() {
            for sub in subordinates(*role) {
                for nested in subordinates(*sub) {
                    assert!(
                        includes(*role, *nested),
                        "{role} closure missing {nested} (via {sub})"
                    );
                }
            }
        }
    }
}

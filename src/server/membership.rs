//! Transition table shared by community and alliance memberships.
//!
//! A membership is identified by its owner (community or alliance) and the joining party.
//! [`transition`] is pure: it decides the next status and how the owner's approved-member
//! counter moves, and the services apply that decision inside a transaction with a
//! conditional update on the current status.

use entity::sea_orm_active_enums::MembershipStatus;

use crate::server::error::membership::MembershipError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    /// Ask to join; approved immediately when the owner does not require approval
    Request { requires_approval: bool },
    Approve,
    Reject,
    Remove,
    Ban,
    Leave,
}

impl MembershipAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Request { .. } => "request",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Remove => "remove",
            Self::Ban => "ban",
            Self::Leave => "leave",
        }
    }
}

/// Outcome of applying an action to a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Write `status`, creating the row if it does not exist
    Set {
        status: MembershipStatus,
        count_delta: i32,
    },
    /// Delete the row
    Delete { count_delta: i32 },
    /// Nothing to write; the membership already has this status
    Unchanged(MembershipStatus),
}

pub fn transition(
    current: Option<MembershipStatus>,
    action: MembershipAction,
) -> Result<Transition, MembershipError> {
    use MembershipAction as A;
    use MembershipStatus as S;

    match (current, action) {
        (None | Some(S::Rejected), A::Request { requires_approval }) => {
            if requires_approval {
                Ok(Transition::Set {
                    status: S::Pending,
                    count_delta: 0,
                })
            } else {
                Ok(Transition::Set {
                    status: S::Approved,
                    count_delta: 1,
                })
            }
        }
        (Some(status @ (S::Pending | S::Approved)), A::Request { .. }) => {
            Ok(Transition::Unchanged(status))
        }
        (Some(S::Banned), A::Request { .. }) => Err(MembershipError::Banned),
        (None, _) => Err(MembershipError::NotFound),

        (Some(S::Pending), A::Approve) => Ok(Transition::Set {
            status: S::Approved,
            count_delta: 1,
        }),
        (Some(S::Pending), A::Reject) => Ok(Transition::Set {
            status: S::Rejected,
            count_delta: 0,
        }),
        (Some(S::Approved), A::Remove) => Ok(Transition::Delete { count_delta: -1 }),
        (Some(S::Pending | S::Rejected), A::Ban) => Ok(Transition::Set {
            status: S::Banned,
            count_delta: 0,
        }),
        (Some(S::Approved), A::Ban) => Ok(Transition::Set {
            status: S::Banned,
            count_delta: -1,
        }),
        (Some(S::Pending), A::Leave) => Ok(Transition::Delete { count_delta: 0 }),
        (Some(S::Approved), A::Leave) => Ok(Transition::Delete { count_delta: -1 }),

        (Some(from), action) => Err(MembershipError::InvalidTransition {
            from,
            action: action.name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::MembershipStatus;

    use super::{transition, MembershipAction, Transition};
    use crate::server::error::membership::MembershipError;

    mod request {
        use super::*;

        /// Expect a new request to wait for approval when the community requires it
        #[test]
        fn creates_pending_when_approval_required() {
            let result = transition(
                None,
                MembershipAction::Request {
                    requires_approval: true,
                },
            );

            assert_eq!(
                result,
                Ok(Transition::Set {
                    status: MembershipStatus::Pending,
                    count_delta: 0
                })
            );
        }

        /// Expect a new request to be approved and counted when no approval is required
        #[test]
        fn approves_immediately_when_open() {
            let result = transition(
                None,
                MembershipAction::Request {
                    requires_approval: false,
                },
            );

            assert_eq!(
                result,
                Ok(Transition::Set {
                    status: MembershipStatus::Approved,
                    count_delta: 1
                })
            );
        }

        /// Expect a rejected user to be able to ask again
        #[test]
        fn allows_rejected_to_request_again() {
            let result = transition(
                Some(MembershipStatus::Rejected),
                MembershipAction::Request {
                    requires_approval: true,
                },
            );

            assert_eq!(
                result,
                Ok(Transition::Set {
                    status: MembershipStatus::Pending,
                    count_delta: 0
                })
            );
        }

        /// Expect an existing pending or approved membership to be returned unchanged
        #[test]
        fn keeps_existing_pending_or_approved() {
            for status in [MembershipStatus::Pending, MembershipStatus::Approved] {
                let result = transition(
                    Some(status),
                    MembershipAction::Request {
                        requires_approval: false,
                    },
                );

                assert_eq!(result, Ok(Transition::Unchanged(status)));
            }
        }

        /// Expect banned users to be refused
        #[test]
        fn refuses_banned() {
            let result = transition(
                Some(MembershipStatus::Banned),
                MembershipAction::Request {
                    requires_approval: false,
                },
            );

            assert_eq!(result, Err(MembershipError::Banned));
        }
    }

    mod moderation {
        use super::*;

        /// Expect approval of a pending membership to count exactly one member
        #[test]
        fn approves_pending() {
            let result = transition(Some(MembershipStatus::Pending), MembershipAction::Approve);

            assert_eq!(
                result,
                Ok(Transition::Set {
                    status: MembershipStatus::Approved,
                    count_delta: 1
                })
            );
        }

        /// Expect approving anything but a pending membership to fail
        #[test]
        fn refuses_to_approve_non_pending() {
            for status in [
                MembershipStatus::Approved,
                MembershipStatus::Rejected,
                MembershipStatus::Banned,
            ] {
                let result = transition(Some(status), MembershipAction::Approve);

                assert_eq!(
                    result,
                    Err(MembershipError::InvalidTransition {
                        from: status,
                        action: "approve"
                    })
                );
            }
        }

        /// Expect rejection to leave the member count alone
        #[test]
        fn rejects_pending_without_count_change() {
            let result = transition(Some(MembershipStatus::Pending), MembershipAction::Reject);

            assert_eq!(
                result,
                Ok(Transition::Set {
                    status: MembershipStatus::Rejected,
                    count_delta: 0
                })
            );
        }

        /// Expect removal of an approved member to delete the row and decrement
        #[test]
        fn removes_approved() {
            let result = transition(Some(MembershipStatus::Approved), MembershipAction::Remove);

            assert_eq!(result, Ok(Transition::Delete { count_delta: -1 }));
        }

        /// Expect a ban to decrement only when the member was approved
        #[test]
        fn bans_with_count_only_for_approved() {
            let approved = transition(Some(MembershipStatus::Approved), MembershipAction::Ban);
            let pending = transition(Some(MembershipStatus::Pending), MembershipAction::Ban);

            assert_eq!(
                approved,
                Ok(Transition::Set {
                    status: MembershipStatus::Banned,
                    count_delta: -1
                })
            );
            assert_eq!(
                pending,
                Ok(Transition::Set {
                    status: MembershipStatus::Banned,
                    count_delta: 0
                })
            );
        }

        /// Expect actions on a missing membership to report NotFound
        #[test]
        fn fails_for_missing_membership() {
            for action in [
                MembershipAction::Approve,
                MembershipAction::Reject,
                MembershipAction::Remove,
                MembershipAction::Ban,
                MembershipAction::Leave,
            ] {
                assert_eq!(transition(None, action), Err(MembershipError::NotFound));
            }
        }
    }

    mod leave {
        use super::*;

        /// Expect leaving to decrement only for approved members
        #[test]
        fn deletes_pending_or_approved() {
            assert_eq!(
                transition(Some(MembershipStatus::Pending), MembershipAction::Leave),
                Ok(Transition::Delete { count_delta: 0 })
            );
            assert_eq!(
                transition(Some(MembershipStatus::Approved), MembershipAction::Leave),
                Ok(Transition::Delete { count_delta: -1 })
            );
        }

        /// Expect banned members to be unable to clear their ban by leaving
        #[test]
        fn refuses_banned() {
            let result = transition(Some(MembershipStatus::Banned), MembershipAction::Leave);

            assert!(matches!(
                result,
                Err(MembershipError::InvalidTransition { .. })
            ));
        }
    }
}

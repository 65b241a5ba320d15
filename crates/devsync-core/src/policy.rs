// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authorization policy: pure predicates over a resolved [`Role`].
//!
//! Privilege tiers are strictly nested:
//! `is_owner => is_adminish => can_write => can_read`.

use crate::error::DevsyncError;
use crate::role::{Access, Role};
use crate::types::{MemberRole, Project};

/// View the project, its tasks, messages and members.
pub fn can_read(role: Role) -> bool {
    matches!(
        role,
        Role::Owner
            | Role::Stored(MemberRole::Admin)
            | Role::Stored(MemberRole::Member)
            | Role::Stored(MemberRole::Viewer)
    )
}

/// Mutate tasks and send messages.
pub fn can_write(role: Role) -> bool {
    matches!(
        role,
        Role::Owner | Role::Stored(MemberRole::Admin) | Role::Stored(MemberRole::Member)
    )
}

/// Create and delete tasks, manage membership.
pub fn is_adminish(role: Role) -> bool {
    matches!(role, Role::Owner | Role::Stored(MemberRole::Admin))
}

/// Delete the project.
pub fn is_owner(role: Role) -> bool {
    role == Role::Owner
}

/// Capability tiers checked at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Read,
    Write,
    Manage,
    Own,
}

impl Capability {
    /// Whether `role` grants this capability.
    pub fn allows(self, role: Role) -> bool {
        match self {
            Capability::Read => can_read(role),
            Capability::Write => can_write(role),
            Capability::Manage => is_adminish(role),
            Capability::Own => is_owner(role),
        }
    }

    fn denial(self) -> &'static str {
        match self {
            Capability::Read => "not a participant of this project",
            Capability::Write => "read-only access to this project",
            Capability::Manage => "requires owner or admin role",
            Capability::Own => "only the project owner can do this",
        }
    }
}

impl Access {
    /// Fail with `Forbidden` unless the caller's role grants `capability`.
    pub fn require(&self, capability: Capability) -> Result<(), DevsyncError> {
        if capability.allows(self.role) {
            Ok(())
        } else {
            tracing::debug!(
                project_id = %self.project.id,
                role = %self.role,
                ?capability,
                "authorization denied"
            );
            Err(DevsyncError::forbidden(capability.denial()))
        }
    }
}

/// Reject any membership mutation aimed at the project owner, whoever asks.
pub fn guard_owner_target(project: &Project, target_user_id: &str) -> Result<(), DevsyncError> {
    if project.owner_id == target_user_id {
        return Err(DevsyncError::forbidden(
            "the project owner's membership cannot be changed",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [Role; 5] = [
        Role::Owner,
        Role::Stored(MemberRole::Admin),
        Role::Stored(MemberRole::Member),
        Role::Stored(MemberRole::Viewer),
        Role::NoAccess,
    ];

    fn any_role() -> impl Strategy<Value = Role> {
        prop::sample::select(ALL.to_vec())
    }

    proptest! {
        #[test]
        fn privileges_are_nested(role in any_role()) {
            prop_assert!(!can_write(role) || can_read(role));
            prop_assert!(!is_adminish(role) || can_write(role));
            prop_assert!(!is_owner(role) || is_adminish(role));
        }
    }

    #[test]
    fn truth_table() {
        let table = [
            (Role::Owner, true, true, true, true),
            (Role::Stored(MemberRole::Admin), true, true, true, false),
            (Role::Stored(MemberRole::Member), true, true, false, false),
            (Role::Stored(MemberRole::Viewer), true, false, false, false),
            (Role::NoAccess, false, false, false, false),
        ];
        for (role, read, write, admin, owner) in table {
            assert_eq!(can_read(role), read, "{role} read");
            assert_eq!(can_write(role), write, "{role} write");
            assert_eq!(is_adminish(role), admin, "{role} admin");
            assert_eq!(is_owner(role), owner, "{role} owner");
        }
    }

    fn project(owner: &str) -> Project {
        Project {
            id: "p1".into(),
            name: "Sprint".into(),
            description: None,
            owner_id: owner.into(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn require_reports_forbidden() {
        let access = Access {
            project: project("a"),
            role: Role::Stored(MemberRole::Viewer),
        };
        assert!(access.require(Capability::Read).is_ok());
        let err = access.require(Capability::Write).unwrap_err();
        assert!(matches!(err, DevsyncError::Forbidden(_)));
    }

    #[test]
    fn owner_target_is_always_rejected() {
        let p = project("owner-1");
        assert!(guard_owner_target(&p, "owner-1").is_err());
        assert!(guard_owner_target(&p, "someone-else").is_ok());
    }
}

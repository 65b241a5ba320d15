// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Membership operations: listing, invite, role change and removal.
//!
//! The owner is surfaced separately from the membership list and can never be
//! the target of invite, role change or removal.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DevsyncError;
use crate::ops::accounts::normalize_email;
use crate::policy::{guard_owner_target, Capability};
use crate::role::Access;
use crate::traits::{MembershipStore, UserStore};
use crate::types::{MemberRole, Membership, User};

/// Members of a project with the owner kept apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListing {
    pub owner: User,
    /// Ordered by user name. Never contains the owner.
    pub members: Vec<Membership>,
}

/// List the members of the project. Requires read access.
pub async fn list_members<S>(store: &S, access: &Access) -> Result<MemberListing, DevsyncError>
where
    S: UserStore + MembershipStore + ?Sized,
{
    access.require(Capability::Read)?;
    let project = &access.project;
    let owner = store
        .get_user(&project.owner_id)
        .await?
        .ok_or_else(|| DevsyncError::Internal(format!("owner of project {} missing", project.id)))?;
    let members = store
        .list_members(&project.id)
        .await?
        .into_iter()
        .filter(|m| m.user_id != project.owner_id)
        .collect();
    Ok(MemberListing { owner, members })
}

/// Invite a registered user by email, or update the role of an existing member.
///
/// Idempotent: inviting the same email again leaves exactly one row carrying
/// the latest role. Requires owner or admin role.
pub async fn invite_member<S>(
    store: &S,
    access: &Access,
    email: &str,
    role: Option<MemberRole>,
) -> Result<Membership, DevsyncError>
where
    S: UserStore + MembershipStore + ?Sized,
{
    access.require(Capability::Manage)?;
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(DevsyncError::validation("email", "is required"));
    }
    let invitee = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| DevsyncError::not_found("user with that email"))?;
    guard_owner_target(&access.project, &invitee.user.id)?;

    let role = role.unwrap_or_default();
    let membership = store
        .upsert_member(&access.project.id, &invitee.user.id, role)
        .await?;
    info!(
        project_id = %access.project.id,
        user_id = %invitee.user.id,
        %role,
        "member invited"
    );
    Ok(membership)
}

/// Change the role of an existing member. Requires owner or admin role.
pub async fn change_role<S>(
    store: &S,
    access: &Access,
    user_id: &str,
    role: MemberRole,
) -> Result<Membership, DevsyncError>
where
    S: MembershipStore + ?Sized,
{
    access.require(Capability::Manage)?;
    guard_owner_target(&access.project, user_id)?;
    let membership = store
        .update_member_role(&access.project.id, user_id, role)
        .await?
        .ok_or_else(|| DevsyncError::not_found("membership"))?;
    info!(project_id = %access.project.id, %user_id, %role, "member role changed");
    Ok(membership)
}

/// Remove a member from the project. Requires owner or admin role.
pub async fn remove_member<S>(store: &S, access: &Access, user_id: &str) -> Result<(), DevsyncError>
where
    S: MembershipStore + ?Sized,
{
    access.require(Capability::Manage)?;
    guard_owner_target(&access.project, user_id)?;
    if !store.remove_member(&access.project.id, user_id).await? {
        return Err(DevsyncError::not_found("membership"));
    }
    info!(project_id = %access.project.id, %user_id, "member removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::{resolve_access, Role};
    use crate::testing::MemoryStore;

    struct Fixture {
        store: MemoryStore,
        owner: User,
        bob: User,
        project_id: String,
    }

    fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let owner = store.add_user("alice@example.com", "Alice");
        let bob = store.add_user("bob@example.com", "Bob");
        let project = store.add_project(&owner.id, "Sprint");
        Fixture {
            store,
            owner,
            bob,
            project_id: project.id,
        }
    }

    async fn access_for(f: &Fixture, user: &User) -> Access {
        resolve_access(&f.store, &user.id, &f.project_id).await.unwrap()
    }

    #[tokio::test]
    async fn invite_is_idempotent_and_keeps_latest_role() {
        let f = fixture();
        let access = access_for(&f, &f.owner).await;

        invite_member(&f.store, &access, "bob@example.com", Some(MemberRole::Viewer))
            .await
            .unwrap();
        let second = invite_member(&f.store, &access, " BOB@example.com ", Some(MemberRole::Admin))
            .await
            .unwrap();
        assert_eq!(second.role, MemberRole::Admin);

        let listing = list_members(&f.store, &access).await.unwrap();
        assert_eq!(listing.members.len(), 1);
        assert_eq!(listing.members[0].role, MemberRole::Admin);
    }

    #[tokio::test]
    async fn invite_defaults_to_member() {
        let f = fixture();
        let access = access_for(&f, &f.owner).await;
        let m = invite_member(&f.store, &access, "bob@example.com", None)
            .await
            .unwrap();
        assert_eq!(m.role, MemberRole::Member);
    }

    #[tokio::test]
    async fn invite_unknown_email_is_not_found() {
        let f = fixture();
        let access = access_for(&f, &f.owner).await;
        let err = invite_member(&f.store, &access, "ghost@example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DevsyncError::NotFound(_)));
    }

    #[tokio::test]
    async fn invite_blank_email_is_validation_error() {
        let f = fixture();
        let access = access_for(&f, &f.owner).await;
        let err = invite_member(&f.store, &access, "   ", None).await.unwrap_err();
        assert!(matches!(err, DevsyncError::Validation { ref field, .. } if field == "email"));
    }

    #[tokio::test]
    async fn owner_cannot_be_invited_changed_or_removed() {
        let f = fixture();
        f.store.put_member(&f.project_id, &f.bob.id, MemberRole::Admin);
        let owner_access = access_for(&f, &f.owner).await;
        let admin_access = access_for(&f, &f.bob).await;

        for access in [&owner_access, &admin_access] {
            let err = invite_member(&f.store, access, "alice@example.com", None)
                .await
                .unwrap_err();
            assert!(matches!(err, DevsyncError::Forbidden(_)));
            let err = change_role(&f.store, access, &f.owner.id, MemberRole::Viewer)
                .await
                .unwrap_err();
            assert!(matches!(err, DevsyncError::Forbidden(_)));
            let err = remove_member(&f.store, access, &f.owner.id).await.unwrap_err();
            assert!(matches!(err, DevsyncError::Forbidden(_)));
        }
        let role = crate::role::resolve_role(&f.store, &f.owner.id, &f.project_id)
            .await
            .unwrap();
        assert_eq!(role, Some(Role::Owner));
    }

    #[tokio::test]
    async fn members_cannot_manage_membership() {
        let f = fixture();
        f.store.put_member(&f.project_id, &f.bob.id, MemberRole::Member);
        let access = access_for(&f, &f.bob).await;
        let err = invite_member(&f.store, &access, "alice@example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DevsyncError::Forbidden(_)));
    }

    #[tokio::test]
    async fn listing_filters_leaked_owner_row() {
        let f = fixture();
        f.store.put_member(&f.project_id, &f.owner.id, MemberRole::Admin);
        f.store.put_member(&f.project_id, &f.bob.id, MemberRole::Viewer);
        let access = access_for(&f, &f.bob).await;

        let listing = list_members(&f.store, &access).await.unwrap();
        assert_eq!(listing.owner.id, f.owner.id);
        assert_eq!(listing.members.len(), 1);
        assert_eq!(listing.members[0].user_id, f.bob.id);
    }

    #[tokio::test]
    async fn change_and_remove_missing_membership_is_not_found() {
        let f = fixture();
        let access = access_for(&f, &f.owner).await;
        let err = change_role(&f.store, &access, &f.bob.id, MemberRole::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, DevsyncError::NotFound(_)));
        let err = remove_member(&f.store, &access, &f.bob.id).await.unwrap_err();
        assert!(matches!(err, DevsyncError::NotFound(_)));
    }

    #[tokio::test]
    async fn removal_revokes_access() {
        let f = fixture();
        f.store.put_member(&f.project_id, &f.bob.id, MemberRole::Member);
        let access = access_for(&f, &f.owner).await;
        remove_member(&f.store, &access, &f.bob.id).await.unwrap();

        let bob_access = access_for(&f, &f.bob).await;
        assert_eq!(bob_access.role, Role::NoAccess);
    }
}

//! Group service implementation
//!
//! Group lifecycle and membership management. Every group is created with
//! its creator as admin; member management only ever replaces non-admin
//! members, and destructive operations require the caller to be an admin.

use tracing::{debug, info};

use crate::database::repositories::{GroupRepository, UserRepository};
use crate::models::group::{CreateGroupRequest, Group, GroupMember, GroupWithMembers};
use crate::utils::errors::{Result, SplitmateError};
use crate::utils::logging::log_ledger_mutation;

#[derive(Clone)]
pub struct GroupService {
    group_repository: GroupRepository,
    user_repository: UserRepository,
}

impl GroupService {
    pub fn new(group_repository: GroupRepository, user_repository: UserRepository) -> Self {
        Self {
            group_repository,
            user_repository,
        }
    }

    /// Create a group with the creator as its admin
    pub async fn create_group(&self, request: CreateGroupRequest) -> Result<GroupWithMembers> {
        debug!(creator_id = request.creator_id, "Creating group");

        if request.name.trim().is_empty() {
            return Err(SplitmateError::Validation(
                "group name must not be empty".to_string(),
            ));
        }

        self.user_repository
            .find_by_id(request.creator_id)
            .await?
            .ok_or(SplitmateError::UserNotFound {
                user_id: request.creator_id,
            })?;

        let creator_id = request.creator_id;
        let group = self.group_repository.create_with_admin(request).await?;
        let members = self.group_repository.get_members(group.id).await?;

        info!(group_id = group.id, creator_id = creator_id, "Group created");
        Ok(GroupWithMembers { group, members })
    }

    /// Fetch a group with its members
    pub async fn get_group(&self, group_id: i64) -> Result<GroupWithMembers> {
        let group = self
            .group_repository
            .find_by_id(group_id)
            .await?
            .ok_or(SplitmateError::GroupNotFound { group_id })?;
        let members = self.group_repository.get_members(group_id).await?;

        Ok(GroupWithMembers { group, members })
    }

    /// Groups the user belongs to, most recently joined first
    pub async fn list_groups_for_user(&self, user_id: i64) -> Result<Vec<Group>> {
        self.group_repository.get_user_groups(user_id).await
    }

    /// Replace the group's non-admin members with the given user set.
    ///
    /// Admin members always survive; the caller must be an admin.
    pub async fn replace_members(
        &self,
        group_id: i64,
        caller_id: i64,
        member_ids: &[i64],
    ) -> Result<Vec<GroupMember>> {
        debug!(group_id = group_id, caller_id = caller_id, "Replacing group members");

        self.group_repository
            .find_by_id(group_id)
            .await?
            .ok_or(SplitmateError::GroupNotFound { group_id })?;

        if !self.group_repository.is_admin(group_id, caller_id).await? {
            return Err(SplitmateError::PermissionDenied(
                "Only group admins can manage members".to_string(),
            ));
        }

        let existing = self.user_repository.existing_ids(member_ids).await?;
        for &user_id in member_ids {
            if !existing.contains(&user_id) {
                return Err(SplitmateError::UserNotFound { user_id });
            }
        }

        let members = self
            .group_repository
            .replace_members(group_id, member_ids)
            .await?;

        info!(
            group_id = group_id,
            caller_id = caller_id,
            member_count = members.len(),
            "Group members replaced"
        );
        Ok(members)
    }

    /// Delete a group and all its expenses, splits and settlements.
    ///
    /// Only admins may do this; the teardown is a single transaction.
    pub async fn delete_group(&self, group_id: i64, caller_id: i64) -> Result<()> {
        debug!(group_id = group_id, caller_id = caller_id, "Deleting group");

        self.group_repository
            .find_by_id(group_id)
            .await?
            .ok_or(SplitmateError::GroupNotFound { group_id })?;

        if !self.group_repository.is_admin(group_id, caller_id).await? {
            return Err(SplitmateError::PermissionDenied(
                "Only group admins can delete the group".to_string(),
            ));
        }

        self.group_repository.delete_cascade(group_id).await?;

        log_ledger_mutation("delete_group", group_id, caller_id, None);
        Ok(())
    }
}

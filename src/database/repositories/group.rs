//! Group repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::group::{CreateGroupRequest, Group, GroupMember, MemberRole};
use crate::utils::errors::SplitmateError;

#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new group with its creator as admin.
    ///
    /// Both rows are written in one transaction so a group never exists
    /// without at least one admin.
    pub async fn create_with_admin(
        &self,
        request: CreateGroupRequest,
    ) -> Result<Group, SplitmateError> {
        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(request.name)
        .bind(request.description)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO group_members (group_id, user_id, role, joined_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(group.id)
        .bind(request.creator_id)
        .bind(MemberRole::Admin)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(group)
    }

    /// Find group by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Group>, SplitmateError> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT id, name, description, created_at, updated_at FROM groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Get group members
    pub async fn get_members(&self, group_id: i64) -> Result<Vec<GroupMember>, SplitmateError> {
        let members = sqlx::query_as::<_, GroupMember>(
            "SELECT id, group_id, user_id, role, joined_at FROM group_members WHERE group_id = $1 ORDER BY joined_at ASC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Check if user is member of group
    pub async fn is_member(&self, group_id: i64, user_id: i64) -> Result<bool, SplitmateError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM group_members WHERE group_id = $1 AND user_id = $2",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Check if user is an admin of group
    pub async fn is_admin(&self, group_id: i64, user_id: i64) -> Result<bool, SplitmateError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM group_members WHERE group_id = $1 AND user_id = $2 AND role = $3",
        )
        .bind(group_id)
        .bind(user_id)
        .bind(MemberRole::Admin)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Get groups for user, most recently joined first
    pub async fn get_user_groups(&self, user_id: i64) -> Result<Vec<Group>, SplitmateError> {
        let groups = sqlx::query_as::<_, Group>(
            r#"
            SELECT g.id, g.name, g.description, g.created_at, g.updated_at
            FROM groups g
            INNER JOIN group_members gm ON g.id = gm.group_id
            WHERE gm.user_id = $1
            ORDER BY gm.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    /// IDs of all groups the user belongs to
    pub async fn group_ids_for_user(&self, user_id: i64) -> Result<Vec<i64>, SplitmateError> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT group_id FROM group_members WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Replace the non-admin member set of a group.
    ///
    /// Admin rows are never touched: existing MEMBER rows are removed, the
    /// new user ids are inserted as MEMBER, and an id that already has a row
    /// (an admin) is left as-is via the unique-pair conflict.
    pub async fn replace_members(
        &self,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<Vec<GroupMember>, SplitmateError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM group_members WHERE group_id = $1 AND role = $2")
            .bind(group_id)
            .bind(MemberRole::Member)
            .execute(&mut *tx)
            .await?;

        for user_id in member_ids {
            sqlx::query(
                r#"
                INSERT INTO group_members (group_id, user_id, role, joined_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (group_id, user_id) DO NOTHING
                "#,
            )
            .bind(group_id)
            .bind(user_id)
            .bind(MemberRole::Member)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        }

        let members = sqlx::query_as::<_, GroupMember>(
            "SELECT id, group_id, user_id, role, joined_at FROM group_members WHERE group_id = $1 ORDER BY joined_at ASC",
        )
        .bind(group_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(members)
    }

    /// Delete a group and everything it owns.
    ///
    /// Splits of the group's expenses, the group's settlements (and their
    /// split links), expenses, members and finally the group row itself go
    /// in one transaction, so a failure leaves the group fully intact.
    pub async fn delete_cascade(&self, group_id: i64) -> Result<(), SplitmateError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM splits USING expenses WHERE splits.expense_id = expenses.id AND expenses.group_id = $1",
        )
        .bind(group_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM settlements WHERE group_id = $1")
            .bind(group_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM expenses WHERE group_id = $1")
            .bind(group_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM group_members WHERE group_id = $1")
            .bind(group_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(group_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Count total groups
    pub async fn count(&self) -> Result<i64, SplitmateError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM groups")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

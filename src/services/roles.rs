//! Role and ownership checks.
//!
//! `is_admin` is read fresh from the database on every privileged mutation so
//! a revoked admin cannot act on a stale view.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::user_role;
use crate::state::DbConn;

pub const ROLE_ADMIN: &str = "admin";

/// Whether the user holds the admin role. Absence of a row means false,
/// never an error.
pub async fn is_admin(db: &DbConn, user_id: i64) -> Result<bool> {
    let row = UserRole::find()
        .filter(user_role::Column::UserId.eq(user_id))
        .filter(user_role::Column::Role.eq(ROLE_ADMIN))
        .one(db)
        .await?;
    Ok(row.is_some())
}

/// Whether the caller owns the resource.
pub fn is_owner(resource_owner_id: i64, caller_id: i64) -> bool {
    resource_owner_id == caller_id
}

/// Gate for admin-only operations.
pub async fn require_admin(db: &DbConn, user_id: i64) -> Result<()> {
    if is_admin(db, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_is_exact_match() {
        assert!(is_owner(7, 7));
        assert!(!is_owner(7, 8));
    }
}

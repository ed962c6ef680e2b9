use crate::common::UserId;
use crate::domains::users::UserRole;

/// The authenticated user an action runs on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

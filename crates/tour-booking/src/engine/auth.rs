//! Explicit authorization context for back-office operations.
//!
//! Callers build an [`AuthContext`] from whatever identifies the request and
//! pass it to every admin operation of [`OrderLifecycle`](super::OrderLifecycle).

use super::LifecycleError;
use serde::{Deserialize, Serialize};

/// Who is making the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Principal {
    Anonymous,
    Customer { user_id: String },
    Admin { user_id: String },
    /// Scheduled jobs and start-up tasks.
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub principal: Principal,
    /// Whether any administrator account exists yet.
    pub admin_registered: bool,
}

impl AuthContext {
    pub fn new(principal: Principal, admin_registered: bool) -> Self {
        Self {
            principal,
            admin_registered,
        }
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::new(
            Principal::Admin {
                user_id: user_id.into(),
            },
            true,
        )
    }

    pub fn customer(user_id: impl Into<String>) -> Self {
        Self::new(
            Principal::Customer {
                user_id: user_id.into(),
            },
            true,
        )
    }

    pub fn system() -> Self {
        Self::new(Principal::System, true)
    }

    /// Admins and the system pass. Until the first administrator registers,
    /// everyone passes so the back office can be bootstrapped.
    pub fn require_admin(&self) -> Result<(), LifecycleError> {
        match self.principal {
            Principal::Admin { .. } | Principal::System => Ok(()),
            _ if !self.admin_registered => Ok(()),
            _ => Err(LifecycleError::Forbidden),
        }
    }
}

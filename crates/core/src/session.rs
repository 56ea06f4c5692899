//! Caller session context and role gating.
//!
//! The backend's session/role store is read once at startup and injected
//! into the components that need it, so the authorization precondition is
//! explicit and testable without mocking ambient storage.

use crate::error::CoreError;

/// Marketplace roles, parsed from the backend's role string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Member,
    Distributor,
    Admin,
    /// Any role string this client does not recognize. Fails closed.
    Unknown,
}

impl Role {
    /// Parse the backend's role string. Matching is case-insensitive.
    pub fn parse(role: &str) -> Self {
        match role.to_ascii_lowercase().as_str() {
            "member" => Self::Member,
            "distributor" => Self::Distributor,
            "admin" => Self::Admin,
            _ => Self::Unknown,
        }
    }
}

/// Read-only session facts for the current caller.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Opaque session identifier sent with outbound requests.
    pub session_id: String,
    pub role: Role,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>, role: Role) -> Self {
        Self {
            session_id: session_id.into(),
            role,
        }
    }

    /// Gate for member-only operations such as the deal collection fetch.
    pub fn require_member(&self) -> Result<(), CoreError> {
        if self.role == Role::Member {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "deal browsing requires a member session".to_string(),
            ))
        }
    }
}

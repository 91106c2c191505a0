//! Relationship entity - friendship/block state with another user

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// What kind of relationship the client has with a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Mutually accepted friendship
    Friend,
    /// A friend request this client sent
    OutgoingRequest,
    /// A friend request this client received
    IncomingRequest,
    /// The client blocked this user
    Blocked,
}

impl RelationshipKind {
    /// Wire name of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Friend => "friend",
            Self::OutgoingRequest => "outgoing_request",
            Self::IncomingRequest => "incoming_request",
            Self::Blocked => "blocked",
        }
    }
}

/// A relationship with another user, keyed by the peer's user id
///
/// The kind mutates in place when the server reports a change (e.g. an
/// outgoing request being accepted into a friendship).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    pub user_id: Snowflake,
    pub kind: RelationshipKind,
}

impl Relationship {
    /// Create a relationship entry
    #[must_use]
    pub const fn new(user_id: Snowflake, kind: RelationshipKind) -> Self {
        Self { user_id, kind }
    }

    #[inline]
    #[must_use]
    pub fn is_friend(&self) -> bool {
        self.kind == RelationshipKind::Friend
    }

    #[inline]
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.kind == RelationshipKind::Blocked
    }

    /// Whether this is a pending request in either direction
    #[must_use]
    pub fn is_request(&self) -> bool {
        matches!(
            self.kind,
            RelationshipKind::OutgoingRequest | RelationshipKind::IncomingRequest
        )
    }
}

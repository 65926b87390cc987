//! Caller identity as seen by the URL lifecycle.

use serde::Serialize;

/// An authenticated user, as resolved by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
}

/// Who is making a request.
///
/// Services branch on this variant instead of checking optional fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CallerIdentity {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl CallerIdentity {
    pub fn authenticated(id: i64, email: impl Into<String>) -> Self {
        Self::Authenticated(Identity {
            id,
            email: email.into(),
        })
    }

    /// Owner id to stamp on records created by this caller.
    pub fn owner_id(&self) -> Option<i64> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity.id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl From<Identity> for CallerIdentity {
    fn from(identity: Identity) -> Self {
        Self::Authenticated(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_owner() {
        let caller = CallerIdentity::Anonymous;
        assert_eq!(caller.owner_id(), None);
        assert!(!caller.is_authenticated());
    }

    #[test]
    fn test_authenticated_owner_id() {
        let caller = CallerIdentity::authenticated(42, "user@example.com");
        assert_eq!(caller.owner_id(), Some(42));
        assert!(caller.is_authenticated());
    }

    #[test]
    fn test_from_identity_is_authenticated() {
        let caller = CallerIdentity::from(Identity {
            id: 5,
            email: "five@example.com".to_string(),
        });
        assert_eq!(caller, CallerIdentity::authenticated(5, "five@example.com"));
    }
}

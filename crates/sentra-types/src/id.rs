//! Identifier types for Sentra.
//!
//! All identifiers are opaque strings issued by the external catalog and
//! membership services. The engine compares them byte-for-byte and never
//! parses or generates them.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier string.
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Returns the raw identifier string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

string_id! {
    /// Identifier for an actor (user or service principal).
    ///
    /// An actor is *who* is asking for access. Group membership is not
    /// part of the identifier — it is resolved per query into an
    /// [`ActorContext`](crate::ActorContext).
    ///
    /// # Example
    ///
    /// ```
    /// use sentra_types::ActorId;
    ///
    /// let alice = ActorId::new("urn:id:user:alice");
    /// assert_eq!(alice.as_str(), "urn:id:user:alice");
    /// assert_eq!(format!("{alice}"), "actor:urn:id:user:alice");
    /// ```
    ActorId, "actor"
}

string_id! {
    /// Identifier for a group an actor may transitively belong to.
    GroupId, "group"
}

string_id! {
    /// Identifier for a role assigned to an actor.
    ///
    /// Roles and groups are matched the same way by the policy engine but
    /// come from distinct namespaces in the membership service, so they
    /// keep distinct types.
    RoleId, "role"
}

string_id! {
    /// Identifier for a policy record in the external catalog.
    PolicyId, "policy"
}

string_id! {
    /// An opaque privilege identifier naming one permitted capability.
    ///
    /// Privileges carry no structure the engine interprets; equality is
    /// the only operation. `"EDIT_ENTITY"` and `"VIEW_DATASET_PROFILE"`
    /// are typical values.
    ///
    /// # Example
    ///
    /// ```
    /// use sentra_types::Privilege;
    ///
    /// let view = Privilege::new("VIEW_ENTITY");
    /// assert_eq!(view, Privilege::from("VIEW_ENTITY"));
    /// ```
    Privilege, "privilege"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_round_trips_raw_string() {
        let id = ActorId::new("urn:id:user:alice");
        assert_eq!(id.as_str(), "urn:id:user:alice");
        assert_eq!(ActorId::from("urn:id:user:alice"), id);
        assert_eq!(ActorId::from(String::from("urn:id:user:alice")), id);
    }

    #[test]
    fn display_prefixes() {
        assert_eq!(format!("{}", ActorId::new("a")), "actor:a");
        assert_eq!(format!("{}", GroupId::new("g")), "group:g");
        assert_eq!(format!("{}", RoleId::new("r")), "role:r");
        assert_eq!(format!("{}", PolicyId::new("p")), "policy:p");
        assert_eq!(format!("{}", Privilege::new("VIEW")), "privilege:VIEW");
    }

    #[test]
    fn ids_are_ordered_and_hashable() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Privilege::new("VIEW"));
        set.insert(Privilege::new("VIEW"));
        assert_eq!(set.len(), 1);

        assert!(PolicyId::new("a") < PolicyId::new("b"));
    }

    #[test]
    fn serde_is_transparent() {
        let id = ActorId::new("urn:id:user:alice");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"urn:id:user:alice\"");

        let parsed: ActorId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);
    }
}

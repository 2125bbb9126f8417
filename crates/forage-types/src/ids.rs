//! Type-safe identifier wrappers.
//!
//! Harvest instances are placed world objects and get UUID v7 ids minted by
//! the host when the object spawns. Catalog nodes, items, and events are
//! human-authored keys (`node_rock_stone`, `돌`) and wrap a [`String`].
//! Keeping them as distinct types prevents passing an item id where a node
//! id is expected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Generates a newtype wrapper around an authored [`String`] key.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an authored key.
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Borrow the key as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }
    };
}

define_id! {
    /// Unique identifier for one placed harvestable object in the world.
    InstanceId
}

define_key! {
    /// Catalog key for a kind of harvestable (e.g. `node_rock_stone`).
    NodeId
}

define_key! {
    /// Inventory item key (e.g. `돌`).
    ItemId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_ids_are_unique() {
        let a = InstanceId::new();
        let b = InstanceId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn instance_id_display_matches_uuid() {
        let id = InstanceId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn keys_serialize_as_plain_strings() {
        let node = NodeId::from("node_rock_stone");
        let json = serde_json::to_string(&node).ok();
        assert_eq!(json.as_deref(), Some("\"node_rock_stone\""));

        let item: Result<ItemId, _> = serde_json::from_str("\"돌\"");
        assert_eq!(item.ok(), Some(ItemId::new("돌")));
    }

    #[test]
    fn key_display_is_the_raw_key() {
        assert_eq!(ItemId::new("나뭇가지").to_string(), "나뭇가지");
        assert_eq!(NodeId::new("node_tree_oak").as_str(), "node_tree_oak");
    }
}

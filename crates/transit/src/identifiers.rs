//! Type-safe, efficient identifiers for planner entities.
//!
//! All identifiers use Arc<str> for cheap cloning and minimal memory
//! overhead, and serialize as bare strings so they map 1:1 onto the
//! backend's JSON fields.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

impl_identifier!(StopCode);
impl_identifier!(GroupCode);
impl_identifier!(LineRef);
impl_identifier!(TripId);
impl_identifier!(AlertId);

impl LineRef {
    /// Placeholder line the backend puts on synthetic group-boundary
    /// elements of a path.
    pub const GROUP_NODE: &'static str = "GROUP_NODE";

    /// Line value marking a walking transfer leg.
    pub const WALK: &'static str = "WALK";

    pub fn is_group_marker(&self) -> bool {
        self.as_str() == Self::GROUP_NODE
    }

    pub fn is_walk(&self) -> bool {
        self.as_str() == Self::WALK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = StopCode::new("KAP71");
        let id2 = StopCode::new("KAP71");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0)); // Clone shares Arc
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(GroupCode::new("MT"), 42);

        assert_eq!(map.get(&GroupCode::new("MT")), Some(&42));
    }

    #[test]
    fn test_identifier_display() {
        let id = LineRef::new("16");
        assert_eq!(format!("{}", id), "16");
    }

    #[test]
    fn test_identifier_conversions() {
        let _id1: TripId = "5_12345".into();
        let _id2: TripId = String::from("5_12346").into();
    }

    #[test]
    fn test_identifier_serde_is_transparent() {
        let code = StopCode::new("AWF73");
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"AWF73\"");

        let back: StopCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn test_line_sentinels() {
        assert!(LineRef::new("GROUP_NODE").is_group_marker());
        assert!(LineRef::new("WALK").is_walk());
        assert!(!LineRef::new("5").is_group_marker());
        assert!(!LineRef::new("5").is_walk());
    }
}

//! Scene-side identity for cut edges.
//!
//! The cut graph only knows which object produced each edge. What that
//! object hosts (a door, a window, a plain wall) lives here, in a small
//! catalog the caller fills from its scene.

use std::collections::HashMap;

/// Identifier of a scene object, as assigned by the calling application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub i32);

/// What kind of object a host's child is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChildKind {
    Door,
    Window,
    /// Glazed or solid panel filling a whole opening.
    Panel,
    Wall,
    Floor,
    Other,
}

impl ChildKind {
    /// Whether this kind punches an opening through its host.
    #[must_use]
    pub fn is_portal(self) -> bool {
        matches!(self, Self::Door | Self::Window | Self::Panel)
    }
}

/// A scene object that can host children.
#[derive(Debug, Clone, Default)]
pub struct HostObject {
    /// Children in scene order. Only the first one decides portal status.
    pub children: Vec<ChildKind>,
}

impl HostObject {
    /// Creates a host with the given children.
    #[must_use]
    pub fn new(children: Vec<ChildKind>) -> Self {
        Self { children }
    }
}

/// Catalog of scene objects keyed by [`ObjectId`].
#[derive(Debug, Default)]
pub struct HostCatalog {
    objects: HashMap<ObjectId, HostObject>,
}

impl HostCatalog {
    /// Creates a new, empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object, replacing any previous entry with the same ID.
    pub fn insert(&mut self, id: ObjectId, object: HostObject) {
        self.objects.insert(id, object);
    }

    /// Whether the object's first child is a portal.
    ///
    /// Unknown objects and childless objects host nothing.
    #[must_use]
    pub fn hosts_portal(&self, id: ObjectId) -> bool {
        self.objects
            .get(&id)
            .and_then(|object| object.children.first())
            .is_some_and(|kind| kind.is_portal())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn first_child_decides_portal_status() {
        let mut catalog = HostCatalog::new();
        catalog.insert(ObjectId(10), HostObject::new(vec![ChildKind::Door]));
        catalog.insert(
            ObjectId(11),
            HostObject::new(vec![ChildKind::Wall, ChildKind::Window]),
        );

        assert!(catalog.hosts_portal(ObjectId(10)));
        // A window further down the child list does not count.
        assert!(!catalog.hosts_portal(ObjectId(11)));
    }

    #[test]
    fn childless_and_unknown_objects_are_not_portals() {
        let mut catalog = HostCatalog::new();
        catalog.insert(ObjectId(1), HostObject::default());

        assert!(!catalog.hosts_portal(ObjectId(1)));
        assert!(!catalog.hosts_portal(ObjectId(99)));
    }

    #[test]
    fn panel_counts_as_portal() {
        let mut catalog = HostCatalog::new();
        catalog.insert(ObjectId(2), HostObject::new(vec![ChildKind::Panel]));
        assert!(catalog.hosts_portal(ObjectId(2)));
    }
}

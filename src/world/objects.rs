//! World objects
//!
//! Objects live in a fixed-capacity arena. Handles are plain slot indices and
//! stay valid only until the registry is cleared for the next level.

use macroquad::math::Rect;
use super::geometry::rects_overlap;

/// Kinds of interactive objects placed in a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Level exit
    Door = 1,
}

impl ObjectKind {
    /// Column offset of this kind's sprite in the object sheet (pixels)
    pub fn sheet_x(self) -> f32 {
        (self as u32 - 1) as f32 * 16.0
    }
}

/// An object instance with its pixel-space bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Object {
    pub kind: ObjectKind,
    pub rect: Rect,
}

impl Object {
    pub fn new(kind: ObjectKind, rect: Rect) -> Self {
        Self { kind, rect }
    }
}

/// Index of a spawned object within the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(usize);

impl ObjectHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed-capacity object storage. Slots are handed out in order and only
/// freed all at once by `clear`.
#[derive(Debug, Clone)]
pub struct ObjectRegistry {
    slots: Vec<Object>,
    capacity: usize,
}

impl ObjectRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of live objects
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Append an object. Returns `None` without storing anything when every
    /// slot is in use; the arena never grows past its capacity.
    pub fn spawn(&mut self, object: Object) -> Option<ObjectHandle> {
        if self.slots.len() >= self.capacity {
            log::warn!(
                "Object limit ({}) reached, dropping {:?} at ({}, {})",
                self.capacity, object.kind, object.rect.x, object.rect.y
            );
            return None;
        }

        self.slots.push(object);
        Some(ObjectHandle(self.slots.len() - 1))
    }

    /// First object (in storage order) whose bounds overlap `hitbox`
    pub fn query_at(&self, hitbox: &Rect) -> Option<(ObjectHandle, &Object)> {
        self.iter().find(|(_, obj)| rects_overlap(&obj.rect, hitbox))
    }

    /// Objects in storage order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &Object)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, obj)| (ObjectHandle(i), obj))
    }

    /// Drop every object. Previously issued handles become meaningless.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door_at(x: f32, y: f32) -> Object {
        Object::new(ObjectKind::Door, Rect::new(x, y, 16.0, 32.0))
    }

    #[test]
    fn test_spawn_respects_capacity() {
        let mut objects = ObjectRegistry::new(2);
        assert_eq!(objects.spawn(door_at(0.0, 0.0)).map(ObjectHandle::index), Some(0));
        assert_eq!(objects.spawn(door_at(32.0, 0.0)).map(ObjectHandle::index), Some(1));
        assert!(objects.spawn(door_at(64.0, 0.0)).is_none());
        assert_eq!(objects.len(), 2);
    }

    #[test]
    fn test_query_returns_first_overlap_in_storage_order() {
        let mut objects = ObjectRegistry::new(4);
        let a = objects.spawn(door_at(0.0, 0.0)).unwrap();
        let b = objects.spawn(door_at(8.0, 0.0)).unwrap();

        let (hit, _) = objects.query_at(&Rect::new(10.0, 10.0, 4.0, 4.0)).unwrap();
        assert_eq!(hit, a);

        // Only the second door reaches past x=16
        let (hit, obj) = objects.query_at(&Rect::new(18.0, 10.0, 4.0, 4.0)).unwrap();
        assert_eq!(hit, b);
        assert_eq!(obj.kind, ObjectKind::Door);
    }

    #[test]
    fn test_query_miss() {
        let mut objects = ObjectRegistry::new(4);
        objects.spawn(door_at(0.0, 0.0));
        assert!(objects.query_at(&Rect::new(16.0, 0.0, 8.0, 8.0)).is_none());
        assert!(ObjectRegistry::new(4).query_at(&Rect::new(0.0, 0.0, 8.0, 8.0)).is_none());
    }

    #[test]
    fn test_clear_frees_all_slots() {
        let mut objects = ObjectRegistry::new(1);
        objects.spawn(door_at(0.0, 0.0)).unwrap();
        objects.clear();
        assert!(objects.is_empty());
        assert_eq!(objects.spawn(door_at(0.0, 0.0)).map(ObjectHandle::index), Some(0));
    }
}

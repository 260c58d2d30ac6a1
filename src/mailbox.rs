//! A generation-counter keyed cache used to skip re-testing the same
//! primitive multiple times during a single acceleration-structure query,
//! for primitives that can be reached through more than one traversal path
//! (e.g. shared/instanced geometry).

use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

const TABLE_SIZE: usize = 1024;

#[derive(Clone, Copy)]
struct Mbox {
    gen: u32,
    ptr: usize,
}

/// `clear` is O(1) (just bumps a counter), so it's cheap to call once per
/// top-level intersection query even though the table itself is never
/// zeroed out.
pub struct Mailbox {
    gen: u32,
    boxes: Vec<Mbox>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self {
            gen: 1,
            boxes: vec![Mbox { gen: 0, ptr: 0 }; TABLE_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.gen += 1;
    }

    /// True if `add` has already been called for `ptr` since the last `clear`.
    pub fn contains<T: ?Sized>(&self, ptr: *const T) -> bool {
        let mbox = &self.boxes[self.index_for(ptr)];
        mbox.gen == self.gen && mbox.ptr == ptr as *const () as usize
    }

    /// Records `ptr` as tested this generation. Returns `true` if doing so
    /// evicted a different, still up-to-date entry (a hash collision, not
    /// an error -- the displaced entry will just be retested if touched
    /// again before the next `clear`).
    pub fn add<T: ?Sized>(&mut self, ptr: *const T) -> bool {
        let gen = self.gen;
        let idx = self.index_for(ptr);
        let mbox = &mut self.boxes[idx];
        let collision = mbox.gen == gen && mbox.ptr != ptr as *const () as usize;
        mbox.gen = gen;
        mbox.ptr = ptr as *const () as usize;
        collision
    }

    fn index_for<T: ?Sized>(&self, ptr: *const T) -> usize {
        let mut hasher = DefaultHasher::new();
        (ptr as *const () as usize).hash(&mut hasher);
        (hasher.finish() as usize) % TABLE_SIZE
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_makes_contains_false() {
        let mut mb = Mailbox::new();
        let x = 5i32;
        mb.add(&x as *const i32);
        assert!(mb.contains(&x as *const i32));
        mb.clear();
        assert!(!mb.contains(&x as *const i32));
    }

    #[test]
    fn add_then_contains() {
        let mut mb = Mailbox::new();
        let x = 5i32;
        let y = 6i32;
        assert!(!mb.contains(&x as *const i32));
        mb.add(&x as *const i32);
        assert!(mb.contains(&x as *const i32));
        assert!(!mb.contains(&y as *const i32));
    }
}

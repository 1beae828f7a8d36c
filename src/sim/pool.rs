//! Typed free-list pool for short-lived entities
//!
//! Bullets, explosions and power-ups churn several times per second. The
//! pool keeps their slots alive across frames: `acquire` hands out a slot
//! (reused or freshly pushed), `release` resets it and puts it on the free
//! list. Active collections hold `Handle<T>`s, never the values.
//!
//! Releasing a handle twice, or reading through a released handle, is a
//! programming error and panics.

use std::fmt;
use std::marker::PhantomData;

/// A value the pool can recycle
pub trait Poolable: Default {
    /// Return to the default state. Called on every release so a reused
    /// slot never carries stale state into its next life.
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Index of a slot in a `Pool<T>`
pub struct Handle<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Slot index (stable for the lifetime of the pool)
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.index)
    }
}

/// Arena of `T` slots with a stack of free indices
#[derive(Debug, Clone)]
pub struct Pool<T: Poolable> {
    slots: Vec<T>,
    live: Vec<bool>,
    free: Vec<usize>,
}

impl<T: Poolable> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Poolable> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
        }
    }

    /// Take a slot in its default state, reusing a released one if possible
    pub fn acquire(&mut self) -> Handle<T> {
        if let Some(index) = self.free.pop() {
            self.live[index] = true;
            return Handle::new(index);
        }
        self.slots.push(T::default());
        self.live.push(true);
        Handle::new(self.slots.len() - 1)
    }

    /// Reset the slot and return it to the free list.
    ///
    /// The caller must drop the handle from its active collection.
    pub fn release(&mut self, handle: Handle<T>) {
        assert!(
            self.is_live(handle),
            "pool release of {handle:?} which is not in use (double release?)"
        );
        self.slots[handle.index].reset();
        self.live[handle.index] = false;
        self.free.push(handle.index);
    }

    pub fn get(&self, handle: Handle<T>) -> &T {
        assert!(self.is_live(handle), "pool read through released {handle:?}");
        &self.slots[handle.index]
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> &mut T {
        assert!(self.is_live(handle), "pool write through released {handle:?}");
        &mut self.slots[handle.index]
    }

    pub fn is_live(&self, handle: Handle<T>) -> bool {
        self.live.get(handle.index).copied().unwrap_or(false)
    }

    /// Number of slots currently handed out
    pub fn in_use(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of released slots waiting for reuse
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Total slots ever allocated
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Drop every slot. All outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.live.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Shot {
        age: u32,
        tag: &'static str,
    }

    impl Poolable for Shot {}

    #[test]
    fn test_acquire_from_empty_pool_allocates() {
        let mut pool: Pool<Shot> = Pool::new();
        let a = pool.acquire();
        let b = pool.acquire();
        assert_ne!(a, b);
        assert_eq!(pool.in_use(), 2);
        assert_eq!(pool.allocated(), 2);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_reuse_returns_reset_instance() {
        let mut pool: Pool<Shot> = Pool::new();
        let first = pool.acquire();
        {
            let shot = pool.get_mut(first);
            shot.age = 42;
            shot.tag = "stale";
        }
        pool.release(first);
        assert_eq!(pool.available(), 1);

        let second = pool.acquire();
        // Same slot, default contents
        assert_eq!(second.index(), first.index());
        assert_eq!(pool.get(second), &Shot::default());
        assert_eq!(pool.allocated(), 1);
    }

    #[test]
    #[should_panic(expected = "double release")]
    fn test_double_release_panics() {
        let mut pool: Pool<Shot> = Pool::new();
        let h = pool.acquire();
        pool.release(h);
        pool.release(h);
    }

    #[test]
    #[should_panic(expected = "released")]
    fn test_read_after_release_panics() {
        let mut pool: Pool<Shot> = Pool::new();
        let h = pool.acquire();
        pool.release(h);
        let _ = pool.get(h);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut pool: Pool<Shot> = Pool::with_capacity(4);
        let h = pool.acquire();
        pool.acquire();
        pool.release(h);
        pool.clear();
        assert_eq!(pool.allocated(), 0);
        assert_eq!(pool.available(), 0);
        assert!(!pool.is_live(h));
    }
}

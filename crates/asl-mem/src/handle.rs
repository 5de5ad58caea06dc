//! Generational handles for runtime-owned objects.
//!
//! Objects that outlive a single call (heap regions, and everything the C
//! surface hands out) are addressed by [`Handle`]s into a [`HandleTable`]
//! instead of by address. A released handle keeps its slot index but not
//! its generation, so a stale handle resolves to `None` rather than to
//! whatever now occupies the slot. Releasing twice is a no-op.

use std::fmt;

/// An opaque reference to a value in a [`HandleTable`].
///
/// Encoded as `slot << 32 | generation`. Generations start at 1, so the
/// all-zero handle [`Handle::NULL`] never resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle(u64);

impl Handle {
    /// A handle that no table ever issues.
    pub const NULL: Self = Self(0);

    const fn encode(slot: u32, generation: u32) -> Self {
        Self(((slot as u64) << 32) | generation as u64)
    }

    /// Reconstruct a handle from its raw encoding.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw encoding, as passed across the C boundary.
    pub const fn to_raw(self) -> u64 {
        self.0
    }

    /// Slot index within the table.
    pub const fn slot(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Generation the handle was issued at.
    pub const fn generation(self) -> u32 {
        self.0 as u32
    }

    /// Whether this is [`Handle::NULL`].
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.slot(), self.generation())
    }
}

struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// A slot+generation table mapping [`Handle`]s to owned values.
///
/// Slots are reused through a free list. A slot whose generation would wrap
/// is retired instead of reused.
pub struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    len: usize,
}

impl<T> HandleTable<T> {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Create an empty table with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no live values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a value and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if all `u32::MAX` slots are in use.
    pub fn insert(&mut self, value: T) -> Handle {
        self.len += 1;
        if let Some(slot_idx) = self.free_list.pop() {
            let slot = &mut self.slots[slot_idx as usize];
            slot.data = Some(value);
            return Handle::encode(slot_idx, slot.generation);
        }
        assert!(
            self.slots.len() < u32::MAX as usize,
            "handle slot space exhausted"
        );
        let slot_idx = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 1,
            data: Some(value),
        });
        Handle::encode(slot_idx, 1)
    }

    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        let slot = self.slots.get(handle.slot() as usize)?;
        (slot.generation == handle.generation()).then_some(slot)
    }

    /// Borrow the value behind `handle`, or `None` if it is stale or was
    /// never issued.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slot(handle)?.data.as_ref()
    }

    /// Mutably borrow the value behind `handle`.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.slot() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.data.as_mut()
    }

    /// Whether `handle` currently resolves.
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Remove and return the value behind `handle`.
    ///
    /// Bumps the slot's generation so `handle` goes stale. Returns `None`
    /// for a stale handle, so removing twice is harmless.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot_idx = handle.slot();
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        let value = slot.data.take()?;
        self.len -= 1;
        slot.generation = slot.generation.wrapping_add(1);
        // Generation 0 is reserved for NULL and for handles from before a wrap.
        if slot.generation != 0 {
            self.free_list.push(slot_idx);
        }
        Some(value)
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HandleTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleTable")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free_list.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_round_trip() {
        let mut table = HandleTable::new();
        let h = table.insert(42i32);
        assert_eq!(table.get(h), Some(&42));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn null_never_resolves() {
        let mut table = HandleTable::new();
        table.insert(1i32);
        assert!(Handle::NULL.is_null());
        assert_eq!(table.get(Handle::NULL), None);
        assert_eq!(table.remove(Handle::NULL), None);
    }

    #[test]
    fn get_mut_modifies_value() {
        let mut table = HandleTable::new();
        let h = table.insert(10i32);
        *table.get_mut(h).unwrap() = 20;
        assert_eq!(table.get(h), Some(&20));
    }

    #[test]
    fn remove_invalidates_handle() {
        let mut table = HandleTable::new();
        let h = table.insert(99i32);
        assert_eq!(table.remove(h), Some(99));
        assert_eq!(table.get(h), None);
        assert_eq!(table.get_mut(h), None);
        assert!(table.is_empty());
    }

    #[test]
    fn double_remove_is_noop() {
        let mut table = HandleTable::new();
        let h = table.insert(1i32);
        assert_eq!(table.remove(h), Some(1));
        assert_eq!(table.remove(h), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut table = HandleTable::new();
        let h1 = table.insert(1i32);
        table.remove(h1);
        let h2 = table.insert(2i32);
        assert_eq!(h1.slot(), h2.slot());
        assert_eq!(h2.generation(), h1.generation() + 1);
        assert_eq!(table.get(h2), Some(&2));
        assert_eq!(table.get(h1), None);
    }

    #[test]
    fn raw_encoding_round_trips() {
        let mut table = HandleTable::new();
        table.insert('a');
        let h = table.insert('b');
        let raw = h.to_raw();
        assert_eq!(raw, (1u64 << 32) | 1);
        assert_eq!(table.get(Handle::from_raw(raw)), Some(&'b'));
        assert_eq!(h.to_string(), "1v1");
    }

    #[test]
    fn unknown_slot_returns_none() {
        let table: HandleTable<i32> = HandleTable::new();
        assert_eq!(table.get(Handle::encode(999, 1)), None);
    }

    #[test]
    fn wrapped_generation_retires_slot() {
        let mut table = HandleTable::new();
        let h = table.insert(1i32);
        table.remove(h);

        table.slots[0].generation = u32::MAX;
        let h2 = table.insert(2i32);
        assert_eq!(h2.generation(), u32::MAX);

        table.remove(h2);
        assert_eq!(table.slots[0].generation, 0);
        assert!(!table.free_list.contains(&0));
        assert_eq!(table.get(Handle::encode(0, 0)), None);

        let h3 = table.insert(3i32);
        assert_ne!(h3.slot(), 0);
    }
}

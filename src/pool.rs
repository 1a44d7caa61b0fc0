/// Fixed-capacity object pool. All slot storage is allocated once in
/// `with_capacity`; acquire and release only move slots between the
/// intrusive free list and the occupied state, so the pool never touches
/// the heap again after construction.
pub struct FixedPool<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
}

/// Opaque reference to one pool slot, valid until that slot is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(u32);

/// A slot holds either a live value or its free-list link, never both.
enum Slot<T> {
    Vacant { next: Option<u32> },
    Occupied(T),
}

impl<T> FixedPool<T> {
    /// Build a pool of exactly `cap` slots, all starting on the free list.
    /// `cap == 0` is legal; every acquire then fails.
    pub fn with_capacity(cap: usize) -> Self {
        let mut slots = Vec::with_capacity(cap);
        for i in 0..cap {
            let next = if i + 1 < cap {
                Some(i as u32 + 1)
            } else {
                None
            };
            slots.push(Slot::Vacant { next });
        }
        Self {
            slots,
            free_head: if cap > 0 { Some(0) } else { None },
            len: 0,
        }
    }

    /// Pop a free slot and construct a value in it. Returns `None` when the
    /// pool is saturated, without calling `init` or changing any state.
    pub fn acquire_with(&mut self, init: impl FnOnce() -> T) -> Option<Handle> {
        let idx = self.free_head?;
        let slot = &mut self.slots[idx as usize];
        let next = match slot {
            Slot::Vacant { next } => *next,
            Slot::Occupied(_) => unreachable!("free list head points at an occupied slot"),
        };
        *slot = Slot::Occupied(init());
        self.free_head = next;
        self.len += 1;
        Some(Handle(idx))
    }

    /// Drop the value in the slot and push the slot back on the free list.
    /// `release(None)` is a safe no-op. Releasing a handle whose slot is
    /// already vacant is a caller bug: asserts in debug builds, leaves the
    /// free list untouched otherwise.
    pub fn release(&mut self, handle: Option<Handle>) {
        let Some(Handle(idx)) = handle else {
            return;
        };
        let Some(slot) = self.slots.get_mut(idx as usize) else {
            debug_assert!(false, "released handle {idx} out of range");
            return;
        };
        if !matches!(slot, Slot::Occupied(_)) {
            debug_assert!(false, "double release of slot {idx}");
            return;
        }
        // Overwriting the variant drops the T in place.
        *slot = Slot::Vacant {
            next: self.free_head,
        };
        self.free_head = Some(idx);
        self.len -= 1;
    }

    pub fn get(&self, Handle(idx): Handle) -> Option<&T> {
        match self.slots.get(idx as usize)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, Handle(idx): Handle) -> Option<&mut T> {
        match self.slots.get_mut(idx as usize)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Number of slots currently handed out.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Free slots remaining before the next acquire fails.
    pub fn available(&self) -> usize {
        self.slots.len() - self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk the free list and cross-check it against the slot states:
    /// every vacant slot appears exactly once, no occupied slot appears.
    fn audit<T>(pool: &FixedPool<T>) {
        let mut seen = vec![false; pool.slots.len()];
        let mut cursor = pool.free_head;
        let mut free_len = 0;
        while let Some(idx) = cursor {
            let idx = idx as usize;
            assert!(!seen[idx], "slot {idx} linked twice in the free list");
            seen[idx] = true;
            free_len += 1;
            cursor = match &pool.slots[idx] {
                Slot::Vacant { next } => *next,
                Slot::Occupied(_) => panic!("occupied slot {idx} on the free list"),
            };
        }
        for (idx, slot) in pool.slots.iter().enumerate() {
            if matches!(slot, Slot::Vacant { .. }) {
                assert!(seen[idx], "vacant slot {idx} unreachable from free list");
            }
        }
        assert_eq!(free_len, pool.available());
        assert_eq!(free_len + pool.len(), pool.capacity());
    }

    #[test]
    fn capacity_is_a_hard_limit() {
        let mut pool = FixedPool::with_capacity(3);
        let handles: Vec<_> = (0..3)
            .map(|i| pool.acquire_with(|| i).expect("pool has room"))
            .collect();
        assert_eq!(pool.len(), 3);
        assert!(pool.acquire_with(|| 99).is_none());
        // A failed acquire must not run the initializer or change counts.
        assert_eq!(pool.available(), 0);
        audit(&pool);

        pool.release(Some(handles[1]));
        assert_eq!(pool.available(), 1);
        assert!(pool.acquire_with(|| 42).is_some());
        audit(&pool);
    }

    #[test]
    fn zero_capacity_always_refuses() {
        let mut pool: FixedPool<u8> = FixedPool::with_capacity(0);
        assert!(pool.acquire_with(|| 0).is_none());
        assert_eq!(pool.capacity(), 0);
        audit(&pool);
    }

    #[test]
    fn release_none_is_a_noop() {
        let mut pool = FixedPool::with_capacity(2);
        let _h = pool.acquire_with(|| 7u32);
        let (len, avail) = (pool.len(), pool.available());
        pool.release(None);
        assert_eq!((pool.len(), pool.available()), (len, avail));
        audit(&pool);
    }

    #[test]
    fn round_trip_reuses_the_slot() {
        let mut pool = FixedPool::with_capacity(4);
        let before = pool.available();
        let h = pool.acquire_with(|| 1u32).unwrap();
        pool.release(Some(h));
        assert_eq!(pool.available(), before);
        // Free list is LIFO, so the same slot comes straight back.
        let h2 = pool.acquire_with(|| 2u32).unwrap();
        assert_eq!(h, h2);
        audit(&pool);
    }

    #[test]
    fn values_survive_until_release() {
        let mut pool = FixedPool::with_capacity(2);
        let a = pool.acquire_with(|| String::from("alpha")).unwrap();
        let b = pool.acquire_with(|| String::from("beta")).unwrap();
        assert_eq!(pool.get(a).map(String::as_str), Some("alpha"));
        pool.get_mut(b).unwrap().push('!');
        assert_eq!(pool.get(b).map(String::as_str), Some("beta!"));
        pool.release(Some(a));
        assert!(pool.get(a).is_none());
        assert_eq!(pool.get(b).map(String::as_str), Some("beta!"));
    }

    #[test]
    #[should_panic(expected = "double release")]
    fn double_release_asserts_in_debug() {
        let mut pool = FixedPool::with_capacity(1);
        let h = pool.acquire_with(|| 0u8).unwrap();
        pool.release(Some(h));
        pool.release(Some(h));
    }

    #[test]
    fn randomized_churn_keeps_free_list_sound() {
        let mut rng = fastrand::Rng::with_seed(0x5EED);
        let mut pool = FixedPool::with_capacity(16);
        let mut live = Vec::new();
        for step in 0..2000 {
            if !live.is_empty() && (rng.bool() || pool.available() == 0) {
                let h = live.swap_remove(rng.usize(0..live.len()));
                pool.release(Some(h));
            } else if let Some(h) = pool.acquire_with(|| step) {
                live.push(h);
            }
            assert_eq!(pool.len(), live.len());
            audit(&pool);
        }
    }
}

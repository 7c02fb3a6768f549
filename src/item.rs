use std::cmp::min;
use std::collections::hash_map::RandomState;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};
use std::ops::{Index, IndexMut};

use crate::reference::SetRef;

/// A deduplicated value together with the sets that currently hold it.
///
/// Items are unique by value: inserting an equal value anywhere in the
/// family resolves to the same item slot.
pub struct Item<T> {
    value: T,
    holders: HashSet<SetRef>,
}

impl<T> Item<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            holders: HashSet::new(),
        }
    }

    /// Get the reference to the underlying value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Get the sets that currently contain this item.
    pub fn holders(&self) -> &HashSet<SetRef> {
        &self.holders
    }

    pub(crate) fn holders_mut(&mut self) -> &mut HashSet<SetRef> {
        &mut self.holders
    }
}

struct Slot<T> {
    item: Option<Item<T>>,
    next: usize,
}

impl<T> Slot<T> {
    fn empty() -> Self {
        Self { item: None, next: 0 }
    }
}

/// Interning arena for items.
///
/// Values are deduplicated through a bucket array with intrusive chains
/// threaded through the slots (`next` indices, 0 terminated). Slot 0 is the
/// chain sentry and is never handed out. Released slots are found again
/// through the `min_free` scan, so the arena reuses indices.
pub struct ItemTable<T> {
    slots: Vec<Slot<T>>,

    buckets: Vec<usize>,
    bitmask: u64,
    hasher: RandomState,

    /// Index of the first *possibly* free (vacant) slot.
    min_free: usize,
    /// Index of the last slot ever handed out.
    last_index: usize,
    /// Number of live items.
    real_size: usize,
}

impl<T> ItemTable<T> {
    /// Create a new table with `2^min(bits, 16)` buckets.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bucket bits should be in the range 0..=31");

        let buckets_bits = min(bits, 16);
        let buckets_size = 1 << buckets_bits;
        let buckets = vec![0; buckets_size];
        let bitmask = (buckets_size - 1) as u64;

        Self {
            slots: vec![Slot::empty()],
            buckets,
            bitmask,
            hasher: RandomState::new(),
            min_free: 1,
            last_index: 0,
            real_size: 0,
        }
    }

    /// Get the index of the last slot ever handed out.
    pub fn size(&self) -> usize {
        self.last_index
    }
    /// Get the number of live items.
    pub fn real_size(&self) -> usize {
        self.real_size
    }

    /// Get the reference to the item at the given index.
    pub fn item(&self, index: usize) -> &Item<T> {
        assert_ne!(index, 0, "Index is 0");
        self.slots[index].item.as_ref().expect("Slot is vacant")
    }
    /// Get the mutable reference to the item at the given index.
    pub fn item_mut(&mut self, index: usize) -> &mut Item<T> {
        assert_ne!(index, 0, "Index is 0");
        self.slots[index].item.as_mut().expect("Slot is vacant")
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        self.item(index).value()
    }

    /// Iterate over the indices of live items.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.last_index).filter(move |&i| self.slots[i].item.is_some())
    }

    fn next(&self, index: usize) -> usize {
        assert_ne!(index, 0, "Index is 0");
        self.slots[index].next
    }

    /// Store a new item in a vacant slot and return its index.
    fn alloc(&mut self, value: T) -> usize {
        let index = (self.min_free..=self.last_index)
            .find(|&i| self.slots[i].item.is_none())
            .unwrap_or_else(|| {
                self.last_index += 1;
                self.last_index
            });

        if index == self.slots.len() {
            self.slots.push(Slot::empty());
        }

        self.slots[index].item = Some(Item::new(value));
        self.slots[index].next = 0;
        self.min_free = index + 1;
        self.real_size += 1;

        index
    }
}

impl<T> ItemTable<T>
where
    T: Eq + Hash,
{
    fn bucket_index(&self, value: &T) -> usize {
        (self.hasher.hash_one(value) & self.bitmask) as usize
    }

    /// Intern a value: return the index of the existing item with an equal
    /// value, or store the value in a new slot.
    pub fn intern(&mut self, value: T) -> usize {
        let bucket_index = self.bucket_index(&value);
        let mut index = self.buckets[bucket_index];

        if index == 0 {
            // Create a new item and put it into the bucket.
            let i = self.alloc(value);
            self.buckets[bucket_index] = i;
            return i;
        }

        loop {
            assert!(index > 0);

            if &value == self.value(index) {
                // The item already exists.
                return index;
            }

            let next = self.next(index);

            if next == 0 {
                // Create a new item and append it to the bucket.
                let i = self.alloc(value);
                self.slots[index].next = i;
                return i;
            } else {
                // Go to the next item in the bucket.
                index = next;
            }
        }
    }

    /// Find the index of the item with an equal value, if it is interned.
    pub fn lookup(&self, value: &T) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(value)];

        while index != 0 {
            if value == self.value(index) {
                return Some(index);
            }
            index = self.next(index);
        }

        None
    }

    /// Release the slot at the given index, unlinking it from its bucket
    /// chain and dropping the value.
    pub fn release(&mut self, index: usize) {
        assert_ne!(index, 0, "Index is 0");

        let bucket_index = self.bucket_index(self.value(index));
        let mut i = self.buckets[bucket_index];
        if i == index {
            self.buckets[bucket_index] = self.slots[index].next;
        } else {
            while self.next(i) != index {
                i = self.next(i);
                assert_ne!(i, 0, "Slot is not in its bucket chain");
            }
            self.slots[i].next = self.slots[index].next;
        }

        self.slots[index].item = None;
        self.slots[index].next = 0;
        self.min_free = min(self.min_free, index);
        self.real_size -= 1;
    }
}

impl<T> Index<usize> for ItemTable<T> {
    type Output = Item<T>;

    fn index(&self, index: usize) -> &Self::Output {
        self.item(index)
    }
}

impl<T> IndexMut<usize> for ItemTable<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.item_mut(index)
    }
}

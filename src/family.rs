use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::item::ItemTable;
use crate::reference::SetRef;

pub(crate) struct SetNode {
    pub(crate) items: HashSet<usize>,
    pub(crate) parents: HashSet<SetRef>,
    pub(crate) children: HashSet<SetRef>,
    pub(crate) unions: HashMap<SetRef, SetRef>,
    pub(crate) intersections: HashMap<SetRef, SetRef>,
}

impl SetNode {
    fn new() -> Self {
        Self {
            items: HashSet::new(),
            parents: HashSet::new(),
            children: HashSet::new(),
            unions: HashMap::new(),
            intersections: HashMap::new(),
        }
    }
}

/// Manager owning a hierarchy of sets and the items they share.
///
/// Sets are addressed through [`SetRef`] handles. Parent/child edge sets are
/// maintained as the full transitive closure, so membership changes fan out
/// in a single flat pass and ancestry queries are O(1).
pub struct Family<T> {
    sets: Vec<SetNode>,
    items: ItemTable<T>,
}

impl<T> Family<T> {
    /// Create a new family with `2^min(bits, 16)` item buckets.
    pub fn new(bits: usize) -> Self {
        Self {
            sets: Vec::new(),
            items: ItemTable::new(bits),
        }
    }
}

impl<T> Default for Family<T> {
    fn default() -> Self {
        Family::new(12)
    }
}

impl<T> Debug for Family<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Family")
            .field("sets", &self.sets.len())
            .field("items", &self.items.real_size())
            .field("slots", &self.items.size())
            .finish()
    }
}

impl<T> Family<T> {
    pub(crate) fn node(&self, set: SetRef) -> &SetNode {
        &self.sets[set.index()]
    }
    fn node_mut(&mut self, set: SetRef) -> &mut SetNode {
        &mut self.sets[set.index()]
    }
    pub(crate) fn items_table(&self) -> &ItemTable<T> {
        &self.items
    }

    /// Register `parent` above `child`, keeping the edge sets symmetric.
    fn link(&mut self, child: SetRef, parent: SetRef) {
        self.node_mut(child).parents.insert(parent);
        self.node_mut(parent).children.insert(child);
    }

    /// Create a fresh empty set with no relatives.
    pub fn new_set(&mut self) -> SetRef {
        let set = SetRef::new(self.sets.len() as u32);
        self.sets.push(SetNode::new());
        debug!("new_set() -> {}", set);
        set
    }

    /// Get the number of sets in the family.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }
    /// Get the number of distinct live items in the family.
    pub fn num_items(&self) -> usize {
        self.items.real_size()
    }

    /// Get the number of items in the set.
    pub fn len(&self, set: SetRef) -> usize {
        self.node(set).items.len()
    }
    /// Check if the set has no items.
    pub fn is_empty(&self, set: SetRef) -> bool {
        self.node(set).items.is_empty()
    }
    /// Iterate over the values in the set. Order is unspecified.
    pub fn values(&self, set: SetRef) -> impl Iterator<Item = &T> + '_ {
        self.node(set)
            .items
            .iter()
            .map(move |&index| self.items.value(index))
    }

    /// Create a new set immediately below this one. The child starts with a
    /// copy of the set's items, inherits all of its children, and is
    /// inherited by all of its ancestors.
    pub fn spawn_child(&mut self, set: SetRef) -> SetRef {
        debug!("spawn_child({})", set);

        let node = self.node(set);
        let parents: Vec<SetRef> = node.parents.iter().copied().collect();
        let children: Vec<SetRef> = node.children.iter().copied().collect();
        let items: Vec<usize> = node.items.iter().copied().collect();

        let child = self.new_set();

        self.link(child, set);
        for &parent in &parents {
            self.link(child, parent);
        }
        for &grandchild in &children {
            self.link(grandchild, child);
        }

        for &index in &items {
            self.node_mut(child).items.insert(index);
            self.items.item_mut(index).holders_mut().insert(child);
        }

        child
    }

    /// Create a new set immediately above this one: the mirror image of
    /// [`spawn_child`](Self::spawn_child).
    pub fn spawn_parent(&mut self, set: SetRef) -> SetRef {
        debug!("spawn_parent({})", set);

        let node = self.node(set);
        let parents: Vec<SetRef> = node.parents.iter().copied().collect();
        let children: Vec<SetRef> = node.children.iter().copied().collect();
        let items: Vec<usize> = node.items.iter().copied().collect();

        let parent = self.new_set();

        self.link(set, parent);
        for &grandparent in &parents {
            self.link(parent, grandparent);
        }
        for &child in &children {
            self.link(child, parent);
        }

        for &index in &items {
            self.node_mut(parent).items.insert(index);
            self.items.item_mut(index).holders_mut().insert(parent);
        }

        parent
    }

    /// Check whether `a` lies below `b` in the hierarchy. Edge sets are
    /// transitively closed, so this is a single lookup.
    pub fn is_child_of(&self, a: SetRef, b: SetRef) -> bool {
        self.node(a).parents.contains(&b)
    }
    /// Check whether `a` lies above `b` in the hierarchy.
    pub fn is_parent_of(&self, a: SetRef, b: SetRef) -> bool {
        self.node(a).children.contains(&b)
    }
    /// Get the number of ancestors of the set, transitive.
    pub fn num_parent_sets(&self, set: SetRef) -> usize {
        self.node(set).parents.len()
    }
    /// Get the number of descendants of the set, transitive.
    pub fn num_child_sets(&self, set: SetRef) -> usize {
        self.node(set).children.len()
    }
    /// Iterate over the ancestors of the set.
    pub fn parent_sets(&self, set: SetRef) -> impl Iterator<Item = SetRef> + '_ {
        self.node(set).parents.iter().copied()
    }
    /// Iterate over the descendants of the set.
    pub fn child_sets(&self, set: SetRef) -> impl Iterator<Item = SetRef> + '_ {
        self.node(set).children.iter().copied()
    }

    /// Get the union of two sets: the smallest set in the family containing
    /// both. The result is memoized symmetrically, so repeated calls in
    /// either operand order return the same set. If one operand already
    /// covers the other, that operand is returned and nothing is allocated.
    pub fn union_with(&mut self, a: SetRef, b: SetRef) -> SetRef {
        debug!("union_with({}, {})", a, b);

        if a == b {
            return a;
        }
        if self.node(a).children.contains(&b) {
            debug!("union_with({}, {}) => {}", a, b, a);
            return a;
        }
        if self.node(a).parents.contains(&b) {
            debug!("union_with({}, {}) => {}", a, b, b);
            return b;
        }

        if let Some(&res) = self.node(a).unions.get(&b) {
            debug!("cache: union_with({}, {}) -> {}", a, b, res);
            return res;
        }

        // Everything at or below either operand lies below the union.
        let mut below: HashSet<SetRef> = HashSet::new();
        below.insert(a);
        below.insert(b);
        below.extend(self.node(a).children.iter().copied());
        below.extend(self.node(b).children.iter().copied());

        let mut items: HashSet<usize> = self.node(a).items.clone();
        items.extend(self.node(b).items.iter().copied());

        let res = self.new_set();
        for &child in &below {
            self.link(child, res);
        }
        for &index in &items {
            self.items.item_mut(index).holders_mut().insert(res);
        }
        self.node_mut(res).items = items;

        debug!("computed: union_with({}, {}) -> {}", a, b, res);
        self.node_mut(a).unions.insert(b, res);
        self.node_mut(b).unions.insert(a, res);

        res
    }

    /// Get the intersection of two sets: the largest set in the family
    /// contained in both. Memoized like [`union_with`](Self::union_with);
    /// if one operand already covers the other, the covered operand is
    /// returned and nothing is allocated.
    pub fn intersection_with(&mut self, a: SetRef, b: SetRef) -> SetRef {
        debug!("intersection_with({}, {})", a, b);

        if a == b {
            return a;
        }
        if self.node(a).children.contains(&b) {
            debug!("intersection_with({}, {}) => {}", a, b, b);
            return b;
        }
        if self.node(a).parents.contains(&b) {
            debug!("intersection_with({}, {}) => {}", a, b, a);
            return a;
        }

        if let Some(&res) = self.node(a).intersections.get(&b) {
            debug!("cache: intersection_with({}, {}) -> {}", a, b, res);
            return res;
        }

        // Everything at or above either operand lies above the intersection.
        let mut above: HashSet<SetRef> = HashSet::new();
        above.insert(a);
        above.insert(b);
        above.extend(self.node(a).parents.iter().copied());
        above.extend(self.node(b).parents.iter().copied());

        let items: HashSet<usize> = self
            .node(a)
            .items
            .intersection(&self.node(b).items)
            .copied()
            .collect();

        let res = self.new_set();
        for &parent in &above {
            self.link(res, parent);
        }
        for &index in &items {
            self.items.item_mut(index).holders_mut().insert(res);
        }
        self.node_mut(res).items = items;

        debug!("computed: intersection_with({}, {}) -> {}", a, b, res);
        self.node_mut(a).intersections.insert(b, res);
        self.node_mut(b).intersections.insert(a, res);

        res
    }

    /// Get the number of memoized unions held by the set.
    pub fn num_unions(&self, set: SetRef) -> usize {
        self.node(set).unions.len()
    }
    /// Get the number of memoized intersections held by the set.
    pub fn num_intersections(&self, set: SetRef) -> usize {
        self.node(set).intersections.len()
    }
}

impl<T> Family<T>
where
    T: Eq + Hash,
{
    /// Insert a value into the set, propagating the insertion to every
    /// ancestor. Returns `false` if the set already contains the value.
    pub fn add_item(&mut self, set: SetRef, value: T) -> bool {
        let index = self.items.intern(value);
        debug!("add_item({}, @{})", set, index);

        if !self.node_mut(set).items.insert(index) {
            return false;
        }
        self.items.item_mut(index).holders_mut().insert(set);

        let ancestors: Vec<SetRef> = self.node(set).parents.iter().copied().collect();
        for parent in ancestors {
            if self.node_mut(parent).items.insert(index) {
                self.items.item_mut(index).holders_mut().insert(parent);
            }
        }

        true
    }

    /// Remove a value from the set, propagating the removal to every
    /// descendant. Returns `false` if the set does not contain the value.
    pub fn remove_item(&mut self, set: SetRef, value: &T) -> bool {
        let index = match self.items.lookup(value) {
            Some(index) => index,
            None => return false,
        };
        debug!("remove_item({}, @{})", set, index);

        if !self.node_mut(set).items.remove(&index) {
            return false;
        }
        self.items.item_mut(index).holders_mut().remove(&set);

        let descendants: Vec<SetRef> = self.node(set).children.iter().copied().collect();
        for child in descendants {
            if self.node_mut(child).items.remove(&index) {
                self.items.item_mut(index).holders_mut().remove(&child);
            }
        }

        if self.items.item(index).holders().is_empty() {
            self.items.release(index);
        }

        true
    }

    /// Check whether the set contains the value. No propagation.
    pub fn contains_item(&self, set: SetRef, value: &T) -> bool {
        match self.items.lookup(value) {
            Some(index) => self.node(set).items.contains(&index),
            None => false,
        }
    }

    /// Remove the value from every set that holds it and discard the item.
    /// Returns `false` if no set contains the value.
    pub fn remove_from_all_sets(&mut self, value: &T) -> bool {
        let index = match self.items.lookup(value) {
            Some(index) => index,
            None => return false,
        };
        debug!("remove_from_all_sets(@{})", index);

        let holders: Vec<SetRef> = self.items.item(index).holders().iter().copied().collect();
        for set in holders {
            self.node_mut(set).items.remove(&index);
        }
        self.items.release(index);

        true
    }

    /// Iterate over the sets that currently contain the value.
    pub fn containing_sets(&self, value: &T) -> impl Iterator<Item = SetRef> + '_ {
        self.items
            .lookup(value)
            .into_iter()
            .flat_map(move |index| self.items.item(index).holders().iter().copied())
    }
}

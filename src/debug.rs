//! Debug utilities for inspecting set hierarchies.
//!
//! This module provides helpers for exploring and validating families.
//! These are primarily useful in tests and during development.

use std::fmt::Debug;
use std::fmt::Write;

use crate::family::Family;
use crate::reference::SetRef;

/// Detailed information about a single set.
#[derive(Debug, Clone)]
pub struct SetInfo {
    /// The handle of this set
    pub set: SetRef,
    /// Number of items in the set
    pub len: usize,
    /// Number of ancestors (transitive)
    pub parents: usize,
    /// Number of descendants (transitive)
    pub children: usize,
    /// Number of memoized unions
    pub unions: usize,
    /// Number of memoized intersections
    pub intersections: usize,
}

impl std::fmt::Display for SetInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(len={}, parents={}, children={}, unions={}, intersections={})",
            self.set, self.len, self.parents, self.children, self.unions, self.intersections,
        )
    }
}

/// A listing of a set and all of its descendants.
#[derive(Debug, Clone)]
pub struct FamilyTree {
    pub root: SetRef,
    pub sets: Vec<SetInfo>,
}

impl std::fmt::Display for FamilyTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Set tree (root = {}):", self.root)?;
        for info in &self.sets {
            writeln!(f, "  {}", info)?;
        }
        Ok(())
    }
}

fn refs(mut refs: Vec<SetRef>) -> String {
    refs.sort();
    let parts: Vec<String> = refs.iter().map(|r| r.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

impl<T> Family<T> {
    /// Get detailed information about a single set.
    pub fn set_info(&self, set: SetRef) -> SetInfo {
        SetInfo {
            set,
            len: self.len(set),
            parents: self.num_parent_sets(set),
            children: self.num_child_sets(set),
            unions: self.num_unions(set),
            intersections: self.num_intersections(set),
        }
    }

    /// Get a listing of a set and all of its descendants, ordered by handle.
    pub fn debug_tree(&self, root: SetRef) -> FamilyTree {
        let mut refs: Vec<SetRef> = self.child_sets(root).collect();
        refs.push(root);
        refs.sort();

        let sets = refs.into_iter().map(|set| self.set_info(set)).collect();

        FamilyTree { root, sets }
    }

    /// Print a compact representation of a set and its descendants.
    pub fn debug_string(&self, root: SetRef) -> String {
        let mut result = String::new();
        let tree = self.debug_tree(root);

        writeln!(&mut result, "Set tree {} (size={}):", root, tree.sets.len()).unwrap();
        for info in &tree.sets {
            writeln!(&mut result, "  {}", info).unwrap();
        }
        result
    }

    /// Verify the structural invariants of the whole family.
    ///
    /// Returns a list of human-readable violations: edge asymmetries, gaps
    /// in the transitive closure, sets not covered by their ancestors,
    /// items disagreeing with their holders, and one-sided memo entries.
    /// An empty list means the hierarchy is consistent.
    pub fn verify_hierarchy(&self) -> Vec<String> {
        let mut failures = Vec::new();
        let all: Vec<SetRef> = (0..self.num_sets()).map(|i| SetRef::new(i as u32)).collect();

        for &set in &all {
            let node = self.node(set);

            for &parent in &node.parents {
                if parent == set {
                    failures.push(format!("{} is its own parent", set));
                }
                if !self.node(parent).children.contains(&set) {
                    failures.push(format!(
                        "{} lists parent {}, which does not list it as a child",
                        set, parent
                    ));
                }
                for &grandparent in &self.node(parent).parents {
                    if !node.parents.contains(&grandparent) {
                        failures.push(format!(
                            "closure gap: {} has parent {} with parent {}, missing from {}",
                            set, parent, grandparent, set
                        ));
                    }
                }
                if !node.items.is_subset(&self.node(parent).items) {
                    failures.push(format!("items of {} are not a subset of {}", set, parent));
                }
            }

            for &child in &node.children {
                if child == set {
                    failures.push(format!("{} is its own child", set));
                }
                if !self.node(child).parents.contains(&set) {
                    failures.push(format!(
                        "{} lists child {}, which does not list it as a parent",
                        set, child
                    ));
                }
            }

            for &index in &node.items {
                if !self.items_table().item(index).holders().contains(&set) {
                    failures.push(format!("{} holds @{}, which does not list it", set, index));
                }
            }

            for (&other, &res) in &node.unions {
                if self.node(other).unions.get(&set) != Some(&res) {
                    failures.push(format!(
                        "union memo of ({}, {}) is not symmetric",
                        set, other
                    ));
                }
            }
            for (&other, &res) in &node.intersections {
                if self.node(other).intersections.get(&set) != Some(&res) {
                    failures.push(format!(
                        "intersection memo of ({}, {}) is not symmetric",
                        set, other
                    ));
                }
            }
        }

        for index in self.items_table().indices() {
            for &holder in self.items_table().item(index).holders() {
                if !self.node(holder).items.contains(&index) {
                    failures.push(format!(
                        "@{} lists holder {}, which does not contain it",
                        index, holder
                    ));
                }
            }
        }

        failures
    }
}

impl<T> Family<T>
where
    T: Debug,
{
    /// Dump the complete family state for debugging.
    pub fn dump_state(&self) -> String {
        let mut result = String::new();

        writeln!(&mut result, "=== Family State ===").unwrap();

        writeln!(&mut result, "Sets: count={}", self.num_sets()).unwrap();
        for i in 0..self.num_sets() {
            let set = SetRef::new(i as u32);
            let node = self.node(set);
            let mut items: Vec<usize> = node.items.iter().copied().collect();
            items.sort_unstable();
            let values: Vec<&T> = items
                .iter()
                .map(|&index| self.items_table().value(index))
                .collect();
            writeln!(
                &mut result,
                "  {}: items={:?}, parents={}, children={}",
                set,
                values,
                refs(node.parents.iter().copied().collect()),
                refs(node.children.iter().copied().collect()),
            )
            .unwrap();
        }

        writeln!(&mut result, "Items: count={}", self.num_items()).unwrap();
        for index in self.items_table().indices() {
            let item = self.items_table().item(index);
            writeln!(
                &mut result,
                "  @{} = {:?}: holders={}",
                index,
                item.value(),
                refs(item.holders().iter().copied().collect()),
            )
            .unwrap();
        }

        result
    }
}

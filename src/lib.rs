//! # nested-sets: hierarchies of mutable sets in Rust
//!
//! **`nested-sets`** is a manager-centric library for working with **nested sets**:
//! mutable sets of items arranged in a subset hierarchy, where membership changes
//! propagate along the hierarchy automatically, and where any two sets combine into
//! a memoized union or intersection.
//!
//! ## What is a nested set?
//!
//! A nested set is a mutable set that knows its place in a subset hierarchy: every
//! ancestor is a superset, every descendant is a subset. Inserting into a set also
//! inserts into all of its ancestors; removing from a set also removes from all of
//! its descendants. The hierarchy is grown by spawning children or parents of an
//! existing set, or by taking the union or intersection of two sets, which becomes
//! their least common parent or greatest common child.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All operations go through the [`Family`][crate::family::Family] manager. Items are interned once and shared by every set that holds them.
//! - **Safe & Efficient**: Lightweight [`SetRef`][crate::reference::SetRef] handles reference sets. Handle equality is set identity, so comparing sets is O(1) and never touches contents.
//! - **Flat Propagation**: Parent/child edges are maintained as the full transitive closure, so a membership change is a single pass over the edge set and `is_child_of` is a single lookup.
//! - **Memoized Algebra**: Union and intersection results are cached symmetrically in both operands, so repeated calls in either order return the identical set.
//!
//! ## Quick Start
//!
//! Add `nested-sets` to your `Cargo.toml` and start building hierarchies:
//!
//! ```toml
//! [dependencies]
//! nested-sets = "0.1"
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use nested_sets::family::Family;
//!
//! // 1. Initialize the manager
//! let mut family = Family::default();
//!
//! // 2. Create sets and fill them
//! let a = family.new_set();
//! family.add_item(a, 1);
//! let b = family.new_set();
//! family.add_item(b, 2);
//!
//! // 3. Combine them: the union contains both contents
//! let union = family.union_with(a, b);
//! assert_eq!(family.len(union), 2);
//! assert!(family.is_parent_of(union, a));
//!
//! // 4. Membership changes propagate along the hierarchy
//! family.add_item(a, 3);
//! assert!(family.contains_item(union, &3));
//!
//! // 5. Results are memoized: the same handle comes back every time
//! assert_eq!(family.union_with(b, a), union);
//! ```
//!
//! ## Core Components
//!
//! - **[`family`]**: The heart of the library. Contains the [`Family`][crate::family::Family] manager and core algorithms.
//! - **[`item`]**: The interning arena holding item values and their back-references.
//! - **[`dot`]**: Utilities for visualizing hierarchies using Graphviz.
//! - **[`debug`]**: Introspection helpers and structural invariant checking.
//!
//! For a deep dive into the implementation details, check the [`family`] module documentation.

pub mod debug;
pub mod dot;
pub mod family;
pub mod item;
pub mod reference;

//! Set hierarchy to DOT (Graphviz) conversion.
//!
//! This module provides functionality to convert a family of nested sets into DOT format,
//! which can be visualized using Graphviz tools like `dot`, `neato`, or online viewers.
//!
//! # DOT Format
//!
//! The generated DOT output follows these conventions:
//! - **Set nodes** are rendered as ellipses labeled with the set handle and its item count
//! - **Root sets** (the ones passed to [`to_dot`](crate::family::Family::to_dot)) are
//!   rendered as rectangles
//! - **Edges** point from a set to its immediate subsets, so supersets sit above subsets
//!
//! Edge sets are stored as the full transitive closure; the exporter emits only the
//! transitive reduction, so the picture stays a readable Hasse diagram.
//!
//! # Examples
//!
//! ```
//! use nested_sets::family::Family;
//!
//! let mut family = Family::default();
//! let a = family.new_set();
//! family.add_item(a, 1);
//! let b = family.new_set();
//! family.add_item(b, 2);
//! let union = family.union_with(a, b);
//!
//! let dot = family.to_dot(&[union]).unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::BTreeSet;

use crate::family::Family;
use crate::reference::SetRef;

/// Configuration options for DOT output generation.
///
/// This struct allows customization of the visual appearance of the generated
/// DOT graph. Use `DotConfig::default()` for standard settings.
///
/// # Examples
///
/// ```
/// use nested_sets::family::Family;
/// use nested_sets::dot::DotConfig;
///
/// let mut family = Family::<i32>::default();
/// let set = family.new_set();
/// let config = DotConfig {
///     set_shape: "circle",
///     ..DotConfig::default()
/// };
///
/// let dot = family.to_dot_with_config(&[set], &config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for set nodes (default: "ellipse")
    pub set_shape: &'static str,
    /// Shape for root set nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for subset edges (default: "solid")
    pub edge_style: &'static str,
    /// Whether node labels include the item count (default: true)
    pub show_len: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            set_shape: "ellipse",
            root_shape: "rect",
            edge_style: "solid",
            show_len: true,
        }
    }
}

impl<T> Family<T> {
    /// Converts a set hierarchy to DOT (Graphviz) format.
    ///
    /// The graph contains the given roots and every descendant of theirs.
    /// Supersets are drawn above subsets, and only immediate subset edges
    /// are emitted (the transitive reduction of the stored closure), so the
    /// output stays a readable Hasse diagram.
    ///
    /// # Arguments
    ///
    /// * `roots` - The sets to start from. All of their descendants are
    ///   included in the output.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - A DOT-formatted representation of the hierarchy
    /// * `Err(std::fmt::Error)` - If string formatting fails (rare)
    ///
    /// # Examples
    ///
    /// ```
    /// use nested_sets::family::Family;
    ///
    /// let mut family = Family::default();
    /// let parent = family.new_set();
    /// let child = family.spawn_child(parent);
    /// family.add_item(child, 42);
    ///
    /// let dot = family.to_dot(&[parent]).unwrap();
    /// println!("{}", dot);
    ///
    /// // To render the graph:
    /// // std::fs::write("output.dot", dot).unwrap();
    /// // Then run: dot -Tpng output.dot -o output.png
    /// ```
    pub fn to_dot(&self, roots: &[SetRef]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    /// Converts a set hierarchy to DOT format with custom configuration.
    ///
    /// This is a more flexible version of `to_dot` that allows customization
    /// of the visual appearance through a [`DotConfig`].
    pub fn to_dot_with_config(
        &self,
        roots: &[SetRef],
        config: &DotConfig,
    ) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.set_shape)?;

        // Collect the roots and everything below them, ordered by handle.
        let mut included = BTreeSet::new();
        for &root in roots {
            included.insert(root);
            included.extend(self.child_sets(root));
        }

        for &set in &included {
            let label = if config.show_len {
                format!("{} ({})", set, self.len(set))
            } else {
                set.to_string()
            };
            if roots.contains(&set) {
                writeln!(dot, "{} [shape={}, label=\"{}\"];", set, config.root_shape, label)?;
            } else {
                writeln!(dot, "{} [label=\"{}\"];", set, label)?;
            }
        }

        // Emit only immediate subset edges: a child is dropped when it is
        // reachable through another child of the same set.
        for &set in &included {
            let children: BTreeSet<SetRef> = self
                .child_sets(set)
                .filter(|c| included.contains(c))
                .collect();
            for &child in &children {
                let covered = children
                    .iter()
                    .any(|&other| other != child && self.is_parent_of(other, child));
                if !covered {
                    writeln!(dot, "{} -> {} [style={}];", set, child, config.edge_style)?;
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Basic test: verify DOT output is generated without errors
    #[test]
    fn test_to_dot_basic() {
        let mut family = Family::default();
        let set = family.new_set();
        family.add_item(set, 1);

        let dot = family.to_dot(&[set]).unwrap();

        assert!(dot.starts_with("digraph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("s0 [shape=rect, label=\"s0 (1)\"];"));
    }

    /// A chain renders with immediate edges only
    #[test]
    fn test_to_dot_chain() {
        let mut family = Family::<i32>::default();
        let grandparent = family.new_set();
        let parent = family.spawn_child(grandparent);
        let child = family.spawn_child(parent);

        let dot = family.to_dot(&[grandparent]).unwrap();

        assert!(dot.contains(&format!("{} -> {}", grandparent, parent)));
        assert!(dot.contains(&format!("{} -> {}", parent, child)));
        assert!(!dot.contains(&format!("{} -> {}", grandparent, child)));
    }

    /// A union/intersection diamond keeps its four edges
    #[test]
    fn test_to_dot_diamond() {
        let mut family = Family::<i32>::default();
        let a = family.new_set();
        let b = family.new_set();
        let union = family.union_with(a, b);
        let intersection = family.intersection_with(a, b);

        let dot = family.to_dot(&[union]).unwrap();

        assert!(dot.contains(&format!("{} -> {}", union, a)));
        assert!(dot.contains(&format!("{} -> {}", union, b)));
        assert!(dot.contains(&format!("{} -> {}", a, intersection)));
        assert!(dot.contains(&format!("{} -> {}", b, intersection)));
        assert!(!dot.contains(&format!("{} -> {}", union, intersection)));
    }

    /// Test with custom configuration
    #[test]
    fn test_to_dot_with_config() {
        let mut family = Family::default();
        let set = family.new_set();
        family.add_item(set, 1);

        let config = DotConfig {
            show_len: false,
            root_shape: "box",
            ..DotConfig::default()
        };

        let dot = family.to_dot_with_config(&[set], &config).unwrap();
        assert!(dot.contains("s0 [shape=box, label=\"s0\"];"));
    }

    /// Helper test to write a DOT file for manual inspection (disabled by default)
    #[test]
    #[ignore]
    fn test_write_dot_file() {
        let mut family = Family::default();
        let a = family.new_set();
        family.add_item(a, 10);
        let b = family.new_set();
        family.add_item(b, 20);
        let union = family.union_with(a, b);
        family.intersection_with(a, b);

        let dot = family.to_dot(&[union]).unwrap();

        std::fs::write("test_output.dot", &dot).unwrap();
        println!("DOT output:\n{}", dot);
    }
}

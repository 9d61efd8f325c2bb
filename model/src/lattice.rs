//! Subsumption lattice over identifiers.
//!
//! Edges point from a child to its direct parents. [`Lattice::finish`]
//! removes every edge that closes a cycle and then memoizes the transitive
//! closure, so subsumption queries never walk the graph.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A cycle found while finishing a lattice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Members in traversal order. The dropped edge runs from the last
    /// member back to the first.
    pub members: Vec<String>,
}

impl Cycle {
    /// The `(child, parent)` edge that was removed to break the cycle.
    #[must_use]
    pub fn dropped_edge(&self) -> Option<(&str, &str)> {
        match (self.members.last(), self.members.first()) {
            (Some(child), Some(parent)) => Some((child, parent)),
            _ => None,
        }
    }

    /// Renders the cycle as `a -> b -> a`.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut path = self.members.clone();
        if let Some(first) = self.members.first() {
            path.push(first.clone());
        }
        path.join(" -> ")
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnStack,
    Done,
}

/// A directed acyclic graph of `child -> parent` edges with a memoized
/// ancestor set per node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    parents: BTreeMap<String, BTreeSet<String>>,
    ancestors: BTreeMap<String, BTreeSet<String>>,
}

impl Lattice {
    /// Creates an empty lattice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` as a node with no parents if it is not present yet.
    pub fn add_node(&mut self, id: &str) {
        self.parents.entry(id.to_string()).or_default();
    }

    /// Adds a `child -> parent` edge. Returns `false` if it already existed.
    ///
    /// The memoized closure is stale until [`Lattice::finish`] runs again.
    pub fn add_edge(&mut self, child: &str, parent: &str) -> bool {
        self.add_node(parent);
        self.parents
            .entry(child.to_string())
            .or_default()
            .insert(parent.to_string())
    }

    /// Removes a `child -> parent` edge.
    pub fn remove_edge(&mut self, child: &str, parent: &str) -> bool {
        self.parents
            .get_mut(child)
            .is_some_and(|set| set.remove(parent))
    }

    /// Whether `id` appears in the lattice.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.parents.contains_key(id)
    }

    /// Direct parents of `id`.
    pub fn parents(&self, id: &str) -> impl Iterator<Item = &str> {
        self.parents
            .get(id)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// All transitive ancestors of `id`, excluding `id` itself.
    ///
    /// Empty until [`Lattice::finish`] has run.
    pub fn ancestors(&self, id: &str) -> impl Iterator<Item = &str> {
        self.ancestors
            .get(id)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// `sub == sup`, or `sup` is a transitive ancestor of `sub`.
    #[must_use]
    pub fn is_subclass_of(&self, sub: &str, sup: &str) -> bool {
        sub == sup
            || self
                .ancestors
                .get(sub)
                .is_some_and(|set| set.contains(sup))
    }

    /// Breaks every cycle, then memoizes the transitive closure.
    ///
    /// Returns the cycles found, in discovery order.
    pub fn finish(&mut self) -> Vec<Cycle> {
        let cycles = self.break_cycles();
        self.close();
        cycles
    }

    /// Nodes ordered so that every parent precedes its children.
    #[must_use]
    pub fn topological_order(&self) -> Vec<String> {
        let mut order = Vec::with_capacity(self.parents.len());
        let mut seen = BTreeSet::new();
        for id in self.parents.keys() {
            self.post_order(id, &mut seen, &mut order);
        }
        order
    }

    fn post_order(&self, id: &str, seen: &mut BTreeSet<String>, order: &mut Vec<String>) {
        if !seen.insert(id.to_string()) {
            return;
        }
        for parent in self.parents(id) {
            self.post_order(parent, seen, order);
        }
        order.push(id.to_string());
    }

    fn break_cycles(&mut self) -> Vec<Cycle> {
        let mut marks = BTreeMap::new();
        let mut stack = Vec::new();
        let mut cycles = Vec::new();
        let mut back_edges = Vec::new();
        let roots: Vec<String> = self.parents.keys().cloned().collect();
        for root in &roots {
            if !marks.contains_key(root) {
                self.visit(root, &mut marks, &mut stack, &mut cycles, &mut back_edges);
            }
        }
        for (child, parent) in back_edges {
            self.remove_edge(&child, &parent);
        }
        cycles
    }

    fn visit(
        &self,
        id: &str,
        marks: &mut BTreeMap<String, Mark>,
        stack: &mut Vec<String>,
        cycles: &mut Vec<Cycle>,
        back_edges: &mut Vec<(String, String)>,
    ) {
        marks.insert(id.to_string(), Mark::OnStack);
        stack.push(id.to_string());
        for parent in self.parents(id) {
            match marks.get(parent) {
                Some(Mark::OnStack) => {
                    let start = stack.iter().position(|n| n == parent).unwrap_or(0);
                    cycles.push(Cycle {
                        members: stack[start..].to_vec(),
                    });
                    back_edges.push((id.to_string(), parent.to_string()));
                }
                Some(Mark::Done) => {}
                None => self.visit(parent, marks, stack, cycles, back_edges),
            }
        }
        stack.pop();
        marks.insert(id.to_string(), Mark::Done);
    }

    fn close(&mut self) {
        let mut memo: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for id in self.topological_order() {
            let mut acc = BTreeSet::new();
            for parent in self.parents(&id) {
                acc.insert(parent.to_string());
                if let Some(inherited) = memo.get(parent) {
                    acc.extend(inherited.iter().cloned());
                }
            }
            memo.insert(id, acc);
        }
        self.ancestors = memo;
    }
}

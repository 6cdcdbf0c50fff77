//! Hierarchy builder: flat parent-pointer records to a rooted tree.
//!
//! Validation happens before any node is linked:
//! 1. Ids must be unique.
//! 2. Exactly one record has no parent.
//! 3. Every parent id resolves to an existing record.
//! 4. The parent relation is acyclic (checked with a topological sort on a
//!    petgraph `StableGraph`, so no recursion ever follows a cycle).
//!
//! The resulting nodes live in an arena indexed by `NodeId` in input order.

use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

use super::node::{NodeId, Record, TreeNode};
use crate::error::MalformedHierarchyError;

/// A validated rooted tree.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    /// Node arena in input-record order.
    nodes: Vec<TreeNode>,
    /// The single parentless node.
    root: NodeId,
    /// Largest depth of any node.
    max_depth: u32,
}

impl Hierarchy {
    /// Build a hierarchy from flat records.
    ///
    /// Children keep the relative input order of records sharing a parent.
    pub fn from_records(records: Vec<Record>) -> Result<Self, MalformedHierarchyError> {
        if records.is_empty() {
            return Err(MalformedHierarchyError::Empty);
        }

        let mut index_of: HashMap<&str, NodeId> = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index_of.insert(record.id.as_str(), NodeId(i as u32)).is_some() {
                return Err(MalformedHierarchyError::DuplicateId(record.id.clone()));
            }
        }

        let roots: Vec<NodeId> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.parent_id.is_none())
            .map(|(i, _)| NodeId(i as u32))
            .collect();
        let root = match roots.as_slice() {
            [] => return Err(MalformedHierarchyError::NoRoot),
            [root] => *root,
            _ => {
                return Err(MalformedHierarchyError::AmbiguousRoot {
                    ids: roots.iter().map(|r| records[r.index()].id.clone()).collect(),
                });
            }
        };

        let mut parents: Vec<Option<NodeId>> = Vec::with_capacity(records.len());
        for record in &records {
            let parent = match &record.parent_id {
                None => None,
                Some(parent_id) => match index_of.get(parent_id.as_str()) {
                    Some(&p) => Some(p),
                    None => {
                        return Err(MalformedHierarchyError::Orphan {
                            id: record.id.clone(),
                            parent_id: parent_id.clone(),
                        });
                    }
                },
            };
            parents.push(parent);
        }

        if let Some(at) = find_cycle(&parents) {
            return Err(MalformedHierarchyError::Cycle {
                id: records[at.index()].id.clone(),
            });
        }

        let mut nodes: Vec<TreeNode> = records
            .into_iter()
            .zip(parents.iter())
            .map(|(record, &parent)| TreeNode {
                record,
                parent,
                children: Vec::new(),
                depth: 0,
            })
            .collect();

        for (i, parent) in parents.iter().enumerate() {
            if let Some(p) = parent {
                nodes[p.index()].children.push(NodeId(i as u32));
            }
        }

        // Depths via BFS from the root
        let mut max_depth = 0;
        let mut queue = VecDeque::from([root]);
        while let Some(id) = queue.pop_front() {
            let depth = nodes[id.index()].depth;
            max_depth = max_depth.max(depth);
            for k in 0..nodes[id.index()].children.len() {
                let child = nodes[id.index()].children[k];
                nodes[child.index()].depth = depth + 1;
                queue.push_back(child);
            }
        }

        debug!(nodes = nodes.len(), max_depth, root = %nodes[root.index()].id(), "built hierarchy");

        Ok(Self {
            nodes,
            root,
            max_depth,
        })
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes (equals the number of input records).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A built hierarchy always has a root, so this is only true for
    /// hierarchies that were never populated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Largest node depth (0 when the root is the only node).
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Get a node by id.
    ///
    /// Ids come from this hierarchy, so indexing is always in bounds.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    /// Find a node by its record id.
    pub fn find(&self, record_id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.record.id == record_id)
            .map(|i| NodeId(i as u32))
    }

    /// Iterate nodes in arena (input) order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Node ids in breadth-first order starting at the root.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([self.root]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.node(id).children.iter().copied());
        }
        order
    }

    /// Node ids in post-order (children before parent, left to right).
    ///
    /// Leaves appear in the same left-to-right order as `leaves()`.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            for &child in self.node(id).children.iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }

    /// Leaves in left-to-right tree order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.post_order()
            .into_iter()
            .filter(|&id| self.node(id).is_leaf())
            .collect()
    }

    /// Parent-child pairs in breadth-first order of the child.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.descendants()
            .into_iter()
            .filter_map(|id| self.node(id).parent.map(|p| (p, id)))
            .collect()
    }
}

/// Return a node on a cycle of the parent relation, if any.
fn find_cycle(parents: &[Option<NodeId>]) -> Option<NodeId> {
    let mut graph: StableDiGraph<NodeId, ()> =
        StableDiGraph::with_capacity(parents.len(), parents.len());
    let indices: Vec<NodeIndex> = (0..parents.len())
        .map(|i| graph.add_node(NodeId(i as u32)))
        .collect();

    for (child, parent) in parents.iter().enumerate() {
        if let Some(p) = parent {
            graph.add_edge(indices[p.index()], indices[child], ());
        }
    }

    toposort(&graph, None)
        .err()
        .map(|cycle| graph[cycle.node_id()])
}

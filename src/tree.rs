//! Arena-backed ordered binary tree.
//!
//! Nodes live in a contiguous slot vector with free-list reuse and are
//! addressed by [`NodeId`], a dense `u32` index. Removing a subtree clears
//! every slot it occupied; any later access through a freed id fails with
//! [`TreeError::StaleNode`] rather than reaching defunct state. There is no
//! self-referential "defunct" sentinel: a slot either holds a live node or
//! nothing.
//!
//! # Determinism
//! - `NodeId` ordering is by its inner `u32`.
//! - [`BinaryTree::preorder`] visits root, then left subtree, then right
//!   subtree; the snapshot is stable for a given tree shape.
//! - Free-list reuse is LIFO, so the same allocation/removal sequence always
//!   produces the same ids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense node identifier for arena-allocated trees.
///
/// `NodeId(u32)` is `Copy`, `Eq`, `Ord`, `Hash`. The inner value is an index
/// into the tree's slot array and is only meaningful for the tree that issued
/// it.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Returns the raw `u32` index.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Error type for tree accessors and mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The id refers to a removed or never-allocated node.
    StaleNode(NodeId),
    /// `add_root` was called on a non-empty tree.
    RootExists,
    /// The requested child position is already occupied.
    ChildOccupied(NodeId),
    /// `remove` was called on a node with two children.
    TwoChildren(NodeId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::StaleNode(id) => write!(f, "stale access to removed node {id}"),
            TreeError::RootExists => write!(f, "tree already has a root"),
            TreeError::ChildOccupied(id) => write!(f, "child position of {id} is occupied"),
            TreeError::TwoChildren(id) => {
                write!(f, "cannot splice out {id}: it has two children")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Live node state: payload plus parent/child links.
#[derive(Debug, Clone)]
struct NodeData<T> {
    value: T,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Slot in the node arena.
#[derive(Debug, Clone)]
struct Slot<T> {
    data: Option<NodeData<T>>,
    next_free: Option<u32>,
}

/// An ordered binary tree over arena-allocated nodes.
#[derive(Debug, Clone, Default)]
pub struct BinaryTree<T> {
    slots: Vec<Slot<T>>,
    root: Option<NodeId>,
    free_head: Option<u32>,
    live: usize,
}

impl<T> BinaryTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            root: None,
            free_head: None,
            live: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    /// True when the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// The root id, if a root exists.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// True iff `id` refers to a live node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots
            .get(id.as_u32() as usize)
            .is_some_and(|slot| slot.data.is_some())
    }

    fn node(&self, id: NodeId) -> Result<&NodeData<T>, TreeError> {
        self.slots
            .get(id.as_u32() as usize)
            .and_then(|slot| slot.data.as_ref())
            .ok_or(TreeError::StaleNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData<T>, TreeError> {
        self.slots
            .get_mut(id.as_u32() as usize)
            .and_then(|slot| slot.data.as_mut())
            .ok_or(TreeError::StaleNode(id))
    }

    fn allocate(&mut self, data: NodeData<T>) -> NodeId {
        self.live += 1;
        if let Some(idx) = self.free_head {
            let slot = &mut self.slots[idx as usize];
            debug_assert!(slot.data.is_none(), "free slot should have no data");
            self.free_head = slot.next_free;
            slot.data = Some(data);
            slot.next_free = None;
            NodeId(idx)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                data: Some(data),
                next_free: None,
            });
            NodeId(idx)
        }
    }

    fn free(&mut self, id: NodeId) -> Option<NodeData<T>> {
        let idx = id.as_u32() as usize;
        let slot = self.slots.get_mut(idx)?;
        let data = slot.data.take()?;
        slot.next_free = self.free_head;
        self.free_head = Some(idx as u32);
        self.live -= 1;
        Some(data)
    }

    /// Adds a root to an empty tree.
    pub fn add_root(&mut self, value: T) -> Result<NodeId, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::RootExists);
        }
        let id = self.allocate(NodeData {
            value,
            parent: None,
            left: None,
            right: None,
        });
        self.root = Some(id);
        Ok(id)
    }

    /// Adds a left child to `parent`.
    pub fn add_left(&mut self, parent: NodeId, value: T) -> Result<NodeId, TreeError> {
        if self.node(parent)?.left.is_some() {
            return Err(TreeError::ChildOccupied(parent));
        }
        let id = self.allocate(NodeData {
            value,
            parent: Some(parent),
            left: None,
            right: None,
        });
        self.node_mut(parent)?.left = Some(id);
        Ok(id)
    }

    /// Adds a right child to `parent`.
    pub fn add_right(&mut self, parent: NodeId, value: T) -> Result<NodeId, TreeError> {
        if self.node(parent)?.right.is_some() {
            return Err(TreeError::ChildOccupied(parent));
        }
        let id = self.allocate(NodeData {
            value,
            parent: Some(parent),
            left: None,
            right: None,
        });
        self.node_mut(parent)?.right = Some(id);
        Ok(id)
    }

    /// Borrows the payload of `id`.
    pub fn get(&self, id: NodeId) -> Result<&T, TreeError> {
        Ok(&self.node(id)?.value)
    }

    /// Replaces the payload of `id`, returning the previous value.
    pub fn set(&mut self, id: NodeId, value: T) -> Result<T, TreeError> {
        let node = self.node_mut(id)?;
        Ok(std::mem::replace(&mut node.value, value))
    }

    /// The parent of `id` (`None` for the root).
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.node(id)?.parent)
    }

    /// The left child of `id`.
    pub fn left(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.node(id)?.left)
    }

    /// The right child of `id`.
    pub fn right(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.node(id)?.right)
    }

    /// The other child of `id`'s parent, if both exist.
    pub fn sibling(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(None);
        };
        let parent_node = self.node(parent)?;
        Ok(if parent_node.left == Some(id) {
            parent_node.right
        } else {
            parent_node.left
        })
    }

    /// True iff `id` has no children.
    pub fn is_leaf(&self, id: NodeId) -> Result<bool, TreeError> {
        let node = self.node(id)?;
        Ok(node.left.is_none() && node.right.is_none())
    }

    /// True iff `id` is the root.
    pub fn is_root(&self, id: NodeId) -> Result<bool, TreeError> {
        Ok(self.node(id)?.parent.is_none())
    }

    /// Removes a leaf or single-child node, splicing its child (if any) into
    /// its place. Returns the removed payload.
    pub fn remove(&mut self, id: NodeId) -> Result<T, TreeError> {
        let node = self.node(id)?;
        if node.left.is_some() && node.right.is_some() {
            return Err(TreeError::TwoChildren(id));
        }
        let parent = node.parent;
        let child = node.left.or(node.right);
        if let Some(child) = child {
            self.node_mut(child)?.parent = parent;
        }
        match parent {
            Some(parent) => {
                let parent_node = self.node_mut(parent)?;
                if parent_node.left == Some(id) {
                    parent_node.left = child;
                } else {
                    parent_node.right = child;
                }
            }
            None => self.root = child,
        }
        // node() above proved the slot is live.
        let data = self.free(id).ok_or(TreeError::StaleNode(id))?;
        Ok(data.value)
    }

    /// Removes the subtree rooted at `id`, freeing every slot it occupied.
    ///
    /// Returns the removed payloads in preorder. Every descendant id becomes
    /// stale; later access through any of them is [`TreeError::StaleNode`].
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<Vec<T>, TreeError> {
        let parent = self.node(id)?.parent;
        match parent {
            Some(parent) => {
                let parent_node = self.node_mut(parent)?;
                if parent_node.left == Some(id) {
                    parent_node.left = None;
                } else {
                    parent_node.right = None;
                }
            }
            None => self.root = None,
        }
        let ids = self.preorder_from(id)?;
        let mut values = Vec::with_capacity(ids.len());
        for node_id in ids {
            let data = self.free(node_id).ok_or(TreeError::StaleNode(node_id))?;
            values.push(data.value);
        }
        Ok(values)
    }

    /// Preorder snapshot of all node ids (root, left subtree, right subtree).
    ///
    /// The snapshot is a plain `Vec`, so callers may mutate the tree while
    /// iterating; ids removed in the meantime simply turn stale.
    pub fn preorder(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => self.preorder_from(root).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    fn preorder_from(&self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            out.push(current);
            // Right pushed first so left is visited first.
            if let Some(right) = node.right {
                stack.push(right);
            }
            if let Some(left) = node.left {
                stack.push(left);
            }
        }
        Ok(out)
    }

    /// Iterates over live payloads in slot order (not traversal order).
    pub fn values(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.data
                .as_ref()
                .map(|data| (NodeId(idx as u32), &data.value))
        })
    }
}

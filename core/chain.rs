use std::cmp::Ordering;

use log::trace;

use crate::compare::Comparator;
use crate::types::Value;

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    pub value: Value,
    pub next: Option<NodeId>,
}

/// Singly linked chain of values kept in ascending order.
///
/// Nodes live in an append-only arena owned by the chain; links are indices
/// into it. A node is reachable through exactly one link (`head` or some
/// node's `next`), and the arena is dropped as a whole with the chain.
#[derive(Debug, Clone, Default)]
pub struct SortedChain {
    nodes: Vec<Node>,
    head: Option<NodeId>,
}

impl SortedChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn head(&self) -> Option<&Value> {
        self.head.map(|id| &self.nodes[id].value)
    }

    pub fn insert(&mut self, value: Value, cmp: &Comparator) -> NodeId {
        self.insert_by(value, |current, new| cmp.compare(current, new))
    }

    /// Places `value` before the first node that compares strictly greater,
    /// so equal values keep their arrival order.
    ///
    /// The walk is linear in the chain length.
    pub fn insert_by<F>(&mut self, value: Value, mut compare: F) -> NodeId
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut prev: Option<NodeId> = None;
        let mut cursor = self.head;
        let mut position = 0;
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            if compare(&node.value, &value) == Ordering::Greater {
                break;
            }
            prev = Some(id);
            cursor = node.next;
            position += 1;
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            value,
            next: cursor,
        });
        match prev {
            None => self.head = Some(id),
            Some(prev) => self.nodes[prev].next = Some(id),
        }
        trace!(
            "chain insert: node {} at position {} of {}",
            id,
            position,
            self.nodes.len()
        );
        id
    }

    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            cursor: self.head,
        }
    }

    /// Follows `n` links from the head.
    pub fn nth(&self, n: usize) -> Option<&Value> {
        self.iter().nth(n)
    }
}

pub struct ChainIter<'a> {
    chain: &'a SortedChain,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = &self.chain.nodes[id];
        self.cursor = node.next;
        Some(&node.value)
    }
}

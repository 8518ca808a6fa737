use std::ops::Range;

use crate::outline::{OutlineEntry, headings};
use crate::store::SpanStore;

/// A foldable heading: its line, and the body that folds under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldNode {
    pub heading: Range<usize>,
    pub level: u8,
    /// From the end of the heading line to the next heading of equal or
    /// shallower level, or the end of the tree's range.
    pub body: Range<usize>,
    pub children: Vec<FoldNode>,
}

impl FoldNode {
    /// Heading line plus body.
    pub fn extent(&self) -> Range<usize> {
        self.heading.start..self.body.end
    }
}

/// Heading tree over a range, built on demand and discarded after use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldTree {
    pub roots: Vec<FoldNode>,
}

impl FoldTree {
    pub fn build(store: &SpanStore, range: Range<usize>) -> Self {
        let entries = headings(store, range.clone());
        Self {
            roots: build_nodes(&entries, range.end),
        }
    }

    /// Innermost node whose heading line or body holds `pos`.
    pub fn fold_at(&self, pos: usize) -> Option<&FoldNode> {
        let mut nodes = &self.roots;
        let mut found = None;
        while let Some(node) = nodes.iter().find(|n| n.extent().contains(&pos)) {
            found = Some(node);
            nodes = &node.children;
        }
        found
    }

    /// Every node, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = &FoldNode> {
        let mut stack: Vec<&FoldNode> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn build_nodes(entries: &[OutlineEntry], end: usize) -> Vec<FoldNode> {
    let mut nodes = Vec::new();
    let mut i = 0;
    while i < entries.len() {
        let head = &entries[i];
        let next = entries[i + 1..]
            .iter()
            .position(|e| e.level <= head.level)
            .map_or(entries.len(), |offset| i + 1 + offset);
        let body_end = entries.get(next).map_or(end, |e| e.range.start);
        nodes.push(FoldNode {
            heading: head.range.clone(),
            level: head.level,
            body: head.range.end..body_end,
            children: build_nodes(&entries[i + 1..next], body_end),
        });
        i = next;
    }
    nodes
}

//! Forest reconstruction from dotted work-breakdown ids.
//!
//! A node's parent is its id with the last dotted segment removed. Nodes only
//! refer to each other by id; the [`Forest`] owns them all.

use std::collections::HashMap;

use crate::errors::{LayoutError, LayoutWarning};
use crate::log;
use crate::path_key::sort_ids;

/// One input row of a work-breakdown table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WbsRecord {
    pub id: String,
    pub title: String,
}

impl WbsRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into() }
    }
}

/// A node of the work-breakdown forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub title: String,
    /// Number of dotted segments in `id`
    pub level: usize,
    /// Parent id, `None` for roots (including promoted orphans)
    pub parent: Option<String>,
    /// Child ids in path-key order
    pub children: Vec<String>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Box caption used by the tree layout.
    pub fn label(&self) -> String {
        format!("{} — {}", self.id, self.title)
    }
}

/// Id of the would-be parent: everything before the last `.`.
pub fn parent_id(id: &str) -> Option<&str> {
    id.rsplit_once('.').map(|(parent, _)| parent)
}

/// An ordered forest of work-breakdown nodes
#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: HashMap<String, Node>,
    roots: Vec<String>,
    warnings: Vec<LayoutWarning>,
}

impl Forest {
    /// Build a forest from table rows.
    ///
    /// Ids and titles are trimmed. A repeated id is rejected. A node whose
    /// parent id is absent is promoted to a root and an
    /// [`LayoutWarning::OrphanedParent`] is recorded.
    pub fn build(records: &[WbsRecord]) -> Result<Forest, LayoutError> {
        if records.is_empty() {
            return Err(LayoutError::EmptyInput);
        }

        let mut nodes: HashMap<String, Node> = HashMap::with_capacity(records.len());
        let mut first_seen: HashMap<String, usize> = HashMap::with_capacity(records.len());
        let mut order = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let id = record.id.trim();
            let title = record.title.trim();
            if id.is_empty() {
                return Err(LayoutError::MissingField { index, field: "id" });
            }
            if title.is_empty() {
                return Err(LayoutError::MissingField { index, field: "title" });
            }
            if let Some(&first) = first_seen.get(id) {
                return Err(LayoutError::DuplicateId { id: id.to_string(), first, second: index });
            }
            first_seen.insert(id.to_string(), index);
            order.push(id.to_string());
            nodes.insert(
                id.to_string(),
                Node {
                    id: id.to_string(),
                    title: title.to_string(),
                    level: id.split('.').count(),
                    parent: None,
                    children: Vec::new(),
                },
            );
        }

        let mut roots = Vec::new();
        let mut warnings = Vec::new();
        let mut edges: Vec<(String, String)> = Vec::new();

        for id in &order {
            match parent_id(id) {
                Some(parent) if nodes.contains_key(parent) => {
                    edges.push((parent.to_string(), id.clone()));
                }
                Some(parent) => {
                    let warning = LayoutWarning::OrphanedParent {
                        id: id.clone(),
                        parent: parent.to_string(),
                    };
                    log::report(&warning);
                    warnings.push(warning);
                    roots.push(id.clone());
                }
                None => roots.push(id.clone()),
            }
        }

        for (parent, child) in edges {
            if let Some(node) = nodes.get_mut(&child) {
                node.parent = Some(parent.clone());
            }
            if let Some(node) = nodes.get_mut(&parent) {
                node.children.push(child);
            }
        }

        for node in nodes.values_mut() {
            sort_ids(&mut node.children);
        }
        sort_ids(&mut roots);

        log::debug!(nodes = nodes.len(), roots = roots.len(), "forest built");

        Ok(Forest { nodes, roots, warnings })
    }

    /// Root ids in path-key order
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Child ids of `id`; empty for leaves and unknown ids
    pub fn children(&self, id: &str) -> &[String] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.parent.as_deref())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Conditions recovered while building (orphans promoted to roots)
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    /// Depth below the forest roots, 1 for a root; 0 for unknown ids.
    pub fn depth(&self, id: &str) -> usize {
        let mut depth = 0;
        let mut cursor = self.nodes.get(id);
        while let Some(node) = cursor {
            depth += 1;
            cursor = node.parent.as_deref().and_then(|p| self.nodes.get(p));
        }
        depth
    }

    /// Deepest depth under `id`, counting `id` itself as 1.
    pub fn subtree_depth(&self, id: &str) -> usize {
        1 + self
            .children(id)
            .iter()
            .map(|c| self.subtree_depth(c))
            .max()
            .unwrap_or(0)
    }

    pub fn max_depth(&self) -> usize {
        self.roots.iter().map(|r| self.subtree_depth(r)).max().unwrap_or(0)
    }

    /// Pre-order walk over every node, roots and siblings in path-key order
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            forest: self,
            stack: self.roots.iter().rev().map(String::as_str).collect(),
        }
    }
}

/// Pre-order iterator returned by [`Forest::depth_first`]
pub struct DepthFirst<'a> {
    forest: &'a Forest,
    stack: Vec<&'a str>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let id = self.stack.pop()?;
        let node = self.forest.nodes.get(id)?;
        self.stack.extend(node.children.iter().rev().map(String::as_str));
        Some(node)
    }
}

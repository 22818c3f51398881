//! One mind-map canvas.
//!
//! All topics of a sheet live in a single arena (`StableDiGraph`). Graph
//! edges go from parent → child and own nothing: the parent of a topic is
//! found by looking up its incoming edge, so the back-reference can never
//! disagree with the parent's child list. Each edge carries an insertion
//! sequence number, which gives `children()` its display order.
//!
//! A topic in the arena is in exactly one of four places, see [`Placement`].
//! Relationships are kept in a plain list beside the arena and refer to
//! topics by id only.

use crate::config::MindMapConfig;
use crate::error::{MindMapError, Result, StructuralViolation};
use crate::id::{RelationshipId, SheetId, TopicId};
use crate::outline::{SheetOutline, TopicOutline};
use crate::topic::{Relationship, Topic};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Ancestor chain of a topic, nearest parent first.
pub type Ancestors = SmallVec<[TopicId; 8]>;

/// Where a topic sits inside its sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// The sheet root.
    Root,
    /// Reachable from the root.
    Tree,
    /// A floating topic or a descendant of one.
    Floating,
    /// Neither in the tree nor floating. Left behind by `remove_child`,
    /// `change_parent(.., None)`, `remove_floating_node` or a parentless
    /// `duplicate`; destroyed by `purge_detached`.
    Detached,
}

impl Placement {
    /// Root, tree and floating topics are the ones a sheet "knows".
    pub fn is_attached(self) -> bool {
        !matches!(self, Placement::Detached)
    }
}

#[derive(Debug, Clone)]
struct TopicEntry {
    id: TopicId,
    topic: Topic,
}

/// A pre-order copy of a subtree, independent of the graph it came from.
/// Never empty: `nodes[0]` is the top of the subtree.
struct SubtreeCopy {
    nodes: Vec<CopiedTopic>,
}

struct CopiedTopic {
    source: TopicId,
    /// Position of the parent inside `SubtreeCopy::nodes`.
    parent: Option<usize>,
    topic: Topic,
}

/// A mind-map sheet: root tree, floating topics and relationships.
///
/// `Sheet` is not `Clone`: a clone would alias every topic id.
/// Use [`Sheet::deep_copy`] to get an independent copy.
#[derive(Debug)]
pub struct Sheet {
    id: SheetId,
    name: String,
    graph: StableDiGraph<TopicEntry, u64>,
    index: HashMap<TopicId, NodeIndex>,
    root: NodeIndex,
    floating: Vec<TopicId>,
    relationships: Vec<Relationship>,
    next_order: u64,
    config: Arc<MindMapConfig>,
}

impl Sheet {
    /// Create a sheet with the default tree: a root plus one child per entry
    /// of `config.main_topics`, in table order.
    #[must_use]
    pub fn new(config: Arc<MindMapConfig>) -> Self {
        let root = config.root.build();
        let mut sheet = Self::with_root(config, root);
        let presets: Vec<Topic> = sheet.config.main_topics.iter().map(|t| t.build()).collect();
        for topic in presets {
            let (_, idx) = sheet.insert_entry(topic);
            sheet.link(sheet.root, idx);
        }
        log::debug!(
            "created sheet {} with {} main topics",
            sheet.id,
            sheet.graph.node_count() - 1
        );
        sheet
    }

    /// Create a sheet around an explicit root topic with no children.
    #[must_use]
    pub fn with_root(config: Arc<MindMapConfig>, root: Topic) -> Self {
        let mut graph = StableDiGraph::new();
        let root_id = TopicId::generate();
        let root_idx = graph.add_node(TopicEntry {
            id: root_id,
            topic: root,
        });

        let mut index = HashMap::new();
        index.insert(root_id, root_idx);

        Self {
            id: SheetId::generate(),
            name: config.sheet_name.clone(),
            graph,
            index,
            root: root_idx,
            floating: Vec::new(),
            relationships: Vec::new(),
            next_order: 0,
            config,
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn id(&self) -> SheetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &MindMapConfig {
        &self.config
    }

    /// The root topic. Always present.
    pub fn root(&self) -> TopicId {
        self.graph[self.root].id
    }

    /// Tops of the floating subtrees, in insertion order.
    pub fn floating(&self) -> &[TopicId] {
        &self.floating
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id() == id)
    }

    /// Mutable access for attribute edits. Endpoints cannot be changed.
    pub fn relationship_mut(&mut self, id: RelationshipId) -> Option<&mut Relationship> {
        self.relationships.iter_mut().find(|r| r.id() == id)
    }

    /// Number of topics in the arena, detached ones included.
    pub fn topic_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Every topic id in the arena, in no particular order.
    pub fn topic_ids(&self) -> impl Iterator<Item = TopicId> + '_ {
        self.graph.node_indices().map(|idx| self.graph[idx].id)
    }

    pub fn contains(&self, id: TopicId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.index.get(&id).map(|idx| &self.graph[*idx].topic)
    }

    /// Mutable access for attribute edits. Structure is not reachable from
    /// a `Topic`, so this cannot break the tree.
    pub fn topic_mut(&mut self, id: TopicId) -> Option<&mut Topic> {
        self.index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx].topic)
    }

    pub fn parent(&self, id: TopicId) -> Option<TopicId> {
        let idx = self.index.get(&id)?;
        self.parent_idx(*idx).map(|p| self.graph[p].id)
    }

    /// Children of a topic in insertion order. Empty for unknown ids.
    pub fn children(&self, id: TopicId) -> Vec<TopicId> {
        match self.index.get(&id) {
            Some(idx) => self
                .child_indices(*idx)
                .into_iter()
                .map(|c| self.graph[c].id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Parent, grandparent, ... up to the top of the subtree holding `id`.
    pub fn ancestors(&self, id: TopicId) -> Ancestors {
        let mut chain = Ancestors::new();
        let Some(&start) = self.index.get(&id) else {
            return chain;
        };
        let mut current = start;
        // Bounded by the arena size.
        while let Some(parent) = self.parent_idx(current) {
            if chain.len() >= self.graph.node_count() {
                break;
            }
            chain.push(self.graph[parent].id);
            current = parent;
        }
        chain
    }

    /// All descendants of `id` in pre-order, excluding `id` itself.
    pub fn descendants(&self, id: TopicId) -> Vec<TopicId> {
        let Some(&idx) = self.index.get(&id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut stack: Vec<NodeIndex> = self.child_indices(idx).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            out.push(self.graph[current].id);
            stack.extend(self.child_indices(current).into_iter().rev());
        }
        out
    }

    /// Check if `ancestor` is a parent/grandparent/etc. of `descendant`.
    pub fn is_ancestor_of(&self, ancestor: TopicId, descendant: TopicId) -> bool {
        match (self.index.get(&ancestor), self.index.get(&descendant)) {
            (Some(&a), Some(&d)) => self.is_ancestor_idx(a, d),
            _ => false,
        }
    }

    pub fn placement(&self, id: TopicId) -> Option<Placement> {
        let &idx = self.index.get(&id)?;
        if idx == self.root {
            return Some(Placement::Root);
        }
        let top = self.top_of(idx);
        let placement = if top == self.root {
            Placement::Tree
        } else if self.floating.contains(&self.graph[top].id) {
            Placement::Floating
        } else {
            Placement::Detached
        };
        Some(placement)
    }

    // ─── Topic structure ─────────────────────────────────────────────────

    /// Add a standalone topic to the arena. It starts out detached.
    pub fn insert_topic(&mut self, topic: Topic) -> TopicId {
        let (id, _) = self.insert_entry(topic);
        log::debug!("inserted detached topic {id} into sheet {}", self.id);
        id
    }

    /// Append `node` to the children of `parent`.
    ///
    /// A node that already has a parent is detached from it first; a
    /// floating node leaves the floating set. Fails without touching the
    /// sheet if `node` is the root, is `parent`, or is an ancestor of `parent`.
    pub fn add_child(&mut self, parent: TopicId, node: TopicId) -> Result<()> {
        let parent_idx = self.idx(parent)?;
        let node_idx = self.idx(node)?;
        if let Err(violation) = self.check_attach(node_idx, parent_idx) {
            log::warn!("rejected add_child({parent}, {node}): {violation}");
            return Err(violation.into());
        }
        self.attach(parent_idx, node_idx);
        log::debug!("added {node} under {parent}");
        Ok(())
    }

    /// Remove `node` from the children of `parent` and clear its parent.
    /// Returns `false` (and does nothing) if `node` is not a direct child.
    pub fn remove_child(&mut self, parent: TopicId, node: TopicId) -> bool {
        let (Some(&parent_idx), Some(&node_idx)) = (self.index.get(&parent), self.index.get(&node))
        else {
            return false;
        };
        let Some(edge) = self.graph.find_edge(parent_idx, node_idx) else {
            return false;
        };
        self.graph.remove_edge(edge);
        log::debug!("removed {node} from {parent}; it is now detached");
        true
    }

    /// Move `node` under `new_parent`, or leave it parentless with `None`.
    ///
    /// Rejects `new_parent == node`, any descendant of `node`, and giving the
    /// root a parent. All checks run before the old parent is touched.
    pub fn change_parent(&mut self, node: TopicId, new_parent: Option<TopicId>) -> Result<()> {
        let node_idx = self.idx(node)?;
        match new_parent {
            Some(parent) => {
                let parent_idx = self.idx(parent)?;
                if let Err(violation) = self.check_attach(node_idx, parent_idx) {
                    log::warn!("rejected change_parent({node}, {parent}): {violation}");
                    return Err(violation.into());
                }
                self.attach(parent_idx, node_idx);
                log::debug!("moved {node} under {parent}");
            }
            None => {
                if let Some(old) = self.unlink(node_idx) {
                    log::debug!("detached {node} from {}", self.graph[old].id);
                }
            }
        }
        Ok(())
    }

    /// Deep-copy `node` and its whole subtree with fresh ids.
    ///
    /// If `node` has a parent the copy is appended as its last sibling,
    /// otherwise the copy is left detached. Returns the copy's id.
    pub fn duplicate(&mut self, node: TopicId) -> Result<TopicId> {
        let node_idx = self.idx(node)?;
        let parent_idx = self.parent_idx(node_idx);
        let copy = self.copy_subtree(node_idx);
        let copied = copy.nodes.len();

        let mut ids = HashMap::new();
        let clone_idx = self.graft(copy, &mut ids);
        if let Some(parent_idx) = parent_idx {
            self.link(parent_idx, clone_idx);
        }

        let clone_id = self.graph[clone_idx].id;
        log::debug!("duplicated {node} as {clone_id} ({copied} topics)");
        Ok(clone_id)
    }

    /// Remove a topic and its subtree from the sheet for good. Relationships
    /// touching any removed topic are removed too. Returns the number of
    /// topics destroyed; unknown ids are a no-op.
    pub fn delete_topic(&mut self, id: TopicId) -> Result<usize> {
        let Some(&idx) = self.index.get(&id) else {
            return Ok(0);
        };
        if idx == self.root {
            log::warn!("rejected delete_topic({id}): root");
            return Err(MindMapError::Structural(StructuralViolation::RootDeletion(id)));
        }
        Ok(self.remove_subtree(idx))
    }

    /// Destroy every detached subtree. Returns the number of topics destroyed.
    pub fn purge_detached(&mut self) -> usize {
        let tops = self.detached_tops();
        let destroyed: usize = tops.into_iter().map(|top| self.remove_subtree(top)).sum();
        if destroyed > 0 {
            log::debug!("purged {destroyed} detached topics from sheet {}", self.id);
        }
        destroyed
    }

    // ─── Floating topics ─────────────────────────────────────────────────

    /// Create a topic from the floating defaults and add it to the floating set.
    pub fn add_floating_node(&mut self) -> TopicId {
        let topic = self.config.floating.build();
        let (id, _) = self.insert_entry(topic);
        self.floating.push(id);
        log::debug!("added floating topic {id} to sheet {}", self.id);
        id
    }

    /// Make an existing non-root topic floating, detaching it from its parent.
    pub fn float_topic(&mut self, id: TopicId) -> Result<()> {
        let idx = self.idx(id)?;
        if idx == self.root {
            log::warn!("rejected float_topic({id}): root");
            return Err(MindMapError::Structural(StructuralViolation::RootReparent(id)));
        }
        self.unlink(idx);
        if !self.floating.contains(&id) {
            self.floating.push(id);
        }
        log::debug!("floated {id}");
        Ok(())
    }

    /// Drop `id` from the floating set. The topic keeps its own state and
    /// becomes detached. Returns `false` if it was not floating.
    pub fn remove_floating_node(&mut self, id: TopicId) -> bool {
        let before = self.floating.len();
        self.floating.retain(|f| *f != id);
        let removed = self.floating.len() != before;
        if removed {
            log::debug!("removed floating topic {id}; it is now detached");
        }
        removed
    }

    // ─── Relationships ───────────────────────────────────────────────────

    /// Connect two topics. Both must be in the root tree or floating.
    pub fn add_relationship(&mut self, from: TopicId, to: TopicId) -> Result<RelationshipId> {
        for endpoint in [from, to] {
            match self.placement(endpoint) {
                None => return Err(MindMapError::TopicNotFound(endpoint)),
                Some(Placement::Detached) => {
                    return Err(MindMapError::RelationshipEndpoint(endpoint));
                }
                Some(_) => {}
            }
        }
        let defaults = &self.config.relationship;
        let relationship = Relationship::new(from, to, defaults.color.clone(), defaults.text.clone());
        let id = relationship.id();
        self.relationships.push(relationship);
        log::debug!("added relationship {id}: {from} -> {to}");
        Ok(id)
    }

    /// Remove every relationship going exactly `from` → `to`.
    /// Returns how many were removed.
    pub fn remove_relationship(&mut self, from: TopicId, to: TopicId) -> usize {
        let before = self.relationships.len();
        self.relationships
            .retain(|r| !(r.from() == from && r.to() == to));
        let removed = before - self.relationships.len();
        if removed > 0 {
            log::debug!("removed {removed} relationship(s) {from} -> {to}");
        }
        removed
    }

    // ─── Sheet-level ─────────────────────────────────────────────────────

    pub fn rename_sheet(&mut self, name: impl Into<String>) {
        self.name = name.into();
        log::trace!("renamed sheet {} to {:?}", self.id, self.name);
    }

    /// An independent copy of this sheet with new ids throughout.
    ///
    /// The root tree, every floating subtree and every detached subtree are
    /// copied while recording old id → new id; relationship endpoints are
    /// then rewritten through that map, so the copy never points back into
    /// this sheet. Detached subtrees stay detached in the copy.
    #[must_use]
    pub fn deep_copy(&self, name: impl Into<String>) -> Sheet {
        let mut ids: HashMap<TopicId, TopicId> = HashMap::with_capacity(self.index.len());
        let mut copy = Sheet {
            id: SheetId::generate(),
            name: name.into(),
            graph: StableDiGraph::with_capacity(self.graph.node_count(), self.graph.edge_count()),
            index: HashMap::with_capacity(self.index.len()),
            root: NodeIndex::end(),
            floating: Vec::with_capacity(self.floating.len()),
            relationships: Vec::with_capacity(self.relationships.len()),
            next_order: 0,
            config: Arc::clone(&self.config),
        };

        copy.root = copy.graft(self.copy_subtree(self.root), &mut ids);
        for floating in &self.floating {
            if let Some(&idx) = self.index.get(floating) {
                let top = copy.graft(self.copy_subtree(idx), &mut ids);
                copy.floating.push(copy.graph[top].id);
            }
        }
        for top in self.detached_tops() {
            copy.graft(self.copy_subtree(top), &mut ids);
        }

        for rel in &self.relationships {
            match (ids.get(&rel.from()), ids.get(&rel.to())) {
                (Some(&from), Some(&to)) => {
                    copy.relationships.push(Relationship::new(
                        from,
                        to,
                        rel.color.clone(),
                        rel.text.clone(),
                    ));
                }
                _ => log::warn!("relationship {} points outside sheet {}", rel.id(), self.id),
            }
        }

        log::debug!(
            "deep-copied sheet {} as {} ({} topics, {} relationships)",
            self.id,
            copy.id,
            copy.topic_count(),
            copy.relationships.len()
        );
        copy
    }

    /// Nested read-back of the root tree, floating subtrees and relationships.
    pub fn outline(&self) -> SheetOutline {
        SheetOutline {
            id: self.id,
            name: self.name.clone(),
            root: TopicOutline::build(self, self.root()),
            floating: self
                .floating
                .iter()
                .map(|f| TopicOutline::build(self, *f))
                .collect(),
            relationships: self.relationships.clone(),
        }
    }

    /// Number of parents recorded for `id`. Anything above one is corruption.
    pub(crate) fn parent_count(&self, id: TopicId) -> usize {
        self.index.get(&id).map_or(0, |idx| {
            self.graph
                .neighbors_directed(*idx, Direction::Incoming)
                .count()
        })
    }

    /// True when the id index and the arena agree entry for entry.
    pub(crate) fn index_is_consistent(&self) -> bool {
        self.index.len() == self.graph.node_count()
            && self
                .index
                .iter()
                .all(|(id, idx)| self.graph.node_weight(*idx).is_some_and(|e| e.id == *id))
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn idx(&self, id: TopicId) -> Result<NodeIndex> {
        self.index
            .get(&id)
            .copied()
            .ok_or(MindMapError::TopicNotFound(id))
    }

    fn insert_entry(&mut self, topic: Topic) -> (TopicId, NodeIndex) {
        let id = TopicId::generate();
        let idx = self.graph.add_node(TopicEntry { id, topic });
        self.index.insert(id, idx);
        (id, idx)
    }

    fn parent_idx(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
    }

    fn child_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(u64, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        edges.sort_unstable_by_key(|(order, _)| *order);
        edges.into_iter().map(|(_, child)| child).collect()
    }

    /// Tops of the detached subtrees: parentless, not the root, not floating.
    fn detached_tops(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                idx != self.root
                    && self.parent_idx(idx).is_none()
                    && !self.floating.contains(&self.graph[idx].id)
            })
            .collect()
    }

    fn top_of(&self, idx: NodeIndex) -> NodeIndex {
        let mut current = idx;
        let mut steps = 0;
        while let Some(parent) = self.parent_idx(current) {
            if steps >= self.graph.node_count() {
                break;
            }
            current = parent;
            steps += 1;
        }
        current
    }

    fn is_ancestor_idx(&self, ancestor: NodeIndex, descendant: NodeIndex) -> bool {
        if ancestor == descendant {
            return false;
        }
        let mut current = descendant;
        let mut steps = 0;
        while let Some(parent) = self.parent_idx(current) {
            if parent == ancestor {
                return true;
            }
            if steps >= self.graph.node_count() {
                break;
            }
            current = parent;
            steps += 1;
        }
        false
    }

    fn check_attach(
        &self,
        node_idx: NodeIndex,
        parent_idx: NodeIndex,
    ) -> std::result::Result<(), StructuralViolation> {
        let node = self.graph[node_idx].id;
        if node_idx == self.root {
            return Err(StructuralViolation::RootReparent(node));
        }
        if node_idx == parent_idx {
            return Err(StructuralViolation::SelfParent(node));
        }
        if self.is_ancestor_idx(node_idx, parent_idx) {
            return Err(StructuralViolation::DescendantParent {
                topic: node,
                parent: self.graph[parent_idx].id,
            });
        }
        Ok(())
    }

    /// Unchecked: callers run `check_attach` first.
    fn attach(&mut self, parent_idx: NodeIndex, node_idx: NodeIndex) {
        self.unlink(node_idx);
        let node = self.graph[node_idx].id;
        self.floating.retain(|f| *f != node);
        self.link(parent_idx, node_idx);
    }

    fn link(&mut self, parent: NodeIndex, child: NodeIndex) {
        let order = self.next_order;
        self.next_order += 1;
        self.graph.add_edge(parent, child, order);
    }

    /// Drop the containment edge above `idx`. Returns the old parent.
    fn unlink(&mut self, idx: NodeIndex) -> Option<NodeIndex> {
        let parent = self.parent_idx(idx)?;
        if let Some(edge) = self.graph.find_edge(parent, idx) {
            self.graph.remove_edge(edge);
        }
        Some(parent)
    }

    fn copy_subtree(&self, top: NodeIndex) -> SubtreeCopy {
        let mut nodes = Vec::new();
        let mut stack: Vec<(NodeIndex, Option<usize>)> = vec![(top, None)];
        while let Some((current, parent)) = stack.pop() {
            let entry = &self.graph[current];
            let position = nodes.len();
            nodes.push(CopiedTopic {
                source: entry.id,
                parent,
                topic: entry.topic.clone(),
            });
            for child in self.child_indices(current).into_iter().rev() {
                stack.push((child, Some(position)));
            }
        }
        SubtreeCopy { nodes }
    }

    /// Insert a copied subtree under fresh ids, recording source → copy in
    /// `ids`. Returns the index of the copy's top, which is left parentless.
    fn graft(&mut self, copy: SubtreeCopy, ids: &mut HashMap<TopicId, TopicId>) -> NodeIndex {
        let mut placed: Vec<NodeIndex> = Vec::with_capacity(copy.nodes.len());
        for node in copy.nodes {
            let (new_id, new_idx) = self.insert_entry(node.topic);
            ids.insert(node.source, new_id);
            if let Some(parent) = node.parent {
                self.link(placed[parent], new_idx);
            }
            placed.push(new_idx);
        }
        placed[0]
    }

    /// Remove the subtree at `top` from the arena, the floating set and every
    /// relationship touching it. Returns the number of topics removed.
    fn remove_subtree(&mut self, top: NodeIndex) -> usize {
        self.unlink(top);
        let mut doomed: Vec<NodeIndex> = vec![top];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let children = self.child_indices(doomed[cursor]);
            doomed.extend(children);
            cursor += 1;
        }

        let mut removed_ids: HashSet<TopicId> = HashSet::with_capacity(doomed.len());
        for idx in doomed {
            if let Some(entry) = self.graph.remove_node(idx) {
                self.index.remove(&entry.id);
                removed_ids.insert(entry.id);
            }
        }

        self.floating.retain(|f| !removed_ids.contains(f));
        let before = self.relationships.len();
        self.relationships
            .retain(|r| !removed_ids.contains(&r.from()) && !removed_ids.contains(&r.to()));
        log::debug!(
            "destroyed {} topics and {} relationships",
            removed_ids.len(),
            before - self.relationships.len()
        );
        removed_ids.len()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new(Arc::default())
    }
}

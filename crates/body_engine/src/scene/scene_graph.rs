//! Scene storage
//!
//! Nodes live in a slot map, so keys held by the registry stay valid while
//! other nodes come and go, and a removed node's key is never reused for a
//! different node.

use slotmap::{new_key_type, SlotMap};

use super::SceneNode;

new_key_type! {
    /// Stable handle to a node in a [`Scene`]
    pub struct NodeKey;
}

/// Flat collection of renderable nodes
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: SlotMap<NodeKey, SceneNode>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Add a node, returning its key
    pub fn add(&mut self, node: SceneNode) -> NodeKey {
        let label = node.label.clone();
        let key = self.nodes.insert(node);
        log::trace!("Scene: added '{}' as {:?} ({} nodes)", label, key, self.nodes.len());
        key
    }
    
    /// Remove a node, returning it if it was present
    pub fn remove(&mut self, key: NodeKey) -> Option<SceneNode> {
        self.nodes.remove(key)
    }
    
    /// Look up a node
    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }
    
    /// Look up a node mutably
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }
    
    /// Whether `key` refers to a live node
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }
    
    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    
    /// Whether the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    
    /// Iterate over all nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter()
    }
    
    /// Remove every node
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

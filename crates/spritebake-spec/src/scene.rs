//! Scene document types.
//!
//! A scene document is the JSON stand-in for an engine scene: a combiner
//! node with its subtree, any number of free-standing top-level nodes, the
//! texture table with per-texture import settings, and the combiner options.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::settings::CombinerOptions;

/// How the engine builds a sprite mesh from its texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteMeshType {
    /// Mesh covers the whole sprite rect.
    FullRect,
    /// Mesh hugs the opaque outline.
    #[default]
    Tight,
}

/// Import settings of a source texture that the combiner may need to change
/// temporarily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportSettings {
    /// Whether CPU-side pixel reads are allowed.
    #[serde(default)]
    pub readable: bool,
    /// Sprite mesh type.
    #[serde(default)]
    pub mesh_type: SpriteMeshType,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            readable: false,
            mesh_type: SpriteMeshType::Tight,
        }
    }
}

impl ImportSettings {
    /// Settings the combiner needs to read pixels: readable, full-rect mesh.
    pub const READABLE_FULL_RECT: ImportSettings = ImportSettings {
        readable: true,
        mesh_type: SpriteMeshType::FullRect,
    };

    /// Whether these settings already allow the combiner to read pixels.
    pub fn is_combine_ready(&self) -> bool {
        self.readable && self.mesh_type == SpriteMeshType::FullRect
    }
}

/// A texture in the document's texture table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextureEntry {
    /// PNG path, relative to the scene document.
    pub path: String,
    /// Current import settings.
    #[serde(default)]
    pub import: ImportSettings,
}

/// Pixel rectangle of a sprite inside its source texture.
///
/// `y` counts from the bottom row of the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpriteRect {
    /// Create a rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect covering a whole `width` x `height` texture.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Whether the rect has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Sprite renderer attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpriteRendererData {
    /// Key into the document's texture table.
    pub texture: String,
    /// Sprite rect inside the texture.
    pub rect: SpriteRect,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
    /// Sorting layer value (not id): larger draws on top.
    #[serde(default)]
    pub sorting_layer: i32,
    /// Order within the sorting layer: larger draws on top.
    #[serde(default)]
    pub sorting_order: i32,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Shared material reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Tint color (linear RGBA).
    #[serde(default = "default_tint")]
    pub color: [f64; 4],
}

fn default_true() -> bool {
    true
}

fn default_tint() -> [f64; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

/// A node in the scene hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneNode {
    pub name: String,
    /// World-space position.
    #[serde(default)]
    pub position: [f64; 3],
    /// Whether the node itself is active.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Whether the node carries an animator.
    #[serde(default)]
    pub animator: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite_renderer: Option<SpriteRendererData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create an empty, active node at the origin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: [0.0; 3],
            active: true,
            animator: false,
            sprite_renderer: None,
            children: Vec::new(),
        }
    }

    /// Sets the world position.
    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = [x, y, z];
        self
    }

    /// Attaches a sprite renderer.
    pub fn with_renderer(mut self, renderer: SpriteRendererData) -> Self {
        self.sprite_renderer = Some(renderer);
        self
    }

    /// Adds a child node.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Address of a node inside a [`SceneDocument`].
///
/// The first index selects the top-level slot (0 is the combiner root,
/// `i + 1` is `nodes[i]`); the rest are child indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the combiner root.
    pub fn root() -> Self {
        NodePath(vec![0])
    }

    /// Path of the top-level node `nodes[index]`.
    pub fn top_level(index: usize) -> Self {
        NodePath(vec![index + 1])
    }

    /// Path of this node's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    /// Index components.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

/// A scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDocument {
    /// Scene name, used to name the combined texture.
    pub name: String,
    /// Texture table keyed by texture key.
    #[serde(default)]
    pub textures: BTreeMap<String, TextureEntry>,
    /// The combiner node.
    pub root: SceneNode,
    /// Free-standing top-level nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<SceneNode>,
    /// Combiner options.
    #[serde(default)]
    pub combiner: CombinerOptions,
}

impl SceneDocument {
    /// Create a document with an empty texture table and no extra nodes.
    pub fn new(name: impl Into<String>, root: SceneNode) -> Self {
        Self {
            name: name.into(),
            textures: BTreeMap::new(),
            root,
            nodes: Vec::new(),
            combiner: CombinerOptions::default(),
        }
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document from a file.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save the document to a file.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Look up a node by path.
    pub fn node(&self, path: &NodePath) -> Option<&SceneNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.top_level_node(*first)?;
        for &index in rest {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Look up a node by path, mutably.
    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut SceneNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = match *first {
            0 => &mut self.root,
            i => self.nodes.get_mut(i - 1)?,
        };
        for &index in rest {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }

    fn top_level_node(&self, slot: usize) -> Option<&SceneNode> {
        match slot {
            0 => Some(&self.root),
            i => self.nodes.get(i - 1),
        }
    }

    /// Paths of a node's children, in order.
    pub fn children(&self, path: &NodePath) -> Vec<NodePath> {
        self.node(path)
            .map(|node| (0..node.children.len()).map(|i| path.child(i)).collect())
            .unwrap_or_default()
    }

    /// Whether the node and every ancestor on its path are active.
    pub fn active_in_hierarchy(&self, path: &NodePath) -> bool {
        let Some((first, rest)) = path.indices().split_first() else {
            return false;
        };
        let Some(mut node) = self.top_level_node(*first) else {
            return false;
        };
        if !node.active {
            return false;
        }
        for &index in rest {
            match node.children.get(index) {
                Some(child) if child.active => node = child,
                _ => return false,
            }
        }
        true
    }

    /// Find the first node with the given name, searching the combiner
    /// subtree first and then each top-level node, depth-first.
    pub fn find_by_name(&self, name: &str) -> Option<NodePath> {
        fn search(node: &SceneNode, path: NodePath, name: &str) -> Option<NodePath> {
            if node.name == name {
                return Some(path);
            }
            node.children
                .iter()
                .enumerate()
                .find_map(|(i, child)| search(child, path.child(i), name))
        }

        search(&self.root, NodePath::root(), name).or_else(|| {
            self.nodes
                .iter()
                .enumerate()
                .find_map(|(i, node)| search(node, NodePath::top_level(i), name))
        })
    }

    /// Replace the top-level node named like `node`, or append it.
    ///
    /// Returns the path of the inserted or updated node.
    pub fn upsert_top_level(&mut self, node: SceneNode) -> NodePath {
        match self.nodes.iter().position(|n| n.name == node.name) {
            Some(index) => {
                let existing = &mut self.nodes[index];
                existing.position = node.position;
                existing.sprite_renderer = node.sprite_renderer;
                NodePath::top_level(index)
            }
            None => {
                self.nodes.push(node);
                NodePath::top_level(self.nodes.len() - 1)
            }
        }
    }
}

//! Renderer collection.
//!
//! Walks the scene depth-first (pre-order), starting at the combiner node
//! when subobjects are included and then at each explicit root in order.
//! The resulting order decides which sprite supplies the placement metadata.

use std::fmt;

use spritebake_spec::{CombineSettings, SpriteRect};

use crate::error::CombineError;

/// A sprite as seen by the combiner, read from a node's renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteInstance {
    /// Name of the node carrying the renderer, used in diagnostics.
    pub name: String,
    /// World-space position of the sprite's center.
    pub world_position: [f64; 2],
    /// Sprite rect inside the source texture.
    pub pixel_rect: SpriteRect,
    /// Key of the backing texture in the [`crate::TextureStore`].
    pub texture: String,
    pub flip_x: bool,
    pub flip_y: bool,
    pub sorting_layer: i32,
    pub sorting_order: i32,
    /// Renderer enabled and node active in hierarchy.
    pub enabled: bool,
    pub has_animator: bool,
    pub material: Option<String>,
    pub tint: [f64; 4],
}

/// Capabilities of a single scene node, queried once during collection.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeProbe {
    /// The node's sprite renderer, if any.
    pub renderer: Option<SpriteInstance>,
    /// Whether the node carries an animator.
    pub has_animator: bool,
}

/// Read access to an engine scene hierarchy.
pub trait SceneGraph {
    /// Handle identifying one node.
    type NodeId: Clone + fmt::Debug;

    /// Children of a node, in order.
    fn children(&self, node: &Self::NodeId) -> Vec<Self::NodeId>;

    /// Renderer and animator capabilities of a node.
    fn probe(&self, node: &Self::NodeId) -> NodeProbe;
}

/// Write access needed to toggle renderers.
pub trait SceneGraphMut: SceneGraph {
    /// Flip the renderer's own enabled flag.
    fn toggle_renderer(&mut self, node: &Self::NodeId);
}

/// Inclusion filters for collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectConfig {
    pub include_subobjects: bool,
    pub skip_nodes_with_animator: bool,
    pub skip_disabled: bool,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self::from_settings(&CombineSettings::default())
    }
}

impl CollectConfig {
    /// Extract the collection filters from combine settings.
    pub fn from_settings(settings: &CombineSettings) -> Self {
        Self {
            include_subobjects: settings.include_subobjects,
            skip_nodes_with_animator: settings.skip_nodes_with_animator,
            skip_disabled: settings.skip_disabled,
        }
    }
}

/// A collected renderer and the node it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected<N> {
    pub node: N,
    pub instance: SpriteInstance,
}

/// Collect renderers from `root` (if `include_subobjects`) and then from
/// every explicit root, in order.
///
/// A node with an animator is skipped together with its whole subtree when
/// `skip_nodes_with_animator` is set. A node reachable both from `root` and
/// an explicit root is collected twice.
pub fn collect_renderers<G: SceneGraph>(
    scene: &G,
    root: &G::NodeId,
    explicit_roots: &[G::NodeId],
    config: &CollectConfig,
) -> Vec<Collected<G::NodeId>> {
    let mut collected = Vec::new();

    if config.include_subobjects {
        visit(scene, root, config, &mut collected);
    }
    for explicit in explicit_roots {
        visit(scene, explicit, config, &mut collected);
    }

    collected
}

fn visit<G: SceneGraph>(
    scene: &G,
    node: &G::NodeId,
    config: &CollectConfig,
    out: &mut Vec<Collected<G::NodeId>>,
) {
    let probe = scene.probe(node);
    if config.skip_nodes_with_animator && probe.has_animator {
        tracing::debug!("Skipping animated subtree at {:?}", node);
        return;
    }

    if let Some(instance) = probe.renderer {
        if !config.skip_disabled || instance.enabled {
            out.push(Collected {
                node: node.clone(),
                instance,
            });
        }
    }

    for child in scene.children(node) {
        visit(scene, &child, config, out);
    }
}

/// Collect renderers, failing with [`CombineError::NoSpritesFound`] when
/// nothing qualifies.
pub fn collect_sprites<G: SceneGraph>(
    scene: &G,
    root: &G::NodeId,
    explicit_roots: &[G::NodeId],
    config: &CollectConfig,
) -> Result<Vec<Collected<G::NodeId>>, CombineError> {
    let collected = collect_renderers(scene, root, explicit_roots, config);
    if collected.is_empty() {
        tracing::warn!("No sprites found to combine");
        return Err(CombineError::NoSpritesFound);
    }
    Ok(collected)
}

/// Toggle the enabled flag of every renderer the collector would gather.
///
/// Returns the number of renderers toggled.
pub fn toggle_renderers<G: SceneGraphMut>(
    scene: &mut G,
    root: &G::NodeId,
    explicit_roots: &[G::NodeId],
    config: &CollectConfig,
) -> usize {
    let collected = collect_renderers(&*scene, root, explicit_roots, config);
    for entry in &collected {
        scene.toggle_renderer(&entry.node);
    }
    collected.len()
}

//! [`SceneGraph`] over a [`SceneDocument`].

use spritebake_spec::{NodePath, SceneDocument};

use crate::collect::{NodeProbe, SceneGraph, SceneGraphMut, SpriteInstance};

impl SceneGraph for SceneDocument {
    type NodeId = NodePath;

    fn children(&self, node: &NodePath) -> Vec<NodePath> {
        SceneDocument::children(self, node)
    }

    fn probe(&self, path: &NodePath) -> NodeProbe {
        let Some(node) = self.node(path) else {
            return NodeProbe {
                renderer: None,
                has_animator: false,
            };
        };

        let renderer = node.sprite_renderer.as_ref().map(|r| SpriteInstance {
            name: node.name.clone(),
            world_position: [node.position[0], node.position[1]],
            pixel_rect: r.rect,
            texture: r.texture.clone(),
            flip_x: r.flip_x,
            flip_y: r.flip_y,
            sorting_layer: r.sorting_layer,
            sorting_order: r.sorting_order,
            enabled: r.enabled && self.active_in_hierarchy(path),
            has_animator: node.animator,
            material: r.material.clone(),
            tint: r.color,
        });

        NodeProbe {
            renderer,
            has_animator: node.animator,
        }
    }
}

impl SceneGraphMut for SceneDocument {
    fn toggle_renderer(&mut self, path: &NodePath) {
        if let Some(renderer) = self
            .node_mut(path)
            .and_then(|node| node.sprite_renderer.as_mut())
        {
            renderer.enabled = !renderer.enabled;
        }
    }
}

/// Resolve explicit root names to node paths, in order.
///
/// Returns the first name that matches no node as the error.
pub fn resolve_roots(doc: &SceneDocument, names: &[String]) -> Result<Vec<NodePath>, String> {
    names
        .iter()
        .map(|name| doc.find_by_name(name).ok_or_else(|| name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::{collect_renderers, toggle_renderers, CollectConfig};
    use pretty_assertions::assert_eq;
    use spritebake_spec::{SceneNode, SpriteRect, SpriteRendererData};

    fn renderer(texture: &str) -> SpriteRendererData {
        SpriteRendererData {
            texture: texture.to_string(),
            rect: SpriteRect::full(2, 2),
            flip_x: true,
            flip_y: false,
            sorting_layer: 1,
            sorting_order: 2,
            enabled: true,
            material: Some("Mat".to_string()),
            color: [0.5, 1.0, 1.0, 1.0],
        }
    }

    fn document() -> SceneDocument {
        let root = SceneNode::new("Combiner")
            .with_child(
                SceneNode::new("Rock")
                    .with_position(1.5, -2.0, 3.0)
                    .with_renderer(renderer("rocks")),
            )
            .with_child({
                let mut hidden = SceneNode::new("Hidden").with_child(
                    SceneNode::new("Bush").with_renderer(renderer("plants")),
                );
                hidden.active = false;
                hidden
            });
        let mut doc = SceneDocument::new("Level1", root);
        doc.nodes
            .push(SceneNode::new("Tree").with_renderer(renderer("trees")));
        doc
    }

    #[test]
    fn test_renderer_maps_to_instance() {
        let doc = document();
        let rock = doc.find_by_name("Rock").unwrap();
        let instance = doc.probe(&rock).renderer.unwrap();

        assert_eq!(instance.name, "Rock");
        assert_eq!(instance.world_position, [1.5, -2.0]);
        assert_eq!(instance.texture, "rocks");
        assert!(instance.flip_x);
        assert_eq!((instance.sorting_layer, instance.sorting_order), (1, 2));
        assert_eq!(instance.material.as_deref(), Some("Mat"));
        assert!(instance.enabled);
    }

    #[test]
    fn test_inactive_ancestor_disables_renderer() {
        let doc = document();
        let bush = doc.find_by_name("Bush").unwrap();
        assert!(!doc.probe(&bush).renderer.unwrap().enabled);

        let config = CollectConfig {
            skip_disabled: true,
            ..CollectConfig::default()
        };
        let collected = collect_renderers(&doc, &NodePath::root(), &[], &config);
        let names: Vec<_> = collected.iter().map(|c| c.instance.name.as_str()).collect();
        assert_eq!(names, vec!["Rock"]);
    }

    #[test]
    fn test_explicit_roots() {
        let doc = document();
        let roots = resolve_roots(&doc, &["Tree".to_string()]).unwrap();
        let collected = collect_renderers(&doc, &NodePath::root(), &roots, &CollectConfig::default());
        let names: Vec<_> = collected.iter().map(|c| c.instance.name.as_str()).collect();
        assert_eq!(names, vec!["Rock", "Bush", "Tree"]);

        assert_eq!(
            resolve_roots(&doc, &["Tree".to_string(), "Nope".to_string()]),
            Err("Nope".to_string())
        );
    }

    #[test]
    fn test_toggle_flips_renderer_flag_only() {
        let mut doc = document();
        let toggled = toggle_renderers(&mut doc, &NodePath::root(), &[], &CollectConfig::default());
        assert_eq!(toggled, 2);

        let bush = doc.find_by_name("Bush").unwrap();
        let node = doc.node(&bush).unwrap();
        assert!(!node.sprite_renderer.as_ref().unwrap().enabled);
        // Node activity is untouched.
        assert!(!doc.node(&doc.find_by_name("Hidden").unwrap()).unwrap().active);
        assert!(doc.nodes[0].sprite_renderer.as_ref().unwrap().enabled);
    }
}

/*
Display helpers for the model tree: renders the arena as a termtree so the
hierarchy can be inspected without writing a report.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{ModelArena, ModelNodeKind};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for ModelArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &ModelArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                let mut label = node.kind.to_string();
                if let ModelNodeKind::Region(region) = &node.kind {
                    if !region.meta_info.is_empty() {
                        label = format!("{} [{} meta info]", label, region.meta_info.len());
                    }
                }
                let mut child_tree = Tree::new(label);
                for &child_idx in &node.children {
                    build_tree(arena, child_idx, &mut child_tree);
                }
                parent_tree.push(child_tree);
            }
        }

        let mut tree = Tree::new("world".to_string());
        for &root in self.roots() {
            build_tree(self, root, &mut tree);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CarbonBox, CarbonModel, Region};

    #[test]
    fn given_model_when_rendering_tree_then_lists_nested_nodes() {
        let mut model = ModelArena::new();
        let usa = model.add_region(Region::new("USA")).unwrap();
        let calc = model.add_carbon_model(usa, CarbonModel).unwrap();
        model.add_box(calc, CarbonBox::new("soil").unwrap()).unwrap();

        let rendered = model.to_tree_string().to_string();

        assert!(rendered.starts_with("world\n"));
        assert!(rendered.contains("region USA"));
        assert!(rendered.contains("carbon-box-model"));
        assert!(rendered.contains("box soil"));
    }
}

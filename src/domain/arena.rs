use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::entities::{CarbonBox, CarbonFlow, CarbonModel, Region};
use crate::domain::error::{DomainError, DomainResult};

/// The closed set of node kinds in a carbon model tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelNodeKind {
    Region(Region),
    CarbonModel(CarbonModel),
    CarbonBox(CarbonBox),
    CarbonFlow(CarbonFlow),
}

impl ModelNodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ModelNodeKind::Region(_) => "region",
            ModelNodeKind::CarbonModel(_) => "carbon model",
            ModelNodeKind::CarbonBox(_) => "carbon box",
            ModelNodeKind::CarbonFlow(_) => "carbon flow",
        }
    }
}

impl fmt::Display for ModelNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelNodeKind::Region(region) => write!(f, "region {}", region.name()),
            ModelNodeKind::CarbonModel(_) => write!(f, "{}", CarbonModel::xml_name_static()),
            ModelNodeKind::CarbonBox(carbon_box) => write!(f, "box {}", carbon_box.name()),
            ModelNodeKind::CarbonFlow(flow) => {
                write!(f, "flow -> {} ({})", flow.target_name(), flow.fraction)
            }
        }
    }
}

/// Tree node in the arena-based model hierarchy.
#[derive(Debug)]
pub struct ModelNode {
    pub kind: ModelNodeKind,
    /// Index of parent node in the arena, None for regions
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based tree holding Region -> CarbonModel -> CarbonBox -> CarbonFlow.
///
/// Regions are the roots. The `add_*` methods enforce the four-level shape, so
/// every tree built through them can be walked without kind checks.
#[derive(Debug)]
pub struct ModelArena {
    arena: Arena<ModelNode>,
    /// Region indices in insertion order
    roots: Vec<Index>,
}

impl Default for ModelArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn insert_node(&mut self, kind: ModelNodeKind, parent: Option<Index>) -> Index {
        let node = ModelNode {
            kind,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    fn insert_child(
        &mut self,
        parent: Index,
        kind: ModelNodeKind,
        expected_parent: &'static str,
    ) -> DomainResult<Index> {
        let parent_kind = self.get_node(parent).ok_or(DomainError::DanglingNode)?.kind.label();
        if parent_kind != expected_parent {
            return Err(DomainError::InvalidHierarchy {
                parent: parent_kind,
                child: kind.label(),
            });
        }
        Ok(self.insert_node(kind, Some(parent)))
    }

    pub fn add_region(&mut self, region: Region) -> DomainResult<Index> {
        if self.find_region(region.name()).is_some() {
            return Err(DomainError::DuplicateRegion(region.name));
        }
        Ok(self.insert_node(ModelNodeKind::Region(region), None))
    }

    pub fn add_carbon_model(&mut self, region: Index, model: CarbonModel) -> DomainResult<Index> {
        self.insert_child(region, ModelNodeKind::CarbonModel(model), "region")
    }

    pub fn add_box(&mut self, model: Index, carbon_box: CarbonBox) -> DomainResult<Index> {
        self.insert_child(model, ModelNodeKind::CarbonBox(carbon_box), "carbon model")
    }

    pub fn add_flow(&mut self, carbon_box: Index, flow: CarbonFlow) -> DomainResult<Index> {
        self.insert_child(carbon_box, ModelNodeKind::CarbonFlow(flow), "carbon box")
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&ModelNode> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.roots
            .iter()
            .filter_map(|&idx| match self.get_node(idx).map(|node| &node.kind) {
                Some(ModelNodeKind::Region(region)) => Some(region),
                _ => None,
            })
    }

    pub fn find_region(&self, name: &str) -> Option<Index> {
        self.roots.iter().copied().find(|&idx| {
            matches!(
                self.get_node(idx).map(|node| &node.kind),
                Some(ModelNodeKind::Region(region)) if region.name() == name
            )
        })
    }

    /// Pre-order traversal over all regions.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> ModelIterator<'_> {
        ModelIterator::new(self)
    }

    /// Number of levels below and including the deepest region.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }
}

pub struct ModelIterator<'a> {
    arena: &'a ModelArena,
    stack: Vec<Index>,
}

impl<'a> ModelIterator<'a> {
    fn new(arena: &'a ModelArena) -> Self {
        let stack = arena.roots().iter().rev().copied().collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for ModelIterator<'a> {
    type Item = (Index, &'a ModelNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ModelArena {
        let mut model = ModelArena::new();
        let usa = model.add_region(Region::new("USA")).unwrap();
        let calc = model.add_carbon_model(usa, CarbonModel).unwrap();
        let soil = model
            .add_box(calc, CarbonBox::new("soil").unwrap().with_stock(0, 1.0))
            .unwrap();
        model.add_flow(soil, CarbonFlow::new("atmosphere", 0.2)).unwrap();
        model.add_box(calc, CarbonBox::new("vegetation").unwrap()).unwrap();
        model.add_region(Region::new("Canada")).unwrap();
        model
    }

    #[test]
    fn given_model_when_iterating_then_visits_in_preorder() {
        let model = sample();
        let labels: Vec<String> = model.iter().map(|(_, node)| node.kind.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "region USA",
                "carbon-box-model",
                "box soil",
                "flow -> atmosphere (0.2)",
                "box vegetation",
                "region Canada",
            ]
        );
        assert_eq!(model.depth(), 4);
    }

    #[test]
    fn given_box_under_region_when_adding_then_rejects_hierarchy() {
        let mut model = ModelArena::new();
        let usa = model.add_region(Region::new("USA")).unwrap();
        let result = model.add_box(usa, CarbonBox::new("soil").unwrap());
        assert!(matches!(
            result,
            Err(DomainError::InvalidHierarchy {
                parent: "region",
                child: "carbon box"
            })
        ));
    }

    #[test]
    fn given_existing_region_when_adding_same_name_then_errors() {
        let mut model = sample();
        assert!(matches!(
            model.add_region(Region::new("USA")),
            Err(DomainError::DuplicateRegion(name)) if name == "USA"
        ));
    }

    #[test]
    fn given_model_when_finding_region_then_returns_root_index() {
        let model = sample();
        let idx = model.find_region("Canada").unwrap();
        assert_eq!(model.roots()[1], idx);
        assert!(model.find_region("Mexico").is_none());
        let names: Vec<&str> = model.regions().map(Region::name).collect();
        assert_eq!(names, vec!["USA", "Canada"]);
    }
}

//! Builds a [`ModelArena`] from a `<world>` model document.

use std::path::Path;

use generational_arena::Index;
use roxmltree::{Document, Node};
use tracing::{debug, instrument, warn};

use crate::domain::arena::ModelArena;
use crate::domain::entities::{CarbonBox, CarbonFlow, CarbonModel, Region};
use crate::domain::error::{DomainError, DomainResult};
use crate::meta_info::ObjectMetaInfo;
use crate::xml::{XmlPair, XmlValue};

/// Root tag of a model document.
pub const WORLD_TAG: &str = "world";
pub const STOCK_TAG: &str = "stock";
pub const FRACTION_TAG: &str = "fraction";

/// Constructs model trees from XML documents.
///
/// Unknown elements at world and region level are skipped with a warning.
/// Region meta info that fails to parse is discarded.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    discarded_meta_info: usize,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `object-meta-info` records rejected by the last build.
    pub fn discarded_meta_info(&self) -> usize {
        self.discarded_meta_info
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build_from_file(&mut self, path: &Path) -> DomainResult<ModelArena> {
        if !path.is_file() {
            return Err(DomainError::FileNotFound(path.to_path_buf()));
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| DomainError::MalformedDocument {
                message: format!("read {}: {}", path.display(), e),
            })?;
        self.build_from_str(&content)
    }

    #[instrument(level = "debug", skip_all)]
    pub fn build_from_str(&mut self, content: &str) -> DomainResult<ModelArena> {
        self.discarded_meta_info = 0;

        let doc = Document::parse(content).map_err(|e| DomainError::MalformedDocument {
            message: e.to_string(),
        })?;
        let world = doc.root_element();
        if world.tag_name().name() != WORLD_TAG {
            return Err(DomainError::InvalidModel {
                message: format!(
                    "expected <{}> root, found <{}>",
                    WORLD_TAG,
                    world.tag_name().name()
                ),
            });
        }

        let mut model = ModelArena::new();
        for child in world.children().filter(Node::is_element) {
            if child.tag_name().name() == Region::xml_name_static() {
                self.parse_region(&mut model, child)?;
            } else {
                warn!("skipping unknown element <{}> in <{}>", child.tag_name().name(), WORLD_TAG);
            }
        }
        debug!("built model with {} nodes", model.len());
        Ok(model)
    }

    fn parse_region(&mut self, model: &mut ModelArena, node: Node<'_, '_>) -> DomainResult<()> {
        let name = required_attribute(node, "name")?;
        let mut region = Region::new(name);

        for child in node.children().filter(Node::is_element) {
            if child.tag_name().name() == ObjectMetaInfo::<f64>::xml_name_static() {
                let mut info = ObjectMetaInfo::<f64>::default();
                match info.try_parse(child) {
                    Ok(()) => region.meta_info.push(info),
                    Err(e) => {
                        warn!("discarding meta info in region {}: {}", region.name(), e);
                        self.discarded_meta_info += 1;
                    }
                }
            }
        }

        let region_idx = model.add_region(region)?;
        for child in node.children().filter(Node::is_element) {
            match child.tag_name().name() {
                tag if tag == CarbonModel::xml_name_static() => {
                    let model_idx = model.add_carbon_model(region_idx, CarbonModel)?;
                    parse_carbon_model(model, model_idx, child)?;
                }
                tag if tag == ObjectMetaInfo::<f64>::xml_name_static() => {}
                other => warn!("skipping unknown element <{}> in <{}>", other, Region::xml_name_static()),
            }
        }
        Ok(())
    }
}

fn parse_carbon_model(model: &mut ModelArena, model_idx: Index, node: Node<'_, '_>) -> DomainResult<()> {
    for child in node.children().filter(Node::is_element) {
        if child.tag_name().name() != CarbonBox::xml_name_static() {
            return Err(unexpected(child, CarbonModel::xml_name_static()));
        }

        let mut carbon_box = CarbonBox::new(required_attribute(child, "name")?)?;
        let mut flows = Vec::new();
        for grandchild in child.children().filter(Node::is_element) {
            match grandchild.tag_name().name() {
                STOCK_TAG => {
                    let period = parse_attribute::<usize>(grandchild, "period")?;
                    let value = parse_text::<f64>(grandchild)?;
                    carbon_box.set_stock(period, value);
                }
                tag if tag == CarbonFlow::xml_name_static() => flows.push(parse_flow(grandchild)?),
                _ => return Err(unexpected(grandchild, CarbonBox::xml_name_static())),
            }
        }

        let box_idx = model.add_box(model_idx, carbon_box)?;
        for flow in flows {
            model.add_flow(box_idx, flow)?;
        }
    }
    Ok(())
}

fn parse_flow(node: Node<'_, '_>) -> DomainResult<CarbonFlow> {
    let target = required_attribute(node, "target")?;
    let fraction = node
        .children()
        .find(|child| child.has_tag_name(FRACTION_TAG))
        .ok_or_else(|| DomainError::InvalidModel {
            message: format!("flow to {} has no <{}>", target, FRACTION_TAG),
        })
        .and_then(parse_text::<f64>)?;
    Ok(CarbonFlow::new(target, fraction))
}

fn required_attribute<'a>(node: Node<'a, '_>, attr: &str) -> DomainResult<&'a str> {
    match node.attribute(attr) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DomainError::InvalidModel {
            message: format!("<{}> requires a {} attribute", node.tag_name().name(), attr),
        }),
    }
}

fn parse_attribute<T: XmlValue>(node: Node<'_, '_>, attr: &str) -> DomainResult<T> {
    let raw = required_attribute(node, attr)?;
    T::from_xml_text(raw).ok_or_else(|| DomainError::InvalidModel {
        message: format!("invalid {}={:?} on <{}>", attr, raw, node.tag_name().name()),
    })
}

fn parse_text<T: XmlValue + Default>(node: Node<'_, '_>) -> DomainResult<T> {
    let mut pair = XmlPair::<T>::default();
    if pair.parse(node) {
        Ok(pair.into_value())
    } else {
        Err(DomainError::InvalidModel {
            message: format!("invalid value in <{}>", node.tag_name().name()),
        })
    }
}

fn unexpected(node: Node<'_, '_>, parent: &str) -> DomainError {
    DomainError::InvalidModel {
        message: format!("unexpected element <{}> in <{}>", node.tag_name().name(), parent),
    }
}

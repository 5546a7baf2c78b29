//! Named value records attached to model objects.
//!
//! An [`ObjectMetaInfo`] reads and writes itself as
//!
//! ```text
//! <object-meta-info name="gdp-scale">
//!     <value>1.2</value>
//! </object-meta-info>
//! ```
//!
//! Parsing is strict: the record is complete only with a non-empty `name`
//! attribute and exactly one `value` child. Any other child element rejects
//! the whole record.

use std::io::{self, Write};

use roxmltree::Node;
use thiserror::Error;
use tracing::warn;

use crate::xml::{write_closing_tag, write_element, write_opening_tag, Tabs, XmlPair, XmlValue};

/// Tag name shared by every `ObjectMetaInfo<T>` regardless of `T`.
pub const OBJECT_META_INFO_TAG: &str = "object-meta-info";

const VALUE_TAG: &str = "value";

/// Reason an `object-meta-info` node was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaInfoError {
    #[error("node is not an element")]
    NotAnElement,

    #[error("missing name attribute")]
    MissingName,

    #[error("missing value element")]
    MissingValue,

    #[error("expected one value element, found {0}")]
    DuplicateValue(usize),

    #[error("unrecognized element <{0}>")]
    UnknownField(String),

    #[error("value element cannot be converted")]
    InvalidValue,
}

/// A `{name, value}` record with a strict two-field parse contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectMetaInfo<T = f64> {
    name: String,
    value: T,
}

impl<T> ObjectMetaInfo<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    pub fn xml_name_static() -> &'static str {
        OBJECT_META_INFO_TAG
    }
}

impl<T: XmlValue + Default> ObjectMetaInfo<T> {
    /// Parse the record from `node`, returning whether it is complete.
    ///
    /// On `false` the record may hold whatever was read before the failure was
    /// detected; callers should discard it.
    pub fn parse(&mut self, node: Node<'_, '_>) -> bool {
        self.try_parse(node).is_ok()
    }

    /// Same as [`parse`](Self::parse) but reports why the node was rejected.
    ///
    /// Comments and processing instructions are skipped like text, so an
    /// annotated record still parses.
    pub fn try_parse(&mut self, node: Node<'_, '_>) -> Result<(), MetaInfoError> {
        if !node.is_element() {
            return Err(MetaInfoError::NotAnElement);
        }

        let mut num_parsed = 0usize;
        let mut num_values = 0usize;

        self.set_name(node.attribute("name").unwrap_or_default());
        if !self.name.is_empty() {
            num_parsed += 1;
        }

        for child in node.children() {
            // text, comments and processing instructions are not fields
            if !child.is_element() {
                continue;
            }

            let tag = child.tag_name().name();
            if tag == VALUE_TAG {
                let mut pair = XmlPair::<T>::default();
                if !pair.parse(child) {
                    return Err(MetaInfoError::InvalidValue);
                }
                self.set_value(pair.into_value());
                num_parsed += 1;
                num_values += 1;
            } else {
                warn!(
                    "Unrecognized text string: {} found while parsing {}.",
                    tag,
                    Self::xml_name_static()
                );
                return Err(MetaInfoError::UnknownField(tag.to_string()));
            }
        }

        // name plus exactly one value
        if num_parsed == 2 && num_values == 1 {
            return Ok(());
        }
        Err(if num_values > 1 {
            MetaInfoError::DuplicateValue(num_values)
        } else if self.name.is_empty() {
            MetaInfoError::MissingName
        } else {
            MetaInfoError::MissingValue
        })
    }
}

impl<T: XmlValue> ObjectMetaInfo<T> {
    /// Write the record in the input dialect.
    pub fn to_input_xml<W: Write + ?Sized>(&self, out: &mut W, tabs: &mut Tabs) -> io::Result<()> {
        write_opening_tag(Self::xml_name_static(), out, tabs, &self.name)?;
        write_element(&self.value, VALUE_TAG, out, tabs)?;
        write_closing_tag(Self::xml_name_static(), out, tabs)
    }

    /// Write the record in the debug dialect.
    ///
    /// The period is accepted for symmetry with other period-scoped debug
    /// writers; the emitted text is the same as [`to_input_xml`](Self::to_input_xml).
    pub fn to_debug_xml<W: Write + ?Sized>(
        &self,
        _period: usize,
        out: &mut W,
        tabs: &mut Tabs,
    ) -> io::Result<()> {
        write_opening_tag(Self::xml_name_static(), out, tabs, &self.name)?;
        write_element(&self.value, VALUE_TAG, out, tabs)?;
        write_closing_tag(Self::xml_name_static(), out, tabs)
    }
}

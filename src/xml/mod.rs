//! Tagged-text (XML) helpers shared by every writer and parser in the crate.
//!
//! Writers append to any `std::io::Write` sink and track indentation through a
//! [`Tabs`] handle owned by the caller. Readers work on `roxmltree` nodes.

pub mod pair;
pub mod tabs;
pub mod writer;

pub use pair::{XmlPair, XmlValue};
pub use tabs::Tabs;
pub use writer::{
    escape, escape_attribute, write_closing_tag, write_element, write_element_with_attrs,
    write_opening_tag, write_opening_tag_with_attrs,
};

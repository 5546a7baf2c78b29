//! ccreport: region-scoped carbon stock reports over tagged XML.
//!
//! The crate has two reusable halves sharing the same tagged-text contract:
//!
//! - [`report::CarbonPrinter`], a [`report::ModelVisitor`] that prints the
//!   carbon boxes of one named region for one period as nested tags.
//! - [`meta_info::ObjectMetaInfo`], a `{name, value}` record that writes itself
//!   in the input and debug dialects and parses itself back under a strict
//!   two-field contract.
//!
//! Layers, innermost first: `xml` → `meta_info` → `domain` → `report` → `cli`.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod meta_info;
pub mod report;
pub mod tree_traits;
pub mod util;
pub mod xml;

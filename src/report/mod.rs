//! Report layer: the model visitor contract and the writers built on it.
//!
//! The model drives the traversal ([`ModelArena::accept`](crate::domain::ModelArena::accept));
//! visitors only react to the enter/exit calls.

pub mod carbon_printer;
pub mod debug_writer;
pub mod error;
pub mod input_writer;
pub mod visitor;

pub use carbon_printer::{CarbonPrinter, CARBON_STOCK_TAG, PERIOD_TAG};
pub use debug_writer::DebugXmlWriter;
pub use error::{ReportError, ReportResult};
pub use input_writer::InputXmlWriter;
pub use visitor::ModelVisitor;

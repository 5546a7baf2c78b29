//! Region-scoped carbon stock report.
//!
//! For the selected region and the visited period the printer emits
//!
//! ```text
//! <period value="3">
//!     <carbon-box-model>
//!         <soil>
//!             <carbon-stock>42</carbon-stock>
//!         </soil>
//!     </carbon-box-model>
//! </period>
//! ```
//!
//! Every other region produces no output.

use std::io::Write;

use tracing::debug;

use crate::domain::{CarbonBox, CarbonFlow, CarbonModel, Region};
use crate::report::error::ReportResult;
use crate::report::visitor::ModelVisitor;
use crate::xml::{
    write_closing_tag, write_element, write_opening_tag, write_opening_tag_with_attrs, Tabs,
};

pub const PERIOD_TAG: &str = "period";
pub const CARBON_STOCK_TAG: &str = "carbon-stock";

/// Prints the carbon model of one region. One instance per traversal.
pub struct CarbonPrinter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    correct_region: bool,
    region_to_print: String,
    tabs: Tabs,
}

impl<'a, W: Write + ?Sized> CarbonPrinter<'a, W> {
    pub fn new(region_to_print: impl Into<String>, out: &'a mut W) -> Self {
        Self {
            out,
            correct_region: false,
            region_to_print: region_to_print.into(),
            tabs: Tabs::new(),
        }
    }

    pub fn region_to_print(&self) -> &str {
        &self.region_to_print
    }

    /// Whether the most recently entered region is the one being printed.
    pub fn is_printing(&self) -> bool {
        self.correct_region
    }

    pub fn tabs(&self) -> &Tabs {
        &self.tabs
    }
}

impl<W: Write + ?Sized> ModelVisitor for CarbonPrinter<'_, W> {
    fn start_visit_region(&mut self, region: &Region, period: usize) -> ReportResult<()> {
        self.correct_region = region.name() == self.region_to_print;
        if self.correct_region {
            debug!("printing region {} for period {}", region.name(), period);
        }
        Ok(())
    }

    fn start_visit_carbon_model(&mut self, _model: &CarbonModel, period: usize) -> ReportResult<()> {
        if !self.correct_region {
            return Ok(());
        }
        let period = period.to_string();
        write_opening_tag_with_attrs(PERIOD_TAG, self.out, &mut self.tabs, &[("value", &period)])?;
        write_opening_tag(CarbonModel::xml_name_static(), self.out, &mut self.tabs, "")?;
        Ok(())
    }

    fn end_visit_carbon_model(&mut self, _model: &CarbonModel, _period: usize) -> ReportResult<()> {
        if !self.correct_region {
            return Ok(());
        }
        write_closing_tag(CarbonModel::xml_name_static(), self.out, &mut self.tabs)?;
        write_closing_tag(PERIOD_TAG, self.out, &mut self.tabs)?;
        Ok(())
    }

    fn start_visit_carbon_box(&mut self, carbon_box: &CarbonBox, period: usize) -> ReportResult<()> {
        if !self.correct_region {
            return Ok(());
        }
        write_opening_tag(carbon_box.name(), self.out, &mut self.tabs, "")?;
        write_element(&carbon_box.stock(period), CARBON_STOCK_TAG, self.out, &self.tabs)?;
        write_closing_tag(carbon_box.name(), self.out, &mut self.tabs)?;
        Ok(())
    }

    /// Extension point: flows are visited but not part of the stock report.
    fn start_visit_carbon_flow(&mut self, _flow: &CarbonFlow, _period: usize) -> ReportResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_other_region_when_visiting_box_then_prints_nothing() {
        let mut out = Vec::new();
        let soil = CarbonBox::new("soil").unwrap().with_stock(3, 42.0);
        {
            let mut printer = CarbonPrinter::new("USA", &mut out);
            printer.start_visit_region(&Region::new("Canada"), 3).unwrap();
            printer.start_visit_carbon_model(&CarbonModel, 3).unwrap();
            printer.start_visit_carbon_box(&soil, 3).unwrap();
            printer.end_visit_carbon_model(&CarbonModel, 3).unwrap();
            assert!(!printer.is_printing());
        }
        assert!(out.is_empty());
    }

    #[test]
    fn given_target_region_when_visiting_box_then_prints_period_model_and_box() {
        let mut out = Vec::new();
        let soil = CarbonBox::new("soil").unwrap().with_stock(3, 42.0);
        {
            let mut printer = CarbonPrinter::new("USA", &mut out);
            printer.start_visit_region(&Region::new("USA"), 3).unwrap();
            printer.start_visit_carbon_model(&CarbonModel, 3).unwrap();
            printer.start_visit_carbon_box(&soil, 3).unwrap();
            printer.start_visit_carbon_flow(&CarbonFlow::new("air", 0.1), 3).unwrap();
            printer.end_visit_carbon_model(&CarbonModel, 3).unwrap();
            printer.end_visit_region(&Region::new("USA"), 3).unwrap();
            assert_eq!(printer.tabs().depth(), 0);
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<period value=\"3\">\n\
             \t<carbon-box-model>\n\
             \t\t<soil>\n\
             \t\t\t<carbon-stock>42</carbon-stock>\n\
             \t\t</soil>\n\
             \t</carbon-box-model>\n\
             </period>\n"
        );
    }
}

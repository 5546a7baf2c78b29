//! Period-scoped debug dump of all regions, including region meta info.

use std::io::Write;

use tracing::instrument;

use crate::domain::{CarbonBox, CarbonFlow, CarbonModel, ModelArena, Region, FRACTION_TAG, WORLD_TAG};
use crate::report::carbon_printer::{CARBON_STOCK_TAG, PERIOD_TAG};
use crate::report::error::ReportResult;
use crate::report::visitor::ModelVisitor;
use crate::xml::{
    write_closing_tag, write_element, write_opening_tag, write_opening_tag_with_attrs, Tabs,
};

pub struct DebugXmlWriter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    tabs: Tabs,
}

impl<'a, W: Write + ?Sized> DebugXmlWriter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            tabs: Tabs::new(),
        }
    }

    /// Write the state of every region for `period`.
    #[instrument(level = "debug", skip(self, model))]
    pub fn write_model(&mut self, model: &ModelArena, period: usize) -> ReportResult<()> {
        let value = period.to_string();
        write_opening_tag(WORLD_TAG, self.out, &mut self.tabs, "")?;
        write_opening_tag_with_attrs(PERIOD_TAG, self.out, &mut self.tabs, &[("value", &value)])?;
        model.accept(self, period)?;
        write_closing_tag(PERIOD_TAG, self.out, &mut self.tabs)?;
        write_closing_tag(WORLD_TAG, self.out, &mut self.tabs)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write + ?Sized> ModelVisitor for DebugXmlWriter<'_, W> {
    fn start_visit_region(&mut self, region: &Region, period: usize) -> ReportResult<()> {
        write_opening_tag(Region::xml_name_static(), self.out, &mut self.tabs, region.name())?;
        for info in &region.meta_info {
            info.to_debug_xml(period, self.out, &mut self.tabs)?;
        }
        Ok(())
    }

    fn end_visit_region(&mut self, _region: &Region, _period: usize) -> ReportResult<()> {
        write_closing_tag(Region::xml_name_static(), self.out, &mut self.tabs)?;
        Ok(())
    }

    fn start_visit_carbon_model(&mut self, _model: &CarbonModel, _period: usize) -> ReportResult<()> {
        write_opening_tag(CarbonModel::xml_name_static(), self.out, &mut self.tabs, "")?;
        Ok(())
    }

    fn end_visit_carbon_model(&mut self, _model: &CarbonModel, _period: usize) -> ReportResult<()> {
        write_closing_tag(CarbonModel::xml_name_static(), self.out, &mut self.tabs)?;
        Ok(())
    }

    fn start_visit_carbon_box(&mut self, carbon_box: &CarbonBox, period: usize) -> ReportResult<()> {
        write_opening_tag(CarbonBox::xml_name_static(), self.out, &mut self.tabs, carbon_box.name())?;
        write_element(&carbon_box.stock(period), CARBON_STOCK_TAG, self.out, &self.tabs)?;
        Ok(())
    }

    fn end_visit_carbon_box(&mut self, _carbon_box: &CarbonBox, _period: usize) -> ReportResult<()> {
        write_closing_tag(CarbonBox::xml_name_static(), self.out, &mut self.tabs)?;
        Ok(())
    }

    fn start_visit_carbon_flow(&mut self, flow: &CarbonFlow, _period: usize) -> ReportResult<()> {
        write_opening_tag_with_attrs(
            CarbonFlow::xml_name_static(),
            self.out,
            &mut self.tabs,
            &[("target", flow.target_name())],
        )?;
        write_element(&flow.fraction, FRACTION_TAG, self.out, &self.tabs)?;
        write_closing_tag(CarbonFlow::xml_name_static(), self.out, &mut self.tabs)?;
        Ok(())
    }
}

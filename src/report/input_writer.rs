//! Writes a whole model back in the model document format read by
//! [`ModelBuilder`](crate::domain::ModelBuilder).

use std::io::Write;

use tracing::instrument;

use crate::domain::{
    CarbonBox, CarbonFlow, CarbonModel, ModelArena, Region, FRACTION_TAG, STOCK_TAG, WORLD_TAG,
};
use crate::report::error::ReportResult;
use crate::report::visitor::ModelVisitor;
use crate::xml::{
    write_closing_tag, write_element, write_element_with_attrs, write_opening_tag,
    write_opening_tag_with_attrs, Tabs,
};

pub struct InputXmlWriter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    tabs: Tabs,
}

impl<'a, W: Write + ?Sized> InputXmlWriter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            tabs: Tabs::new(),
        }
    }

    /// Write every region with all stored stock periods.
    #[instrument(level = "debug", skip_all)]
    pub fn write_model(&mut self, model: &ModelArena) -> ReportResult<()> {
        write_opening_tag(WORLD_TAG, self.out, &mut self.tabs, "")?;
        // stocks are written for all periods, the pass period is unused
        model.accept(self, 0)?;
        write_closing_tag(WORLD_TAG, self.out, &mut self.tabs)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write + ?Sized> ModelVisitor for InputXmlWriter<'_, W> {
    fn start_visit_region(&mut self, region: &Region, _period: usize) -> ReportResult<()> {
        write_opening_tag(Region::xml_name_static(), self.out, &mut self.tabs, region.name())?;
        for info in &region.meta_info {
            info.to_input_xml(self.out, &mut self.tabs)?;
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

    fn start_visit_carbon_box(&mut self, carbon_box: &CarbonBox, _period: usize) -> ReportResult<()> {
        write_opening_tag(CarbonBox::xml_name_static(), self.out, &mut self.tabs, carbon_box.name())?;
        for (period, value) in carbon_box.stocks().iter() {
            let period = period.to_string();
            write_element_with_attrs(&value, STOCK_TAG, self.out, &self.tabs, &[("period", &period)])?;
        }
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

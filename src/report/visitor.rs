//! Visitor contract and the traversal driver over [`ModelArena`].

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::{
    CarbonBox, CarbonFlow, CarbonModel, DomainError, ModelArena, ModelNodeKind, ModelTime, Region,
};
use crate::report::error::ReportResult;

/// Callbacks invoked by [`ModelArena::accept`] in strict enter/exit nesting.
///
/// Every method defaults to a no-op so visitors implement only the levels
/// they report on. Errors abort the traversal and are returned to the caller.
pub trait ModelVisitor {
    fn start_visit_region(&mut self, _region: &Region, _period: usize) -> ReportResult<()> {
        Ok(())
    }

    fn end_visit_region(&mut self, _region: &Region, _period: usize) -> ReportResult<()> {
        Ok(())
    }

    fn start_visit_carbon_model(&mut self, _model: &CarbonModel, _period: usize) -> ReportResult<()> {
        Ok(())
    }

    fn end_visit_carbon_model(&mut self, _model: &CarbonModel, _period: usize) -> ReportResult<()> {
        Ok(())
    }

    fn start_visit_carbon_box(&mut self, _carbon_box: &CarbonBox, _period: usize) -> ReportResult<()> {
        Ok(())
    }

    fn end_visit_carbon_box(&mut self, _carbon_box: &CarbonBox, _period: usize) -> ReportResult<()> {
        Ok(())
    }

    fn start_visit_carbon_flow(&mut self, _flow: &CarbonFlow, _period: usize) -> ReportResult<()> {
        Ok(())
    }

    fn end_visit_carbon_flow(&mut self, _flow: &CarbonFlow, _period: usize) -> ReportResult<()> {
        Ok(())
    }
}

impl ModelArena {
    /// Walk every region for one period, calling `visitor` on the way down and up.
    #[instrument(level = "debug", skip(self, visitor))]
    pub fn accept<V: ModelVisitor + ?Sized>(&self, visitor: &mut V, period: usize) -> ReportResult<()> {
        for &root in self.roots() {
            self.visit_node(root, visitor, period)?;
        }
        Ok(())
    }

    /// Like [`accept`](Self::accept) but rejects periods outside `time`.
    pub fn accept_with_time<V: ModelVisitor + ?Sized>(
        &self,
        visitor: &mut V,
        period: usize,
        time: &ModelTime,
    ) -> ReportResult<()> {
        time.check_period(period)?;
        self.accept(visitor, period)
    }

    /// One full pass per model period, in period order.
    pub fn accept_all_periods<V: ModelVisitor + ?Sized>(
        &self,
        visitor: &mut V,
        time: &ModelTime,
    ) -> ReportResult<()> {
        debug!("visiting {}", time);
        for period in 0..time.periods {
            self.accept(visitor, period)?;
        }
        Ok(())
    }

    fn visit_node<V: ModelVisitor + ?Sized>(
        &self,
        idx: Index,
        visitor: &mut V,
        period: usize,
    ) -> ReportResult<()> {
        let node = self.get_node(idx).ok_or(DomainError::DanglingNode)?;
        match &node.kind {
            ModelNodeKind::Region(region) => {
                visitor.start_visit_region(region, period)?;
                self.visit_children(&node.children, visitor, period)?;
                visitor.end_visit_region(region, period)
            }
            ModelNodeKind::CarbonModel(model) => {
                visitor.start_visit_carbon_model(model, period)?;
                self.visit_children(&node.children, visitor, period)?;
                visitor.end_visit_carbon_model(model, period)
            }
            ModelNodeKind::CarbonBox(carbon_box) => {
                visitor.start_visit_carbon_box(carbon_box, period)?;
                self.visit_children(&node.children, visitor, period)?;
                visitor.end_visit_carbon_box(carbon_box, period)
            }
            ModelNodeKind::CarbonFlow(flow) => {
                visitor.start_visit_carbon_flow(flow, period)?;
                visitor.end_visit_carbon_flow(flow, period)
            }
        }
    }

    fn visit_children<V: ModelVisitor + ?Sized>(
        &self,
        children: &[Index],
        visitor: &mut V,
        period: usize,
    ) -> ReportResult<()> {
        for &child in children {
            self.visit_node(child, visitor, period)?;
        }
        Ok(())
    }
}

//! 垂直平分线 Action
//!
//! 依次选择两个不同的已有点。同一无序点对只允许一条垂直平分线。

use crate::action::{Action, ActionContext, ActionResult};
use zgeo_core::element::{Element, Geometry, PerpendicularBisector};
use zgeo_core::pending::{PendingConstruction, Tool};

/// 垂直平分线 Action
pub struct PerpendicularBisectorAction;

impl PerpendicularBisectorAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PerpendicularBisectorAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PerpendicularBisectorAction {
    fn tool(&self) -> Tool {
        Tool::PerpendicularBisector
    }

    fn reset(&mut self) {}

    fn on_pointer_down(&mut self, ctx: &ActionContext) -> ActionResult {
        let target = ctx.snap_target().map(|t| t.id);

        match (ctx.pending(), target) {
            (Some(PendingConstruction::PerpendicularBisector { first }), Some(second)) => {
                let first = *first;
                if first == second || ctx.store.has_perpendicular_bisector(first, second) {
                    return ActionResult::Cancel;
                }
                let bisector = PerpendicularBisector::new(first, second);
                ActionResult::Commit(vec![Element::new(Geometry::PerpendicularBisector(bisector))])
            }
            (Some(_), _) => ActionResult::Cancel,
            (None, Some(first)) => {
                ActionResult::Stage(PendingConstruction::PerpendicularBisector { first })
            }
            (None, None) => ActionResult::Continue,
        }
    }

    fn get_prompt(&self, pending: Option<&PendingConstruction>) -> &str {
        match pending {
            Some(_) => "选择第二个点:",
            None => "选择第一个点:",
        }
    }
}

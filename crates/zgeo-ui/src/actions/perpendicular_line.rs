//! 垂线 Action
//!
//! 选择一个已有点和一个类直线元素，顺序不限。点的优先级高于直线。

use crate::action::{Action, ActionContext, ActionResult};
use zgeo_core::element::{Element, ElementId, Geometry, PerpendicularLine};
use zgeo_core::pending::{PendingConstruction, PendingPerpendicular, Tool};

/// 垂线 Action
pub struct PerpendicularLineAction;

impl PerpendicularLineAction {
    pub fn new() -> Self {
        Self
    }

    /// 光标下的点（优先）或类直线元素
    fn pick(ctx: &ActionContext) -> Option<PendingPerpendicular> {
        if let Some(target) = ctx.snap_target() {
            return Some(PendingPerpendicular::Point { point: target.id });
        }
        ctx.line_like_at().map(|line| PendingPerpendicular::Line { line })
    }

    fn commit(ctx: &ActionContext, point: ElementId, reference: ElementId) -> ActionResult {
        if ctx.store.has_perpendicular_line(point, reference) {
            return ActionResult::Cancel;
        }
        let line = PerpendicularLine::new(point, reference);
        ActionResult::Commit(vec![Element::new(Geometry::PerpendicularLine(line))])
    }
}

impl Default for PerpendicularLineAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for PerpendicularLineAction {
    fn tool(&self) -> Tool {
        Tool::PerpendicularLine
    }

    fn reset(&mut self) {}

    fn on_pointer_down(&mut self, ctx: &ActionContext) -> ActionResult {
        let picked = Self::pick(ctx);
        let Some(PendingConstruction::PerpendicularLine(staged)) = ctx.pending() else {
            return match picked {
                Some(first) => ActionResult::Stage(PendingConstruction::PerpendicularLine(first)),
                None => ActionResult::Continue,
            };
        };

        match (*staged, picked) {
            (PendingPerpendicular::Point { point }, Some(PendingPerpendicular::Line { line })) => {
                Self::commit(ctx, point, line)
            }
            (PendingPerpendicular::Line { line }, Some(PendingPerpendicular::Point { point })) => {
                Self::commit(ctx, point, line)
            }
            // 同类或空白
            _ => ActionResult::Cancel,
        }
    }

    fn get_prompt(&self, pending: Option<&PendingConstruction>) -> &str {
        match pending {
            Some(PendingConstruction::PerpendicularLine(staged)) => match staged {
                PendingPerpendicular::Point { .. } => "选择参考直线:",
                PendingPerpendicular::Line { .. } => "选择垂线经过的点:",
            },
            _ => "选择点或参考直线:",
        }
    }
}

//! 绘制直线 Action
//!
//! 两次点击：每次复用捕捉到的已有点，或暂存一个新点。新点与直线一起整批提交。

use crate::action::{Action, ActionContext, ActionResult};
use zgeo_core::element::{Element, Geometry, Line};
use zgeo_core::pending::{PendingConstruction, Tool};

/// 绘制直线 Action
pub struct DrawLineAction;

impl DrawLineAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DrawLineAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for DrawLineAction {
    fn tool(&self) -> Tool {
        Tool::Line
    }

    fn reset(&mut self) {}

    fn on_pointer_down(&mut self, ctx: &ActionContext) -> ActionResult {
        let point = ctx.staged_point();
        let Some(PendingConstruction::Line { first }) = ctx.pending() else {
            return ActionResult::Stage(PendingConstruction::Line { first: point });
        };

        // 同一点点两次
        if ctx.hits_staged(first, &point) {
            return ActionResult::Cancel;
        }

        let line = Element::new(Geometry::Line(Line::new(first.id(), point.id())));
        let mut batch = Vec::with_capacity(3);
        for staged in [first, &point] {
            if staged.is_new {
                batch.push(staged.element.clone());
            }
        }
        batch.push(line);
        ActionResult::Commit(batch)
    }

    fn get_prompt(&self, pending: Option<&PendingConstruction>) -> &str {
        match pending {
            Some(PendingConstruction::Line { .. }) => "指定第二点:",
            _ => "指定第一点:",
        }
    }
}

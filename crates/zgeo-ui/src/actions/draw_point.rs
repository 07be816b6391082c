//! 绘制点 Action

use crate::action::{Action, ActionContext, ActionResult};
use zgeo_core::element::{Element, Geometry, Point};
use zgeo_core::pending::{PendingConstruction, Tool};

/// 绘制点 Action
///
/// 点击已有点时只选中它，不新建也不产生历史条目。
pub struct DrawPointAction;

impl DrawPointAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DrawPointAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for DrawPointAction {
    fn tool(&self) -> Tool {
        Tool::Point
    }

    fn reset(&mut self) {
        // 点工具无状态
    }

    fn on_pointer_down(&mut self, ctx: &ActionContext) -> ActionResult {
        if let Some(target) = ctx.snap_target() {
            return ActionResult::Select(Some(target.id));
        }
        let point = Point::from_point2(ctx.cursor, true);
        ActionResult::Commit(vec![Element::new(Geometry::Point(point))])
    }

    fn get_prompt(&self, _pending: Option<&PendingConstruction>) -> &str {
        "指定点的位置:"
    }
}

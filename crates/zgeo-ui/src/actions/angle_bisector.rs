//! 角平分线 Action
//!
//! 三次点击：顶点、第一射线点、第二射线点，都必须是已有点且互不相同。

use crate::action::{Action, ActionContext, ActionResult};
use zgeo_core::derive::LineLike;
use zgeo_core::element::{AngleBisector, Element, Geometry};
use zgeo_core::pending::{PendingAngle, PendingConstruction, Tool};

/// 角平分线 Action
pub struct AngleBisectorAction;

impl AngleBisectorAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AngleBisectorAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for AngleBisectorAction {
    fn tool(&self) -> Tool {
        Tool::AngleBisector
    }

    fn reset(&mut self) {}

    fn on_pointer_down(&mut self, ctx: &ActionContext) -> ActionResult {
        let target = ctx.snap_target().map(|t| t.id);
        let staged = match ctx.pending() {
            Some(PendingConstruction::AngleBisector(staged)) => Some(*staged),
            _ => None,
        };

        match (staged, target) {
            (None, Some(vertex)) => {
                let staged = PendingAngle::Vertex { vertex };
                ActionResult::Stage(PendingConstruction::AngleBisector(staged))
            }
            (None, None) => ActionResult::Continue,
            (Some(_), None) => ActionResult::Cancel,
            (Some(PendingAngle::Vertex { vertex }), Some(ray1)) => {
                if ray1 == vertex {
                    return ActionResult::Cancel;
                }
                let staged = PendingAngle::FirstRay { vertex, ray1 };
                ActionResult::Stage(PendingConstruction::AngleBisector(staged))
            }
            (Some(PendingAngle::FirstRay { vertex, ray1 }), Some(ray2)) => {
                if ray2 == vertex
                    || ray2 == ray1
                    || ctx.store.has_angle_bisector(vertex, ray1, ray2)
                {
                    return ActionResult::Cancel;
                }
                let bisector = AngleBisector::new(vertex, ray1, ray2);
                // 反向射线或零长射线没有定义
                if bisector.line_sample(ctx.elements()).is_none() {
                    return ActionResult::Cancel;
                }
                ActionResult::Commit(vec![Element::new(Geometry::AngleBisector(bisector))])
            }
        }
    }

    fn get_prompt(&self, pending: Option<&PendingConstruction>) -> &str {
        match pending {
            Some(PendingConstruction::AngleBisector(staged)) => match staged {
                PendingAngle::Vertex { .. } => "选择第一条边上的点:",
                PendingAngle::FirstRay { .. } => "选择第二条边上的点:",
            },
            _ => "选择角的顶点:",
        }
    }
}

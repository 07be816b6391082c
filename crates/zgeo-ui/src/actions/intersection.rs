//! 交点 Action
//!
//! 没有暂存状态。每次指针移动时，对光标下的元素与其余所有非点元素求交，
//! 并在命中半径内高亮最近的候选交点；点击时在高亮位置创建推导点。

use crate::action::{Action, ActionContext, ActionResult, IntersectionPreview};
use tracing::debug;
use zgeo_core::derive::find_intersections;
use zgeo_core::element::{Element, Geometry, Point};
use zgeo_core::math::distance;
use zgeo_core::pending::{PendingConstruction, Tool};

/// 交点 Action
pub struct IntersectionAction {
    preview: IntersectionPreview,
}

impl IntersectionAction {
    pub fn new() -> Self {
        Self {
            preview: IntersectionPreview::default(),
        }
    }

    /// 重新计算预览
    fn refresh(&mut self, ctx: &ActionContext) {
        let elements = ctx.elements();
        self.preview = IntersectionPreview::default();

        let Some(hovered) = ctx.shape_at().and_then(|id| ctx.store.get(id)) else {
            return;
        };
        self.preview.hovered = Some(hovered.id);

        for other in elements {
            if other.id == hovered.id || other.is_point() {
                continue;
            }
            self.preview.pairs_evaluated += 1;
            self.preview
                .candidates
                .extend(find_intersections(hovered, other, elements));
        }

        let radius = ctx.tolerance().hit_radius(ctx.zoom);
        self.preview.nearest = self
            .preview
            .candidates
            .iter()
            .enumerate()
            .map(|(i, p)| (i, distance(p, &ctx.cursor)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);
    }
}

impl Default for IntersectionAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for IntersectionAction {
    fn tool(&self) -> Tool {
        Tool::Intersection
    }

    fn reset(&mut self) {
        self.preview = IntersectionPreview::default();
    }

    fn on_pointer_move(&mut self, ctx: &ActionContext) -> ActionResult {
        self.refresh(ctx);
        ActionResult::Continue
    }

    fn on_pointer_down(&mut self, ctx: &ActionContext) -> ActionResult {
        self.refresh(ctx);
        let Some(position) = self.preview.highlighted() else {
            return ActionResult::Continue;
        };

        if ctx
            .store
            .point_near(position, ctx.tolerance().duplicate_epsilon)
            .is_some()
        {
            debug!(x = position.x, y = position.y, "intersection already occupied");
            return ActionResult::Continue;
        }

        let point = Point::from_point2(position, false);
        ActionResult::Commit(vec![Element::new(Geometry::Point(point))])
    }

    fn intersection_preview(&self) -> Option<&IntersectionPreview> {
        Some(&self.preview)
    }

    fn get_prompt(&self, _pending: Option<&PendingConstruction>) -> &str {
        if self.preview.nearest.is_some() {
            "点击创建交点:"
        } else {
            "移动到两条曲线的交点附近:"
        }
    }
}

//! 绘制圆 Action
//!
//! 第一次点击确定圆心，第二次点击确定半径点。

use crate::action::{Action, ActionContext, ActionResult};
use zgeo_core::element::{Circle, Element, Geometry};
use zgeo_core::pending::{PendingConstruction, Tool};

/// 绘制圆 Action
pub struct DrawCircleAction;

impl DrawCircleAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DrawCircleAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for DrawCircleAction {
    fn tool(&self) -> Tool {
        Tool::Circle
    }

    fn reset(&mut self) {}

    fn on_pointer_down(&mut self, ctx: &ActionContext) -> ActionResult {
        let point = ctx.staged_point();
        let Some(PendingConstruction::Circle { center }) = ctx.pending() else {
            return ActionResult::Stage(PendingConstruction::Circle { center: point });
        };

        if ctx.hits_staged(center, &point) {
            return ActionResult::Cancel;
        }

        let circle = Element::new(Geometry::Circle(Circle::new(center.id(), point.id())));
        let mut batch: Vec<Element> = [center, &point]
            .into_iter()
            .filter(|staged| staged.is_new)
            .map(|staged| staged.element.clone())
            .collect();
        batch.push(circle);
        ActionResult::Commit(batch)
    }

    fn get_prompt(&self, pending: Option<&PendingConstruction>) -> &str {
        match pending {
            Some(PendingConstruction::Circle { .. }) => "指定圆上一点:",
            _ => "指定圆心:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zgeo_core::element::Point;
    use zgeo_core::math::Point2;
    use zgeo_core::snap::SnapResolver;
    use zgeo_core::store::ElementStore;

    #[test]
    fn test_circle_existing_center_new_radius_point() {
        let mut store = ElementStore::new();
        let center = store
            .add_element(Element::new(Geometry::Point(Point::fixed(0.0, 0.0))))
            .unwrap();
        let snap = SnapResolver::default();
        let mut action = DrawCircleAction::new();

        let ctx = ActionContext {
            cursor: Point2::new(1.0, 0.0),
            zoom: 1.0,
            store: &store,
            snap: &snap,
        };
        let ActionResult::Stage(pending) = action.on_pointer_down(&ctx) else {
            panic!("expected stage");
        };
        store.start_construction(pending);

        let ctx = ActionContext {
            cursor: Point2::new(30.0, 40.0),
            zoom: 1.0,
            store: &store,
            snap: &snap,
        };
        let ActionResult::Commit(batch) = action.on_pointer_down(&ctx) else {
            panic!("expected commit");
        };
        assert_eq!(batch.len(), 2);
        let Geometry::Circle(circle) = &batch[1].geometry else {
            panic!("expected circle");
        };
        assert_eq!(circle.center, center);
        assert_eq!(circle.radius_point, batch[0].id);
    }

    #[test]
    fn test_circle_same_center_cancels() {
        let mut store = ElementStore::new();
        let center = store
            .add_element(Element::new(Geometry::Point(Point::fixed(0.0, 0.0))))
            .unwrap();
        let snap = SnapResolver::default();
        let mut action = DrawCircleAction::new();
        let ctx = ActionContext {
            cursor: Point2::new(0.5, 0.0),
            zoom: 1.0,
            store: &store,
            snap: &snap,
        };
        let ActionResult::Stage(pending) = action.on_pointer_down(&ctx) else {
            panic!("expected stage");
        };
        assert_eq!(pending.tool(), Tool::Circle);
        store.start_construction(pending);

        let ctx = ActionContext {
            cursor: Point2::new(-0.5, 0.0),
            zoom: 1.0,
            store: &store,
            snap: &snap,
        };
        assert_eq!(action.on_pointer_down(&ctx), ActionResult::Cancel);
        assert!(store.get(center).is_some());
    }
}

//! 选择/移动 Action
//!
//! 在固定点上按下开始拖动。拖动过程只更新渲染层覆盖位置，
//! 抬起时指针净位移超过阈值才提交一次 `update_element`。
//! 新位置 = 点的原位置 + 指针相对按下位置的位移，按下时不会吸附到光标。

use crate::action::{Action, ActionContext, ActionResult, DragOverlay};
use zgeo_core::element::{ElementId, ElementPatch};
use zgeo_core::math::{distance, Point2};
use zgeo_core::pending::{PendingConstruction, Tool};

/// 选择状态
#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    /// 空闲，等待选择
    Idle,
    /// 正在拖动固定点
    Dragging {
        id: ElementId,
        /// 点的原位置
        origin: Point2,
        /// 按下时的光标
        press: Point2,
        position: Point2,
    },
}

/// 选择 Action
pub struct SelectAction {
    status: Status,
}

impl SelectAction {
    pub fn new() -> Self {
        Self { status: Status::Idle }
    }

    /// 是否正在拖动
    pub fn is_dragging(&self) -> bool {
        matches!(self.status, Status::Dragging { .. })
    }
}

impl Default for SelectAction {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for SelectAction {
    fn tool(&self) -> Tool {
        Tool::Select
    }

    fn reset(&mut self) {
        self.status = Status::Idle;
    }

    fn on_pointer_down(&mut self, ctx: &ActionContext) -> ActionResult {
        self.status = Status::Idle;

        if let Some(target) = ctx.snap_target() {
            let is_fixed = ctx.store.point(target.id).is_some_and(|p| p.is_fixed);
            if is_fixed {
                self.status = Status::Dragging {
                    id: target.id,
                    origin: target.position,
                    press: ctx.cursor,
                    position: target.position,
                };
            }
            return ActionResult::Select(Some(target.id));
        }

        ActionResult::Select(ctx.shape_at())
    }

    fn on_pointer_move(&mut self, ctx: &ActionContext) -> ActionResult {
        if let Status::Dragging {
            origin,
            press,
            position,
            ..
        } = &mut self.status
        {
            *position = *origin + (ctx.cursor - *press);
        }
        ActionResult::Continue
    }

    fn on_pointer_up(&mut self, ctx: &ActionContext) -> ActionResult {
        let Status::Dragging { id, origin, press, .. } = self.status else {
            return ActionResult::Continue;
        };
        self.status = Status::Idle;

        if distance(&press, &ctx.cursor) > ctx.tolerance().drag_commit_epsilon {
            let target = origin + (ctx.cursor - press);
            ActionResult::Modify(id, ElementPatch::move_point(target))
        } else {
            ActionResult::Continue
        }
    }

    fn drag_overlay(&self) -> Option<DragOverlay> {
        match self.status {
            Status::Dragging {
                id,
                origin,
                position,
                ..
            } => Some(DragOverlay {
                id,
                origin,
                position,
            }),
            Status::Idle => None,
        }
    }

    fn get_prompt(&self, _pending: Option<&PendingConstruction>) -> &str {
        match self.status {
            Status::Idle => "选择对象:",
            Status::Dragging { .. } => "拖动到新位置:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zgeo_core::element::{Element, Geometry, Point};
    use zgeo_core::snap::SnapResolver;
    use zgeo_core::store::ElementStore;

    fn ctx<'a>(
        store: &'a ElementStore,
        snap: &'a SnapResolver,
        x: f64,
        y: f64,
    ) -> ActionContext<'a> {
        ActionContext {
            cursor: Point2::new(x, y),
            zoom: 1.0,
            store,
            snap,
        }
    }

    #[test]
    fn test_drag_fixed_point() {
        let mut store = ElementStore::new();
        let id = store
            .add_element(Element::new(Geometry::Point(Point::fixed(0.0, 0.0))))
            .unwrap();
        let snap = SnapResolver::default();
        let mut action = SelectAction::new();

        assert_eq!(
            action.on_pointer_down(&ctx(&store, &snap, 0.0, 0.0)),
            ActionResult::Select(Some(id))
        );
        assert!(action.is_dragging());
        action.on_pointer_move(&ctx(&store, &snap, 1.0, 2.0));
        assert_eq!(action.drag_overlay().unwrap().position, Point2::new(1.0, 2.0));

        let result = action.on_pointer_up(&ctx(&store, &snap, 3.0, 4.0));
        assert_eq!(
            result,
            ActionResult::Modify(id, ElementPatch::move_point(Point2::new(3.0, 4.0)))
        );
        assert!(action.drag_overlay().is_none());
    }

    #[test]
    fn test_release_at_origin_is_noop() {
        let mut store = ElementStore::new();
        store
            .add_element(Element::new(Geometry::Point(Point::fixed(0.0, 0.0))))
            .unwrap();
        let snap = SnapResolver::default();
        let mut action = SelectAction::new();

        action.on_pointer_down(&ctx(&store, &snap, 0.0, 0.0));
        action.on_pointer_move(&ctx(&store, &snap, 5.0, 5.0));
        assert_eq!(action.on_pointer_up(&ctx(&store, &snap, 0.0, 0.0)), ActionResult::Continue);
    }

    #[test]
    fn test_off_center_press_moves_by_displacement() {
        let mut store = ElementStore::new();
        let id = store
            .add_element(Element::new(Geometry::Point(Point::fixed(0.0, 0.0))))
            .unwrap();
        let snap = SnapResolver::default();
        let mut action = SelectAction::new();

        // 原地单击：不移动点
        action.on_pointer_down(&ctx(&store, &snap, 5.0, 0.0));
        assert!(action.is_dragging());
        assert_eq!(action.on_pointer_up(&ctx(&store, &snap, 5.0, 0.0)), ActionResult::Continue);

        action.on_pointer_down(&ctx(&store, &snap, 2.0, 0.0));
        action.on_pointer_move(&ctx(&store, &snap, 3.0, 2.0));
        assert_eq!(action.drag_overlay().unwrap().position, Point2::new(1.0, 2.0));
        let result = action.on_pointer_up(&ctx(&store, &snap, 5.0, 4.0));
        assert_eq!(
            result,
            ActionResult::Modify(id, ElementPatch::move_point(Point2::new(3.0, 4.0)))
        );
    }

    #[test]
    fn test_derived_point_not_draggable() {
        let mut store = ElementStore::new();
        let id = store
            .add_element(Element::new(Geometry::Point(Point::derived(0.0, 0.0))))
            .unwrap();
        let snap = SnapResolver::default();
        let mut action = SelectAction::new();

        assert_eq!(
            action.on_pointer_down(&ctx(&store, &snap, 1.0, 0.0)),
            ActionResult::Select(Some(id))
        );
        assert!(!action.is_dragging());
        assert_eq!(
            action.on_pointer_down(&ctx(&store, &snap, 400.0, 0.0)),
            ActionResult::Select(None)
        );
    }
}

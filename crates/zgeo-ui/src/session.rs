//! 构造会话
//!
//! 把输入事件分派给当前工具的 Action，并把 [`ActionResult`] 写回元素存储。
//! 一个事件完整处理（包括存储写入和历史快照）之后才处理下一个。

use tracing::{debug, warn};
use zgeo_core::element::{Element, ElementId};
use zgeo_core::math::Point2;
use zgeo_core::pending::{PendingConstruction, Tool};
use zgeo_core::snap::SnapResolver;
use zgeo_core::store::ElementStore;
use zgeo_core::tolerance::ToleranceConfig;

use crate::action::{Action, ActionContext, ActionResult, DragOverlay, IntersectionPreview};
use crate::actions::create_action;
use crate::input::{InputEvent, Key};

/// 构造会话
pub struct ConstructionSession {
    store: ElementStore,
    snap: SnapResolver,
    action: Box<dyn Action>,
    zoom: f64,
    cursor: Point2,
}

impl Default for ConstructionSession {
    fn default() -> Self {
        Self::new(ToleranceConfig::default())
    }
}

impl ConstructionSession {
    pub fn new(config: ToleranceConfig) -> Self {
        Self::with_store(ElementStore::new(), config)
    }

    pub fn with_store(store: ElementStore, config: ToleranceConfig) -> Self {
        let action = create_action(store.selected_tool());
        Self {
            store,
            snap: SnapResolver::new(config),
            action,
            zoom: 1.0,
            cursor: Point2::origin(),
        }
    }

    // ========== 输入 ==========

    /// 处理一个输入事件
    pub fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point2::new(x, y)),
            InputEvent::PointerUp { x, y } => self.pointer_up(Point2::new(x, y)),
            InputEvent::Key { key } => self.key(key),
            InputEvent::SelectTool { tool } => self.set_tool(tool),
            InputEvent::SetZoom { zoom } => self.set_zoom(zoom),
            InputEvent::ClearCanvas => self.clear_canvas(),
        }
    }

    pub fn pointer_down(&mut self, cursor: Point2) {
        self.dispatch(cursor, |action, ctx| action.on_pointer_down(ctx));
    }

    pub fn pointer_move(&mut self, cursor: Point2) {
        self.cursor = cursor;
        self.update_hover();
        self.dispatch(cursor, |action, ctx| action.on_pointer_move(ctx));
    }

    pub fn pointer_up(&mut self, cursor: Point2) {
        self.dispatch(cursor, |action, ctx| action.on_pointer_up(ctx));
    }

    pub fn key(&mut self, key: Key) {
        debug!(?key, "key");
        match key {
            Key::Escape => self.cancel(),
            Key::Delete => self.delete_selected(),
            Key::Undo => {
                self.action.reset();
                self.store.undo();
            }
            Key::Redo => {
                self.action.reset();
                self.store.redo();
            }
        }
    }

    /// 切换工具，重置上一个工具的状态
    pub fn set_tool(&mut self, tool: Tool) {
        self.action.reset();
        self.store.set_selected_tool(tool);
        if self.action.tool() != tool {
            self.action = create_action(tool);
        }
    }

    /// 设置缩放；非正数或非有限值被忽略
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        } else {
            warn!(zoom, "ignoring invalid zoom");
        }
    }

    pub fn clear_canvas(&mut self) {
        self.action.reset();
        self.store.clear_canvas();
    }

    // ========== 输出 ==========

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn elements(&self) -> &[Element] {
        self.store.elements()
    }

    pub fn tool(&self) -> Tool {
        self.store.selected_tool()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn tolerance(&self) -> &ToleranceConfig {
        self.snap.config()
    }

    pub fn selected_element_id(&self) -> Option<ElementId> {
        self.store.selected_element_id()
    }

    pub fn hovered_element_id(&self) -> Option<ElementId> {
        self.store.hovered_element_id()
    }

    pub fn pending(&self) -> Option<&PendingConstruction> {
        self.store.pending()
    }

    pub fn intersection_preview(&self) -> Option<&IntersectionPreview> {
        self.action.intersection_preview()
    }

    pub fn drag_overlay(&self) -> Option<DragOverlay> {
        self.action.drag_overlay()
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    pub fn prompt(&self) -> &str {
        self.action.get_prompt(self.store.pending())
    }

    // ========== 内部 ==========

    /// 以当前光标构造上下文调用 Action，并应用其结果
    fn dispatch(
        &mut self,
        cursor: Point2,
        f: impl FnOnce(&mut dyn Action, &ActionContext) -> ActionResult,
    ) {
        self.cursor = cursor;
        let ctx = ActionContext {
            cursor,
            zoom: self.zoom,
            store: &self.store,
            snap: &self.snap,
        };
        let result = f(self.action.as_mut(), &ctx);
        self.apply(result);
    }

    fn context(&self) -> ActionContext<'_> {
        ActionContext {
            cursor: self.cursor,
            zoom: self.zoom,
            store: &self.store,
            snap: &self.snap,
        }
    }

    /// 悬停：捕捉到的点优先，其次是光标下的图元
    fn update_hover(&mut self) {
        let ctx = self.context();
        let hovered = ctx.snap_target().map(|t| t.id).or_else(|| ctx.shape_at());
        self.store.set_hovered_element_id(hovered);
    }

    fn apply(&mut self, result: ActionResult) {
        match result {
            ActionResult::Continue => {}
            ActionResult::Stage(pending) => self.store.start_construction(pending),
            ActionResult::Commit(batch) => {
                self.store.complete_construction();
                if let Err(err) = self.store.add_elements_batch(batch) {
                    warn!(%err, "commit rejected");
                }
            }
            ActionResult::Modify(id, patch) => {
                if let Err(err) = self.store.update_element(id, patch) {
                    warn!(%err, "update rejected");
                }
            }
            ActionResult::Select(id) => self.store.set_selected_element_id(id),
            ActionResult::Cancel => {
                debug!(tool = self.action.name(), "construction cancelled");
                self.store.complete_construction();
                self.action.reset();
            }
        }
    }

    fn cancel(&mut self) {
        self.store.complete_construction();
        self.action.reset();
    }

    /// 删除选中元素；暂存数据可能引用被删除的点，一并丢弃
    fn delete_selected(&mut self) {
        let Some(id) = self.store.selected_element_id() else {
            return;
        };
        self.cancel();
        if let Err(err) = self.store.remove_element(id) {
            warn!(%err, "delete rejected");
        }
    }
}

//! Action 系统
//!
//! 每个构造工具是一个独立的 Action 实现。多次点击工具的暂存数据由
//! [`ElementStore`] 持有，Action 只读取存储视图并返回 [`ActionResult`]，
//! 由会话统一写回存储。

use zgeo_core::element::{Element, ElementId, ElementPatch};
use zgeo_core::math::{distance, Point2};
use zgeo_core::pending::{PendingConstruction, StagedPoint, Tool};
use zgeo_core::snap::{SnapResolver, SnapTarget};
use zgeo_core::store::ElementStore;
use zgeo_core::tolerance::ToleranceConfig;

/// Action 执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// 状态不变
    Continue,
    /// 进入（或推进）暂存状态
    Stage(PendingConstruction),
    /// 完成构造，整批提交为一个历史条目
    Commit(Vec<Element>),
    /// 修改已有元素
    Modify(ElementId, ElementPatch),
    /// 改变选中元素，不产生历史条目
    Select(Option<ElementId>),
    /// 丢弃暂存数据，回到空闲
    Cancel,
}

/// Action 上下文 - 传递给 Action 的运行时信息
pub struct ActionContext<'a> {
    /// 光标世界坐标
    pub cursor: Point2,
    /// 当前缩放
    pub zoom: f64,
    /// 元素存储（只读）
    pub store: &'a ElementStore,
    pub snap: &'a SnapResolver,
}

impl<'a> ActionContext<'a> {
    pub fn tolerance(&self) -> &ToleranceConfig {
        self.snap.config()
    }

    pub fn elements(&self) -> &'a [Element] {
        self.store.elements()
    }

    pub fn pending(&self) -> Option<&'a PendingConstruction> {
        self.store.pending()
    }

    /// 光标捕捉到的已有点
    pub fn snap_target(&self) -> Option<SnapTarget> {
        self.snap.find_snap_point(self.cursor, self.elements(), self.zoom)
    }

    /// 光标下的类直线元素
    pub fn line_like_at(&self) -> Option<ElementId> {
        self.snap
            .find_line_like_at(self.cursor, self.elements(), self.zoom)
            .map(|(id, _)| id)
    }

    /// 光标下的非点元素
    pub fn shape_at(&self) -> Option<ElementId> {
        self.snap
            .find_shape_at(self.cursor, self.elements(), self.zoom)
            .map(|(id, _)| id)
    }

    /// 捕捉到已有点则复用，否则在光标处暂存一个新的固定点
    pub fn staged_point(&self) -> StagedPoint {
        self.snap_target()
            .and_then(|t| self.store.get(t.id).cloned())
            .map(StagedPoint::existing)
            .unwrap_or_else(|| StagedPoint::new_fixed(self.cursor))
    }

    /// 第二次点击是否落在已暂存的点上
    ///
    /// 暂存的新点不在集合中，无法被捕捉；两个新点重合（重复点容差内）视为同一点。
    pub fn hits_staged(&self, staged: &StagedPoint, candidate: &StagedPoint) -> bool {
        if staged.id() == candidate.id() {
            return true;
        }
        staged.is_new
            && candidate.is_new
            && distance(&staged.position(), &candidate.position())
                <= self.tolerance().duplicate_epsilon
    }
}

/// 交点工具的预览
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntersectionPreview {
    /// 光标下的元素
    pub hovered: Option<ElementId>,
    /// 候选交点
    pub candidates: Vec<Point2>,
    /// 命中半径内最近的候选
    pub nearest: Option<usize>,
    /// 本次计算的元素对数
    pub pairs_evaluated: usize,
}

impl IntersectionPreview {
    /// 高亮的候选交点
    pub fn highlighted(&self) -> Option<Point2> {
        self.nearest.and_then(|i| self.candidates.get(i).copied())
    }
}

/// 拖动中的临时位置（只用于渲染，不写入存储）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOverlay {
    pub id: ElementId,
    pub origin: Point2,
    pub position: Point2,
}

/// Action trait - 所有构造工具的核心接口
pub trait Action {
    /// 对应的工具
    fn tool(&self) -> Tool;

    fn name(&self) -> &str {
        self.tool().name()
    }

    /// 重置 action 自身的临时状态
    fn reset(&mut self);

    // ========== 事件处理 ==========

    /// 指针按下
    fn on_pointer_down(&mut self, ctx: &ActionContext) -> ActionResult;

    /// 指针移动
    fn on_pointer_move(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    /// 指针抬起
    fn on_pointer_up(&mut self, _ctx: &ActionContext) -> ActionResult {
        ActionResult::Continue
    }

    // ========== 预览 ==========

    fn intersection_preview(&self) -> Option<&IntersectionPreview> {
        None
    }

    fn drag_overlay(&self) -> Option<DragOverlay> {
        None
    }

    /// 提示文本
    fn get_prompt(&self, pending: Option<&PendingConstruction>) -> &str;
}

//! 元素存储
//!
//! 独占有序的实时元素集合、选择/悬停ID、当前工具及其暂存数据。
//! 每个修改操作成功时恰好向注入的 [`HistoryManager`] 推入一个快照；
//! 拖动过程中的临时位置只存在于渲染层覆盖，不写入存储。

use std::collections::HashSet;

use tracing::{debug, info};

use crate::element::{Element, ElementId, ElementLookup, ElementPatch, Geometry, Point};
use crate::error::StoreError;
use crate::history::HistoryManager;
use crate::math::{distance, Point2};
use crate::pending::{PendingConstruction, Tool};

/// 元素集合快照
pub type Snapshot = Vec<Element>;

/// 元素存储
#[derive(Debug, Clone)]
pub struct ElementStore {
    elements: Vec<Element>,
    selected: Option<ElementId>,
    hovered: Option<ElementId>,
    tool: Tool,
    pending: Option<PendingConstruction>,
    history: HistoryManager<Snapshot>,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// 空集合 + 以空集合为基线的历史
    pub fn new() -> Self {
        Self::with_history(HistoryManager::new(Vec::new()))
    }

    /// 注入历史管理器，实时集合取其当前快照
    pub fn with_history(history: HistoryManager<Snapshot>) -> Self {
        Self {
            elements: history.current().clone(),
            selected: None,
            hovered: None,
            tool: Tool::default(),
            pending: None,
            history,
        }
    }

    // ========== 查询 ==========

    /// 有序元素列表
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.as_slice().element(id)
    }

    pub fn point(&self, id: ElementId) -> Option<&Point> {
        self.get(id).and_then(Element::as_point)
    }

    pub fn point_position(&self, id: ElementId) -> Option<Point2> {
        self.point(id).map(Point::position)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn selected_element_id(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn hovered_element_id(&self) -> Option<ElementId> {
        self.hovered
    }

    pub fn selected_tool(&self) -> Tool {
        self.tool
    }

    /// 当前暂存数据；None 表示空闲
    pub fn pending(&self) -> Option<&PendingConstruction> {
        self.pending.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryManager<Snapshot> {
        &self.history
    }

    /// 该无序点对是否已有垂直平分线
    pub fn has_perpendicular_bisector(&self, a: ElementId, b: ElementId) -> bool {
        self.elements.iter().any(|e| match &e.geometry {
            Geometry::PerpendicularBisector(bis) => bis.spans(a, b),
            _ => false,
        })
    }

    /// 该顶点 + 无序射线点对是否已有角平分线
    pub fn has_angle_bisector(&self, vertex: ElementId, ray1: ElementId, ray2: ElementId) -> bool {
        self.elements.iter().any(|e| match &e.geometry {
            Geometry::AngleBisector(ab) => ab.spans(vertex, ray1, ray2),
            _ => false,
        })
    }

    /// 该 (点, 参考直线) 是否已有垂线
    pub fn has_perpendicular_line(&self, point: ElementId, reference: ElementId) -> bool {
        self.elements.iter().any(|e| match &e.geometry {
            Geometry::PerpendicularLine(pl) => pl.point == point && pl.reference == reference,
            _ => false,
        })
    }

    /// 半径内最近的已有点
    pub fn point_near(&self, position: Point2, radius: f64) -> Option<ElementId> {
        self.elements
            .iter()
            .filter_map(|e| e.as_point().map(|p| (e.id, distance(&p.position(), &position))))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }

    /// 直接或间接引用 `id` 的所有元素（不含自身）
    pub fn dependents_of(&self, id: ElementId) -> Vec<ElementId> {
        let mut doomed: HashSet<ElementId> = HashSet::from([id]);
        loop {
            let before = doomed.len();
            for element in &self.elements {
                if !doomed.contains(&element.id)
                    && element.references().iter().any(|r| doomed.contains(r))
                {
                    doomed.insert(element.id);
                }
            }
            if doomed.len() == before {
                break;
            }
        }
        self.elements
            .iter()
            .map(|e| e.id)
            .filter(|eid| *eid != id && doomed.contains(eid))
            .collect()
    }

    // ========== 修改（每次一个历史快照） ==========

    /// 添加单个元素
    pub fn add_element(&mut self, element: Element) -> Result<ElementId, StoreError> {
        let ids = self.add_elements_batch(vec![element])?;
        Ok(ids[0])
    }

    /// 批量添加元素，整批只产生一个历史快照；空批次不做任何事
    pub fn add_elements_batch(
        &mut self,
        mut batch: Vec<Element>,
    ) -> Result<Vec<ElementId>, StoreError> {
        if batch.is_empty() {
            return Ok(vec![]);
        }

        let mut seen: HashSet<ElementId> = self.elements.iter().map(|e| e.id).collect();
        for element in &batch {
            if !seen.insert(element.id) {
                return Err(StoreError::DuplicateId(element.id));
            }
        }
        self.assign_labels(&mut batch)?;

        let ids: Vec<ElementId> = batch.iter().map(|e| e.id).collect();
        self.elements.extend(batch);
        self.commit();
        info!(count = ids.len(), total = self.elements.len(), "elements added");
        Ok(ids)
    }

    /// 局部更新，补丁类型必须与现有元素类型一致
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) -> Result<(), StoreError> {
        let index = self.index_of(id).ok_or(StoreError::ElementNotFound(id))?;

        let expected = self.elements[index].kind();
        if expected != patch.kind() {
            return Err(StoreError::KindMismatch {
                expected,
                actual: patch.kind(),
            });
        }
        if let ElementPatch::Point(p) = &patch {
            if let Some(Some(label)) = p.label {
                if self.label_in_use(label, Some(id)) {
                    return Err(StoreError::LabelInUse(label));
                }
            }
        }

        patch.apply(&mut self.elements[index].geometry);
        self.commit();
        debug!(%id, "element updated");
        Ok(())
    }

    /// 删除元素，引用它的元素级联删除；返回所有被删除的ID
    pub fn remove_element(&mut self, id: ElementId) -> Result<Vec<ElementId>, StoreError> {
        if self.index_of(id).is_none() {
            return Err(StoreError::ElementNotFound(id));
        }
        let mut removed = vec![id];
        removed.extend(self.dependents_of(id));

        let doomed: HashSet<ElementId> = removed.iter().copied().collect();
        self.elements.retain(|e| !doomed.contains(&e.id));
        self.drop_dangling_ids();
        self.commit();
        info!(%id, cascaded = removed.len() - 1, "element removed");
        Ok(removed)
    }

    /// 清空画布
    pub fn clear_canvas(&mut self) {
        self.elements.clear();
        self.pending = None;
        self.selected = None;
        self.hovered = None;
        self.commit();
        info!("canvas cleared");
    }

    // ========== 历史 ==========

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.elements = snapshot.clone();
        self.after_restore();
        info!(total = self.elements.len(), "undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.elements = snapshot.clone();
        self.after_restore();
        info!(total = self.elements.len(), "redo");
        true
    }

    // ========== 不产生快照的状态 ==========

    /// 切换工具，丢弃进行中的构造
    pub fn set_selected_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            debug!(tool = tool.name(), "tool selected");
        }
        self.tool = tool;
        self.pending = None;
    }

    pub fn set_hovered_element_id(&mut self, id: Option<ElementId>) {
        self.hovered = id;
    }

    pub fn set_selected_element_id(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    /// 进入暂存状态
    pub fn start_construction(&mut self, payload: PendingConstruction) {
        debug!(tool = payload.tool().name(), "construction staged");
        self.pending = Some(payload);
    }

    /// 回到空闲状态，返回被丢弃的暂存数据
    pub fn complete_construction(&mut self) -> Option<PendingConstruction> {
        self.pending.take()
    }

    // ========== 内部 ==========

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    fn commit(&mut self) {
        self.history.push(self.elements.clone());
    }

    fn after_restore(&mut self) {
        self.pending = None;
        self.drop_dangling_ids();
    }

    fn drop_dangling_ids(&mut self) {
        if self.selected.is_some_and(|id| self.index_of(id).is_none()) {
            self.selected = None;
        }
        if self.hovered.is_some_and(|id| self.index_of(id).is_none()) {
            self.hovered = None;
        }
    }

    fn label_in_use(&self, label: char, except: Option<ElementId>) -> bool {
        self.elements
            .iter()
            .filter(|e| Some(e.id) != except)
            .filter_map(Element::as_point)
            .any(|p| p.label == Some(label))
    }

    /// 为未带标签的新点分配第一个空闲字母，字母用完后保持无标签
    fn assign_labels(&self, batch: &mut [Element]) -> Result<(), StoreError> {
        let mut used: HashSet<char> = self
            .elements
            .iter()
            .filter_map(Element::as_point)
            .filter_map(|p| p.label)
            .collect();

        for element in batch.iter() {
            if let Some(label) = element.as_point().and_then(|p| p.label) {
                if !used.insert(label) {
                    return Err(StoreError::LabelInUse(label));
                }
            }
        }

        for element in batch.iter_mut() {
            if let Geometry::Point(point) = &mut element.geometry {
                if point.label.is_none() {
                    point.label = ('A'..='Z').find(|c| !used.contains(c));
                    if let Some(label) = point.label {
                        used.insert(label);
                    }
                }
            }
        }
        Ok(())
    }
}

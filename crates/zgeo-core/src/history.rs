//! 撤销/重做历史
//!
//! 线性快照栈 + 当前位置指针。每个快照都是元素集合的独立副本，
//! 之后对实时集合的修改不会影响已存储的快照。

use tracing::debug;

/// 历史记录最大深度
pub const MAX_HISTORY_DEPTH: usize = 50;

/// 快照历史管理器
#[derive(Debug, Clone)]
pub struct HistoryManager<T: Clone> {
    snapshots: Vec<T>,
    index: usize,
    max_depth: usize,
}

impl<T: Clone> HistoryManager<T> {
    /// 以基线快照创建，基线位于索引 0
    pub fn new(baseline: T) -> Self {
        Self::with_max_depth(baseline, MAX_HISTORY_DEPTH)
    }

    pub fn with_max_depth(baseline: T, max_depth: usize) -> Self {
        Self {
            snapshots: vec![baseline],
            index: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// 追加快照
    ///
    /// 丢弃当前位置之后的所有快照（重做分支），超出最大深度时丢弃最旧的。
    pub fn push(&mut self, snapshot: T) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);
        self.index += 1;

        if self.snapshots.len() > self.max_depth {
            self.snapshots.remove(0);
            self.index -= 1;
        }
        debug!(index = self.index, len = self.snapshots.len(), "history push");
    }

    /// 撤销，已在最早快照时返回 None
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// 重做，已在最新快照时返回 None
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// 当前快照
    pub fn current(&self) -> &T {
        &self.snapshots[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl<T: Clone + Default> Default for HistoryManager<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

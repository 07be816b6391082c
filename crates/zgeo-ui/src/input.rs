//! 输入事件
//!
//! 外部输入转换层已把设备事件换算为世界坐标，会话只接收这里定义的事件。

use serde::{Deserialize, Serialize};
use zgeo_core::math::Point2;
use zgeo_core::pending::Tool;

/// 会话处理的按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// 取消进行中的构造或拖动
    Escape,
    /// 删除选中元素
    Delete,
    Undo,
    Redo,
}

/// 输入事件（世界坐标）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    Key { key: Key },
    SelectTool { tool: Tool },
    SetZoom { zoom: f64 },
    ClearCanvas,
}

impl InputEvent {
    /// 指针事件的位置
    pub fn position(&self) -> Option<Point2> {
        match self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerMove { x, y }
            | InputEvent::PointerUp { x, y } => Some(Point2::new(*x, *y)),
            _ => None,
        }
    }
}

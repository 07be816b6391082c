//! ZGEO 构造会话
//!
//! 多次点击的工具状态机：把指针/按键事件转换为对元素存储的原子提交。

pub mod action;
pub mod actions;
pub mod input;
pub mod session;

pub use action::{Action, ActionContext, ActionResult, DragOverlay, IntersectionPreview};
pub use actions::create_action;
pub use input::{InputEvent, Key};
pub use session::ConstructionSession;

//! 具体的 Action 实现
//!
//! 每个构造工具对应一个 Action 实现

mod angle_bisector;
mod draw_circle;
mod draw_line;
mod draw_point;
mod intersection;
mod perpendicular_bisector;
mod perpendicular_line;
mod select;

pub use angle_bisector::AngleBisectorAction;
pub use draw_circle::DrawCircleAction;
pub use draw_line::DrawLineAction;
pub use draw_point::DrawPointAction;
pub use intersection::IntersectionAction;
pub use perpendicular_bisector::PerpendicularBisectorAction;
pub use perpendicular_line::PerpendicularLineAction;
pub use select::SelectAction;

use crate::action::Action;
use zgeo_core::pending::Tool;

/// 创建指定工具的 Action
pub fn create_action(tool: Tool) -> Box<dyn Action> {
    match tool {
        Tool::Select => Box::new(SelectAction::new()),
        Tool::Point => Box::new(DrawPointAction::new()),
        Tool::Line => Box::new(DrawLineAction::new()),
        Tool::Circle => Box::new(DrawCircleAction::new()),
        Tool::PerpendicularBisector => Box::new(PerpendicularBisectorAction::new()),
        Tool::PerpendicularLine => Box::new(PerpendicularLineAction::new()),
        Tool::AngleBisector => Box::new(AngleBisectorAction::new()),
        Tool::Intersection => Box::new(IntersectionAction::new()),
    }
}

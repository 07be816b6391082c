//! 事件脚本
//!
//! JSON 格式：`{"tolerance": {...}?, "zoom": 1.0?, "events": [...]}`。

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use zgeo_core::element::{Element, ElementId};
use zgeo_core::pending::Tool;
use zgeo_core::tolerance::ToleranceConfig;
use zgeo_ui::{ConstructionSession, InputEvent};

/// 脚本错误
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid zoom: {0}")]
    InvalidZoom(f64),

    #[error("Event {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(&'static str),
}

/// 事件脚本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub zoom: Option<f64>,
    pub events: Vec<InputEvent>,
}

impl Script {
    /// 解析并校验
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let script: Script = serde_json::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if let Some(zoom) = self.zoom {
            if !(zoom.is_finite() && zoom > 0.0) {
                return Err(ScriptError::InvalidZoom(zoom));
            }
        }

        let t = &self.tolerance;
        if !(t.snap_radius_px >= 0.0 && t.hit_radius_px >= 0.0) {
            return Err(ScriptError::InvalidTolerance("radius must be non-negative"));
        }
        if !(t.duplicate_epsilon >= 0.0 && t.drag_commit_epsilon >= 0.0) {
            return Err(ScriptError::InvalidTolerance("epsilon must be non-negative"));
        }

        for (index, event) in self.events.iter().enumerate() {
            if let Some(p) = event.position() {
                if !(p.x.is_finite() && p.y.is_finite()) {
                    return Err(ScriptError::NonFiniteCoordinate { index });
                }
            }
        }
        Ok(())
    }

    /// 依次回放所有事件
    pub fn replay(&self) -> ConstructionSession {
        let mut session = ConstructionSession::new(self.tolerance.clone());
        if let Some(zoom) = self.zoom {
            session.set_zoom(zoom);
        }

        for (index, event) in self.events.iter().enumerate() {
            debug!(index, ?event, "replay");
            session.handle(event);
        }
        info!(
            events = self.events.len(),
            elements = session.elements().len(),
            "replay finished"
        );
        session
    }
}

/// 回放结果
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub tool: Tool,
    pub elements: Vec<Element>,
    pub selected: Option<ElementId>,
    pub pending: bool,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl Report {
    pub fn from_session(session: &ConstructionSession) -> Self {
        Self {
            tool: session.tool(),
            elements: session.elements().to_vec(),
            selected: session.selected_element_id(),
            pending: session.pending().is_some(),
            can_undo: session.can_undo(),
            can_redo: session.can_redo(),
        }
    }
}

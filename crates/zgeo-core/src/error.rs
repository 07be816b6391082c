//! 元素存储错误定义

use crate::element::{ElementId, ElementKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Patch kind mismatch: element is {expected:?}, patch is {actual:?}")]
    KindMismatch {
        expected: ElementKind,
        actual: ElementKind,
    },

    #[error("Duplicate element id: {0}")]
    DuplicateId(ElementId),

    #[error("Label already in use: {0}")]
    LabelInUse(char),
}

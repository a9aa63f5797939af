//! Input layout and semantic resolution

use glam::{Vec2, Vec3, Vec4};
use pp_core::{DebugError, Result};
use serde::{Deserialize, Serialize};

/// Per-vertex attribute an input layout entry reads from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AttributeKind {
    #[default]
    Position,
    Normal,
    Texcoord,
    Tangent,
    Binormal,
    Color,
}

/// One entry of the active input layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputLayoutItem {
    pub semantic: String,
    pub value: AttributeKind,
}

impl InputLayoutItem {
    pub fn new(semantic: impl Into<String>, value: AttributeKind) -> Self {
        Self {
            semantic: semantic.into(),
            value,
        }
    }
}

/// Attributes of one vertex of the debugged triangle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct VertexRecord {
    pub position: Vec3,
    pub normal: Vec3,
    pub texcoord: Vec2,
    pub tangent: Vec3,
    pub binormal: Vec3,
    pub color: Vec4,
}

impl VertexRecord {
    /// Attribute as a homogeneous four-component value
    ///
    /// Missing trailing components are 1.0; color is taken as is.
    pub fn attribute(&self, kind: AttributeKind) -> Vec4 {
        match kind {
            AttributeKind::Position => self.position.extend(1.0),
            AttributeKind::Normal => self.normal.extend(1.0),
            AttributeKind::Texcoord => self.texcoord.extend(1.0).extend(1.0),
            AttributeKind::Tangent => self.tangent.extend(1.0),
            AttributeKind::Binormal => self.binormal.extend(1.0),
            AttributeKind::Color => self.color,
        }
    }
}

/// Find the layout entry for `semantic`
///
/// Comparison is case-insensitive and the first matching entry wins.
pub fn resolve<'a>(layout: &'a [InputLayoutItem], semantic: &str) -> Option<&'a InputLayoutItem> {
    layout
        .iter()
        .find(|item| item.semantic.eq_ignore_ascii_case(semantic))
}

/// Like [`resolve`], but an unknown semantic is an error
pub fn resolve_required<'a>(layout: &'a [InputLayoutItem], semantic: &str) -> Result<&'a InputLayoutItem> {
    resolve(layout, semantic).ok_or_else(|| DebugError::UnresolvedSemantic(semantic.to_string()))
}

/// Lowercase key under which a semantic is stored in the interpreter
pub fn semantic_key(semantic: &str) -> String {
    semantic.to_ascii_lowercase()
}

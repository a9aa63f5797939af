//! Interpreter values
//!
//! A tagged union mirroring what the interpreter stores in a variable:
//! scalars, vectors of up to four components, float matrices, structure
//! instances and sampled textures.

use crate::texture::Texture;
use crate::types::{ScalarKind, TypeShape};
use glam::Vec4;
use std::sync::Arc;

/// Single typed component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i32),
    Uint(u32),
    Float(f32),
}

impl Scalar {
    pub fn kind(self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::Int(_) => ScalarKind::Int,
            Self::Uint(_) => ScalarKind::Uint,
            Self::Float(_) => ScalarKind::Float,
        }
    }

    pub fn zero(kind: ScalarKind) -> Self {
        Self::from_f32(kind, 0.0)
    }

    /// Convert a float into a component of `kind`
    pub fn from_f32(kind: ScalarKind, value: f32) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool(value != 0.0),
            ScalarKind::Int => Self::Int(value as i32),
            ScalarKind::Uint => Self::Uint(value as u32),
            ScalarKind::Float => Self::Float(value),
        }
    }

    pub fn as_f32(self) -> f32 {
        match self {
            Self::Bool(b) => b as u8 as f32,
            Self::Int(i) => i as f32,
            Self::Uint(u) => u as f32,
            Self::Float(f) => f,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Self::Bool(b) => b as i64,
            Self::Int(i) => i as i64,
            Self::Uint(u) => u as i64,
            Self::Float(f) => f as i64,
        }
    }

    /// Integer-valued component of `kind`
    pub fn from_i64(kind: ScalarKind, value: i64) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool(value != 0),
            ScalarKind::Int => Self::Int(value as i32),
            ScalarKind::Uint => Self::Uint(value as u32),
            ScalarKind::Float => Self::Float(value as f32),
        }
    }
}

/// Vector of one to four components sharing a kind
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    components: Vec<Scalar>,
}

impl Vector {
    /// Build a vector of `kind` from float data, casting each component
    ///
    /// Returns `None` for an empty slice or more than four components.
    pub fn from_f32(kind: ScalarKind, data: &[f32]) -> Option<Self> {
        if data.is_empty() || data.len() > 4 {
            return None;
        }
        Some(Self {
            components: data.iter().map(|&v| Scalar::from_f32(kind, v)).collect(),
        })
    }

    pub fn from_scalars(components: Vec<Scalar>) -> Option<Self> {
        let kind = components.first()?.kind();
        if components.len() > 4 || components.iter().any(|c| c.kind() != kind) {
            return None;
        }
        Some(Self { components })
    }

    pub fn kind(&self) -> ScalarKind {
        self.components[0].kind()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[Scalar] {
        &self.components
    }

    /// Components as floats, zero padded to four
    pub fn to_vec4(&self) -> Vec4 {
        let mut out = [0.0f32; 4];
        for (dst, src) in out.iter_mut().zip(&self.components) {
            *dst = src.as_f32();
        }
        Vec4::from_array(out)
    }
}

/// Float matrix stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    /// Declared type name in the bound language, e.g. `float4x4` or `mat4`
    pub type_name: String,
    rows: u8,
    cols: u8,
    data: Vec<f32>,
}

impl Matrix {
    pub fn from_row_major(type_name: impl Into<String>, rows: u8, cols: u8, data: &[f32]) -> Option<Self> {
        if !(1..=4).contains(&rows) || !(1..=4).contains(&cols) {
            return None;
        }
        if data.len() != rows as usize * cols as usize {
            return None;
        }
        Some(Self {
            type_name: type_name.into(),
            rows,
            cols,
            data: data.to_vec(),
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols as usize + col]
    }

    pub fn row_major(&self) -> &[f32] {
        &self.data
    }
}

/// Instance of a declared structure; fields follow declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    pub type_name: String,
    pub fields: Vec<Value>,
}

/// Value held by an interpreter variable
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Void,
    Scalar(Scalar),
    Vector(Vector),
    Matrix(Matrix),
    Struct(StructValue),
    Texture(Arc<Texture>),
}

impl Value {
    pub fn bool(v: bool) -> Self {
        Self::Scalar(Scalar::Bool(v))
    }

    pub fn int(v: i32) -> Self {
        Self::Scalar(Scalar::Int(v))
    }

    pub fn float(v: f32) -> Self {
        Self::Scalar(Scalar::Float(v))
    }

    pub fn float4(v: Vec4) -> Self {
        Self::Vector(Vector {
            components: v.to_array().into_iter().map(Scalar::Float).collect(),
        })
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Zero value of a declared shape
    pub fn zeroed(shape: TypeShape) -> Self {
        Self::from_vec4(shape, Vec4::ZERO)
    }

    /// Take the leading components of `source` in the given shape
    ///
    /// Matrices cannot be built from a single four-component source and
    /// produce `Void`.
    pub fn from_vec4(shape: TypeShape, source: Vec4) -> Self {
        let src = source.to_array();
        match shape {
            TypeShape::Scalar(kind) => Self::Scalar(Scalar::from_f32(kind, src[0])),
            TypeShape::Vector(kind, n) => Vector::from_f32(kind, &src[..n as usize])
                .map(Self::Vector)
                .unwrap_or_default(),
            TypeShape::Matrix { .. } => Self::Void,
        }
    }

    /// Read the value as four floats
    ///
    /// Vectors are zero padded, scalars fill `x`, anything else is zero.
    pub fn as_vec4(&self) -> Vec4 {
        match self {
            Self::Scalar(s) => Vec4::new(s.as_f32(), 0.0, 0.0, 0.0),
            Self::Vector(v) => v.to_vec4(),
            _ => Vec4::ZERO,
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Self::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Field of a structure value
    pub fn field(&self, index: usize) -> Option<&Value> {
        match self {
            Self::Struct(s) => s.fields.get(index),
            _ => None,
        }
    }

    /// Short description used in logs
    pub fn describe(&self) -> String {
        match self {
            Self::Void => "void".to_string(),
            Self::Scalar(s) => format!("{:?}", s),
            Self::Vector(v) => format!("{:?}{}", v.kind(), v.len()),
            Self::Matrix(m) => m.type_name.clone(),
            Self::Struct(s) => format!("struct {}", s.type_name),
            Self::Texture(t) => format!("texture {}x{}", t.width(), t.height()),
        }
    }
}

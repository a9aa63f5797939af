//! Externally authored uniform values
//!
//! The project attaches a list of named values to each draw item. They are
//! matched to the program's uniforms by name and converted to interpreter
//! values according to their declared kind.

use crate::types::{matrix_type_name, ScalarKind};
use crate::value::{Matrix, Scalar, Value, Vector};
use pp_core::{DebugError, Result, SourceLanguage};
use serde::{Deserialize, Serialize};

/// Declared kind of a named value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NamedValueKind {
    Boolean1,
    Boolean2,
    Boolean3,
    Boolean4,
    Integer1,
    Integer2,
    Integer3,
    Integer4,
    Float1,
    Float2,
    Float3,
    Float4,
    Float2x2,
    Float3x3,
    Float4x4,
}

impl NamedValueKind {
    /// Number of raw components the kind requires
    pub fn components(self) -> usize {
        match self {
            Self::Boolean1 | Self::Integer1 | Self::Float1 => 1,
            Self::Boolean2 | Self::Integer2 | Self::Float2 => 2,
            Self::Boolean3 | Self::Integer3 | Self::Float3 => 3,
            Self::Boolean4 | Self::Integer4 | Self::Float4 | Self::Float2x2 => 4,
            Self::Float3x3 => 9,
            Self::Float4x4 => 16,
        }
    }

    fn scalar_kind(self) -> ScalarKind {
        match self {
            Self::Boolean1 | Self::Boolean2 | Self::Boolean3 | Self::Boolean4 => ScalarKind::Bool,
            Self::Integer1 | Self::Integer2 | Self::Integer3 | Self::Integer4 => ScalarKind::Int,
            _ => ScalarKind::Float,
        }
    }

    fn matrix_size(self) -> Option<u8> {
        match self {
            Self::Float2x2 => Some(2),
            Self::Float3x3 => Some(3),
            Self::Float4x4 => Some(4),
            _ => None,
        }
    }
}

/// Raw component storage of a named value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RawComponents {
    Bool(Vec<bool>),
    Int(Vec<i32>),
    Float(Vec<f32>),
}

impl RawComponents {
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn scalars(&self, kind: ScalarKind) -> Vec<Scalar> {
        match self {
            Self::Bool(v) => v.iter().map(|&b| Scalar::from_i64(kind, b as i64)).collect(),
            Self::Int(v) => v.iter().map(|&i| Scalar::from_i64(kind, i as i64)).collect(),
            Self::Float(v) => v.iter().map(|&f| Scalar::from_f32(kind, f)).collect(),
        }
    }

    fn floats(&self) -> Vec<f32> {
        match self {
            Self::Bool(v) => v.iter().map(|&b| b as u8 as f32).collect(),
            Self::Int(v) => v.iter().map(|&i| i as f32).collect(),
            Self::Float(v) => v.clone(),
        }
    }
}

/// Uniform value supplied by the project for a draw item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedValue {
    pub name: String,
    pub kind: NamedValueKind,
    pub data: RawComponents,
}

impl NamedValue {
    pub fn new(name: impl Into<String>, kind: NamedValueKind, data: RawComponents) -> Self {
        Self {
            name: name.into(),
            kind,
            data,
        }
    }

    pub fn float(name: impl Into<String>, v: f32) -> Self {
        Self::new(name, NamedValueKind::Float1, RawComponents::Float(vec![v]))
    }

    pub fn float4(name: impl Into<String>, v: [f32; 4]) -> Self {
        Self::new(name, NamedValueKind::Float4, RawComponents::Float(v.to_vec()))
    }

    /// 4x4 matrix given row by row
    pub fn float4x4(name: impl Into<String>, rows: [[f32; 4]; 4]) -> Self {
        Self::new(
            name,
            NamedValueKind::Float4x4,
            RawComponents::Float(rows.concat()),
        )
    }

    /// Convert to an interpreter value for a program written in `language`
    ///
    /// One component gives a scalar, two to four a vector, and the matrix
    /// kinds a square float matrix. The raw data must hold exactly the
    /// number of components the kind declares.
    pub fn to_value(&self, language: SourceLanguage) -> Result<Value> {
        let expected = self.kind.components();
        if self.data.len() != expected {
            return Err(DebugError::ValueShape {
                name: self.name.clone(),
                expected,
                found: self.data.len(),
            });
        }

        if let Some(size) = self.kind.matrix_size() {
            let matrix = Matrix::from_row_major(
                matrix_type_name(language, size),
                size,
                size,
                &self.data.floats(),
            );
            return Ok(matrix.map(Value::Matrix).unwrap_or_default());
        }

        let mut scalars = self.data.scalars(self.kind.scalar_kind());
        if scalars.len() == 1 {
            return Ok(Value::Scalar(scalars.remove(0)));
        }
        Ok(Vector::from_scalars(scalars)
            .map(Value::Vector)
            .unwrap_or_default())
    }
}

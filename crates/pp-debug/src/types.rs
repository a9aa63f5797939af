//! Reflection types reported by the shader compiler
//!
//! Declarations of globals, entry points and structures, plus the
//! scalar/vector/matrix shape of a declared type name.

use pp_core::SourceLanguage;

/// Component kind of a scalar or vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Uint,
    Float,
}

impl ScalarKind {
    /// Whether values of this kind are averaged instead of weighted when interpolated
    pub fn is_integer(self) -> bool {
        !matches!(self, Self::Float)
    }
}

/// Shape of a declared type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    Scalar(ScalarKind),
    Vector(ScalarKind, u8),
    Matrix { rows: u8, cols: u8 },
}

impl TypeShape {
    /// Number of components a value of this shape holds
    pub fn components(&self) -> usize {
        match *self {
            Self::Scalar(_) => 1,
            Self::Vector(_, n) => n as usize,
            Self::Matrix { rows, cols } => rows as usize * cols as usize,
        }
    }

    /// Parse an HLSL-style (`float3`, `int2`, `float4x4`) or GLSL-style
    /// (`vec3`, `ivec2`, `mat4`, `mat3x2`) type name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();

        for (prefix, kind) in [
            ("bvec", ScalarKind::Bool),
            ("ivec", ScalarKind::Int),
            ("uvec", ScalarKind::Uint),
            ("dvec", ScalarKind::Float),
            ("vec", ScalarKind::Float),
        ] {
            if let Some(n) = name.strip_prefix(prefix) {
                return vector_of(kind, n);
            }
        }

        if let Some(dims) = name.strip_prefix("dmat").or_else(|| name.strip_prefix("mat")) {
            // GLSL names columns first: matCxR
            return match dims.split_once('x') {
                Some((c, r)) => matrix_of(r, c),
                None => matrix_of(dims, dims),
            };
        }

        let (kind, dims) = [
            ("min16float", ScalarKind::Float),
            ("min16uint", ScalarKind::Uint),
            ("min16int", ScalarKind::Int),
            ("double", ScalarKind::Float),
            ("float", ScalarKind::Float),
            ("half", ScalarKind::Float),
            ("bool", ScalarKind::Bool),
            ("dword", ScalarKind::Int),
            ("uint", ScalarKind::Uint),
            ("int", ScalarKind::Int),
        ]
        .into_iter()
        .find_map(|(base, kind)| name.strip_prefix(base).map(|dims| (kind, dims)))?;

        if dims.is_empty() {
            return Some(Self::Scalar(kind));
        }
        match dims.split_once('x') {
            Some((r, c)) if kind == ScalarKind::Float => matrix_of(r, c),
            Some(_) => None,
            None => vector_of(kind, dims),
        }
    }
}

fn vector_of(kind: ScalarKind, n: &str) -> Option<TypeShape> {
    match n.parse::<u8>().ok()? {
        1 => Some(TypeShape::Scalar(kind)),
        n @ 2..=4 => Some(TypeShape::Vector(kind, n)),
        _ => None,
    }
}

fn matrix_of(rows: &str, cols: &str) -> Option<TypeShape> {
    let rows = rows.parse::<u8>().ok()?;
    let cols = cols.parse::<u8>().ok()?;
    if (2..=4).contains(&rows) && (2..=4).contains(&cols) {
        Some(TypeShape::Matrix { rows, cols })
    } else {
        None
    }
}

/// Whether a declared type is bound from a texture resource
pub fn is_texture_type(type_name: &str) -> bool {
    const TEXTURE_TYPES: &[&str] = &[
        "sampler1D",
        "sampler2D",
        "sampler3D",
        "samplerCube",
        "sampler2DShadow",
        "isampler2D",
        "usampler2D",
        "Texture1D",
        "Texture2D",
        "Texture3D",
        "TextureCube",
    ];
    TEXTURE_TYPES.contains(&type_name.trim())
}

/// Name of a square float matrix type in the given language
pub fn matrix_type_name(language: SourceLanguage, size: u8) -> String {
    match language {
        SourceLanguage::Hlsl => format!("float{size}x{size}"),
        SourceLanguage::Glsl => format!("mat{size}"),
    }
}

/// Storage qualifier of a global declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageQualifier {
    #[default]
    Uniform,
    In,
    Out,
}

/// Declared variable: global, function argument or structure member
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variable {
    pub name: String,
    pub type_name: String,
    /// Semantic tag; empty when the declaration has none
    pub semantic: String,
    pub storage: StorageQualifier,
    /// Explicit input/binding slot
    pub input_slot: Option<u32>,
    /// Exempt from interpolation
    pub flat: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn with_semantic(mut self, semantic: impl Into<String>) -> Self {
        self.semantic = semantic.into();
        self
    }

    pub fn with_storage(mut self, storage: StorageQualifier) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_slot(mut self, slot: u32) -> Self {
        self.input_slot = Some(slot);
        self
    }

    pub fn flat(mut self) -> Self {
        self.flat = true;
        self
    }

    pub fn has_semantic(&self) -> bool {
        !self.semantic.is_empty()
    }
}

/// Declared function
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    /// Empty for `void`
    pub return_type: String,
    pub arguments: Vec<Variable>,
}

/// Declared structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub members: Vec<Variable>,
}

impl StructDecl {
    /// Index of the member tagged with `semantic`, compared case-insensitively
    pub fn member_by_semantic(&self, semantic: &str) -> Option<usize> {
        self.members
            .iter()
            .position(|m| m.semantic.eq_ignore_ascii_case(semantic))
    }
}

/// Everything the compiler reports about a successfully compiled program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramInfo {
    pub globals: Vec<Variable>,
    pub functions: Vec<FunctionDecl>,
    pub structures: Vec<StructDecl>,
}

impl ProgramInfo {
    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn structure(&self, name: &str) -> Option<&StructDecl> {
        self.structures.iter().find(|s| s.name == name)
    }

    pub fn globals_with(&self, storage: StorageQualifier) -> impl Iterator<Item = &Variable> {
        self.globals.iter().filter(move |g| g.storage == storage)
    }
}

//! Scripted interpreter and resource provider shared by the integration tests

#![allow(dead_code)]

use glam::{Vec2, Vec3, Vec4};
use pp_debug::{
    AttributeKind, CompileRequest, DrawPass, FragmentContext, InputLayoutItem, ProgramInfo,
    ResourceProvider, ShaderEngine, Value, VertexRecord,
};
use std::collections::HashMap;

/// Body of a scripted program: reads and writes globals, receives the arguments
pub type Script = Box<dyn FnMut(&mut HashMap<String, Value>, &[Value]) -> Value>;

/// In-memory stand-in for a compiler plus interpreter
///
/// Each `compile` consumes the program queued with [`MockEngine::queue`].
#[derive(Default)]
pub struct MockEngine {
    pending: Option<(ProgramInfo, Script)>,
    failure: Option<String>,
    script: Option<Script>,
    pub globals: HashMap<String, Value>,
    pub semantics: HashMap<String, Value>,
    pub added: Vec<String>,
    pub last_args: Vec<Value>,
    pub compiles: usize,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program returned by the next compile
    pub fn queue(&mut self, program: ProgramInfo, script: impl FnMut(&mut HashMap<String, Value>, &[Value]) -> Value + 'static) {
        self.pending = Some((program, Box::new(script)));
    }

    /// Make the next compile fail with `message`
    pub fn fail_next(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }
}

impl ShaderEngine for MockEngine {
    fn compile(&mut self, _request: &CompileRequest<'_>) -> Result<ProgramInfo, String> {
        self.compiles += 1;
        if let Some(message) = self.failure.take() {
            return Err(message);
        }
        let (program, script) = self.pending.take().ok_or("no program queued")?;
        self.script = Some(script);
        self.globals.clear();
        self.semantics.clear();
        self.added.clear();
        Ok(program)
    }

    fn execute(&mut self, _entry: &str, args: &[Value]) -> Value {
        self.last_args = args.to_vec();
        match self.script.as_mut() {
            Some(script) => script(&mut self.globals, args),
            None => Value::Void,
        }
    }

    fn add_global(&mut self, name: &str) {
        self.added.push(name.to_string());
        self.globals.entry(name.to_string()).or_default();
    }

    fn global_value(&self, name: &str) -> Option<Value> {
        self.globals.get(name).cloned()
    }

    fn set_global_value(&mut self, name: &str, value: Value) {
        self.globals.insert(name.to_string(), value);
    }

    fn semantic_value(&self, semantic: &str) -> Option<Value> {
        self.semantics.get(semantic).cloned()
    }

    fn set_semantic_value(&mut self, semantic: &str, value: Value) {
        self.semantics.insert(semantic.to_string(), value);
    }
}

/// Resource provider backed by fixed sizes and a constant fill byte
#[derive(Default)]
pub struct MockResources {
    pub bound: Vec<String>,
    pub sizes: HashMap<String, (u32, u32)>,
    pub reads: usize,
}

impl MockResources {
    pub fn with_textures(names: &[(&str, (u32, u32))]) -> Self {
        Self {
            bound: names.iter().map(|(n, _)| n.to_string()).collect(),
            sizes: names.iter().map(|(n, s)| (n.to_string(), *s)).collect(),
            reads: 0,
        }
    }
}

impl ResourceProvider for MockResources {
    fn bound_textures(&self, _owner: &str) -> Vec<String> {
        self.bound.clone()
    }

    fn texture_size(&self, resource: &str) -> Option<(u32, u32)> {
        self.sizes.get(resource).copied()
    }

    fn read_pixels(&mut self, _resource: &str, _width: u32, _height: u32, out: &mut [u8]) {
        self.reads += 1;
        out.fill(0xff);
    }
}

/// Full-screen-ish triangle with distinct per-vertex attributes
pub fn triangle() -> [VertexRecord; 3] {
    let colors = [Vec4::X, Vec4::Y, Vec4::Z];
    let positions = [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let texcoords = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)];
    std::array::from_fn(|i| VertexRecord {
        position: positions[i],
        normal: Vec3::Z,
        texcoord: texcoords[i],
        color: colors[i],
        ..VertexRecord::default()
    })
}

pub fn fragment() -> FragmentContext {
    FragmentContext::new(triangle())
}

/// Draw item with position, texcoord and color inputs
pub fn pass() -> DrawPass {
    DrawPass {
        name: "Pass 0".to_string(),
        input_layout: vec![
            InputLayoutItem::new("POSITION", AttributeKind::Position),
            InputLayoutItem::new("TEXCOORD0", AttributeKind::Texcoord),
            InputLayoutItem::new("COLOR", AttributeKind::Color),
        ],
        uniforms: Vec::new(),
    }
}

pub fn assert_vec4_eq(value: &Value, expected: Vec4) {
    let actual = value.as_vec4();
    assert!(
        actual.abs_diff_eq(expected, 1e-5),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

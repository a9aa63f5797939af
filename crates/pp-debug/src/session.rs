//! Debug session: binds a program to one fragment and runs it
//!
//! A session owns the interpreter for a single stage at a time. The caller
//! debugs a pixel by running the vertex stage for each of the triangle's
//! three vertices, which caches their outputs in the [`FragmentContext`],
//! then binding the pixel program and running it once.

use crate::binding::{strategy_for, BindContext, Builtins, OutputContext};
use crate::engine::{CompileRequest, ResourceProvider, ShaderEngine};
use crate::fragment::{DrawPass, FragmentContext, OutputLayout};
use crate::texture::TextureCache;
use crate::types::ProgramInfo;
use crate::value::Value;
use pp_core::{Config, DebugError, Result, SessionConfig, SourceLanguage, Stage};
use tracing::{debug, info, warn};

/// Binder and executor for one debugged program
pub struct DebugSession<E: ShaderEngine> {
    /// Compiler and interpreter
    engine: E,
    config: SessionConfig,
    /// Log every installed value at trace level
    trace_bindings: bool,
    language: SourceLanguage,
    stage: Stage,
    /// Entry point of the bound program
    entry: String,
    /// Reflection of the last successfully compiled program
    program: Option<ProgramInfo>,
    textures: TextureCache,
    /// Shape of the vertex stage's output, kept for the pixel stage
    output_layout: Option<OutputLayout>,
    builtins: Builtins,
    /// Arguments for the next execution
    args: Vec<Value>,
    /// A context is bound and waiting to be executed
    debugging: bool,
}

impl<E: ShaderEngine> DebugSession<E> {
    /// Create a session with default settings
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, SessionConfig::default())
    }

    pub fn with_config(engine: E, config: SessionConfig) -> Self {
        let [width, height] = config.fallback_texture_size;
        Self {
            engine,
            language: config.default_language,
            stage: Stage::Vertex,
            entry: String::new(),
            program: None,
            textures: TextureCache::new((width, height)),
            output_layout: None,
            builtins: Builtins::empty(),
            args: Vec::new(),
            debugging: false,
            trace_bindings: false,
            config,
        }
    }

    /// Create a session from a loaded configuration file
    pub fn from_config(engine: E, config: &Config) -> Self {
        let mut session = Self::with_config(engine, config.session.clone());
        session.trace_bindings = config.debug.trace_bindings;
        session
    }

    /// Log every value installed during a bind pass
    pub fn set_trace_bindings(&mut self, enabled: bool) {
        self.trace_bindings = enabled;
    }

    /// Compile `source` and make it the debugged program
    ///
    /// A compile failure returns the compiler's message and leaves the
    /// previously bound program in place.
    pub fn set_source(
        &mut self,
        language: SourceLanguage,
        stage: Stage,
        entry: &str,
        source: &str,
    ) -> Result<()> {
        let request = CompileRequest {
            language,
            stage,
            entry,
            source,
        };
        let program = self.engine.compile(&request).map_err(|message| {
            warn!("Failed to compile {} {} shader '{}': {}", language, stage, entry, message);
            DebugError::Compilation {
                stage,
                language,
                entry: entry.to_string(),
                message,
            }
        })?;

        self.language = language;
        self.stage = stage;
        self.entry = entry.to_string();
        self.program = Some(program);
        self.args.clear();
        self.debugging = false;

        self.textures.invalidate(stage);
        if stage == Stage::Vertex {
            self.output_layout = None;
        }

        self.builtins = strategy_for(language).register_builtins(&mut self.engine, stage);
        info!("Bound {} {} shader, entry '{}'", language, stage, entry);
        Ok(())
    }

    /// Install every input the bound program reads for one vertex or fragment
    ///
    /// `local_index` selects which of the triangle's vertices a vertex-stage
    /// run debugs; the pixel stage ignores it.
    pub fn bind_context(
        &mut self,
        fragment: &mut FragmentContext,
        pass: &DrawPass,
        resources: &mut dyn ResourceProvider,
        local_index: usize,
    ) -> Result<()> {
        let program = self.program.as_ref().ok_or(DebugError::NoSource)?;
        if local_index >= fragment.vertices.len() {
            return Err(DebugError::VertexIndex(local_index));
        }

        self.textures.invalidate(self.stage);

        let strategy = strategy_for(self.language);
        let mut cx = BindContext {
            engine: &mut self.engine,
            program,
            language: self.language,
            stage: self.stage,
            entry: &self.entry,
            pass,
            fragment,
            local_index,
            textures: &mut self.textures,
            resources,
            args: &mut self.args,
            output_layout: self.output_layout.as_ref(),
            builtins: self.builtins,
            vertices_per_primitive: self.config.vertices_per_primitive,
            trace_bindings: self.trace_bindings,
        };
        strategy.bind_globals(&mut cx)?;
        strategy.bind_inputs(&mut cx)?;

        self.debugging = true;
        debug!("Context bound for {} stage, vertex {}", self.stage, local_index);
        Ok(())
    }

    /// Run the bound program and publish its outputs
    ///
    /// Vertex-stage results are cached in `fragment` for the pixel stage;
    /// pixel-stage results become the fragment's debug color.
    pub fn execute(&mut self, fragment: &mut FragmentContext, local_index: usize) -> Result<Value> {
        let program = self.program.as_ref().ok_or(DebugError::NoSource)?;
        if local_index >= fragment.vertices.len() {
            return Err(DebugError::VertexIndex(local_index));
        }

        let result = self.engine.execute(&self.entry, &self.args);
        self.debugging = false;

        let mut cx = OutputContext {
            engine: &mut self.engine,
            program,
            stage: self.stage,
            entry: &self.entry,
            fragment,
            local_index,
            output_layout: &mut self.output_layout,
        };
        strategy_for(self.language).publish_outputs(&mut cx, result.clone())?;
        Ok(result)
    }

    /// Bind and run the vertex stage for one of the triangle's vertices
    pub fn debug_vertex(
        &mut self,
        fragment: &mut FragmentContext,
        pass: &DrawPass,
        resources: &mut dyn ResourceProvider,
        local_index: usize,
    ) -> Result<Value> {
        self.bind_context(fragment, pass, resources, local_index)?;
        self.execute(fragment, local_index)
    }

    /// Bind and run the pixel stage; the color lands in `fragment.debug_color`
    pub fn debug_pixel(
        &mut self,
        fragment: &mut FragmentContext,
        pass: &DrawPass,
        resources: &mut dyn ResourceProvider,
    ) -> Result<Value> {
        self.bind_context(fragment, pass, resources, 0)?;
        self.execute(fragment, 0)
    }

    pub fn is_debugging(&self) -> bool {
        self.debugging
    }

    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn program(&self) -> Option<&ProgramInfo> {
        self.program.as_ref()
    }

    pub fn builtins(&self) -> Builtins {
        self.builtins
    }

    /// Arguments prepared by the last bind pass
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn output_layout(&self) -> Option<&OutputLayout> {
        self.output_layout.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

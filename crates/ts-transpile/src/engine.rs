//! The transpilation engine seam and its default implementation.

use crate::options::{CompilerOptions, ImportsNotUsedAsValues, JsxEmit};
use std::error::Error as StdError;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use transpile_engine::{emit, EmitOptions, JsxTransform, SourceMapOutput};

/// Module name used when the caller does not name the module.
pub const DEFAULT_MODULE_NAME: &str = "module.ts";

/// JavaScript produced for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileOutput {
    /// The emitted JavaScript text.
    pub code: String,
    /// A separate V3 source map, when `sourceMap` was requested.
    pub source_map: Option<String>,
}

/// An error raised by an engine while transpiling, passed through unchanged.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct EngineError(Box<dyn StdError + Send + Sync>);

impl EngineError {
    pub fn new(error: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(error.into())
    }

    /// Returns the engine's own error if it is of type `T`.
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

/// An error raised while creating an engine.
///
/// Cloneable so that every caller waiting on the same initialization attempt
/// observes the same failure.
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct EngineInitError(Arc<dyn StdError + Send + Sync>);

impl EngineInitError {
    pub fn new(error: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(Arc::from(error.into()))
    }

    /// Returns the factory's own error if it is of type `T`.
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

/// Something that turns module source text into JavaScript.
pub trait Engine: Send + Sync + 'static {
    /// Transpiles the module `file_name`. The name selects the dialect
    /// (TypeScript, TSX, JavaScript, JSX) and names the module in source maps.
    fn transpile_module(
        &self,
        file_name: &str,
        source: &str,
        options: &CompilerOptions,
    ) -> Result<TranspileOutput, EngineError>;

    /// Transpiles a TypeScript module and returns only the code.
    fn transpile(&self, source: &str, options: &CompilerOptions) -> Result<String, EngineError> {
        self.transpile_module(DEFAULT_MODULE_NAME, source, options)
            .map(|output| output.code)
    }
}

/// Asynchronously creates an [`Engine`].
pub trait EngineFactory: Send + Sync + 'static {
    type Engine: Engine;

    fn create(&self) -> impl Future<Output = Result<Self::Engine, EngineInitError>> + Send;
}

/// The default engine, backed by `transpile-engine`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcEngine;

impl Engine for OxcEngine {
    fn transpile_module(
        &self,
        file_name: &str,
        source: &str,
        options: &CompilerOptions,
    ) -> Result<TranspileOutput, EngineError> {
        let emitted =
            emit(file_name, source, &EmitOptions::from(options)).map_err(EngineError::new)?;
        Ok(TranspileOutput {
            code: emitted.code,
            source_map: emitted.source_map,
        })
    }
}

/// Creates [`OxcEngine`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcEngineFactory;

impl EngineFactory for OxcEngineFactory {
    type Engine = OxcEngine;

    async fn create(&self) -> Result<OxcEngine, EngineInitError> {
        Ok(OxcEngine)
    }
}

impl From<&CompilerOptions> for EmitOptions {
    fn from(options: &CompilerOptions) -> Self {
        let jsx = match options.jsx() {
            JsxEmit::React => JsxTransform::Classic {
                factory: options.jsx_factory().to_string(),
                fragment_factory: options.jsx_fragment_factory().to_string(),
            },
            JsxEmit::ReactJsx => JsxTransform::Automatic {
                import_source: options.jsx_import_source.clone(),
                development: false,
            },
            JsxEmit::ReactJsxdev => JsxTransform::Automatic {
                import_source: options.jsx_import_source.clone(),
                development: true,
            },
            JsxEmit::Preserve | JsxEmit::ReactNative => JsxTransform::Preserve {
                factory: options.jsx_factory().to_string(),
                fragment_factory: options.jsx_fragment_factory().to_string(),
            },
        };

        let source_map = if options.inline_source_map.unwrap_or(false) {
            SourceMapOutput::Inline
        } else if options.source_map.unwrap_or(false) {
            SourceMapOutput::Separate
        } else {
            SourceMapOutput::None
        };

        Self {
            emit_decorator_metadata: options.emit_decorator_metadata.unwrap_or(false),
            preserve_value_imports: options.imports_not_used_as_values()
                != ImportsNotUsedAsValues::Remove,
            jsx,
            source_map,
            inline_sources: options.inline_sources.unwrap_or(false),
        }
    }
}

//! The transpile entry points.

use crate::engine::{
    Engine, EngineError, EngineFactory, EngineInitError, OxcEngineFactory, TranspileOutput,
};
use crate::handle::EngineHandle;
use crate::options::CompilerOptions;
use crate::validate::{validate, OptionsError};
use std::sync::Arc;
use thiserror::Error;

/// Error types for transpilation.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// The compiler options are inconsistent. The engine was not called.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// The engine could not be created.
    #[error("failed to initialize transpilation engine: {0}")]
    EngineInitialization(#[source] EngineInitError),

    /// The engine rejected the module.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// The category of a [`TranspileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConflictingOptions,
    MissingDependency,
    EngineInitializationFailure,
    EngineTranspilationFailure,
}

impl TranspileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Options(OptionsError::ConflictingOptions { .. }) => ErrorKind::ConflictingOptions,
            Self::Options(OptionsError::MissingDependency { .. }) => ErrorKind::MissingDependency,
            Self::EngineInitialization(_) => ErrorKind::EngineInitializationFailure,
            Self::Engine(_) => ErrorKind::EngineTranspilationFailure,
        }
    }
}

/// Validates options and forwards modules to a lazily created engine.
pub struct Transpiler<F: EngineFactory> {
    factory: F,
    engine: EngineHandle<F::Engine>,
}

impl<F: EngineFactory> Transpiler<F> {
    /// Creates a transpiler. The engine is created on first use.
    pub const fn new(factory: F) -> Self {
        Self {
            factory,
            engine: EngineHandle::new(),
        }
    }

    /// Returns whether the engine has been created.
    pub fn is_engine_ready(&self) -> bool {
        self.engine.is_ready()
    }

    /// Transpiles a TypeScript module into JavaScript.
    ///
    /// Options are validated before the engine is touched; absent options
    /// mean the defaults.
    pub async fn transpile(
        &self,
        source: &str,
        options: Option<&CompilerOptions>,
    ) -> Result<String, TranspileError> {
        validate(options)?;
        let engine = self.engine().await?;
        let default_options = CompilerOptions::default();
        Ok(engine.transpile(source, options.unwrap_or(&default_options))?)
    }

    /// Transpiles the module `file_name`, returning the code together with
    /// the separate source map when `sourceMap` is set.
    pub async fn transpile_module(
        &self,
        file_name: &str,
        source: &str,
        options: Option<&CompilerOptions>,
    ) -> Result<TranspileOutput, TranspileError> {
        validate(options)?;
        let engine = self.engine().await?;
        let default_options = CompilerOptions::default();
        Ok(engine.transpile_module(file_name, source, options.unwrap_or(&default_options))?)
    }

    async fn engine(&self) -> Result<Arc<F::Engine>, TranspileError> {
        self.engine
            .get_or_init(&self.factory)
            .await
            .map_err(TranspileError::EngineInitialization)
    }
}

impl<F: EngineFactory + Default> Default for Transpiler<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

static DEFAULT_TRANSPILER: Transpiler<OxcEngineFactory> = Transpiler::new(OxcEngineFactory);

/// Transpiles a TypeScript module with the process-wide default engine.
pub async fn transpile(
    source: &str,
    options: Option<&CompilerOptions>,
) -> Result<String, TranspileError> {
    DEFAULT_TRANSPILER.transpile(source, options).await
}

/// Transpiles the module `file_name` with the process-wide default engine.
pub async fn transpile_module(
    file_name: &str,
    source: &str,
    options: Option<&CompilerOptions>,
) -> Result<TranspileOutput, TranspileError> {
    DEFAULT_TRANSPILER
        .transpile_module(file_name, source, options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_kinds() {
        let conflicting = TranspileError::from(OptionsError::ConflictingOptions {
            option: "sourceMap",
            conflicts_with: "inlineSourceMap",
        });
        assert_eq!(conflicting.kind(), ErrorKind::ConflictingOptions);

        let missing = TranspileError::from(OptionsError::MissingDependency {
            option: "inlineSources",
            requires: "inlineSourceMap",
            alternative: "sourceMap",
        });
        assert_eq!(missing.kind(), ErrorKind::MissingDependency);

        let init = TranspileError::EngineInitialization(EngineInitError::new("offline"));
        assert_eq!(init.kind(), ErrorKind::EngineInitializationFailure);
        assert_eq!(
            init.to_string(),
            "failed to initialize transpilation engine: offline"
        );

        let engine = TranspileError::from(EngineError::new("bad syntax"));
        assert_eq!(engine.kind(), ErrorKind::EngineTranspilationFailure);
        assert_eq!(engine.to_string(), "bad syntax");
    }

    #[test]
    fn test_options_error_message_unchanged() {
        let err = TranspileError::from(OptionsError::ConflictingOptions {
            option: "sourceMap",
            conflicts_with: "inlineSourceMap",
        });
        assert_eq!(
            err.to_string(),
            "Option 'sourceMap' cannot be specified with option 'inlineSourceMap'"
        );
    }
}

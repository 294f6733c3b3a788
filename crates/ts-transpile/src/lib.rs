//! Validated TypeScript to JavaScript transpilation.
//!
//! This crate checks a set of TypeScript compiler options for consistency and
//! hands one module at a time to a transpilation engine. The engine is created
//! lazily on first use and shared by every later call; concurrent first calls
//! wait for the same initialization.
//!
//! # Example
//!
//! ```
//! use ts_transpile::{transpile, CompilerOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let options = CompilerOptions {
//!         inline_source_map: Some(true),
//!         ..Default::default()
//!     };
//!     let code = transpile("const x: number = 1;", Some(&options)).await.unwrap();
//!     assert!(code.contains("sourceMappingURL"));
//! }
//! ```

mod config;
mod engine;
mod handle;
mod options;
mod transpiler;
mod validate;

pub use config::{ConfigError, TsConfig, CONFIG_FILE_NAMES};
pub use engine::{
    Engine, EngineError, EngineFactory, EngineInitError, OxcEngine, OxcEngineFactory,
    TranspileOutput, DEFAULT_MODULE_NAME,
};
pub use options::{
    CompilerOptions, ImportsNotUsedAsValues, JsxEmit, DEFAULT_JSX_FACTORY,
    DEFAULT_JSX_FRAGMENT_FACTORY,
};
pub use transpiler::{transpile, transpile_module, ErrorKind, TranspileError, Transpiler};
pub use validate::{validate, OptionsError};

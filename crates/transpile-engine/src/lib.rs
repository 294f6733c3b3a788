//! Single-module TypeScript/JSX to JavaScript emitter.
//!
//! This crate turns the source text of one module into plain JavaScript. It
//! handles:
//! - Parsing TypeScript, TSX, JavaScript and JSX (selected by file extension)
//! - Stripping type annotations and type-only imports
//! - Rewriting JSX with the classic or automatic runtime
//! - Legacy decorators, optionally with reflection metadata
//! - Separate or inline source maps
//!
//! # Example
//!
//! ```
//! use transpile_engine::{emit, EmitOptions};
//!
//! let emitted = emit("module.ts", "const x: number = 1;", &EmitOptions::default()).unwrap();
//! assert!(!emitted.code.contains("number"));
//! ```

mod emit;
mod media_type;

pub use emit::{emit, EmitError, EmitOptions, Emitted, JsxTransform, SourceMapOutput};
pub use media_type::MediaType;

//! Parse, transform and print one module.

use crate::media_type::MediaType;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_transformer::{JsxRuntime, TransformOptions, Transformer};
use serde_json::Value;
use std::borrow::Cow;
use std::path::Path;
use thiserror::Error;

const SOURCE_MAP_URL_PREFIX: &str = "//# sourceMappingURL=data:application/json;base64,";

/// Error types for emitting a module.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The file name does not name a module that can be emitted.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The source text is not valid for its media type.
    #[error("failed to parse {file}: {}", .diagnostics.join("\n"))]
    Parse {
        file: String,
        diagnostics: Vec<String>,
    },

    /// A transform rejected the parsed module.
    #[error("failed to transform {file}: {}", .diagnostics.join("\n"))]
    Transform {
        file: String,
        diagnostics: Vec<String>,
    },

    /// The generated source map could not be rewritten.
    #[error("invalid source map: {0}")]
    SourceMap(#[from] serde_json::Error),
}

/// How JSX elements are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsxTransform {
    /// Leave JSX untouched. The factory names still keep their imports alive.
    Preserve {
        factory: String,
        fragment_factory: String,
    },
    /// Call a factory function for every element.
    Classic {
        factory: String,
        fragment_factory: String,
    },
    /// Import `jsx`/`jsxs` helpers from a runtime module.
    Automatic {
        import_source: Option<String>,
        development: bool,
    },
}

impl Default for JsxTransform {
    fn default() -> Self {
        Self::Classic {
            factory: "React.createElement".to_string(),
            fragment_factory: "React.Fragment".to_string(),
        }
    }
}

/// Where the source map of an emitted module goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceMapOutput {
    #[default]
    None,
    /// Returned next to the code in [`Emitted::source_map`].
    Separate,
    /// Appended to the code as a base64 data URL comment.
    Inline,
}

/// Fully resolved emit options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Emit `design:*` reflection metadata for decorated declarations.
    pub emit_decorator_metadata: bool,
    /// Keep imports whose bindings are never used as values.
    pub preserve_value_imports: bool,
    pub jsx: JsxTransform,
    pub source_map: SourceMapOutput,
    /// Embed the original source text in the source map.
    pub inline_sources: bool,
}

impl EmitOptions {
    fn transform_options(&self) -> TransformOptions {
        let mut transform = TransformOptions::default();
        transform.typescript.only_remove_type_imports = self.preserve_value_imports;
        transform.decorator.legacy = true;
        transform.decorator.emit_decorator_metadata = self.emit_decorator_metadata;

        match &self.jsx {
            JsxTransform::Preserve {
                factory,
                fragment_factory,
            } => {
                transform.jsx.jsx_plugin = false;
                transform.typescript.jsx_pragma = Cow::Owned(factory.clone());
                transform.typescript.jsx_pragma_frag = Cow::Owned(fragment_factory.clone());
            }
            JsxTransform::Classic {
                factory,
                fragment_factory,
            } => {
                transform.jsx.jsx_plugin = true;
                transform.jsx.runtime = JsxRuntime::Classic;
                transform.jsx.pragma = Some(factory.clone());
                transform.jsx.pragma_frag = Some(fragment_factory.clone());
                // Import elision only sees references written in the source.
                transform.typescript.jsx_pragma = Cow::Owned(factory.clone());
                transform.typescript.jsx_pragma_frag = Cow::Owned(fragment_factory.clone());
            }
            JsxTransform::Automatic {
                import_source,
                development,
            } => {
                transform.jsx.jsx_plugin = true;
                transform.jsx.runtime = JsxRuntime::Automatic;
                transform.jsx.development = *development;
                transform.jsx.import_source = import_source.clone();
            }
        }

        transform
    }
}

/// The output of emitting one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    /// The JavaScript text.
    pub code: String,
    /// The V3 source map JSON, present only for [`SourceMapOutput::Separate`].
    pub source_map: Option<String>,
}

/// Emits JavaScript for the module `file_name` with the given source text.
///
/// The file name selects the parser dialect and names the module in the
/// source map; it is never read from disk.
pub fn emit(file_name: &str, source: &str, options: &EmitOptions) -> Result<Emitted, EmitError> {
    let media_type = MediaType::from_file_name(file_name)
        .ok_or_else(|| EmitError::UnsupportedMediaType(file_name.to_string()))?;
    let path = Path::new(file_name.strip_prefix("file://").unwrap_or(file_name));

    tracing::trace!(
        file = file_name,
        ?media_type,
        typescript = media_type.is_typescript(),
        jsx = media_type.is_jsx(),
        "emitting module"
    );

    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, media_type.source_type()).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        return Err(EmitError::Parse {
            file: file_name.to_string(),
            diagnostics: parsed.errors.iter().map(ToString::to_string).collect(),
        });
    }
    let mut program = parsed.program;

    let semantic = SemanticBuilder::new()
        .with_excess_capacity(0.0)
        .build(&program);
    let transform_options = options.transform_options();
    let transformed = Transformer::new(&allocator, path, &transform_options)
        .build_with_scoping(semantic.semantic.into_scoping(), &mut program);
    if !transformed.errors.is_empty() {
        return Err(EmitError::Transform {
            file: file_name.to_string(),
            diagnostics: transformed.errors.iter().map(ToString::to_string).collect(),
        });
    }

    let codegen_options = CodegenOptions {
        source_map_path: (options.source_map != SourceMapOutput::None)
            .then(|| path.to_path_buf()),
        ..CodegenOptions::default()
    };
    let generated = Codegen::new().with_options(codegen_options).build(&program);

    let mut code = generated.code;
    let map_json = match generated.map {
        Some(map) if options.source_map != SourceMapOutput::None => Some(finish_source_map(
            &map.to_json_string(),
            source,
            options.inline_sources,
        )?),
        _ => None,
    };

    let source_map = match (options.source_map, map_json) {
        (SourceMapOutput::Inline, Some(json)) => {
            append_inline_source_map(&mut code, &json);
            None
        }
        (_, json) => json,
    };

    Ok(Emitted { code, source_map })
}

/// Rewrites the `sourcesContent` of a generated map.
fn finish_source_map(json: &str, source: &str, inline_sources: bool) -> Result<String, EmitError> {
    let mut map: Value = serde_json::from_str(json)?;
    if let Some(fields) = map.as_object_mut() {
        if inline_sources {
            fields.insert(
                "sourcesContent".to_string(),
                Value::Array(vec![Value::String(source.to_string())]),
            );
        } else {
            fields.remove("sourcesContent");
        }
    }
    Ok(serde_json::to_string(&map)?)
}

fn append_inline_source_map(code: &mut String, json: &str) {
    if !code.is_empty() && !code.ends_with('\n') {
        code.push('\n');
    }
    code.push_str(SOURCE_MAP_URL_PREFIX);
    code.push_str(&STANDARD.encode(json));
    code.push('\n');
}

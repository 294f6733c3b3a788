//! Compiler options accepted by the transpiler.

use serde::{Deserialize, Serialize};

/// Factory called for JSX elements when `jsx` is `react` and none is configured.
pub const DEFAULT_JSX_FACTORY: &str = "React.createElement";

/// Fragment factory used when `jsx` is `react` and none is configured.
pub const DEFAULT_JSX_FRAGMENT_FACTORY: &str = "React.Fragment";

/// What happens to imports whose bindings are never used as values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportsNotUsedAsValues {
    /// Drop the import.
    #[default]
    Remove,
    /// Keep the import for its side effects.
    Preserve,
    /// Keep the import; the checker would report it, the emitter does not.
    Error,
}

/// How JSX constructs in `.jsx`/`.tsx` modules are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JsxEmit {
    /// Keep JSX as written.
    Preserve,
    /// Automatic runtime (`react/jsx-runtime`).
    ReactJsx,
    /// Automatic runtime in development mode (`react/jsx-dev-runtime`).
    ReactJsxdev,
    /// Keep JSX as written.
    ReactNative,
    /// Classic runtime: call `jsxFactory` for every element.
    #[default]
    React,
}

/// The subset of TypeScript compiler options that affects single-module emit.
///
/// Every field is optional. Unset fields take the defaults documented on the
/// accessor methods. Deserializing ignores unknown keys, so a whole
/// `compilerOptions` section of a tsconfig file can be read directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Accepted for compatibility; has no effect on emit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_js: Option<bool>,

    /// Emit reflection metadata for legacy decorators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emit_decorator_metadata: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports_not_used_as_values: Option<ImportsNotUsedAsValues>,

    /// Embed the source map in the emitted code as a data URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_source_map: Option<bool>,

    /// Embed the original source text in the source map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_sources: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx: Option<JsxEmit>,

    /// Function called for JSX elements with the classic runtime, e.g. `h`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_factory: Option<String>,

    /// Function used for JSX fragments with the classic runtime, e.g. `Fragment`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_fragment_factory: Option<String>,

    /// Module the automatic runtime imports its helpers from, e.g. `preact`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_import_source: Option<String>,

    /// Produce a separate source map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map: Option<bool>,
}

impl CompilerOptions {
    /// Returns whether no option is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `importsNotUsedAsValues`, defaulting to `remove`.
    pub fn imports_not_used_as_values(&self) -> ImportsNotUsedAsValues {
        self.imports_not_used_as_values.unwrap_or_default()
    }

    /// `jsx`, defaulting to `react`.
    pub fn jsx(&self) -> JsxEmit {
        self.jsx.unwrap_or_default()
    }

    /// `jsxFactory`, defaulting to `React.createElement`.
    pub fn jsx_factory(&self) -> &str {
        self.jsx_factory.as_deref().unwrap_or(DEFAULT_JSX_FACTORY)
    }

    /// `jsxFragmentFactory`, defaulting to `React.Fragment`.
    pub fn jsx_fragment_factory(&self) -> &str {
        self.jsx_fragment_factory
            .as_deref()
            .unwrap_or(DEFAULT_JSX_FRAGMENT_FACTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = CompilerOptions::default();
        assert!(options.is_empty());
        assert_eq!(options.jsx(), JsxEmit::React);
        assert_eq!(
            options.imports_not_used_as_values(),
            ImportsNotUsedAsValues::Remove
        );
        assert_eq!(options.jsx_factory(), "React.createElement");
        assert_eq!(options.jsx_fragment_factory(), "React.Fragment");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let options: CompilerOptions = serde_json::from_str(
            r#"{
                "checkJs": true,
                "emitDecoratorMetadata": true,
                "importsNotUsedAsValues": "preserve",
                "inlineSourceMap": true,
                "inlineSources": true,
                "jsx": "react-jsxdev",
                "jsxFactory": "h",
                "jsxFragmentFactory": "Fragment",
                "jsxImportSource": "preact"
            }"#,
        )
        .unwrap();

        assert_eq!(options.check_js, Some(true));
        assert_eq!(options.emit_decorator_metadata, Some(true));
        assert_eq!(
            options.imports_not_used_as_values,
            Some(ImportsNotUsedAsValues::Preserve)
        );
        assert_eq!(options.inline_source_map, Some(true));
        assert_eq!(options.inline_sources, Some(true));
        assert_eq!(options.jsx, Some(JsxEmit::ReactJsxdev));
        assert_eq!(options.jsx_factory(), "h");
        assert_eq!(options.jsx_fragment_factory(), "Fragment");
        assert_eq!(options.jsx_import_source.as_deref(), Some("preact"));
        assert_eq!(options.source_map, None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let options: CompilerOptions =
            serde_json::from_str(r#"{"strict": true, "target": "ES2022", "sourceMap": true}"#)
                .unwrap();
        assert_eq!(options.source_map, Some(true));
    }

    #[test]
    fn test_unknown_jsx_mode_rejected() {
        let result = serde_json::from_str::<CompilerOptions>(r#"{"jsx": "solid"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_skips_unset() {
        let options = CompilerOptions {
            jsx: Some(JsxEmit::ReactJsx),
            source_map: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&options).unwrap(),
            r#"{"jsx":"react-jsx","sourceMap":false}"#
        );
    }

    #[test]
    fn test_jsx_names_match_tsconfig() {
        for (mode, name) in [
            (JsxEmit::Preserve, "preserve"),
            (JsxEmit::ReactJsx, "react-jsx"),
            (JsxEmit::ReactJsxdev, "react-jsxdev"),
            (JsxEmit::ReactNative, "react-native"),
            (JsxEmit::React, "react"),
        ] {
            assert_eq!(
                serde_json::to_value(mode).unwrap(),
                serde_json::Value::String(name.to_string())
            );
        }
    }
}

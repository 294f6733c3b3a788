//! Consistency checks for compiler options.

use crate::options::CompilerOptions;
use thiserror::Error;

/// An inconsistent combination of compiler options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Two options that contradict each other are both enabled.
    #[error("Option '{option}' cannot be specified with option '{conflicts_with}'")]
    ConflictingOptions {
        option: &'static str,
        conflicts_with: &'static str,
    },

    /// An option is enabled without either of the options it builds on.
    #[error(
        "Option '{option}' can only be used when either option '{requires}' or option '{alternative}' is provided"
    )]
    MissingDependency {
        option: &'static str,
        requires: &'static str,
        alternative: &'static str,
    },
}

impl CompilerOptions {
    /// Checks that the options can be handed to the engine together.
    ///
    /// `sourceMap` and `inlineSourceMap` exclude each other; `inlineSources`
    /// needs one of them. The conflict is reported first.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let inline_source_map = enabled(self.inline_source_map);
        let source_map = enabled(self.source_map);

        if inline_source_map && source_map {
            return Err(OptionsError::ConflictingOptions {
                option: "sourceMap",
                conflicts_with: "inlineSourceMap",
            });
        }

        if enabled(self.inline_sources) && !(inline_source_map || source_map) {
            return Err(OptionsError::MissingDependency {
                option: "inlineSources",
                requires: "inlineSourceMap",
                alternative: "sourceMap",
            });
        }

        Ok(())
    }
}

/// Validates optional compiler options. Absent options always pass.
pub fn validate(options: Option<&CompilerOptions>) -> Result<(), OptionsError> {
    options.map_or(Ok(()), CompilerOptions::validate)
}

fn enabled(flag: Option<bool>) -> bool {
    flag.unwrap_or(false)
}

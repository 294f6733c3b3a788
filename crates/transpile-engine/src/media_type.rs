//! Module kinds recognized by the emitter.

use oxc_span::SourceType;

/// The syntax a module is parsed with, derived from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    TypeScript,
    Mts,
    Cts,
    Tsx,
    JavaScript,
    Mjs,
    Cjs,
    Jsx,
}

impl MediaType {
    /// Resolves the media type of a module from its file name or `file://` URL.
    ///
    /// Declaration files and unknown extensions have no media type: they
    /// cannot produce JavaScript.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let path = file_name.strip_prefix("file://").unwrap_or(file_name);
        let name = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(path)
            .to_ascii_lowercase();

        if name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts") {
            return None;
        }

        let (_, extension) = name.rsplit_once('.')?;
        match extension {
            "ts" => Some(Self::TypeScript),
            "mts" => Some(Self::Mts),
            "cts" => Some(Self::Cts),
            "tsx" => Some(Self::Tsx),
            "js" => Some(Self::JavaScript),
            "mjs" => Some(Self::Mjs),
            "cjs" => Some(Self::Cjs),
            "jsx" => Some(Self::Jsx),
            _ => None,
        }
    }

    /// Returns whether modules of this type may contain type syntax.
    pub fn is_typescript(self) -> bool {
        matches!(self, Self::TypeScript | Self::Mts | Self::Cts | Self::Tsx)
    }

    /// Returns whether modules of this type may contain JSX.
    pub fn is_jsx(self) -> bool {
        matches!(self, Self::Tsx | Self::Jsx)
    }

    pub(crate) fn source_type(self) -> SourceType {
        match self {
            Self::TypeScript | Self::Mts | Self::Cts => SourceType::ts(),
            Self::Tsx => SourceType::tsx(),
            Self::JavaScript | Self::Mjs => SourceType::mjs(),
            Self::Cjs => SourceType::cjs(),
            Self::Jsx => SourceType::jsx(),
        }
    }
}

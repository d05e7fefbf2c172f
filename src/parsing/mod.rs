//! Grammar dispatch and the generic tree walk.

pub mod lua;
pub mod markup;
pub mod script;
pub mod walker;
pub mod weights;

pub use lua::LuaAdapter;
pub use markup::MarkupAdapter;
pub use script::ScriptAdapter;
pub use walker::{KindResolver, Resolved, TreeWalker};
pub use weights::{KindSpec, WeightTable};

/// Content languages the engine analyzes, keyed by the host's declared
/// language identifier. Unsupported identifiers are rejected before any
/// parse attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
    Vue,
    Html,
    Lua,
}

impl Language {
    /// Map the host's content-language identifier (VS Code style ids).
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "typescript" => Some(Self::TypeScript),
            "typescriptreact" => Some(Self::Tsx),
            "javascript" => Some(Self::JavaScript),
            "javascriptreact" => Some(Self::Jsx),
            "vue" => Some(Self::Vue),
            "html" => Some(Self::Html),
            "lua" => Some(Self::Lua),
            _ => None,
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "jsx" => Some(Self::Jsx),
            "vue" => Some(Self::Vue),
            "html" | "htm" => Some(Self::Html),
            "lua" => Some(Self::Lua),
            _ => None,
        }
    }

    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "typescriptreact",
            Self::JavaScript => "javascript",
            Self::Jsx => "javascriptreact",
            Self::Vue => "vue",
            Self::Html => "html",
            Self::Lua => "lua",
        }
    }

    /// Markup-wrapped languages go through the lexical-surgery adapter.
    pub fn is_markup(&self) -> bool {
        matches!(self, Self::Vue | Self::Html)
    }
}

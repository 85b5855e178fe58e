use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::components::Renderer;
use crate::services::PageStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub renderer: Arc<dyn Renderer>,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: PageStore, renderer: impl Renderer + 'static, static_dir: PathBuf) -> Self {
        Self {
            store: Arc::new(store),
            renderer: Arc::new(renderer),
            static_dir: Arc::new(static_dir),
        }
    }
}

/// A page title, guaranteed to match `[A-Za-z0-9]+`.
///
/// Titles are only ever built through [`Title::parse`], so anything holding a
/// `Title` can use it as a file stem without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    /// The title served at `/`.
    pub const FRONT_PAGE: &'static str = "FrontPage";

    /// Validate a raw title. Returns `None` for empty input or any byte
    /// outside ASCII letters and digits.
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn front_page() -> Self {
        Self(Self::FRONT_PAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operation kind encoded in the first path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    View,
    Edit,
    Save,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Save => "save",
        }
    }

    /// Client-facing path of this operation for `title`
    pub fn path_for(self, title: &Title) -> String {
        format!("/{}/{}", self.as_str(), title)
    }
}

/// A titled page body. The body is kept as raw bytes exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self { title, body: body.into() }
    }

    /// Transient page used to render a blank edit form. Never persisted
    /// unless explicitly saved.
    pub fn empty(title: Title) -> Self {
        Self { title, body: Vec::new() }
    }
}

/// Template a page is rendered through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    View,
    Edit,
}

impl View {
    pub fn template_name(self) -> &'static str {
        match self {
            View::View => "view",
            View::Edit => "edit",
        }
    }
}

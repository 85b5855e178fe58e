use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::errors::WikiError;
use crate::types::{Operation, Title};

static PAGE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(view|edit|save)/([A-Za-z0-9]+)$").expect("page path pattern is valid")
});

static STATIC_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/static/([A-Za-z0-9]+)\.(css|js|jpg|png)$").expect("static path pattern is valid")
});

/// Percent-decode a request path. Paths that do not decode to UTF-8 are
/// rejected outright.
pub fn decode_path(raw: &str) -> Result<String, WikiError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|path| path.into_owned())
        .map_err(|_| {
            log::debug!("Rejected undecodable path: '{}'", raw);
            WikiError::InvalidPath
        })
}

/// Split a request path into its operation and page title.
///
/// The whole path must match; there is no partial extraction and no default
/// title. Since titles are alphanumeric only, a successful parse can never
/// name a file outside the data directory.
pub fn parse_page_path(path: &str) -> Result<(Operation, Title), WikiError> {
    let caps = PAGE_PATH.captures(path).ok_or_else(|| {
        log::debug!("Rejected page path: '{}'", path);
        WikiError::InvalidPath
    })?;
    let operation = match &caps[1] {
        "view" => Operation::View,
        "edit" => Operation::Edit,
        _ => Operation::Save,
    };
    let title = Title::parse(&caps[2]).ok_or(WikiError::InvalidPath)?;
    log::debug!("Path matched: {} {}", operation.as_str(), title);
    Ok((operation, title))
}

/// Static asset referenced by `/static/{name}.{ext}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAsset {
    pub name: String,
    pub extension: String,
}

impl StaticAsset {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }
}

pub fn parse_static_path(path: &str) -> Result<StaticAsset, WikiError> {
    let caps = STATIC_PATH.captures(path).ok_or_else(|| {
        log::debug!("Rejected static path: '{}'", path);
        WikiError::InvalidPath
    })?;
    Ok(StaticAsset { name: caps[1].to_string(), extension: caps[2].to_string() })
}

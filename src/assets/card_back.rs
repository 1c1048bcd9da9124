use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use tracing::{info, warn};

use crate::deck::png;

#[derive(Debug)]
pub enum EmbedError {
    SourceNotFound(PathBuf),
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    InvalidExportName(String),
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedError::SourceNotFound(path) => write!(f, "{} not found", path.display()),
            EmbedError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            EmbedError::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            EmbedError::InvalidExportName(name) => {
                write!(f, "'{}' is not a valid TypeScript identifier", name)
            }
        }
    }
}

impl std::error::Error for EmbedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmbedError::Read { source, .. } | EmbedError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSummary {
    pub output: PathBuf,
    pub mime: &'static str,
    pub source_bytes: usize,
    pub encoded_len: usize,
}

/// MIME type from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(bytes))
}

/// Single-line TypeScript module exporting the data URI.
pub fn render_module(export_name: &str, uri: &str) -> String {
    format!("export const {} = \"{}\";\n", export_name, uri)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Encode `source` as a data URI and write it to `output` as a TypeScript
/// constant named `export_name`. The image is embedded as-is.
pub fn embed_card_back(
    source: &Path,
    output: &Path,
    export_name: &str,
) -> Result<EmbedSummary, EmbedError> {
    if !is_identifier(export_name) {
        return Err(EmbedError::InvalidExportName(export_name.to_string()));
    }

    let bytes = fs::read(source).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            EmbedError::SourceNotFound(source.to_path_buf())
        } else {
            EmbedError::Read {
                path: source.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mime = mime_for(source);
    if mime == "image/png" {
        match png::inspect(&bytes) {
            Ok(info) => info!(
                "Card back {} is {}x{}",
                source.display(),
                info.width,
                info.height
            ),
            Err(e) => warn!("{} does not look like a valid PNG: {}", source.display(), e),
        }
    }

    let uri = data_uri(mime, &bytes);
    let module = render_module(export_name, &uri);

    let write_err = |source: io::Error| EmbedError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(dir) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    fs::write(output, module).map_err(write_err)?;

    info!("Success: {} created", output.display());

    Ok(EmbedSummary {
        output: output.to_path_buf(),
        mime,
        source_bytes: bytes.len(),
        encoded_len: uri.len(),
    })
}

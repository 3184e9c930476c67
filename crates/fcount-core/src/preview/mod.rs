//! Text preview generation.
//!
//! A preview is a short, one-line excerpt of a file's content. Which
//! files qualify is decided either by a built-in extension allow-list or
//! by classifying the content with the external "file" utility (see
//! [`probe`]). Decoding tries UTF-8 first and the locale-preferred
//! encoding second; everything else becomes a [`PreviewResult::Error`].

pub mod probe;

use std::io::Read;
use std::path::Path;
use std::process::Command;

use encoding_rs::Encoding;

use crate::ext;

/// Default preview budget in characters.
pub const DEFAULT_PREVIEW_CHARS: usize = 390;

/// Extensions whose contents are excerpted without content sniffing.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "cfg", "conf", "css", "csv", "html", "ini", "js", "json", "log", "md", "py", "rs", "rst",
    "sh", "toml", "txt", "xml", "yaml", "yml",
];

/// Returns `true` if the token is on the text allow-list.
pub fn is_text_extension(token: &str) -> bool {
    TEXT_EXTENSIONS.contains(&token.to_lowercase().as_str())
}

/// Outcome of a preview attempt. Never an error channel: every failure
/// mode is a value the display layer can render next to the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewResult {
    /// One-line excerpt of a text file.
    Text(String),
    /// The file exists but holds no content.
    Empty,
    /// No preview procedure for this file type; carries the extension
    /// token or the utility's classification string.
    Unsupported(String),
    /// The file could not be read or decoded.
    Error(String),
}

/// How file types are decided before excerpting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStrategy {
    /// Trust the extension token against [`TEXT_EXTENSIONS`].
    ExtensionList,
    /// Classify content with the external "file" utility.
    FileUtility,
}

/// Generates previews under one strategy and character budget.
#[derive(Debug, Clone)]
pub struct Previewer {
    strategy: PreviewStrategy,
    max_chars: usize,
}

impl Previewer {
    /// Creates a previewer with the given strategy and budget.
    pub fn new(strategy: PreviewStrategy, max_chars: usize) -> Self {
        Self {
            strategy,
            max_chars,
        }
    }

    /// The character budget per excerpt.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// The strategy this previewer decides file types with.
    pub fn strategy(&self) -> PreviewStrategy {
        self.strategy
    }

    /// Produces a preview for `path`. Never fails — every problem maps
    /// to a [`PreviewResult`] variant.
    pub fn preview(&self, path: &Path) -> PreviewResult {
        match self.strategy {
            PreviewStrategy::ExtensionList => self.preview_by_extension(path),
            PreviewStrategy::FileUtility => self.preview_with_utility(path),
        }
    }

    fn preview_by_extension(&self, path: &Path) -> PreviewResult {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let token = ext::normalize(&name, false);
        if !is_text_extension(&token) {
            return PreviewResult::Unsupported(token);
        }
        self.excerpt(path)
    }

    fn preview_with_utility(&self, path: &Path) -> PreviewResult {
        let output = match Command::new("file").arg(path).output() {
            Ok(out) => out,
            Err(err) => return PreviewResult::Error(format!("could not run \"file\": {err}")),
        };
        if !output.status.success() {
            return PreviewResult::Error(format!("\"file\" exited with {}", output.status));
        }

        // Output shape: "<path>: <classification>\n"
        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = stdout
            .splitn(2, ": ")
            .nth(1)
            .unwrap_or("")
            .trim_end()
            .to_string();

        if message.contains("cannot open") {
            PreviewResult::Error(message)
        } else if message.contains("empty") {
            PreviewResult::Empty
        } else if message.contains("text") {
            self.excerpt(path)
        } else {
            PreviewResult::Unsupported(message)
        }
    }

    fn excerpt(&self, path: &Path) -> PreviewResult {
        match read_excerpt(path, self.max_chars, locale_fallback()) {
            Ok(text) if text.is_empty() => PreviewResult::Empty,
            Ok(text) => PreviewResult::Text(text),
            Err(message) => PreviewResult::Error(message),
        }
    }
}

/// Reads up to `max_chars` characters from the start of the file,
/// collapsing newlines to spaces so the excerpt renders on one line.
///
/// Decoding is UTF-8 first; on an invalid sequence the `fallback`
/// encoding gets one retry (skipped when it is UTF-8 itself).
fn read_excerpt(
    path: &Path,
    max_chars: usize,
    fallback: Option<&'static Encoding>,
) -> Result<String, String> {
    // Worst case four bytes per character.
    let budget = max_chars.saturating_mul(4);
    let mut bytes = Vec::with_capacity(budget.min(64 * 1024));
    std::fs::File::open(path)
        .and_then(|f| f.take(budget as u64).read_to_end(&mut bytes))
        .map_err(|e| e.to_string())?;

    let text = match std::str::from_utf8(&bytes) {
        Ok(text) => text.to_string(),
        Err(utf8_err) if utf8_err.error_len().is_none() => {
            // The read stopped mid-character; the prefix is valid UTF-8.
            String::from_utf8_lossy(&bytes[..utf8_err.valid_up_to()]).into_owned()
        }
        Err(utf8_err) => match fallback {
            Some(enc) if enc != encoding_rs::UTF_8 => {
                let (decoded, _, had_errors) = enc.decode(&bytes);
                if had_errors {
                    return Err(format!("cannot decode as UTF-8 or {}", enc.name()));
                }
                decoded.into_owned()
            }
            _ => {
                return Err(format!(
                    "invalid UTF-8 at byte {}",
                    utf8_err.valid_up_to()
                ))
            }
        },
    };

    Ok(text
        .chars()
        .take(max_chars)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect())
}

/// The locale-preferred encoding from `LC_ALL` / `LC_CTYPE` / `LANG`.
fn locale_fallback() -> Option<&'static Encoding> {
    let raw = ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))?;
    let codeset = raw.split('.').nth(1)?.split('@').next()?;
    Encoding::for_label(codeset.as_bytes())
}

//! Frame-number tokens in output paths.
//!
//! A write node's output path carries its frame number as a printf token
//! (`%04d`), a hash run (`####`), or an already-evaluated number
//! (`name.1001.exr`). Only the file-name component is inspected.

use std::sync::LazyLock;

use regex::Regex;

/// Printf-style frame token: `%d`, `%4d`, `%04d`.
static PRINTF_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%0?\d*d").expect("static regex"));

/// Hash-run frame token: `#`, `####`.
static HASH_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#+").expect("static regex"));

/// Dotted trailing frame number: `shot010_comp.1042.exr`.
static FRAME_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<prefix>.*\.)(?P<frame>\d+)(?P<extension>\.\w+(?:\.(?:sc|gz))?)$")
        .expect("static regex")
});

/// Output path split around its frame token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameTokenSplit<'a> {
    /// Everything before the token, directory included.
    pub head: &'a str,
    /// Everything after the token.
    pub tail: &'a str,
}

fn basename_start(path: &str) -> usize {
    path.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0)
}

/// Locate the frame token in the file-name component of `path`.
pub fn split_frame_token(path: &str) -> Option<FrameTokenSplit<'_>> {
    let offset = basename_start(path);
    let basename = &path[offset..];

    let span = PRINTF_TOKEN
        .find(basename)
        .or_else(|| HASH_TOKEN.find(basename))
        .map(|m| (m.start(), m.end()))
        .or_else(|| {
            FRAME_NUMBER
                .captures(basename)
                .and_then(|c| c.name("frame"))
                .map(|m| (m.start(), m.end()))
        })?;

    Some(FrameTokenSplit {
        head: &path[..offset + span.0],
        tail: &path[offset + span.1..],
    })
}

/// Replace the frame token of `path` with `token`; paths without one are returned as-is.
pub fn replace_frame_token(path: &str, token: &str) -> String {
    match split_frame_token(path) {
        Some(split) => format!("{}{token}{}", split.head, split.tail),
        None => path.to_string(),
    }
}

/// Glob pattern matching every frame of `path`.
///
/// Literal text around the token is escaped so brackets or asterisks in
/// directory names cannot widen the match.
pub fn frame_glob_pattern(path: &str) -> String {
    match split_frame_token(path) {
        Some(split) => format!(
            "{}*{}",
            glob::Pattern::escape(split.head),
            glob::Pattern::escape(split.tail)
        ),
        None => glob::Pattern::escape(path),
    }
}

/// Parse the dotted trailing frame number of a file name.
///
/// Numbers that do not fit an `i64` count as unparsable.
pub fn parse_trailing_frame(basename: &str) -> Option<i64> {
    FRAME_NUMBER
        .captures(basename)
        .and_then(|c| c.name("frame"))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/token.rs"]
mod tests;

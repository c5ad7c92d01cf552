//! Download filename sanitization.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FILENAME: &str = "documento";
pub const MAX_FILENAME_CHARS: usize = 80;

fn allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ')
}

/// A filename stem safe for a `Content-Disposition` header.
///
/// Only ASCII letters, digits, `-`, `_` and space; at most 80 characters;
/// no leading or trailing space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilenameToken(String);

impl FilenameToken {
    /// Every disallowed character becomes `_`. If no allowed character
    /// other than space survives, the result is [`DEFAULT_FILENAME`], so
    /// `"!!/??"` falls back while a literal `"___"` is kept.
    pub fn sanitize(candidate: &str) -> Self {
        let (replaced, kept): (String, Vec<bool>) = candidate
            .chars()
            .map(|c| if allowed(c) { (c, c != ' ') } else { ('_', false) })
            .unzip();
        // Replaced text is ASCII, so byte and char offsets agree.
        let start = replaced.len() - replaced.trim_start_matches(' ').len();
        let trimmed = &replaced[start..];
        let capped = trimmed[..trimmed.len().min(MAX_FILENAME_CHARS)].trim_end_matches(' ');

        if !kept[start..start + capped.len()].contains(&true) {
            Self(DEFAULT_FILENAME.to_string())
        } else {
            Self(capped.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn with_extension(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for FilenameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorthand for [`FilenameToken::sanitize`].
pub fn sanitize(candidate: &str) -> FilenameToken {
    FilenameToken::sanitize(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disallowed_become_underscores() {
        assert_eq!(sanitize("meu/contrato:final!!").as_str(), "meu_contrato_final__");
        assert_eq!(sanitize("Contrato Ação").as_str(), "Contrato A__o");
    }

    #[test]
    fn test_falls_back_to_default() {
        assert_eq!(sanitize("").as_str(), DEFAULT_FILENAME);
        assert_eq!(sanitize("    ").as_str(), DEFAULT_FILENAME);
        assert_eq!(sanitize("!!/??").as_str(), DEFAULT_FILENAME);
        assert_eq!(sanitize("ção").as_str(), DEFAULT_FILENAME);
        assert_eq!(sanitize(" / ").as_str(), DEFAULT_FILENAME);
    }

    #[test]
    fn test_typed_underscores_are_kept() {
        assert_eq!(sanitize("___").as_str(), "___");
        assert_eq!(sanitize("_ _").as_str(), "_ _");
        assert_eq!(sanitize("!_!").as_str(), "___");
    }

    #[test]
    fn test_trims_spaces() {
        assert_eq!(sanitize("  parecer final  ").as_str(), "parecer final");
        assert_eq!(sanitize("\tparecer").as_str(), "_parecer");
    }

    #[test]
    fn test_caps_length_without_trailing_space() {
        let long = format!("{} {}", "a".repeat(79), "b".repeat(30));
        let token = sanitize(&long);
        assert_eq!(token.as_str(), "a".repeat(79));
        assert!(sanitize(&"x".repeat(500)).as_str().len() == MAX_FILENAME_CHARS);
    }

    #[test]
    fn test_idempotent() {
        for candidate in [
            "meu/contrato:final!!",
            "  espaços  e acentos é ",
            "ok-name_1",
            "",
            "___",
            "!_!",
            "%%%///",
            "z ".repeat(60).as_str(),
        ] {
            let once = sanitize(candidate);
            assert_eq!(sanitize(once.as_str()), once, "candidate {candidate:?}");
        }
    }

    #[test]
    fn test_with_extension() {
        assert_eq!(sanitize("Contrato").with_extension("docx"), "Contrato.docx");
    }
}

// src/condition/matcher.rs

//! Job name matching.
//!
//! A pattern wrapped in slashes (`/build-\d+/`) is a case-insensitive regex
//! that may match anywhere in the name. Anything else is a literal prefix
//! that must be followed by the end of the name or a separator, so `test`
//! matches `test`, `test-ubuntu` and `test (node-16)` but not `testing`.

use regex::{Regex, RegexBuilder};

/// Characters allowed directly after a literal prefix.
const PREFIX_SEPARATORS: &str = r"[ \-_(]";

/// A compiled job name pattern.
#[derive(Debug, Clone)]
pub enum MatchPattern {
    /// User-supplied regex from a `/.../` pattern, unanchored.
    Regex(Regex),
    /// Escaped literal prefix, anchored at the start.
    Prefix(Regex),
}

impl MatchPattern {
    /// Classify and compile `pattern`.
    ///
    /// Only the regex form can fail; a literal prefix is always escaped.
    pub fn parse(pattern: &str) -> Result<Self, regex::Error> {
        match regex_body(pattern) {
            Some(body) => {
                let re = RegexBuilder::new(body).case_insensitive(true).build()?;
                Ok(MatchPattern::Regex(re))
            }
            None => {
                let anchored = format!(r"^{}(?:$|{})", regex::escape(pattern), PREFIX_SEPARATORS);
                let re = RegexBuilder::new(&anchored).case_insensitive(true).build()?;
                Ok(MatchPattern::Prefix(re))
            }
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        match self {
            MatchPattern::Regex(re) | MatchPattern::Prefix(re) => re.is_match(name),
        }
    }
}

/// Interior of a `/.../` pattern, if `pattern` is one.
fn regex_body(pattern: &str) -> Option<&str> {
    if pattern.len() >= 2 {
        pattern.strip_prefix('/')?.strip_suffix('/')
    } else {
        None
    }
}

/// Return the candidates matching `pattern`, in their original order.
pub fn match_names<'a, I>(pattern: &str, candidates: I) -> Result<Vec<&'a str>, regex::Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let compiled = MatchPattern::parse(pattern)?;
    Ok(candidates
        .into_iter()
        .filter(|name| compiled.is_match(name))
        .collect())
}

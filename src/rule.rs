use regex::{Captures, Regex, RegexBuilder};
use std::borrow::Cow;
use std::fmt;

/// A single textual fix: every match of `pattern` is replaced by `replacement`.
///
/// Patterns are compiled in multi-line mode, so `^` and `$` anchor at line
/// boundaries. The replacement is a `regex` template: `$1`, `${name}` and `$0`
/// expand to capture groups, `$$` is a literal dollar sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

impl FixRule {
    pub const fn new(pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
        }
    }

    /// Compile the pattern with the matching flags every rule uses.
    pub fn compile(&self) -> Result<CompiledRule, regex::Error> {
        let regex = RegexBuilder::new(self.pattern).multi_line(true).build()?;
        Ok(CompiledRule {
            regex,
            replacement: self.replacement,
        })
    }
}

impl fmt::Display for FixRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/ => {:?}", self.pattern, self.replacement)
    }
}

/// A [`FixRule`] with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    regex: Regex,
    replacement: &'static str,
}

impl CompiledRule {
    /// Replace every non-overlapping match in `text`.
    ///
    /// A match site where the text already starts with a longer expanded
    /// replacement is left alone, so insertion-style rules (whose replacement
    /// repeats the matched text) do not stack on a second run.
    pub fn replace_all<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.regex.replace_all(text, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let start = caps.get(0).map_or(0, |m| m.start());
            let mut expanded = String::new();
            caps.expand(self.replacement, &mut expanded);

            if expanded.len() > whole.len() && text[start..].starts_with(&expanded) {
                whole.to_string()
            } else {
                expanded
            }
        })
    }
}

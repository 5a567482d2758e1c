//! Structured external command lines.
//!
//! A [`CommandLine`] keeps its arguments unquoted. Quoting only happens in
//! [`CommandLine::render`], which produces the shell-invocable string shown to
//! the operator; execution hands the raw argv to the process runner.

use std::fmt;

/// One argument of a [`CommandLine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A flag or fixed word, rendered bare.
    Word(String),
    /// A filesystem path, rendered in double quotes.
    Path(String),
}

impl Arg {
    pub fn as_str(&self) -> &str {
        match self {
            Arg::Word(s) | Arg::Path(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<Arg>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn word(mut self, word: impl Into<String>) -> Self {
        self.args.push(Arg::Word(word.into()));
        self
    }

    /// Append `word` only when `enabled`.
    pub fn word_if(self, enabled: bool, word: impl Into<String>) -> Self {
        if enabled {
            self.word(word)
        } else {
            self
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.args.push(Arg::Path(path.into()));
        self
    }

    /// Arguments as passed to the program, without any quoting.
    pub fn argv(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(Arg::as_str)
    }

    /// Shell-invocable rendering: paths in double quotes, words bare.
    pub fn render(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            match arg {
                Arg::Word(w) => out.push_str(w),
                Arg::Path(p) => out.push_str(&double_quote(p)),
            }
        }
        out
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Wrap `s` in double quotes, escaping the characters a shell still
/// interprets inside them.
fn double_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_quotes_paths_only() {
        let cmd = CommandLine::new("rsync")
            .word("--archive")
            .path("my photos/")
            .path("cache/");
        assert_eq!(cmd.render(), r#"rsync --archive "my photos/" "cache/""#);
        assert_eq!(cmd.to_string(), cmd.render());
    }

    #[test]
    fn argv_is_unquoted() {
        let cmd = CommandLine::new("rsync").word("-v").path("a b/");
        assert_eq!(cmd.argv().collect::<Vec<_>>(), vec!["-v", "a b/"]);
    }

    #[test]
    fn word_if_skips_disabled_flags() {
        let cmd = CommandLine::new("rsync")
            .word_if(false, "--dry-run")
            .word_if(true, "--checksum");
        assert_eq!(cmd.render(), "rsync --checksum");
    }

    #[test]
    fn shell_metacharacters_are_escaped_inside_quotes() {
        let cmd = CommandLine::new("rsync").path(r#"a "b" $HOME `x` \"#);
        assert_eq!(cmd.render(), r#"rsync "a \"b\" \$HOME \`x\` \\""#);
    }
}

//! Hand-off of translated patterns to `fancy-regex`.

use super::{Error, Result, TargetDialect, Translation};

#[derive(Debug, Clone)]
pub struct NativeRegex {
    backend: fancy_regex::Regex,
}

impl NativeRegex {
    /// Compiles a translation, anchoring schema patterns to the whole input.
    pub fn compile(translation: &Translation) -> Result<Self> {
        if translation.target() != TargetDialect::RustRegex {
            return Err(Error::Native(format!(
                "{:?} output cannot be compiled by fancy-regex",
                translation.target()
            )));
        }
        NativeRegexBuilder::new(translation.pattern())
            .multi_line(translation.multi_line())
            .anchored(translation.variant().is_implicitly_anchored())
            .build()
    }

    pub fn as_str(&self) -> &str {
        self.backend.as_str()
    }

    pub fn is_match(&self, input: &str) -> Result<bool> {
        Ok(self.backend.is_match(input)?)
    }

    pub fn captures(&self, input: &str) -> Result<Option<Captures>> {
        let captures = self.backend.captures(input)?;
        Ok(captures.as_ref().map(Captures::from_backend))
    }

    pub fn find(&self, input: &str) -> Result<Option<Match>> {
        let matched = self.backend.find(input)?;
        Ok(matched.map(Match::from_backend))
    }

    pub fn find_all(&self, input: &str) -> Result<Vec<Match>> {
        let mut out = Vec::new();
        for matched in self.backend.find_iter(input) {
            out.push(Match::from_backend(matched?));
        }
        Ok(out)
    }
}

#[derive(Debug, Clone)]
pub struct NativeRegexBuilder {
    pattern: String,
    multi_line: bool,
    anchored: bool,
}

impl NativeRegexBuilder {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            multi_line: false,
            anchored: false,
        }
    }

    pub fn multi_line(&mut self, enabled: bool) -> &mut Self {
        self.multi_line = enabled;
        self
    }

    /// Require the pattern to span the whole input.
    pub fn anchored(&mut self, enabled: bool) -> &mut Self {
        self.anchored = enabled;
        self
    }

    pub fn build(&self) -> Result<NativeRegex> {
        let pattern = if self.anchored {
            format!(r"\A(?:{})\z", self.pattern)
        } else {
            self.pattern.clone()
        };
        let mut builder = fancy_regex::RegexBuilder::new(&pattern);
        builder.multi_line(self.multi_line);
        let backend = builder.build()?;
        Ok(NativeRegex { backend })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures {
    groups: Vec<Option<Match>>,
}

impl Captures {
    fn from_backend(captures: &fancy_regex::Captures<'_>) -> Self {
        let groups = (0..captures.len())
            .map(|idx| captures.get(idx).map(Match::from_backend))
            .collect();
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Match> {
        self.groups.get(index).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    start: usize,
    end: usize,
    text: String,
}

impl Match {
    fn from_backend(matched: fancy_regex::Match<'_>) -> Self {
        Self {
            start: matched.start(),
            end: matched.end(),
            text: matched.as_str().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

impl From<fancy_regex::Error> for Error {
    fn from(value: fancy_regex::Error) -> Self {
        Self::Native(value.to_string())
    }
}

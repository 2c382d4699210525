use super::{Error, Result};

/// The source rule set an expression is written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GrammarVariant {
    #[default]
    Xsd10,
    Xsd11,
    XPath20,
    XPath30,
}

impl GrammarVariant {
    pub fn is_xpath(self) -> bool {
        matches!(self, Self::XPath20 | Self::XPath30)
    }

    pub fn is_xpath30(self) -> bool {
        self == Self::XPath30
    }

    /// `*?`, `+?`, `??` and `{n,m}?` are accepted and copied through.
    pub fn allows_lazy_quantifiers(self) -> bool {
        self.is_xpath()
    }

    /// Unrecognised `\p{IsX}` block names produce a warning instead of an
    /// error, and block names match loosely.
    pub fn tolerates_unknown_blocks(self) -> bool {
        matches!(self, Self::Xsd11 | Self::XPath30)
    }

    /// Schema patterns always match the whole input.
    pub fn is_implicitly_anchored(self) -> bool {
        !self.is_xpath()
    }
}

/// Options read once at session creation and never changed during it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub(crate) variant: GrammarVariant,
    pub(crate) fold_whitespace: bool,
    pub(crate) case_blind: bool,
    pub(crate) expand_complement_block_names: bool,
    pub(crate) dot_all: bool,
    pub(crate) multi_line: bool,
    pub(crate) literal: bool,
    pub(crate) max_depth: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::new(GrammarVariant::default())
    }
}

impl TranslatorConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn new(variant: GrammarVariant) -> Self {
        Self {
            variant,
            fold_whitespace: false,
            case_blind: false,
            expand_complement_block_names: false,
            dot_all: false,
            multi_line: false,
            literal: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Builds a configuration from an XPath flags argument such as `"smix"`.
    pub fn from_flags(variant: GrammarVariant, flags: &str) -> Result<Self> {
        let mut config = Self::new(variant);
        for flag in flags.chars() {
            match flag {
                's' => config.dot_all = true,
                'm' => config.multi_line = true,
                'i' => config.case_blind = true,
                'x' => config.fold_whitespace = true,
                'q' if variant.is_xpath30() => config.literal = true,
                other => {
                    return Err(Error::InvalidFlags(format!(
                        "invalid flag '{other}' in \"{flags}\""
                    )));
                }
            }
        }
        Ok(config)
    }

    pub fn variant(&self) -> GrammarVariant {
        self.variant
    }

    pub fn fold_whitespace(&self) -> bool {
        self.fold_whitespace
    }

    pub fn case_blind(&self) -> bool {
        self.case_blind
    }

    pub fn expand_complement_block_names(&self) -> bool {
        self.expand_complement_block_names
    }

    pub fn dot_all(&self) -> bool {
        self.dot_all
    }

    pub fn multi_line(&self) -> bool {
        self.multi_line
    }

    pub fn literal(&self) -> bool {
        self.literal
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_variant(&mut self, variant: GrammarVariant) -> &mut Self {
        self.variant = variant;
        self
    }

    pub fn set_fold_whitespace(&mut self, enabled: bool) -> &mut Self {
        self.fold_whitespace = enabled;
        self
    }

    pub fn set_case_blind(&mut self, enabled: bool) -> &mut Self {
        self.case_blind = enabled;
        self
    }

    pub fn set_expand_complement_block_names(&mut self, enabled: bool) -> &mut Self {
        self.expand_complement_block_names = enabled;
        self
    }

    pub fn set_dot_all(&mut self, enabled: bool) -> &mut Self {
        self.dot_all = enabled;
        self
    }

    pub fn set_multi_line(&mut self, enabled: bool) -> &mut Self {
        self.multi_line = enabled;
        self
    }

    pub fn set_literal(&mut self, enabled: bool) -> &mut Self {
        self.literal = enabled;
        self
    }

    pub fn set_max_depth(&mut self, depth: usize) -> &mut Self {
        self.max_depth = depth;
        self
    }
}

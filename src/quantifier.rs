use num_bigint::BigUint;
use num_traits::ToPrimitive;

use super::session::TranslationSession;
use super::Result;

/// Written in place of a bound that does not fit a signed 32-bit integer.
pub const MAX_BOUND: i32 = i32::MAX;

impl TranslationSession<'_> {
    pub fn translate_quantifier(&mut self) -> Result<()> {
        match self.cursor().cur_ascii() {
            Some(b'*' | b'?' | b'+') => self.copy_cur_char(),
            Some(b'{') => {
                self.copy_cur_char();
                self.translate_quantity()?;
                self.expect(b'}')?;
                self.copy_cur_char();
            }
            _ => return Ok(()),
        }
        if self.at(b'?') && self.config().variant().allows_lazy_quantifiers() {
            self.copy_cur_char();
        }
        Ok(())
    }

    /// Translates the bounds between `{` and `}`.
    pub fn translate_quantity(&mut self) -> Result<()> {
        let lower = self.parse_quant_exact()?;
        let lower_value = native_bound(&lower);
        self.push_bound(&lower, lower_value);
        if !self.at(b',') {
            return Ok(());
        }
        self.copy_cur_char();
        if self.at(b'}') {
            return Ok(());
        }
        let upper = self.parse_quant_exact()?;
        let upper_value = native_bound(&upper);
        self.push_bound(&upper, upper_value);
        let inverted = match (lower_value, upper_value) {
            (Some(lower_value), Some(upper_value)) => upper_value < lower_value,
            (None, Some(_)) => true,
            (Some(_), None) => false,
            (None, None) => decimal(&lower) > decimal(&upper),
        };
        if inverted {
            return Err(self.error("invalid range in quantifier"));
        }
        Ok(())
    }

    /// Collects ASCII digits up to the next `,` or `}`.
    pub fn parse_quant_exact(&mut self) -> Result<String> {
        let mut digits = String::new();
        loop {
            match self.cursor().cur_ascii() {
                Some(digit @ b'0'..=b'9') => digits.push(char::from(digit)),
                _ => return Err(self.error("expected digit in quantifier")),
            }
            self.advance();
            if self.at(b',') || self.at(b'}') {
                return Ok(digits);
            }
        }
    }

    fn push_bound(&mut self, digits: &str, value: Option<i32>) {
        if value.is_some() {
            self.push_str(digits);
        } else {
            log::trace!("quantifier bound {digits} clamped to {MAX_BOUND}");
            self.push_str(&MAX_BOUND.to_string());
        }
    }
}

fn decimal(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_default()
}

fn native_bound(digits: &str) -> Option<i32> {
    decimal(digits).to_i32()
}

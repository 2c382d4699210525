/// Unit reported by [`Cursor::cur`] once the input is exhausted.
///
/// Check [`Cursor::is_eos`] to tell it apart from a literal NUL in the input.
pub const EOS: u16 = 0;

/// Scanning state over the UTF-16 code units of one expression.
///
/// `pos` is the index of the next unit to read, so the current unit sits at
/// `pos - 1`. Once the input is exhausted `pos` is `len + 1`.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    units: &'a [u16],
    pos: usize,
    cur: u16,
    eos: bool,
    fold_whitespace: bool,
    in_char_class: bool,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor positioned before the first unit. Call
    /// [`Cursor::advance`] once to load it.
    pub fn new(units: &'a [u16], fold_whitespace: bool) -> Self {
        Self {
            units,
            pos: 0,
            cur: EOS,
            eos: false,
            fold_whitespace,
            in_char_class: false,
        }
    }

    pub fn units(&self) -> &'a [u16] {
        self.units
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn cur(&self) -> u16 {
        self.cur
    }

    pub fn is_eos(&self) -> bool {
        self.eos
    }

    /// True when the current unit is the ASCII character `ch`.
    pub fn at(&self, ch: u8) -> bool {
        !self.eos && self.cur == u16::from(ch)
    }

    /// The current unit as an ASCII byte, if it is one.
    pub fn cur_ascii(&self) -> Option<u8> {
        if self.eos {
            return None;
        }
        u8::try_from(self.cur).ok().filter(u8::is_ascii)
    }

    pub fn in_char_class(&self) -> bool {
        self.in_char_class
    }

    /// Whitespace folding is suspended while this is set.
    pub fn set_in_char_class(&mut self, value: bool) {
        self.in_char_class = value;
    }

    fn folding(&self) -> bool {
        self.fold_whitespace && !self.in_char_class
    }

    pub fn advance(&mut self) {
        if self.pos < self.units.len() {
            self.cur = self.units[self.pos];
            self.pos += 1;
            if self.folding() {
                while !self.eos && is_xml_whitespace(self.cur) {
                    self.advance();
                }
            }
        } else {
            self.pos = self.units.len() + 1;
            self.cur = EOS;
            self.eos = true;
        }
    }

    /// Steps back over the unit last consumed by [`Cursor::advance`].
    ///
    /// The caller must have advanced past at least one unit beyond the first.
    pub fn recede(&mut self) {
        debug_assert!(self.eos || self.pos >= 2, "recede past start of input");
        if self.eos {
            self.pos = self.units.len();
            self.cur = self.units[self.pos - 1];
            self.eos = false;
        } else {
            self.pos -= 1;
            self.cur = self.units[self.pos - 1];
        }
        if self.folding() {
            while is_xml_whitespace(self.cur) {
                self.recede();
            }
        }
    }

    /// The raw unit after the current one, ignoring whitespace folding.
    pub fn peek(&self) -> Option<u16> {
        if self.eos {
            return None;
        }
        self.units.get(self.pos).copied()
    }
}

pub(crate) fn is_xml_whitespace(unit: u16) -> bool {
    matches!(unit, 0x20 | 0x09 | 0x0A | 0x0D)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn advance_walks_to_sentinel() {
        let units = utf16("ab");
        let mut cursor = Cursor::new(&units, false);
        cursor.advance();
        assert!(cursor.at(b'a'));
        assert_eq!(cursor.pos(), 1);
        cursor.advance();
        assert!(cursor.at(b'b'));
        cursor.advance();
        assert!(cursor.is_eos());
        assert_eq!(cursor.cur(), EOS);
        assert_eq!(cursor.pos(), 3);
        cursor.advance();
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn folding_skips_whitespace_outside_classes_only() {
        let units = utf16("a \t\nb [ c]");
        let mut cursor = Cursor::new(&units, true);
        cursor.advance();
        cursor.advance();
        assert!(cursor.at(b'b'));
        cursor.advance();
        assert!(cursor.at(b'['));
        cursor.set_in_char_class(true);
        cursor.advance();
        assert!(cursor.at(b' '));
    }

    #[test]
    fn recede_inverts_advance_mid_expression() {
        let units = utf16("a  b c");
        let mut cursor = Cursor::new(&units, true);
        cursor.advance();
        cursor.advance();
        let before = (cursor.pos(), cursor.cur(), cursor.is_eos());
        cursor.advance();
        cursor.recede();
        assert_eq!((cursor.pos(), cursor.cur(), cursor.is_eos()), before);
    }

    #[test]
    fn recede_from_end_of_stream_restores_last_unit() {
        let units = utf16("xy");
        let mut cursor = Cursor::new(&units, false);
        for _ in 0..3 {
            cursor.advance();
        }
        assert!(cursor.is_eos());
        cursor.recede();
        assert!(!cursor.is_eos());
        assert!(cursor.at(b'y'));
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn recede_from_end_of_stream_skips_trailing_whitespace() {
        let units = utf16("ab \t\n");
        let mut cursor = Cursor::new(&units, true);
        cursor.advance();
        cursor.advance();
        let before = (cursor.pos(), cursor.cur(), cursor.is_eos());
        assert_eq!(before, (2, u16::from(b'b'), false));
        cursor.advance();
        assert!(cursor.is_eos());
        cursor.recede();
        assert_eq!((cursor.pos(), cursor.cur(), cursor.is_eos()), before);
    }

    #[test]
    fn peek_reads_raw_next_unit() {
        let units = utf16("-[");
        let mut cursor = Cursor::new(&units, false);
        cursor.advance();
        assert_eq!(cursor.peek(), Some(u16::from(b'[')));
        cursor.advance();
        assert_eq!(cursor.peek(), None);
    }
}

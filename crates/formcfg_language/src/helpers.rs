//! Parsing helpers shared by every domain grammar.
//!
//! These extend [`ConfigReader`] with the small value parsers that recur
//! across record types: quoted strings, form references, decimal numbers,
//! and biped slots.

use formcfg_foundation::{Result, is_hex_string, strip_hex_prefix};

use crate::reader::ConfigReader;

/// Lowest biped slot number.
pub const FIRST_BIPED_SLOT: u32 = 30;
/// Highest biped slot number.
pub const LAST_BIPED_SLOT: u32 = 61;

impl ConfigReader {
    /// Consumes the next token, which must be `expected`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error naming what was found instead.
    pub fn expect(&mut self, expected: &str) -> Result<()> {
        let token = self.get_token();
        if token == expected {
            Ok(())
        } else if token.is_empty() {
            Err(self.error(format!("expected '{expected}', found end of file")))
        } else {
            Err(self.error(format!("expected '{expected}', found '{token}'")))
        }
    }

    /// Consumes the next token if it is `expected`.
    pub fn accept(&mut self, expected: &str) -> bool {
        if self.peek() == expected {
            self.get_token();
            true
        } else {
            false
        }
    }

    /// Parses a quoted string and returns its contents without quotes.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the token is not a string literal or its
    /// closing quote is missing.
    pub fn parse_string(&mut self) -> Result<String> {
        match self.next_token() {
            Some(token) if token.is_terminated_string() => {
                Ok(token.text[1..token.text.len() - 1].to_string())
            }
            Some(token) if token.is_string_literal() => Err(self.error("missing trailing quote")),
            Some(token) => Err(self.error(format!(
                "expected a quoted string, found '{}'",
                token.text
            ))),
            None => Err(self.error("expected a quoted string, found end of file")),
        }
    }

    /// Parses `"Plugin.esp"|HexID` into `Plugin.esp|HexID`.
    ///
    /// A `0x`/`0X` prefix on the ID is accepted and dropped.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the plugin string, the `|`, or the hex ID is
    /// malformed.
    pub fn parse_form(&mut self) -> Result<String> {
        let plugin = self.parse_string()?;
        if plugin.is_empty() {
            return Err(self.error("empty plugin name"));
        }
        self.expect("|")?;
        let id = self.get_token();
        if !is_hex_string(&id) {
            return Err(self.error(format!("invalid form ID '{id}'")));
        }
        Ok(format!("{plugin}|{}", strip_hex_prefix(&id)))
    }

    /// Parses a decimal number: an integer part, then optionally `.` and a
    /// fractional part.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if either part is not a run of digits.
    pub fn parse_number(&mut self) -> Result<f64> {
        let integer = self.get_token();
        let digits = integer.strip_prefix('-').unwrap_or(&integer);
        if !is_decimal_digits(digits) {
            return Err(self.error(format!("invalid number '{integer}'")));
        }

        let mut text = integer.clone();
        if self.accept(".") {
            let fraction = self.get_token();
            if !is_decimal_digits(&fraction) {
                return Err(self.error(format!("invalid number '{integer}.{fraction}'")));
            }
            text.push('.');
            text.push_str(&fraction);
        }

        text.parse::<f64>()
            .map_err(|e| self.error(format!("invalid number '{text}': {e}")))
    }

    /// Parses a signed decimal integer.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the token is not an integer that fits `i64`.
    pub fn parse_integer(&mut self) -> Result<i64> {
        let token = self.get_token();
        token
            .parse::<i64>()
            .map_err(|_| self.error(format!("invalid integer '{token}'")))
    }

    /// Parses a biped slot number: `0` (no slot) or 30 through 61.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for any other value.
    pub fn parse_biped_slot(&mut self) -> Result<u32> {
        let token = self.get_token();
        match token.parse::<u32>() {
            Ok(0) => Ok(0),
            Ok(slot) if (FIRST_BIPED_SLOT..=LAST_BIPED_SLOT).contains(&slot) => Ok(slot),
            _ => Err(self.error(format!(
                "invalid biped slot '{token}', expected 0 or {FIRST_BIPED_SLOT}-{LAST_BIPED_SLOT}"
            ))),
        }
    }
}

/// Renders a normalized `Plugin|hex` reference back to `"Plugin"|hex`.
#[must_use]
pub fn format_form(reference: &str) -> String {
    match reference.rsplit_once('|') {
        Some((plugin, id)) => format!("\"{plugin}\"|{id}"),
        None => format!("\"{reference}\""),
    }
}

fn is_decimal_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the flag bit for a biped slot; slot `0` has none.
#[must_use]
pub const fn biped_slot_flag(slot: u32) -> u32 {
    if slot < FIRST_BIPED_SLOT || slot > LAST_BIPED_SLOT {
        0
    } else {
        1 << (slot - FIRST_BIPED_SLOT)
    }
}

/// Renders a biped slot flag set as `30 | 32`, or `0` when empty.
#[must_use]
pub fn get_biped_slots(flags: u32) -> String {
    let slots: Vec<String> = (FIRST_BIPED_SLOT..=LAST_BIPED_SLOT)
        .filter(|&slot| flags & biped_slot_flag(slot) != 0)
        .map(|slot| slot.to_string())
        .collect();
    if slots.is_empty() {
        "0".to_string()
    } else {
        slots.join(" | ")
    }
}

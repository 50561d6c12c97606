//! EAN-13 symbol encoding.
//!
//! A symbol is 95 modules: start guard, six left digits whose L/G parity
//! pattern carries the first digit, centre guard, six right digits, end guard.

use std::fmt;

use tracing::warn;

use crate::EngineError;

/// Number of digits in an EAN-13 value.
pub const DIGITS: usize = 13;

/// Number of modules in a complete symbol, guards included.
pub const MODULE_COUNT: usize = 95;

/// Module width of one encoded digit.
pub const DIGIT_MODULES: usize = 7;

const START_GUARD: [bool; 3] = [true, false, true];
const CENTRE_GUARD: [bool; 5] = [false, true, false, true, false];
const END_GUARD: [bool; 3] = [true, false, true];

/// Left-hand odd parity (L) codes, most significant bit first.
const L_CODES: [u8; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011, 0b0110001, 0b0101111, 0b0111011,
    0b0110111, 0b0001011,
];

/// Parity of digits 2..=7 selected by the first digit (`true` = G code).
const PARITY: [[bool; 6]; 10] = {
    const L: bool = false;
    const G: bool = true;
    [
        [L, L, L, L, L, L],
        [L, L, G, L, G, G],
        [L, L, G, G, L, G],
        [L, L, G, G, G, L],
        [L, G, L, L, G, G],
        [L, G, G, L, L, G],
        [L, G, G, G, L, L],
        [L, G, L, G, L, G],
        [L, G, L, G, G, L],
        [L, G, G, L, G, L],
    ]
};

/// Which code set a digit is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSet {
    L,
    G,
    R,
}

impl CodeSet {
    /// The 7-bit pattern for `digit` in this code set, most significant bit first.
    pub fn pattern(self, digit: u8) -> u8 {
        let l = L_CODES[digit as usize];
        let r = !l & 0x7f;
        match self {
            CodeSet::L => l,
            CodeSet::R => r,
            CodeSet::G => r.reverse_bits() >> 1,
        }
    }
}

/// A validated EAN-13 value with a correct check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ean13 {
    digits: [u8; DIGITS],
}

impl Ean13 {
    /// Parse a 13-digit value.
    ///
    /// The check digit is recomputed from the first twelve digits; a supplied
    /// check digit that disagrees is replaced.
    pub fn new(value: &str) -> Result<Self, EngineError> {
        if let Some(bad) = value.chars().find(|c| !c.is_ascii_digit()) {
            return Err(EngineError::InvalidCharacter(bad));
        }
        if value.len() != DIGITS {
            return Err(EngineError::InvalidLength(value.len()));
        }

        let mut digits = [0u8; DIGITS];
        for (slot, b) in digits.iter_mut().zip(value.bytes()) {
            *slot = b - b'0';
        }

        let check = check_digit(&digits[..DIGITS - 1]);
        if digits[DIGITS - 1] != check {
            warn!(
                value,
                supplied = digits[DIGITS - 1],
                computed = check,
                "EAN-13 check digit mismatch, using computed digit"
            );
            digits[DIGITS - 1] = check;
        }

        Ok(Self { digits })
    }

    pub fn digits(&self) -> &[u8; DIGITS] {
        &self.digits
    }

    /// Expand the value into its 95 modules (`true` = bar).
    pub fn modules(&self) -> Vec<bool> {
        let mut modules = Vec::with_capacity(MODULE_COUNT);
        modules.extend_from_slice(&START_GUARD);

        let parity = PARITY[self.digits[0] as usize];
        for (i, &digit) in self.digits[1..7].iter().enumerate() {
            let set = if parity[i] { CodeSet::G } else { CodeSet::L };
            push_pattern(&mut modules, set.pattern(digit));
        }

        modules.extend_from_slice(&CENTRE_GUARD);

        for &digit in &self.digits[7..] {
            push_pattern(&mut modules, CodeSet::R.pattern(digit));
        }

        modules.extend_from_slice(&END_GUARD);
        modules
    }
}

impl fmt::Display for Ean13 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.digits {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// GS1 mod-10 check digit over the first twelve digits.
///
/// Digits in odd positions (1-based, from the left) weigh 1, even positions weigh 3.
pub fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Whether module `index` belongs to one of the three guard patterns.
pub fn is_guard_module(index: usize) -> bool {
    index < 3 || (45..50).contains(&index) || index >= 92
}

fn push_pattern(modules: &mut Vec<bool>, pattern: u8) {
    for bit in (0..DIGIT_MODULES).rev() {
        modules.push((pattern >> bit) & 1 == 1);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Read the digits back out of a 95-module row.
    pub(crate) fn decode_modules(modules: &[bool]) -> Option<String> {
        if modules.len() != MODULE_COUNT {
            return None;
        }
        let chunk_value = |start: usize| -> u8 {
            modules[start..start + DIGIT_MODULES]
                .iter()
                .fold(0u8, |acc, &m| (acc << 1) | u8::from(m))
        };
        let find = |set: CodeSet, value: u8| (0..10u8).find(|&d| set.pattern(d) == value);

        let mut left = Vec::new();
        let mut parity = [false; 6];
        for i in 0..6 {
            let value = chunk_value(3 + i * DIGIT_MODULES);
            if let Some(d) = find(CodeSet::L, value) {
                left.push(d);
            } else {
                left.push(find(CodeSet::G, value)?);
                parity[i] = true;
            }
        }
        let first = PARITY.iter().position(|p| *p == parity)? as u8;

        let mut out = first.to_string();
        for d in left {
            out.push(char::from(b'0' + d));
        }
        for i in 0..6 {
            let d = find(CodeSet::R, chunk_value(50 + i * DIGIT_MODULES))?;
            out.push(char::from(b'0' + d));
        }
        Some(out)
    }

    #[test]
    fn check_digit_matches_known_codes() {
        assert_eq!(check_digit(&[5, 9, 0, 1, 2, 3, 4, 1, 2, 3, 4, 5]), 7);
        assert_eq!(check_digit(&[4, 0, 0, 6, 3, 8, 1, 3, 3, 3, 9, 3]), 1);
        assert_eq!(check_digit(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1]), 2);
    }

    #[test]
    fn g_codes_are_mirrored_r_codes() {
        assert_eq!(CodeSet::G.pattern(0), 0b0100111);
        assert_eq!(CodeSet::G.pattern(9), 0b0010111);
        assert_eq!(CodeSet::R.pattern(0), 0b1110010);
    }

    #[test]
    fn rejects_letters() {
        let err = Ean13::new("12345ABC90123").unwrap_err();
        assert!(matches!(err, EngineError::InvalidCharacter('A')));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            Ean13::new("12345").unwrap_err(),
            EngineError::InvalidLength(5)
        ));
        assert!(matches!(
            Ean13::new("12345678901234").unwrap_err(),
            EngineError::InvalidLength(14)
        ));
    }

    #[test]
    fn wrong_check_digit_is_replaced() {
        let code = Ean13::new("5901234123450").unwrap();
        assert_eq!(code.to_string(), "5901234123457");
    }

    #[test]
    fn modules_have_guards_and_decode_back() {
        let code = Ean13::new("5901234123457").unwrap();
        let modules = code.modules();
        assert_eq!(modules.len(), MODULE_COUNT);
        assert_eq!(&modules[..3], &START_GUARD);
        assert_eq!(&modules[45..50], &CENTRE_GUARD);
        assert_eq!(&modules[92..], &END_GUARD);
        assert_eq!(decode_modules(&modules).as_deref(), Some("5901234123457"));
    }

    #[test]
    fn leading_zero_uses_upc_parity() {
        let code = Ean13::new("0123456789012").unwrap();
        assert_eq!(
            decode_modules(&code.modules()).as_deref(),
            Some("0123456789012")
        );
    }

    #[test]
    fn guard_module_ranges() {
        assert!(is_guard_module(0));
        assert!(!is_guard_module(3));
        assert!(is_guard_module(47));
        assert!(!is_guard_module(50));
        assert!(is_guard_module(94));
    }
}

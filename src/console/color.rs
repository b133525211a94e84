//! Color tokens for terminal output.
//!
//! A [`Color`] is a small bundle of SGR attribute codes: one to four of
//! them, combined into a single escape sequence when written. The named
//! constants cover the reporting palette (severity colors) plus the plain
//! foreground/background table for callers that write to the stream
//! directly.

use std::io::{self, Write};

/// One to four combined SGR attribute codes.
///
/// The first code is always emitted (including `0`, the reset); trailing
/// zero slots are unused. Writing the token produces `ESC [ c1 ; c2 … m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    codes: [u8; 4],
}

impl Color {
    /// A token with a single attribute code.
    pub const fn single(code: u8) -> Self {
        Self {
            codes: [code, 0, 0, 0],
        }
    }

    /// A token combining two attribute codes, e.g. bold + foreground.
    pub const fn pair(first: u8, second: u8) -> Self {
        Self {
            codes: [first, second, 0, 0],
        }
    }

    /// A token combining up to four attribute codes; unused slots are 0.
    pub const fn combined(codes: [u8; 4]) -> Self {
        Self { codes }
    }

    /// The raw attribute codes, unused trailing slots zero.
    pub const fn codes(&self) -> [u8; 4] {
        self.codes
    }

    /// Write the escape sequence for this token to `out`.
    pub(crate) fn write_sgr(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "\x1b[{}", self.codes[0])?;
        for &code in &self.codes[1..] {
            if code == 0 {
                break;
            }
            write!(out, ";{code}")?;
        }
        write!(out, "m")
    }

    // Reporting palette.

    /// Errors and failures: red.
    pub const ERROR: Color = Color::single(31);
    /// Warnings: yellow.
    pub const WARNING: Color = Color::single(33);
    /// Notification markers: bright blue.
    pub const NOTIFY: Color = Color::pair(1, 34);
    /// Notification bodies and connective text: bright white.
    pub const NOTIFY2: Color = Color::pair(1, 37);
    /// Highlighted notification bodies: bright magenta.
    pub const NOTIFY_H: Color = Color::pair(1, 35);
    /// Action markers and titles: bright cyan.
    pub const ACTION: Color = Color::pair(1, 36);
    /// Successful outcomes: bright green.
    pub const PROPER: Color = Color::pair(1, 32);
    /// Plain messages: terminal default.
    pub const MESSAGE: Color = Color::single(0);
    /// Reset all attributes.
    pub const RESET: Color = Color::single(0);
    /// Reset to bright (bold) with default color.
    pub const RESET_BRIGHT: Color = Color::single(1);
    /// Bold/bright attribute alone.
    pub const BRIGHT: Color = Color::single(1);

    // Plain foreground colors.

    /// Foreground red.
    pub const RED: Color = Color::single(31);
    /// Foreground green.
    pub const GREEN: Color = Color::single(32);
    /// Foreground yellow.
    pub const YELLOW: Color = Color::single(33);
    /// Foreground blue.
    pub const BLUE: Color = Color::single(34);
    /// Foreground magenta.
    pub const MAGENTA: Color = Color::single(35);
    /// Foreground cyan.
    pub const CYAN: Color = Color::single(36);
    /// Foreground white.
    pub const WHITE: Color = Color::single(37);

    // Bright foreground colors.

    /// Bright foreground red.
    pub const RED_BRIGHT: Color = Color::pair(1, 31);
    /// Bright foreground green.
    pub const GREEN_BRIGHT: Color = Color::pair(1, 32);
    /// Bright foreground yellow.
    pub const YELLOW_BRIGHT: Color = Color::pair(1, 33);
    /// Bright foreground blue.
    pub const BLUE_BRIGHT: Color = Color::pair(1, 34);
    /// Bright foreground magenta.
    pub const MAGENTA_BRIGHT: Color = Color::pair(1, 35);
    /// Bright foreground cyan.
    pub const CYAN_BRIGHT: Color = Color::pair(1, 36);
    /// Bright foreground white.
    pub const WHITE_BRIGHT: Color = Color::pair(1, 37);

    // Background colors.

    /// Background red.
    pub const BG_RED: Color = Color::single(41);
    /// Background green.
    pub const BG_GREEN: Color = Color::single(42);
    /// Background yellow.
    pub const BG_YELLOW: Color = Color::single(43);
    /// Background blue.
    pub const BG_BLUE: Color = Color::single(44);
    /// Background magenta.
    pub const BG_MAGENTA: Color = Color::single(45);
    /// Background cyan.
    pub const BG_CYAN: Color = Color::single(46);
    /// Background white.
    pub const BG_WHITE: Color = Color::single(47);

    // Bright background colors.

    /// Bright background red.
    pub const BG_RED_BRIGHT: Color = Color::pair(1, 41);
    /// Bright background green.
    pub const BG_GREEN_BRIGHT: Color = Color::pair(1, 42);
    /// Bright background yellow.
    pub const BG_YELLOW_BRIGHT: Color = Color::pair(1, 43);
    /// Bright background blue.
    pub const BG_BLUE_BRIGHT: Color = Color::pair(1, 44);
    /// Bright background magenta.
    pub const BG_MAGENTA_BRIGHT: Color = Color::pair(1, 45);
    /// Bright background cyan.
    pub const BG_CYAN_BRIGHT: Color = Color::pair(1, 46);
    /// Bright background white.
    pub const BG_WHITE_BRIGHT: Color = Color::pair(1, 47);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(color: Color) -> String {
        let mut out = Vec::new();
        color.write_sgr(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn single_code_sequence() {
        assert_eq!(sequence(Color::ERROR), "\x1b[31m");
        assert_eq!(sequence(Color::RESET), "\x1b[0m");
    }

    #[test]
    fn combined_code_sequence() {
        assert_eq!(sequence(Color::NOTIFY), "\x1b[1;34m");
        assert_eq!(sequence(Color::combined([1, 4, 31, 0])), "\x1b[1;4;31m");
    }

    #[test]
    fn trailing_zeros_are_unused() {
        assert_eq!(Color::pair(1, 36).codes(), [1, 36, 0, 0]);
        assert_eq!(sequence(Color::pair(1, 36)), "\x1b[1;36m");
    }
}

//! Source locations for diagnostics.
//!
//! A [`Location`] names a file plus a 1-based line/column range. Producers
//! (parsers, lexers, build drivers) attach one to each reported message;
//! the reporting core treats it as an opaque value and only reads it back
//! when ordering buffered messages and when rendering.
//!
//! The *null* location (empty file name, zero lines) carries no positional
//! information and renders as nothing.
//!
//! # Rendering
//!
//! The human-readable form is produced by the `Display` impl:
//!
//! ```
//! use termreport::Location;
//!
//! let loc = Location::span("foo.c", 10, 1, 12, 3);
//! assert_eq!(loc.to_string(), "foo.c:10.1-12.2");
//! ```
//!
//! Note the displayed end column: the stored `last_column` is one past the
//! range (exclusive), so it is always *displayed* as the stored value minus
//! one.

use std::fmt;

/// A file name plus a 1-based line/column range.
///
/// Columns are half-open: `last_column` stores one past the final column,
/// and [`last_column`](Self::last_column) reports the stored value minus
/// one. Line numbers are inclusive on both ends. A default-constructed
/// location is the null location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    file_name: String,
    first_line: i32,
    first_column: i32,
    last_line: i32,
    last_column: i32,
}

impl Default for Location {
    fn default() -> Self {
        Self::null()
    }
}

impl Location {
    /// The null location: no file, no position.
    pub fn null() -> Self {
        Self {
            file_name: String::new(),
            first_line: 0,
            first_column: 1,
            last_line: 0,
            last_column: 1,
        }
    }

    /// A location naming a file but no position within it.
    pub fn file(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::null()
        }
    }

    /// A single-line location.
    pub fn line(file_name: impl Into<String>, line: i32) -> Self {
        Self {
            file_name: file_name.into(),
            first_line: line,
            first_column: 1,
            last_line: line,
            last_column: 1,
        }
    }

    /// A location spanning whole lines, without column information.
    pub fn lines(file_name: impl Into<String>, first_line: i32, last_line: i32) -> Self {
        Self {
            file_name: file_name.into(),
            first_line,
            first_column: 1,
            last_line,
            last_column: 1,
        }
    }

    /// A full span. `last_column` is exclusive (one past the range).
    pub fn span(
        file_name: impl Into<String>,
        first_line: i32,
        first_column: i32,
        last_line: i32,
        last_column: i32,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            first_line,
            first_column,
            last_line,
            last_column,
        }
    }

    /// The file name, empty for the null location.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Replace the file name.
    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.file_name = file_name.into();
    }

    /// First line of the range (1-based; 0 means "no position").
    pub fn first_line(&self) -> i32 {
        self.first_line
    }

    /// First column of the range (1-based).
    pub fn first_column(&self) -> i32 {
        self.first_column
    }

    /// Last line of the range (inclusive).
    pub fn last_line(&self) -> i32 {
        self.last_line
    }

    /// Last column as displayed: the stored exclusive bound minus one.
    pub fn last_column(&self) -> i32 {
        self.last_column - 1
    }

    /// Whether this is the null location.
    pub fn is_null(&self) -> bool {
        self.first_line == 0 && self.last_line == 0 && self.file_name.is_empty()
    }

    /// Reset to the null location.
    pub fn nullify(&mut self) {
        self.first_line = 0;
        self.last_line = 0;
        self.first_column = 1;
        self.last_column = 1;
        self.file_name.clear();
    }

    /// Reset the range to line 1, column 1, keeping the file name.
    pub fn reset(&mut self) {
        self.first_line = 1;
        self.first_column = 1;
        self.last_line = 1;
        self.last_column = 1;
    }

    /// Point the location at the given file and line, columns reset.
    pub fn set(&mut self, file_name: impl Into<String>, line: i32) {
        self.file_name = file_name.into();
        self.first_line = line;
        self.first_column = 1;
        self.last_line = line;
        self.last_column = 1;
    }

    /// Collapse onto the end position of `other`, adopting its file.
    pub fn set_to_last_of(&mut self, other: &Location) {
        self.first_line = other.last_line;
        self.last_line = other.last_line;
        self.first_column = other.last_column;
        self.last_column = other.last_column;
        self.file_name = other.file_name.clone();
    }

    // Lexer-cursor movement: the range grows at its end; `step` closes the
    // range back down to a point so the next token starts fresh.

    /// Move the start of the range up to the current end.
    pub fn step(&mut self) {
        self.first_column = self.last_column;
        self.first_line = self.last_line;
    }

    /// Extend the end of the range by `n` characters on the current line.
    pub fn advance_characters(&mut self, n: i32) {
        self.last_column += n;
    }

    /// Extend the end of the range by `n` lines, returning to column 1.
    pub fn advance_lines(&mut self, n: i32) {
        self.last_column = 1;
        self.last_line += n;
    }

    /// The point at the start of this range.
    pub fn begin(&self) -> Location {
        Location {
            file_name: self.file_name.clone(),
            first_line: self.first_line,
            first_column: self.first_column,
            last_line: self.first_line,
            last_column: self.first_column,
        }
    }

    /// The point at the end of this range.
    pub fn end(&self) -> Location {
        Location {
            file_name: self.file_name.clone(),
            first_line: self.last_line,
            first_column: self.last_column,
            last_line: self.last_line,
            last_column: self.last_column,
        }
    }

    /// Span from the start of `self` up to (excluding) the start of `other`.
    ///
    /// A null endpoint absorbs: the other location is returned unchanged.
    pub fn up_to(&self, other: &Location) -> Location {
        if self.is_null() {
            return other.clone();
        }
        if other.is_null() {
            return self.clone();
        }
        Location {
            file_name: self.file_name.clone(),
            first_line: self.first_line,
            first_column: self.first_column,
            last_line: other.first_line,
            last_column: other.first_column,
        }
    }

    /// Span from the start of `self` through the end of `other`.
    pub fn up_to_and_including(&self, other: &Location) -> Location {
        if self.is_null() {
            return other.clone();
        }
        if other.is_null() {
            return self.clone();
        }
        Location {
            file_name: self.file_name.clone(),
            first_line: self.first_line,
            first_column: self.first_column,
            last_line: other.last_line,
            last_column: other.last_column,
        }
    }

    /// Span from the end of `self` up to (excluding) the start of `other`.
    pub fn after_up_to(&self, other: &Location) -> Location {
        if self.is_null() {
            return other.clone();
        }
        if other.is_null() {
            return self.clone();
        }
        Location {
            file_name: self.file_name.clone(),
            first_line: self.last_line,
            first_column: self.last_column,
            last_line: other.first_line,
            last_column: other.first_column,
        }
    }

    /// Span from the end of `self` through the end of `other`.
    pub fn after_up_to_and_including(&self, other: &Location) -> Location {
        Location {
            file_name: self.file_name.clone(),
            first_line: self.last_line,
            first_column: self.last_column,
            last_line: other.last_line,
            last_column: other.last_column,
        }
    }
}

impl fmt::Display for Location {
    /// The fixed textual algorithm: nothing for the null location, then
    /// `file`, then `:` and the tightest of `line`, `line.col`,
    /// `line.col1-col2`, `line1.col1-line2.col2`, or `line1-line2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name)?;
        if self.first_line() > 0 {
            write!(f, ":")?;
            if self.first_line() >= self.last_line() {
                if self.first_column() >= self.last_column() {
                    if self.first_column() > 0 {
                        write!(f, "{}.{}", self.first_line(), self.first_column())?;
                    } else {
                        write!(f, "{}", self.first_line())?;
                    }
                } else {
                    write!(
                        f,
                        "{}.{}-{}",
                        self.first_line(),
                        self.first_column(),
                        self.last_column()
                    )?;
                }
            } else if self.first_column() > 0 {
                write!(
                    f,
                    "{}.{}-{}.{}",
                    self.first_line(),
                    self.first_column(),
                    self.last_line(),
                    self.last_column()
                )?;
            } else {
                write!(f, "{}-{}", self.first_line(), self.last_line())?;
            }
        }
        Ok(())
    }
}

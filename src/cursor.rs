//! Cursor positions in a text buffer.
//!
//! Editors report the cursor either as a byte offset or as a line/column pair. Everything downstream works on byte
//! offsets, so [`Cursor::to_offset`] normalizes both.

use std::fmt;
use std::str::FromStr;

use crate::errors::RunnerError;

/// A 1-based line and optional 1-based column (counted in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumn {
    pub line: usize,
    pub column: Option<usize>,
}

impl FromStr for LineColumn {
    type Err = RunnerError;

    /// Parse `LINE` or `LINE:COLUMN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RunnerError::InvalidCursor(s.to_string());
        let (line, column) = match s.split_once(':') {
            Some((line, column)) => (line, Some(column)),
            None => (s, None),
        };

        let line: usize = line.trim().parse().map_err(|_| invalid())?;
        let column = column.map(|c| c.trim().parse::<usize>()).transpose().map_err(|_| invalid())?;
        if line == 0 || column == Some(0) {
            return Err(invalid());
        }
        Ok(LineColumn { line, column })
    }
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}:{}", self.line, column),
            None => write!(f, "{}", self.line),
        }
    }
}

/// Where the cursor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Byte offset into the buffer
    Offset(usize),
    LineColumn(LineColumn),
    /// No position given; treated as the end of the buffer
    End,
}

impl Cursor {
    /// Resolve to a byte offset into `source`.
    ///
    /// ## Notes
    /// - Positions past the end of a line clamp to the line end; positions past the buffer clamp to its length.
    /// - Offsets inside a multi-byte character round down to its first byte.
    pub fn to_offset(&self, source: &str) -> usize {
        match *self {
            Cursor::Offset(offset) => floor_char_boundary(source, offset.min(source.len())),
            Cursor::End => source.len(),
            Cursor::LineColumn(LineColumn { line, column }) => {
                let mut line_start = 0;
                for _ in 1..line {
                    match source[line_start..].find('\n') {
                        Some(newline) => line_start += newline + 1,
                        None => return source.len(),
                    }
                }
                let line_text = source[line_start..].split('\n').next().unwrap_or("");
                let column_offset = line_text
                    .char_indices()
                    .nth(column.unwrap_or(1).saturating_sub(1))
                    .map(|(i, _)| i)
                    .unwrap_or(line_text.len());
                line_start + column_offset
            }
        }
    }
}

fn floor_char_boundary(source: &str, mut offset: usize) -> usize {
    while offset > 0 && !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_column() {
        assert_eq!(
            "12:4".parse::<LineColumn>().unwrap(),
            LineColumn {
                line: 12,
                column: Some(4)
            }
        );
        assert_eq!("7".parse::<LineColumn>().unwrap(), LineColumn { line: 7, column: None });
    }

    #[test]
    fn test_parse_rejects_zero_and_garbage() {
        assert!("0".parse::<LineColumn>().is_err());
        assert!("3:0".parse::<LineColumn>().is_err());
        assert!("x:1".parse::<LineColumn>().is_err());
        assert!("".parse::<LineColumn>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(LineColumn { line: 3, column: Some(9) }.to_string(), "3:9");
        assert_eq!(LineColumn { line: 3, column: None }.to_string(), "3");
    }

    #[test]
    fn test_line_column_to_offset() {
        let source = "ab\ncdef\ng";
        let at = |line, column| Cursor::LineColumn(LineColumn { line, column }).to_offset(source);
        assert_eq!(at(1, None), 0);
        assert_eq!(at(2, Some(1)), 3);
        assert_eq!(at(2, Some(3)), 5);
        // Past the end of the line clamps to the line end
        assert_eq!(at(2, Some(40)), 7);
        assert_eq!(at(3, Some(1)), 8);
        // Past the last line clamps to the buffer end
        assert_eq!(at(9, None), source.len());
    }

    #[test]
    fn test_columns_count_characters() {
        let source = "é€x";
        let offset = Cursor::LineColumn(LineColumn { line: 1, column: Some(3) }).to_offset(source);
        assert_eq!(&source[offset..], "x");
    }

    #[test]
    fn test_offset_clamps_and_rounds_down() {
        let source = "aé";
        assert_eq!(Cursor::Offset(100).to_offset(source), 3);
        assert_eq!(Cursor::Offset(2).to_offset(source), 1);
        assert_eq!(Cursor::End.to_offset(source), 3);
    }
}

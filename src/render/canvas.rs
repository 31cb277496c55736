// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// A fixed-size, bounds-checked character grid. The last writer wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    /// Creates a new canvas filled with spaces (`' '`).
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![' '; len],
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = ch;
        Ok(())
    }

    /// Writes `text` left-to-right starting at `(x, y)`, clipping at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }

        for (offset, ch) in text.chars().enumerate() {
            let Some(cell_x) = x.checked_add(offset) else {
                break;
            };
            if cell_x >= self.width {
                break;
            }
            self.set(cell_x, y, ch)?;
        }

        Ok(())
    }

    /// Row `y` as a string, trailing spaces removed.
    pub fn row_trimmed(&self, y: usize) -> Result<String, CanvasError> {
        if y >= self.height {
            return Err(self.out_of_bounds(0, y));
        }
        let start = y * self.width;
        let row = self.cells[start..start + self.width].iter().collect::<String>();
        Ok(row.trim_end_matches(' ').to_owned())
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }

        Ok((y * self.width) + x)
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> CanvasError {
        CanvasError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow {
        width: usize,
        height: usize,
    },
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "canvas area overflow: {width}*{height}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
        }
    }
}

impl std::error::Error for CanvasError {}

#[cfg(test)]
mod tests {
    use super::{Canvas, CanvasError};

    #[test]
    fn last_writer_wins() {
        let mut c = Canvas::new(3, 2).expect("canvas");
        c.set(1, 0, '-').unwrap();
        c.set(1, 0, '|').unwrap();
        assert_eq!(c.row_trimmed(0).unwrap(), " |");
        assert_eq!(c.row_trimmed(1).unwrap(), "");
    }

    #[test]
    fn set_out_of_bounds_errors() {
        let mut c = Canvas::new(2, 2).expect("canvas");
        let err = c.set(2, 0, 'X').unwrap_err();
        assert_eq!(
            err,
            CanvasError::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            }
        );
    }

    #[test]
    fn write_str_clips_at_right_edge() {
        let mut c = Canvas::new(4, 1).expect("canvas");
        c.write_str(2, 0, "abcdef").unwrap();
        assert_eq!(c.row_trimmed(0).unwrap(), "  ab");
        assert!(c.write_str(0, 1, "x").is_err());
    }

    #[test]
    fn row_trimmed_drops_trailing_spaces() {
        let mut c = Canvas::new(5, 1).expect("canvas");
        c.write_str(1, 0, "ab").unwrap();
        assert_eq!(c.row_trimmed(0).unwrap(), " ab");
        assert!(c.row_trimmed(1).is_err());
    }

    #[test]
    fn rejects_area_overflow() {
        let err = Canvas::new(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            CanvasError::AreaOverflow {
                width: usize::MAX,
                height: 2
            }
        );
    }
}

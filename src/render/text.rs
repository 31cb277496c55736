// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::canvas::{Canvas, CanvasError};

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    let len = text_len(text);
    if len <= max_len {
        return text.to_owned();
    }

    if max_len == 1 {
        return "…".to_owned();
    }

    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

/// Exactly `width` chars: `text` cut short or padded with spaces.
pub(crate) fn fixed_width(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = text_len(&out);
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Canvas rows with trailing spaces removed, each row terminated by a newline. Empty padding
/// rows are kept at both edges.
pub(crate) fn canvas_to_string_trimmed(canvas: &Canvas) -> Result<String, CanvasError> {
    let mut out = String::new();
    for y in 0..canvas.height() {
        out.push_str(&canvas.row_trimmed(y)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{canvas_to_string_trimmed, fixed_width, text_len, truncate_with_ellipsis};
    use crate::render::Canvas;

    #[test]
    fn truncate_with_ellipsis_handles_small_widths() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
        assert_eq!(truncate_with_ellipsis("h", 1), "h");
        assert_eq!(truncate_with_ellipsis("hello", 2), "h…");
    }

    #[test]
    fn fixed_width_pads_and_cuts_by_chars() {
        assert_eq!(fixed_width("Temple", 3), "Tem");
        assert_eq!(fixed_width("R1", 3), "R1 ");
        assert_eq!(fixed_width("αβγδ", 3), "αβγ");
        assert_eq!(text_len(&fixed_width("", 3)), 3);
    }

    #[test]
    fn canvas_to_string_trimmed_keeps_padding_rows_on_both_edges() {
        let mut canvas = Canvas::new(3, 3).expect("canvas");
        canvas.set(0, 1, 'A').expect("set");
        assert_eq!(canvas_to_string_trimmed(&canvas).expect("render"), "\nA\n\n");
    }
}

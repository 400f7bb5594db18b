//! Box-drawing display digits for the bloom countdown.

/// Rows in every glyph.
pub const GLYPH_HEIGHT: usize = 5;

/// Columns in every digit glyph.
pub const DIGIT_WIDTH: usize = 4;

/// Heavy box-drawing digits (5 lines tall, 4 chars wide)
pub const DIGITS: [[&str; GLYPH_HEIGHT]; 10] = [
    // 0
    ["┏━━┓", "┃  ┃", "┃  ┃", "┃  ┃", "┗━━┛"],
    // 1
    ["  ┓ ", "  ┃ ", "  ┃ ", "  ┃ ", "  ┻ "],
    // 2
    ["━━━┓", "   ┃", "┏━━┛", "┃   ", "┗━━━"],
    // 3
    ["━━━┓", "   ┃", " ━━┫", "   ┃", "━━━┛"],
    // 4
    ["┓  ┏", "┃  ┃", "┗━━┫", "   ┃", "   ┻"],
    // 5
    ["┏━━━", "┃   ", "┗━━┓", "   ┃", "━━━┛"],
    // 6
    ["┏━━━", "┃   ", "┣━━┓", "┃  ┃", "┗━━┛"],
    // 7
    ["━━━┓", "   ┃", "   ┃", "   ┃", "   ┻"],
    // 8
    ["┏━━┓", "┃  ┃", "┣━━┫", "┃  ┃", "┗━━┛"],
    // 9
    ["┏━━┓", "┃  ┃", "┗━━┫", "   ┃", "━━━┛"],
];

/// Separator between countdown units (5 lines tall, 1 char wide)
pub const SEPARATOR: [&str; GLYPH_HEIGHT] = [" ", "•", " ", "•", " "];

/// Blank digit-sized cell, used for characters without a glyph.
const BLANK: &str = "    ";

fn glyph(ch: char) -> [&'static str; GLYPH_HEIGHT] {
    match ch.to_digit(10) {
        Some(d) => DIGITS[d as usize],
        None => [BLANK; GLYPH_HEIGHT],
    }
}

/// Render a run of decimal digits as large art, one string per row.
///
/// Digits are separated by a single space. Non-digit characters render
/// as blank cells of digit width.
pub fn digit_art(text: &str) -> Vec<String> {
    (0..GLYPH_HEIGHT)
        .map(|row| {
            text.chars()
                .map(|ch| glyph(ch)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Display width in columns of [`digit_art`] for `text`.
pub fn art_width(text: &str) -> usize {
    let n = text.chars().count();
    if n == 0 { 0 } else { n * DIGIT_WIDTH + (n - 1) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_glyphs_share_dimensions() {
        for digit in DIGITS {
            for row in digit {
                assert_eq!(row.chars().count(), DIGIT_WIDTH, "row {row:?}");
            }
        }
        for row in SEPARATOR {
            assert_eq!(row.chars().count(), 1);
        }
    }

    #[test]
    fn test_digit_art_joins_with_spaces() {
        let art = digit_art("08");
        assert_eq!(art.len(), GLYPH_HEIGHT);
        assert_eq!(art[0], "┏━━┓ ┏━━┓");
        assert_eq!(art[2], "┃  ┃ ┣━━┫");
        assert_eq!(art[0].chars().count(), art_width("08"));
    }

    #[test]
    fn test_non_digits_are_blank() {
        let art = digit_art("x");
        assert!(art.iter().all(|row| row.trim().is_empty()));
        assert_eq!(art_width(""), 0);
    }
}

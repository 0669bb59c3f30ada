//! Helvetica width table and greedy word-wrap for the PDF export.
//!
//! Widths are in em units (AFM width / 1000) for ASCII 0x20..=0x7E.
//! Index = (char as usize) - 32.

/// Static character-width table for one font.
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for characters outside the table.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.measure_char(c)).sum()
    }

    pub fn measure_char(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }
}

/// Helvetica (the PDF standard Type1 face).
pub static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

/// Word-wraps `text` to `max_width_em`.
///
/// Explicit line breaks are kept, blank lines included. Words wider than a whole line
/// are split between characters. A line only exceeds the width when a single glyph does.
pub fn wrap_text(text: &str, table: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0_f32;
        for word in words {
            let word_w = table.measure_str(word);
            let space_w = if current.is_empty() { 0.0 } else { table.space_width };

            if current_width + space_w + word_w <= max_width_em {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += space_w + word_w;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_w <= max_width_em {
                current.push_str(word);
                current_width = word_w;
            } else {
                // Break an over-long word between characters.
                for c in word.chars() {
                    let char_w = table.measure_char(c);
                    if !current.is_empty() && current_width + char_w > max_width_em {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(c);
                    current_width += char_w;
                }
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_known_glyphs() {
        assert!((HELVETICA.measure_str("i") - 0.222).abs() < f32::EPSILON);
        assert!((HELVETICA.measure_str("W") - 0.944).abs() < f32::EPSILON);
        assert!((HELVETICA.measure_str("é") - HELVETICA.average_char_width).abs() < f32::EPSILON);
    }

    #[test]
    fn test_short_text_is_a_single_line() {
        assert_eq!(wrap_text("Jane Doe", &HELVETICA, 40.0), vec!["Jane Doe"]);
    }

    #[test]
    fn test_explicit_newlines_and_blank_lines_are_kept() {
        let lines = wrap_text("Jane Doe\n\nExperience\r\n", &HELVETICA, 40.0);
        assert_eq!(lines, vec!["Jane Doe", "", "Experience", ""]);
    }

    #[test]
    fn test_lines_never_exceed_width() {
        let text = "Designed and operated a multi-region event pipeline processing billions of \
                    records per day while mentoring four engineers and leading the on-call rotation.";
        let width = 20.0;
        let lines = wrap_text(text, &HELVETICA, width);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(HELVETICA.measure_str(line) <= width + 1e-3, "too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_overlong_word_is_broken_by_character() {
        let word = "x".repeat(100);
        let lines = wrap_text(&word, &HELVETICA, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(HELVETICA.measure_str(line) <= 10.0 + 1e-3);
        }
    }
}

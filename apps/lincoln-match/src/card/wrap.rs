//! Greedy word-wrap for the course name on the story card.
//!
//! Tokens are added to the current line while the measured width of
//! `line + " " + token` stays within `max_width`. The first token that does not
//! fit starts a new line. A token wider than `max_width` on its own still gets
//! a line to itself: there is no hyphenation and no mid-word break.

use serde::{Deserialize, Serialize};

/// Where wrapped lines go and how wide they may be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WrapLayout {
    pub max_width: f32,
    pub first_baseline: f32,
    pub line_height: f32,
}

/// One laid-out line, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedLine {
    pub text: String,
    pub baseline_y: f32,
    /// Measured width in pixels.
    pub width: f32,
}

impl WrappedLine {
    /// True when the line holds a single token too wide for the layout.
    pub fn overflows(&self, layout: &WrapLayout) -> bool {
        self.width > layout.max_width
    }
}

/// Wraps `text` using `measure` for widths. Whitespace-only text yields no lines.
pub fn wrap_text<F>(text: &str, layout: &WrapLayout, measure: F) -> Vec<WrappedLine>
where
    F: Fn(&str) -> f32,
{
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    let mut baseline_y = layout.first_baseline;

    for token in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(token);
            current_width = measure(&current);
            continue;
        }

        let candidate = format!("{current} {token}");
        let candidate_width = measure(&candidate);

        if candidate_width <= layout.max_width {
            current = candidate;
            current_width = candidate_width;
        } else {
            lines.push(WrappedLine {
                text: std::mem::take(&mut current),
                baseline_y,
                width: current_width,
            });
            baseline_y += layout.line_height;
            current.push_str(token);
            current_width = measure(&current);
        }
    }

    if !current.is_empty() {
        lines.push(WrappedLine {
            text: current,
            baseline_y,
            width: current_width,
        });
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::font_metrics::FontSpec;

    const LAYOUT: WrapLayout = WrapLayout {
        max_width: 800.0,
        first_baseline: 850.0,
        line_height: 90.0,
    };

    fn wrap_bold_70(text: &str) -> Vec<WrappedLine> {
        let font = FontSpec::bold(70.0);
        wrap_text(text, &LAYOUT, |s| font.measure(s))
    }

    fn tokens_of(lines: &[WrappedLine]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|l| l.text.split_whitespace().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_long_course_name_wraps_within_width() {
        let name = "Computer Science and Artificial Intelligence";
        let lines = wrap_bold_70(name);

        assert!(lines.len() >= 2, "expected a wrap, got {lines:?}");
        for line in &lines {
            assert!(line.width <= 800.0, "line too wide: {line:?}");
        }
        let original: Vec<String> = name.split_whitespace().map(str::to_string).collect();
        assert_eq!(tokens_of(&lines), original);
    }

    #[test]
    fn test_greedy_fill_puts_break_before_first_misfit() {
        let lines = wrap_bold_70("Computer Science and Artificial Intelligence");
        assert_eq!(lines[0].text, "Computer Science and");
        assert_eq!(lines[1].text, "Artificial Intelligence");
    }

    #[test]
    fn test_baselines_step_by_line_height() {
        let lines = wrap_bold_70("Computer Science and Artificial Intelligence with Robotics");
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line.baseline_y, 850.0 + 90.0 * i as f32);
        }
    }

    #[test]
    fn test_short_name_is_single_line() {
        let lines = wrap_bold_70("Law");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Law");
        assert_eq!(lines[0].baseline_y, 850.0);
    }

    #[test]
    fn test_oversized_token_gets_its_own_line() {
        let giant = "Pneumonoultramicroscopicsilicovolcanoconiosis";
        let lines = wrap_bold_70(&format!("BSc {giant} Studies"));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, giant);
        assert!(lines[1].overflows(&LAYOUT));
        assert!(!lines[0].overflows(&LAYOUT));
    }

    #[test]
    fn test_runs_of_whitespace_collapse() {
        let lines = wrap_bold_70("  Fine\t\tArt \n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Fine Art");
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(wrap_bold_70("   ").is_empty());
    }

    #[test]
    fn test_fixed_width_measure_breaks_exactly_at_limit() {
        // Each char is 10px: "aaaa bbb" = 80px fits exactly at max 80.
        let layout = WrapLayout {
            max_width: 80.0,
            first_baseline: 0.0,
            line_height: 10.0,
        };
        let lines = wrap_text("aaaa bbb c", &layout, |s| s.chars().count() as f32 * 10.0);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["aaaa bbb", "c"]);
    }
}

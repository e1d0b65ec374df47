//! Greedy line wrapping.

use super::{Line, Word, WrappedText};
use crate::font::FontMetrics;

/// Wrap `words` into lines no wider than `max_line_width` pixels.
///
/// A word that alone exceeds the limit is split by grapheme; a single
/// grapheme wider than the limit still gets a line of its own. Trailing
/// spaces are dropped from every finished line, and a run of spaces that
/// does not fit is dropped rather than carried to the next line.
pub fn wrap<M: FontMetrics + ?Sized>(words: &[Word], max_line_width: u32, metrics: &M) -> WrappedText {
    let mut lines = Vec::new();
    let mut current = Line::default();
    let mut ended_with_break = false;

    for word in words {
        ended_with_break = word.force_wrap;
        if word.force_wrap {
            finish_line(&mut lines, std::mem::take(&mut current));
            continue;
        }

        let mut word = word.clone();
        word.width = metrics.word_width(&word);

        let overflows = current.width + word.width > max_line_width;
        if overflows && word.is_space() {
            // Spaces at a line edge are not rendered, so they never open a line.
            if !current.is_empty() {
                finish_line(&mut lines, std::mem::take(&mut current));
            }
            continue;
        }

        if word.width > max_line_width {
            if !current.is_empty() {
                finish_line(&mut lines, std::mem::take(&mut current));
            }
            let mut parts = split_word(&word, max_line_width, metrics);
            let last = parts.pop();
            for part in parts {
                lines.push(Line {
                    width: part.width,
                    words: vec![part],
                });
            }
            if let Some(last) = last {
                current.width = last.width;
                current.words.push(last);
            }
        } else if overflows {
            finish_line(&mut lines, std::mem::take(&mut current));
            current.width = word.width;
            current.words.push(word);
        } else {
            current.width += word.width;
            current.words.push(word);
        }
    }

    if !current.is_empty() || ended_with_break {
        finish_line(&mut lines, current);
    }

    let background_width = lines.iter().map(|l| l.width).max().unwrap_or(0);
    WrappedText {
        lines,
        background_width,
    }
}

/// Drop one trailing run of spaces and push the line.
fn finish_line(lines: &mut Vec<Line>, mut line: Line) {
    if line.words.last().is_some_and(Word::is_space) {
        if let Some(space) = line.words.pop() {
            line.width -= space.width;
        }
    }
    lines.push(line);
}

/// Split into the fewest parts that each fit, filling greedily.
fn split_word<M: FontMetrics + ?Sized>(word: &Word, max_line_width: u32, metrics: &M) -> Vec<Word> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut width = 0;

    for (index, grapheme) in word.text.iter().enumerate() {
        let advance = word
            .style_at(index)
            .map_or(0, |style| metrics.text_width(grapheme, style));
        if index > start && width + advance > max_line_width {
            let mut part = word.slice(start..index);
            part.width = width;
            parts.push(part);
            start = index;
            width = 0;
        }
        width += advance;
    }

    if start < word.len() {
        let mut part = word.slice(start..word.len());
        part.width = width;
        parts.push(part);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontMetrics;
    use crate::layout::{segment, FlatLeaf, ResolvedStyle};
    use std::sync::Arc;

    /// Letters are 6px, spaces 5px, `@` is 300px.
    struct TestMetrics;

    impl FontMetrics for TestMetrics {
        fn glyph_advance(&self, grapheme: &str, _font: &str) -> u32 {
            match grapheme {
                " " => 5,
                "@" => 300,
                _ => 6,
            }
        }
    }

    fn leaf(text: &str, style: &Arc<ResolvedStyle>) -> FlatLeaf {
        FlatLeaf {
            text: text.into(),
            style: Arc::clone(style),
        }
    }

    fn words(text: &str) -> Vec<Word> {
        segment(&[leaf(text, &Arc::new(ResolvedStyle::default()))])
    }

    fn texts(wrapped: &WrappedText) -> Vec<String> {
        wrapped.lines.iter().map(Line::text).collect()
    }

    #[test]
    fn test_space_dropped_at_break() {
        let wrapped = wrap(&words("Hello World"), 40, &TestMetrics);
        assert_eq!(texts(&wrapped), vec!["Hello", "World"]);
        assert_eq!(wrapped.lines[0].width, 30);
        assert_eq!(wrapped.lines[1].width, 30);
        assert_eq!(wrapped.lines[0].words.len(), 1);
        assert_eq!(wrapped.background_width, 30);
    }

    #[test]
    fn test_overflowing_space_does_not_open_a_line() {
        let metrics = crate::font::MonospaceMetrics::new(6);
        let wrapped = wrap(&words("aaaaaa aaaaaa"), 36, &metrics);
        assert_eq!(texts(&wrapped), vec!["aaaaaa", "aaaaaa"]);
        assert!(wrapped.lines.iter().all(|l| l.width == 36));

        // Several spaces in a row overflowing still leave no blank line.
        let wrapped = wrap(&words("aaaaa    b"), 36, &metrics);
        assert_eq!(texts(&wrapped), vec!["aaaaa", "b"]);
    }

    #[test]
    fn test_words_fit_on_one_line() {
        let wrapped = wrap(&words("ab cd"), 100, &TestMetrics);
        assert_eq!(texts(&wrapped), vec!["ab cd"]);
        assert_eq!(wrapped.lines[0].width, 29);
        assert_eq!(wrapped.lines[0].words[1].width, 5);
    }

    #[test]
    fn test_long_word_is_split_with_rebased_spans() {
        let plain = Arc::new(ResolvedStyle::default());
        let bold = Arc::new(ResolvedStyle {
            bold: true,
            ..Default::default()
        });
        // 60 plain glyphs (360px) then 20 bold glyphs (140px): one 500px word.
        let leaves = [leaf(&"a".repeat(60), &plain), leaf(&"b".repeat(20), &bold)];
        let words = segment(&leaves);
        assert_eq!(words.len(), 1);
        assert_eq!(TestMetrics.word_width(&words[0]), 500);

        let wrapped = wrap(&words, 100, &TestMetrics);
        assert!(wrapped.lines.len() >= 5);
        for line in &wrapped.lines {
            assert!(line.width <= 100, "{} is {}px", line.text(), line.width);
            for word in &line.words {
                assert_eq!(word.styles.first().map(|s| s.start), Some(0));
                assert_eq!(word.styles.last().map(|s| s.end), Some(word.len()));
            }
        }

        let joined: String = wrapped.lines.iter().map(Line::text).collect();
        assert_eq!(joined, format!("{}{}", "a".repeat(60), "b".repeat(20)));

        // The part straddling the style change carries both spans.
        let mixed = wrapped
            .lines
            .iter()
            .flat_map(|l| &l.words)
            .find(|w| w.styles.len() == 2)
            .unwrap();
        assert!(!mixed.styles[0].style.bold);
        assert!(mixed.styles[1].style.bold);
        assert_eq!(mixed.styles[1].start, mixed.styles[0].end);
    }

    #[test]
    fn test_split_part_opens_next_line() {
        let wrapped = wrap(&words("x aaaaaaaaaa b"), 40, &TestMetrics);
        // 60px word splits into 36 + 24; the 24px tail shares a line with "b".
        assert_eq!(texts(&wrapped), vec!["x", "aaaaaa", "aaaa b"]);
        assert_eq!(wrapped.lines[2].width, 24 + 5 + 6);
    }

    #[test]
    fn test_oversized_grapheme_gets_own_line() {
        let wrapped = wrap(&words("a@a"), 100, &TestMetrics);
        assert_eq!(texts(&wrapped), vec!["a", "@", "a"]);
        assert_eq!(wrapped.lines[1].width, 300);
        assert_eq!(wrapped.background_width, 300);
    }

    #[test]
    fn test_forced_breaks() {
        let wrapped = wrap(&words("a\n\nb\n"), 100, &TestMetrics);
        assert_eq!(texts(&wrapped), vec!["a", "", "b", ""]);

        let wrapped = wrap(&words("a \nb"), 100, &TestMetrics);
        assert_eq!(texts(&wrapped), vec!["a", "b"]);
        assert_eq!(wrapped.lines[0].width, 6);
    }

    #[test]
    fn test_empty_input() {
        let wrapped = wrap(&[], 100, &TestMetrics);
        assert!(wrapped.lines.is_empty());
        assert_eq!(wrapped.background_width, 0);
    }

    #[test]
    fn test_deterministic() {
        let input = words("The quick brown fox jumps over the lazy dog");
        let first = wrap(&input, 50, &TestMetrics);
        let second = wrap(&input, 50, &TestMetrics);
        assert_eq!(texts(&first), texts(&second));
        assert!(first.lines.iter().all(|l| l.width <= 50));
    }
}

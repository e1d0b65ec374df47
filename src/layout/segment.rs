//! Word segmentation.

use super::{FlatLeaf, Word};
use unicode_segmentation::UnicodeSegmentation;

/// Split leaves into words: non-space runs, space runs and an empty
/// line-break marker for every newline. Words may span several leaves.
///
/// Graphemes are found over the text of all leaves joined together, so a
/// combining mark at the start of a leaf joins the last character of the
/// previous one. A grapheme that straddles leaves takes the style of the
/// leaf holding its first character.
pub fn segment(leaves: &[FlatLeaf]) -> Vec<Word> {
    let mut text = String::new();
    let mut starts = Vec::with_capacity(leaves.len());
    for leaf in leaves {
        starts.push(text.len());
        text.push_str(leaf.text.as_str());
    }

    let mut words = Vec::new();
    let mut current = Word::new();
    let mut leaf = 0;

    for (offset, grapheme) in text.grapheme_indices(true) {
        // Skips empty leaves, whose start equals the next one's.
        while starts.get(leaf + 1).is_some_and(|&next| next <= offset) {
            leaf += 1;
        }
        let style = &leaves[leaf].style;

        if grapheme == "\n" || grapheme == "\r\n" {
            flush(&mut words, &mut current);
            words.push(Word::line_break());
            continue;
        }

        let is_space = grapheme == " ";
        if !current.is_empty() && current.is_space() != is_space {
            flush(&mut words, &mut current);
        }
        current.push(grapheme, style);
    }

    flush(&mut words, &mut current);
    words
}

fn flush(words: &mut Vec<Word>, current: &mut Word) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{flatten, ResolvedStyle};
    use crate::parser::parse;
    use crate::types::Dialect;
    use std::sync::Arc;

    fn words(source: &str) -> Vec<Word> {
        segment(&flatten(&parse(source, Dialect::Modern).unwrap()))
    }

    fn texts(words: &[Word]) -> Vec<&str> {
        words.iter().map(|w| w.text.as_str()).collect()
    }

    #[test]
    fn test_words_and_spaces() {
        let words = words("'Hello  big world'");
        assert_eq!(texts(&words), vec!["Hello", "  ", "big", " ", "world"]);
        assert!(words[1].is_space());
        assert!(!words.iter().any(|w| w.force_wrap));
    }

    #[test]
    fn test_newlines_become_markers() {
        let words = words("'a\\nb\\n\\nc'");
        assert_eq!(texts(&words), vec!["a", "", "b", "", "", "c"]);
        assert!(words[1].force_wrap && words[3].force_wrap && words[4].force_wrap);
        assert!(words[1].styles.is_empty());
    }

    #[test]
    fn test_word_spans_leaves() {
        let words = words("{text:'foo', extra:[{text:'bar baz', bold:true}]}");
        assert_eq!(texts(&words), vec!["foobar", " ", "baz"]);

        let first = &words[0];
        assert_eq!(first.styles.len(), 2);
        assert_eq!((first.styles[0].start, first.styles[0].end), (0, 3));
        assert_eq!((first.styles[1].start, first.styles[1].end), (3, 6));
        assert!(first.styles[1].style.bold);
    }

    #[test]
    fn test_same_style_leaves_share_a_span() {
        let style = Arc::new(ResolvedStyle::default());
        let leaves = vec![
            FlatLeaf { text: "ab".into(), style: Arc::clone(&style) },
            FlatLeaf { text: "c😀".into(), style: Arc::clone(&style) },
        ];
        let words = segment(&leaves);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].len(), 4);
        assert_eq!(words[0].styles.len(), 1);
        assert_eq!(words[0].styles[0].end, 4);
    }

    #[test]
    fn test_combining_mark_joins_across_leaves() {
        let plain = Arc::new(ResolvedStyle::default());
        let bold = Arc::new(ResolvedStyle {
            bold: true,
            ..Default::default()
        });
        let leaves = vec![
            FlatLeaf { text: "caf".into(), style: Arc::clone(&plain) },
            FlatLeaf { text: "".into(), style: Arc::clone(&bold) },
            FlatLeaf { text: "e".into(), style: Arc::clone(&plain) },
            FlatLeaf { text: "\u{301}s".into(), style: Arc::clone(&bold) },
        ];
        let words = segment(&leaves);
        assert_eq!(words.len(), 1);
        let word = &words[0];
        assert_eq!(word.text.as_str(), "cafe\u{301}s");
        // c, a, f, e + accent, s
        assert_eq!(word.len(), 5);
        assert_eq!(word.text.get(3), Some("e\u{301}"));
        assert_eq!((word.styles[0].start, word.styles[0].end), (0, 4));
        assert!(!word.styles[0].style.bold);
        assert_eq!((word.styles[1].start, word.styles[1].end), (4, 5));
        assert!(word.styles[1].style.bold);

        // Segmenting the joined text gives the same words as one leaf would.
        let split = segment(&[
            FlatLeaf { text: "a ".into(), style: Arc::clone(&plain) },
            FlatLeaf { text: "\u{301}b".into(), style: Arc::clone(&bold) },
        ]);
        let whole = segment(&[FlatLeaf { text: "a \u{301}b".into(), style: Arc::clone(&plain) }]);
        assert_eq!(texts(&split), texts(&whole));
    }

    #[test]
    fn test_crlf_split_across_leaves() {
        let style = Arc::new(ResolvedStyle::default());
        let words = segment(&[
            FlatLeaf { text: "a\r".into(), style: Arc::clone(&style) },
            FlatLeaf { text: "\nb".into(), style: Arc::clone(&style) },
        ]);
        assert_eq!(texts(&words), vec!["a", "", "b"]);
        assert!(words[1].force_wrap);
    }

    #[test]
    fn test_spans_tile_every_word() {
        let words = words("['x y', {text:'z\\nw  ', italic:true}, {text:'v', color:gold}]");
        for word in &words {
            let mut next = 0;
            for span in &word.styles {
                assert_eq!(span.start, next);
                assert!(span.end > span.start);
                next = span.end;
            }
            assert_eq!(next, word.len());
        }
    }
}

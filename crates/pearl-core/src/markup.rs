//! Lightweight markup conversion for assistant replies
//!
//! Replies are converted in two passes. `lex_bold` walks the whole text once and
//! turns `**strong**` spans into inline tokens; the token stream is then split on
//! newlines and consecutive `* ` lines are grouped into list blocks. The result is
//! a structured `DisplayMarkup` that front-ends can draw directly or serialize to
//! HTML-like markup with `to_html`.

const STRONG_MARKER: &str = "**";
const LIST_MARKER: &str = "* ";

/// An inline run of text inside a line or list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
}

/// One entry of a list block
pub type ListItem = Vec<Inline>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A plain line, drawn as-is and followed by a line break
    Line(Vec<Inline>),
    /// A run of consecutive `* ` lines
    List(Vec<ListItem>),
}

/// Rendered form of an assistant reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayMarkup {
    blocks: Vec<Block>,
}

impl DisplayMarkup {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Serialize to HTML-like display markup.
    ///
    /// Strong spans become `<strong>`, list blocks become `<ul>` with one `<li>`
    /// per entry, and plain lines are followed by `\n`. Text is emitted verbatim.
    pub fn to_html(&self) -> String {
        let mut out = String::new();

        for block in &self.blocks {
            match block {
                Block::Line(inlines) => {
                    push_inlines_html(&mut out, inlines);
                    out.push('\n');
                }
                Block::List(items) => {
                    out.push_str("<ul>");
                    for item in items {
                        out.push_str("<li>");
                        push_inlines_html(&mut out, item);
                        out.push_str("</li>");
                    }
                    out.push_str("</ul>");
                }
            }
        }

        out.trim().to_string()
    }
}

fn push_inlines_html(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Strong(text) => {
                out.push_str("<strong>");
                out.push_str(text);
                out.push_str("</strong>");
            }
        }
    }
}

/// Convert raw reply text into display markup. Never fails: malformed markup
/// passes through as literal text.
pub fn render(text: &str) -> DisplayMarkup {
    let tokens = lex_bold(text);
    let lines = split_lines(tokens);
    let mut blocks = group_blocks(lines);
    trim_blocks(&mut blocks);
    DisplayMarkup { blocks }
}

/// First pass: find `**content**` spans, leftmost first and shortest content.
///
/// Content never crosses a line terminator. An opener without a closer on its
/// line contributes a single literal `*` and scanning resumes at the next char.
pub fn lex_bold(text: &str) -> Vec<Inline> {
    let mut tokens = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if let Some(after_open) = rest.strip_prefix(STRONG_MARKER) {
            if let Some(close) = find_closer(after_open) {
                if !plain.is_empty() {
                    tokens.push(Inline::Text(std::mem::take(&mut plain)));
                }
                tokens.push(Inline::Strong(after_open[..close].to_string()));
                rest = &after_open[close + STRONG_MARKER.len()..];
                continue;
            }
        }

        plain.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if !plain.is_empty() {
        tokens.push(Inline::Text(plain));
    }

    tokens
}

fn find_closer(s: &str) -> Option<usize> {
    let line_end = s.find(is_line_terminator).unwrap_or(s.len());
    s[..line_end].find(STRONG_MARKER)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Split the token stream on `\n`. Strong spans never contain a newline, so only
/// text tokens are cut.
fn split_lines(tokens: Vec<Inline>) -> Vec<Vec<Inline>> {
    let mut lines: Vec<Vec<Inline>> = vec![Vec::new()];

    for token in tokens {
        match token {
            Inline::Text(text) => {
                for (i, piece) in text.split('\n').enumerate() {
                    if i > 0 {
                        lines.push(Vec::new());
                    }
                    if !piece.is_empty() {
                        if let Some(line) = lines.last_mut() {
                            line.push(Inline::Text(piece.to_string()));
                        }
                    }
                }
            }
            strong @ Inline::Strong(_) => {
                if let Some(line) = lines.last_mut() {
                    line.push(strong);
                }
            }
        }
    }

    lines
}

/// Second pass: group consecutive list-item lines into list blocks.
fn group_blocks(lines: Vec<Vec<Inline>>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open_list: Option<Vec<ListItem>> = None;

    for line in lines {
        match list_item(&line) {
            Some(item) => open_list.get_or_insert_with(Vec::new).push(item),
            None => {
                if let Some(items) = open_list.take() {
                    blocks.push(Block::List(items));
                }
                blocks.push(Block::Line(line));
            }
        }
    }

    // Input ended inside a list
    if let Some(items) = open_list.take() {
        blocks.push(Block::List(items));
    }

    blocks
}

/// A line is a list item when, with surrounding whitespace stripped, it starts
/// with `* `. The entry is whatever follows the marker.
fn list_item(line: &[Inline]) -> Option<ListItem> {
    let mut item = line.to_vec();
    trim_inlines_start(&mut item);
    trim_inlines_end(&mut item);

    let Some(Inline::Text(head)) = item.first() else {
        return None;
    };
    let rest = head.strip_prefix(LIST_MARKER)?.to_string();

    if rest.is_empty() {
        item.remove(0);
    } else {
        item[0] = Inline::Text(rest);
    }

    Some(item)
}

fn trim_inlines_start(inlines: &mut Vec<Inline>) {
    while let Some(Inline::Text(text)) = inlines.first() {
        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            inlines.remove(0);
        } else {
            inlines[0] = Inline::Text(trimmed.to_string());
            break;
        }
    }
}

fn trim_inlines_end(inlines: &mut Vec<Inline>) {
    while let Some(Inline::Text(text)) = inlines.last() {
        let trimmed = text.trim_end();
        let last = inlines.len() - 1;
        if trimmed.is_empty() {
            inlines.truncate(last);
        } else {
            inlines[last] = Inline::Text(trimmed.to_string());
            break;
        }
    }
}

/// Trim whitespace surrounding the whole output. Blank plain lines at either end
/// disappear; interior blank lines are kept.
fn trim_blocks(blocks: &mut Vec<Block>) {
    while let Some(Block::Line(inlines)) = blocks.first_mut() {
        trim_inlines_start(inlines);
        if !inlines.is_empty() {
            break;
        }
        blocks.remove(0);
    }

    while let Some(Block::Line(inlines)) = blocks.last_mut() {
        trim_inlines_end(inlines);
        if !inlines.is_empty() {
            break;
        }
        blocks.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn strong(s: &str) -> Inline {
        Inline::Strong(s.to_string())
    }

    #[test]
    fn test_bold_pairs_are_wrapped() {
        let markup = render("a **b** c **d** e");
        assert_eq!(
            markup.blocks(),
            &[Block::Line(vec![
                text("a "),
                strong("b"),
                text(" c "),
                strong("d"),
                text(" e"),
            ])]
        );
        assert_eq!(
            markup.to_html(),
            "a <strong>b</strong> c <strong>d</strong> e"
        );
    }

    #[test]
    fn test_text_without_markers_has_no_strong_spans() {
        let markup = render("plain words\n* listed\n\ntrailing");
        let has_strong = markup.blocks().iter().any(|block| match block {
            Block::Line(inlines) => inlines.iter().any(|i| matches!(i, Inline::Strong(_))),
            Block::List(items) => items
                .iter()
                .flatten()
                .any(|i| matches!(i, Inline::Strong(_))),
        });
        assert!(!has_strong);
        assert_eq!(
            markup.to_html(),
            "plain words\n<ul><li>listed</li></ul>\ntrailing"
        );
    }

    #[test]
    fn test_list_grouping() {
        let markup = render("x\n* one\n* two\ny");
        assert_eq!(
            markup.blocks(),
            &[
                Block::Line(vec![text("x")]),
                Block::List(vec![vec![text("one")], vec![text("two")]]),
                Block::Line(vec![text("y")]),
            ]
        );
        assert_eq!(markup.to_html(), "x\n<ul><li>one</li><li>two</li></ul>y");
    }

    #[test]
    fn test_unclosed_list_at_end_of_input() {
        let markup = render("* only");
        assert_eq!(markup.blocks(), &[Block::List(vec![vec![text("only")]])]);
        assert_eq!(markup.to_html(), "<ul><li>only</li></ul>");
    }

    #[test]
    fn test_separate_runs_make_separate_lists() {
        let markup = render("* a\nbreak\n* b");
        assert_eq!(
            markup.to_html(),
            "<ul><li>a</li></ul>break\n<ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_indented_list_marker() {
        assert_eq!(render("   * spaced   ").to_html(), "<ul><li>spaced</li></ul>");
    }

    #[test]
    fn test_bare_star_is_not_a_list_item() {
        // "* " trims down to "*", which no longer carries the marker
        assert_eq!(render("a\n* \nb").to_html(), "a\n* \nb");
    }

    #[test]
    fn test_whitespace_only_line_is_preserved() {
        let markup = render("first\n   \nsecond");
        assert_eq!(
            markup.blocks(),
            &[
                Block::Line(vec![text("first")]),
                Block::Line(vec![text("   ")]),
                Block::Line(vec![text("second")]),
            ]
        );
        assert_eq!(markup.to_html(), "first\n   \nsecond");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(render("\n\n  hello  \n\n").to_html(), "hello");
        assert!(render("   \n \n").is_empty());
    }

    #[test]
    fn test_unmatched_marker_is_literal() {
        assert_eq!(render("a ** b").to_html(), "a ** b");
        assert_eq!(render("**open").to_html(), "**open");
    }

    #[test]
    fn test_bold_does_not_cross_lines() {
        assert_eq!(
            render("**a\n* b**").to_html(),
            "**a\n<ul><li>b**</li></ul>"
        );
    }

    #[test]
    fn test_bold_is_non_greedy_and_leftmost() {
        assert_eq!(lex_bold("***a**"), vec![strong("*a")]);
        assert_eq!(lex_bold("****"), vec![strong("")]);
        assert_eq!(
            lex_bold("**a** **b**"),
            vec![strong("a"), text(" "), strong("b")]
        );
    }

    #[test]
    fn test_bold_inside_list_item() {
        let markup = render("* **Fever**: rest\n* fluids");
        assert_eq!(
            markup.blocks(),
            &[Block::List(vec![
                vec![strong("Fever"), text(": rest")],
                vec![text("fluids")],
            ])]
        );
    }

    #[test]
    fn test_bold_wrapping_marker_is_not_a_list_item() {
        // The list test runs on the bold-substituted line
        assert_eq!(
            render("** * item**").to_html(),
            "<strong> * item</strong>"
        );
    }

    #[test]
    fn test_multibyte_text_passes_through() {
        assert_eq!(
            render("café **naïve** ✓").to_html(),
            "café <strong>naïve</strong> ✓"
        );
    }
}

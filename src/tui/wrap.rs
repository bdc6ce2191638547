//! Word wrapping for styled text.
//!
//! `textwrap` decides where lines break using the plain content of a line;
//! the breaks are then mapped back onto the styled spans by byte offset.
//! Leading prefix spans (quote and code bars) are kept out of the wrap and
//! repeated on every row.

use ratatui::text::{Line, Span, Text};
use textwrap::WordSeparator;
use textwrap::core::break_words;
use textwrap::wrap_algorithms::wrap_first_fit;

/// How one rendered line is fitted to the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Word-wrap; the first `prefix` spans start every row.
    Wrap { prefix: usize },
    /// Leave whole. The frame clips whatever runs past the edge.
    Clip,
}

/// Fit every line of `text` to at most `width` columns.
///
/// `fits[i]` applies to line `i`; lines past the end of `fits` wrap with no
/// prefix. Words longer than the room left are split. A width of 0 disables
/// wrapping.
pub fn wrap_text(text: Text<'static>, fits: &[Fit], width: u16) -> Text<'static> {
    if width == 0 {
        return text;
    }
    let Text {
        lines,
        style,
        alignment,
    } = text;
    let mut out = Text::default().style(style);
    out.alignment = alignment;
    for (i, line) in lines.into_iter().enumerate() {
        match fits.get(i).copied().unwrap_or(Fit::Wrap { prefix: 0 }) {
            Fit::Wrap { prefix } => out.lines.extend(wrap_line(line, prefix, width as usize)),
            Fit::Clip => out.lines.push(line),
        }
    }
    out
}

fn wrap_line(line: Line<'static>, prefix: usize, width: usize) -> Vec<Line<'static>> {
    if line.width() <= width {
        return vec![line];
    }

    let Line {
        spans,
        style,
        alignment,
    } = line;
    let split = prefix.min(spans.len());
    let head_width: usize = spans[..split].iter().map(|s| s.width()).sum();
    // A prefix that leaves no room is wrapped along with the content
    let (head, body, room) = if head_width < width {
        (&spans[..split], &spans[split..], width - head_width)
    } else {
        (&spans[..0], &spans[..], width)
    };

    let plain: String = body.iter().map(|s| s.content.as_ref()).collect();
    let words = break_words(WordSeparator::AsciiSpace.find_words(&plain), room);
    let rows = wrap_first_fit(&words, &[room as f64]);

    // Byte range of each row, without the whitespace it ends on
    let mut ranges = Vec::with_capacity(rows.len());
    let mut offset = 0;
    for row in rows {
        let start = offset;
        let mut end = start;
        for word in row {
            end = offset + word.word.len();
            offset += word.word.len() + word.whitespace.len();
        }
        ranges.push((start, end));
    }

    ranges
        .into_iter()
        .map(|(start, end)| {
            let mut row = head.to_vec();
            row.extend(slice_spans(body, start, end));
            let mut wrapped = Line::from(row).style(style);
            wrapped.alignment = alignment;
            wrapped
        })
        .collect()
}

/// Cut the `start..end` byte range (of the concatenated content) out of `spans`.
fn slice_spans(spans: &[Span<'static>], start: usize, end: usize) -> Vec<Span<'static>> {
    let mut out = Vec::new();
    let mut offset = 0;
    for span in spans {
        let len = span.content.len();
        let from = start.max(offset);
        let to = end.min(offset + len);
        if from < to {
            out.push(Span::styled(
                span.content[from - offset..to - offset].to_string(),
                span.style,
            ));
        }
        offset += len;
    }
    out
}

//! Line-to-paragraph merging.
//!
//! Lines of a block are walked in source order. Each line either continues
//! the paragraph being accumulated or closes it and starts a new one. The
//! decision looks at the last span of the previous line (trailing tab,
//! sentence punctuation, space, hyphen, comma) and at the first span of the
//! new line (same style, lowercase start).
//!
//! Alongside plain text, each paragraph carries inline HTML with one
//! `<span class="STYLE">` per style run and a per-style character tally.

use indexmap::IndexMap;
use serde::Serialize;

use crate::geometry::BBox;
use crate::layout::text_block::{Block, Line, Span};
use crate::text::style::StyleCatalog;

/// Separator that replaces tab characters in paragraph text.
pub const TAB_SEPARATOR: &str = "|";

/// A reconstructed paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    /// `"{block_number}_{first_line_number}"`
    pub id: String,
    /// Page the paragraph was found on
    pub page: u32,
    /// Source block number
    pub block_number: u32,
    /// Line number of the first merged line
    pub first_line_number: u32,
    /// Reading order rank of the owning column
    pub column_order: u32,
    /// Display order within the page, assigned after all blocks are merged
    pub order: u32,
    /// Union of the merged lines' bounding boxes
    pub bbox: BBox,
    /// Plain text, tabs replaced by `|`
    pub src_text: String,
    /// Inline HTML with one span per style run
    pub src_html: String,
    /// Style key with the most characters
    pub base_style: String,
    /// Characters per style key, in first-seen order
    pub style_char_counts: IndexMap<String, usize>,
}

/// Outcome of the continuation test between two consecutive lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Both lines start at the same y
    SameBaseline,
    /// Previous text ends with a tab
    TrailingTab,
    /// Previous text ends a sentence with `.`, `!` or `?`
    SentenceEnd,
    /// Previous text ends with a space
    TrailingSpace,
    /// Previous text ends with a hyphen
    TrailingHyphen,
    /// Previous text ends with a comma
    TrailingComma,
    /// Same style and the new line starts lowercase: a wrapped word
    WrappedWord,
    /// No rule matched
    Break,
}

impl Continuation {
    /// Whether the new line extends the current paragraph.
    pub fn continues(self) -> bool {
        !matches!(self, Continuation::SentenceEnd | Continuation::Break)
    }
}

/// Classify how `next` relates to the paragraph whose last line is `prev_line`.
///
/// `prev_style` is the style key of `prev_span`, the last span of the
/// previous line; `next_style` is the style key of `next`'s first span.
pub fn classify_continuation(
    prev_line: &Line,
    prev_span: &Span,
    prev_style: &str,
    next: &Line,
    next_style: &str,
) -> Continuation {
    let text = prev_span.text.as_str();

    if prev_line.bbox.y0 == next.bbox.y0 {
        return Continuation::SameBaseline;
    }
    if text.ends_with('\t') {
        return Continuation::TrailingTab;
    }
    if text.trim_end().ends_with(['.', '!', '?']) {
        return Continuation::SentenceEnd;
    }
    if text.ends_with(' ') {
        return Continuation::TrailingSpace;
    }
    if text.ends_with('-') {
        return Continuation::TrailingHyphen;
    }
    if text.ends_with(',') {
        return Continuation::TrailingComma;
    }

    let starts_lowercase = next
        .spans
        .first()
        .and_then(|s| s.text.chars().next())
        .is_some_and(char::is_lowercase);
    if prev_style == next_style && starts_lowercase {
        return Continuation::WrappedWord;
    }

    Continuation::Break
}

/// Escape text for inclusion in HTML.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[derive(Debug)]
struct Accumulating {
    id: String,
    page: u32,
    block_number: u32,
    first_line_number: u32,
    column_order: u32,
    bbox: BBox,
    src_text: String,
    src_html: String,
    current_style: Option<String>,
    counts: IndexMap<String, usize>,
    last_line: Line,
    last_style: String,
}

/// Paragraph under construction.
///
/// Idle until [`ParagraphBuilder::start`]; [`ParagraphBuilder::close`] hands
/// out the finished paragraph and returns the builder to idle.
#[derive(Debug, Default)]
pub struct ParagraphBuilder {
    current: Option<Accumulating>,
}

impl ParagraphBuilder {
    /// Create an idle builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no paragraph is being accumulated.
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Begin a paragraph at `line`, the `line_number`-th line of its block.
    ///
    /// A paragraph still in progress is closed first and returned.
    pub fn start(
        &mut self,
        page: u32,
        block_number: u32,
        line_number: u32,
        column_order: u32,
        line: &Line,
        catalog: &mut StyleCatalog,
    ) -> Option<Paragraph> {
        let previous = self.close();
        self.current = Some(Accumulating {
            id: format!("{}_{}", block_number, line_number),
            page,
            block_number,
            first_line_number: line_number,
            column_order,
            bbox: line.bbox,
            src_text: String::new(),
            src_html: String::new(),
            current_style: None,
            counts: IndexMap::new(),
            last_line: line.clone(),
            last_style: String::new(),
        });
        self.append(line, false, catalog);
        previous
    }

    /// Append `line` to the paragraph in progress.
    ///
    /// With `leading_space`, a space is prepended to the first span's text.
    /// Does nothing when idle.
    pub fn append(&mut self, line: &Line, leading_space: bool, catalog: &mut StyleCatalog) {
        let Some(acc) = self.current.as_mut() else {
            return;
        };

        acc.bbox = acc.bbox.union(&line.bbox);

        for (idx, span) in line.spans.iter().enumerate() {
            let text = if idx == 0 && leading_space {
                format!(" {}", span.text)
            } else {
                span.text.clone()
            };
            let style = catalog.resolve(&span.font, span.size);

            acc.src_text.push_str(&text.replace('\t', TAB_SEPARATOR));

            if acc.current_style.as_deref() != Some(style.as_str()) {
                acc.src_html.push_str(&format!("</span><span class=\"{}\">", style));
                acc.current_style = Some(style.clone());
            }
            let tab_boundary = format!("</span>{}<span class=\"{}\">", TAB_SEPARATOR, style);
            acc.src_html.push_str(&escape_html(&text).replace('\t', &tab_boundary));

            *acc.counts.entry(style.clone()).or_insert(0) += text.chars().count();
            acc.last_style = style;
        }

        acc.last_line = line.clone();
    }

    /// Classify how `line` relates to the paragraph in progress.
    ///
    /// Returns `None` when idle or when `line` has no spans.
    pub fn continuation(&self, line: &Line, catalog: &mut StyleCatalog) -> Option<Continuation> {
        let acc = self.current.as_ref()?;
        let prev_span = acc.last_line.spans.last()?;
        let first = line.spans.first()?;
        let next_style = catalog.resolve(&first.font, first.size);
        Some(classify_continuation(
            &acc.last_line,
            prev_span,
            &acc.last_style,
            line,
            &next_style,
        ))
    }

    /// Finish the paragraph in progress and return to idle.
    pub fn close(&mut self) -> Option<Paragraph> {
        let acc = self.current.take()?;

        let mut base_style = String::new();
        let mut best = 0usize;
        for (key, &count) in &acc.counts {
            if base_style.is_empty() || count > best {
                base_style = key.clone();
                best = count;
            }
        }

        let mut src_html = match acc.src_html.strip_prefix("</span>") {
            Some(rest) => rest.to_string(),
            None => acc.src_html,
        };
        if !src_html.is_empty() {
            src_html.push_str("</span>");
        }

        Some(Paragraph {
            id: acc.id,
            page: acc.page,
            block_number: acc.block_number,
            first_line_number: acc.first_line_number,
            column_order: acc.column_order,
            order: 0,
            bbox: acc.bbox,
            src_text: acc.src_text,
            src_html,
            base_style,
            style_char_counts: acc.counts,
        })
    }
}

/// Merges the lines of blocks into paragraphs.
///
/// Borrows the document's [`StyleCatalog`] so that every paragraph of a run
/// shares one set of style keys.
#[derive(Debug)]
pub struct ParagraphMerger<'a> {
    catalog: &'a mut StyleCatalog,
}

impl<'a> ParagraphMerger<'a> {
    /// Create a merger registering styles in `catalog`.
    pub fn new(catalog: &'a mut StyleCatalog) -> Self {
        Self { catalog }
    }

    /// Merge one block's lines into paragraphs keyed by id.
    ///
    /// Ids are `"{block.number}_{index}"` where `index` is the position of the
    /// paragraph's first line in `block.lines`. Line numbers carried by the
    /// input are not trusted: extractor dumps often leave them at zero.
    ///
    /// Lines without spans are skipped: they neither extend nor break the
    /// paragraph in progress. A block without any spans yields no paragraphs.
    ///
    /// # Examples
    ///
    /// ```
    /// use paraflow::geometry::BBox;
    /// use paraflow::layout::text_block::{Block, Line, Span};
    /// use paraflow::text::paragraph::ParagraphMerger;
    /// use paraflow::text::style::StyleCatalog;
    ///
    /// let first = Line::new(BBox::new(0.0, 0.0, 200.0, 10.0), vec![Span::new("This is a long-", "Times", 10.0)]);
    /// let second = Line::new(BBox::new(0.0, 12.0, 200.0, 22.0), vec![Span::new("winded sentence.", "Times", 10.0)]);
    /// let third = Line::new(BBox::new(0.0, 24.0, 200.0, 34.0), vec![Span::new("Another one.", "Times", 10.0)]);
    /// let block = Block::new(3, BBox::new(0.0, 0.0, 200.0, 34.0), vec![first, second, third]);
    ///
    /// let mut catalog = StyleCatalog::new();
    /// let paragraphs = ParagraphMerger::new(&mut catalog).merge_block(1, 1, &block);
    /// assert_eq!(paragraphs["3_0"].src_text, "This is a long-winded sentence.");
    /// assert_eq!(paragraphs["3_2"].src_text, "Another one.");
    /// ```
    pub fn merge_block(
        &mut self,
        page: u32,
        column_order: u32,
        block: &Block,
    ) -> IndexMap<String, Paragraph> {
        let mut paragraphs = IndexMap::new();
        let mut builder = ParagraphBuilder::new();

        for (idx, line) in block.lines.iter().enumerate().filter(|(_, l)| !l.is_empty()) {
            let line_number = idx as u32;
            let rule = builder.continuation(line, self.catalog);
            match rule {
                Some(rule) if rule.continues() => {
                    log::trace!("Line {}_{} continues ({:?})", block.number, line_number, rule);
                    let leading_space = rule == Continuation::WrappedWord;
                    builder.append(line, leading_space, self.catalog);
                },
                _ => {
                    if let Some(rule) = rule {
                        log::trace!("Line {}_{} starts a paragraph ({:?})", block.number, line_number, rule);
                    }
                    let closed =
                        builder.start(page, block.number, line_number, column_order, line, self.catalog);
                    if let Some(p) = closed {
                        paragraphs.insert(p.id.clone(), p);
                    }
                },
            }
        }

        if let Some(p) = builder.close() {
            paragraphs.insert(p.id.clone(), p);
        }

        paragraphs
    }
}

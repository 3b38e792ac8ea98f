//! Markdown parser for terminal rendering
//!
//! Converts article markdown to styled ratatui Lines. Handles headings, code
//! blocks, inline code, emphasis, lists, block quotes, links and tables.
//! Prose is reflowed by the paragraph widget, so soft breaks become spaces and
//! paragraphs are separated by one blank line.

mod outline;
mod styles;

pub use outline::{extract_headings, Heading, OUTLINE_MAX_LEVEL};
pub use styles::heading_style;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use styles::{
    STYLE_CODE_BLOCK, STYLE_INLINE_CODE, STYLE_LINK, STYLE_QUOTE, STYLE_TABLE_BORDER,
    STYLE_TABLE_HEADER,
};

/// Render markdown text to a vector of styled Lines.
///
/// Gracefully handles incomplete markdown during streaming by rendering
/// partial content without crashing.
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut renderer = Renderer::default();
    for event in Parser::new_ext(text, options) {
        renderer.handle(event);
    }
    renderer.finish()
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    /// `None` for bullet lists, `Some(next number)` for ordered lists
    list_stack: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
    table: Option<TableState>,
}

#[derive(Default)]
struct TableState {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

impl Renderer {
    fn style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, f: impl FnOnce(Style) -> Style) {
        let next = f(self.style());
        self.style_stack.push(next);
    }

    fn flush_line(&mut self) {
        if !self.spans.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.lines.push(Line::from(spans));
        }
    }

    /// Blank separator line before a new block, never doubled and never first.
    fn block_gap(&mut self) {
        self.flush_line();
        if !self.list_stack.is_empty() {
            return;
        }
        if self
            .lines
            .last()
            .is_some_and(|line| !line.spans.is_empty())
        {
            self.lines.push(Line::default());
        }
    }

    fn start_line_prefix(&mut self) {
        if self.quote_depth > 0 && self.spans.is_empty() {
            self.spans
                .push(Span::styled("│ ".repeat(self.quote_depth), STYLE_QUOTE));
        }
    }

    fn push_text(&mut self, text: &str, style: Style) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
            return;
        }
        self.start_line_prefix();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    let style = self.style();
                    let mut first = true;
                    for line in text.split('\n') {
                        if !first {
                            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
                        }
                        first = false;
                        if !line.is_empty() {
                            self.spans.push(Span::styled(format!("  {}", line), style));
                        }
                    }
                } else {
                    let style = self.style();
                    self.push_text(&text, style);
                }
            }
            Event::Code(code) => self.push_text(&code, STYLE_INLINE_CODE),
            Event::SoftBreak => {
                let style = self.style();
                self.push_text(" ", style);
            }
            Event::HardBreak => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.push(' ');
                } else {
                    self.flush_line();
                }
            }
            Event::Rule => {
                self.block_gap();
                self.lines
                    .push(Line::from(Span::styled("─".repeat(40), STYLE_TABLE_BORDER)));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.block_gap();
                let style = heading_style(level as u8);
                self.style_stack.push(style);
            }
            Tag::Paragraph => {
                if self.list_stack.is_empty() {
                    self.block_gap();
                }
            }
            Tag::CodeBlock(_) => {
                self.block_gap();
                self.in_code_block = true;
                self.style_stack.push(STYLE_CODE_BLOCK);
            }
            Tag::BlockQuote(_) => {
                self.block_gap();
                self.quote_depth += 1;
                self.style_stack.push(STYLE_QUOTE);
            }
            Tag::List(start) => {
                if self.list_stack.is_empty() {
                    self.block_gap();
                } else {
                    self.flush_line();
                }
                self.list_stack.push(start);
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.list_stack.len().saturating_sub(1);
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.start_line_prefix();
                self.spans
                    .push(Span::raw(format!("{}{}", "  ".repeat(depth), marker)));
            }
            Tag::Emphasis => self.push_style(|s| s.add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(|s| s.add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.push_style(|s| s.add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { .. } => self.push_style(|s| s.patch(STYLE_LINK)),
            Tag::Table(_) => {
                self.block_gap();
                self.table = Some(TableState::default());
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.clear();
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.flush_line();
                self.style_stack.pop();
            }
            TagEnd::Paragraph => self.flush_line(),
            TagEnd::CodeBlock => {
                self.flush_line();
                self.in_code_block = false;
                self.style_stack.pop();
            }
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.style_stack.pop();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.list_stack.pop();
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.style_stack.pop();
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell);
                }
            }
            TagEnd::TableHead | TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    if !table.row.is_empty() {
                        let row = std::mem::take(&mut table.row);
                        table.rows.push(row);
                    }
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    render_table_to_lines(&table.rows, &mut self.lines);
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        // An unterminated table mid-stream is still shown.
        if let Some(table) = self.table.take() {
            let mut rows = table.rows;
            if !table.row.is_empty() {
                rows.push(table.row);
            }
            render_table_to_lines(&rows, &mut self.lines);
        }
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.lines
    }
}

/// Render a table with box-drawing borders; the first row is the header.
fn render_table_to_lines(table_rows: &[Vec<String>], lines: &mut Vec<Line<'static>>) {
    let num_cols = table_rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if num_cols == 0 {
        return;
    }

    let mut col_widths: Vec<usize> = vec![3; num_cols];
    for row in table_rows {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(unicode_width::UnicodeWidthStr::width(cell.trim()));
        }
    }

    lines.push(Line::from(Span::styled(
        build_table_border(&col_widths, '┌', '┬', '┐'),
        STYLE_TABLE_BORDER,
    )));

    for (row_idx, row) in table_rows.iter().enumerate() {
        let style = if row_idx == 0 {
            STYLE_TABLE_HEADER
        } else {
            Style::default()
        };
        let mut spans: Vec<Span<'static>> = vec![Span::styled("│", STYLE_TABLE_BORDER)];
        for (col_idx, width) in col_widths.iter().enumerate() {
            let content = row.get(col_idx).map(|c| c.trim()).unwrap_or("");
            let pad = width.saturating_sub(unicode_width::UnicodeWidthStr::width(content));
            spans.push(Span::styled(
                format!(" {}{} ", content, " ".repeat(pad)),
                style,
            ));
            spans.push(Span::styled("│", STYLE_TABLE_BORDER));
        }
        lines.push(Line::from(spans));

        if row_idx == 0 && table_rows.len() > 1 {
            lines.push(Line::from(Span::styled(
                build_table_border(&col_widths, '├', '┼', '┤'),
                STYLE_TABLE_BORDER,
            )));
        }
    }

    lines.push(Line::from(Span::styled(
        build_table_border(&col_widths, '└', '┴', '┘'),
        STYLE_TABLE_BORDER,
    )));
}

/// Build a table border line with the given corner and junction characters.
fn build_table_border(col_widths: &[usize], left: char, middle: char, right: char) -> String {
    let inner: Vec<String> = col_widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, inner.join(&middle.to_string()), right)
}

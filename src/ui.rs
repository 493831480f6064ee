pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    evaluator::{mark, CharMark},
    session::{Status, TestMode},
    stats::wpm_series,
    typing_test::TestView,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
/// lines of words shown while typing
const WORD_LINES: u16 = 3;
/// committed words kept on screen before the active one
const WORDS_BEHIND: usize = 3;

const LEGEND: &str = "(tab) restart / (esc) quit";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.test.status() {
            Status::Idle | Status::Running => render_typing(self, area, buf),
            Status::Finished => render_results(self, area, buf),
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let test = &app.test;
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let padding = area.height.saturating_sub(WORD_LINES + 3) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding),
            Constraint::Length(2),
            Constraint::Length(WORD_LINES),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let progress = match test.config().mode() {
        TestMode::FixedDuration { .. } => {
            format!("{:.0}", test.seconds_remaining().unwrap_or_default())
        }
        TestMode::FixedWordCount { words } => {
            let done = match test.status() {
                Status::Idle => 0,
                _ => test.state().active_index,
            };
            format!("{done}/{words}")
        }
    };
    let header = if test.status() == Status::Idle {
        format!("{progress}   start typing")
    } else {
        progress
    };
    Paragraph::new(Span::styled(header, dim_bold_style))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let budget = chunks[2].width as usize * WORD_LINES as usize;
    Paragraph::new(Line::from(word_spans(&test.view(), budget)))
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(LEGEND, italic_style)).render(chunks[4], buf);
}

/// Styled spans for the words around the active one, up to `budget` columns.
fn word_spans<'a>(view: &TestView<'a>, budget: usize) -> Vec<Span<'a>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = bold_style.add_modifier(Modifier::DIM);
    let correct_style = bold_style.fg(Color::Green);
    let incorrect_style = bold_style.fg(Color::Red);
    let extra_style = incorrect_style.add_modifier(Modifier::DIM);

    let first = view.active_index.saturating_sub(WORDS_BEHIND);
    let mut used = 0;
    let mut spans = Vec::new();

    for (idx, word) in view.words.iter().enumerate().skip(first) {
        let width = word.width().max(view.current_input.width()) + 1;
        if used + width > budget && idx > view.active_index {
            break;
        }
        used += width;

        if idx != view.active_index {
            spans.push(Span::styled(word.as_str(), dim_style));
            spans.push(Span::raw(" "));
            continue;
        }

        let caret = view.current_input.chars().count();
        for (pos, (c, char_mark)) in mark(word, view.current_input).into_iter().enumerate() {
            let shown = if c == ' ' { '·' } else { c };
            let mut style = match char_mark {
                CharMark::Correct => correct_style,
                CharMark::Incorrect => incorrect_style,
                CharMark::Extra => extra_style,
                CharMark::Pending => dim_style,
            };
            if pos == caret && view.status != Status::Finished {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(shown.to_string(), style));
        }
        let separator_style = if caret >= word.chars().count() && view.status != Status::Finished {
            dim_style.add_modifier(Modifier::UNDERLINED)
        } else {
            dim_style
        };
        spans.push(Span::styled(" ", separator_style));
    }

    spans
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let test = &app.test;
    let stats = test.stats();
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let magenta_style = Style::default().fg(Color::Magenta);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // headline stats
            Constraint::Length(1), // detail stats
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let points = wpm_series(&test.state().wpm_samples);
    let (span, highest_wpm) =
        charting::compute_chart_params(&points, test.config().duration_secs().map(|s| s as f64));
    let tuples: Vec<(f64, f64)> = points.iter().copied().map(Into::into).collect();
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(&tuples)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, span])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(span), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm.max(1.0)])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_wpm), bold_style),
                ]),
        )
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "{:.0} wpm   {:.0}% acc   {:.0}% consistency",
            stats.net_wpm, stats.accuracy, stats.consistency
        ),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!(
            "{:.0} raw   {} correct   {} incorrect   {:.1}s",
            stats.raw_wpm, stats.correct_chars, stats.incorrect_chars, stats.elapsed_secs
        ),
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(LEGEND, italic_style)).render(chunks[4], buf);
}

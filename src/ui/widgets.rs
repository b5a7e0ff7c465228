//! Custom TUI widgets

use super::theme::ThemeColors;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Status of a stat line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    Ok,
    Warning,
    Info,
}

/// A single label/value line in the stats panel
#[derive(Debug, Clone)]
pub struct StatLine {
    pub label: String,
    pub value: String,
    pub status: LineStatus,
}

impl StatLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>, status: LineStatus) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            status,
        }
    }

    pub fn ok(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, LineStatus::Ok)
    }

    pub fn warning(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, LineStatus::Warning)
    }

    pub fn info(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, LineStatus::Info)
    }
}

/// Widget for displaying drill stats
pub struct StatsPanel<'a> {
    lines: &'a [StatLine],
    title: &'a str,
    colors: ThemeColors,
}

impl<'a> StatsPanel<'a> {
    pub fn new(lines: &'a [StatLine], title: &'a str, colors: ThemeColors) -> Self {
        Self {
            lines,
            title,
            colors,
        }
    }

    fn status_color(&self, status: LineStatus) -> Color {
        match status {
            LineStatus::Ok => self.colors.correct,
            LineStatus::Warning => self.colors.next,
            LineStatus::Info => self.colors.accent,
        }
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.colors.dim));

        let inner = block.inner(area);
        block.render(area, buf);

        for (line, y) in self.lines.iter().zip(inner.y..inner.y + inner.height) {
            let color = self.status_color(line.status);
            let text = Line::from(vec![
                Span::styled(
                    format!("{}: ", line.label),
                    Style::default().fg(self.colors.fg).add_modifier(Modifier::BOLD),
                ),
                Span::styled(&line.value, Style::default().fg(color)),
            ]);
            buf.set_line(inner.x, y, &text, inner.width);
        }
    }
}

/// The text being practised, with typed, current and upcoming characters
pub struct TargetLine<'a> {
    target: &'a [char],
    position: usize,
    /// Hide characters from `position` onwards (reveal drill)
    visible: Option<usize>,
    colors: ThemeColors,
}

impl<'a> TargetLine<'a> {
    pub fn new(target: &'a [char], position: usize, colors: ThemeColors) -> Self {
        Self {
            target,
            position,
            visible: None,
            colors,
        }
    }

    /// Only the first `count` characters are shown, the rest become dots
    pub fn visible(mut self, count: usize) -> Self {
        self.visible = Some(count);
        self
    }
}

impl Widget for TargetLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .target
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if self.visible.is_some_and(|v| i >= v) {
                    return Span::styled("·", Style::default().fg(self.colors.dim));
                }
                let style = if i < self.position {
                    Style::default().fg(self.colors.correct)
                } else if i == self.position {
                    Style::default()
                        .fg(self.colors.next)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(self.colors.fg)
                };
                Span::styled(c.to_string(), style)
            })
            .collect();

        buf.set_line(area.x + 1, area.y, &Line::from(spans), area.width.saturating_sub(1));
    }
}

/// Widget for the help screen
pub struct HelpPanel;

impl Widget for HelpPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Help - Key Highlight")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        let help_text = [
            "",
            " NAVIGATION",
            " -----------",
            " Tab / Shift+Tab  : Switch between drills",
            " Esc              : Quit",
            "",
            " CONTROLS",
            " -----------",
            " F1               : Show this help",
            " F2               : Restart current drill",
            " F3               : Restart all drills",
            " F4               : Export letter drill report to JSON",
            " Backspace        : Clear the lit zone (Zones drill)",
            "",
            " DRILLS",
            " -----------",
            " Letters          : Type the text, the next key glows",
            " Words            : Type each word one key at a time",
            " Zones            : Press any key to light its zone",
            " Reveal           : Keys appear one by one",
        ];

        for (i, line) in help_text.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let style = if line.contains("---") {
                Style::default().fg(Color::DarkGray)
            } else if line.chars().nth(1).is_some_and(|c| c.is_uppercase())
                && !line.contains(':')
            {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            buf.set_string(inner.x, inner.y + i as u16, line, style);
        }
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    view: &'a str,
    elapsed: &'a str,
    presses: u64,
    message: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(view: &'a str, elapsed: &'a str, presses: u64) -> Self {
        Self {
            view,
            elapsed,
            presses,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.x..area.x + area.width {
            buf.set_string(x, area.y, " ", bg_style);
        }

        let left = format!(" {} ", self.view);
        buf.set_string(area.x, area.y, &left, bg_style.add_modifier(Modifier::BOLD));

        if let Some(msg) = self.message {
            let msg_style = Style::default().bg(Color::DarkGray).fg(Color::Yellow);
            let msg_x = area.x + (area.width / 2).saturating_sub(msg.len() as u16 / 2);
            buf.set_string(msg_x, area.y, msg, msg_style);
        }

        let right = format!(" {} | Keys: {} ", self.elapsed, self.presses);
        let right_x = area.x + area.width.saturating_sub(right.len() as u16);
        buf.set_string(right_x, area.y, &right, bg_style);
    }
}

/// Tab bar widget
pub struct TabBar<'a> {
    tabs: &'a [&'a str],
    selected: usize,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: &'a [&'a str], selected: usize) -> Self {
        Self { tabs, selected }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut x = area.x;

        for (i, tab) in self.tabs.iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            };

            let label = format!(" {} ", tab);
            let width = label.len() as u16;

            if x + width <= area.x + area.width {
                buf.set_string(x, area.y, &label, style);
                x += width;

                if i < self.tabs.len() - 1 && x < area.x + area.width {
                    buf.set_string(x, area.y, "|", Style::default().fg(Color::DarkGray));
                    x += 1;
                }
            }
        }

        for fill_x in x..area.x + area.width {
            buf.set_string(fill_x, area.y, " ", Style::default().bg(Color::DarkGray));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn target_line_marks_current_character() {
        let colors = ThemeColors::dark();
        let target: Vec<char> = "cat".chars().collect();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        TargetLine::new(&target, 1, colors).render(area, &mut buf);

        assert_eq!(row(&buf, 0).trim_end(), " cat");
        assert_eq!(buf[(1, 0)].fg, colors.correct);
        assert_eq!(buf[(2, 0)].fg, colors.next);
        assert!(buf[(2, 0)].modifier.contains(Modifier::UNDERLINED));
        assert_eq!(buf[(3, 0)].fg, colors.fg);
    }

    #[test]
    fn target_line_hides_unrevealed() {
        let target: Vec<char> = "dog".chars().collect();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        TargetLine::new(&target, 0, ThemeColors::dark())
            .visible(1)
            .render(area, &mut buf);

        assert_eq!(row(&buf, 0).trim_end(), " d··");
    }

    #[test]
    fn stats_panel_lists_lines() {
        let lines = vec![StatLine::ok("Correct", "3"), StatLine::warning("Mistakes", "1")];
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        StatsPanel::new(&lines, "Stats", ThemeColors::dark()).render(area, &mut buf);

        assert!(row(&buf, 1).contains("Correct: 3"));
        assert!(row(&buf, 2).contains("Mistakes: 1"));
    }

    #[test]
    fn tab_bar_renders_all_tabs() {
        let tabs = ["Letters", "Words"];
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        TabBar::new(&tabs, 1).render(area, &mut buf);

        assert!(row(&buf, 0).starts_with(" Letters | Words "));
    }

    #[test]
    fn status_bar_shows_view_and_presses() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new("Zones", "01:05", 12).render(area, &mut buf);

        let text = row(&buf, 0);
        assert!(text.starts_with(" Zones "));
        assert!(text.trim_end().ends_with("01:05 | Keys: 12"));
    }
}

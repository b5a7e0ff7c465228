//! Visual keyboard layout rendering

use super::theme::ThemeColors;
use crate::highlight::{zones, Zone};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Letter rows of the QWERTY board with their left indent in cells
const ROWS: [(&str, u16); 3] = [("qwertyuiop", 0), ("asdfghjkl;", 1), ("zxcvbnm,./", 3)];

/// Everything the keyboard needs to know to colour its keys
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyHighlights<'a> {
    pub next_key: Option<char>,
    pub pressed_key: Option<char>,
    pub correct_keys: &'a [char],
    pub incorrect_keys: &'a [char],
    pub zone: Option<Zone>,
    /// When set, only these keys are labelled
    pub revealed: Option<&'a [char]>,
}

/// How a single key is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLook {
    Pressed,
    Next,
    Incorrect,
    Zone,
    Correct,
    Idle,
}

impl KeyHighlights<'_> {
    /// Pick the look for `key`, most urgent signal first.
    ///
    /// Board keys are lowercase, so highlighted characters are folded
    /// before comparing; a case-sensitive `'C'` still lights `c`.
    pub fn look(&self, key: char) -> KeyLook {
        let fold = |c: char| c.to_ascii_lowercase();
        let key = fold(key);
        let lit = |keys: &[char]| keys.iter().any(|&c| fold(c) == key);

        if self.pressed_key.map(fold) == Some(key) {
            KeyLook::Pressed
        } else if self.next_key.map(fold) == Some(key) {
            KeyLook::Next
        } else if lit(self.incorrect_keys) {
            KeyLook::Incorrect
        } else if self.zone.is_some_and(|z| zones::is_key_in_zone(key, z)) {
            KeyLook::Zone
        } else if lit(self.correct_keys) {
            KeyLook::Correct
        } else {
            KeyLook::Idle
        }
    }

    fn is_labelled(&self, key: char) -> bool {
        self.revealed
            .is_none_or(|keys| keys.iter().any(|c| c.eq_ignore_ascii_case(&key)))
    }
}

/// Visual representation of a keyboard
pub struct KeyboardVisual<'a> {
    highlights: KeyHighlights<'a>,
    colors: ThemeColors,
}

impl<'a> KeyboardVisual<'a> {
    pub fn new(highlights: KeyHighlights<'a>, colors: ThemeColors) -> Self {
        Self { highlights, colors }
    }

    fn key_style(&self, key: char) -> Style {
        let c = &self.colors;
        let (bg, fg, bold): (Color, Color, bool) = match self.highlights.look(key) {
            KeyLook::Pressed => (c.pressed, c.key_text_on, true),
            KeyLook::Next => (c.next, c.key_text_on, true),
            KeyLook::Incorrect => (c.incorrect, c.key_text_on, false),
            KeyLook::Zone => (c.zone, c.key_text_on, false),
            KeyLook::Correct => (c.correct, c.key_text_on, false),
            KeyLook::Idle => (c.key_off, c.key_text, false),
        };
        let style = Style::default().fg(fg).bg(bg);
        if bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    fn render_key(&self, buf: &mut Buffer, area: Rect, x: u16, y: u16, key: char, w: u16) {
        let label = if key == ' ' {
            "space".to_string()
        } else if self.highlights.is_labelled(key) {
            key.to_uppercase().to_string()
        } else {
            String::new()
        };
        if y < area.y + area.height && x + w <= area.x + area.width {
            buf.set_string(x, y, format!("{:^w$}", label, w = w as usize), self.key_style(key));
        }
    }
}

impl Widget for KeyboardVisual<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 54 || area.height < 4 {
            buf.set_string(
                area.x,
                area.y,
                "⌨ Window too small",
                Style::default().fg(self.colors.fg),
            );
            return;
        }

        let w = 4u16;
        let x0 = area.x + 1;

        for (row, (keys, indent)) in ROWS.iter().enumerate() {
            let y = area.y + row as u16;
            let mut x = x0 + indent;
            for key in keys.chars() {
                self.render_key(buf, area, x, y, key, w);
                x += w + 1;
            }
        }

        let space_x = x0 + 3 + (w + 1) * 2;
        self.render_key(buf, area, space_x, area.y + 3, ' ', (w + 1) * 5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlights<'a>(correct: &'a [char], incorrect: &'a [char]) -> KeyHighlights<'a> {
        KeyHighlights {
            correct_keys: correct,
            incorrect_keys: incorrect,
            ..Default::default()
        }
    }

    #[test]
    fn pressed_beats_next() {
        let mut h = highlights(&[], &[]);
        h.next_key = Some('a');
        h.pressed_key = Some('a');
        assert_eq!(h.look('a'), KeyLook::Pressed);
        h.pressed_key = Some('s');
        assert_eq!(h.look('a'), KeyLook::Next);
    }

    #[test]
    fn incorrect_beats_zone_beats_correct() {
        let mut h = highlights(&['f', 'j'], &['f']);
        h.zone = Some(Zone::Home);
        assert_eq!(h.look('f'), KeyLook::Incorrect);
        assert_eq!(h.look('j'), KeyLook::Zone);
        h.zone = None;
        assert_eq!(h.look('j'), KeyLook::Correct);
        assert_eq!(h.look('q'), KeyLook::Idle);
    }

    #[test]
    fn uppercase_highlights_light_lowercase_keys() {
        let mut h = highlights(&['A'], &['X']);
        h.next_key = Some('C');
        h.pressed_key = Some('T');
        assert_eq!(h.look('c'), KeyLook::Next);
        assert_eq!(h.look('t'), KeyLook::Pressed);
        assert_eq!(h.look('x'), KeyLook::Incorrect);
        assert_eq!(h.look('a'), KeyLook::Correct);
    }

    #[test]
    fn renders_next_key_in_next_colour() {
        let colors = ThemeColors::dark();
        let mut h = highlights(&[], &[]);
        h.next_key = Some('q');

        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        KeyboardVisual::new(h, colors).render(area, &mut buf);

        // 'q' is the first key of the top row, centred label at x = 1 + 1
        assert_eq!(buf[(2, 0)].symbol(), "Q");
        assert_eq!(buf[(2, 0)].bg, colors.next);
        assert_eq!(buf[(7, 0)].symbol(), "W");
        assert_eq!(buf[(7, 0)].bg, colors.key_off);
    }

    #[test]
    fn hidden_keys_lose_their_labels() {
        let colors = ThemeColors::dark();
        let revealed = ['a'];
        let h = KeyHighlights {
            revealed: Some(&revealed),
            ..Default::default()
        };

        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        KeyboardVisual::new(h, colors).render(area, &mut buf);

        // Home row starts one cell further in
        assert_eq!(buf[(3, 1)].symbol(), "A");
        assert_eq!(buf[(8, 1)].symbol(), " ");
    }

    #[test]
    fn small_area_shows_message() {
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        KeyboardVisual::new(KeyHighlights::default(), ThemeColors::dark()).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "⌨");
    }
}

//! Display content model: header, three content lines and a button-hint
//! footer. Rendering lives in [`crate::ui::display`]; this module only
//! decides what the lines say.

use crate::config::{DISPLAY_COLUMNS, DISPLAY_LINES, DISPLAY_LINE_CAPACITY};
use crate::controller::menu::Mode;
use crate::morse::push_truncating;
use crate::morse::translator::decode;
use heapless::String;

pub type Line = String<DISPLAY_LINE_CAPACITY>;

fn line(text: &str) -> Line {
    let mut l = Line::new();
    push_truncating(&mut l, text);
    l
}

/// The last `DISPLAY_COLUMNS` characters of `text`, so the newest
/// symbols stay visible.
fn tail(text: &str) -> &str {
    let skip = text.chars().count().saturating_sub(DISPLAY_COLUMNS);
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screen {
    pub header: Line,
    pub lines: [Line; DISPLAY_LINES],
    pub footer: Line,
}

impl Screen {
    /// Blank screen, usable in statics.
    pub const fn empty() -> Self {
        const BLANK: Line = Line::new();
        Self {
            header: BLANK,
            lines: [BLANK; DISPLAY_LINES],
            footer: BLANK,
        }
    }

    pub fn new(header: &str, footer: &str) -> Self {
        Self {
            header: line(header),
            footer: line(footer),
            ..Self::default()
        }
    }

    /// Replace one content line; out-of-range rows are ignored.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(slot) = self.lines.get_mut(row) {
            *slot = line(text);
        }
    }

    /// Show a message under composition: translation on the first line,
    /// the raw signal tail on the second.
    pub fn set_signal(&mut self, signal: &str) {
        self.set_line(0, decode(signal).as_str());
        self.set_line(1, tail(signal));
    }

    pub fn menu(mode: Mode) -> Self {
        let mut screen = Self::new("-------MENU-------", "switch/-  select/boot");
        let (angle, lux) = match mode {
            Mode::Angle => ("* Angle", "  Lux"),
            Mode::Lux => ("  Angle", "* Lux"),
        };
        screen.set_line(0, angle);
        screen.set_line(1, lux);
        screen
    }

    pub fn compose(mode: Mode, receiving: bool, signal: &str) -> Self {
        let mut screen = match (mode, receiving) {
            (Mode::Angle, _) => Self::new("Angle message:", "gen/send  break/back"),
            (Mode::Lux, false) => Self::new("Lux message:", "start/send flush/back"),
            (Mode::Lux, true) => Self::new("Lux message:", "stop/send  flush/back"),
        };
        screen.set_signal(signal);
        screen
    }

    /// Inbound message view: notice, raw signal, translation.
    pub fn received(signal: &str) -> Self {
        let mut screen = Self::default();
        screen.set_line(0, "New message received:");
        screen.set_line(1, tail(signal));
        screen.set_line(2, decode(signal).as_str());
        screen
    }

    /// Centered one-line overlay.
    pub fn popup(text: &str) -> Self {
        let mut screen = Self::default();
        screen.set_line(1, text);
        screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_marks_selected_mode() {
        let screen = Screen::menu(Mode::Lux);
        assert_eq!(screen.lines[0].as_str(), "  Angle");
        assert_eq!(screen.lines[1].as_str(), "* Lux");
        assert_eq!(screen.footer.as_str(), "switch/-  select/boot");
    }

    #[test]
    fn compose_shows_translation_and_signal() {
        let screen = Screen::compose(Mode::Angle, false, "... --- ...");
        assert_eq!(screen.header.as_str(), "Angle message:");
        assert_eq!(screen.lines[0].as_str(), "sos");
        assert_eq!(screen.lines[1].as_str(), "... --- ...");
    }

    #[test]
    fn lux_footer_follows_receiving_state() {
        assert_eq!(
            Screen::compose(Mode::Lux, true, "").footer.as_str(),
            "stop/send  flush/back"
        );
        assert_eq!(
            Screen::compose(Mode::Lux, false, "").footer.as_str(),
            "start/send flush/back"
        );
    }

    #[test]
    fn long_signal_shows_newest_symbols() {
        let mut screen = Screen::default();
        screen.set_signal("..........----------..........---");
        assert_eq!(screen.lines[1].len(), DISPLAY_COLUMNS);
        assert!(screen.lines[1].ends_with("---"));
    }

    #[test]
    fn received_shows_signal_and_translation() {
        let screen = Screen::received(".- -...");
        assert_eq!(screen.lines[0].as_str(), "New message received:");
        assert_eq!(screen.lines[1].as_str(), ".- -...");
        assert_eq!(screen.lines[2].as_str(), "ab");
    }

    #[test]
    fn empty_matches_default() {
        assert_eq!(Screen::empty(), Screen::default());
    }

    #[test]
    fn out_of_range_row_is_ignored() {
        let mut screen = Screen::default();
        screen.set_line(DISPLAY_LINES, "x");
        assert_eq!(screen, Screen::default());
    }
}

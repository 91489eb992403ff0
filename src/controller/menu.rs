//! Menu / message-composition state machine.
//!
//! Turns button events into [`Action`]s for the controller task. The
//! machine itself performs no I/O, which keeps every transition testable.
//!
//! | State          | B1 short      | B1 long          | B2 short          | B2 long |
//! |----------------|---------------|------------------|-------------------|---------|
//! | Menu           | enter compose | reboot           | toggle Angle/Lux  | -       |
//! | Compose, Angle | letter gap    | clear, back      | sample angle      | send    |
//! | Compose, Lux   | flush         | clear, stop, back| start/stop receive| send    |

use crate::buttons::classifier::ButtonEvent;
use heapless::Vec;

/// Top-level program state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramState {
    Menu,
    Compose,
}

/// Input method used while composing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Angle,
    Lux,
}

/// Side effect requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Read the orientation once and append the resulting symbol.
    SampleAngle,
    /// Append a letter boundary.
    AppendLetterGap,
    StartReceiving,
    StopReceiving,
    /// Empty the message buffer.
    Clear,
    /// Transmit the message buffer, then clear it.
    Send,
    Reboot,
}

pub type Actions = Vec<Action, 3>;

#[derive(Clone, Debug)]
pub struct Menu {
    state: ProgramState,
    mode: Mode,
    receiving: bool,
}

impl Menu {
    pub const fn new() -> Self {
        Self {
            state: ProgramState::Menu,
            mode: Mode::Angle,
            receiving: false,
        }
    }

    pub fn state(&self) -> ProgramState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_receiving(&self) -> bool {
        self.receiving
    }

    /// Align the receiving flag with whether the light receiver is really
    /// running, e.g. after a session ended on its own. Returns `true` when
    /// the flag changed.
    pub fn sync_receiving(&mut self, running: bool) -> bool {
        let receiving =
            running && self.state == ProgramState::Compose && self.mode == Mode::Lux;
        let changed = receiving != self.receiving;
        self.receiving = receiving;
        changed
    }

    /// Apply one button event and return the actions to perform, in order.
    pub fn handle(&mut self, event: ButtonEvent) -> Actions {
        let mut actions = Actions::new();
        let mut push = |action| {
            let _ = actions.push(action);
        };

        match (self.state, self.mode, event) {
            (_, _, ButtonEvent::None) => {}

            (ProgramState::Menu, _, ButtonEvent::Button2Short) => {
                self.mode = match self.mode {
                    Mode::Angle => Mode::Lux,
                    Mode::Lux => Mode::Angle,
                };
            }
            (ProgramState::Menu, _, ButtonEvent::Button1Short) => {
                self.state = ProgramState::Compose;
            }
            (ProgramState::Menu, _, ButtonEvent::Button1Long) => push(Action::Reboot),
            (ProgramState::Menu, _, ButtonEvent::Button2Long) => {}

            (ProgramState::Compose, Mode::Angle, ButtonEvent::Button2Short) => {
                push(Action::SampleAngle)
            }
            (ProgramState::Compose, Mode::Angle, ButtonEvent::Button1Short) => {
                push(Action::AppendLetterGap)
            }

            (ProgramState::Compose, Mode::Lux, ButtonEvent::Button2Short) => {
                self.receiving = !self.receiving;
                push(if self.receiving {
                    Action::StartReceiving
                } else {
                    Action::StopReceiving
                });
            }
            (ProgramState::Compose, Mode::Lux, ButtonEvent::Button1Short) => push(Action::Clear),

            (ProgramState::Compose, _, ButtonEvent::Button2Long) => push(Action::Send),
            (ProgramState::Compose, _, ButtonEvent::Button1Long) => {
                push(Action::Clear);
                push(Action::StopReceiving);
                self.receiving = false;
                self.state = ProgramState::Menu;
            }
        }

        actions
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(mode: Mode) -> Menu {
        let mut menu = Menu::new();
        if mode == Mode::Lux {
            menu.handle(ButtonEvent::Button2Short);
        }
        menu.handle(ButtonEvent::Button1Short);
        menu
    }

    #[test]
    fn menu_toggles_mode_and_enters_compose() {
        let mut menu = Menu::new();
        assert!(menu.handle(ButtonEvent::Button2Short).is_empty());
        assert_eq!(menu.mode(), Mode::Lux);
        assert!(menu.handle(ButtonEvent::Button2Short).is_empty());
        assert_eq!(menu.mode(), Mode::Angle);

        assert!(menu.handle(ButtonEvent::Button1Short).is_empty());
        assert_eq!(menu.state(), ProgramState::Compose);
    }

    #[test]
    fn long_press_in_menu_reboots() {
        let mut menu = Menu::new();
        assert_eq!(menu.handle(ButtonEvent::Button1Long).as_slice(), &[Action::Reboot]);
        assert!(menu.handle(ButtonEvent::Button2Long).is_empty());
    }

    #[test]
    fn angle_compose_actions() {
        let mut menu = compose(Mode::Angle);
        assert_eq!(menu.handle(ButtonEvent::Button2Short).as_slice(), &[Action::SampleAngle]);
        assert_eq!(
            menu.handle(ButtonEvent::Button1Short).as_slice(),
            &[Action::AppendLetterGap]
        );
        assert_eq!(menu.handle(ButtonEvent::Button2Long).as_slice(), &[Action::Send]);
        assert_eq!(menu.state(), ProgramState::Compose);
    }

    #[test]
    fn lux_compose_toggles_receiving() {
        let mut menu = compose(Mode::Lux);
        assert_eq!(
            menu.handle(ButtonEvent::Button2Short).as_slice(),
            &[Action::StartReceiving]
        );
        assert!(menu.is_receiving());
        assert_eq!(
            menu.handle(ButtonEvent::Button2Short).as_slice(),
            &[Action::StopReceiving]
        );
        assert!(!menu.is_receiving());
        assert_eq!(menu.handle(ButtonEvent::Button1Short).as_slice(), &[Action::Clear]);
    }

    #[test]
    fn back_from_compose_clears_and_stops() {
        let mut menu = compose(Mode::Lux);
        menu.handle(ButtonEvent::Button2Short);
        assert_eq!(
            menu.handle(ButtonEvent::Button1Long).as_slice(),
            &[Action::Clear, Action::StopReceiving]
        );
        assert_eq!(menu.state(), ProgramState::Menu);
        assert!(!menu.is_receiving());
        assert_eq!(menu.mode(), Mode::Lux);
    }

    #[test]
    fn ended_session_restarts_with_one_press() {
        let mut menu = compose(Mode::Lux);
        menu.handle(ButtonEvent::Button2Short);
        assert!(menu.is_receiving());

        // Receiver gave up without a button press.
        assert!(menu.sync_receiving(false));
        assert!(!menu.is_receiving());
        assert_eq!(
            menu.handle(ButtonEvent::Button2Short).as_slice(),
            &[Action::StartReceiving]
        );
    }

    #[test]
    fn sync_is_a_noop_when_in_step() {
        let mut menu = compose(Mode::Lux);
        assert!(!menu.sync_receiving(false));
        menu.handle(ButtonEvent::Button2Short);
        assert!(!menu.sync_receiving(true));
        assert!(menu.is_receiving());
    }

    #[test]
    fn running_sensor_outside_lux_compose_is_not_receiving() {
        let mut menu = compose(Mode::Angle);
        assert!(!menu.sync_receiving(true));
        assert!(!menu.is_receiving());
    }

    #[test]
    fn none_event_is_ignored() {
        let mut menu = compose(Mode::Angle);
        assert!(menu.handle(ButtonEvent::None).is_empty());
        assert_eq!(menu.state(), ProgramState::Compose);
    }
}

//! Two-button input: press classification and event hand-off.
//!
//! Two tactile switches (active-low with internal pull-up). Each has its
//! own task that debounces edges, times the press and publishes a
//! [`classifier::ButtonEvent`] to the shared [`mailbox::EventMailbox`].
//!
//! ## Components
//!
//! - **Classifier**: debounce and short/long decision, pure logic
//! - **Mailbox**: single-slot latest-wins event cell and per-button edge gates
//! - **Task**: GPIO edge handling plus the gate health task

pub mod classifier;
pub mod mailbox;
pub mod task;

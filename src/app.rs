//! Top-level state machine: menu, session in play, "Game Over" overlay.
//!
//! A confirm on the menu builds a brand-new `Session`; when that session's
//! overlay has run its course the app drops it and returns to the menu.
//! Quit ends the program from any screen.

use rand::Rng;
use tracing::info;

use crate::assets::AssetCache;
use crate::compute::{init_session, tick};
use crate::config::GameConfig;
use crate::entities::{GameStatus, Session};
use crate::input::TickInput;
use crate::render::{draw_menu, draw_session, Surface};

#[derive(Clone, Debug)]
pub enum Screen {
    Menu,
    /// Playing, or showing "Game Over" while the session winds down.
    Session(Box<Session>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    config: GameConfig,
    sessions_played: u32,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        Self {
            screen: Screen::Menu,
            config,
            sessions_played: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sessions_played(&self) -> u32 {
        self.sessions_played
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.screen {
            Screen::Session(session) => Some(&**session),
            Screen::Menu => None,
        }
    }

    /// Advance one tick.
    pub fn step(&mut self, input: &TickInput, assets: &AssetCache, rng: &mut impl Rng) -> Control {
        if input.quit {
            info!(sessions = self.sessions_played, "quit requested");
            return Control::Quit;
        }

        match &self.screen {
            Screen::Menu => {
                if input.confirm {
                    self.sessions_played += 1;
                    self.screen = Screen::Session(Box::new(init_session(self.config, assets)));
                }
            }
            Screen::Session(session) => {
                let next = tick(session, input, assets, rng);
                self.screen = if next.status == GameStatus::Finished {
                    Screen::Menu
                } else {
                    Screen::Session(Box::new(next))
                };
            }
        }
        Control::Continue
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, assets: &AssetCache) {
        match &self.screen {
            Screen::Menu => draw_menu(surface, assets),
            Screen::Session(session) => draw_session(surface, session, assets),
        }
    }
}

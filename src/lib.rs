//! Core of a single-screen arcade shooter.
//!
//! Game logic (`entities`, `collision`, `wave`, `compute`, `app`) never touches
//! the terminal; it draws through the `render::Surface` trait and reads input
//! as a `input::TickInput` snapshot. The binary wires both to crossterm.

pub mod app;
pub mod assets;
pub mod canvas;
pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod render;
pub mod wave;

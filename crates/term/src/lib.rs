//! Terminal "game renderer" module.
//!
//! A small rendering layer for the card grid. It renders a session snapshot
//! into a framebuffer of styled cells and flushes that to the terminal with
//! `crossterm`, redrawing only rows that changed.
//!
//! [`FlipTimeline`] plays the part of the animation system: it receives the
//! engine's [`AnimationRequest`](crate::core::AnimationRequest)s and reports
//! when each reveal has finished.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod timeline;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{face_glyph, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use timeline::FlipTimeline;

//! Pooled score-popup effects for terminal games.
//!
//! A quiz or arcade game spawns short-lived `+N!` bursts every time the
//! player scores. All popup storage comes from a fixed-capacity pool
//! reserved up front: after [`PopupSystem::with_capacity`] nothing in the
//! emit/sweep/render path touches the heap, and when the pool saturates new
//! popups are dropped instead of allocated.
//!
//! The game layer drives the system once per tick with a monotonic `now`
//! (see [`Clock`]) and draws the [`Glyph`] primitives it gets back; this
//! crate never writes to the terminal itself.

pub mod clock;
pub mod effects;
pub mod pool;
pub mod popup;

pub use clock::Clock;
pub use effects::PopupSystem;
pub use pool::{FixedPool, Handle};
pub use popup::{Glyph, ScorePopup};

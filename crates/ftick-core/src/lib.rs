// Forbid unsafe in production; deny (with targeted allows) in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: the synchronized multi-window ticker engine.
//!
//! # Role in FrankenTicker
//! `ftick-core` owns everything that makes several independently laid-out
//! windows look like slices of one continuous, infinitely scrolling lane.
//! It performs no terminal I/O; hosts (`ftick-tty`, or a browser shell)
//! feed it layout and frame timestamps and paint what it composes.
//!
//! # Primary responsibilities
//! - **Geometry**: window offsets relative to a shared container
//!   ([`geometry::GeometryTracker`]).
//! - **Rings**: per-window circular buffers rotated in lockstep
//!   ([`ring::RingSet`]).
//! - **Motion**: a pure constant-velocity step function with threshold
//!   driven rotation ([`clock::step`]).
//! - **Composition**: per-window translations ([`composer::compose`]) and
//!   cell rendering of a window's slice ([`render::render_lane`]).
//! - **Sessions**: the per-mount state object tying it together
//!   ([`session::Ticker`], [`session::TickerSession`]).
//!
//! # How it fits in the system
//! A host calls [`session::Ticker::relayout`] whenever its layout changes and
//! [`session::Ticker::frame`] once per display refresh, typically from a
//! [`frame_loop::FrameLoop`] driven by a [`cancellation::CancellationToken`].

pub mod cancellation;
pub mod clock;
pub mod composer;
pub mod config;
pub mod frame_loop;
pub mod geometry;
pub mod measure;
pub mod render;
pub mod ring;
pub mod session;

pub use cancellation::{CancellationSource, CancellationToken};
pub use clock::{MotionClock, MotionParams, MotionState, StepReport, step};
pub use composer::{Frame, Translation, compose, translation};
pub use config::{ConfigError, TickerConfig};
pub use frame_loop::{FrameLoop, LoopExit};
pub use geometry::{
    GeometrySnapshot, GeometryTracker, LayoutSource, Rect, StaticLayout, StripLayout,
};
pub use measure::{CellWidth, Measure};
pub use render::render_lane;
pub use ring::{Element, Ring, RingSet};
pub use session::{Ticker, TickerSession};

//! # frogger-render
//!
//! Rendering subsystem for the badge Frogger game.
//!
//! The movement task decides where the frog and logs go; this crate turns
//! those decisions into pixels:
//! - **Board**: geometry, palette and the static background
//! - **Sprites**: 1-bit frog/log bitmaps with runtime tinting
//! - **Draw queue**: bounded FIFO of "which logs moved" notifications,
//!   drop-on-full so physics never waits for the display
//! - **Compositor**: the periodic consumer that locks the drawing surface
//!   and repaints what changed
//!
//! The drawing surface is any `embedded-graphics` `DrawTarget<Rgb565>`;
//! on the badge that is the ST7789 LCD set up by the `esp32s3` feature.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! static DRAW_QUEUE: DrawQueue = DrawQueue::new();
//! static GAME: SharedState = SharedState::new();
//!
//! // render side
//! init_board(&mut display).unwrap();
//! let surface = mk_static!(Mutex<CriticalSectionRawMutex, Display>, Mutex::new(display));
//! let compositor = Compositor::new(surface, &DRAW_QUEUE, &GAME, RenderConfig::default());
//! spawner.must_spawn(render_task(compositor));
//!
//! // movement side, once per tick
//! GAME.with(|s| { /* move frog and logs */ });
//! DRAW_QUEUE.push(DrawRequest::ALL);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod board;
mod queue;
mod render;
mod sprite;
mod state;

#[cfg(feature = "esp32s3")]
pub mod badge;

pub use board::init_board;
pub use queue::{
    DrawQueue,
    DrawRequest,
    QUEUE_DEPTH,
};
pub use render::{
    Compositor,
    FrogStyle,
    RenderConfig,
    frog_style,
    render_frame,
};
pub use sprite::{
    FROG,
    LOG,
    Sprite,
};
pub use state::{
    FrogState,
    GameState,
    LogState,
    Placement,
    SharedState,
    dark_mode,
    set_dark_mode,
};

/// StaticCell helper — allocates a value into a `static` exactly once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

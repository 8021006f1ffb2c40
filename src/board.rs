//! Board geometry, palette and the static background.
//!
//! The playfield is a 132×132 square: a water band crossed by three log
//! lanes, bounded by a safe strip at the top (goal) and bottom (start).
//! All coordinates are in LCD pixels; nothing here is mutated at runtime.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};

/// Left edge of the playfield on the LCD.
pub const BOARD_X: i32 = 64;
/// Top edge of the playfield on the LCD.
pub const BOARD_Y: i32 = 64;
/// The playfield is square.
pub const BOARD_SIZE: u32 = 132;

/// Height of the start and goal strips.
pub const STRIP_HEIGHT: u32 = 26;
/// Goal strip, top of the board.
pub const TOP_STRIP_Y: i32 = BOARD_Y;
/// Start strip, bottom of the board.
pub const BOTTOM_STRIP_Y: i32 = BOARD_Y + BOARD_SIZE as i32 - STRIP_HEIGHT as i32;

/// Number of log lanes crossing the water.
pub const LOG_COUNT: usize = 3;
/// Lane y coordinates, top to bottom.
pub const LANE_Y: [i32; LOG_COUNT] = [92, 118, 144];

// ── Palette ─────────────────────────────────────────────────────────────────

/// Open water.
pub const WATER: Rgb565 = Rgb565::CSS_DODGER_BLUE;
/// Safe strips (lily pads).
pub const SAFE: Rgb565 = Rgb565::GREEN;
/// Log wood.
pub const LOG_BROWN: Rgb565 = Rgb565::CSS_SADDLE_BROWN;
/// Frog tint, light mode.
pub const FROG_LIGHT: Rgb565 = Rgb565::MAGENTA;
/// Frog tint, dark mode.
pub const FROG_DARK: Rgb565 = Rgb565::YELLOW;

/// The whole playfield.
pub fn board_area() -> Rectangle {
    Rectangle::new(
        Point::new(BOARD_X, BOARD_Y),
        Size::new(BOARD_SIZE, BOARD_SIZE),
    )
}

/// The goal strip at the top of the board.
pub fn top_strip() -> Rectangle {
    Rectangle::new(
        Point::new(BOARD_X, TOP_STRIP_Y),
        Size::new(BOARD_SIZE, STRIP_HEIGHT),
    )
}

/// The start strip at the bottom of the board.
pub fn bottom_strip() -> Rectangle {
    Rectangle::new(
        Point::new(BOARD_X, BOTTOM_STRIP_Y),
        Size::new(BOARD_SIZE, STRIP_HEIGHT),
    )
}

/// Paint the static background: water field, then both safe strips.
///
/// Call once before the render loop starts, while nothing else is drawing;
/// the surface is not yet contended at that point so no lock is needed.
pub fn init_board<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.fill_solid(&board_area(), WATER)?;
    target.fill_solid(&top_strip(), SAFE)?;
    target.fill_solid(&bottom_strip(), SAFE)
}

//! 1-bit sprites with runtime tinting.
//!
//! Sprites are stored as MSB-first bit rows padded to whole bytes, the same
//! layout the original asset tables used. Set bits take the foreground
//! color, clear bits the background, so one bitmap serves every display
//! mode and backdrop combination.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};

/// A monochrome bitmap blittable onto any RGB565 target.
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    data: &'static [u8],
}

impl Sprite {
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Blit the sprite with `top_left` at the given point, mapping set bits
    /// to `fg` and clear bits to `bg`.
    pub fn draw<D>(
        &self,
        target: &mut D,
        top_left: Point,
        fg: Rgb565,
        bg: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let width = self.width as usize;
        let stride = width.div_ceil(8);
        let area = Rectangle::new(top_left, self.size());
        let colors = self
            .data
            .chunks(stride)
            .take(self.height as usize)
            .flat_map(move |row| {
                (0..width).map(move |x| {
                    if row[x / 8] & (0x80 >> (x % 8)) != 0 {
                        fg
                    } else {
                        bg
                    }
                })
            });
        target.fill_contiguous(&area, colors)
    }
}

/// The frog, 16×16, facing the goal strip.
pub const FROG: Sprite = Sprite {
    width: 16,
    height: 16,
    data: &[
        0x60, 0x06, // eye stalks
        0xF0, 0x0F,
        0xF0, 0x0F,
        0x67, 0xE6,
        0x3F, 0xFC,
        0x7F, 0xFE,
        0xDF, 0xFB,
        0xDF, 0xFB,
        0xDF, 0xFB,
        0x7F, 0xFE,
        0x3F, 0xFC,
        0x7F, 0xFE,
        0xEF, 0xF7, // hind legs
        0xC7, 0xE3,
        0xC3, 0xC3,
        0x01, 0x80,
    ],
};

/// A drifting log, 40×20, rounded ends with a little grain.
pub const LOG: Sprite = Sprite {
    width: 40,
    height: 20,
    data: &[
        0x3F, 0xFF, 0xFF, 0xFF, 0xFC,
        0x7F, 0xFF, 0xFF, 0xFF, 0xFE,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xF9, 0xFF, 0xFF, 0xFF,
        0xFF, 0xF0, 0xFF, 0xFF, 0xFF,
        0xFF, 0xF9, 0xFF, 0x9F, 0xFF,
        0xFF, 0xFF, 0xFF, 0x0F, 0xFF,
        0xFF, 0xFF, 0xFF, 0x9F, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0x7F, 0xFF, 0xFF, 0xFF,
        0xFC, 0x3F, 0xFF, 0xFF, 0xFF,
        0xFE, 0x7F, 0xFF, 0xF3, 0xFF,
        0xFF, 0xFF, 0xFF, 0xE1, 0xFF,
        0xFF, 0xFF, 0xFF, 0xF3, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0x7F, 0xFF, 0xFF, 0xFF, 0xFE,
        0x3F, 0xFF, 0xFF, 0xFF, 0xFC,
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_data_matches_dimensions() {
        for sprite in [&FROG, &LOG] {
            let stride = (sprite.width as usize).div_ceil(8);
            assert_eq!(sprite.data.len(), stride * sprite.height as usize);
        }
    }
}

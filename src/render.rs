//! The frame compositor: drains redraw requests and repaints the board.
//!
//! One iteration: wait for a request, snapshot the shared state (consuming
//! the frog's one-shot ground flag), take the surface lock, paint flagged
//! logs, paint the frog, restore the safe strips if the frog just vacated
//! them, release the lock, sleep for the configured frame delay.

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    mutex::Mutex,
};
use embassy_time::{
    Duration,
    Timer,
};
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};

use crate::{
    board,
    queue::{
        DrawQueue,
        DrawRequest,
    },
    sprite::{
        FROG,
        LOG,
    },
    state::{
        GameState,
        Placement,
        SharedState,
        dark_mode,
    },
};

/// Pacing for the compositor loop.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderConfig {
    /// Fixed post-draw delay; bounds the maximum frame rate and yields the
    /// processor between frames.
    pub frame_delay: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_delay: Duration::from_millis(5),
        }
    }
}

/// Tint, backdrop and vertical nudge for one frog paint.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FrogStyle {
    pub tint: Rgb565,
    pub backdrop: Rgb565,
    pub y_offset: i32,
}

/// Exactly one branch per placement. The tint tracks dark mode only and is
/// independent of where the frog sits.
pub fn frog_style(placement: Placement, dark: bool) -> FrogStyle {
    let tint = if dark {
        board::FROG_DARK
    } else {
        board::FROG_LIGHT
    };
    let (backdrop, y_offset) = match placement {
        // Riding a log sits the frog a couple of pixels into the wood.
        Placement::Log => (board::LOG_BROWN, 2),
        Placement::LilyPad => (board::SAFE, 0),
        Placement::Water => (board::WATER, 0),
    };
    FrogStyle {
        tint,
        backdrop,
        y_offset,
    }
}

/// Paint one frame onto `target`.
///
/// Logs are repainted only where the request flags them, at the positions
/// in the `state` snapshot. The frog is always repainted. If the snapshot
/// carries `left_ground`, both safe strips are restored to cover whatever
/// the frog left behind when it hopped off.
pub fn render_frame<D>(
    target: &mut D,
    request: &DrawRequest,
    state: &GameState,
    dark: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    for (log, changed) in state.logs.iter().zip(request.lanes()) {
        if changed {
            LOG.draw(
                target,
                Point::new(log.x, log.y),
                board::LOG_BROWN,
                board::WATER,
            )?;
        }
    }

    let style = frog_style(state.frog.placement(), dark);
    FROG.draw(
        target,
        Point::new(state.frog.x, state.frog.y + style.y_offset),
        style.tint,
        style.backdrop,
    )?;

    if state.frog.left_ground {
        target.fill_solid(&board::top_strip(), board::SAFE)?;
        target.fill_solid(&board::bottom_strip(), board::SAFE)?;
    }

    Ok(())
}

/// Periodic consumer of the draw queue. Never terminates.
pub struct Compositor<'a, D> {
    surface: &'a Mutex<CriticalSectionRawMutex, D>,
    queue: &'a DrawQueue,
    state: &'a SharedState,
    config: RenderConfig,
}

impl<'a, D> Compositor<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub const fn new(
        surface: &'a Mutex<CriticalSectionRawMutex, D>,
        queue: &'a DrawQueue,
        state: &'a SharedState,
        config: RenderConfig,
    ) -> Self {
        Self {
            surface,
            queue,
            state,
            config,
        }
    }

    /// The render loop.
    ///
    /// Draw failures are not retried; the periodic loop self-corrects on
    /// the next request while the underlying state is still stale.
    pub async fn run(&self) -> ! {
        #[cfg(feature = "defmt")]
        defmt::debug!("compositor up, frame delay {}", self.config.frame_delay);

        loop {
            let request = self.queue.pop().await;
            let frame = self.state.take_frame();
            let dark = dark_mode();

            {
                let mut surface = self.surface.lock().await;
                if render_frame(&mut *surface, &request, &frame, dark).is_err() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("frame skipped: draw error");
                }
            }

            Timer::after(self.config.frame_delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;
    use std::vec::Vec;

    use embedded_graphics::{
        Pixel,
        primitives::Rectangle,
    };

    use super::*;
    use crate::{
        board::{
            BOARD_X,
            BOTTOM_STRIP_Y,
            FROG_DARK,
            FROG_LIGHT,
            LANE_Y,
            LOG_BROWN,
            SAFE,
            WATER,
            bottom_strip,
            init_board,
            top_strip,
        },
        state::FrogState,
    };

    const W: usize = 256;
    const H: usize = 256;

    /// Marker used to detect whether an area was repainted.
    const SENTINEL: Rgb565 = Rgb565::CSS_HOT_PINK;

    /// Host-side framebuffer covering the whole board plane.
    struct TestDisplay {
        pixels: Vec<Rgb565>,
    }

    impl TestDisplay {
        fn new() -> Self {
            Self {
                pixels: vec![Rgb565::BLACK; W * H],
            }
        }

        fn pixel(&self, x: i32, y: i32) -> Rgb565 {
            self.pixels[y as usize * W + x as usize]
        }

        fn fill(&mut self, area: &Rectangle, color: Rgb565) {
            self.fill_solid(area, color).unwrap();
        }

        fn all_in(&self, area: &Rectangle, color: Rgb565) -> bool {
            let tl = area.top_left;
            (tl.y..tl.y + area.size.height as i32).all(|y| {
                (tl.x..tl.x + area.size.width as i32).all(|x| self.pixel(x, y) == color)
            })
        }
    }

    impl OriginDimensions for TestDisplay {
        fn size(&self) -> Size {
            Size::new(W as u32, H as u32)
        }
    }

    impl DrawTarget for TestDisplay {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..W as i32).contains(&point.x) && (0..H as i32).contains(&point.y) {
                    self.pixels[point.y as usize * W + point.x as usize] = color;
                }
            }
            Ok(())
        }
    }

    /// Frog paddling in open water, logs at their starting stagger.
    fn water_state() -> GameState {
        let mut state = GameState::new();
        state.frog = FrogState {
            x: BOARD_X + 30,
            y: LANE_Y[1],
            on_log: false,
            on_lily_pad: false,
            left_ground: false,
        };
        state
    }

    #[test]
    fn styling_selects_exactly_one_branch() {
        let log = frog_style(Placement::Log, false);
        assert_eq!(log.backdrop, LOG_BROWN);
        assert_eq!(log.y_offset, 2);

        let pad = frog_style(Placement::LilyPad, false);
        assert_eq!(pad.backdrop, SAFE);
        assert_eq!(pad.y_offset, 0);

        let water = frog_style(Placement::Water, false);
        assert_eq!(water.backdrop, WATER);
        assert_eq!(water.y_offset, 0);
    }

    #[test]
    fn tint_follows_dark_mode_in_every_branch() {
        for placement in [Placement::Log, Placement::LilyPad, Placement::Water] {
            assert_eq!(frog_style(placement, true).tint, FROG_DARK);
            assert_eq!(frog_style(placement, false).tint, FROG_LIGHT);
        }
    }

    #[test]
    fn request_repaints_only_flagged_logs() {
        let mut display = TestDisplay::new();
        init_board(&mut display).unwrap();

        let state = water_state();
        // Blank the lanes so a repaint is observable.
        for log in &state.logs {
            display.fill(
                &Rectangle::new(Point::new(log.x, log.y), LOG.size()),
                SENTINEL,
            );
        }
        // Mark the safe strips too: they must stay untouched.
        display.fill(&top_strip(), SENTINEL);
        display.fill(&bottom_strip(), SENTINEL);

        let request = DrawRequest {
            log_one: true,
            log_two: false,
            log_three: false,
        };
        render_frame(&mut display, &request, &state, false).unwrap();

        // Log one repainted at its stored position; its middle rows are
        // solid wood.
        assert_eq!(
            display.pixel(state.logs[0].x + 10, state.logs[0].y + 10),
            LOG_BROWN
        );
        // Logs two and three untouched.
        assert_eq!(
            display.pixel(state.logs[1].x + 10, state.logs[1].y + 10),
            SENTINEL
        );
        assert_eq!(
            display.pixel(state.logs[2].x + 10, state.logs[2].y + 10),
            SENTINEL
        );
        // Frog repainted regardless of the request flags.
        assert_eq!(display.pixel(state.frog.x + 8, state.frog.y + 7), FROG_LIGHT);
        // Ground strips untouched while `left_ground` is clear.
        assert!(display.all_in(&top_strip(), SENTINEL));
        assert!(display.all_in(&bottom_strip(), SENTINEL));
    }

    #[test]
    fn frog_on_log_paints_wood_backdrop_with_offset() {
        let mut display = TestDisplay::new();
        init_board(&mut display).unwrap();

        let mut state = water_state();
        state.frog.on_log = true;

        render_frame(&mut display, &DrawRequest::default(), &state, false).unwrap();

        // Body pixel lands two rows lower than in open water.
        assert_eq!(
            display.pixel(state.frog.x + 8, state.frog.y + 2 + 7),
            FROG_LIGHT
        );
        // The sprite corner is a clear bit, so it shows the log backdrop.
        assert_eq!(display.pixel(state.frog.x, state.frog.y + 2), LOG_BROWN);
    }

    #[test]
    fn dark_mode_changes_painted_tint() {
        let state = water_state();

        let mut display = TestDisplay::new();
        render_frame(&mut display, &DrawRequest::default(), &state, true).unwrap();
        assert_eq!(display.pixel(state.frog.x + 8, state.frog.y + 7), FROG_DARK);

        let mut display = TestDisplay::new();
        render_frame(&mut display, &DrawRequest::default(), &state, false).unwrap();
        assert_eq!(display.pixel(state.frog.x + 8, state.frog.y + 7), FROG_LIGHT);
    }

    #[test]
    fn vacating_the_ground_restores_both_strips_once() {
        let shared = SharedState::new();
        // Frog hops from the start strip into the water; movement task sets
        // the one-shot flag.
        shared.with(|s| {
            s.frog.x = BOARD_X + 58;
            s.frog.y = BOTTOM_STRIP_Y - 20;
            s.frog.on_lily_pad = false;
            s.frog.left_ground = true;
        });

        let mut display = TestDisplay::new();
        init_board(&mut display).unwrap();
        display.fill(&top_strip(), SENTINEL);
        display.fill(&bottom_strip(), SENTINEL);

        // First frame: strips restored, flag consumed.
        let frame = shared.take_frame();
        assert!(frame.frog.left_ground);
        render_frame(&mut display, &DrawRequest::ALL, &frame, false).unwrap();
        assert!(display.all_in(&top_strip(), SAFE));
        assert!(display.all_in(&bottom_strip(), SAFE));

        // Second frame: flag is gone, strips stay as we mark them.
        display.fill(&top_strip(), SENTINEL);
        display.fill(&bottom_strip(), SENTINEL);
        let frame = shared.take_frame();
        assert!(!frame.frog.left_ground);
        render_frame(&mut display, &DrawRequest::ALL, &frame, false).unwrap();
        assert!(display.all_in(&top_strip(), SENTINEL));
        assert!(display.all_in(&bottom_strip(), SENTINEL));
    }

    #[test]
    fn init_board_paints_water_and_strips() {
        let mut display = TestDisplay::new();
        init_board(&mut display).unwrap();

        assert!(display.all_in(&top_strip(), SAFE));
        assert!(display.all_in(&bottom_strip(), SAFE));
        // Water band between the strips.
        assert_eq!(display.pixel(BOARD_X + 66, LANE_Y[1]), WATER);
        // Outside the board untouched.
        assert_eq!(display.pixel(BOARD_X - 1, LANE_Y[1]), Rgb565::BLACK);
    }
}

//! Frogger on the badge LCD.
//!
//! Hop from the start strip across three log lanes to the goal strip.
//! - D-pad hops the frog one row or column at a time
//! - Riding a log carries the frog sideways
//! - Water without a log is a drowning frog — back to the start
//! - Select toggles dark mode (yellow frog instead of magenta)
//! - Start pauses
//!
//! The movement logic lives here; drawing is entirely the library's
//! compositor task on the other end of the draw queue.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    mutex::Mutex,
};
use embassy_time::{
    Duration,
    Ticker,
    Timer,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use frogger_render::{
    Compositor,
    DrawQueue,
    DrawRequest,
    GameState,
    LOG,
    RenderConfig,
    SharedState,
    badge::{
        self,
        ButtonResources,
        Buttons,
        Display,
        DisplayResources,
        Resources,
    },
    board::{
        BOARD_SIZE,
        BOARD_X,
        BOARD_Y,
        BOTTOM_STRIP_Y,
        LOG_COUNT,
        STRIP_HEIGHT,
    },
    dark_mode,
    init_board,
    mk_static,
    set_dark_mode,
    split_resources,
};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

static DRAW_QUEUE: DrawQueue = DrawQueue::new();
static GAME: SharedState = SharedState::new();

const TICK_MS: u64 = 40;
/// One hop moves the frog a full row.
const HOP: i32 = 26;
/// Ticks a frog survives treading water.
const DROWN_TICKS: u32 = 12;

const FROG_SIZE: i32 = 16;
const BOARD_RIGHT: i32 = BOARD_X + BOARD_SIZE as i32;

/// Per-lane log drift in pixels per tick; logs bounce off the board edges.
const LANE_SPEED: [i32; LOG_COUNT] = [2, -2, 1];

/// Latched button edge: fires once per press.
struct Edge {
    held: bool,
}

impl Edge {
    const fn new() -> Self {
        Self { held: false }
    }

    fn fired(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.held;
        self.held = pressed;
        fired
    }
}

fn on_strip(y: i32) -> bool {
    y < BOARD_Y + STRIP_HEIGHT as i32 || y >= BOTTOM_STRIP_Y
}

#[embassy_executor::task]
async fn render_task(compositor: Compositor<'static, Display<'static>>) -> ! {
    compositor.run().await
}

#[embassy_executor::task]
async fn movement_task(mut buttons: Buttons) -> ! {
    info!("press Start to play");
    Buttons::debounce_press(&mut buttons.start).await;

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut lane_speed = LANE_SPEED;
    let mut drown_ticks: u32 = 0;
    let mut crossings: u32 = 0;
    let mut paused = false;

    let mut up = Edge::new();
    let mut down = Edge::new();
    let mut left = Edge::new();
    let mut right = Edge::new();
    let mut start = Edge::new();
    let mut select = Edge::new();

    loop {
        ticker.next().await;

        if start.fired(buttons.start.is_low()) {
            paused = !paused;
            info!("{}", if paused { "paused" } else { "resumed" });
        }
        if paused {
            continue;
        }

        // Select is wired active-high on the badge.
        if select.fired(buttons.select.is_high()) {
            set_dark_mode(!dark_mode());
        }

        let mut hop_x = 0;
        let mut hop_y = 0;
        if up.fired(buttons.up.is_low()) {
            hop_y -= HOP;
        }
        if down.fired(buttons.down.is_low()) {
            hop_y += HOP;
        }
        if left.fired(buttons.left.is_low()) {
            hop_x -= HOP;
        }
        if right.fired(buttons.right.is_low()) {
            hop_x += HOP;
        }

        let mut reached_goal = false;
        GAME.with(|game| {
            // Drift the logs, bouncing at the board edges.
            for (log, speed) in game.logs.iter_mut().zip(lane_speed.iter_mut()) {
                log.x += *speed;
                if log.x <= BOARD_X || log.x + LOG.width as i32 >= BOARD_RIGHT {
                    *speed = -*speed;
                    log.x = log.x.clamp(BOARD_X, BOARD_RIGHT - LOG.width as i32);
                }
            }

            // A riding frog drifts with its log before any hop applies.
            if game.frog.on_log {
                for (log, speed) in game.logs.iter().zip(lane_speed) {
                    if game.frog.y == log.y {
                        game.frog.x += speed;
                    }
                }
            }

            let was_on_strip = game.frog.on_lily_pad;
            game.frog.x = (game.frog.x + hop_x).clamp(BOARD_X, BOARD_RIGHT - FROG_SIZE);
            game.frog.y = (game.frog.y + hop_y)
                .clamp(BOARD_Y + 5, BOTTOM_STRIP_Y + STRIP_HEIGHT as i32 - FROG_SIZE - 5);

            // Re-derive placement from the new position.
            game.frog.on_lily_pad = on_strip(game.frog.y);
            game.frog.on_log = false;
            if !game.frog.on_lily_pad {
                for log in game.logs {
                    let overlaps_x = game.frog.x + FROG_SIZE > log.x
                        && game.frog.x < log.x + LOG.width as i32;
                    if overlaps_x && game.frog.y.abs_diff(log.y) <= 6 {
                        game.frog.y = log.y;
                        game.frog.on_log = true;
                        break;
                    }
                }
            }

            if was_on_strip && !game.frog.on_lily_pad {
                game.frog.left_ground = true;
            }

            if game.frog.on_lily_pad && game.frog.y < BOARD_Y + STRIP_HEIGHT as i32 {
                reached_goal = true;
            } else if !game.frog.on_lily_pad && !game.frog.on_log {
                drown_ticks += 1;
            } else {
                drown_ticks = 0;
            }

            if reached_goal || drown_ticks > DROWN_TICKS {
                let logs = game.logs;
                *game = GameState::new();
                game.logs = logs;
                drown_ticks = 0;
            }
        });

        if reached_goal {
            crossings += 1;
            info!("crossed! total {}", crossings);
        }

        // Every lane drifted this tick, so flag them all. Dropped requests
        // are fine: the next tick repaints the same lanes anyway.
        if !DRAW_QUEUE.push(DrawRequest::ALL) {
            info!("draw queue full, request dropped");
        }
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = badge::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 128 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let mut display: Display<'static> = resources.display.into();
    init_board(&mut display).unwrap();

    let surface = mk_static!(
        Mutex<CriticalSectionRawMutex, Display<'static>>,
        Mutex::new(display)
    );
    let compositor = Compositor::new(surface, &DRAW_QUEUE, &GAME, RenderConfig::default());

    spawner.must_spawn(render_task(compositor));
    spawner.must_spawn(movement_task(resources.buttons.into()));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}

//! Game state shared between the movement task and the renderer.
//!
//! The movement task owns the values; the renderer reads them once per
//! frame. Access goes through [`SharedState`], a critical-section mutex, so
//! neither task ever observes a half-updated frog or log.

use core::cell::RefCell;
use core::sync::atomic::{
    AtomicBool,
    Ordering,
};

use embassy_sync::blocking_mutex::{
    Mutex,
    raw::CriticalSectionRawMutex,
};

use crate::board::{
    BOARD_X,
    BOTTOM_STRIP_Y,
    LANE_Y,
    LOG_COUNT,
};

/// Where the frog currently sits.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Placement {
    Log,
    LilyPad,
    Water,
}

/// The frog: position plus the placement flags set by the movement task.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrogState {
    pub x: i32,
    pub y: i32,
    pub on_log: bool,
    pub on_lily_pad: bool,
    /// One-shot: set by the movement task when the frog departs a safe
    /// strip, consumed by the renderer on the next frame.
    pub left_ground: bool,
}

impl FrogState {
    /// `on_log` wins over `on_lily_pad`; neither means open water.
    pub fn placement(&self) -> Placement {
        if self.on_log {
            Placement::Log
        } else if self.on_lily_pad {
            Placement::LilyPad
        } else {
            Placement::Water
        }
    }
}

/// One drifting log. Size and bitmap are shared by all logs.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogState {
    pub x: i32,
    pub y: i32,
}

/// Everything the renderer needs to paint one frame.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameState {
    pub frog: FrogState,
    pub logs: [LogState; LOG_COUNT],
}

impl GameState {
    /// Frog on the start strip, logs staggered across their lanes.
    pub const fn new() -> Self {
        Self {
            frog: FrogState {
                x: BOARD_X + 58,
                y: BOTTOM_STRIP_Y + 5,
                on_log: false,
                on_lily_pad: true,
                left_ground: false,
            },
            logs: [
                LogState { x: BOARD_X + 4, y: LANE_Y[0] },
                LogState { x: BOARD_X + 46, y: LANE_Y[1] },
                LogState { x: BOARD_X + 88, y: LANE_Y[2] },
            ],
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock-protected [`GameState`] shared across tasks.
pub struct SharedState {
    inner: Mutex<CriticalSectionRawMutex, RefCell<GameState>>,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(GameState::new())),
        }
    }

    /// Run `f` with exclusive access to the state.
    pub fn with<R>(&self, f: impl FnOnce(&mut GameState) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Copy out the current state.
    pub fn snapshot(&self) -> GameState {
        self.inner.lock(|cell| *cell.borrow())
    }

    /// Snapshot the state for one frame, consuming the frog's one-shot
    /// `left_ground` flag in the same critical section. The returned copy
    /// still carries the flag so the caller acts on it exactly once.
    pub(crate) fn take_frame(&self) -> GameState {
        self.inner.lock(|cell| {
            let mut state = cell.borrow_mut();
            let snapshot = *state;
            state.frog.left_ground = false;
            snapshot
        })
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

// Sprite tint toggle, owned by the settings/UI side; the renderer only
// reads it.
static DARK_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_dark_mode(on: bool) {
    DARK_MODE.store(on, Ordering::Relaxed);
}

pub fn dark_mode() -> bool {
    DARK_MODE.load(Ordering::Relaxed)
}

//! Redraw notifications from the movement task to the renderer.

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::Channel,
};

use crate::board::LOG_COUNT;

/// How many redraw requests may sit unconsumed before new ones are dropped.
pub const QUEUE_DEPTH: usize = 5;

/// Which logs moved since the last repaint.
///
/// The renderer reads current positions from shared state; this only says
/// *which* lanes are stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawRequest {
    pub log_one: bool,
    pub log_two: bool,
    pub log_three: bool,
}

impl DrawRequest {
    /// Repaint every lane.
    pub const ALL: Self = Self {
        log_one: true,
        log_two: true,
        log_three: true,
    };

    /// Per-lane flags, index-aligned with `GameState::logs`.
    pub const fn lanes(self) -> [bool; LOG_COUNT] {
        [self.log_one, self.log_two, self.log_three]
    }
}

/// Bounded FIFO between the movement task and the frame compositor.
///
/// When full, new requests are dropped rather than stalling gameplay
/// physics: a stale frame beats a frozen frog. Delivery is strict FIFO
/// with no coalescing of queued requests.
pub struct DrawQueue {
    channel: Channel<CriticalSectionRawMutex, DrawRequest, QUEUE_DEPTH>,
}

impl DrawQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Non-blocking enqueue. Returns `false` if the queue was full and the
    /// request was dropped.
    pub fn push(&self, request: DrawRequest) -> bool {
        self.channel.try_send(request).is_ok()
    }

    /// Wait until a request is available.
    pub async fn pop(&self) -> DrawRequest {
        self.channel.receive().await
    }

    /// Number of requests currently queued.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl Default for DrawQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;

    fn lane_request(lane: usize) -> DrawRequest {
        DrawRequest {
            log_one: lane == 0,
            log_two: lane == 1,
            log_three: lane == 2,
        }
    }

    #[test]
    fn pop_returns_requests_in_push_order() {
        let queue = DrawQueue::new();
        for lane in 0..3 {
            assert!(queue.push(lane_request(lane)));
        }
        assert!(queue.push(DrawRequest::ALL));
        assert!(queue.push(DrawRequest::default()));

        for lane in 0..3 {
            assert_eq!(block_on(queue.pop()), lane_request(lane));
        }
        assert_eq!(block_on(queue.pop()), DrawRequest::ALL);
        assert_eq!(block_on(queue.pop()), DrawRequest::default());
        assert!(queue.is_empty());
    }

    #[test]
    fn push_to_full_queue_drops_without_blocking() {
        let queue = DrawQueue::new();
        for _ in 0..QUEUE_DEPTH {
            assert!(queue.push(DrawRequest::ALL));
        }
        assert_eq!(queue.len(), QUEUE_DEPTH);

        // The sixth push must return immediately with a drop indicator.
        assert!(!queue.push(lane_request(0)));
        assert_eq!(queue.len(), QUEUE_DEPTH);

        // The dropped request is gone; the queue still drains in order.
        for _ in 0..QUEUE_DEPTH {
            assert_eq!(block_on(queue.pop()), DrawRequest::ALL);
        }
        assert!(queue.is_empty());
    }
}

//! The rotating hero tagline.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

pub const TAGLINES: [&str; 5] = [
    "Meet the world's first emotional OS for caregiving relationships",
    "For every task, every feeling, every day",
    "Support that listens before it suggests",
    "When AI can't help, we bring humans who can",
    "Real help—AI and human, in one place",
];

/// Time each tagline stays up.
pub const ROTATION_PERIOD: Duration = Duration::from_secs(3);

/// Index after `index`, wrapping after the last tagline.
pub fn next_index(index: usize) -> usize {
    (index + 1) % TAGLINES.len()
}

/// A running rotation. Dropping it stops the timer.
#[derive(Debug)]
pub struct TaglineCarousel {
    index: watch::Receiver<usize>,
    task: JoinHandle<()>,
}

impl TaglineCarousel {
    /// Start rotating on the current tokio runtime.
    pub fn start() -> Self {
        Self::with_period(ROTATION_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        let (tx, rx) = watch::channel(0);
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                tx.send_modify(|index| *index = next_index(*index));
                if tx.is_closed() {
                    break;
                }
            }
            tracing::trace!("tagline rotation stopped");
        });
        Self { index: rx, task }
    }

    pub fn index(&self) -> usize {
        *self.index.borrow()
    }

    pub fn current(&self) -> &'static str {
        TAGLINES[self.index()]
    }

    /// A receiver that sees every rotation.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index.clone()
    }
}

impl Drop for TaglineCarousel {
    fn drop(&mut self) {
        self.task.abort();
    }
}

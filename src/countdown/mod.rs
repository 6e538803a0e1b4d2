//! Surgery Countdown
//!
//! Time-remaining arithmetic and a ticker that recomputes it on a fixed
//! one-second cadence for as long as it is alive.

mod clock;
mod remaining;
mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use remaining::{parse_target, time_remaining, time_remaining_str, TimeRemaining};
pub use ticker::{CountdownTicker, COUNTDOWN_CADENCE};

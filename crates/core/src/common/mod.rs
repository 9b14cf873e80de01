pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

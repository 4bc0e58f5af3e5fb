//! Scroll tracking: layout seam, margin probe, throttle, and the scroll tracker.

pub mod layout;
pub mod margin;
pub mod scroll_tracker;
pub mod throttle;
pub mod types;

pub use layout::{Layout, Rect, StaticLayout};
pub use margin::{parse_length, LengthContext, Margin};
pub use scroll_tracker::{ScrollTracker, SCROLL_THROTTLE_INTERVAL, SETTLE_DELAY};
pub use throttle::Throttle;
pub use types::{HeadingLink, TrackerEvent};

mod clock;
mod countdown_format;
mod countdown_ticker;
mod display_surface;
mod expiration_renderer;
mod expiry_target;
mod remaining_time;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown_format::{
    CountdownFormat, CountdownFormatError, CountdownText, Granularity, SmoothingBand,
};
pub use countdown_ticker::{spawn_countdown, CountdownError, CountdownHandle, CountdownOutcome};
pub use display_surface::{DisplaySurface, SharedText};
pub use expiration_renderer::ExpirationRenderer;
pub use expiry_target::ExpiryTarget;
pub use remaining_time::RemainingTime;

pub const EXPIRED_TEXT: &str = "Expired";

use chrono::{DateTime, Utc};
use mockall::automock;

/// Source of "now" for expiry windows and redemption timestamps.
#[automock]
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub mod renewal;

pub use renewal::{ButtonRule, ButtonState, RenewalStatus};

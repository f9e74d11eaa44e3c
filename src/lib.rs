//! Background monitor that watches keyboard/mouse idleness and reminds you to take a break once
//! you have been working for too long, nagging periodically until you actually step away.
//!

pub mod cli;
pub mod daemon;
pub mod idle;
pub mod notify;
pub mod utils;

#[macro_use]
extern crate serde;

mod config;
mod error;
mod hash;
mod raffle;
mod serde_hex;
mod tally;
mod util;
mod verify;
mod vote;
mod vote_set;
mod voter;

pub use config::*;
pub use error::*;
pub use hash::*;
pub use raffle::*;
pub use serde_hex::*;
pub use tally::*;
pub use util::*;
pub use verify::*;
pub use vote::*;
pub use vote_set::*;
pub use voter::*;

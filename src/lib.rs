#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bitgrid;
mod board;
mod common;
mod config;
mod diffusion;
mod env;
#[cfg(feature = "std")]
mod logging;
mod policy;
mod reward;
mod ship;
mod trial;

pub mod prelude;

pub use bitgrid::{BitGrid, BitGridError, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use diffusion::*;
pub use env::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, level_from_env, LOG_ENV_VAR};
pub use policy::*;
pub use reward::*;
pub use ship::*;
pub use trial::*;

//! Wa-Tor world state.
//!
//! A fixed `width × height` toroidal grid of [`Cell`]s plus the write buffer
//! that the next generation is built into.
//!
//! # Lifecycle
//!
//! ```text
//! WorldState::seeded(config)      random placement, timers at their maximum
//!   ├── get(pos)                  read the current generation
//!   ├── set_next(pos, cell)       write the next generation
//!   └── swap()                    next becomes current, next is cleared
//! ```

mod cell;
mod config;
mod error;
mod grid;
mod pos;
mod state;

pub use cell::Cell;
pub use config::{BreedRules, WatorConfig};
pub use error::{ConfigError, ConfigResult};
pub use grid::{Grid, Population};
pub use pos::{Direction, Pos};
pub use state::WorldState;

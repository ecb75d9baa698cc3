pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod io;
pub mod load;
pub mod permission;
pub mod range;
pub mod record;

pub use error::{PermitsError, Result};

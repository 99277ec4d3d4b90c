//! Viewer state machine and its async session driver

mod machine;
mod session;
mod state;

pub use machine::*;
pub use session::*;
pub use state::*;

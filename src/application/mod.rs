// Application layer - the fleet aggregate and the per-process session that
// front ends (interactive menu, one-shot CLI commands) drive.

pub mod error;
mod registry;
mod seed;
mod session;

pub use error::*;
pub use registry::*;
pub use seed::*;
pub use session::*;

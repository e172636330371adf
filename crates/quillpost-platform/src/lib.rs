mod environment;
mod paths;

pub use environment::{HostCapabilities, HostEnvironment, HostError};
pub use paths::{AppPaths, AppPathsError};

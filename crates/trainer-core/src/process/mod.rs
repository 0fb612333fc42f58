mod handle;
mod locator;
pub mod provider;

// Mock processes for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use handle::ProcessHandle;
pub use locator::ProcessLocator;
pub use provider::{ProcessInfo, ProcessProvider, SystemProcessProvider};

#[doc(hidden)]
pub use mock::{MockProcess, MockProcessBuilder, MockProcessProvider};

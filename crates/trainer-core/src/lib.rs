pub mod config;
pub mod error;
pub mod memory;
pub mod orchestrator;
pub mod process;
pub mod schedule;
pub mod session;

pub use config::{
    FeatureDescriptor, GameDescriptor, GameRegistry, PointerWidth, ValueWidth, load_registry,
    parse_registry,
};
pub use error::{Error, Result};
pub use memory::{MemoryAccessor, ReadMemory, WriteMemory};
pub use orchestrator::{
    ConnectionState, Observer, ObserverEvent, Orchestrator, RecordingObserver, WAITING_TITLE,
    connected_title, format_thousands,
};
pub use process::{
    ProcessHandle, ProcessInfo, ProcessLocator, ProcessProvider, SystemProcessProvider,
};
pub use schedule::IntervalTimer;
pub use session::{Applied, ApplyError, GameSession};

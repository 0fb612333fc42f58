mod accessor;
mod reader;
mod width;

pub use accessor::MemoryAccessor;
pub use reader::{ReadMemory, WriteMemory};
pub use width::{PointerWidth, ValueWidth};

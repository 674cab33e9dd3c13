pub mod core;
pub mod counters;
pub mod directory;
pub mod gate;
pub mod signature;
pub mod types;
pub mod worker;

// Re-export main types for easier access
pub use self::core::{DEFAULT_MAX_WORKERS, Scanner, ScannerConfig};
pub use counters::{CounterSnapshot, ScanCounters};
pub use gate::{CapacityGate, SlotPermit};
pub use signature::{Category, SignatureSet};
pub use types::{DirectoryEntry, ElapsedParts, ScanMode, ScanReport};
pub use worker::{FileInspector, Inspect};

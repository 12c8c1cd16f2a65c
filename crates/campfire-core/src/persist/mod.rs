// ── Persistence layer ──
//
// Snapshot codec, storage collaborators, rehydration, and the
// background writer.

mod persistor;
mod snapshot;
mod storage;

pub use persistor::{PersistControl, PersistHandle, RehydrateOutcome, rehydrate, spawn_writer};
pub use snapshot::{PersistMeta, PersistedSnapshot, SNAPSHOT_VERSION, decode, encode};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

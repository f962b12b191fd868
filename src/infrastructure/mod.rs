mod extract;
mod session;
mod storage;

pub use extract::{snapshot::SnapshotExtractor, Selectors};
pub use session::Session;
pub use storage::fs_store::FileSystemStore;

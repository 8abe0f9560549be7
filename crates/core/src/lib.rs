pub mod bootstrap;
pub mod config;
pub mod floorgen;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod types;

pub use bootstrap::{next_floor, start_game};
pub use config::FloorConfig;
pub use floorgen::{
    AssemblyError, Floor, FloorAssembler, FloorLayout, Game, assemble_floor, parse_layout,
};
pub use snapshot::{Snapshot, SnapshotError, SnapshotPayload};
pub use source::{
    CommandLayoutSource, FileLayoutSource, GenerationRequest, LayoutSource, NO_PREVIOUS,
};
pub use store::{FloorStore, MemoryStore, StoreError};
pub use types::*;

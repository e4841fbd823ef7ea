pub mod store;
pub mod sweeper;

pub use store::{Artifact, ArtifactStore, ArtifactStoreError};
pub use sweeper::spawn_retention_sweeper;

//! Domain value types shared between the repository client, the
//! extractor, and the document renderer.

pub mod change;
pub mod commit;
pub mod facts;
pub mod tag;

pub use change::{ChangeType, ChangedFile};
pub use commit::Commit;
pub use facts::ReleaseFacts;
pub use tag::BoundaryTag;

//! Remote sync boundary
//!
//! Path normalization, the [`Transport`] trait the host implements, and
//! background uploads of snapshot payloads.

mod path;
mod transport;
mod worker;

pub use path::{basename, canonical_path, OUTPUTS_PREFIX};
pub use transport::{DirectoryTransport, Transport, UploadAck};
pub use worker::{SyncHandle, SyncStatus};

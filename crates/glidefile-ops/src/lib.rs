//! File operations engine for glidefile.
//!
//! Create, rename and delete are synchronous single-entry operations.
//! Copy and move stream file contents through a fixed-size buffer, report
//! byte-level progress, and honour a cancellation token between chunks,
//! files and directories. The `start_*` functions run an operation on the
//! blocking pool and report through a channel.
//!
//! No operation ever overwrites an existing destination.

mod copy;
mod create;
mod delete;
mod move_op;
mod progress;
mod rename;

pub use copy::{copy_entry, start_copy};
pub use create::{DEFAULT_FILE_EXTENSION, create_entry};
pub use delete::{delete_entry, start_delete};
pub use move_op::{move_entry, start_move};
pub use progress::{OperationComplete, OperationProgress, OperationType, TransferResult};
pub use rename::{rename_entry, validate_filename};

/// Default channel buffer size for operation progress updates.
pub const OPERATION_CHANNEL_SIZE: usize = 100;

/// Chunk size used when streaming file contents.
pub const COPY_BUFFER_SIZE: usize = 81_920;

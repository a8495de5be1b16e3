//! # OpenMusic Jobs
//!
//! Producer side of the export pipeline. A job is serialized into an
//! [`JobEnvelope`] and pushed onto a named Redis list; a separate consumer
//! (not part of this workspace) renders and mails the export. Delivery
//! guarantees are the broker's concern.

pub mod error;
pub mod job;
pub mod producer;

pub use error::{QueueError, QueueResult};
pub use job::{ExportPlaylistsJob, JobEnvelope, JobId};
pub use producer::{create_queue_pool, InMemoryMessageProducer, MessageProducer, RedisMessageProducer};

//! Streams, nodes and the registration-order scheduler.
//!
//! A [`Graph`] owns every stream buffer, delay line and node. Builder
//! methods register nodes one at a time; [`Graph::process`] then runs each
//! node's kernel once per block, in the order the nodes were registered,
//! threading their state records forward from block to block.

/// Circular buffers shared by delay writer and reader nodes.
pub mod delay;
/// Node kinds, render context and per-node dispatch.
pub mod node;
/// Lock-free control values read by parameter nodes.
pub mod param;
/// The graph builder and block scheduler.
pub mod scheduler;
/// Fixed-capacity sample buffers.
pub mod stream;

pub use delay::{DelayLine, DelayLineId};
pub use node::{Kernel, Node, NodeId, RenderCtx};
pub use param::ParamHandle;
pub use scheduler::{BlockReport, Graph};
pub use stream::StreamId;

use std::fmt;

use crate::graph::{DelayLineId, StreamId};

/// Configuration errors reported while building or driving a graph.
///
/// Invariant violations inside kernels (envelope level, limiter divisor) are
/// not represented here; those are assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// `process` was asked for more samples than a stream can hold.
    BlockTooLarge { requested: usize, max: usize },
    /// The node table is full.
    TooManyNodes { max: usize },
    UnknownStream(StreamId),
    UnknownDelayLine(DelayLineId),
    /// A delay line already has its single writer node.
    DelayLineHasWriter(DelayLineId),
    InvalidDelayRange {
        min: usize,
        max: usize,
        buffer_size: usize,
    },
    InvalidParameter { name: &'static str, value: f64 },
    InvalidConfig(&'static str),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::BlockTooLarge { requested, max } => write!(
                f,
                "block of {requested} samples exceeds the maximum block size of {max}"
            ),
            GraphError::TooManyNodes { max } => {
                write!(f, "too many audio nodes (limit is {max})")
            }
            GraphError::UnknownStream(id) => write!(f, "stream {} does not exist", id.index()),
            GraphError::UnknownDelayLine(id) => {
                write!(f, "delay line {} does not exist", id.index())
            }
            GraphError::DelayLineHasWriter(id) => {
                write!(f, "delay line {} already has a writer", id.index())
            }
            GraphError::InvalidDelayRange {
                min,
                max,
                buffer_size,
            } => write!(
                f,
                "delay range {min}..={max} samples does not fit a buffer of {buffer_size}"
            ),
            GraphError::InvalidParameter { name, value } => {
                write!(f, "invalid value {value} for parameter `{name}`")
            }
            GraphError::InvalidConfig(reason) => write!(f, "invalid engine config: {reason}"),
        }
    }
}

impl std::error::Error for GraphError {}

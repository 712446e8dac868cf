//! Error types for plot model operations.

use thiserror::Error;

use crate::axis::AxisType;
use crate::graph::GraphId;

/// Result alias used across the crate.
pub type PlotResult<T> = Result<T, PlotError>;

/// Errors reported by the plot model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlotError {
    /// A graph exists without its legend item.
    ///
    /// Graphs and legend items are only created and destroyed together, so
    /// this indicates a broken plot, not a user error.
    #[error("graph {0} has no legend item")]
    MissingLegendItem(GraphId),

    /// The referenced graph is not part of the plot.
    #[error("unknown graph {0}")]
    UnknownGraph(GraphId),

    /// Key and value axes share an orientation, so the graph has no 2D mapping.
    #[error("key axis {key} and value axis {value} are parallel")]
    ParallelAxes { key: AxisType, value: AxisType },

    /// Key and value vectors differ in length.
    #[error("data length mismatch: {keys} keys, {values} values")]
    DataLengthMismatch { keys: usize, values: usize },
}

use std::collections::TryReserveError;

use thiserror::Error as ThisError;

use crate::binder::Direction;

#[derive(Debug, ThisError)]
/// Error type used to indicate a failed bind call.
///
/// A failed bind leaves the parameter store exactly as it was before the call, so the caller
/// can inspect the failure and issue the bind again. Already bound positions are never
/// affected.
pub enum Error {
    /// A collection has been bound with a direction other than [`Direction::In`]. A flattened
    /// collection travels as one text scalar and has no channel to carry values back out of
    /// the statement.
    #[error(
        "Collection parameters are input only, but a collection bind has been requested with \
        direction {direction:?}. A flattened collection is sent to the statement as a single \
        text value. There is no way to transport values in the opposite direction through it."
    )]
    InvalidDirection {
        /// The offending direction passed to the collection bind.
        direction: Direction,
    },
    /// Memory allocation failed while concatenating the flattened text payload of a collection
    /// parameter. The position the bind was aimed at keeps its previous value.
    #[error(
        "Not enough memory to build the flattened text payload for a collection parameter."
    )]
    AllocationFailure(#[from] TryReserveError),
}

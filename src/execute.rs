use crate::parameter::EncodedParameter;

/// Boundary to the statement executor, which prepares the statement text and sends the bound
/// parameters over the wire. Everything behind this trait is out of scope for this crate: the
/// binder produces the ordered parameter snapshot and does not interpret backend errors.
///
/// The snapshot passed to [`Self::execute`] is only valid for the duration of the call. An
/// implementation must not retain it past the next [`crate::Binder::refresh`], which the
/// borrow already rules out for safe implementations.
pub trait Execute {
    /// Backend level failure reported by the executor. Opaque to the binder.
    type Error;

    /// Issues the statement with the given positional parameters, in order.
    fn execute(&mut self, parameters: &[EncodedParameter]) -> Result<(), Self::Error>;
}

use thiserror::Error;

/// Error type for the fallible (read-side) operations of
/// [`Stream`](crate::Stream).
///
/// Writes cannot fail; every decode failure is surfaced to the caller
/// immediately, and a failed decode is a hard stop for that call. Malformed
/// or truncated input is never silently patched over.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum StreamError {
    /// A read needed more bytes than remain between the cursor and the end
    /// of the buffer. The cursor is not advanced when this is returned.
    #[error("read past the end of the stream")]
    EndOfStream,

    /// A 32-bit variable-length integer consumed 5 bytes without reaching a
    /// terminating (high-bit-clear) byte. A `u32` never needs more than 5
    /// groups, so such input is necessarily malformed.
    #[error("variable-length 32-bit integer exceeds 5 bytes")]
    VarIntTooBig,

    /// A 64-bit variable-length integer consumed 10 bytes without reaching
    /// a terminating byte.
    #[error("variable-length 64-bit integer exceeds 10 bytes")]
    VarLongTooBig,
}

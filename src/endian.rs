/// Byte order used by the multi-byte fixed-width operations of a
/// [`Stream`](crate::Stream).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Endian {
    /// Most-significant byte first.
    Big,
    /// Least-significant byte first.
    Little,
}

impl Endian {
    /// Returns the opposite byte order.
    pub fn swapped(self) -> Self {
        match self {
            Endian::Big => Endian::Little,
            Endian::Little => Endian::Big,
        }
    }
}

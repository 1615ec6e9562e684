//! aggregate/limit.rs
//! Read bound shared by the aggregator (input lines) and the decoder (records).

/// How many items a run may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadLimit {
    /// Read until the source is exhausted.
    #[default]
    All,
    /// Read at most this many items.
    At(usize),
}

impl ReadLimit {
    /// Upper bound suitable for `Iterator::take`.
    pub fn as_take(self) -> usize {
        match self {
            ReadLimit::All => usize::MAX,
            ReadLimit::At(n) => n,
        }
    }

    /// True if another item may be consumed after `consumed` items.
    pub fn allows(self, consumed: usize) -> bool {
        match self {
            ReadLimit::All => true,
            ReadLimit::At(n) => consumed < n,
        }
    }

    pub fn is_empty(self) -> bool {
        self == ReadLimit::At(0)
    }
}

/// Signed counts come straight from the command line; zero and negatives
/// both mean "read nothing".
impl From<i64> for ReadLimit {
    fn from(n: i64) -> Self {
        ReadLimit::At(usize::try_from(n).unwrap_or(0))
    }
}

impl From<Option<i64>> for ReadLimit {
    fn from(n: Option<i64>) -> Self {
        n.map_or(ReadLimit::All, ReadLimit::from)
    }
}

impl From<usize> for ReadLimit {
    fn from(n: usize) -> Self {
        ReadLimit::At(n)
    }
}

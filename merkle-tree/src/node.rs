//! Tree node: an immutable wrapper around one leaf or merged value.

use std::fmt;

use bincode::{Decode, Encode};

/// A single value in the tree, either a leaf or the output of a merge.
///
/// Nodes carry no position or identity: two nodes holding equal data are
/// interchangeable, so equality and hashing go through the wrapped value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<T> {
    data: T,
}

impl<T> Node<T> {
    /// Wrap a value.
    pub fn new(data: T) -> Self {
        Node { data }
    }

    /// The wrapped value.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consume the node and return the wrapped value.
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> From<T> for Node<T> {
    fn from(data: T) -> Self {
        Node::new(data)
    }
}

impl<T: AsRef<[u8]>> Node<T> {
    /// Lowercase hex rendering of the wrapped bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.data.as_ref())
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.data, f)
    }
}

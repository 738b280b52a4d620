mod aggregate;
mod chain;
mod compare;
mod error;
mod function;
mod state;
mod types;

pub use aggregate::MedianAggregate;
pub use chain::{ChainIter, Node, NodeId, SortedChain};
pub use compare::Comparator;
pub use error::MedianError;
pub use function::{resolve_comparator, MedianFunc};
pub use state::{finalize, MedianState};
pub use types::{DeclaredType, Value, ValueKind};

pub type Result<T> = std::result::Result<T, error::MedianError>;

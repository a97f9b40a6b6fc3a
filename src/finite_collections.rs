mod array;
mod heaped_map;
mod set;
mod size;

pub use array::Array;
pub use heaped_map::{Comparator, FiniteHeapedMap};
pub use set::Set;
pub use size::Size;

pub mod finite_collections;
pub mod sat;

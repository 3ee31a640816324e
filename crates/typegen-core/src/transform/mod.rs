pub mod name_normalizer;
pub mod names;
pub mod resolver;

pub use resolver::resolve;

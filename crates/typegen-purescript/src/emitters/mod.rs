pub mod constructors;
pub mod imports;
pub mod types;

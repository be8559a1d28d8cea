pub mod dump;
pub mod emit;
pub mod input;

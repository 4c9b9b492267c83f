pub mod element;
pub mod input;
pub mod schedule;

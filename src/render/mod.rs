pub mod backend;
pub mod cpu;
pub mod draw;
pub mod frame;
pub mod record;

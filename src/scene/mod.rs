pub mod motion;
pub mod noise;
pub mod particles;
pub mod pointer;
pub mod surface;

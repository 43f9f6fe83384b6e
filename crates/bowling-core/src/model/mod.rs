pub mod frame;
pub mod pins;
pub mod score;

pub mod describe;
pub mod session;

pub mod output;
pub mod session;

#![allow(dead_code)]

mod mock_ports;
mod test_app;

pub use mock_ports::*;
pub use test_app::*;

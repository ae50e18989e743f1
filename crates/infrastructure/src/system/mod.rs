pub mod resource_probe;

pub use resource_probe::SysinfoResourceProbe;

pub mod devices;

pub use devices::{DeviceRepository, DeviceStore};

#[cfg(test)]
pub use devices::MockDeviceStore;

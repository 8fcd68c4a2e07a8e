pub mod devices;
pub mod report;

pub use devices::DeviceService;

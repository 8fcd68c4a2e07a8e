pub mod device;
pub mod report;

pub use device::{Device, DeviceInput, DeviceListResponse, DeviceQueryParams, NewDevice};
pub use report::{ConsumptionReport, DeviceConsumption, Suggestion};

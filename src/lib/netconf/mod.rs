// SPDX-License-Identifier: Apache-2.0

mod device;
mod registry;

pub use self::device::{DeviceState, NetworkDevice};
pub use self::registry::{DeviceRegistry, NetconfNodeStatus};

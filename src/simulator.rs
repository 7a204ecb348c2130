//! Simulator model, `simctl` JSON parsing, and target resolution.
//!
//! `xcrun simctl` reports devices grouped under runtime identifiers:
//!
//! ```json
//! {
//!   "devices" : {
//!     "com.apple.CoreSimulator.SimRuntime.iOS-17-0" : [ { "udid": ..., "name": ... } ],
//!     "com.apple.CoreSimulator.SimRuntime.tvOS-17-0" : [ ... ]
//!   }
//! }
//! ```
//!
//! The runtime list is queried separately and each runtime is looked up in
//! the devices map independently; a runtime with no entry simply contributes
//! zero simulators. Devices with a malformed UDID or a missing name are
//! skipped rather than failing the whole enumeration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booted simulator that can be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulator {
    pub udid: Uuid,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct RuntimeList {
    runtimes: Vec<Runtime>,
}

#[derive(Debug, Deserialize)]
struct Runtime {
    identifier: String,
}

#[derive(Debug, Deserialize)]
struct DeviceList {
    devices: HashMap<String, Vec<serde_json::Value>>,
}

/// Parse the output of the two `simctl list` queries into simulators,
/// preserving runtime enumeration order.
pub fn parse_available_simulators(runtimes_json: &str, devices_json: &str) -> Vec<Simulator> {
    let runtimes: RuntimeList = match serde_json::from_str(runtimes_json) {
        Ok(list) => list,
        Err(error) => {
            tracing::debug!(%error, "failed to parse simctl runtime list");
            return Vec::new();
        }
    };

    let devices: DeviceList = match serde_json::from_str(devices_json) {
        Ok(list) => list,
        Err(error) => {
            tracing::debug!(%error, "failed to parse simctl device list");
            return Vec::new();
        }
    };

    runtimes
        .runtimes
        .iter()
        .flat_map(|runtime| {
            devices
                .devices
                .get(&runtime.identifier)
                .map(|entries| entries.as_slice())
                .unwrap_or_default()
                .iter()
                .filter_map(parse_device)
        })
        .collect()
}

fn parse_device(device: &serde_json::Value) -> Option<Simulator> {
    let udid = device.get("udid")?.as_str()?;
    let udid = Uuid::parse_str(udid).ok()?;
    let name = device.get("name")?.as_str()?.to_string();

    Some(Simulator { udid, name })
}

/// Pick the simulator to record.
///
/// With an explicit UDID the match must be exact; an unknown or malformed
/// UDID resolves to `None` rather than silently falling back to another
/// device. Without one, the first enumerated simulator wins.
pub fn select_target(simulators: &[Simulator], explicit_udid: Option<&str>) -> Option<Simulator> {
    match explicit_udid {
        Some(raw) => {
            let udid = Uuid::parse_str(raw).ok()?;
            simulators.iter().find(|sim| sim.udid == udid).cloned()
        }
        None => simulators.first().cloned(),
    }
}

//! Sensor acquisition trait

use crate::error::Result;
use crate::perception::{Color, SensorSnapshot};

/// Sensor acquisition trait
///
/// Implementations must complete each read within a bounded time (tens of
/// milliseconds). A hardware timeout surfaces as an absent reading inside
/// the snapshot (`distance: None`, saturated color frequencies), never as
/// an `Err` - the error channel is reserved for bus/driver faults.
pub trait SensorHub: Send {
    /// Acquire one snapshot of all sensors
    ///
    /// # Arguments
    /// * `previous` - the detected color of the preceding cycle, carried by
    ///   the caller and stamped into the snapshot for transition detection
    fn read_all(&mut self, previous: Color) -> Result<SensorSnapshot>;

    /// Read the ranging sensor alone
    ///
    /// Returns the distance in centimeters, or `None` when no echo came
    /// back within the timeout.
    fn read_distance(&mut self) -> Result<Option<f32>>;
}

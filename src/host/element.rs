use crate::foundation::core::Size;
use crate::scene::surface::HostMeasurement;

/// The element a backdrop is mounted into.
///
/// The platform adapter owns the actual resize observer; `observe_resize` and `disconnect`
/// start and stop delivery of notifications to [`crate::Backdrop::on_resize`].
pub trait HostElement {
    /// Measure the element, its container and the viewport.
    fn measure(&self) -> HostMeasurement;

    /// Start delivering size-change notifications.
    fn observe_resize(&mut self);

    /// Stop delivering size-change notifications.
    fn disconnect(&mut self);
}

/// Host with a measurement set by the caller. Used for headless rendering and tests.
#[derive(Clone, Debug)]
pub struct StaticHost {
    measurement: HostMeasurement,
    observing: bool,
    disconnects: u32,
}

impl StaticHost {
    /// Host whose element and container are both `size`.
    pub fn new(size: Size, device_pixel_ratio: f64) -> Self {
        Self::with_measurement(HostMeasurement::fixed(size, device_pixel_ratio))
    }

    /// Host reporting exactly `measurement`.
    pub fn with_measurement(measurement: HostMeasurement) -> Self {
        Self {
            measurement,
            observing: false,
            disconnects: 0,
        }
    }

    /// Change what the next `measure` returns.
    pub fn set_measurement(&mut self, measurement: HostMeasurement) {
        self.measurement = measurement;
    }

    /// Whether resize observation is active.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// How many times observation was disconnected.
    pub fn disconnects(&self) -> u32 {
        self.disconnects
    }
}

impl HostElement for StaticHost {
    fn measure(&self) -> HostMeasurement {
        self.measurement
    }

    fn observe_resize(&mut self) {
        self.observing = true;
    }

    fn disconnect(&mut self) {
        if self.observing {
            self.observing = false;
            self.disconnects += 1;
        }
    }
}

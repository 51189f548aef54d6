use crate::error::Result;
use crate::geometry::{EnergyCollector, RayHitData};
use crate::Float;

pub trait PositionTracker {
    fn begin_frequency(&mut self, _frequency: Float) {}
    fn begin_ray(&mut self) {}
    fn record_hit(&mut self, _hit: &RayHitData) {}
    fn end_ray(&mut self) {}
    fn end_frequency(&mut self) {}
    fn switch_to_reference_model(&mut self) {}
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracker;

impl PositionTracker for NoopTracker {}

pub trait CollectorsTracker {
    fn save(&mut self, collectors: &[EnergyCollector], destination: &str) -> Result<()>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn noop_tracker_is_inert() {
        let mut tracker = NoopTracker;
        tracker.begin_frequency(1000.0);
        tracker.begin_ray();
        tracker.end_ray();
        tracker.end_frequency();
        tracker.switch_to_reference_model();
        assert!(tracker.flush().is_ok());
    }
}

use crate::Float;

pub const SOUND_SPEED: Float = 343.216;

pub const ACCURACY_EPSILON: Float = 5e-6;

// looser than ACCURACY_EPSILON: summed sub-triangle areas accumulate more
// floating point error than a single distance check
pub const AREA_EPSILON: Float = 1e-4;

pub const DEFAULT_POPULATION: usize = 37;

pub const DEFAULT_RADIUS_MULTIPLIER: Float = 4.0;

pub const DEFAULT_MAX_REFLECTIONS: u32 = 15;

pub const DEFAULT_SAMPLE_RATE: Float = 96_000.0;

pub const DEFAULT_SOURCE_HEIGHT: Float = 4.0;

pub const RAY_SOURCE_MARGIN_FACTOR: Float = 1.1;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rayon::prelude::*;

use crate::collection_rules::CollectionRule;
use crate::collector_layout::{CollectorLayout, LayoutKind};
use crate::constants::{ACCURACY_EPSILON, DEFAULT_MAX_REFLECTIONS, DEFAULT_SAMPLE_RATE};
use crate::diffusion::DiffusionResult;
use crate::error::{Error, Result};
use crate::geometry::Ray;
use crate::mesh::Mesh;
use crate::ray_source::RaySource;
use crate::reflection::ReflectionEngine;
use crate::tracker::{NoopTracker, PositionTracker};
use crate::Float;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    pub frequencies: Vec<Float>,
    pub source_power: Float,
    pub num_collectors: usize,
    // N: the source emits N^2 rays (numRaysSquared names the option but holds N, not N^2)
    pub num_rays_squared: usize,
    pub max_reflections: u32,
    pub sample_rate: Option<Float>,
    pub collection_rule: CollectionRule,
    pub layout: LayoutKind,
    pub absorption: Float,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.frequencies.is_empty() {
            return Err(Error::InvalidConfiguration(
                "frequencies must not be empty".to_string(),
            ));
        }
        for &frequency in &self.frequencies {
            if frequency <= ACCURACY_EPSILON {
                return Err(Error::InvalidConfiguration(format!(
                    "frequency must be > {}, got {}",
                    ACCURACY_EPSILON, frequency
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.absorption) {
            return Err(Error::InvalidConfiguration(format!(
                "absorption must be in [0, 1], got {}",
                self.absorption
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frequencies: vec![1000.0],
            source_power: 1.0,
            num_collectors: 37,
            num_rays_squared: 100,
            max_reflections: DEFAULT_MAX_REFLECTIONS,
            sample_rate: Some(DEFAULT_SAMPLE_RATE),
            collection_rule: CollectionRule::default(),
            layout: LayoutKind::DoubleAxis,
            absorption: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub diffusion: DiffusionResult,
    pub tracker_warning: Option<Error>,
}

#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    reflection_engine: ReflectionEngine,
    collection_rule: CollectionRule,
    max_reflections: u32,
}

impl Simulator {
    pub fn new(
        reflection_engine: ReflectionEngine,
        collection_rule: CollectionRule,
        max_reflections: u32,
    ) -> Self {
        Self {
            reflection_engine,
            collection_rule,
            max_reflections,
        }
    }

    pub fn trace_frequency<T: PositionTracker>(
        &self,
        mesh: &Mesh,
        layout: &mut CollectorLayout,
        rays: RaySource,
        frequency: Float,
        tracker: &mut T,
    ) -> Float {
        tracker.begin_frequency(frequency);
        let mut escaped = 0u32;
        let mut traced = 0u32;
        for ray in rays {
            traced += 1;
            tracker.begin_ray();
            if !self.trace_ray(mesh, layout, &ray, frequency, 0, tracker) {
                escaped += 1;
            }
            tracker.end_ray();
        }
        tracker.end_frequency();
        log::debug!(
            "frequency {:.1} Hz: {} rays traced, {} escaped without deposit",
            frequency,
            traced,
            escaped
        );
        let coefficient = DiffusionResult::coefficient_for(layout.collectors());
        log::debug!(
            "frequency {:.1} Hz: diffusion coefficient {:.4}",
            frequency,
            coefficient
        );
        coefficient
    }

    fn trace_ray<T: PositionTracker>(
        &self,
        mesh: &Mesh,
        layout: &mut CollectorLayout,
        current: &Ray,
        frequency: Float,
        bounces: u32,
        tracker: &mut T,
    ) -> bool {
        let triangle_hit = mesh.nearest_hit(current, frequency);
        let collector_hit = layout.nearest_hit(current, frequency);

        let collector_wins = match (&triangle_hit, &collector_hit) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(t), Some((_, c))) => c.time <= t.time + ACCURACY_EPSILON,
        };

        if collector_wins {
            let (index, hit) = collector_hit.expect("collector_wins implies Some");
            self.collection_rule
                .deposit(&mut layout.collectors_mut()[index], &hit);
            return true;
        }

        let hit = match triangle_hit {
            Some(hit) => hit,
            None => {
                log::trace!("ray escaped without hitting triangle or collector");
                return false;
            }
        };

        tracker.record_hit(&hit);
        if bounces >= self.max_reflections {
            return false;
        }

        let children = match self.reflection_engine.reflect(current, &hit) {
            Ok(children) => children,
            Err(err) => {
                log::trace!("reflection produced a degenerate ray, dropping: {}", err);
                return false;
            }
        };

        let mut deposited = false;
        for child in &children {
            if self.trace_ray(mesh, layout, child, frequency, bounces + 1, tracker) {
                deposited = true;
            }
        }
        deposited
    }
}

pub fn run_all(config: &SimulationConfig, mesh: &Mesh) -> Result<SimulationReport> {
    run_all_with(config, mesh, NoopTracker::default)
}

pub fn run_all_with<T, F>(config: &SimulationConfig, mesh: &Mesh, make_tracker: F) -> Result<SimulationReport>
where
    T: PositionTracker,
    F: Fn() -> T + Sync,
{
    config.validate()?;
    let layout_template = CollectorLayout::build(
        config.layout,
        mesh,
        config.num_collectors,
        config.sample_rate,
    )?;
    let rays_template = RaySource::new(mesh, config.num_rays_squared, config.source_power)?;
    let simulator = Simulator::new(
        ReflectionEngine::Specular {
            absorption: config.absorption,
        },
        config.collection_rule,
        config.max_reflections,
    );

    let passes: Vec<(Float, Float, Option<Error>)> = config
        .frequencies
        .par_iter()
        .map(|&frequency| {
            let mut layout = layout_template.clone();
            let rays = rays_template.clone();
            let mut tracker = make_tracker();
            let coefficient =
                simulator.trace_frequency(mesh, &mut layout, rays, frequency, &mut tracker);
            let flush_err = tracker.flush().err();
            if let Some(err) = &flush_err {
                log::warn!("tracker failed to flush for frequency {}: {}", frequency, err);
            }
            (frequency, coefficient, flush_err)
        })
        .collect();

    let mut diffusion = DiffusionResult::new();
    let mut tracker_warning = None;
    for (frequency, coefficient, flush_err) in passes {
        diffusion.insert(frequency, coefficient);
        if tracker_warning.is_none() {
            tracker_warning = flush_err;
        }
    }

    Ok(SimulationReport {
        diffusion,
        tracker_warning,
    })
}

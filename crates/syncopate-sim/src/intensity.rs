//! Piecewise-linear intensity curve over simulated time, plus the
//! percentile band used to normalize it.

use syncopate_core::constants::*;
use syncopate_core::types::IntensitySample;

/// Sorted intensity samples and the derived floor/ceiling band.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityTimeline {
    samples: Vec<IntensitySample>,
    floor: f64,
    ceiling: f64,
}

impl Default for IntensityTimeline {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            floor: 0.0,
            ceiling: 1.0,
        }
    }
}

impl IntensityTimeline {
    /// Build from raw samples. Returns the timeline and how many samples were dropped.
    pub fn from_samples(raw: &[IntensitySample]) -> (Self, usize) {
        let mut samples: Vec<IntensitySample> = raw
            .iter()
            .filter(|s| s.time.is_finite() && s.intensity.is_finite())
            .map(|s| IntensitySample {
                time: s.time.max(0.0),
                intensity: s.intensity.clamp(0.0, 1.0),
            })
            .collect();
        let dropped = raw.len() - samples.len();

        // Stable: equal times keep input order.
        samples.sort_by(|a, b| a.time.total_cmp(&b.time));

        let (floor, ceiling) = band(&samples);
        (
            Self {
                samples,
                floor,
                ceiling,
            },
            dropped,
        )
    }

    pub fn samples(&self) -> &[IntensitySample] {
        &self.samples
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Intensity at time `t`, clamped to the endpoint values outside the sampled range.
    pub fn value_at(&self, t: f64) -> f64 {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return DEFAULT_INTENSITY;
        };
        if t <= first.time {
            return first.intensity;
        }
        if t >= last.time {
            return last.intensity;
        }

        // First sample strictly after t; t is inside (first, last) so idx is in 1..len.
        let idx = self.samples.partition_point(|s| s.time <= t);
        let a = self.samples[idx - 1];
        let b = self.samples[idx];
        let span = b.time - a.time;
        if span <= f64::EPSILON {
            return b.intensity;
        }
        let k = (t - a.time) / span;
        a.intensity + (b.intensity - a.intensity) * k
    }

    /// Intensity normalized into the floor/ceiling band.
    pub fn relative_at(&self, t: f64) -> f64 {
        let spread = self.ceiling - self.floor;
        if spread <= f64::EPSILON {
            return 0.0;
        }
        ((self.value_at(t) - self.floor) / spread).clamp(0.0, 1.0)
    }
}

/// Nearest-rank percentile of an ascending slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = (p * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

fn band(samples: &[IntensitySample]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 1.0);
    }
    let mut values: Vec<f64> = samples.iter().map(|s| s.intensity).collect();
    values.sort_by(f64::total_cmp);

    let mut floor = percentile(&values, INTENSITY_FLOOR_PERCENTILE);
    let mut ceiling = percentile(&values, INTENSITY_CEILING_PERCENTILE);

    if ceiling - floor < MIN_INTENSITY_SPREAD {
        floor = values[0];
        ceiling = values[values.len() - 1];
    }
    if ceiling - floor < MIN_INTENSITY_SPREAD {
        let mid = (floor + ceiling) * 0.5;
        floor = mid - MIN_INTENSITY_SPREAD * 0.5;
        ceiling = mid + MIN_INTENSITY_SPREAD * 0.5;
        if floor < 0.0 {
            ceiling -= floor;
            floor = 0.0;
        }
        if ceiling > 1.0 {
            floor -= ceiling - 1.0;
            ceiling = 1.0;
        }
    }
    (floor, ceiling)
}

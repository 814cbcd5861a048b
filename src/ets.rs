//! Ephemeris time series resolution.
//!
//! Endpoints that take a time argument accept either an explicit list of
//! ephemeris times (`ets`) or observation windows described by `startEts`,
//! `stopEts` and `exposureDuration`. Windows are expanded into half-open
//! arithmetic progressions `[start, stop)` stepping by the exposure duration.

use crate::error::{Result, SpiceqlError};
use crate::params::{OneOrMany, Param};

/// Default upper bound on the number of synthesized time points
pub const DEFAULT_MAX_ETS: usize = 1_000_000;

const MISSING_MESSAGE: &str = "Verify that either params ets or startEts, stopEts, and exposureDuration are being passed correctly.";
const SHAPE_MESSAGE: &str = "Params startEts, stopEts, and exposureDuration must be either all floats or lists of the same length.";

/// Where the time points of a request come from
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSpec {
    /// Times given directly by the caller
    Explicit(Vec<f64>),
    /// One or more observation windows
    Interval {
        start: OneOrMany<f64>,
        stop: OneOrMany<f64>,
        exposure_duration: OneOrMany<f64>,
    },
}

impl TimeSpec {
    /// Decode the four optional request parameters. `ets` wins whenever it is
    /// present.
    pub fn from_params(
        ets: Option<Param<f64>>,
        start: Option<Param<f64>>,
        stop: Option<Param<f64>>,
        exposure_duration: Option<Param<f64>>,
    ) -> Result<Self> {
        if let Some(ets) = ets {
            return Ok(TimeSpec::Explicit(ets.decode("ets")?.into_vec()));
        }

        match (start, stop, exposure_duration) {
            (Some(start), Some(stop), Some(exposure_duration)) => Ok(TimeSpec::Interval {
                start: start.decode("startEts").map_err(shape_error)?,
                stop: stop.decode("stopEts").map_err(shape_error)?,
                exposure_duration: exposure_duration
                    .decode("exposureDuration")
                    .map_err(shape_error)?,
            }),
            _ => Err(SpiceqlError::MissingParameters {
                message: MISSING_MESSAGE.to_string(),
            }),
        }
    }
}

fn shape_error(err: SpiceqlError) -> SpiceqlError {
    SpiceqlError::malformed(format!("{} {}", SHAPE_MESSAGE, err))
}

/// Expands a [`TimeSpec`] into the ordered list of times to query
#[derive(Debug, Clone, Copy)]
pub struct EtsResolver {
    max_ets: usize,
}

impl Default for EtsResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ETS)
    }
}

impl EtsResolver {
    /// Create a resolver that refuses to synthesize more than `max_ets` points
    pub fn new(max_ets: usize) -> Self {
        Self { max_ets }
    }

    /// Resolve the raw request parameters into time points
    pub fn resolve(
        &self,
        ets: Option<Param<f64>>,
        start: Option<Param<f64>>,
        stop: Option<Param<f64>>,
        exposure_duration: Option<Param<f64>>,
    ) -> Result<Vec<f64>> {
        let spec = TimeSpec::from_params(ets, start, stop, exposure_duration)?;
        self.resolve_spec(spec)
    }

    /// Resolve an already decoded [`TimeSpec`]
    pub fn resolve_spec(&self, spec: TimeSpec) -> Result<Vec<f64>> {
        match spec {
            TimeSpec::Explicit(ets) => Ok(ets),
            TimeSpec::Interval {
                start: OneOrMany::One(start),
                stop: OneOrMany::One(stop),
                exposure_duration: OneOrMany::One(step),
            } => {
                let mut times = Vec::new();
                self.extend_range(&mut times, start, stop, step)?;
                Ok(times)
            }
            TimeSpec::Interval {
                start: OneOrMany::Many(starts),
                stop: OneOrMany::Many(stops),
                exposure_duration: OneOrMany::Many(steps),
            } => self.interpolate(&starts, &stops, &steps),
            _ => Err(SpiceqlError::malformed(SHAPE_MESSAGE)),
        }
    }

    /// Concatenate the progressions of each `(start, stop, step)` window in
    /// index order.
    pub fn interpolate(&self, starts: &[f64], stops: &[f64], steps: &[f64]) -> Result<Vec<f64>> {
        if starts.len() != stops.len() || starts.len() != steps.len() {
            return Err(SpiceqlError::malformed(SHAPE_MESSAGE));
        }

        let mut times = Vec::new();
        for ((&start, &stop), &step) in starts.iter().zip(stops).zip(steps) {
            self.extend_range(&mut times, start, stop, step)?;
        }
        Ok(times)
    }

    /// Append the half-open progression `[start, stop)` to `times`.
    ///
    /// Follows the numpy `arange` construction: the length is
    /// `ceil((stop - start) / step)` and element `i` is `start + i * delta`
    /// where `delta = (start + step) - start`.
    fn extend_range(&self, times: &mut Vec<f64>, start: f64, stop: f64, step: f64) -> Result<()> {
        if !start.is_finite() || !stop.is_finite() {
            return Err(SpiceqlError::malformed(format!(
                "startEts and stopEts must be finite, got {} and {}",
                start, stop
            )));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(SpiceqlError::malformed(format!(
                "exposureDuration must be a positive finite number, got {}",
                step
            )));
        }

        let span = ((stop - start) / step).ceil();
        if span <= 0.0 {
            return Ok(());
        }
        let available = self.max_ets.saturating_sub(times.len());
        if span > available as f64 {
            return Err(SpiceqlError::malformed(format!(
                "Requested time series exceeds the limit of {} ephemeris times",
                self.max_ets
            )));
        }

        let len = span as usize;
        let second = start + step;
        let delta = second - start;
        times.reserve(len);
        times.push(start);
        if len > 1 {
            times.push(second);
        }
        times.extend((2..len).map(|i| start + i as f64 * delta));
        Ok(())
    }
}

/// Resolve time points with the default limits.
///
/// Explicit `ets` takes precedence. Otherwise the start/stop/exposure triple
/// must be all scalars or all equal-length sequences.
pub fn resolve_ets(
    ets: Option<Param<f64>>,
    start: Option<Param<f64>>,
    stop: Option<Param<f64>>,
    exposure_duration: Option<Param<f64>>,
) -> Result<Vec<f64>> {
    EtsResolver::default().resolve(ets, start, stop, exposure_duration)
}

/// Expand several observation windows with the default limits
pub fn interpolate_times(starts: &[f64], stops: &[f64], steps: &[f64]) -> Result<Vec<f64>> {
    EtsResolver::default().interpolate(starts, stops, steps)
}

//! Named-parameter access for host integrations.
//!
//! Hosts that expose parameters by name (node graphs, scripting layers,
//! flat JSON blobs) implement [`ParameterSource`]. The configuration is read
//! once per fill through [`MandelbulbConfig::from_source`] and never consulted
//! again while the fill runs.

#![allow(clippy::cast_possible_truncation)]

use glam::Vec3;
use mandelbulb_core::{MandelbulbError, Result};
use serde_json::{Map, Value};

use crate::config::MandelbulbConfig;

/// Parameter name for the grid divisions (3 ints).
pub const PARAM_DIVISIONS: &str = "divisions";
/// Parameter name for the parallel toggle.
pub const PARAM_USE_PARALLEL: &str = "useParallel";
/// Parameter name for the worker count (optional).
pub const PARAM_THREADS: &str = "threads";
/// Parameter name for the fractal order.
pub const PARAM_ORDER: &str = "order";
/// Parameter name for the iteration cap.
pub const PARAM_MAX_ITERATIONS: &str = "maxIterations";
/// Parameter name for the offset (3 floats).
pub const PARAM_OFFSET: &str = "offset";
/// Parameter name for the scale (3 floats).
pub const PARAM_SCALE: &str = "scale";
/// Parameter name for the rotation in degrees (3 floats).
pub const PARAM_ROTATION: &str = "rotation";

/// Source of named parameter values.
///
/// Vector parameters are addressed by component index; scalars use component 0.
pub trait ParameterSource {
    /// Evaluates an integer component, or `None` if the parameter is absent.
    fn eval_int(&self, name: &str, component: usize) -> Option<i64>;

    /// Evaluates a float component, or `None` if the parameter is absent.
    fn eval_float(&self, name: &str, component: usize) -> Option<f32>;

    /// Evaluates a toggle. Defaults to a non-zero integer check.
    fn eval_toggle(&self, name: &str) -> Option<bool> {
        self.eval_int(name, 0).map(|v| v != 0)
    }
}

fn require<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| MandelbulbError::MissingParameter(name.to_string()))
}

fn eval_vec3(source: &dyn ParameterSource, name: &str) -> Result<Vec3> {
    Ok(Vec3::new(
        require(source.eval_float(name, 0), name)?,
        require(source.eval_float(name, 1), name)?,
        require(source.eval_float(name, 2), name)?,
    ))
}

impl MandelbulbConfig {
    /// Snapshots every fill parameter from `source`.
    ///
    /// The worker count is optional and defaults to 0 (hardware parallelism).
    /// Bounds and polarity are not host parameters and keep their defaults.
    pub fn from_source(source: &dyn ParameterSource) -> Result<Self> {
        let divisions = [
            require(source.eval_int(PARAM_DIVISIONS, 0), PARAM_DIVISIONS)?,
            require(source.eval_int(PARAM_DIVISIONS, 1), PARAM_DIVISIONS)?,
            require(source.eval_int(PARAM_DIVISIONS, 2), PARAM_DIVISIONS)?,
        ];
        let threads = source
            .eval_int(PARAM_THREADS, 0)
            .and_then(|t| usize::try_from(t).ok())
            .unwrap_or(0);

        Ok(Self {
            divisions,
            use_parallel: require(source.eval_toggle(PARAM_USE_PARALLEL), PARAM_USE_PARALLEL)?,
            threads,
            order: require(source.eval_int(PARAM_ORDER, 0), PARAM_ORDER)?,
            max_iterations: require(
                source.eval_int(PARAM_MAX_ITERATIONS, 0),
                PARAM_MAX_ITERATIONS,
            )?,
            offset: eval_vec3(source, PARAM_OFFSET)?,
            scale: eval_vec3(source, PARAM_SCALE)?,
            rotation: eval_vec3(source, PARAM_ROTATION)?,
            ..Self::default()
        })
    }
}

/// A [`ParameterSource`] over a flat JSON object.
///
/// Scalars are numbers or booleans, vectors are arrays. Float values read as
/// integers are truncated toward zero.
#[derive(Debug, Clone, Default)]
pub struct JsonParameters {
    values: Map<String, Value>,
}

impl JsonParameters {
    /// Wraps an existing JSON object.
    #[must_use]
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Parses a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Sets a parameter value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    fn component(&self, name: &str, component: usize) -> Option<&Value> {
        match self.values.get(name)? {
            Value::Array(items) => items.get(component),
            scalar if component == 0 => Some(scalar),
            _ => None,
        }
    }
}

impl ParameterSource for JsonParameters {
    fn eval_int(&self, name: &str, component: usize) -> Option<i64> {
        match self.component(name, component)? {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            _ => None,
        }
    }

    fn eval_float(&self, name: &str, component: usize) -> Option<f32> {
        match self.component(name, component)? {
            Value::Number(n) => n.as_f64().map(|f| f as f32),
            _ => None,
        }
    }

    fn eval_toggle(&self, name: &str) -> Option<bool> {
        match self.component(name, 0)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            _ => None,
        }
    }
}

//! The weight driver node.

use crate::config::DriverConfig;
use crate::driver::diagnostics::{expose_fit, expose_pose_set, expose_raw_weights};
use crate::driver::outputs::{OutputPlugs, OutputRequest};
use crate::driver::state::SolverState;
use crate::pose::{
    DriverSource, GenericDriver, GenericInputs, HostArrayEnumeration, PoseDrawData,
    PoseEnumeration, PoseSet, RbfMode, TransformCollection, TransformInputs, TransformSettings,
    collect_transform, generic_driver, generic_poses,
};
use crate::rbf::{
    DistanceType, InferenceParams, PoseFit, RbfResult, fit_poses, pose_weights,
};
use crate::shaping::{BlendCurve, RampCurve, finalize_weights};
use std::fmt;
use tracing::{debug, error, warn};

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// The weight array was written. `solved` is true when the fit was
    /// recomputed rather than reused. An empty pose set reports
    /// `pose_count == 0` and writes the default full weight.
    Updated { pose_count: usize, solved: bool },
    /// The node is inactive; zeros were written.
    Inactive,
    /// Nothing was written.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A transform driver is not wired up yet.
    MissingConnection,
    /// The legacy single weight belongs to the cone-angle mode.
    LegacyRequest,
}

/// Collected inputs of one evaluation, before the solve.
struct Prepared {
    mode: RbfMode,
    driver: Vec<f64>,
    pose_count: usize,
    solve_count: usize,
    distance: DistanceType,
    dirty: bool,
    /// Fresh pose set, or `None` to reuse the cached one.
    poses: Option<PoseSet>,
    /// Output slots, or `None` for sequential slots.
    slots: Option<Vec<usize>>,
    draw: Option<PoseDrawData>,
}

/// A pose-space RBF weight driver.
///
/// Owns its solver cache; evaluations on one instance must be serialized by
/// the caller.
pub struct WeightDriver {
    name: String,
    state: SolverState,
    curve: Box<dyn BlendCurve>,
    enumeration: Box<dyn PoseEnumeration>,
}

impl fmt::Debug for WeightDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightDriver")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl WeightDriver {
    /// A driver with the default ramp curve and host-array pose enumeration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: SolverState::default(),
            curve: Box::new(RampCurve::default()),
            enumeration: Box::new(HostArrayEnumeration),
        }
    }

    /// Use `curve` for the `Curve` interpolation family.
    pub fn with_curve(mut self, curve: impl BlendCurve + 'static) -> Self {
        self.curve = Box::new(curve);
        self
    }

    /// Use `enumeration` to map generic pose slots onto rows.
    pub fn with_enumeration(mut self, enumeration: impl PoseEnumeration + 'static) -> Self {
        self.enumeration = Box::new(enumeration);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &SolverState {
        &self.state
    }

    /// Drop every cached result, as if the node was just created.
    pub fn reset(&mut self) {
        self.state = SolverState::default();
    }

    /// Evaluate the requested output.
    ///
    /// A failed solve returns the error and writes nothing; neither the
    /// outputs nor the cache change.
    pub fn evaluate(
        &mut self,
        source: &DriverSource,
        config: &DriverConfig,
        request: OutputRequest,
        outputs: &mut OutputPlugs,
    ) -> RbfResult<Evaluation> {
        config.validate()?;

        if request == OutputRequest::LegacyWeight {
            debug!(node = %self.name, "legacy weight request ignored in RBF mode");
            return Ok(Evaluation::Skipped(SkipReason::LegacyRequest));
        }

        if !config.active {
            let slots = match source {
                DriverSource::Generic(inputs) => inputs.outputs.clone(),
                DriverSource::Transform(_) => self.state.pose_ids.clone(),
            };
            outputs.write_weights(&slots, &vec![0.0; slots.len()]);
            return Ok(Evaluation::Inactive);
        }

        let prepared = match source {
            DriverSource::Generic(inputs) => self.prepare_generic(inputs, config),
            DriverSource::Transform(inputs) => match self.prepare_transform(inputs, config) {
                Some(prepared) => prepared,
                None => return Ok(Evaluation::Skipped(SkipReason::MissingConnection)),
            },
        };

        let (weights, fit) = self.compute(&prepared, config)?;
        let solved = fit.is_some();
        let pose_count = prepared.pose_count;
        self.commit(prepared, fit, outputs, &weights);

        Ok(Evaluation::Updated { pose_count, solved })
    }

    fn prepare_generic(&self, inputs: &GenericInputs, config: &DriverConfig) -> Prepared {
        let GenericDriver { driver, rest } = generic_driver(inputs, config.distance_type);
        let pose_count = self.enumeration.pose_count(&inputs.poses);
        let solve_count = inputs.outputs.len();
        let mut dirty = self
            .state
            .gate
            .generic_dirty(pose_count, inputs.poses_connected, config.evaluate);
        if !dirty && pose_count != 0 && self.state.poses.poses.cols() != driver.len() {
            warn!(
                node = %self.name,
                cached = self.state.poses.poses.cols(),
                inputs = driver.len(),
                "driver dimension changed, rebuilding poses"
            );
            dirty = true;
        }

        let poses = (pose_count != 0 && dirty)
            .then(|| generic_poses(inputs, &rest, self.enumeration.as_ref()));
        if pose_count != 0 && !dirty {
            debug!(node = %self.name, pose_count, "generic poses unchanged, reusing fit");
        }

        Prepared {
            mode: RbfMode::Generic,
            driver,
            pose_count,
            solve_count,
            distance: config.distance_type,
            dirty,
            poses,
            slots: None,
            draw: None,
        }
    }

    fn prepare_transform(&self, inputs: &TransformInputs, config: &DriverConfig) -> Option<Prepared> {
        let settings = TransformSettings {
            twist_axis: config.twist_axis,
            invert_axes: config.invert_axes,
            draw_driver: config.driver_index,
        };
        let sample = match collect_transform(inputs, settings) {
            TransformCollection::Ready(sample) => sample,
            TransformCollection::MissingConnection { driver } => {
                debug!(node = %self.name, driver, "driver not connected, skipping evaluation");
                return None;
            }
        };

        let pose_count = sample.poses.len();
        let dirty = self
            .state
            .gate
            .transform_dirty(pose_count, &sample.poses.modes, config.evaluate);
        if pose_count != self.state.gate.pose_count() {
            debug!(
                node = %self.name,
                from = self.state.gate.pose_count(),
                to = pose_count,
                "pose count changed"
            );
        }

        let slots = if sample.poses.ids.is_empty() {
            Some(vec![0])
        } else {
            Some(sample.poses.ids.clone())
        };

        Some(Prepared {
            mode: RbfMode::Matrix,
            driver: sample.driver,
            pose_count,
            solve_count: pose_count,
            distance: DistanceType::Euclidean,
            dirty,
            poses: Some(sample.poses),
            slots,
            draw: sample.draw,
        })
    }

    /// Fit if needed, infer and shape. Touches no state.
    fn compute(&self, prepared: &Prepared, config: &DriverConfig) -> RbfResult<(Vec<f64>, Option<PoseFit>)> {
        if prepared.pose_count == 0 {
            return Ok((vec![1.0], None));
        }

        let set = prepared.poses.as_ref().unwrap_or(&self.state.poses);
        expose_pose_set(&self.name, config.expose_data, set);

        let fit = if prepared.dirty {
            let fit = fit_poses(
                &set.poses,
                &set.values,
                prepared.solve_count,
                prepared.distance,
                config.kernel,
            )
            .inspect_err(|e| error!(node = %self.name, error = %e, "RBF decomposition failed"))?;
            debug!(node = %self.name, poses = set.len(), outputs = prepared.solve_count, "solved weight matrix");
            expose_fit(&self.name, config.expose_data, &fit);
            Some(fit)
        } else {
            None
        };

        let (weight_matrix, mean_distance) = match &fit {
            Some(fit) => (&fit.weights, fit.mean_distance),
            None => (&self.state.weights, self.state.mean_distance),
        };
        let params = InferenceParams {
            mean_distance,
            distance: prepared.distance,
            kernel: config.kernel,
        };
        let mut weights = pose_weights(
            &set.poses,
            &prepared.driver,
            &set.modes,
            weight_matrix,
            prepared.solve_count,
            params,
        )
        .unwrap_or_else(|| {
            warn!(
                node = %self.name,
                rows = weight_matrix.rows(),
                cols = weight_matrix.cols(),
                poses = set.len(),
                outputs = prepared.solve_count,
                "weight matrix does not match poses and outputs, writing zeros"
            );
            vec![0.0; prepared.solve_count]
        });
        expose_raw_weights(&self.name, config.expose_data, &weights);

        finalize_weights(&mut weights, &config.shaping(), self.curve.as_ref());
        Ok((weights, fit))
    }

    fn commit(
        &mut self,
        prepared: Prepared,
        fit: Option<PoseFit>,
        outputs: &mut OutputPlugs,
        weights: &[f64],
    ) {
        let state = &mut self.state;
        match prepared.mode {
            RbfMode::Generic => {
                if let Some(poses) = prepared.poses {
                    state.gate.commit_count(prepared.pose_count);
                    state.poses = poses;
                }
            }
            RbfMode::Matrix => {
                state.gate.commit_count(prepared.pose_count);
                if let Some(poses) = prepared.poses {
                    if !poses.is_empty() {
                        state.gate.commit_modes(&poses.modes);
                    }
                    state.pose_ids = poses.ids.clone();
                    state.poses = poses;
                }
            }
        }
        if let Some(fit) = fit {
            state.weights = fit.weights;
            state.mean_distance = fit.mean_distance;
        }

        outputs.rbf_mode = prepared.mode;
        if prepared.draw.is_some() {
            outputs.draw = prepared.draw;
        }
        let slots = prepared
            .slots
            .unwrap_or_else(|| (0..weights.len()).collect());
        outputs.write_weights(&slots, weights);
    }
}

impl Default for WeightDriver {
    fn default() -> Self {
        Self::new("weightDriver")
    }
}


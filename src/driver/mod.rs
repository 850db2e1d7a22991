//! The weight driver node: collection, change gate, solve, inference and
//! output writing for one node instance.
//!
//! # Example
//!
//! ```ignore
//! use weightdriver::config::DriverConfig;
//! use weightdriver::driver::{OutputPlugs, OutputRequest, WeightDriver};
//! use weightdriver::pose::{DriverSource, GenericInputs, GenericPose};
//!
//! let inputs = GenericInputs {
//!     inputs: vec![0.25],
//!     poses: [(0, GenericPose::new(&[0.0], &[0.0])), (1, GenericPose::new(&[1.0], &[1.0]))]
//!         .into_iter()
//!         .collect(),
//!     outputs: vec![0],
//!     ..Default::default()
//! };
//!
//! let mut node = WeightDriver::new("shoulder_rbf");
//! let mut outputs = OutputPlugs::default();
//! node.evaluate(
//!     &DriverSource::Generic(inputs),
//!     &DriverConfig::default(),
//!     OutputRequest::Weights,
//!     &mut outputs,
//! )?;
//! ```

mod diagnostics;
mod gate;
mod node;
mod outputs;
mod state;

pub use gate::ChangeGate;
pub use node::{Evaluation, SkipReason, WeightDriver};
pub use outputs::{OutputPlugs, OutputRequest};
pub use state::SolverState;

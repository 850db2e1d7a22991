pub mod pose_rbf;

pub use pose_rbf::{DistanceType, PoseMode, PoseRbfAlgorithms, PoseRbfModel, RbfKernel};

use crate::rbf::error::RbfResult;
use crate::rbf::impl_generic::{pose_rbf_evaluate_impl, pose_rbf_fit_impl};
use crate::rbf::traits::{DistanceType, PoseRbfAlgorithms, PoseRbfModel, RbfKernel};
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl PoseRbfAlgorithms<CpuRuntime> for CpuClient {
    fn pose_rbf_fit(
        &self,
        poses: &Tensor<CpuRuntime>,
        values: &Tensor<CpuRuntime>,
        kernel: RbfKernel,
        distance: DistanceType,
    ) -> RbfResult<PoseRbfModel<CpuRuntime>> {
        pose_rbf_fit_impl(self, poses, values, kernel, distance)
    }

    fn pose_rbf_evaluate(
        &self,
        model: &PoseRbfModel<CpuRuntime>,
        drivers: &Tensor<CpuRuntime>,
    ) -> RbfResult<Tensor<CpuRuntime>> {
        pose_rbf_evaluate_impl(self, model, drivers)
    }
}

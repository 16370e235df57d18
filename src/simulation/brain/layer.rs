//! Dense layer forward pass.

use ndarray::{Array1, ArrayView1, ArrayView2};

/// Logistic sigmoid, squashing any input into `(0, 1)`.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Performs one fully-connected layer with sigmoid activation.
///
/// `weights` is laid out `output_size` × `input_size`.
#[inline]
pub fn forward(
    weights: &ArrayView2<'_, f32>,
    biases: &ArrayView1<'_, f32>,
    inputs: &ArrayView1<'_, f32>,
) -> Array1<f32> {
    let mut output = weights.dot(inputs);
    output += biases;

    output.mapv_inplace(sigmoid);
    output
}

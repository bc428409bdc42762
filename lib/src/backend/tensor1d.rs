use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 1D tensor.
///
/// Wraps a backend's native 1D tensor representation (`B::Tensor1D`) while
/// carrying phantom type information about its originating backend. This
/// prevents accidental mixing of tensors from different backends at compile
/// time.
///
/// # Example
/// ```
/// use tabular_nb::backend::{CpuBackend, Tensor1D};
///
/// let y: Tensor1D<CpuBackend> = Tensor1D::new(vec![0.0, 1.0, 1.0]);
/// assert_eq!(y.len(), 3);
/// assert_eq!(y.select(&[2, 0]).to_vec(), vec![1.0, 0.0]);
/// ```
#[derive(Clone)]
pub struct Tensor1D<B: Backend> {
    pub(crate) data: B::Tensor1D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor1D<B> {
    /// Creates a new 1D tensor from owned values.
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: B::from_vec_1d(data),
            backend: PhantomData,
        }
    }

    /// Creates a 1D tensor filled with zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: B::zeros_1d(len),
            backend: PhantomData,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        B::len_1d(&self.data)
    }

    /// Returns `true` if the tensor has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gathers the elements at `indices`, in order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            data: B::select_1d(&self.data, indices),
            backend: PhantomData,
        }
    }

    /// Copies the tensor into a host `Vec<f64>`.
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_1d(&self.data)
    }
}

impl<B: Backend> std::fmt::Debug for Tensor1D<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Tensor1D").field(&self.to_vec()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_tensor1d_new_and_len() {
        let t = Tensor1D::<CpuBackend>::new(vec![1.0, 2.5, 3.75]);
        assert_eq!(t.len(), 3);
        assert!(!t.is_empty());
        assert_eq!(t.to_vec(), vec![1.0, 2.5, 3.75]);
    }

    #[test]
    fn test_tensor1d_zeros() {
        let t = Tensor1D::<CpuBackend>::zeros(4);
        assert_eq!(t.to_vec(), vec![0.0; 4]);
        assert!(Tensor1D::<CpuBackend>::zeros(0).is_empty());
    }

    #[test]
    fn test_tensor1d_debug() {
        let t = Tensor1D::<CpuBackend>::new(vec![1.0]);
        assert_eq!(format!("{:?}", t), "Tensor1D([1.0])");
    }
}

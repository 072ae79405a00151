//! Serialization of fitted transformer parameters.
//!
//! This module provides a backend-agnostic way to serialize and deserialize
//! the numerical parameters of a fitted transformer, without coupling to
//! specific serialization formats or backend resources (e.g., GPU buffers).

use std::error::Error;

/// A trait for parameter representations that can be serialized to and from bytes.
///
/// Implementors should contain only plain numerical data (e.g., `Vec<f64>`,
/// counts), not backend-specific tensors or handles.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::stats::{RunningMoments, Tracking};

    #[test]
    fn test_running_moments_bytes_round_trip() {
        let mut moments = RunningMoments::new(
            Tracking::default().with_mean_var(true).with_min_max(true),
        );
        moments
            .merge(&vec![vec![1.0, -2.0], vec![3.0, 4.0]])
            .unwrap();

        let bytes = moments.to_bytes().unwrap();
        let restored = RunningMoments::from_bytes(&bytes).unwrap();

        assert_eq!(restored.n_samples_seen(), moments.n_samples_seen());
        assert_eq!(restored.mean().unwrap(), moments.mean().unwrap());
        assert_eq!(restored.var().unwrap(), moments.var().unwrap());
        assert_eq!(restored.min().unwrap(), moments.min().unwrap());
        assert_eq!(restored.tracking(), moments.tracking());
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let garbage = [0u8; 3];
        assert!(RunningMoments::from_bytes(&garbage).is_err());
    }
}

//! Parallel Execution Engine
//!
//! Flat data parallelism over lanes. Each lane pairs one input record with
//! one output record; the salt and parameters are shared read-only. Lanes run
//! on rayon when the `multithread` feature is enabled and serially otherwise,
//! and the result is bit-identical either way.

use crate::engine::dispatcher::{self, get_active_backend};
use crate::types::{DerivationParams, InputRecord, LaneFn, OutputRecord, SaltRecord};
use tracing::{debug, trace};

// =============================================================================
// EXECUTORS
// =============================================================================

/// Run `kernel` once per lane on the active backend.
///
/// Precondition: `inputs.len() == outputs.len()` and every lane satisfies the
/// kernel's own preconditions.
pub fn execute<const P: usize, const S: usize, const O: usize>(
    kernel: LaneFn<P, S, O>,
    inputs: &[InputRecord<P>],
    salt: &SaltRecord<S>,
    outputs: &mut [OutputRecord<O>],
    params: &DerivationParams,
) {
    debug_assert_eq!(inputs.len(), outputs.len());
    debug!(
        lanes = inputs.len(),
        iterations = params.iterations(),
        dk_len = params.dk_len(),
        backend = %get_active_backend(),
        "dispatching batch"
    );

    inputs.process_lanes(outputs, |input, output| kernel(input, salt, output, params));
}

/// Run `kernel` once per lane on the calling thread, in lane order.
pub fn execute_serial<const P: usize, const S: usize, const O: usize>(
    kernel: LaneFn<P, S, O>,
    inputs: &[InputRecord<P>],
    salt: &SaltRecord<S>,
    outputs: &mut [OutputRecord<O>],
    params: &DerivationParams,
) {
    debug_assert_eq!(inputs.len(), outputs.len());
    debug!(
        lanes = inputs.len(),
        iterations = params.iterations(),
        dk_len = params.dk_len(),
        "dispatching batch serially"
    );

    for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
        kernel(input, salt, output, params);
    }
}

/// Run the PBKDF2 lane kernel over a batch on the active backend.
pub fn derive_all<const P: usize, const S: usize, const O: usize>(
    inputs: &[InputRecord<P>],
    salt: &SaltRecord<S>,
    outputs: &mut [OutputRecord<O>],
    params: &DerivationParams,
) {
    execute(dispatcher::derive_lane::<P, S, O>, inputs, salt, outputs, params);
}

// =============================================================================
// LANE PROCESSING
// =============================================================================

/// Helper for feature-agnostic lane processing
trait LaneProcessor<I, O> {
    fn process_lanes<F>(self, outputs: &mut [O], f: F)
    where
        F: Fn(&I, &mut O) + Sync + Send;
}

impl<I: Sync, O: Send> LaneProcessor<I, O> for &[I] {
    fn process_lanes<F>(self, outputs: &mut [O], f: F)
    where
        F: Fn(&I, &mut O) + Sync + Send,
    {
        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            trace!(lanes = self.len(), "rayon lane split");
            self.par_iter()
                .zip(outputs.par_iter_mut())
                .for_each(|(input, output)| f(input, output));
        }
        #[cfg(not(feature = "multithread"))]
        {
            trace!(lanes = self.len(), "serial lane loop");
            for (input, output) in self.iter().zip(outputs.iter_mut()) {
                f(input, output);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BatchError;

    fn batch(passwords: &[&[u8]]) -> Vec<InputRecord> {
        passwords
            .iter()
            .map(|p| InputRecord::from_bytes(p).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_parallel_matches_serial() -> Result<(), BatchError> {
        let inputs = batch(&[b"a", b"bb", b"", b"password", &[0x7F; 64], &[0x01; 100]]);
        let salt: SaltRecord = SaltRecord::from_bytes(b"NaCl")?;
        let params = DerivationParams::new(5, 40)?;

        let mut parallel: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];
        execute(dispatcher::derive_lane, &inputs, &salt, &mut parallel, &params);

        let mut serial: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];
        execute_serial(dispatcher::derive_lane, &inputs, &salt, &mut serial, &params);

        assert_eq!(parallel, serial);
        Ok(())
    }

    #[test]
    fn test_custom_lane_kernel() -> Result<(), BatchError> {
        fn mark(
            input: &InputRecord,
            _salt: &SaltRecord,
            output: &mut OutputRecord,
            params: &DerivationParams,
        ) {
            output.buffer[0] = input.length;
            output.buffer[1] = params.iterations();
        }

        let inputs = batch(&[b"xyz", b"hello"]);
        let salt: SaltRecord = SaltRecord::default();
        let params = DerivationParams::new(7, 8)?;
        let mut outputs: Vec<OutputRecord> = vec![OutputRecord::default(); 2];

        execute(mark, &inputs, &salt, &mut outputs, &params);

        assert_eq!(outputs[0].buffer[..2], [3, 7]);
        assert_eq!(outputs[1].buffer[..2], [5, 7]);
        Ok(())
    }

    #[test]
    fn test_empty_batch() -> Result<(), BatchError> {
        let salt: SaltRecord = SaltRecord::default();
        let params = DerivationParams::new(1, 20)?;
        let mut outputs: Vec<OutputRecord> = Vec::new();

        derive_all(&[] as &[InputRecord], &salt, &mut outputs, &params);
        assert!(outputs.is_empty());
        Ok(())
    }
}

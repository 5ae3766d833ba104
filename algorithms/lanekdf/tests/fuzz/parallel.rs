use bolero::check;
use lanekdf::{
    derive_batch, derive_batch_serial, DerivationParams, InputRecord, OutputRecord, SaltRecord,
};

#[test]
fn fuzz_parallel_consistency() {
    check!()
        .with_type::<(Vec<Vec<u8>>, Vec<u8>, u8, u8)>()
        .for_each(|(passwords, salt, iterations, dk_len)| {
            // =============================================================================
            // INPUT SHAPING
            // =============================================================================

            // Logic: clamp everything into the default layout so every case dispatches.
            let inputs: Vec<InputRecord> = passwords
                .iter()
                .take(64)
                .map(|p| InputRecord::from_bytes(&p[..p.len().min(128)]).unwrap())
                .collect();
            let salt: SaltRecord = SaltRecord::from_bytes(&salt[..salt.len().min(8)]).unwrap();
            let iterations = u32::from(*iterations % 8) + 1;
            let params = DerivationParams::new(iterations, u32::from(*dk_len % 41)).unwrap();

            // =============================================================================
            // PARALLEL EXECUTION (RAYON)
            // =============================================================================

            let mut parallel: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];
            derive_batch(&inputs, &salt, &mut parallel, &params).unwrap();

            // =============================================================================
            // SEQUENTIAL REFERENCE
            // =============================================================================

            let mut serial: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];
            derive_batch_serial(&inputs, &salt, &mut serial, &params).unwrap();

            // =============================================================================
            // VERIFICATION
            // =============================================================================

            assert_eq!(parallel, serial, "Parallel batch mismatch (Rayon vs Sequential)");
        });
}

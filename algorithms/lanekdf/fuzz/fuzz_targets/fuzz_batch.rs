#![no_main]

use libfuzzer_sys::fuzz_target;
use lanekdf::{derive_batch, DerivationParams, InputRecord, OutputRecord, SaltRecord};

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PREPARATION
    // =============================================================================

    // Header: [iterations, dk_len, salt_len], then the salt, then
    // NUL-separated passwords.
    let [iterations, dk_len, salt_len, rest @ ..] = data else {
        return;
    };
    let salt_len = usize::from(*salt_len % 9).min(rest.len());
    let (salt, body) = rest.split_at(salt_len);

    let passwords: Vec<&[u8]> = body
        .split(|&b| b == 0)
        .map(|p| &p[..p.len().min(128)])
        .take(32)
        .collect();

    let iterations = u32::from(*iterations % 4) + 1;
    let Ok(params) = DerivationParams::new(iterations, u32::from(*dk_len % 41)) else {
        return;
    };

    // =============================================================================
    // 1. BATCH DERIVATION
    // =============================================================================

    let inputs: Vec<InputRecord> = passwords
        .iter()
        .filter_map(|p| InputRecord::from_bytes(p).ok())
        .collect();
    let Ok(salt_record) = SaltRecord::<2>::from_bytes(salt) else {
        return;
    };
    let mut outputs: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];

    assert!(
        derive_batch(&inputs, &salt_record, &mut outputs, &params).is_ok(),
        "Valid batch rejected"
    );

    // =============================================================================
    // 2. SCALAR AGREEMENT
    // =============================================================================

    for (password, output) in passwords.iter().zip(&outputs) {
        let mut expected = vec![0u8; params.dk_len()];
        let derived = lanekdf::pbkdf2_hmac_sha1(password, salt, params.iterations(), &mut expected);
        assert!(derived.is_ok(), "Valid scalar parameters rejected");

        assert_eq!(
            output.derived_key(params.dk_len()),
            expected,
            "Batch lane disagrees with scalar derivation"
        );
    }
});

use bolero::check;

#[test]
fn fuzz_verify_rejects_tampering() {
    check!()
        .with_type::<(Vec<u8>, Vec<u8>, u8)>()
        .for_each(|(password, salt, flip)| {
            let password = &password[..password.len().min(lanekdf::PASSWORD_CAPACITY)];
            let salt = &salt[..salt.len().min(lanekdf::MAX_SALT_BYTES)];

            let mut key = [0u8; 24];
            lanekdf::pbkdf2_hmac_sha1(password, salt, 2, &mut key).unwrap();
            assert!(lanekdf::verify(password, salt, 2, &key));

            // =============================================================================
            // SINGLE BIT FLIP
            // =============================================================================

            let bit = usize::from(*flip) % (key.len() * 8);
            key[bit / 8] ^= 1 << (bit % 8);
            assert!(!lanekdf::verify(password, salt, 2, &key), "Tampered key accepted");
        });
}

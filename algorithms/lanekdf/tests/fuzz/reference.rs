use bolero::check;

#[test]
fn fuzz_scalar_matches_reference() {
    check!()
        .with_type::<(Vec<u8>, Vec<u8>, u8, u8)>()
        .for_each(|(password, salt, iterations, dk_len)| {
            // Logic: any password up to the input capacity, any salt one block can carry.
            let password = &password[..password.len().min(lanekdf::PASSWORD_CAPACITY)];
            let salt = &salt[..salt.len().min(lanekdf::MAX_SALT_BYTES)];
            let iterations = u32::from(*iterations % 16) + 1;
            let dk_len = usize::from(*dk_len % 97);

            let mut ours = vec![0u8; dk_len];
            lanekdf::pbkdf2_hmac_sha1(password, salt, iterations, &mut ours).unwrap();

            let mut theirs = vec![0u8; dk_len];
            pbkdf2::pbkdf2_hmac::<sha1::Sha1>(password, salt, iterations, &mut theirs);

            assert_eq!(ours, theirs, "Mismatch against RustCrypto pbkdf2");
        });
}

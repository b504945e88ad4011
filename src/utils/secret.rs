use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;

// The hash only lives in memory and is checked on every row operation.
const MEMORY_COST_KIB: u32 = 4096;

pub fn hash_secret(secret: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let params = Params::new(MEMORY_COST_KIB, 1, 1, None)?;
    let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_secret(secret: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default().verify_password(secret.as_bytes(), &parsed).is_ok())
}

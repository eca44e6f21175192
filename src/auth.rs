use crate::errors::StoreError;

/// bcrypt work factor. Fixed so stored hashes stay comparable across deploys.
pub const HASH_COST: u32 = 12;

pub fn hash_password(password: &str) -> Result<String, StoreError> {
    Ok(bcrypt::hash(password, HASH_COST)?)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, StoreError> {
    Ok(bcrypt::verify(password, password_hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("password123").unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("password123", &hash).unwrap());
        assert!(!verify_password("not-the-password", &hash).unwrap());
    }
}

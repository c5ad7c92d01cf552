//! SHA-256 fingerprints for exported files and contract inputs.

use sha2::{Digest, Sha256};

use crate::contract::ContractFields;

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Fingerprint of the fields a contract was assembled from.
///
/// Field maps serialize with sorted keys, so equal maps hash equally
/// regardless of insertion order.
pub fn fields_digest(fields: &ContractFields) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_string(fields)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContractField;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fields_digest_ignores_insertion_order() {
        let a = ContractFields::new()
            .with(ContractField::Forum, "Comarca de Natal/RN")
            .with(ContractField::Contractor, "João");
        let b = ContractFields::new()
            .with(ContractField::Contractor, "João")
            .with(ContractField::Forum, "Comarca de Natal/RN");
        assert_eq!(fields_digest(&a).unwrap(), fields_digest(&b).unwrap());
        assert_ne!(
            fields_digest(&a).unwrap(),
            fields_digest(&ContractFields::new()).unwrap()
        );
    }
}

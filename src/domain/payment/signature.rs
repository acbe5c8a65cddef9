//! Request and notification signatures.
//!
//! A signature is the lowercase hex SHA-384 digest of a compact JSON object.
//! Field order is part of the signed payload: the object is serialized in
//! exactly the order the caller built it, never re-sorted. Strings are
//! emitted as raw UTF-8 and `/` is not escaped.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use sha2::{Digest, Sha384};
use subtle::ConstantTimeEq;

/// Name of the field carrying the shared secret inside the signed object.
pub const CRC_FIELD: &str = "crc";

/// Name of the field carrying the signature in requests and notifications.
pub const SIGN_FIELD: &str = "sign";

/// Ordered field mapping used as signature input.
pub type SignFields = Map<String, Value>;

/// Builds an ordered field mapping from `(name, value)` pairs.
pub fn fields<I, K>(pairs: I) -> SignFields
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Signs an ordered field mapping that already contains the secret.
pub fn sign(fields: SignFields) -> String {
    let serialized = Value::Object(fields).to_string();
    hex::encode(Sha384::digest(serialized.as_bytes()))
}

/// Signs and verifies with the merchant's shared secret.
#[derive(Clone)]
pub struct SignatureCodec {
    crc: SecretString,
}

impl SignatureCodec {
    pub fn new(crc: SecretString) -> Self {
        Self { crc }
    }

    /// Appends the secret as the last field and signs.
    pub fn sign(&self, mut fields: SignFields) -> String {
        fields.insert(
            CRC_FIELD.to_string(),
            Value::String(self.crc.expose_secret().clone()),
        );
        sign(fields)
    }

    /// Checks a received object against its own `sign` field.
    ///
    /// The expected signature is computed over every received field except
    /// `sign`, in the order received, with the secret appended.
    pub fn verify(&self, received: &SignFields) -> bool {
        let Some(provided) = received.get(SIGN_FIELD).and_then(Value::as_str) else {
            return false;
        };

        let unsigned: SignFields = received
            .iter()
            .filter(|(key, _)| key.as_str() != SIGN_FIELD)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let expected = self.sign(unsigned);
        constant_time_compare(expected.as_bytes(), provided.as_bytes())
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

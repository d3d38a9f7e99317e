//! Centralized constants for archive naming rules and key algorithm OIDs.
//! Keep this intentionally small; only broadly reused literals should live here.

use der::asn1::ObjectIdentifier;

// === Signed archive layout ===

/// Directory holding signature metadata inside a signed JAR/APK.
pub const SIGNATURE_DIR_PREFIX: &str = "META-INF/";

/// Signature block suffixes that carry a PKCS#7 certificate path (case-sensitive).
pub const SIGNATURE_SUFFIXES: [&str; 2] = [".RSA", ".DSA"];

// === Public key algorithms ===

/// rsaEncryption (RFC 8017)
pub const RSA_ENCRYPTION_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// id-dsa (RFC 3279)
pub const DSA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");

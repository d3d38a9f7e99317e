//! Shared fixtures for integration tests.
//!
//! Certificates are generated with OpenSSL, wrapped into certificates-only
//! PKCS#7 containers by a small DER writer and stored in ZIP archives under a
//! temporary directory. Expected values are derived from the OpenSSL objects,
//! never from the code under test.

#![allow(dead_code)]

use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, BigNumRef, MsbOption};
use openssl::dsa::Dsa;
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{HasPublic, PKey, PKeyRef, Private};
use openssl::rsa::Rsa;
use openssl::x509::extension::BasicConstraints;
use openssl::x509::{X509Builder, X509NameBuilder, X509};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// id-signedData
const SIGNED_DATA_OID: [u8; 11] = [
    0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x07, 0x02,
];
/// id-data
const DATA_OID: [u8; 11] = [
    0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x07, 0x01,
];

pub fn rsa_key() -> &'static PKey<Private> {
    static KEY: OnceLock<PKey<Private>> = OnceLock::new();
    KEY.get_or_init(|| PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap())
}

pub fn other_rsa_key() -> &'static PKey<Private> {
    static KEY: OnceLock<PKey<Private>> = OnceLock::new();
    KEY.get_or_init(|| PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap())
}

pub fn dsa_key() -> &'static PKey<Private> {
    static KEY: OnceLock<PKey<Private>> = OnceLock::new();
    KEY.get_or_init(|| PKey::from_dsa(Dsa::generate(2048).unwrap()).unwrap())
}

pub fn ec_key() -> &'static PKey<Private> {
    static KEY: OnceLock<PKey<Private>> = OnceLock::new();
    KEY.get_or_init(|| {
        let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
        PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap()
    })
}

/// Certificate for `subject_key`, signed by `issuer_key` with SHA-256.
pub fn certificate<T: HasPublic>(
    subject_cn: &str,
    subject_key: &PKeyRef<T>,
    issuer_cn: &str,
    issuer_key: &PKeyRef<Private>,
) -> X509 {
    build_certificate(subject_cn, subject_key, issuer_cn, issuer_key, false)
}

/// Self-signed RSA CA certificate with a critical basicConstraints extension.
pub fn ca_certificate(cn: &str) -> X509 {
    build_certificate(cn, rsa_key(), cn, rsa_key(), true)
}

fn build_certificate<T: HasPublic>(
    subject_cn: &str,
    subject_key: &PKeyRef<T>,
    issuer_cn: &str,
    issuer_key: &PKeyRef<Private>,
    ca: bool,
) -> X509 {
    let name = |cn: &str| {
        let mut builder = X509NameBuilder::new().unwrap();
        builder.append_entry_by_text("CN", cn).unwrap();
        builder.build()
    };

    let mut serial = BigNum::new().unwrap();
    serial.rand(64, MsbOption::MAYBE_ZERO, false).unwrap();

    let mut builder = X509Builder::new().unwrap();
    builder.set_version(2).unwrap();
    builder
        .set_serial_number(&serial.to_asn1_integer().unwrap())
        .unwrap();
    builder.set_subject_name(&name(subject_cn)).unwrap();
    builder.set_issuer_name(&name(issuer_cn)).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(365).unwrap())
        .unwrap();
    builder.set_pubkey(subject_key).unwrap();
    if ca {
        let constraints = BasicConstraints::new().critical().ca().build().unwrap();
        builder.append_extension(constraints).unwrap();
    }
    builder.sign(issuer_key, MessageDigest::sha256()).unwrap();
    builder.build()
}

/// Self-signed RSA certificate.
pub fn rsa_certificate(cn: &str) -> X509 {
    certificate(cn, rsa_key(), cn, rsa_key())
}

fn der_length(length: usize) -> Vec<u8> {
    if length < 0x80 {
        return vec![length as u8];
    }
    let bytes: Vec<u8> = length
        .to_be_bytes()
        .into_iter()
        .skip_while(|&b| b == 0)
        .collect();
    let mut out = vec![0x80 | bytes.len() as u8];
    out.extend(bytes);
    out
}

fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend(der_length(content.len()));
    out.extend_from_slice(content);
    out
}

/// Certificates-only PKCS#7 `SignedData` carrying `certs` in the given order.
pub fn certs_only_pkcs7(certs: &[&X509]) -> Vec<u8> {
    let ders: Vec<Vec<u8>> = certs.iter().map(|cert| cert.to_der().unwrap()).collect();
    let refs: Vec<&[u8]> = ders.iter().map(Vec::as_slice).collect();
    certs_only_pkcs7_der(&refs)
}

/// Like [`certs_only_pkcs7`], embedding the certificate encodings verbatim.
pub fn certs_only_pkcs7_der(certs: &[&[u8]]) -> Vec<u8> {
    let cert_ders: Vec<u8> = certs.concat();

    let signed_data = tlv(
        0x30,
        &[
            vec![0x02, 0x01, 0x01],  // version
            tlv(0x31, &[]),          // digestAlgorithms
            tlv(0x30, &DATA_OID),    // contentInfo
            tlv(0xA0, &cert_ders),   // [0] IMPLICIT certificates
            tlv(0x31, &[]),          // signerInfos
        ]
        .concat(),
    );

    tlv(
        0x30,
        &[SIGNED_DATA_OID.to_vec(), tlv(0xA0, &signed_data)].concat(),
    )
}

/// Re-encode the critical flag of a basicConstraints extension as BOOLEAN
/// `0x01`: valid BER, rejected by strict DER decoders.
pub fn with_ber_critical_flag(cert_der: &[u8]) -> Vec<u8> {
    // OID 2.5.29.19 followed by BOOLEAN TRUE
    const CRITICAL_BASIC_CONSTRAINTS: [u8; 8] = [0x06, 0x03, 0x55, 0x1D, 0x13, 0x01, 0x01, 0xFF];
    let at = cert_der
        .windows(CRITICAL_BASIC_CONSTRAINTS.len())
        .position(|window| window == CRITICAL_BASIC_CONSTRAINTS)
        .expect("critical basicConstraints extension");
    let mut relaxed = cert_der.to_vec();
    relaxed[at + 7] = 0x01;
    relaxed
}

/// Write a ZIP archive with the given entries, in the given physical order.
pub fn write_archive(dir: &Path, file_name: &str, entries: &[(&str, Vec<u8>)]) -> PathBuf {
    let path = dir.join(file_name);
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// Typical package filler that must never influence a fingerprint.
pub fn filler_entries() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("AndroidManifest.xml", b"<manifest/>".to_vec()),
        ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\r\n".to_vec()),
        ("META-INF/CERT.SF", b"Signature-Version: 1.0\r\n".to_vec()),
        ("classes.dex", vec![0x64, 0x65, 0x78, 0x0A]),
    ]
}

/// Big-endian minimal two's-complement bytes of a non-negative `BigNum`.
pub fn signed_bytes(value: &BigNumRef) -> Vec<u8> {
    let mut bytes = value.to_vec();
    if bytes.first().map_or(true, |&b| b & 0x80 != 0) {
        bytes.insert(0, 0);
    }
    bytes
}

pub fn expected_rsa_key_bytes(cert: &X509) -> Vec<u8> {
    let rsa = cert.public_key().unwrap().rsa().unwrap();
    signed_bytes(rsa.n())
}

pub fn expected_dsa_key_bytes(cert: &X509) -> Vec<u8> {
    let dsa = cert.public_key().unwrap().dsa().unwrap();
    signed_bytes(dsa.pub_key())
}

pub fn signature_bytes(cert: &X509) -> Vec<u8> {
    cert.signature().as_slice().to_vec()
}

/// Reference hash: `s[0]*31^(n-1) + ... + s[n-1]` over UTF-16 units, wrapping.
pub fn reference_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

pub fn expected_fingerprint(key_hex: &str, sign_hex: &str) -> String {
    format!("{},{}", reference_hash(key_hex), reference_hash(sign_hex))
}

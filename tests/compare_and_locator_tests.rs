//! Signer comparison and installed-package resolution.

mod common;

use common::*;
use sigprint::{
    compare_signers, fingerprint, installed_package_signature, DirectoryPackageLocator,
    FingerprintError, FingerprintWorkflow, PackageLocator, SignerComparison,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn build(dir: &TempDir, file_name: &str, payload: &[u8], block: Vec<u8>) -> PathBuf {
    write_archive(
        dir.path(),
        file_name,
        &[
            ("classes.dex", payload.to_vec()),
            ("META-INF/CERT.RSA", block),
        ],
    )
}

#[test]
fn same_certificate_different_content_is_same_signer() {
    let dir = TempDir::new().unwrap();
    let cert = rsa_certificate("Release Key");
    let v1 = build(&dir, "v1.apk", b"version one", certs_only_pkcs7(&[&cert]));
    let v2 = build(&dir, "v2.apk", b"version two", certs_only_pkcs7(&[&cert]));

    let comparison = compare_signers(&v1, &v2).unwrap();
    assert!(comparison.is_same_signer());
    match comparison {
        SignerComparison::SameSigner { fingerprint: fp } => {
            assert_eq!(Some(fp.to_string()), fingerprint(&v1));
        }
        other => panic!("unexpected comparison: {other:?}"),
    }
}

#[test]
fn different_keys_are_different_signers() {
    let dir = TempDir::new().unwrap();
    let ours = rsa_certificate("Ours");
    let theirs = certificate("Theirs", other_rsa_key(), "Theirs", other_rsa_key());
    let left = build(&dir, "left.apk", b"same", certs_only_pkcs7(&[&ours]));
    let right = build(&dir, "right.apk", b"same", certs_only_pkcs7(&[&theirs]));

    assert!(matches!(
        compare_signers(&left, &right).unwrap(),
        SignerComparison::DifferentSigner { .. }
    ));
}

#[test]
fn unsigned_side_is_reported() {
    let dir = TempDir::new().unwrap();
    let cert = rsa_certificate("Signed");
    let signed = build(&dir, "signed.apk", b"x", certs_only_pkcs7(&[&cert]));
    let unsigned = write_archive(dir.path(), "unsigned.apk", &filler_entries());

    assert_eq!(
        compare_signers(&signed, &unsigned).unwrap(),
        SignerComparison::Unsigned {
            left_signed: true,
            right_signed: false,
        }
    );
}

#[test]
fn unreadable_side_is_an_error() {
    let dir = TempDir::new().unwrap();
    let cert = rsa_certificate("Signed");
    let signed = build(&dir, "signed.apk", b"x", certs_only_pkcs7(&[&cert]));

    assert!(matches!(
        compare_signers(&signed, dir.path().join("gone.apk")),
        Err(FingerprintError::ArchiveUnreadable { .. })
    ));
}

#[test]
fn directory_locator_resolves_both_layouts() {
    let flat_root = TempDir::new().unwrap();
    let split_root = TempDir::new().unwrap();
    let cert = rsa_certificate("Installed");

    build(
        &flat_root,
        "com.example.flat.apk",
        b"flat",
        certs_only_pkcs7(&[&cert]),
    );
    std::fs::create_dir(split_root.path().join("com.example.split")).unwrap();
    let split = write_archive(
        &split_root.path().join("com.example.split"),
        "base.apk",
        &[("META-INF/CERT.RSA", certs_only_pkcs7(&[&cert]))],
    );

    let locator = DirectoryPackageLocator::new(vec![
        flat_root.path().to_path_buf(),
        split_root.path().to_path_buf(),
    ]);

    assert_eq!(locator.locate("com.example.split"), Some(split));

    let flat = installed_package_signature(&locator, "com.example.flat");
    let split = installed_package_signature(&locator, "com.example.split");
    assert!(flat.is_some());
    assert_eq!(flat, split);

    assert_eq!(installed_package_signature(&locator, "com.example.none"), None);
    assert_eq!(installed_package_signature(&locator, "../escape"), None);
}

#[test]
fn closure_locator_is_accepted() {
    let dir = TempDir::new().unwrap();
    let cert = rsa_certificate("Closure");
    let path = build(&dir, "pkg.apk", b"x", certs_only_pkcs7(&[&cert]));

    let known = path.clone();
    let locator = move |id: &str| -> Option<PathBuf> {
        (id == "com.example.pkg").then(|| known.clone())
    };

    assert_eq!(
        installed_package_signature(&locator, "com.example.pkg"),
        fingerprint(&path)
    );
    assert_eq!(installed_package_signature(&locator, "com.other"), None);
}

#[test]
fn located_but_unsigned_package_has_no_signature() {
    let root = TempDir::new().unwrap();
    write_archive(root.path(), "com.example.bare.apk", &filler_entries());

    let locator = DirectoryPackageLocator::new(vec![root.path().to_path_buf()]);
    assert!(locator.locate("com.example.bare").is_some());
    assert_eq!(installed_package_signature(&locator, "com.example.bare"), None);
}

#[test]
fn package_lookup_honours_workflow_entry_limit() {
    let root = TempDir::new().unwrap();
    let cert = rsa_certificate("Limited");
    build(
        &root,
        "com.example.limited.apk",
        b"x",
        certs_only_pkcs7(&[&cert]),
    );
    let locator = DirectoryPackageLocator::new(vec![root.path().to_path_buf()]);

    let default = FingerprintWorkflow::new().installed_package(&locator, "com.example.limited");
    assert_eq!(
        default.map(|fp| fp.to_string()),
        installed_package_signature(&locator, "com.example.limited")
    );
    assert!(default.is_some());

    let limited = FingerprintWorkflow::new()
        .with_max_entry_bytes(16)
        .installed_package(&locator, "com.example.limited");
    assert_eq!(limited, None);
}

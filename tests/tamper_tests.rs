//! tests/tamper_tests.rs
//! Modified, truncated, reordered and malformed streams must be rejected

mod common;
use common::{config, digest, password, sample_plaintext, TEST_DATA, TEST_PASSWORD};

use aesstream_rs::{decrypt, decrypt_begin, encrypt, verify, StreamConfig, StreamError};
use std::io::Cursor;

const HEADER_LEN: usize = 80;

/// HELLO! at chunk cap 4: records at 80 (len 4) and 120 (len 2), 158 bytes total.
fn sealed_hello() -> Vec<u8> {
    let mut sealed = Vec::new();
    encrypt(Cursor::new(TEST_DATA), &mut sealed, &password(TEST_PASSWORD), &config(4)).unwrap();
    assert_eq!(sealed.len(), 158);
    sealed
}

fn open(sealed: &[u8]) -> (Result<u64, StreamError>, Vec<u8>) {
    let mut out = Vec::new();
    let result = decrypt(Cursor::new(sealed), &mut out, &password(TEST_PASSWORD));
    (result, out)
}

fn fixed_header(key_len: u16, salt_len: u16, rounds: u32, chunk_cap: u32) -> Vec<u8> {
    let mut buf = vec![0u8; 4];
    buf.extend_from_slice(&key_len.to_be_bytes());
    buf.extend_from_slice(&salt_len.to_be_bytes());
    buf.extend_from_slice(&rounds.to_be_bytes());
    buf.extend_from_slice(&chunk_cap.to_be_bytes());
    buf
}

/// A fixed header plus enough salt and verifier bytes to satisfy it.
fn crafted_stream(key_len: u16, salt_len: u16, rounds: u32, chunk_cap: u32) -> Vec<u8> {
    let mut buf = fixed_header(key_len, salt_len, rounds, chunk_cap);
    buf.resize(buf.len() + salt_len as usize + 32, 0x5A);
    buf
}

fn begin(stream: &[u8]) -> Result<(), StreamError> {
    decrypt_begin(&mut Cursor::new(stream), &digest(TEST_PASSWORD)).map(|_| ())
}

#[test]
fn untouched_stream_opens() {
    let (result, out) = open(&sealed_hello());
    assert_eq!(result.unwrap(), 6);
    assert_eq!(out, TEST_DATA);
}

#[test]
fn flipped_tag_in_second_chunk() {
    let mut sealed = sealed_hello();
    sealed[120 + 4 + 7] ^= 0x01;

    let (result, out) = open(&sealed);
    assert!(matches!(result, Err(StreamError::Authentication(_))), "{result:?}");
    assert_eq!(out, b"HELL", "only the chunk before the bad one is released");
}

#[test]
fn flipped_ciphertext_in_first_chunk() {
    let mut sealed = sealed_hello();
    sealed[80 + 36 + 1] ^= 0x80;

    let (result, out) = open(&sealed);
    assert!(matches!(result, Err(StreamError::Authentication(_))), "{result:?}");
    assert!(out.is_empty());
}

#[test]
fn every_single_bit_flip_is_caught() {
    let sealed = sealed_hello();
    for pos in 0..sealed.len() {
        for bit in 0..8 {
            let mut damaged = sealed.clone();
            damaged[pos] ^= 1 << bit;
            let (result, out) = open(&damaged);

            match pos {
                // The reserved header byte is not interpreted.
                3 => {
                    assert!(result.is_ok(), "reserved byte flip at {pos}.{bit}");
                    continue;
                }
                // Upper round-count bytes would mean billions of PBKDF2 rounds.
                8..=10 => continue,
                // chunkCap only bounds record lengths: a larger cap still
                // accepts the records, a cap of zero is malformed.
                12..=15 => {
                    match result {
                        Ok(_) => assert_eq!(out, TEST_DATA),
                        Err(e) => assert!(matches!(e, StreamError::Format(_)), "{e:?}"),
                    }
                    continue;
                }
                _ => {}
            }
            assert!(result.is_err(), "flip at byte {pos} bit {bit} went unnoticed");
            assert!(TEST_DATA.starts_with(&out), "flip at {pos}.{bit} released bad plaintext");
        }
    }
}

#[test]
fn length_field_tampering() {
    // Claims one byte fewer than was sealed: the tag no longer matches.
    let mut sealed = sealed_hello();
    sealed[83] = 3;
    let (result, out) = open(&sealed);
    assert!(matches!(result, Err(StreamError::Authentication(_))), "{result:?}");
    assert!(out.is_empty());

    // Claims more than the header's chunk cap.
    let mut sealed = sealed_hello();
    sealed[80] = 0x80;
    let (result, _) = open(&sealed);
    assert!(matches!(result, Err(StreamError::Format(_))), "{result:?}");

    // Zero-length chunks are never written.
    let mut sealed = sealed_hello();
    sealed[80..84].copy_from_slice(&[0, 0, 0, 0]);
    let (result, _) = open(&sealed);
    assert!(matches!(result, Err(StreamError::Format(_))), "{result:?}");
}

#[test]
fn truncation_is_a_format_error() {
    let sealed = sealed_hello();
    for cut in [157, 140, 121, 100, 81] {
        let (result, _) = open(&sealed[..cut]);
        assert!(matches!(result, Err(StreamError::Format(_))), "cut at {cut}: {result:?}");
    }
    for cut in [79, 48, 16, 10, 0] {
        let (result, out) = open(&sealed[..cut]);
        assert!(matches!(result, Err(StreamError::Format(_))), "cut at {cut}: {result:?}");
        assert!(out.is_empty());
    }
}

#[test]
fn dropping_whole_trailing_chunks_goes_unnoticed() {
    // No trailer: a stream cut on a record boundary is a shorter valid stream.
    let sealed = sealed_hello();
    let (result, out) = open(&sealed[..120]);
    assert_eq!(result.unwrap(), 4);
    assert_eq!(out, b"HELL");
}

#[test]
fn swapped_chunks_fail() {
    let pw = password(TEST_PASSWORD);
    let mut sealed = Vec::new();
    encrypt(Cursor::new(b"ABCDEFGH"), &mut sealed, &pw, &config(4)).unwrap();
    assert_eq!(sealed.len(), HEADER_LEN + 2 * 40);

    let mut swapped = sealed[..HEADER_LEN].to_vec();
    swapped.extend_from_slice(&sealed[120..160]);
    swapped.extend_from_slice(&sealed[80..120]);

    let mut out = Vec::new();
    let err = decrypt(Cursor::new(&swapped), &mut out, &pw).unwrap_err();
    assert!(matches!(err, StreamError::Authentication(_)));
    assert!(out.is_empty());
}

#[test]
fn chunk_from_another_stream_fails() {
    let pw = password(TEST_PASSWORD);
    let mut a = Vec::new();
    let mut b = Vec::new();
    encrypt(Cursor::new(b"ABCDEFGH"), &mut a, &pw, &config(4)).unwrap();
    encrypt(Cursor::new(b"ABCDEFGH"), &mut b, &pw, &config(4)).unwrap();

    let mut spliced = a[..120].to_vec();
    spliced.extend_from_slice(&b[120..]);

    let mut out = Vec::new();
    let err = decrypt(Cursor::new(&spliced), &mut out, &pw).unwrap_err();
    assert!(matches!(err, StreamError::Authentication(_)));
    assert_eq!(out, b"ABCD");
}

#[test]
fn salt_and_verifier_changes_look_like_a_wrong_password() {
    for pos in [16, 47, 48, 79] {
        let mut sealed = sealed_hello();
        sealed[pos] ^= 0x10;
        let err = begin(&sealed).unwrap_err();
        assert!(
            matches!(err, StreamError::Authentication(ref m) if m == "password mismatch"),
            "byte {pos}: {err:?}"
        );
    }
}

#[test]
fn verify_reports_late_failures() {
    let pw = password("verify");
    let plaintext = sample_plaintext(64);
    let mut sealed = Vec::new();
    encrypt(Cursor::new(&plaintext), &mut sealed, &pw, &config(16)).unwrap();
    assert_eq!(verify(Cursor::new(&sealed), &pw).unwrap(), 64);

    let last = sealed.len() - 1;
    sealed[last] ^= 0xFF;
    assert!(matches!(
        verify(Cursor::new(&sealed), &pw),
        Err(StreamError::Authentication(_))
    ));
}

#[test]
fn header_bounds_are_checked_before_key_derivation() {
    // u32::MAX rounds would take hours: these must fail on the bounds alone.
    let slow = u32::MAX;

    let err = begin(&crafted_stream(129, 32, slow, 16)).unwrap_err();
    assert!(matches!(err, StreamError::Format(_)), "{err:?}");

    let err = begin(&crafted_stream(32, 129, slow, 16)).unwrap_err();
    assert!(matches!(err, StreamError::Format(_)), "{err:?}");

    let err = begin(&crafted_stream(32, 32, slow, 0)).unwrap_err();
    assert!(matches!(err, StreamError::Format(_)), "{err:?}");

    let err = begin(&crafted_stream(32, 32, slow, (1 << 30) + 1)).unwrap_err();
    assert!(matches!(err, StreamError::Format(_)), "{err:?}");

    for id_byte in 0..3 {
        let mut stream = crafted_stream(32, 32, slow, 16);
        stream[id_byte] = 7;
        let err = begin(&stream).unwrap_err();
        assert!(matches!(err, StreamError::Format(_)), "suite byte {id_byte}: {err:?}");
    }

    // Salt longer than the input actually carries.
    let mut short = fixed_header(32, 128, slow, 16);
    short.extend_from_slice(&[0u8; 40]);
    let err = begin(&short).unwrap_err();
    assert!(matches!(err, StreamError::Format(_)), "{err:?}");
}

#[test]
fn unusable_kdf_parameters() {
    let err = begin(&crafted_stream(32, 32, 0, 16)).unwrap_err();
    assert!(matches!(err, StreamError::KeyDerivation(_)), "{err:?}");

    let err = begin(&crafted_stream(16, 32, 1, 16)).unwrap_err();
    assert!(matches!(err, StreamError::KeyDerivation(_)), "{err:?}");
}

#[test]
fn encrypt_rejects_bad_input_without_writing() {
    let mut out = Vec::new();
    let err = encrypt(Cursor::new(TEST_DATA), &mut out, &password(""), &config(4)).unwrap_err();
    assert!(matches!(err, StreamError::KeyDerivation(_)));
    assert!(out.is_empty());

    let cfg = StreamConfig::new().with_kdf_rounds(0);
    let err = encrypt(Cursor::new(TEST_DATA), &mut out, &password("x"), &cfg).unwrap_err();
    assert!(matches!(err, StreamError::KeyDerivation(_)));
    assert!(out.is_empty());

    let err = encrypt(Cursor::new(TEST_DATA), &mut out, &password("x"), &config(0)).unwrap_err();
    assert!(matches!(err, StreamError::Format(_)));
    assert!(out.is_empty());
}

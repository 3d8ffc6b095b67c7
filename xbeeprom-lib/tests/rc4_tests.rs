//! Keystream vectors and state-machine tests for the RC4 cipher.

use xbeeprom_lib::error::EepromError;
use xbeeprom_lib::rc4::Rc4;

#[test]
fn zero_key_keystream_vector() {
    let mut cipher = Rc4::new(&[0u8; 20]).unwrap();
    let mut data = [0u8; 20];
    cipher.apply(&mut data);
    assert_eq!(
        hex::encode(data),
        "de188941a3375d3a8a061e67576e926dc71a7fa3"
    );
}

#[test]
fn ramp_key_keystream_vector() {
    let key: [u8; 20] = std::array::from_fn(|i| i as u8);
    let mut cipher = Rc4::new(&key).unwrap();
    let mut data = [0u8; 20];
    cipher.apply(&mut data);
    assert_eq!(
        hex::encode(data),
        "5e9740e23708b69e4ad4509c357605ddfced9d3b"
    );
}

#[test]
fn cipher_is_its_own_inverse() {
    let key = b"an arbitrary cipher key";
    let original: [u8; 48] = std::array::from_fn(|i| (i * 7 + 3) as u8);

    let mut data = original;
    Rc4::new(key).unwrap().apply(&mut data);
    assert_ne!(data, original);

    Rc4::new(key).unwrap().apply(&mut data);
    assert_eq!(data, original);
}

#[test]
fn cursors_persist_across_calls() {
    // Three fields ciphered through one instance must see the same
    // keystream as one contiguous buffer.
    let key: [u8; 20] = std::array::from_fn(|i| 0x80 | i as u8);

    let mut whole = [0x55u8; 28];
    Rc4::new(&key).unwrap().apply(&mut whole);

    let mut split = [0x55u8; 28];
    let mut cipher = Rc4::new(&key).unwrap();
    let (head, rest) = split.split_at_mut(8);
    let (mid, tail) = rest.split_at_mut(16);
    cipher.apply(head);
    cipher.apply(mid);
    cipher.apply(tail);

    assert_eq!(whole, split);
}

#[test]
fn empty_key_is_rejected() {
    let err = Rc4::new(&[]).unwrap_err();
    assert!(matches!(err, EepromError::MalformedInput(_)));
}

//! RC4 stream cipher protecting the EEPROM's confidential fields.

use crate::error::EepromError;

/// RC4 keystream generator.
///
/// The `(x, y)` cursors persist across [`apply`](Rc4::apply) calls, so
/// consecutive fields ciphered through one instance share a single continuous
/// keystream. The transform is its own inverse under a freshly scheduled
/// identical key.
#[derive(Debug)]
pub struct Rc4 {
    state: [u8; 256],
    x: u8,
    y: u8,
}

impl Rc4 {
    /// Schedule a fresh 256-byte permutation from `key`.
    pub fn new(key: &[u8]) -> Result<Self, EepromError> {
        if key.is_empty() {
            return Err(EepromError::MalformedInput(
                "RC4 key must not be empty".to_string(),
            ));
        }

        let mut state = [0u8; 256];
        for (i, entry) in state.iter_mut().enumerate() {
            *entry = i as u8;
        }

        let mut index1 = 0usize;
        let mut index2 = 0u8;
        for counter in 0..256 {
            index2 = key[index1]
                .wrapping_add(state[counter])
                .wrapping_add(index2);
            state.swap(counter, index2 as usize);
            index1 = (index1 + 1) % key.len();
        }

        Ok(Self { state, x: 0, y: 0 })
    }

    /// XOR the keystream into `data` in place, advancing the cursors.
    pub fn apply(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            self.x = self.x.wrapping_add(1);
            self.y = self.state[self.x as usize].wrapping_add(self.y);
            self.state.swap(self.x as usize, self.y as usize);
            let index = self.state[self.x as usize].wrapping_add(self.state[self.y as usize]);
            *byte ^= self.state[index as usize];
        }
    }
}

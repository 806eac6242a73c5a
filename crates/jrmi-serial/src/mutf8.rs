//! Modified UTF-8, the string encoding of `DataOutput.writeUTF` and of every
//! string in a serialization stream.
//!
//! Differences from standard UTF-8: `U+0000` is written as the two bytes
//! `C0 80`, and characters outside the BMP are written as a surrogate pair
//! with each half encoded separately (six bytes total).

/// Number of bytes [`encode`] produces for `s`.
pub fn encoded_len(s: &str) -> usize {
    s.encode_utf16().map(unit_len).sum()
}

pub fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(s));
    for unit in s.encode_utf16() {
        match unit_len(unit) {
            1 => out.push(unit as u8),
            2 => {
                out.push(0xC0 | ((unit >> 6) & 0x1F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | ((unit >> 12) & 0x0F) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

fn unit_len(unit: u16) -> usize {
    match unit {
        0x0001..=0x007F => 1,
        0x0000 | 0x0080..=0x07FF => 2,
        _ => 3,
    }
}

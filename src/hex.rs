//! Hexadecimal rendering of byte slices.

/// Uppercase hexadecimal rendering.
pub trait HexExt {
    /// Renders each byte as an uppercase hexadecimal pair, e.g.
    /// `[0x7F, 0x2C, 0x4A, 0x00]` becomes `"7F2C4A00"`.
    fn to_hex(&self) -> String;
}

impl HexExt for [u8] {
    fn to_hex(&self) -> String {
        hex::encode_upper(self)
    }
}

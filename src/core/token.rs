// Fixed-width ASCII tokens as they appear on the wire

use serde::{Serialize, Serializer};
use std::fmt;

/// A fixed-width byte token such as a class name (`N = 8`) or a
/// variable code (`N = 4`).
///
/// Equality and ordering are byte-exact, padding included. Use
/// [`FixedStr::trimmed`] to get the display form and [`FixedStr::padded`]
/// to build a token from a short name.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedStr<const N: usize>([u8; N]);

pub type ClassName = FixedStr<8>;
pub type InstanceName = FixedStr<8>;
pub type VariableCode = FixedStr<4>;

impl<const N: usize> FixedStr<N> {
    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Space-pads `name` to `N` bytes, truncating anything longer.
    pub fn padded(name: &str) -> Self {
        let mut bytes = [b' '; N];
        for (dst, src) in bytes.iter_mut().zip(name.bytes()) {
            *dst = src;
        }
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// The token without trailing spaces or NULs. Non-UTF-8 bytes are
    /// replaced.
    pub fn trimmed(&self) -> String {
        let end = self
            .0
            .iter()
            .rposition(|b| *b != b' ' && *b != 0)
            .map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }

    /// Compares against a short name, ignoring trailing padding.
    pub fn matches(&self, name: &str) -> bool {
        *self == Self::padded(name) && name.len() <= N
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trimmed())
    }
}

impl<const N: usize> Serialize for FixedStr<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.trimmed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_is_significant() {
        let a = FixedStr::<8>::new(*b"FIELD   ");
        let b = FixedStr::<8>::new(*b"FIELD\0\0\0");
        assert_ne!(a, b);
        assert_eq!(a.trimmed(), b.trimmed());
    }

    #[test]
    fn test_padded_and_matches() {
        let code = VariableCode::padded("QOP");
        assert_eq!(code.as_bytes(), b"QOP ");
        assert!(code.matches("QOP"));
        assert!(!code.matches("QO"));
        assert!(!code.matches("QOPXX"));
    }

    #[test]
    fn test_padded_truncates() {
        let name = ClassName::padded("VERYLONGNAME");
        assert_eq!(name.as_bytes(), b"VERYLONG");
    }

    #[test]
    fn test_display_trims() {
        let name = InstanceName::padded("NETWORK");
        assert_eq!(name.to_string(), "NETWORK");
        assert_eq!(format!("{:?}", name), "\"NETWORK \"");
    }
}

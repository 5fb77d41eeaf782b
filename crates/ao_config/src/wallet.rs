use std::fmt;

/// Opaque signing material (typically an Arweave JWK as JSON text).
///
/// Never printed: `Debug` shows only the length.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletCredential(String);

impl WalletCredential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw material, for handing to a signing primitive.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WalletCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletCredential(<{} bytes redacted>)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_material() {
        let w = WalletCredential::new(r#"{"kty":"RSA","d":"secret"}"#);
        let printed = format!("{w:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("redacted"));
    }
}

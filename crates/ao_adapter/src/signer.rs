use ao_config::WalletCredential;
use std::fmt;

/// Credential-bound handle used to authorize spawns and messages.
///
/// Built by an [`AoClient`](crate::client::AoClient) from wallet material;
/// the adapter only holds it and passes it back on signed calls.
#[derive(Clone)]
pub struct Signer {
    wallet: WalletCredential,
}

impl Signer {
    pub fn from_wallet(wallet: WalletCredential) -> Self {
        Self { wallet }
    }

    /// Credential a signing client signs spawns and messages with.
    pub fn wallet(&self) -> &WalletCredential {
        &self.wallet
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

//! `kd secret` command implementation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use clap::Args;
use rand::RngExt;

use crate::error::CliError;
use crate::output::Output;

/// Number of random bytes in a generated secret.
const SECRET_BYTES: usize = 32;

/// Arguments for the secret command.
#[derive(Args)]
pub(crate) struct SecretArgs {
    /// Print as an `AUTH_SECRET=...` line for a `.env` file.
    #[arg(long)]
    env: bool,
}

impl SecretArgs {
    /// Execute the secret command.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let secret = generate_secret();
        if self.env {
            Output::value(&format!("AUTH_SECRET={secret}"))?;
        } else {
            Output::value(&secret)?;
        }
        Ok(())
    }
}

/// 32 random bytes as unpadded base64url.
fn generate_secret() -> String {
    let bytes: [u8; SECRET_BYTES] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_secret_length() {
        assert_eq!(generate_secret().len(), 43);
    }

    #[test]
    fn test_secret_is_url_safe() {
        let secret = generate_secret();
        assert!(
            secret
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_secrets_differ() {
        assert_ne!(generate_secret(), generate_secret());
    }
}

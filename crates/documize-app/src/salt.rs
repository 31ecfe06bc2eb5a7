//! Salt generation for installs that have not configured one.

use rand::{TryCryptoRng, TryRngCore};
use rand::rngs::OsRng;
use tracing::info;

use documize_config::defaults::ENV_SALT;

use crate::error::{AppError, AppResult};

/// Number of random bytes drawn for a generated salt.
pub const SALT_LENGTH: usize = 17;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Map random bytes onto printable characters.
///
/// ASCII letters and digits are kept as-is; any other byte becomes the first
/// digit of its lowercase hexadecimal rendering (`0x07` becomes `7`, `0xe9`
/// becomes `e`).
#[must_use]
pub fn sanitize(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| {
            if byte.is_ascii_alphanumeric() {
                char::from(byte)
            } else {
                let leading = if byte < 0x10 { byte } else { byte >> 4 };
                char::from(HEX_DIGITS[usize::from(leading)])
            }
        })
        .collect()
}

/// Draw `length` bytes from `rng` and sanitise them into a salt.
///
/// # Errors
///
/// Returns the random source's error when it cannot fill the buffer.
pub fn generate_salt_with<R>(rng: &mut R, length: usize) -> Result<String, R::Error>
where
    R: TryCryptoRng + ?Sized,
{
    let mut bytes = vec![0_u8; length];
    TryRngCore::try_fill_bytes(rng, &mut bytes)?;
    Ok(sanitize(&bytes))
}

/// Resolve the salt, generating one from `rng` when none is configured.
///
/// A generated salt is logged with an instruction to persist it; it is never
/// written anywhere by this process.
///
/// # Errors
///
/// Returns [`AppError::Entropy`] when the random source fails.
pub fn provision_with<R>(configured: Option<&str>, rng: &mut R) -> AppResult<String>
where
    R: TryCryptoRng + ?Sized,
{
    if let Some(salt) = configured {
        return Ok(salt.to_string());
    }

    let salt = generate_salt_with(rng, SALT_LENGTH).map_err(|err| AppError::Entropy {
        detail: err.to_string(),
    })?;
    info!(
        salt = %salt,
        "please set {ENV_SALT} or use --salt with this value: {salt}"
    );
    Ok(salt)
}

/// Resolve the salt using the operating system's secure random source.
///
/// # Errors
///
/// Returns [`AppError::Entropy`] when the random source fails.
pub fn provision(configured: Option<&str>) -> AppResult<String> {
    provision_with(configured, &mut OsRng)
}

#[cfg(test)]
mod tests {
    use rand::{CryptoRng, RngCore};

    use super::*;
    use crate::testing::Exhausted;

    struct Scripted {
        bytes: Vec<u8>,
    }

    impl RngCore for Scripted {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for (slot, byte) in dst.iter_mut().zip(self.bytes.iter().cycle()) {
                *slot = *byte;
            }
        }
    }

    impl CryptoRng for Scripted {}

    #[test]
    fn sanitize_keeps_letters_and_digits() {
        assert_eq!(sanitize(b"azAZ09"), "azAZ09");
        assert_eq!(sanitize(b"5"), "5");
    }

    #[test]
    fn sanitize_replaces_other_bytes_with_leading_hex_digit() {
        assert_eq!(sanitize(&[0x07, 0x2a, 0xe9, 0xff, 0x00, 0x7f, b' ']), "72ef072");
    }

    #[test]
    fn every_byte_maps_to_alphanumeric() {
        let all: Vec<u8> = (0..=u8::MAX).collect();
        let salt = sanitize(&all);
        assert_eq!(salt.len(), all.len());
        assert!(salt.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_salt_has_requested_length() -> Result<(), std::convert::Infallible> {
        let mut rng = Scripted {
            bytes: vec![b'q', 0x91, b'7'],
        };
        let salt = generate_salt_with(&mut rng, SALT_LENGTH)?;
        assert_eq!(salt.len(), SALT_LENGTH);
        assert!(salt.starts_with("q97q97"));
        Ok(())
    }

    #[test]
    fn os_random_salt_is_alphanumeric() -> AppResult<()> {
        let salt = provision(None)?;
        assert_eq!(salt.len(), SALT_LENGTH);
        assert!(salt.chars().all(|c| c.is_ascii_alphanumeric()));
        Ok(())
    }

    #[test]
    fn configured_salt_is_returned_untouched() -> AppResult<()> {
        assert_eq!(provision_with(Some("keep-me"), &mut Exhausted)?, "keep-me");
        Ok(())
    }

    #[test]
    fn entropy_failure_is_reported() {
        let result = provision_with(None, &mut Exhausted);
        let Err(AppError::Entropy { detail }) = result else {
            panic!("expected entropy error");
        };
        assert_eq!(detail, "entropy source closed");
    }
}

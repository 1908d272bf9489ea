// src/core/hash.rs
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [Self; 5] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            Self::Md5 => 128,
            Self::Sha1 => 160,
            Self::Sha256 => 256,
            Self::Sha384 => 384,
            Self::Sha512 => 512,
        }
    }

    /// MD5 and SHA-1 have practical collision attacks.
    #[must_use]
    pub const fn is_secure(self) -> bool {
        !matches!(self, Self::Md5 | Self::Sha1)
    }

    /// Parses names like `md5`, `sha1`, `SHA-256`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "md5" => Some(Self::Md5),
            "sha1" => Some(Self::Sha1),
            "sha256" => Some(Self::Sha256),
            "sha384" => Some(Self::Sha384),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Lower-case hex digest of the UTF-8 bytes of `input`.
    #[must_use]
    pub fn digest(self, input: &str) -> String {
        let bytes = input.as_bytes();
        let encoded = match self {
            Self::Md5 => hex::encode(Md5::digest(bytes)),
            Self::Sha1 => hex::encode(Sha1::digest(bytes)),
            Self::Sha256 => hex::encode(Sha256::digest(bytes)),
            Self::Sha384 => hex::encode(Sha384::digest(bytes)),
            Self::Sha512 => hex::encode(Sha512::digest(bytes)),
        };
        trace!(algorithm = self.name(), "digest computed");
        encoded
    }
}

/// Every algorithm's digest of `input`, in table order. Blank input yields
/// nothing, matching the widget which only hashes once something is typed.
#[must_use]
pub fn digest_all(input: &str) -> Vec<(HashAlgorithm, String)> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    HashAlgorithm::ALL
        .into_iter()
        .map(|algorithm| (algorithm, algorithm.digest(input)))
        .collect()
}

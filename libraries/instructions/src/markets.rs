//! Static reference data for the perp market roster.
//!
//! The `market_index` column is the authoritative value assigned by the
//! program at market creation. Position in this table is a convenience and
//! must not be treated as the index.

use std::borrow::Cow;

use solana_sdk::{pubkey, pubkey::Pubkey};
use thiserror::Error;

/// One row of the market roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketEntry {
    pub symbol: &'static str,
    pub base_asset_symbol: &'static str,
    pub market_index: u16,
    pub devnet_pyth_oracle: Pubkey,
    pub mainnet_pyth_oracle: Pubkey,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown market symbol `{symbol}`")]
pub struct MarketNotFound {
    pub symbol: String,
}

/// An immutable view over a market roster.
///
/// The builtin roster is compiled in; tests and alternate deployments can
/// inject their own. Refreshing the roster is a data-replacement operation,
/// not a mutation.
#[derive(Debug, Clone)]
pub struct MarketCatalog {
    entries: Cow<'static, [MarketEntry]>,
}

impl MarketCatalog {
    /// The compiled-in roster
    pub fn builtin() -> Self {
        Self {
            entries: Cow::Borrowed(&MARKETS),
        }
    }

    /// A catalog over caller-provided entries
    pub fn from_entries(entries: Vec<MarketEntry>) -> Self {
        Self {
            entries: Cow::Owned(entries),
        }
    }

    pub fn lookup(&self, symbol: &str) -> Option<&MarketEntry> {
        self.entries.iter().find(|entry| entry.symbol == symbol)
    }

    pub fn get(&self, symbol: &str) -> Result<&MarketEntry, MarketNotFound> {
        self.lookup(symbol).ok_or_else(|| MarketNotFound {
            symbol: symbol.to_owned(),
        })
    }

    pub fn find_by_index(&self, market_index: u16) -> Option<&MarketEntry> {
        self.entries
            .iter()
            .find(|entry| entry.market_index == market_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarketEntry> {
        self.entries.iter()
    }
}

impl Default for MarketCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

pub static MARKETS: [MarketEntry; 17] = [
    MarketEntry {
        symbol: "SOL-PERP",
        base_asset_symbol: "SOL",
        market_index: 0,
        devnet_pyth_oracle: pubkey!("J83w4HKfqxwcq3BEMMkPFSppX3gqekLyLJBexebFVkix"),
        mainnet_pyth_oracle: pubkey!("H6ARHf6YXhGYeQfUzQNGk6rDNnLBQKrenN712K4AQJEG"),
    },
    MarketEntry {
        symbol: "BTC-PERP",
        base_asset_symbol: "BTC",
        market_index: 1,
        devnet_pyth_oracle: pubkey!("HovQMDrbAgAYPCmHVSrezcSmkMtXSSUsLDFANExrZh2J"),
        mainnet_pyth_oracle: pubkey!("GVXRSBjFk6e6J3NbVPXohDJetcTjaeeuykUpbQF8UoMU"),
    },
    MarketEntry {
        symbol: "ETH-PERP",
        base_asset_symbol: "ETH",
        market_index: 2,
        devnet_pyth_oracle: pubkey!("EdVCmQ9FSPcVe5YySXDPCRmc8aDQLKJ9xvYBMZPie1Vw"),
        mainnet_pyth_oracle: pubkey!("JBu1AL4obBcCMqKBBxhpWCNUt136ijcuMZLFvTP7iWdB"),
    },
    MarketEntry {
        symbol: "LUNA-PERP",
        base_asset_symbol: "LUNA",
        market_index: 3,
        devnet_pyth_oracle: pubkey!("8PugCXTAHLM9kfLSQWe2njE5pzAgUdpPk3Nx5zSm7BD3"),
        mainnet_pyth_oracle: pubkey!("5bmWuR1dgP4avtGYMNKLuxumZTVKGgoN2BCMXWDNL9nY"),
    },
    MarketEntry {
        symbol: "AVAX-PERP",
        base_asset_symbol: "AVAX",
        market_index: 4,
        devnet_pyth_oracle: pubkey!("FVb5h1VmHPfVb1RfqZckchq18GxRv4iKt8T4eVTQAqdz"),
        mainnet_pyth_oracle: pubkey!("Ax9ujW5B9oqcv59N8m6f1BpTBq2rGeGaBcpKjC5UYsXU"),
    },
    MarketEntry {
        symbol: "BNB-PERP",
        base_asset_symbol: "BNB",
        market_index: 5,
        devnet_pyth_oracle: pubkey!("GwzBgrXb4PG59zjce24SF2b9JXbLEjJJTBkmytuEZj1b"),
        mainnet_pyth_oracle: pubkey!("4CkQJBxhU8EZ2UjhigbtdaPbpTe6mqf811fipYBFbSYN"),
    },
    MarketEntry {
        symbol: "MATIC-PERP",
        base_asset_symbol: "MATIC",
        market_index: 6,
        devnet_pyth_oracle: pubkey!("FBirwuDFuRAu4iSGc7RGxN5koHB7EJM1wbCmyPuQoGur"),
        mainnet_pyth_oracle: pubkey!("7KVswB9vkCgeM3SHP7aGDijvdRAHK8P5wi9JXViCrtYh"),
    },
    MarketEntry {
        symbol: "ATOM-PERP",
        base_asset_symbol: "ATOM",
        market_index: 7,
        devnet_pyth_oracle: pubkey!("7YAze8qFUMkBnyLVdKT4TFUUFui99EwS5gfRArMcrvFk"),
        mainnet_pyth_oracle: pubkey!("CrCpTerNqtZvqLcKqz1k13oVeXV9WkMD2zA9hBKXrsbN"),
    },
    MarketEntry {
        symbol: "DOT-PERP",
        base_asset_symbol: "DOT",
        market_index: 8,
        devnet_pyth_oracle: pubkey!("4dqq5VBpN4EwYb7wyywjjfknvMKu7m78j9mKZRXTj462"),
        mainnet_pyth_oracle: pubkey!("EcV1X1gY2yb4KXxjVQtTHTbioum2gvmPnFk4zYAt7zne"),
    },
    MarketEntry {
        symbol: "ADA-PERP",
        base_asset_symbol: "ADA",
        market_index: 9,
        devnet_pyth_oracle: pubkey!("8oGTURNmSQkrBS1AQ5NjB2p8qY34UVmMA9ojrw8vnHus"),
        mainnet_pyth_oracle: pubkey!("3pyn4svBbxJ9Wnn3RVeafyLWfzie6yC5eTig2S62v9SC"),
    },
    MarketEntry {
        symbol: "ALGO-PERP",
        base_asset_symbol: "ALGO",
        market_index: 10,
        devnet_pyth_oracle: pubkey!("c1A946dY5NHuVda77C8XXtXytyR3wK1SCP3eA9VRfC3"),
        mainnet_pyth_oracle: pubkey!("HqFyq1wh1xKvL7KDqqT7NJeSPdAqsDqnmBisUC2XdXAX"),
    },
    MarketEntry {
        symbol: "FTT-PERP",
        base_asset_symbol: "FTT",
        market_index: 11,
        devnet_pyth_oracle: pubkey!("6vivTRs5ZPeeXbjo7dfburfaYDWoXjBtdtuYgQRuGfu"),
        mainnet_pyth_oracle: pubkey!("8JPJJkmDScpcNmBRKGZuPuG2GYAveQgP3t5gFuMymwvF"),
    },
    MarketEntry {
        symbol: "LTC-PERP",
        base_asset_symbol: "LTC",
        market_index: 12,
        devnet_pyth_oracle: pubkey!("BLArYBCUYhdWiY8PCUTpvFE21iaJq85dvxLk9bYMobcU"),
        mainnet_pyth_oracle: pubkey!("8RMnV1eD55iqUFJLMguPkYBkq8DCtx81XcmAja93LvRR"),
    },
    MarketEntry {
        symbol: "XRP-PERP",
        base_asset_symbol: "XRP",
        market_index: 13,
        devnet_pyth_oracle: pubkey!("WMW5xc3HypXwTnPesyUT49uLsyHwNURsWAEk39onKuk"),
        mainnet_pyth_oracle: pubkey!("WMW5xc3HypXwTnPesyUT49uLsyHwNURsWAEk39onKuk"),
    },
    MarketEntry {
        symbol: "APE-PERP",
        base_asset_symbol: "APE",
        market_index: 14,
        devnet_pyth_oracle: pubkey!("AwH6kBrJbkL9JTeqRd7Q59EdWh6UjPtoqoA5M4x4K2fA"),
        mainnet_pyth_oracle: pubkey!("74zeQpprjNtEghGiC3VEPsR9y4kR2GTd4Rq9YVk9tnjz"),
    },
    MarketEntry {
        symbol: "DOGE-PERP",
        base_asset_symbol: "DOGE",
        market_index: 15,
        devnet_pyth_oracle: pubkey!("4L6YhY8VvUgmqG5MvJkUJATtzB2rFqdrJwQCmFLv4Jzy"),
        mainnet_pyth_oracle: pubkey!("FsSM3s38PX9K7Dn6eGzuE29S2Dsk1Sss1baytTQdCaQj"),
    },
    MarketEntry {
        symbol: "NEAR-PERP",
        base_asset_symbol: "NEAR",
        market_index: 16,
        devnet_pyth_oracle: pubkey!("3gnSbT7bhoTdGkFVZc1dW1PvjreWzpUNUD5ppXwv1N59"),
        mainnet_pyth_oracle: pubkey!("ECSFWQ1bnnpqPVvoy9237t2wddZAaHisW88mYxuEHKWf"),
    },
];

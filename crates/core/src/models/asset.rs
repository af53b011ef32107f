use serde::{Deserialize, Serialize};

/// A current position in the portfolio, as reported by the holdings store.
///
/// Only the fields the history engine needs are carried here: the ticker,
/// how many units are held, and the latest known price per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Ticker symbol, uppercased (e.g., "AAPL", "BTC-USD", "VOO")
    pub symbol: String,

    /// Units held
    pub quantity: f64,

    /// Latest price per unit in the portfolio currency
    pub current_price: f64,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, quantity: f64, current_price: f64) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            quantity,
            current_price,
        }
    }

    /// Current market value of the position (`quantity × current_price`).
    pub fn market_value(&self) -> f64 {
        self.quantity * self.current_price
    }
}

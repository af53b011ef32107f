use crate::models::asset::Holding;

/// Picks the holdings whose history represents the whole portfolio.
///
/// Pure business logic with no I/O. Easy to test.
pub struct AssetSelector {
    top_assets: usize,
}

impl AssetSelector {
    pub fn new(top_assets: usize) -> Self {
        Self { top_assets }
    }

    pub fn top_assets(&self) -> usize {
        self.top_assets
    }

    /// Return up to `top_assets` holdings ranked by market value, largest first.
    ///
    /// Holdings with a non-finite or non-positive market value are never
    /// selected. Equal values keep their input order.
    pub fn select(&self, holdings: &[Holding]) -> Vec<Holding> {
        let mut ranked: Vec<&Holding> = holdings
            .iter()
            .filter(|h| {
                let value = h.market_value();
                value.is_finite() && value > 0.0
            })
            .collect();

        // Stable sort, descending by value
        ranked.sort_by(|a, b| b.market_value().total_cmp(&a.market_value()));

        ranked
            .into_iter()
            .take(self.top_assets)
            .cloned()
            .collect()
    }
}

impl Default for AssetSelector {
    fn default() -> Self {
        Self::new(3)
    }
}

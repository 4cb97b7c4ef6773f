/// A book price in cents, between zero and `MAX` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(i64);

impl Price {
    // $1,000,000.00
    pub const MAX: i64 = 100_000_000;

    pub fn parse(price_cents: i64) -> Result<Price, String> {
        if price_cents < 0 {
            return Err("price_cents can't be negative".to_string());
        }
        if price_cents > Self::MAX {
            return Err(format!("price_cents can't be more than {}", Self::MAX));
        }
        Ok(Self(price_cents))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(i32);

impl Quantity {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 99;

    pub fn parse(quantity: i32) -> Result<Quantity, String> {
        if (Self::MIN..=Self::MAX).contains(&quantity) {
            Ok(Self(quantity))
        } else {
            Err(format!(
                "quantity must be between {} and {}, got {}",
                Self::MIN, Self::MAX, quantity
            ))
        }
    }

    pub fn one() -> Quantity {
        Self(1)
    }

    pub fn inner(&self) -> i32 {
        self.0
    }
}

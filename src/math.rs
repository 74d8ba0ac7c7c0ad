// 2.0: exact wide integer arithmetic. 18-decimal raw values multiply out past u128,
// so every product/quotient goes through a 256-bit intermediate.

use primitive_types::U256;

/// floor(a * b / d), computed with a 256-bit intermediate product.
/// Returns `None` when `d` is zero or the quotient does not fit in u128.
#[must_use]
pub fn mul_div(a: u128, b: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    // a 128-bit by 128-bit product always fits in 256 bits
    let quotient = (U256::from(a) * U256::from(b)) / U256::from(d);
    if quotient > U256::from(u128::MAX) {
        None
    } else {
        Some(quotient.as_u128())
    }
}

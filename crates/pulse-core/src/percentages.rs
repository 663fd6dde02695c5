//! Share rescaling for the three-way split.
//!
//! The model is asked for shares that sum to 100 but does not always comply.
//! Instead of rejecting the reply, shares are rescaled proportionally with the
//! largest-remainder method so the result always sums to exactly [`TOTAL`].

/// The sum every normalized split must reach.
pub const TOTAL: u32 = 100;

/// Sum of `[sideA, sideB, neutral]` as reported.
#[must_use]
pub fn total(shares: [u8; 3]) -> u32 {
    shares.iter().map(|&s| u32::from(s)).sum()
}

/// Rescale `[sideA, sideB, neutral]` so the shares sum to exactly 100.
///
/// Shares already summing to 100 are returned unchanged. When every share is
/// zero there is nothing to scale, so the whole population is treated as
/// neutral. Leftover points after flooring go to the largest fractional
/// remainders; ties favour sideA, then sideB, then neutral.
#[must_use]
pub fn rescale(shares: [u8; 3]) -> [u8; 3] {
    let sum = total(shares);
    if sum == TOTAL {
        return shares;
    }
    if sum == 0 {
        return [0, 0, 100];
    }

    let mut floors = [0u32; 3];
    let mut remainders = [0u32; 3];
    for (i, &share) in shares.iter().enumerate() {
        let scaled = u32::from(share) * TOTAL;
        floors[i] = scaled / sum;
        remainders[i] = scaled % sum;
    }

    let leftover = TOTAL - floors.iter().sum::<u32>();
    let mut order = [0usize, 1, 2];
    // Stable sort keeps index order among equal remainders.
    order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]));
    for &i in order.iter().take(leftover as usize) {
        floors[i] += 1;
    }

    // Each floor is at most 100.
    floors.map(|v| u8::try_from(v).unwrap_or(u8::MAX))
}

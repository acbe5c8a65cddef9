//! Partial-payment proration of cart lines.
//!
//! When a payment attempt covers only part of the order, every cart line is
//! scaled down so that the line totals add up to the attempt amount exactly.
//! All arithmetic is done in integer minor units.
//!
//! Apportionment is largest-remainder: each line receives the floor of its
//! proportional share, and the leftover units go one each to the lines with
//! the largest remainders, earlier lines first on ties.

/// A cart line in minor units, as sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub name: String,
    pub unit_price: i64,
    pub quantity: i64,
}

impl PricedLine {
    pub fn new(name: impl Into<String>, unit_price: i64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    pub fn total(&self) -> i128 {
        i128::from(self.unit_price) * i128::from(self.quantity)
    }
}

/// Scales `lines` so that their totals sum to `target` minor units.
///
/// Lines are weighted by their current totals. When those do not sum to a
/// positive amount, lines with a positive quantity share the target equally.
/// A line whose scaled total is not divisible by its quantity is collapsed
/// to quantity 1 priced at the scaled total.
pub fn prorate(lines: &[PricedLine], target: i64) -> Vec<PricedLine> {
    if lines.is_empty() {
        return Vec::new();
    }

    let weights = weights(lines);
    let shares = apportion(&weights, i128::from(target));

    lines
        .iter()
        .zip(shares)
        .map(|(line, share)| rebuild(line, share))
        .collect()
}

fn weights(lines: &[PricedLine]) -> Vec<i128> {
    let totals: Vec<i128> = lines.iter().map(PricedLine::total).collect();
    if totals.iter().sum::<i128>() > 0 {
        return totals;
    }

    let any_positive_quantity = lines.iter().any(|l| l.quantity > 0);
    lines
        .iter()
        .map(|l| i128::from(!any_positive_quantity || l.quantity > 0))
        .collect()
}

fn apportion(weights: &[i128], target: i128) -> Vec<i128> {
    let sum: i128 = weights.iter().sum();

    let mut shares = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    for (index, weight) in weights.iter().enumerate() {
        let product = target * weight;
        shares.push(product.div_euclid(sum));
        remainders.push((product.rem_euclid(sum), index));
    }

    let allocated: i128 = shares.iter().sum();
    let leftover = usize::try_from(target - allocated).unwrap_or(0);

    // Largest remainder first; stable sort keeps earlier lines ahead on ties.
    remainders.sort_by(|a, b| b.0.cmp(&a.0));
    for &(_, index) in remainders.iter().take(leftover) {
        shares[index] += 1;
    }

    shares
}

fn rebuild(line: &PricedLine, share: i128) -> PricedLine {
    let total = i64::try_from(share).unwrap_or(i64::MAX);

    if line.quantity > 0 && total % line.quantity == 0 {
        return PricedLine::new(line.name.clone(), total / line.quantity, line.quantity);
    }
    if total == 0 && line.quantity <= 0 {
        return PricedLine::new(line.name.clone(), 0, line.quantity);
    }
    PricedLine::new(line.name.clone(), total, 1)
}

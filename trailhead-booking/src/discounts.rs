use trailhead_shared::GroupDiscount;

/// Pick the group tier for `guests`.
///
/// Among all tiers whose range covers the guest count the highest percentage
/// wins. Exactly equal percentages go to the tier listed first.
pub fn best_tier(tiers: &[GroupDiscount], guests: u32) -> Option<&GroupDiscount> {
    let mut best: Option<&GroupDiscount> = None;

    for tier in tiers.iter().filter(|t| t.covers(guests)) {
        match best {
            Some(current) if tier.discount_percentage <= current.discount_percentage => {}
            _ => best = Some(tier),
        }
    }

    best
}

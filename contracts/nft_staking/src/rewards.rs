/// Fixed-point scaling factor.
///
/// All reward-per-item accumulator values are multiplied by this constant
/// before storage to preserve sub-unit precision without floating-point
/// arithmetic. 10^12 gives 12 decimal places, more than enough headroom for
/// reward rates expressed in Stellar's 7-decimal token amounts.
pub const PRECISION: i128 = 1_000_000_000_000;

// ── Core accumulator math ───────────────────────────────────────────────────

/// Advance the global reward-per-item accumulator to `now`.
///
/// Accrual is clamped to the emission cutoff:
///
/// ```text
/// effective = min(now, until)
/// Δacc = reward_rate × (effective − last) × PRECISION
/// ```
///
/// The increment is *per staked item* — it is never divided by the total
/// stake count, since each item earns the full rate independently.
///
/// Returns `(new_accumulator, new_last_accrual)`. The last-accrual timestamp
/// moves to `effective` even when nothing is staked, so time during which
/// the pool was empty is consumed rather than credited retroactively to the
/// next staker. Calling twice at the same instant changes nothing on the
/// second call.
#[allow(clippy::arithmetic_side_effects)]
pub fn advance(
    stored: i128,
    reward_rate: i128,
    last: u64,
    now: u64,
    until: u64,
    total_staked: u32,
) -> (i128, u64) {
    let effective = now.min(until);
    if effective <= last {
        return (stored, last);
    }
    if total_staked == 0 {
        return (stored, effective);
    }

    let elapsed = (effective - last) as i128;
    let delta = reward_rate.saturating_mul(elapsed).saturating_mul(PRECISION);

    (stored.saturating_add(delta), effective)
}

/// Total reward owed to one account against an already-advanced accumulator.
///
/// ```text
/// earned = staked_count × (current_acc − checkpoint) / PRECISION + settled
/// ```
///
/// The subtraction isolates only the accumulation since the account's last
/// checkpoint, so previously settled or claimed reward is never counted
/// twice.
#[allow(clippy::arithmetic_side_effects)]
pub fn earned(staked_count: u32, current_acc: i128, checkpoint: i128, settled: i128) -> i128 {
    let new_reward =
        (staked_count as i128).saturating_mul(current_acc.saturating_sub(checkpoint)) / PRECISION;

    settled.saturating_add(new_reward)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    #[test]
    fn advance_is_idempotent_at_same_instant() {
        let (acc, last) = advance(0, 10, 0, 100, 1_000, 5);
        let (acc2, last2) = advance(acc, 10, last, 100, 1_000, 5);
        assert_eq!(acc, acc2);
        assert_eq!(last, last2);
    }

    #[test]
    fn advance_consumes_time_with_zero_staked() {
        // Nothing staked: accumulator frozen, but the clock still moves so
        // the empty interval is never credited later.
        let (acc, last) = advance(500, 10, 0, 100, 1_000, 0);
        assert_eq!(acc, 500);
        assert_eq!(last, 100);
    }

    #[test]
    fn advance_adds_per_item_increment() {
        // rate=10/s, elapsed=100s → Δacc = 10 × 100 × PRECISION
        let (acc, last) = advance(0, 10, 0, 100, 1_000, 3);
        assert_eq!(acc, 1_000 * PRECISION);
        assert_eq!(last, 100);
    }

    #[test]
    fn advance_increment_independent_of_stake_count() {
        // Per-item accumulator: 1 staker and 100 stakers see the same Δacc.
        let (one, _) = advance(0, 7, 0, 60, 1_000, 1);
        let (many, _) = advance(0, 7, 0, 60, 1_000, 100);
        assert_eq!(one, many);
    }

    #[test]
    fn advance_clamps_to_cutoff() {
        // Cutoff at t=50; asking for t=1_000 accrues only 50 seconds and
        // pins last-accrual at the cutoff.
        let (acc, last) = advance(0, 10, 0, 1_000, 50, 1);
        assert_eq!(acc, 500 * PRECISION);
        assert_eq!(last, 50);

        // Past the cutoff nothing more accrues, ever.
        let (acc2, last2) = advance(acc, 10, last, 2_000, 50, 1);
        assert_eq!(acc2, acc);
        assert_eq!(last2, 50);
    }

    #[test]
    fn earned_zero_when_checkpoint_current() {
        assert_eq!(earned(5, 100, 100, 42), 42);
    }

    #[test]
    fn earned_scales_with_staked_count() {
        // Accumulator moved by 30 whole units since the checkpoint.
        let delta = 30 * PRECISION;
        assert_eq!(earned(1, delta, 0, 0), 30);
        assert_eq!(earned(2, delta, 0, 0), 60);
    }

    #[test]
    fn earned_keeps_settled_balance() {
        let delta = 10 * PRECISION;
        assert_eq!(earned(3, delta, 0, 7), 37);
    }

    #[test]
    fn no_loss_across_stake_count_change() {
        // k items for d1 seconds, then k' for d2: total must be exactly
        // rate·k·d1 + rate·k'·d2 with settlement at the boundary.
        let rate = 1i128;
        let (k, d1, k2, d2) = (1u32, 30u64, 2u32, 1u64);

        let (acc1, last) = advance(0, rate, 0, d1, u64::MAX, k);
        let settled = earned(k, acc1, 0, 0);
        let (acc2, _) = advance(acc1, rate, last, d1 + d2, u64::MAX, k2);
        let total = earned(k2, acc2, acc1, settled);

        assert_eq!(total, rate * k as i128 * d1 as i128 + rate * k2 as i128 * d2 as i128);
        assert_eq!(total, 32);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let (acc, _) = advance(i128::MAX - 1, i128::MAX, 0, u64::MAX - 1, u64::MAX, 1);
        assert_eq!(acc, i128::MAX);
        let e = earned(u32::MAX, i128::MAX, 0, i128::MAX);
        assert!(e > 0);
    }
}

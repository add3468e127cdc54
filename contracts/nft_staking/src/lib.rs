#![no_std]

pub mod custody;
pub mod events;
pub mod ledger;
pub mod rewards;

use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const SETUP: Symbol = symbol_short!("SETUP");
const NFT_TOKEN: Symbol = symbol_short!("NFT_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const REWARD_RATE: Symbol = symbol_short!("RWD_RATE");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const ACCUMULATOR: Symbol = symbol_short!("ACC");
const LAST_ACCRUAL: Symbol = symbol_short!("LAST_ACC");
const REWARD_UNTIL: Symbol = symbol_short!("RWD_UNTIL");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotSetup = 1,
    AlreadySetup = 2,
    Unauthorized = 3,
    NotTokenOwner = 4,
    InvalidUnstake = 5,
    InvalidRewardUntilTimestamp = 6,
    InvalidInput = 7,
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Snapshot of an account's position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct StakerInfo {
    pub staked: u32,
    pub claimable: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct NftStakingContract;

#[contractimpl]
impl NftStakingContract {
    // ── Setup ───────────────────────────────────────────────────────────────

    /// Bootstrap the program. Callable exactly once.
    ///
    /// * `nft_token`        – collection whose items can be staked.
    /// * `reward_token`     – SAC address of the token paid as rewards.
    /// * `reward_rate`      – reward units emitted per staked item **per second**.
    /// * `emission_horizon` – seconds from now until emission stops; the
    ///   cutoff can later be pushed out via `deposit_rewards`.
    /// * `initial_reserve`  – reward tokens pulled from `admin` to seed the
    ///   payout reserve.
    pub fn setup(
        env: Env,
        admin: Address,
        nft_token: Address,
        reward_token: Address,
        reward_rate: i128,
        emission_horizon: u64,
        initial_reserve: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&SETUP) {
            return Err(ContractError::AlreadySetup);
        }
        admin.require_auth();

        if reward_rate < 0 || initial_reserve < 0 {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().timestamp();
        let reward_until = now.saturating_add(emission_horizon);

        env.storage().instance().set(&SETUP, &true);
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&NFT_TOKEN, &nft_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&REWARD_RATE, &reward_rate);
        env.storage().instance().set(&LAST_ACCRUAL, &now);
        env.storage().instance().set(&REWARD_UNTIL, &reward_until);
        // TOTAL_STAKED and ACCUMULATOR start at zero; unwrap_or(0) handles
        // absent keys, so no explicit init needed.

        if initial_reserve > 0 {
            custody::transfer_reward_in(&env, &reward_token, &admin, initial_reserve);
        }

        events::publish_setup(
            &env,
            admin,
            nft_token,
            reward_token,
            reward_rate,
            reward_until,
            initial_reserve,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit the given items into custody.
    ///
    /// The accumulator is flushed and the account settled first, so reward
    /// earned up to this instant uses the stake count that was actually in
    /// effect. Each id is validated and transferred one at a time; a
    /// duplicate id within the call fails the ownership check on its second
    /// occurrence, since custody already holds the item by then.
    pub fn stake_nfts(env: Env, staker: Address, token_ids: Vec<u128>) -> Result<(), ContractError> {
        Self::require_setup(&env)?;
        staker.require_auth();

        Self::flush(&env);
        Self::settle(&env, &staker);

        let nft_token = Self::nft_token(&env)?;
        let mut ids = ledger::staked_ids(&env, &staker);
        let mut total: u32 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);

        for token_id in token_ids.iter() {
            if custody::current_owner(&env, &nft_token, token_id) != staker {
                return Err(ContractError::NotTokenOwner);
            }
            custody::transfer_item_in(&env, &nft_token, &staker, token_id);
            ledger::set_depositor(&env, token_id, &staker);
            ids.push_back(token_id);
            total = total.saturating_add(1);
        }

        ledger::set_staked_ids(&env, &staker, &ids);
        env.storage().instance().set(&TOTAL_STAKED, &total);

        events::publish_staked(&env, staker, token_ids, total);

        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Return the given items to their depositor and pay out the full
    /// settled reward.
    ///
    /// A reserve shortfall aborts the whole call; use `emergency_unstake` to
    /// retrieve items regardless of reserve state. Returns the amount paid.
    pub fn claim_and_unstake_nfts(
        env: Env,
        staker: Address,
        token_ids: Vec<u128>,
    ) -> Result<i128, ContractError> {
        Self::require_setup(&env)?;
        staker.require_auth();

        Self::flush(&env);
        Self::settle(&env, &staker);

        let total = Self::remove_staked(&env, &staker, &token_ids)?;
        let paid = Self::pay_out(&env, &staker)?;

        events::publish_unstaked(&env, staker, token_ids, paid, total);

        Ok(paid)
    }

    /// Return the given items to their depositor **without** touching the
    /// reward token.
    ///
    /// Reward earned so far is settled and retained, so nothing is
    /// forfeited; it stays claimable once the reserve can cover it. Because
    /// no reward transfer is attempted, this path cannot fail on an empty
    /// reserve.
    pub fn emergency_unstake(
        env: Env,
        staker: Address,
        token_ids: Vec<u128>,
    ) -> Result<(), ContractError> {
        Self::require_setup(&env)?;
        staker.require_auth();

        Self::flush(&env);
        Self::settle(&env, &staker);

        let total = Self::remove_staked(&env, &staker, &token_ids)?;

        events::publish_emergency_unstaked(&env, staker, token_ids, total);

        Ok(())
    }

    // ── Claiming ────────────────────────────────────────────────────────────

    /// Pay out all settled reward for `account`. Paying zero is permitted
    /// and succeeds. Returns the amount paid.
    pub fn claim(env: Env, account: Address) -> Result<i128, ContractError> {
        Self::require_setup(&env)?;
        account.require_auth();

        Self::flush(&env);
        Self::settle(&env, &account);

        let paid = Self::pay_out(&env, &account)?;
        events::publish_reward_claimed(&env, account, paid);

        Ok(paid)
    }

    /// Permissionless variant of `claim`: anyone may trigger a payout, but
    /// the funds always go to `beneficiary`, never the caller.
    pub fn claim_for(env: Env, beneficiary: Address) -> Result<i128, ContractError> {
        Self::require_setup(&env)?;

        Self::flush(&env);
        Self::settle(&env, &beneficiary);

        let paid = Self::pay_out(&env, &beneficiary)?;
        events::publish_reward_claimed(&env, beneficiary, paid);

        Ok(paid)
    }

    // ── Emission schedule (admin) ───────────────────────────────────────────

    /// Top up the payout reserve and/or extend the emission cutoff.
    ///
    /// * `amount > 0` pulls that many reward tokens from `caller`.
    /// * `new_cutoff != 0` must be strictly in the future; the accumulator
    ///   is flushed under the old cutoff before the new one takes effect.
    /// * `(0, 0)` is a permitted no-op.
    pub fn deposit_rewards(
        env: Env,
        caller: Address,
        amount: i128,
        new_cutoff: u64,
    ) -> Result<(), ContractError> {
        Self::require_setup(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }
        if amount > 0 {
            let reward_token = Self::reward_token(&env)?;
            custody::transfer_reward_in(&env, &reward_token, &caller, amount);
        }

        if new_cutoff != 0 {
            if new_cutoff <= env.ledger().timestamp() {
                return Err(ContractError::InvalidRewardUntilTimestamp);
            }
            // Settle accrual under the old cutoff before moving it.
            Self::flush(&env);
            env.storage().instance().set(&REWARD_UNTIL, &new_cutoff);
        }

        let reward_until: u64 = env.storage().instance().get(&REWARD_UNTIL).unwrap_or(0);
        events::publish_rewards_deposited(&env, amount, reward_until);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Number of items currently staked by `account`.
    pub fn get_staked_balance(env: Env, account: Address) -> u32 {
        ledger::staked_ids(&env, &account).len()
    }

    /// The account's staked token ids, in insertion order.
    pub fn get_staked_tokens(env: Env, account: Address) -> Vec<u128> {
        ledger::staked_ids(&env, &account)
    }

    /// Whether `token_id` is currently staked by `account`: the account's
    /// set must contain the id *and* the stake record must name the account.
    pub fn is_staked_for_account(env: Env, account: Address, token_id: u128) -> bool {
        if ledger::depositor_of(&env, token_id) != Some(account.clone()) {
            return false;
        }
        ledger::staked_ids(&env, &account).contains(token_id)
    }

    /// Real-time claimable reward for an account without mutating state:
    /// the settled balance plus everything earned since the account's last
    /// checkpoint, under a hypothetical flush at the current timestamp.
    pub fn get_claimable(env: Env, account: Address) -> i128 {
        let (acc, _) = Self::projected_accumulator(&env);
        let count = ledger::staked_ids(&env, &account).len();
        let ckpt = ledger::checkpoint(&env, &account);
        let settled = ledger::settled(&env, &account);

        rewards::earned(count, acc, ckpt, settled)
    }

    /// Combined position for an account, read in one call.
    pub fn get_staker_info(env: Env, account: Address) -> StakerInfo {
        StakerInfo {
            staked: ledger::staked_ids(&env, &account).len(),
            claimable: Self::get_claimable(env, account),
        }
    }

    /// Sum of all accounts' staked-item counts.
    pub fn get_total_staked(env: Env) -> u32 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    /// Reward units emitted per staked item per second.
    pub fn get_reward_rate(env: Env) -> i128 {
        env.storage().instance().get(&REWARD_RATE).unwrap_or(0)
    }

    /// Emission cutoff timestamp: no reward accrues for time past it.
    pub fn get_reward_until(env: Env) -> u64 {
        env.storage().instance().get(&REWARD_UNTIL).unwrap_or(0)
    }

    /// Current value of the global reward-per-item accumulator, projected
    /// to the current timestamp.
    pub fn get_reward_per_unit(env: Env) -> i128 {
        Self::projected_accumulator(&env).0
    }

    pub fn is_setup(env: Env) -> bool {
        env.storage().instance().has(&SETUP)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotSetup)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: fail if the program has not been bootstrapped.
    fn require_setup(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&SETUP) {
            return Err(ContractError::NotSetup);
        }
        Ok(())
    }

    /// Guard: fail if `caller` is not the stored administrator.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotSetup)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn nft_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&NFT_TOKEN)
            .ok_or(ContractError::NotSetup)
    }

    fn reward_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotSetup)
    }

    /// The accumulator and last-accrual values a flush at the current
    /// timestamp would produce, without writing them back.
    fn projected_accumulator(env: &Env) -> (i128, u64) {
        let stored: i128 = env.storage().instance().get(&ACCUMULATOR).unwrap_or(0);
        let rate: i128 = env.storage().instance().get(&REWARD_RATE).unwrap_or(0);
        let last: u64 = env.storage().instance().get(&LAST_ACCRUAL).unwrap_or(0);
        let until: u64 = env.storage().instance().get(&REWARD_UNTIL).unwrap_or(0);
        let total: u32 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);

        rewards::advance(stored, rate, last, env.ledger().timestamp(), until, total)
    }

    /// Bring the global accumulator current, clamped to the emission cutoff.
    ///
    /// Must run before any mutation that changes the stake count or touches
    /// an account's pending reward, so the interval just ended is settled
    /// under the count that was actually staked during it.
    fn flush(env: &Env) {
        let (acc, last) = Self::projected_accumulator(env);
        env.storage().instance().set(&ACCUMULATOR, &acc);
        env.storage().instance().set(&LAST_ACCRUAL, &last);
    }

    /// Convert the account's elapsed-time entitlement into settled balance
    /// and move its checkpoint up to the (already flushed) accumulator.
    fn settle(env: &Env, account: &Address) {
        let acc: i128 = env.storage().instance().get(&ACCUMULATOR).unwrap_or(0);
        let count = ledger::staked_ids(env, account).len();
        let ckpt = ledger::checkpoint(env, account);
        let settled = ledger::settled(env, account);

        ledger::set_settled(env, account, rewards::earned(count, acc, ckpt, settled));
        ledger::set_checkpoint(env, account, acc);
    }

    /// Remove `token_ids` from `staker`'s position and return the items from
    /// custody. Fails with `InvalidUnstake` unless every id's stake record
    /// names `staker`; a duplicate id in the call fails on its second
    /// occurrence because the record was already removed. Returns the new
    /// global total.
    fn remove_staked(
        env: &Env,
        staker: &Address,
        token_ids: &Vec<u128>,
    ) -> Result<u32, ContractError> {
        let nft_token = Self::nft_token(env)?;
        let mut ids = ledger::staked_ids(env, staker);
        let mut total: u32 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);

        for token_id in token_ids.iter() {
            match ledger::depositor_of(env, token_id) {
                Some(ref depositor) if depositor == staker => {}
                _ => return Err(ContractError::InvalidUnstake),
            }
            ledger::remove_depositor(env, token_id);

            let index = ids
                .first_index_of(token_id)
                .ok_or(ContractError::InvalidUnstake)?;
            ids.remove(index);
            total = total.saturating_sub(1);

            custody::transfer_item_out(env, &nft_token, staker, token_id);
        }

        ledger::set_staked_ids(env, staker, &ids);
        env.storage().instance().set(&TOTAL_STAKED, &total);

        Ok(total)
    }

    /// Transfer the account's full settled balance out of the reserve and
    /// zero it. A zero balance skips the transfer and succeeds.
    fn pay_out(env: &Env, beneficiary: &Address) -> Result<i128, ContractError> {
        let owed = ledger::settled(env, beneficiary);
        if owed <= 0 {
            return Ok(0);
        }

        ledger::set_settled(env, beneficiary, 0);
        let reward_token = Self::reward_token(env)?;
        custody::transfer_reward_out(env, &reward_token, beneficiary, owed);

        Ok(owed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

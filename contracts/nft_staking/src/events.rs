#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Vec};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the program is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetupEvent {
    pub admin: Address,
    pub nft_token: Address,
    pub reward_token: Address,
    pub reward_rate: i128,
    pub reward_until: u64,
    pub initial_reserve: i128,
    pub timestamp: u64,
}

/// Fired when an account deposits items into custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftsStakedEvent {
    pub staker: Address,
    pub token_ids: Vec<u128>,
    pub new_total_staked: u32,
    pub timestamp: u64,
}

/// Fired when an account unstakes items and collects its settled reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftsUnstakedEvent {
    pub staker: Address,
    pub token_ids: Vec<u128>,
    pub reward_paid: i128,
    pub new_total_staked: u32,
    pub timestamp: u64,
}

/// Fired when an account retrieves items without a reward payout.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyUnstakedEvent {
    pub staker: Address,
    pub token_ids: Vec<u128>,
    pub new_total_staked: u32,
    pub timestamp: u64,
}

/// Fired when settled reward is paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub beneficiary: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the admin tops up the reserve and/or extends the cutoff.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsDepositedEvent {
    pub amount: i128,
    pub reward_until: u64,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_setup(
    env: &Env,
    admin: Address,
    nft_token: Address,
    reward_token: Address,
    reward_rate: i128,
    reward_until: u64,
    initial_reserve: i128,
) {
    env.events().publish(
        (symbol_short!("SETUP"),),
        SetupEvent {
            admin,
            nft_token,
            reward_token,
            reward_rate,
            reward_until,
            initial_reserve,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, token_ids: Vec<u128>, new_total_staked: u32) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        NftsStakedEvent {
            staker,
            token_ids,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    staker: Address,
    token_ids: Vec<u128>,
    reward_paid: i128,
    new_total_staked: u32,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        NftsUnstakedEvent {
            staker,
            token_ids,
            reward_paid,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_unstaked(
    env: &Env,
    staker: Address,
    token_ids: Vec<u128>,
    new_total_staked: u32,
) {
    env.events().publish(
        (symbol_short!("EMRG_UNST"), staker.clone()),
        EmergencyUnstakedEvent {
            staker,
            token_ids,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, beneficiary: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), beneficiary.clone()),
        RewardClaimedEvent {
            beneficiary,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_deposited(env: &Env, amount: i128, reward_until: u64) {
    env.events().publish(
        (symbol_short!("RWD_DEP"),),
        RewardsDepositedEvent {
            amount,
            reward_until,
            timestamp: env.ledger().timestamp(),
        },
    );
}

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

// ── Storage key prefixes ────────────────────────────────────────────────────
// Per-account persistent storage uses tuple keys: (prefix, account) or,
// for stake records, (prefix, token_id).

/// Account → set of token ids currently staked by that account.
const STAKED_IDS: Symbol = symbol_short!("STK_IDS");
/// Account → accumulator snapshot taken at the last settlement.
const CHECKPOINT: Symbol = symbol_short!("CKPT");
/// Account → reward settled but not yet paid out.
const SETTLED: Symbol = symbol_short!("ERND");
/// Token id → depositor. Existence of this record means the item is in
/// custody and counted in the global total.
const DEPOSITOR: Symbol = symbol_short!("DEP");

// ── Account state ───────────────────────────────────────────────────────────
// Accounts are created lazily: absent keys read as empty/zero. They are
// never deleted — after a full unstake they simply persist at zero.

/// The account's staked token-id set. Order is insertion order; only
/// membership matters.
pub fn staked_ids(env: &Env, account: &Address) -> Vec<u128> {
    env.storage()
        .persistent()
        .get(&(STAKED_IDS, account.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_staked_ids(env: &Env, account: &Address, ids: &Vec<u128>) {
    env.storage()
        .persistent()
        .set(&(STAKED_IDS, account.clone()), ids);
}

pub fn checkpoint(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(CHECKPOINT, account.clone()))
        .unwrap_or(0)
}

pub fn set_checkpoint(env: &Env, account: &Address, value: i128) {
    env.storage()
        .persistent()
        .set(&(CHECKPOINT, account.clone()), &value);
}

pub fn settled(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(SETTLED, account.clone()))
        .unwrap_or(0)
}

pub fn set_settled(env: &Env, account: &Address, value: i128) {
    env.storage()
        .persistent()
        .set(&(SETTLED, account.clone()), &value);
}

// ── Stake records ───────────────────────────────────────────────────────────

/// The recorded depositor of a staked item, or `None` if the item is not
/// currently staked.
pub fn depositor_of(env: &Env, token_id: u128) -> Option<Address> {
    env.storage().persistent().get(&(DEPOSITOR, token_id))
}

pub fn set_depositor(env: &Env, token_id: u128, account: &Address) {
    env.storage()
        .persistent()
        .set(&(DEPOSITOR, token_id), account);
}

pub fn remove_depositor(env: &Env, token_id: u128) {
    env.storage().persistent().remove(&(DEPOSITOR, token_id));
}

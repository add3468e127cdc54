use soroban_sdk::{contractclient, token, Address, Env};

// ── Non-fungible collection interface ───────────────────────────────────────

/// Minimal surface of the staked collection contract.
///
/// The staking ledger only ever needs to know who owns an item and to move
/// it; approval management is the holder's concern and happens outside this
/// contract.
#[contractclient(name = "NonFungibleClient")]
pub trait NonFungible {
    /// Current owner of `token_id`. Traps if the item does not exist.
    fn owner_of(env: Env, token_id: u128) -> Address;

    /// Move `token_id` from `from` to `to`. Traps if `from` is not the
    /// current owner.
    fn transfer(env: Env, from: Address, to: Address, token_id: u128);
}

// ── Transfer helpers ────────────────────────────────────────────────────────
// A failed transfer (wrong owner, insufficient reserve) traps in the asset
// contract, which aborts and rolls back the whole invocation. That rollback
// is the ledger's atomicity guarantee.

pub fn current_owner(env: &Env, collection: &Address, token_id: u128) -> Address {
    NonFungibleClient::new(env, collection).owner_of(&token_id)
}

/// Pull a staked item from its owner into contract custody.
pub fn transfer_item_in(env: &Env, collection: &Address, owner: &Address, token_id: u128) {
    NonFungibleClient::new(env, collection).transfer(
        owner,
        &env.current_contract_address(),
        &token_id,
    );
}

/// Return a custodied item to `to`.
pub fn transfer_item_out(env: &Env, collection: &Address, to: &Address, token_id: u128) {
    NonFungibleClient::new(env, collection).transfer(
        &env.current_contract_address(),
        to,
        &token_id,
    );
}

/// Pull reward tokens from `from` into the contract's payout reserve.
pub fn transfer_reward_in(env: &Env, reward_token: &Address, from: &Address, amount: i128) {
    token::Client::new(env, reward_token).transfer(
        from,
        &env.current_contract_address(),
        &amount,
    );
}

/// Pay reward tokens out of the reserve. Traps when the reserve balance is
/// insufficient; callers other than the emergency path let that abort the
/// operation.
pub fn transfer_reward_out(env: &Env, reward_token: &Address, to: &Address, amount: i128) {
    token::Client::new(env, reward_token).transfer(
        &env.current_contract_address(),
        to,
        &amount,
    );
}

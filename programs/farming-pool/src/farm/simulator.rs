//! Off-chain host for the reward ledger.
//!
//! `MemoryLedger` stands in for the SPL token program and `FarmSimulator` for
//! the runtime: it owns all accounts, hands out block heights and reverts
//! token movements of any call that fails.

use super::*;
use std::collections::HashMap;

/// In-memory token balances for pool vaults and user wallets.
///
/// Wallet balances are kept per token (the vault's mint). With
/// [`MemoryLedger::with_shared_mint`] both vaults draw on a single book, as
/// when the stake token is also the reward token.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    shared_mint: bool,
    vaults: HashMap<Vault, u64>,
    wallets: HashMap<(Vault, Pubkey), u64>,
    allowances: HashMap<Pubkey, u64>,
    fail_after: Option<usize>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shared_mint() -> Self {
        MemoryLedger {
            shared_mint: true,
            ..Self::default()
        }
    }

    /// Credits `amount` of the token held by `vault` to `owner`'s wallet.
    pub fn mint_to(&mut self, owner: &Pubkey, vault: Vault, amount: u64) {
        let book = self.book(vault);
        *self.wallets.entry((book, *owner)).or_default() += amount;
    }

    /// Tops up a pool vault directly, as an operator funding rewards would.
    pub fn fund_vault(&mut self, vault: Vault, amount: u64) {
        *self.vaults.entry(vault).or_default() += amount;
    }

    /// Lets the pool pull up to `amount` of stake token from `owner`.
    pub fn approve(&mut self, owner: &Pubkey, amount: u64) {
        self.allowances.insert(*owner, amount);
    }

    pub fn allowance(&self, owner: &Pubkey) -> u64 {
        self.allowances.get(owner).copied().unwrap_or_default()
    }

    pub fn wallet_balance(&self, owner: &Pubkey, vault: Vault) -> u64 {
        self.wallets
            .get(&(self.book(vault), *owner))
            .copied()
            .unwrap_or_default()
    }

    /// Makes the next `transfer` or `transfer_from` fail.
    pub fn fail_next_transfer(&mut self) {
        self.fail_transfer_after(0);
    }

    /// Lets `succeeding` transfers through, then fails the one after.
    pub fn fail_transfer_after(&mut self, succeeding: usize) {
        self.fail_after = Some(succeeding);
    }

    fn book(&self, vault: Vault) -> Vault {
        if self.shared_mint {
            Vault::Stake
        } else {
            vault
        }
    }

    fn injected_failure(&mut self) -> bool {
        match self.fail_after {
            Some(0) => {
                self.fail_after = None;
                true
            }
            Some(n) => {
                self.fail_after = Some(n - 1);
                false
            }
            None => false,
        }
    }
}

impl TokenLedger for MemoryLedger {
    fn balance_of(&self, vault: Vault) -> u64 {
        self.vaults.get(&vault).copied().unwrap_or_default()
    }

    fn transfer(&mut self, vault: Vault, to: &Pubkey, amount: u64) -> Result<()> {
        if self.injected_failure() {
            return err!(ErrorCode::TransferFailed);
        }
        let held = self.balance_of(vault);
        let book = self.book(vault);
        let received = self.wallets.get(&(book, *to)).copied().unwrap_or_default();
        let (Some(held), Some(received)) = (held.checked_sub(amount), received.checked_add(amount))
        else {
            return err!(ErrorCode::TransferFailed);
        };
        self.vaults.insert(vault, held);
        self.wallets.insert((book, *to), received);
        Ok(())
    }

    fn transfer_from(&mut self, from: &Pubkey, vault: Vault, amount: u64) -> Result<()> {
        if self.injected_failure() {
            return err!(ErrorCode::TransferFailed);
        }
        let book = self.book(vault);
        let balance = self.wallets.get(&(book, *from)).copied().unwrap_or_default();
        let allowance = self.allowance(from);
        let (Some(balance), Some(allowance), Some(held)) = (
            balance.checked_sub(amount),
            allowance.checked_sub(amount),
            self.balance_of(vault).checked_add(amount),
        ) else {
            return err!(ErrorCode::TransferFailed);
        };
        self.wallets.insert((book, *from), balance);
        self.allowances.insert(*from, allowance);
        self.vaults.insert(vault, held);
        Ok(())
    }
}

/// Single-threaded host running every call as an all-or-nothing transaction.
#[derive(Clone, Debug)]
pub struct FarmSimulator {
    pool: PoolState,
    users: HashMap<Pubkey, UserInfo>,
    ledger: MemoryLedger,
    block: u64,
    events: Vec<FarmEvent>,
}

impl FarmSimulator {
    /// Creates a pool owned by `owner`, accruing from `start_block`.
    pub fn new(
        owner: Pubkey,
        config: PoolConfig,
        ledger: MemoryLedger,
        start_block: u64,
    ) -> Result<Self> {
        let mut pool = PoolState::default();
        let created = initialize_pool(&mut pool, owner, &config, start_block)?;
        Ok(FarmSimulator {
            pool,
            users: HashMap::new(),
            ledger,
            block: start_block,
            events: vec![created],
        })
    }

    pub fn advance_blocks(&mut self, blocks: u64) {
        self.block += blocks;
    }

    pub fn block(&self) -> u64 {
        self.block
    }

    pub fn pool(&self) -> &PoolState {
        &self.pool
    }

    pub fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut MemoryLedger {
        &mut self.ledger
    }

    /// Every event committed so far, oldest first.
    pub fn events(&self) -> &[FarmEvent] {
        &self.events
    }

    pub fn user_info(&self, user: &Pubkey) -> UserInfo {
        self.users.get(user).cloned().unwrap_or_default()
    }

    pub fn reward_per_block(&self) -> u64 {
        self.pool.reward_per_block
    }

    pub fn pending_rewards(&self, user: &Pubkey) -> Result<u64> {
        self.pool.pending_rewards(&self.user_info(user), self.block)
    }

    pub fn deposit(&mut self, caller: &Pubkey, amount: u64) -> Result<Vec<FarmEvent>> {
        let mut user = self.user_info(caller);
        let events = self.atomically(|farm| farm.deposit(caller, &mut user, amount))?;
        self.users.insert(*caller, user);
        Ok(self.record(events))
    }

    pub fn withdraw(&mut self, caller: &Pubkey, amount: u64) -> Result<Vec<FarmEvent>> {
        let mut user = self.user_info(caller);
        let events = self.atomically(|farm| farm.withdraw(caller, &mut user, amount))?;
        self.users.insert(*caller, user);
        Ok(self.record(events))
    }

    pub fn harvest(&mut self, caller: &Pubkey) -> Result<Vec<FarmEvent>> {
        let mut user = self.user_info(caller);
        let events = self.atomically(|farm| farm.harvest(caller, &mut user))?;
        self.users.insert(*caller, user);
        Ok(self.record(events))
    }

    pub fn emergency_withdraw(&mut self, caller: &Pubkey) -> Result<Vec<FarmEvent>> {
        let mut user = self.user_info(caller);
        let events = self.atomically(|farm| farm.emergency_withdraw(caller, &mut user))?;
        self.users.insert(*caller, user);
        Ok(self.record(events))
    }

    pub fn set_reward_per_block(&mut self, caller: &Pubkey, rate: u64) -> Result<Vec<FarmEvent>> {
        let cap = OwnerCap::authorize(&self.pool, caller)?;
        let events = self.atomically(|farm| farm.set_reward_per_block(&cap, rate))?;
        Ok(self.record(events))
    }

    pub fn set_withdrawal_fee(
        &mut self,
        caller: &Pubkey,
        withdrawal_fee_bps: u16,
    ) -> Result<Vec<FarmEvent>> {
        let cap = OwnerCap::authorize(&self.pool, caller)?;
        let events = self.atomically(|farm| farm.set_withdrawal_fee(&cap, withdrawal_fee_bps))?;
        Ok(self.record(events))
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &Pubkey,
        new_owner: Pubkey,
    ) -> Result<Vec<FarmEvent>> {
        let cap = OwnerCap::authorize(&self.pool, caller)?;
        let events = self.atomically(|farm| farm.transfer_ownership(&cap, new_owner))?;
        Ok(self.record(events))
    }

    pub fn withdraw_fees(&mut self, caller: &Pubkey) -> Result<Vec<FarmEvent>> {
        let cap = OwnerCap::authorize(&self.pool, caller)?;
        let events = self.atomically(|farm| farm.withdraw_fees(&cap))?;
        Ok(self.record(events))
    }

    fn atomically<T>(
        &mut self,
        op: impl FnOnce(&mut Farm<'_, MemoryLedger>) -> Result<T>,
    ) -> Result<T> {
        let snapshot = self.ledger.clone();
        let block = BlockHeight(self.block);
        let result =
            Farm::new(&mut self.pool, &mut self.ledger, &block).and_then(|mut farm| op(&mut farm));
        if result.is_err() {
            // Injected failures are single-shot; the restored snapshot would re-arm them.
            self.ledger = MemoryLedger {
                fail_after: None,
                ..snapshot
            };
        }
        result
    }

    fn record(&mut self, events: Vec<FarmEvent>) -> Vec<FarmEvent> {
        self.events.extend(events.iter().cloned());
        events
    }
}

mod common;

use anchor_lang::prelude::*;
use common::*;
use farming_pool::error::ErrorCode;
use farming_pool::farm::simulator::MemoryLedger;
use farming_pool::farm::{BlockHeight, Farm, TokenLedger, Vault};
use farming_pool::states::*;

#[test]
fn single_staker_earns_full_emission() {
    let (mut sim, _) = setup();
    let alice = staker(&mut sim, 100 * ONE);

    let events = sim.deposit(&alice, 100 * ONE).unwrap();
    assert_eq!(
        events,
        vec![FarmEvent::Deposited(Deposited {
            user: alice,
            amount: 100 * ONE,
            user_amount: 100 * ONE,
            total_staked: 100 * ONE,
        })]
    );

    sim.advance_blocks(10);
    assert_eq!(sim.pending_rewards(&alice).unwrap(), 1_000 * ONE);
    // Viewing twice changes nothing.
    assert_eq!(sim.pending_rewards(&alice).unwrap(), 1_000 * ONE);
    assert_eq!(sim.pool().last_reward_block, START_BLOCK);
}

#[test]
fn earlier_staker_earns_more() {
    let (mut sim, _) = setup();
    let alice = staker(&mut sim, 100 * ONE);
    let bob = staker(&mut sim, 100 * ONE);

    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(5);
    sim.deposit(&bob, 100 * ONE).unwrap();
    sim.advance_blocks(5);

    // 5 blocks alone, then 5 blocks split evenly.
    assert_eq!(sim.pending_rewards(&alice).unwrap(), 750 * ONE);
    assert_eq!(sim.pending_rewards(&bob).unwrap(), 250 * ONE);
}

#[test]
fn blocks_without_stake_emit_nothing() {
    let (mut sim, _) = setup();
    let alice = staker(&mut sim, 100 * ONE);

    sim.advance_blocks(50);
    sim.deposit(&alice, 100 * ONE).unwrap();
    assert_eq!(sim.pool().acc_reward_per_share, 0);
    assert_eq!(sim.pending_rewards(&alice).unwrap(), 0);

    sim.advance_blocks(1);
    assert_eq!(sim.pending_rewards(&alice).unwrap(), 100 * ONE);
}

#[test]
fn harvest_pays_pending_reward() {
    let (mut sim, _) = setup();
    let alice = staker(&mut sim, 100 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(10);

    let events = sim.harvest(&alice).unwrap();
    assert_eq!(
        events,
        vec![FarmEvent::RewardsHarvested(RewardsHarvested {
            user: alice,
            reward: 1_000 * ONE,
        })]
    );
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Reward), 1_000 * ONE);
    assert_eq!(
        sim.ledger().balance_of(Vault::Reward),
        REWARD_RESERVE - 1_000 * ONE
    );
    assert_eq!(sim.pending_rewards(&alice).unwrap(), 0);
    assert_eq!(sim.user_info(&alice).amount, 100 * ONE);

    // Nothing pending: succeeds without moving tokens.
    assert!(sim.harvest(&alice).unwrap().is_empty());
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Reward), 1_000 * ONE);
}

#[test]
fn second_deposit_settles_accrued_reward() {
    let (mut sim, _) = setup();
    let alice = staker(&mut sim, 200 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(4);

    let events = sim.deposit(&alice, 100 * ONE).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        FarmEvent::RewardsHarvested(RewardsHarvested {
            user: alice,
            reward: 400 * ONE,
        })
    );
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Reward), 400 * ONE);
    assert_eq!(sim.user_info(&alice).amount, 200 * ONE);
    assert_eq!(sim.pending_rewards(&alice).unwrap(), 0);
}

#[test]
fn deposit_zero_only_harvests() {
    let (mut sim, _) = setup();
    let alice = staker(&mut sim, 100 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(3);

    sim.deposit(&alice, 0).unwrap();
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Reward), 300 * ONE);
    assert_eq!(sim.user_info(&alice).amount, 100 * ONE);
    assert_eq!(sim.pool().total_staked, 100 * ONE);
}

#[test]
fn withdraw_retains_fee() {
    let (mut sim, owner) = setup();
    let alice = staker(&mut sim, 1_000 * ONE);
    sim.deposit(&alice, 1_000 * ONE).unwrap();

    let events = sim.withdraw(&alice, 1_000 * ONE).unwrap();
    assert_eq!(
        events,
        vec![FarmEvent::Withdrawn(Withdrawn {
            user: alice,
            amount: 1_000 * ONE,
            fee: 25 * ONE,
            net_amount: 975 * ONE,
            total_staked: 0,
        })]
    );
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Stake), 975 * ONE);
    assert_eq!(sim.pool().collected_fees, 25 * ONE);
    assert_eq!(sim.ledger().balance_of(Vault::Stake), 25 * ONE);

    let info = sim.user_info(&alice);
    assert_eq!(info.amount, 0);
    assert!(!info.is_staking);

    let events = sim.withdraw_fees(&owner).unwrap();
    assert_eq!(
        events,
        vec![FarmEvent::FeesWithdrawn(FeesWithdrawn {
            owner,
            amount: 25 * ONE,
        })]
    );
    assert_eq!(sim.ledger().wallet_balance(&owner, Vault::Stake), 25 * ONE);
    assert_eq!(sim.pool().collected_fees, 0);
    assert_eq!(sim.ledger().balance_of(Vault::Stake), 0);

    // Nothing left to collect.
    assert!(sim.withdraw_fees(&owner).unwrap().is_empty());
}

#[test]
fn withdraw_pays_reward_with_principal() {
    let (mut sim, _) = setup();
    let alice = staker(&mut sim, 100 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(10);

    let events = sim.withdraw(&alice, 40 * ONE).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Reward), 1_000 * ONE);
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Stake), 39 * ONE);
    assert_eq!(sim.user_info(&alice).amount, 60 * ONE);
    assert!(sim.user_info(&alice).is_staking);
    assert_eq!(sim.pool().total_staked, 60 * ONE);
}

#[test]
fn withdraw_more_than_staked_is_rejected() {
    let (mut sim, _) = setup();
    let alice = staker(&mut sim, 100 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(10);
    let pool = sim.pool().clone();

    let err = sim.withdraw(&alice, 100 * ONE + 1).unwrap_err();
    assert_eq!(err, error!(ErrorCode::InsufficientStake));
    assert_eq!(sim.pool(), &pool);
    assert_eq!(sim.user_info(&alice).amount, 100 * ONE);
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Stake), 0);
}

#[test]
fn unknown_user_cannot_withdraw_or_harvest() {
    let (mut sim, _) = setup();
    let stranger = Pubkey::new_unique();

    assert_eq!(
        sim.withdraw(&stranger, 0).unwrap_err(),
        error!(ErrorCode::UserNotFound)
    );
    assert_eq!(
        sim.harvest(&stranger).unwrap_err(),
        error!(ErrorCode::UserNotFound)
    );
    assert_eq!(
        sim.emergency_withdraw(&stranger).unwrap_err(),
        error!(ErrorCode::UserNotFound)
    );
    assert_eq!(sim.pending_rewards(&stranger).unwrap(), 0);
}

#[test]
fn emergency_withdraw_forfeits_reward() {
    let (mut sim, _) = setup();
    let alice = staker(&mut sim, 100 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(10);

    let events = sim.emergency_withdraw(&alice).unwrap();
    assert_eq!(
        events,
        vec![FarmEvent::EmergencyWithdrawn(EmergencyWithdrawn {
            user: alice,
            amount: 100 * ONE,
            forfeited_reward: 1_000 * ONE,
        })]
    );

    let info = sim.user_info(&alice);
    assert_eq!(info.amount, 0);
    assert_eq!(info.reward_debt, 0);
    assert!(!info.is_staking);
    assert_eq!(sim.pending_rewards(&alice).unwrap(), 0);
    assert_eq!(sim.pool().total_staked, 0);
    // No fee on the emergency path; forfeited reward stays in the vault.
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Stake), 100 * ONE);
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Reward), 0);
    assert_eq!(sim.ledger().balance_of(Vault::Reward), REWARD_RESERVE);
}

#[test]
fn emergency_withdraw_ignores_empty_reward_vault() {
    let (mut sim, _) = setup_with(MemoryLedger::new(), 0);
    let alice = staker(&mut sim, 100 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(10);

    assert_eq!(
        sim.harvest(&alice).unwrap_err(),
        error!(ErrorCode::InsufficientRewardReserve)
    );
    sim.emergency_withdraw(&alice).unwrap();
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Stake), 100 * ONE);
}

#[test]
fn reward_rate_changes_within_bounds() {
    let (mut sim, owner) = setup();

    let events = sim.set_reward_per_block(&owner, 200 * ONE).unwrap();
    assert_eq!(
        events,
        vec![FarmEvent::RewardRateUpdated(RewardRateUpdated {
            old_rate: 100 * ONE,
            new_rate: 200 * ONE,
            effective_block: START_BLOCK,
        })]
    );
    assert_eq!(sim.reward_per_block(), 200 * ONE);

    sim.set_reward_per_block(&owner, 50 * ONE).unwrap();
    assert_eq!(sim.reward_per_block(), 50 * ONE);

    for rate in [250 * ONE, 49 * ONE, 0] {
        assert_eq!(
            sim.set_reward_per_block(&owner, rate).unwrap_err(),
            error!(ErrorCode::InvalidRewardRate)
        );
        assert_eq!(sim.reward_per_block(), 50 * ONE);
    }
}

#[test]
fn reward_rate_change_is_not_retroactive() {
    let (mut sim, owner) = setup();
    let alice = staker(&mut sim, 100 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();

    sim.advance_blocks(10);
    sim.set_reward_per_block(&owner, 200 * ONE).unwrap();
    assert_eq!(sim.pool().last_reward_block, START_BLOCK + 10);
    sim.advance_blocks(10);

    assert_eq!(sim.pending_rewards(&alice).unwrap(), 3_000 * ONE);
}

#[test]
fn only_owner_administers() {
    let (mut sim, owner) = setup();
    let mallory = Pubkey::new_unique();

    assert_eq!(
        sim.set_reward_per_block(&mallory, 150 * ONE).unwrap_err(),
        error!(ErrorCode::Unauthorized)
    );
    assert_eq!(
        sim.set_withdrawal_fee(&mallory, 0).unwrap_err(),
        error!(ErrorCode::Unauthorized)
    );
    assert_eq!(
        sim.withdraw_fees(&mallory).unwrap_err(),
        error!(ErrorCode::Unauthorized)
    );
    assert_eq!(
        sim.transfer_ownership(&mallory, mallory).unwrap_err(),
        error!(ErrorCode::Unauthorized)
    );
    assert_eq!(sim.reward_per_block(), 100 * ONE);
    assert_eq!(sim.pool().owner, owner);
}

#[test]
fn ownership_moves_admin_rights() {
    let (mut sim, owner) = setup();
    let successor = Pubkey::new_unique();

    assert_eq!(
        sim.transfer_ownership(&owner, Pubkey::default()).unwrap_err(),
        error!(ErrorCode::InvalidOwner)
    );

    let events = sim.transfer_ownership(&owner, successor).unwrap();
    assert_eq!(
        events,
        vec![FarmEvent::OwnershipTransferred(OwnershipTransferred {
            previous_owner: owner,
            new_owner: successor,
        })]
    );
    assert_eq!(
        sim.set_reward_per_block(&owner, 150 * ONE).unwrap_err(),
        error!(ErrorCode::Unauthorized)
    );
    sim.set_reward_per_block(&successor, 150 * ONE).unwrap();
    assert_eq!(sim.reward_per_block(), 150 * ONE);
}

#[test]
fn withdrawal_fee_is_bounded() {
    let (mut sim, owner) = setup();
    let alice = staker(&mut sim, 100 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();

    assert_eq!(
        sim.set_withdrawal_fee(&owner, 10_001).unwrap_err(),
        error!(ErrorCode::InvalidWithdrawalFee)
    );
    sim.set_withdrawal_fee(&owner, 0).unwrap();
    sim.withdraw(&alice, 100 * ONE).unwrap();
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Stake), 100 * ONE);
    assert_eq!(sim.pool().collected_fees, 0);
}

#[test]
fn insufficient_reserve_rolls_back() {
    let (mut sim, _) = setup_with(MemoryLedger::new(), 10 * ONE);
    let alice = staker(&mut sim, 200 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(10);
    let pool = sim.pool().clone();
    let info = sim.user_info(&alice);

    for err in [
        sim.harvest(&alice).unwrap_err(),
        sim.withdraw(&alice, 50 * ONE).unwrap_err(),
        sim.deposit(&alice, 100 * ONE).unwrap_err(),
    ] {
        assert_eq!(err, error!(ErrorCode::InsufficientRewardReserve));
    }
    assert_eq!(sim.pool(), &pool);
    assert_eq!(sim.user_info(&alice), info);
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Stake), 100 * ONE);

    // Topping the vault up makes the same call succeed.
    sim.ledger_mut().fund_vault(Vault::Reward, 990 * ONE);
    sim.harvest(&alice).unwrap();
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Reward), 1_000 * ONE);
}

#[test]
fn failed_pull_leaves_no_trace() {
    let (mut sim, _) = setup();
    let alice = Pubkey::new_unique();
    sim.ledger_mut().mint_to(&alice, Vault::Stake, 100 * ONE);

    // No allowance granted.
    assert_eq!(
        sim.deposit(&alice, 100 * ONE).unwrap_err(),
        error!(ErrorCode::TransferFailed)
    );
    assert!(!sim.user_info(&alice).is_registered());
    assert_eq!(sim.pool().total_staked, 0);
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Stake), 100 * ONE);
}

#[test]
fn failed_payout_reverts_earlier_transfers() {
    let (mut sim, _) = setup();
    let alice = staker(&mut sim, 100 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(10);
    let pool = sim.pool().clone();

    // Principal goes out first, then the reward payout fails.
    sim.ledger_mut().fail_transfer_after(1);
    assert_eq!(
        sim.withdraw(&alice, 40 * ONE).unwrap_err(),
        error!(ErrorCode::TransferFailed)
    );
    assert_eq!(sim.pool(), &pool);
    assert_eq!(sim.user_info(&alice).amount, 100 * ONE);
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Stake), 0);
    assert_eq!(sim.ledger().balance_of(Vault::Stake), 100 * ONE);
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Reward), 0);

    // The injected failure is spent.
    sim.withdraw(&alice, 40 * ONE).unwrap();
    assert_eq!(sim.ledger().wallet_balance(&alice, Vault::Reward), 1_000 * ONE);
}

#[test]
fn shared_token_keeps_principal_out_of_rewards() {
    let (mut sim, _) = setup_with(MemoryLedger::with_shared_mint(), 0);
    let alice = staker(&mut sim, 100 * ONE);
    sim.deposit(&alice, 100 * ONE).unwrap();
    sim.advance_blocks(1);

    // 100 staked tokens sit in custody, yet they never fund the 100 reward.
    assert_eq!(
        sim.harvest(&alice).unwrap_err(),
        error!(ErrorCode::InsufficientRewardReserve)
    );

    sim.ledger_mut().fund_vault(Vault::Reward, 100 * ONE);
    sim.withdraw(&alice, 100 * ONE).unwrap();
    // 97.5 principal after fee plus 100 reward, all in one token.
    assert_eq!(
        sim.ledger().wallet_balance(&alice, Vault::Stake),
        97 * ONE + ONE / 2 + 100 * ONE
    );
    assert_eq!(sim.ledger().balance_of(Vault::Stake), 2 * ONE + ONE / 2);
    assert_eq!(sim.ledger().balance_of(Vault::Reward), 0);
}

#[test]
fn foreign_record_is_rejected() {
    let owner = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let mallory = Pubkey::new_unique();
    let mut pool = PoolState::default();
    farming_pool::farm::initialize_pool(&mut pool, owner, &config(), 0).unwrap();
    let mut ledger = MemoryLedger::new();
    ledger.mint_to(&alice, Vault::Stake, 10);
    ledger.approve(&alice, 10);
    ledger.mint_to(&mallory, Vault::Stake, 10);
    ledger.approve(&mallory, 10);

    let mut record = UserInfo::default();
    let mut farm = Farm::new(&mut pool, &mut ledger, &BlockHeight(1)).unwrap();
    farm.deposit(&alice, &mut record, 10).unwrap();
    assert_eq!(record.owner, alice);
    assert_eq!(farm.current_block(), 1);
    assert_eq!(farm.pending_rewards(&record).unwrap(), 0);

    let before = record.clone();
    assert_eq!(
        farm.deposit(&mallory, &mut record, 10).unwrap_err(),
        error!(ErrorCode::Unauthorized)
    );
    assert_eq!(
        farm.withdraw(&mallory, &mut record, 1).unwrap_err(),
        error!(ErrorCode::Unauthorized)
    );
    assert_eq!(
        farm.emergency_withdraw(&mallory, &mut record).unwrap_err(),
        error!(ErrorCode::Unauthorized)
    );
    assert_eq!(record, before);
}

#[test]
fn block_height_cannot_regress() {
    let owner = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let mut pool = PoolState::default();
    farming_pool::farm::initialize_pool(&mut pool, owner, &config(), 100).unwrap();
    let mut ledger = MemoryLedger::new();
    ledger.mint_to(&alice, Vault::Stake, 10);
    ledger.approve(&alice, 10);

    let mut record = UserInfo::default();
    let mut farm = Farm::new(&mut pool, &mut ledger, &BlockHeight(99)).unwrap();
    assert_eq!(
        farm.deposit(&alice, &mut record, 10).unwrap_err(),
        error!(ErrorCode::BlockHeightRegressed)
    );
    assert!(!record.is_registered());
    assert_eq!(farm.pool().last_reward_block, 100);
}

#[test]
fn invalid_initial_config_is_rejected() {
    let owner = Pubkey::new_unique();
    let mut too_fast = config();
    too_fast.reward_per_block = 300 * ONE;
    let mut greedy = config();
    greedy.withdrawal_fee_bps = 10_001;

    assert_eq!(
        farming_pool::farm::simulator::FarmSimulator::new(owner, too_fast, MemoryLedger::new(), 0)
            .unwrap_err(),
        error!(ErrorCode::InvalidRewardRate)
    );
    assert_eq!(
        farming_pool::farm::simulator::FarmSimulator::new(owner, greedy, MemoryLedger::new(), 0)
            .unwrap_err(),
        error!(ErrorCode::InvalidWithdrawalFee)
    );
}

#[test]
fn pool_creation_is_logged_first() {
    let (sim, owner) = setup();
    assert_eq!(
        sim.events()[0],
        FarmEvent::PoolInitialized(PoolInitialized {
            owner,
            stake_mint: Pubkey::default(),
            reward_mint: Pubkey::default(),
            reward_per_block: 100 * ONE,
            min_reward_rate: 50 * ONE,
            max_reward_rate: 200 * ONE,
            withdrawal_fee_bps: 250,
            start_block: START_BLOCK,
        })
    );
}

//! Payment flow integration tests
//!
//! Walks a channel from configuration to withdrawal:
//! 1. Settings on disk resolve into a ledger
//! 2. Payments are committed, the update is signed by both parties
//! 3. The receiver's withdrawal verifies as the contract would check it

use broker_core::{to_hex, Address, PaymentChannel, Signature, I256, U256};
use broker_crypto::{random_preimage, sign_update, update_fingerprint, Party, StubSigner};
use broker_ledger::{LedgerError, PaymentsTree};
use broker_merkle::{parse_hex_proof, verify_bytes, TreeLayout};
use broker_settings::{ScopeKind, Settings};

const CHANNEL: [u8; 32] = [0x5a; 32];

fn contract() -> Address {
    Address::repeat_byte(0xc0)
}

fn sender() -> Address {
    Address::repeat_byte(0x01)
}

fn receiver() -> Address {
    Address::repeat_byte(0x02)
}

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.channel.contract_address = contract();
    settings.channel.chain_id = 5;
    settings
}

fn channel() -> PaymentChannel {
    PaymentChannel {
        sender: sender(),
        receiver: receiver(),
        value: U256::from(1_000_000u64),
        root: [0u8; 32],
        settling_period: 100,
        settling_until: 0,
        nonce: 0,
    }
}

fn amount(v: i64) -> I256 {
    I256::try_from(v).unwrap()
}

// ============================================================================
// 1. Configuration
// ============================================================================

#[test]
fn test_ledger_from_saved_settings() -> anyhow::Result<()> {
    broker_logging::init_test();

    let suffix: u64 = rand::random();
    let dir = std::env::temp_dir().join(format!("broker-flow-{}", suffix));
    let path = dir.join("settings.json");

    let mut saved = settings();
    saved.channel.scope = ScopeKind::Chain;
    saved.save_to(&path)?;

    let loaded = Settings::load_from(&path)?;
    let mut ledger = PaymentsTree::from_settings(&loaded, CHANNEL)?;

    let preimage = random_preimage();
    let hashlock = ledger.add_payment(amount(250), preimage)?;
    assert_eq!(
        hashlock,
        broker_crypto::derive_chain_hashlock(5, &CHANNEL, &preimage, &amount(250))
    );

    let _ = std::fs::remove_dir_all(dir);
    Ok(())
}

/// An order-preserving tree cannot back withdrawals the contract checks
#[test]
fn test_positional_layout_is_rejected() -> anyhow::Result<()> {
    let mut settings = settings();
    settings.tree.layout = TreeLayout::Positional;
    let json = serde_json::to_string(&settings)?;
    let loaded: Settings = serde_json::from_str(&json)?;
    assert!(matches!(
        PaymentsTree::from_settings(&loaded, CHANNEL),
        Err(LedgerError::UnsupportedLayout(TreeLayout::Positional))
    ));
    Ok(())
}

#[test]
fn test_unset_contract_address_is_rejected() {
    let result = PaymentsTree::from_settings(&Settings::default(), CHANNEL);
    assert!(matches!(result, Err(LedgerError::Settings(_))));
}

// ============================================================================
// 2. Commit and sign
// ============================================================================

#[test]
fn test_update_signed_by_both_parties() -> anyhow::Result<()> {
    broker_logging::init_test();
    let settings = settings();
    let mut ledger = PaymentsTree::from_settings(&settings, CHANNEL)?;
    let mut channel = channel();

    for cents in [100, 250, -40, 75] {
        ledger.add_payment(amount(cents), random_preimage())?;
    }

    let nonce = channel.next_nonce().expect("nonce space left");
    let mut update = ledger.update(nonce)?;
    assert!(update.supersedes(&channel));

    let signer = StubSigner;
    let (contract, chain_id) = (settings.channel.contract_address, settings.channel.chain_id);
    sign_update(&signer, &sender(), Party::Sender, &contract, chain_id, &mut update)?;
    sign_update(&signer, &receiver(), Party::Receiver, &contract, chain_id, &mut update)?;
    assert!(update.is_fully_signed());

    let fingerprint = update_fingerprint(&contract, chain_id, &update);
    let sender_sig = update.sender_sig.expect("signed");
    assert!(signer.verify(&sender(), &fingerprint, &sender_sig));

    // signatures travel as 65-byte RPC hex
    let relayed = Signature::from_rpc(&sender_sig.to_rpc())?;
    assert_eq!(relayed, sender_sig);

    // contract accepts the update
    channel.root = update.merkle_root;
    channel.nonce = update.nonce;
    assert!(!update.supersedes(&channel));
    assert_eq!(channel.root, ledger.root()?);
    Ok(())
}

// ============================================================================
// 3. Withdraw
// ============================================================================

#[test]
fn test_withdrawal_verifies_as_contract_input() -> anyhow::Result<()> {
    broker_logging::init_test();
    let mut ledger = PaymentsTree::from_settings(&settings(), CHANNEL)?;
    let preimages: Vec<_> = (0..9).map(|_| random_preimage()).collect();
    for (i, preimage) in preimages.iter().enumerate() {
        ledger.add_payment(amount(10 * (i as i64 + 1)), *preimage)?;
    }
    let onchain_root = ledger.update(1)?.merkle_root;

    for preimage in &preimages {
        let withdrawal = ledger.withdrawal(preimage)?;
        ledger.prevalidate(&withdrawal, &onchain_root)?;

        // what the contract receives: bytes proof, recomputed hashlock
        let proof = parse_hex_proof(&withdrawal.proof_hex())?;
        let hashlock = withdrawal.hashlock(ledger.scope());
        assert!(verify_bytes(&proof.concat(), &onchain_root, &hashlock)?);
    }
    Ok(())
}

/// A payment added after the last update cannot be withdrawn yet
#[test]
fn test_withdrawal_against_lagging_root() -> anyhow::Result<()> {
    broker_logging::init_test();
    let mut ledger = PaymentsTree::from_settings(&settings(), CHANNEL)?;
    ledger.add_payment(amount(10), random_preimage())?;
    ledger.add_payment(amount(20), random_preimage())?;
    let onchain_root = ledger.update(1)?.merkle_root;

    let late = random_preimage();
    ledger.add_payment(amount(30), late)?;
    let withdrawal = ledger.withdrawal(&late)?;
    match ledger.prevalidate(&withdrawal, &onchain_root) {
        Err(LedgerError::ProofRejected(root)) => assert_eq!(root, to_hex(&onchain_root)),
        other => panic!("expected rejection, got {:?}", other),
    }

    let refreshed = ledger.update(2)?.merkle_root;
    ledger.prevalidate(&withdrawal, &refreshed)?;
    Ok(())
}

/// Both parties' ledgers agree on the root once the receiver records the
/// sender's hashlocks
#[test]
fn test_counterparty_ledger_matches_root() -> anyhow::Result<()> {
    let settings = settings();
    let mut sender_ledger = PaymentsTree::from_settings(&settings, CHANNEL)?;
    let mut receiver_ledger = PaymentsTree::from_settings(&settings, CHANNEL)?;

    for cents in [5, 15, 25] {
        let value = amount(cents);
        let hashlock = sender_ledger.add_payment(value, random_preimage())?;
        receiver_ledger.add_counterparty_payment(value, hashlock)?;
    }
    assert_eq!(sender_ledger.root()?, receiver_ledger.root()?);
    assert_eq!(receiver_ledger.known_payments().count(), 0);
    Ok(())
}

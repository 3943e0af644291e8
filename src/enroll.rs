//! # Enrollment flow
//!
//! 1. `initialize` creates the user's enrollment PDA and records the GitHub
//!    handle. Skipped when the PDA already exists.
//! 2. `submit_ts` / `submit_rs` mints an asset into the collection. It reads
//!    the PDA created in step 1, so it only runs once step 1 is confirmed.
//!
//! Each step fetches its own blockhash right before building its message.

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use tracing::{error, info, warn};

use crate::config::{Cluster, ProgramIds, SubmitVariant};
use crate::error::Result;
use crate::explorer;
use crate::instructions;
use crate::pda;
use crate::rpc::ChainRpc;
use crate::stage::{FlowReport, StageOne, StageTwo};
use crate::transaction::{compile_message, sign_and_submit};

/// Everything the flow needs besides the RPC and the user's keypair.
#[derive(Debug, Clone)]
pub struct EnrollmentParams {
    pub programs: ProgramIds,
    pub github: String,
    pub variant: SubmitVariant,
    pub cluster: Cluster,
}

/// How step 1 was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initialization {
    Submitted(Signature),
    AlreadyEnrolled,
}

/// State carried from step 1 into step 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub account: Pubkey,
    pub authority: Pubkey,
    pub initialization: Initialization,
}

/// Step 1: make sure the enrollment account exists.
pub async fn initialize<R>(
    rpc: &R,
    user: &Keypair,
    params: &EnrollmentParams,
) -> Result<Enrollment>
where
    R: ChainRpc + ?Sized,
{
    let programs = &params.programs;
    let (account, _) = pda::enrollment_account(&user.pubkey(), &programs.prereq_program);
    let (authority, _) = pda::collection_authority(&programs.collection, &programs.prereq_program);
    info!("PDA account: {}", account);
    info!("Authority PDA: {}", authority);

    if rpc.account_exists(&account).await? {
        info!("Enrollment account already exists, skipping initialize");
        return Ok(Enrollment {
            account,
            authority,
            initialization: Initialization::AlreadyEnrolled,
        });
    }

    let blockhash = rpc.get_latest_blockhash().await?;
    let ix = instructions::initialize(programs, &user.pubkey(), &account, &params.github)?;
    let message = compile_message(&[ix], &user.pubkey(), &blockhash);
    let signature = sign_and_submit(rpc, message, &[user]).await?;

    Ok(Enrollment {
        account,
        authority,
        initialization: Initialization::Submitted(signature),
    })
}

/// Step 2: mint the enrollment asset with a freshly generated `mint` keypair.
pub async fn submit<R>(
    rpc: &R,
    user: &Keypair,
    mint: &Keypair,
    enrollment: &Enrollment,
    params: &EnrollmentParams,
) -> Result<Signature>
where
    R: ChainRpc + ?Sized,
{
    let blockhash = rpc.get_latest_blockhash().await?;
    let ix = instructions::submit(
        &params.programs,
        params.variant,
        &user.pubkey(),
        &enrollment.account,
        &mint.pubkey(),
        &enrollment.authority,
    );
    let message = compile_message(&[ix], &user.pubkey(), &blockhash);
    sign_and_submit(rpc, message, &[user, mint]).await
}

/// Run both steps. A failed `initialize` aborts before `submit` is built.
pub async fn run_enrollment<R>(
    rpc: &R,
    user: &Keypair,
    params: &EnrollmentParams,
) -> FlowReport<Enrollment>
where
    R: ChainRpc + ?Sized,
{
    info!("=== Step 1: Initialize ===");
    let enrollment = match StageOne::from(initialize(rpc, user, params).await) {
        StageOne::Ok(enrollment) => {
            if let Initialization::Submitted(signature) = &enrollment.initialization {
                info!("✅ Initialize Success!");
                info!("{}", explorer::transaction_url(signature, params.cluster));
            }
            enrollment
        }
        StageOne::Fatal(err) => {
            error!("❌ Initialize failed: {}", err);
            return FlowReport::Aborted(err);
        }
    };

    info!("=== Step 2: {} ===", params.variant.instruction_name());
    let mint = Keypair::new();
    info!("Mint: {}", mint.pubkey());
    let second = StageTwo::from(submit(rpc, user, &mint, &enrollment, params).await);
    match &second {
        StageTwo::Ok(signature) => {
            info!("✅ Submit Success! Prerequisites completed.");
            info!("{}", explorer::transaction_url(signature, params.cluster));
        }
        StageTwo::Reported(err) => warn!("❌ Submit failed: {}", err),
    }

    FlowReport::Completed {
        first: enrollment,
        second,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrereqError;
    use crate::instructions::{
        INITIALIZE_DISCRIMINATOR, SUBMIT_RS_DISCRIMINATOR, SUBMIT_TS_DISCRIMINATOR,
    };
    use crate::rpc::fake::{Call, FakeRpc, Op};
    use solana_sdk::hash::Hash;

    fn params(variant: SubmitVariant) -> EnrollmentParams {
        EnrollmentParams {
            programs: ProgramIds::default(),
            github: "meowyx".to_string(),
            variant,
            cluster: Cluster::Devnet,
        }
    }

    fn program_data(tx: &solana_sdk::transaction::Transaction) -> Vec<u8> {
        tx.message.instructions[0].data.clone()
    }

    #[tokio::test]
    async fn runs_initialize_then_submit() {
        let user = Keypair::new();
        let rpc = FakeRpc::new().with_balance(user.pubkey(), 1_000_000_000);

        let report = run_enrollment(&rpc, &user, &params(SubmitVariant::Ts)).await;

        let FlowReport::Completed { first, second } = report else {
            panic!("flow aborted");
        };
        assert!(matches!(first.initialization, Initialization::Submitted(_)));
        assert!(second.signature().is_some());

        let sent = rpc.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(program_data(&sent[0])[..8], INITIALIZE_DISCRIMINATOR);
        assert_eq!(program_data(&sent[1]), SUBMIT_TS_DISCRIMINATOR.to_vec());
        // user and mint both sign the submit
        assert_eq!(sent[1].signatures.len(), 2);
        assert!(sent[1].message.account_keys.contains(&first.account));
        assert!(sent[1].message.account_keys.contains(&first.authority));
    }

    #[tokio::test]
    async fn each_step_uses_its_own_blockhash() {
        let user = Keypair::new();
        let (a, b) = (Hash::new_unique(), Hash::new_unique());
        let rpc = FakeRpc::new()
            .with_balance(user.pubkey(), 1_000_000_000)
            .with_blockhashes(&[a, b]);

        run_enrollment(&rpc, &user, &params(SubmitVariant::Ts)).await;

        let sent = rpc.sent();
        assert_eq!(sent[0].message.recent_blockhash, a);
        assert_eq!(sent[1].message.recent_blockhash, b);
    }

    #[tokio::test]
    async fn rejected_initialize_never_builds_submit() {
        let user = Keypair::new();
        let rpc = FakeRpc::new().with_balance(user.pubkey(), 1_000_000_000);
        rpc.reject_next_send("custom program error: 0x0");

        let report = run_enrollment(&rpc, &user, &params(SubmitVariant::Ts)).await;

        match report {
            FlowReport::Aborted(PrereqError::TransactionRejected(reason)) => {
                assert!(reason.contains("0x0"))
            }
            other => panic!("expected abort, got {other:?}"),
        }
        assert_eq!(rpc.sent().len(), 1);
        // No second blockhash was fetched, so no submit message was ever built.
        assert_eq!(rpc.blockhash_fetches(), 1);
    }

    #[tokio::test]
    async fn rejected_submit_is_reported() {
        let user = Keypair::new();
        let rpc = FakeRpc::new().with_balance(user.pubkey(), 1_000_000_000);
        let params = params(SubmitVariant::Ts);

        // Let initialize through, then fail the submit.
        let enrollment = initialize(&rpc, &user, &params).await.unwrap();
        rpc.reject_next_send("mint already in use");
        let mint = Keypair::new();
        let second = StageTwo::from(submit(&rpc, &user, &mint, &enrollment, &params).await);

        assert!(matches!(
            second,
            StageTwo::Reported(PrereqError::TransactionRejected(_))
        ));
        // The confirmed initialize stays in place.
        assert!(matches!(enrollment.initialization, Initialization::Submitted(_)));
    }

    #[tokio::test]
    async fn existing_account_skips_initialize() {
        let user = Keypair::new();
        let programs = ProgramIds::default();
        let (account, _) = pda::enrollment_account(&user.pubkey(), &programs.prereq_program);
        let rpc = FakeRpc::new()
            .with_balance(user.pubkey(), 1_000_000_000)
            .with_account(account);

        let report = run_enrollment(&rpc, &user, &params(SubmitVariant::Rs)).await;

        let FlowReport::Completed { first, second } = report else {
            panic!("flow aborted");
        };
        assert_eq!(first.initialization, Initialization::AlreadyEnrolled);
        assert!(second.signature().is_some());
        let sent = rpc.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(program_data(&sent[0]), SUBMIT_RS_DISCRIMINATOR.to_vec());
        assert!(matches!(rpc.calls()[0], Call::AccountExists(a) if a == account));
    }

    #[tokio::test]
    async fn failed_account_lookup_aborts_before_any_blockhash() {
        let user = Keypair::new();
        let rpc = FakeRpc::new().with_balance(user.pubkey(), 1_000_000_000);
        rpc.fail_next(Op::AccountExists, "connection reset");

        let report = run_enrollment(&rpc, &user, &params(SubmitVariant::Ts)).await;

        match report {
            FlowReport::Aborted(PrereqError::Rpc(reason)) => {
                assert!(reason.contains("connection reset"))
            }
            other => panic!("expected abort, got {other:?}"),
        }
        assert_eq!(rpc.blockhash_fetches(), 0);
        assert!(rpc.sent().is_empty());
    }
}

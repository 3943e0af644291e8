//! # Instruction builders
//!
//! The prereq program is an Anchor program: every instruction starts with the
//! first eight bytes of `sha256("global:<name>")`, followed by borsh-encoded
//! arguments.

use solana_sdk::{
    hash::hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_instruction,
};

use crate::config::{ProgramIds, SubmitVariant};
use crate::error::{PrereqError, Result};

pub const INITIALIZE_DISCRIMINATOR: [u8; 8] = [175, 175, 109, 31, 13, 152, 155, 237];
pub const SUBMIT_TS_DISCRIMINATOR: [u8; 8] = [137, 241, 199, 223, 125, 33, 85, 217];
pub const SUBMIT_RS_DISCRIMINATOR: [u8; 8] = [77, 124, 82, 163, 21, 133, 181, 206];

/// Anchor's global instruction discriminator for `name`.
pub fn anchor_discriminator(name: &str) -> [u8; 8] {
    let digest = hash(format!("global:{name}").as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&digest.to_bytes()[..8]);
    discriminator
}

impl SubmitVariant {
    pub fn discriminator(self) -> [u8; 8] {
        match self {
            SubmitVariant::Ts => SUBMIT_TS_DISCRIMINATOR,
            SubmitVariant::Rs => SUBMIT_RS_DISCRIMINATOR,
        }
    }

    pub fn instruction_name(self) -> &'static str {
        match self {
            SubmitVariant::Ts => "submit_ts",
            SubmitVariant::Rs => "submit_rs",
        }
    }
}

/// `initialize(github: String)`: creates the user's enrollment account.
pub fn initialize(
    programs: &ProgramIds,
    user: &Pubkey,
    account: &Pubkey,
    github: &str,
) -> Result<Instruction> {
    let mut data = Vec::with_capacity(8 + 4 + github.len());
    data.extend_from_slice(&INITIALIZE_DISCRIMINATOR);
    // borsh String: u32 LE length then UTF-8 bytes
    data.extend_from_slice(&borsh_length_prefix(github.len())?);
    data.extend_from_slice(github.as_bytes());

    Ok(Instruction {
        program_id: programs.prereq_program,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new(*account, false),
            AccountMeta::new_readonly(programs.system_program, false),
        ],
        data,
    })
}

fn borsh_length_prefix(len: usize) -> Result<[u8; 4]> {
    u32::try_from(len)
        .map(u32::to_le_bytes)
        .map_err(|_| {
            PrereqError::Serialization(format!("string of {len} bytes exceeds u32 length"))
        })
}

/// `submit_ts` / `submit_rs`: mints the enrollment asset into the collection.
///
/// `mint` is a fresh keypair's address and must sign the transaction.
pub fn submit(
    programs: &ProgramIds,
    variant: SubmitVariant,
    user: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    authority: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: programs.prereq_program,
        accounts: vec![
            AccountMeta::new(*user, true),
            AccountMeta::new(*account, false),
            AccountMeta::new(*mint, true),
            AccountMeta::new(programs.collection, false),
            AccountMeta::new_readonly(*authority, false),
            AccountMeta::new_readonly(programs.mpl_core_program, false),
            AccountMeta::new_readonly(programs.system_program, false),
        ],
        data: variant.discriminator().to_vec(),
    }
}

/// System program lamport transfer.
pub fn transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    system_instruction::transfer(from, to, lamports)
}

//! Program-derived addresses used by the prereq program.

use solana_sdk::pubkey::Pubkey;

/// Seed prefix of a user's enrollment account.
pub const ENROLLMENT_SEED: &[u8] = b"prereqs";

/// Seed prefix of the PDA that holds update authority over the collection.
pub const COLLECTION_AUTHORITY_SEED: &[u8] = b"collection";

/// Enrollment account for `user`: seeds `["prereqs", user]`.
pub fn enrollment_account(user: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ENROLLMENT_SEED, user.as_ref()], program_id)
}

/// Collection authority: seeds `["collection", collection]`.
pub fn collection_authority(collection: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[COLLECTION_AUTHORITY_SEED, collection.as_ref()], program_id)
}

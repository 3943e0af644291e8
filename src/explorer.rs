//! Solana Explorer links for submitted transactions.

use solana_sdk::signature::Signature;

use crate::config::Cluster;

const EXPLORER_TX_URL: &str = "https://explorer.solana.com/tx";

pub fn transaction_url(signature: &Signature, cluster: Cluster) -> String {
    match cluster {
        Cluster::MainnetBeta => format!("{EXPLORER_TX_URL}/{signature}"),
        Cluster::Localnet => format!(
            "{EXPLORER_TX_URL}/{signature}?cluster=custom&customUrl=http%3A%2F%2Flocalhost%3A8899"
        ),
        other => format!("{EXPLORER_TX_URL}/{signature}?cluster={other}"),
    }
}

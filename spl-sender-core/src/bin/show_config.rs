use spl_sender_core::{KeypairSource, Network, SenderConfig};

fn main() {
    let config = match SenderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!("SPL Sender Configuration:\n");
    println!("  Network: {} ({})", config.network, config.network.label());
    for network in Network::ALL {
        println!("  {} RPC URL: {}", network, config.endpoint(network).url);
    }
    println!("  Selected RPC URL: {}", config.endpoint(config.network).url);
    println!(
        "  Keypair: {}",
        match &config.keypair {
            Some(KeypairSource::File(path)) => path.display().to_string(),
            Some(KeypairSource::Base58(_)) => "(base58 secret)".to_string(),
            None => "(not set)".to_string(),
        }
    );
    println!("  Auto-connect: {}", config.auto_connect);
    println!("  Commitment: {}", config.commitment.as_str());
    println!("  Notification capacity: {}", config.notification_capacity);
    println!("  RPC timeout: {}s", config.rpc_timeout.as_secs());
    println!("  Confirmation poll interval: {}ms", config.confirm_poll_interval.as_millis());
}

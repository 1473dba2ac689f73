use anyhow::Context;
use spl_sender_core::shared::constants::NATIVE_SYMBOL;
use spl_sender_core::{init_sender_core, token_list, Network, SenderCore, Severity, SubmitOutcome, TransferForm};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  network <main|dev|test>   switch network
  connect | disconnect      wallet connection
  token <n>                 select token by position
  amount <value>            set amount
  to <address>              set recipient
  send                      submit the transfer
  balance                   refresh balance
  dismiss <n>               dismiss a notification
  clear                     dismiss all notifications
  help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    spl_sender_core::init();
    let core = init_sender_core().await.context("Failed to start sender")?;
    let mut form = TransferForm::new();

    println!("{} v{}\n{}\n", spl_sender_core::NAME, spl_sender_core::VERSION, HELP);
    render(&core, &form).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "network" => match Network::from_str(arg) {
                Ok(network) => {
                    if let Err(e) = core.select_network(network).await {
                        println!("{}", e);
                    }
                }
                Err(e) => println!("{}", e),
            },
            "connect" => {
                core.connect_wallet().await;
            }
            "disconnect" => core.disconnect_wallet().await,
            "token" => match arg.parse::<usize>() {
                Ok(index) => {
                    if let Err(e) = form.select_token(index) {
                        println!("{}", e);
                    }
                }
                Err(_) => println!("Usage: token <n>"),
            },
            "amount" => form.set_amount(arg),
            "to" => form.set_recipient(arg),
            "send" => {
                if core.can_submit(&form) {
                    if let SubmitOutcome::Confirmed(signature) = core.send(&form).await {
                        println!("{}", core.explorer_url(&signature.to_string()));
                    }
                } else {
                    println!("Send is disabled: connect a wallet first");
                }
            }
            "balance" => {
                core.refresh_balance().await;
            }
            "dismiss" => {
                let notifications = core.notifications.list().await;
                match arg.parse::<usize>().ok().and_then(|n| notifications.get(n)) {
                    Some(notification) => {
                        core.notifications.dismiss(notification.id).await;
                    }
                    None => println!("Usage: dismiss <n>"),
                }
            }
            "clear" => core.notifications.clear().await,
            other => println!("Unknown command '{}', try 'help'", other),
        }

        render(&core, &form).await;
    }

    core.shutdown().await;
    Ok(())
}

async fn render(core: &SenderCore, form: &TransferForm) {
    println!("Network: {}", core.network().label());
    match core.identity() {
        Some(identity) => {
            let balance = core
                .balances
                .get()
                .await
                .map(|record| format!("{} {}", record.sol(), NATIVE_SYMBOL))
                .unwrap_or_else(|| "-".to_string());
            println!("Wallet:  {} ({})", identity, balance);
            println!("         {}", core.network().explorer_address_url(&identity));
        }
        None => println!("Wallet:  not connected"),
    }

    let selected = form.token();
    for (index, token) in token_list().iter().enumerate() {
        let marker = if token == selected { '*' } else { ' ' };
        let kind = if token.is_native() { "native" } else { token.address };
        println!("  {} [{}] {} ({})", marker, index, token.symbol, kind);
    }
    println!("Amount:    {}", form.amount);
    println!("Recipient: {}", form.recipient);

    let notifications = core.notifications.list().await;
    for (index, notification) in notifications.iter().enumerate() {
        let tag = match notification.severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        print!("  ({}) [{}] {}", index, tag, notification.message);
        if let Some(description) = &notification.description {
            print!(" {}", description);
        }
        if let Some(txid) = &notification.txid {
            print!(" {}", core.explorer_url(txid));
        }
        println!();
    }
}

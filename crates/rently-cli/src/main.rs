use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rently::prelude::*;
use rently::{ENV_AUTH_URL, ENV_TOKEN_FILE};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rently", version, about = "Rently - apartment rental marketplace client", long_about = None)]
struct Cli {
    /// Identity service endpoint
    #[arg(long, global = true, env = ENV_AUTH_URL)]
    endpoint: Option<String>,

    /// File holding the session token
    #[arg(long, global = true, env = ENV_TOKEN_FILE)]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Sign in through a social identity provider
    Social {
        #[arg(long)]
        provider_id: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        avatar_url: Option<String>,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show who is signed in
    Whoami,
    /// Search the catalog
    Listings {
        /// Match against title or district
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 0)]
        min_price: u32,
        #[arg(long, default_value_t = rently::catalog::DEFAULT_MAX_PRICE)]
        max_price: u32,
        /// Number of rooms, or "all"
        #[arg(long, default_value = "all")]
        rooms: Choice<u8>,
        /// Exact district name, or "all"
        #[arg(long, default_value = "all")]
        district: Choice<String>,
        /// daily, long-term or "all"
        #[arg(long, default_value = "all")]
        rental_type: Choice<RentalType>,
    },
    /// Open the chat with a listing's owner
    Contact {
        #[arg(long)]
        listing: u64,
    },
    /// Show a listing owner's phone number
    Phone {
        #[arg(long)]
        listing: u64,
    },
    /// Review pending listings (moderators only)
    Moderate {
        #[arg(long)]
        approve: Option<u64>,
        #[arg(long)]
        reject: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(path) = &cli.token_file {
        config = config.with_token_file(path.clone());
    }
    config
}

async fn run(cli: Cli) -> Result<(), RentlyError> {
    let mut client = HttpRentlyClient::connect(&config(&cli))?;

    match cli.command {
        Command::Login { email, password } => {
            let user = client.login(&email, &password).await?;
            println!("signed in as {} <{}>", user.name, user.email);
        }
        Command::Register {
            email,
            password,
            name,
        } => {
            let user = client.register(&email, &password, &name).await?;
            println!("registered and signed in as {} <{}>", user.name, user.email);
        }
        Command::Social {
            provider_id,
            email,
            name,
            avatar_url,
        } => {
            let user = client
                .login_with_social_provider(&provider_id, &email, &name, avatar_url.as_deref())
                .await?;
            println!("signed in as {} <{}>", user.name, user.email);
        }
        Command::Logout => {
            client.logout();
            println!("signed out");
        }
        Command::Whoami => {
            let session = client.initialize().await;
            match session.user() {
                Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
                None => println!("{}", session.status()),
            }
        }
        Command::Listings {
            search,
            min_price,
            max_price,
            rooms,
            district,
            rental_type,
        } => {
            let filter = ListingFilter {
                search,
                min_price,
                max_price,
                rooms,
                district,
                rental_type,
            };
            print_listings(client.listings(&filter));
        }
        Command::Contact { listing } => {
            client.initialize().await;
            match client.contact_owner(ListingId(listing))? {
                Gate::Allowed(chat_id) => print_chat(&client, chat_id),
                Gate::RedirectedToLogin => print_redirect(&client),
            }
        }
        Command::Phone { listing } => {
            client.initialize().await;
            match client.reveal_phone(ListingId(listing))? {
                Gate::Allowed(phone) => println!("{phone}"),
                Gate::RedirectedToLogin => print_redirect(&client),
            }
        }
        Command::Moderate { approve, reject } => {
            client.initialize().await;
            let mut desk = client.moderation()?;
            if let Some(id) = approve {
                desk.approve(ListingId(id))?;
                println!("approved {}", ListingId(id));
            }
            if let Some(id) = reject {
                desk.reject(ListingId(id))?;
                println!("rejected {}", ListingId(id));
            }
            let counts = desk.counts();
            println!(
                "pending {} / approved {} / rejected {}",
                counts.pending, counts.approved, counts.rejected
            );
            for listing in desk.pending() {
                println!("  {} {} ({})", listing.id, listing.title, listing.owner_name);
            }
        }
    }

    Ok(())
}

fn print_listings<'a>(listings: impl Iterator<Item = &'a Listing>) {
    let mut count = 0;
    for listing in listings {
        count += 1;
        let badge = if listing.verified { " [verified]" } else { "" };
        println!(
            "{}  {}{}\n      {} rooms, {} m2, {} - {} {}",
            listing.id,
            listing.title,
            badge,
            listing.rooms,
            listing.area,
            listing.location,
            listing.price,
            listing.rental_type.price_unit(),
        );
    }
    println!("{count} listing(s)");
}

fn print_chat<I, S>(client: &RentlyClient<I, S>, chat_id: ChatId)
where
    I: rently::session::IdentityService,
    S: rently::session::TokenStore,
{
    let Some(chat) = client.conversations().chat(chat_id) else {
        return;
    };
    println!("chat {} with {} about {}", chat.id, chat.participant_name, chat.listing_title);
    for message in client.conversations().messages(chat_id) {
        let who = if message.is_own { "me" } else { chat.participant_name.as_str() };
        println!("  [{}] {}: {}", message.time, who, message.text);
    }
}

fn print_redirect<I, S>(client: &RentlyClient<I, S>)
where
    I: rently::session::IdentityService,
    S: rently::session::TokenStore,
{
    println!(
        "sign in required (now on the {} screen); run `rently login` and try again",
        client.current_view()
    );
}

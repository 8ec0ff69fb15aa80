use anyhow::Result;
use clap::{Parser, Subcommand};
use shared::{AssetType, RequestKind, RequestStatus, Role};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod http;
mod nav;
mod query;
mod session;
mod term;
mod tui;
mod upload;
mod validate;
mod views;

use http::{ApiClient, SecureClient};
use session::Session;
use views::Ctx;

// Default API origin
const DEFAULT_SERVER: &str = "https://asseet-vers-server.vercel.app";

#[derive(Parser)]
#[command(name = "assetverse")]
#[command(about = "AssetVerse client - manage company assets, requests and teams from the terminal")]
#[command(version)]
struct Cli {
    /// API origin (overrides config)
    #[arg(long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out and clear the session
    Logout,
    /// Show the current login status
    Whoami,
    /// Create an account
    Register {
        #[command(subcommand)]
        kind: RegisterCommands,
    },
    /// Show or update the profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Manage the company's asset inventory (HR)
    Assets {
        #[command(subcommand)]
        action: AssetCommands,
    },
    /// Review and file asset requests
    Requests {
        #[command(subcommand)]
        action: RequestCommands,
    },
    /// Assets assigned to you (employee)
    #[command(name = "my-assets")]
    MyAssets {
        #[command(subcommand)]
        action: MyAssetCommands,
    },
    /// Your companies and colleagues (employee)
    Team {
        #[command(subcommand)]
        action: TeamCommands,
    },
    /// Your team members (HR)
    Employees {
        #[command(subcommand)]
        action: EmployeeCommands,
    },
    /// List subscription packages
    Packages,
    /// Purchase or upgrade a package
    Subscribe {
        #[command(subcommand)]
        action: SubscribeCommands,
    },
    /// HR dashboard summary
    Stats,
    /// Upload an image to the hosting service, printing its URL
    UploadImage {
        /// Path of the image file
        file: std::path::PathBuf,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum RegisterCommands {
    /// Register as an HR manager with a company
    Hr {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        date_of_birth: String,
        #[arg(long)]
        company_name: String,
        /// Hosted logo URL (see upload-image)
        #[arg(long)]
        company_logo: String,
    },
    /// Register as an employee
    Employee {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        date_of_birth: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the current profile
    Show,
    /// Update profile fields; unset fields are left untouched
    Update {
        #[arg(long)]
        name: Option<String>,
        /// Hosted photo URL
        #[arg(long)]
        photo: Option<String>,
        /// Hosted company logo URL (HR)
        #[arg(long)]
        company_logo: Option<String>,
    },
}

#[derive(Subcommand)]
enum AssetCommands {
    /// List the inventory
    List {
        #[arg(long)]
        search: Option<String>,
        /// Filter by type (Returnable / Non-returnable)
        #[arg(long, value_name = "TYPE")]
        r#type: Option<AssetType>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = query::DEFAULT_PAGE_SIZE)]
        limit: u32,
    },
    /// Add a new asset
    Add {
        #[arg(long)]
        name: String,
        /// Hosted image URL (see upload-image)
        #[arg(long)]
        image: String,
        #[arg(long, value_name = "TYPE")]
        r#type: AssetType,
        #[arg(long)]
        quantity: u32,
    },
    /// Delete an asset
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Browse assets interactively (live search, request from the list)
    Browse,
}

#[derive(Subcommand)]
enum RequestCommands {
    /// All requests for your company (HR)
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Your own requests (employee)
    Mine {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// File a request for an asset
    Add {
        /// Asset id
        #[arg(long)]
        asset: String,
        /// Request kind (Request / Return / Repair)
        #[arg(long, default_value = "Request")]
        kind: RequestKind,
        /// Reason shown to the HR manager
        #[arg(long)]
        note: Option<String>,
    },
    /// Approve a pending request (HR)
    Approve {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Reject a pending request (HR)
    Reject {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum MyAssetCommands {
    /// List assets assigned to you
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_name = "TYPE")]
        r#type: Option<AssetType>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// File a return request for an assigned asset
    Return {
        /// Assigned asset id
        id: String,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TeamCommands {
    /// List your companies, or one company's members with --company
    List {
        /// HR id of the company to inspect
        #[arg(long)]
        company: Option<String>,
    },
}

#[derive(Subcommand)]
enum EmployeeCommands {
    /// List your team
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Remove an employee from your team
    Remove {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SubscribeCommands {
    /// Start a hosted checkout for a package
    Checkout {
        #[arg(long)]
        package: String,
    },
    /// Finalize a completed checkout with the redirect's session id
    Finalize {
        #[arg(long)]
        session_id: String,
    },
    /// Forward a confirmed payment-element intent
    Confirm {
        #[arg(long)]
        payment_intent: String,
        #[arg(long)]
        package: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key (server, upload.endpoint, upload.api_key)
        key: String,
        value: String,
    },
    /// Get a configuration value
    Get { key: String },
    /// Show all configuration
    Show,
    /// Get the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assetverse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // config-only commands need no client or session
    let command = match cli.command {
        Commands::Config { action } => return handle_config_command(action),
        other => other,
    };

    let config = config::Config::load().unwrap_or_default();
    let server = cli
        .server
        .or_else(|| config.remote.server.clone())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    let api = ApiClient::new(&server)?;
    let session = Session::new(api.clone());
    let secure = SecureClient::new(api.clone(), session.handle());
    let ctx = Ctx {
        api,
        secure,
        session,
        config,
    };

    // the identity check runs once at startup; every role gate below waits
    // for it, so nothing redirects to login before the answer is in
    ctx.session.check_user().await;

    match command {
        Commands::Login { email, password } => views::auth::login(&ctx, email, password).await,
        Commands::Logout => views::auth::logout(&ctx).await,
        Commands::Whoami => views::auth::whoami(&ctx).await,
        Commands::Register { kind } => match kind {
            RegisterCommands::Hr {
                name,
                email,
                password,
                date_of_birth,
                company_name,
                company_logo,
            } => {
                views::auth::register(
                    &ctx,
                    Role::Hr,
                    views::auth::RegisterArgs {
                        name,
                        email,
                        password,
                        date_of_birth,
                        company_name: Some(company_name),
                        company_logo: Some(company_logo),
                    },
                )
                .await
            }
            RegisterCommands::Employee {
                name,
                email,
                password,
                date_of_birth,
            } => {
                views::auth::register(
                    &ctx,
                    Role::Employee,
                    views::auth::RegisterArgs {
                        name,
                        email,
                        password,
                        date_of_birth,
                        company_name: None,
                        company_logo: None,
                    },
                )
                .await
            }
        },
        Commands::Profile { action } => match action {
            ProfileCommands::Show => views::auth::profile_show(&ctx).await,
            ProfileCommands::Update {
                name,
                photo,
                company_logo,
            } => views::auth::profile_update(&ctx, name, photo, company_logo).await,
        },
        Commands::Assets { action } => match action {
            AssetCommands::List {
                search,
                r#type,
                sort,
                page,
                limit,
            } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::assets::list(
                    &ctx,
                    views::assets::ListArgs {
                        search,
                        kind: r#type,
                        sort,
                        page,
                        limit,
                    },
                )
                .await
            }
            AssetCommands::Add {
                name,
                image,
                r#type,
                quantity,
            } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::assets::add(&ctx, name, image, r#type, quantity).await
            }
            AssetCommands::Delete { id, yes } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::assets::delete(&ctx, id, yes).await
            }
            AssetCommands::Browse => tui::browse_assets(&ctx).await,
        },
        Commands::Requests { action } => match action {
            RequestCommands::List { search, page } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::requests::list(&ctx, search, page).await
            }
            RequestCommands::Mine { page } => {
                if require_role(&ctx, Role::Employee).is_none() {
                    return Ok(());
                }
                views::requests::mine(&ctx, page).await
            }
            RequestCommands::Add { asset, kind, note } => {
                if require_role(&ctx, Role::Employee).is_none() {
                    return Ok(());
                }
                views::requests::add(&ctx, asset, kind, note).await
            }
            RequestCommands::Approve { id, yes } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::requests::decide(&ctx, id, RequestStatus::Approved, yes).await
            }
            RequestCommands::Reject { id, yes } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::requests::decide(&ctx, id, RequestStatus::Rejected, yes).await
            }
        },
        Commands::MyAssets { action } => match action {
            MyAssetCommands::List {
                search,
                r#type,
                page,
            } => {
                if require_role(&ctx, Role::Employee).is_none() {
                    return Ok(());
                }
                views::my_assets::list(&ctx, search, r#type, page).await
            }
            MyAssetCommands::Return { id, note, yes } => {
                if require_role(&ctx, Role::Employee).is_none() {
                    return Ok(());
                }
                views::my_assets::return_asset(&ctx, id, note, yes).await
            }
        },
        Commands::Team { action } => match action {
            TeamCommands::List { company } => {
                if require_role(&ctx, Role::Employee).is_none() {
                    return Ok(());
                }
                views::team::team_list(&ctx, company).await
            }
        },
        Commands::Employees { action } => match action {
            EmployeeCommands::List { page } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::team::employees_list(&ctx, page).await
            }
            EmployeeCommands::Remove { id, yes } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::team::employees_remove(&ctx, id, yes).await
            }
        },
        Commands::Packages => views::subscription::packages(&ctx).await,
        Commands::Subscribe { action } => match action {
            SubscribeCommands::Checkout { package } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::subscription::checkout(&ctx, package).await
            }
            SubscribeCommands::Finalize { session_id } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::subscription::finalize(&ctx, session_id).await
            }
            SubscribeCommands::Confirm {
                payment_intent,
                package,
            } => {
                if require_role(&ctx, Role::Hr).is_none() {
                    return Ok(());
                }
                views::subscription::confirm_intent(&ctx, payment_intent, package).await
            }
        },
        Commands::Stats => {
            if require_role(&ctx, Role::Hr).is_none() {
                return Ok(());
            }
            views::dashboard::stats(&ctx).await
        }
        Commands::UploadImage { file } => {
            match upload::upload_image(ctx.api.raw(), &ctx.config.upload, &file).await {
                Ok(url) => {
                    term::success("Image uploaded");
                    println!("{url}");
                    Ok(())
                }
                Err(err) => {
                    term::failure(&err.to_string());
                    Ok(())
                }
            }
        }
        Commands::Config { .. } => unreachable!("handled before client setup"),
    }
}

/// Gate a role-specific command. Prints the menu for who the user actually
/// is instead of failing with a server error later.
fn require_role(ctx: &Ctx, role: Role) -> Option<shared::User> {
    match ctx.session.current_user() {
        Some(user) if user.role == role => Some(user),
        Some(user) => {
            term::warn(&format!(
                "This command is for {} accounts; you are logged in as {}.",
                role, user.role
            ));
            term::notice("Available to you:");
            for item in nav::menu_for(Some(&user)) {
                println!("  {:<20} assetverse {}", item.label, item.command);
            }
            None
        }
        None => {
            term::warn("Not logged in.");
            term::notice("Available commands:");
            for item in nav::menu_for(None) {
                println!("  {:<20} assetverse {}", item.label, item.command);
            }
            None
        }
    }
}

fn handle_config_command(action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Set { key, value } => {
            let mut config = config::Config::load().unwrap_or_default();
            match key.as_str() {
                "server" => config.remote.server = Some(value),
                "upload.endpoint" => config.upload.endpoint = value,
                "upload.api_key" => config.upload.api_key = Some(value),
                _ => anyhow::bail!(
                    "Unknown config key: {}. Valid keys: server, upload.endpoint, upload.api_key",
                    key
                ),
            }
            config.save()?;
            println!("Configuration saved");
        }
        ConfigCommands::Get { key } => {
            let config = config::Config::load()?;
            let value = match key.as_str() {
                "server" => config.remote.server.unwrap_or_default(),
                "upload.endpoint" => config.upload.endpoint,
                "upload.api_key" => config
                    .upload
                    .api_key
                    .map(|_| "****")
                    .unwrap_or_default()
                    .to_string(),
                _ => anyhow::bail!("Unknown config key: {}", key),
            };
            println!("{}", value);
        }
        ConfigCommands::Show => {
            let config = config::Config::load()?;
            println!("server: {}", config.remote.server.unwrap_or_default());
            println!("upload.endpoint: {}", config.upload.endpoint);
            println!(
                "upload.api_key: {}",
                config.upload.api_key.map(|_| "****").unwrap_or_default()
            );
        }
        ConfigCommands::Path => {
            let path = config::Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

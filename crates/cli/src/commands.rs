//! Console commands

use anyhow::{Context as _, Result, bail};
use clap::Subcommand;
use sentinel_core::{FileTokenStore, Role};
use sentinel_http::SentinelClient;
use sentinel_http::types::{
    AlertFilters, AlertReview, AlertStatus, NewFraudRule, ReviewVerdict, RuleFilters, RulePatch,
    SystemConfigUpdate,
};
use sentinel_session::SessionStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ConsoleConfig;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the default console configuration file
    Init,

    /// Log in and store a session
    Login {
        username: String,
        password: String,
    },

    /// Show the current operator
    Whoami,

    /// Log out and clear stored tokens
    Logout,

    /// Inspect and review fraud alerts
    Alerts {
        #[command(subcommand)]
        command: AlertCommands,
    },

    /// Manage detection rules (admin only)
    Rules {
        #[command(subcommand)]
        command: RuleCommands,
    },

    /// Platform configuration (admin only)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Look up a customer profile on the core-banking side
    Customer { customer_id: String },

    /// Probe fraud API health
    Health,
}

#[derive(Subcommand)]
pub enum AlertCommands {
    /// List alerts
    List {
        /// Filter by review status (pending|confirmed|dismissed|escalated)
        #[arg(long)]
        status: Option<String>,

        /// Filter by customer id
        #[arg(long)]
        customer: Option<String>,

        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Page size
        #[arg(long, default_value = "20")]
        size: u32,
    },

    /// Show one alert as JSON
    Show { id: String },

    /// Record a review verdict (admin/analyst)
    Review {
        id: String,

        /// confirmed|dismissed|escalated
        verdict: String,

        /// Free-form review notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Aggregate counts and average score
    Stats,

    /// Daily alert volume
    Volume {
        /// Trailing window in days
        #[arg(long, default_value = "7")]
        days: u32,
    },
}

#[derive(Subcommand)]
pub enum RuleCommands {
    /// List rules
    List {
        /// Filter by enabled state
        #[arg(long)]
        enabled: Option<bool>,

        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one rule as JSON
    Show { code: String },

    /// Create a rule from a JSON file
    Create { file: PathBuf },

    /// Update a rule from a JSON patch file
    Update { code: String, file: PathBuf },

    /// Flip a rule between enabled and disabled
    Toggle { code: String },

    /// Delete a rule
    Delete { code: String },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the platform configuration
    Show,

    /// Update platform configuration fields
    Set {
        /// Risk score above which alerts auto-escalate
        #[arg(long)]
        escalation_threshold: Option<f64>,

        /// How long alert data is retained, in days
        #[arg(long)]
        retention_days: Option<u32>,
    },
}

/// A connected console: client set plus session over shared token storage
struct Console {
    client: SentinelClient,
    session: SessionStore,
}

fn connect(data_dir: &Path) -> Result<Console> {
    let config = ConsoleConfig::load_or_default(data_dir)?;
    let store = Arc::new(FileTokenStore::open(data_dir)?);
    let client = SentinelClient::builder()
        .api_url(&config.api_url)
        .auth_url(&config.auth_url)
        .timeout(Duration::from_secs(10))
        .token_store(store)
        .on_session_expired(Arc::new(|| {
            eprintln!("Session expired. Run `sentinel login` to sign in again.");
        }))
        .build()?;
    let session = SessionStore::from_client(&client);
    Ok(Console { client, session })
}

impl Console {
    /// Restore the stored session and check the operator's role
    async fn require_role(&self, roles: &[Role]) -> Result<()> {
        self.session.rehydrate().await;
        if !self.session.is_authenticated() {
            bail!("not logged in; run `sentinel login <username> <password>` first");
        }
        if !self.session.has_role(roles) {
            let allowed = roles
                .iter()
                .map(|role| role.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            bail!("this action requires role: {allowed}");
        }
        Ok(())
    }
}

impl Commands {
    pub async fn execute(self, data_dir: Option<PathBuf>) -> Result<()> {
        let data_dir = data_dir.unwrap_or_else(FileTokenStore::default_dir);

        match self {
            Self::Init => {
                let config = ConsoleConfig::default();
                config.save(&data_dir)?;
                println!("Wrote {}", ConsoleConfig::path(&data_dir).display());
                Ok(())
            }
            Self::Login { username, password } => {
                let console = connect(&data_dir)?;
                console.session.login(&username, &password).await?;
                let user = console.session.user().expect("login succeeded");
                println!("Logged in as {} ({})", user.username, user.role);
                Ok(())
            }
            Self::Whoami => {
                let console = connect(&data_dir)?;
                console.session.rehydrate().await;
                match console.session.user() {
                    Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
                    None => println!("Not logged in."),
                }
                Ok(())
            }
            Self::Logout => {
                let console = connect(&data_dir)?;
                console.session.logout();
                println!("Logged out.");
                Ok(())
            }
            Self::Alerts { command } => command.execute(&connect(&data_dir)?).await,
            Self::Rules { command } => command.execute(&connect(&data_dir)?).await,
            Self::Config { command } => command.execute(&connect(&data_dir)?).await,
            Self::Customer { customer_id } => {
                let console = connect(&data_dir)?;
                console
                    .require_role(&[Role::Admin, Role::Analyst, Role::Viewer])
                    .await?;
                let summary = console.client.banking().customer_summary(&customer_id).await?;
                println!("{}", serde_json::to_string_pretty(&summary)?);
                Ok(())
            }
            Self::Health => {
                let console = connect(&data_dir)?;
                let health = console.client.api().health().await?;
                println!("{} {} ({})", health.service, health.status, health.version);
                Ok(())
            }
        }
    }
}

impl AlertCommands {
    async fn execute(self, console: &Console) -> Result<()> {
        match self {
            Self::List {
                status,
                customer,
                page,
                size,
            } => {
                console
                    .require_role(&[Role::Admin, Role::Analyst, Role::Viewer])
                    .await?;
                let filters = AlertFilters {
                    status: status.as_deref().map(parse_status).transpose()?,
                    customer_id: customer,
                    page: Some(page),
                    size: Some(size),
                    ..AlertFilters::default()
                };
                let alerts = console.client.api().list_alerts(&filters).await?;
                for alert in &alerts.items {
                    println!(
                        "{}  score={:>5.1}  {:<10}  customer={}",
                        alert.id,
                        alert.risk_score,
                        format!("{:?}", alert.status).to_lowercase(),
                        alert.customer_id
                    );
                }
                println!(
                    "page {}/{} ({} total)",
                    alerts.page, alerts.pages, alerts.total
                );
                Ok(())
            }
            Self::Show { id } => {
                console
                    .require_role(&[Role::Admin, Role::Analyst, Role::Viewer])
                    .await?;
                let alert = console.client.api().get_alert(&id).await?;
                println!("{}", serde_json::to_string_pretty(&alert)?);
                Ok(())
            }
            Self::Review { id, verdict, notes } => {
                console.require_role(&[Role::Admin, Role::Analyst]).await?;
                let review = AlertReview {
                    status: parse_verdict(&verdict)?,
                    notes,
                };
                let alert = console.client.api().review_alert(&id, &review).await?;
                println!(
                    "Alert {} is now {}",
                    alert.id,
                    format!("{:?}", alert.status).to_lowercase()
                );
                Ok(())
            }
            Self::Stats => {
                console
                    .require_role(&[Role::Admin, Role::Analyst, Role::Viewer])
                    .await?;
                let stats = console.client.api().alert_stats().await?;
                println!("{}", serde_json::to_string_pretty(&stats)?);
                Ok(())
            }
            Self::Volume { days } => {
                console
                    .require_role(&[Role::Admin, Role::Analyst, Role::Viewer])
                    .await?;
                let volume = console.client.api().daily_volume(days).await?;
                for day in &volume {
                    println!("{}  {}", day.date, day.alerts);
                }
                Ok(())
            }
        }
    }
}

impl RuleCommands {
    async fn execute(self, console: &Console) -> Result<()> {
        console.require_role(&[Role::Admin]).await?;

        match self {
            Self::List { enabled, category } => {
                let filters = RuleFilters {
                    enabled,
                    category,
                    ..RuleFilters::default()
                };
                let rules = console.client.api().list_rules(&filters).await?;
                for rule in &rules.items {
                    println!(
                        "{:<12}  {:<8}  score={:>5.1}  {}",
                        rule.code,
                        if rule.enabled { "enabled" } else { "disabled" },
                        rule.score,
                        rule.name
                    );
                }
                Ok(())
            }
            Self::Show { code } => {
                let rule = console.client.api().get_rule(&code).await?;
                println!("{}", serde_json::to_string_pretty(&rule)?);
                Ok(())
            }
            Self::Create { file } => {
                let rule: NewFraudRule = read_json(&file)?;
                let created = console.client.api().create_rule(&rule).await?;
                println!("Created rule {}", created.code);
                Ok(())
            }
            Self::Update { code, file } => {
                let patch: RulePatch = read_json(&file)?;
                let updated = console.client.api().update_rule(&code, &patch).await?;
                println!("Updated rule {}", updated.code);
                Ok(())
            }
            Self::Toggle { code } => {
                let rule = console.client.api().toggle_rule(&code).await?;
                println!(
                    "Rule {} is now {}",
                    rule.code,
                    if rule.enabled { "enabled" } else { "disabled" }
                );
                Ok(())
            }
            Self::Delete { code } => {
                console.client.api().delete_rule(&code).await?;
                println!("Deleted rule {code}");
                Ok(())
            }
        }
    }
}

impl ConfigCommands {
    async fn execute(self, console: &Console) -> Result<()> {
        console.require_role(&[Role::Admin]).await?;

        match self {
            Self::Show => {
                let config = console.client.api().get_config().await?;
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            Self::Set {
                escalation_threshold,
                retention_days,
            } => {
                if escalation_threshold.is_none() && retention_days.is_none() {
                    bail!("nothing to update; pass --escalation-threshold or --retention-days");
                }
                let update = SystemConfigUpdate {
                    auto_escalation_threshold: escalation_threshold,
                    data_retention_days: retention_days,
                };
                let config = console.client.api().update_config(&update).await?;
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
        }
    }
}

fn parse_status(value: &str) -> Result<AlertStatus> {
    match value {
        "pending" => Ok(AlertStatus::Pending),
        "confirmed" => Ok(AlertStatus::Confirmed),
        "dismissed" => Ok(AlertStatus::Dismissed),
        "escalated" => Ok(AlertStatus::Escalated),
        other => bail!("unknown status {other:?} (expected pending|confirmed|dismissed|escalated)"),
    }
}

fn parse_verdict(value: &str) -> Result<ReviewVerdict> {
    match value {
        "confirmed" => Ok(ReviewVerdict::Confirmed),
        "dismissed" => Ok(ReviewVerdict::Dismissed),
        "escalated" => Ok(ReviewVerdict::Escalated),
        other => bail!("unknown verdict {other:?} (expected confirmed|dismissed|escalated)"),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

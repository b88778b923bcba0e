use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use osm_client::config::ClientConfig;
use osm_client::osm::{
    create_client, BadgeTagCloudParams, OsmApi, PatrolsParams, ProgrammeDetailParams,
    ProgrammeSummaryParams, SectionType,
};

/// Past meetings shown under the upcoming list
const PAST_MEETINGS_SHOWN: usize = 10;

#[derive(Debug, Parser)]
#[command(name = "osm-report", version, about = "Print Online Scout Manager reports")]
struct Cli {
    /// Use canned data instead of calling OSM
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the terms visible to the API user
    Terms,
    /// Show a term's meetings, upcoming first
    Programme {
        #[arg(long, env = "OSM_SECTION_ID", default_value = "1")]
        section: String,
        #[arg(long, env = "OSM_TERM_ID", default_value = "1")]
        term: String,
    },
    /// Show one meeting in detail
    Event {
        eveningid: String,
        #[arg(long, env = "OSM_SECTION_ID", default_value = "1")]
        section: String,
        #[arg(long, env = "OSM_TERM_ID", default_value = "1")]
        term: String,
    },
    /// Show badge coverage for a term
    Badges {
        #[arg(long, env = "OSM_SECTION_ID", default_value = "1")]
        section: String,
        #[arg(long, env = "OSM_TERM_ID", default_value = "1")]
        term: String,
        #[arg(long, default_value = "scouts")]
        section_type: SectionType,
    },
    /// List patrols and their members
    Patrols {
        #[arg(long, env = "OSM_SECTION_ID", default_value = "1")]
        section: String,
        #[arg(long, env = "OSM_TERM_ID", default_value = "1")]
        term: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load()?;
    if cli.offline {
        config.use_mock_data = true;
    }
    tracing::debug!(?config, "Loaded configuration");

    let client = create_client(&config)?;

    match cli.command {
        Command::Terms => print_terms(client.as_ref()).await?,
        Command::Programme { section, term } => {
            print_programme(client.as_ref(), section, term).await?;
        }
        Command::Event {
            eveningid,
            section,
            term,
        } => print_event(client.as_ref(), eveningid, section, term).await?,
        Command::Badges {
            section,
            term,
            section_type,
        } => print_badges(client.as_ref(), section, term, section_type).await?,
        Command::Patrols { section, term } => print_patrols(client.as_ref(), section, term).await?,
    }

    if let Some(info) = client.rate_limit_info().await {
        tracing::debug!(
            limit = %info.limit,
            remaining = %info.remaining,
            reset = %info.reset,
            "Rate limit after run"
        );
    }

    Ok(())
}

async fn print_terms(client: &dyn OsmApi) -> Result<()> {
    let startup = client.get_startup_data().await?;
    let today = Utc::now().date_naive();

    for term in &startup.globals.terms {
        let marker = if term.is_current(today) { "*" } else { " " };
        println!(
            "{marker} {:>4}  {:<20} {} to {}",
            term.termid, term.name, term.startdate, term.enddate
        );
    }
    Ok(())
}

async fn print_programme(client: &dyn OsmApi, sectionid: String, termid: String) -> Result<()> {
    let summary = client
        .get_programme_summary(&ProgrammeSummaryParams { sectionid, termid })
        .await?;
    let today = Utc::now().date_naive();

    let (upcoming, past): (Vec<_>, Vec<_>) = summary
        .sorted_by_date()
        .into_iter()
        .partition(|item| item.meeting_date().map_or(true, |date| date >= today));

    println!("Upcoming");
    if upcoming.is_empty() {
        println!("  No upcoming events scheduled.");
    }
    for item in &upcoming {
        let flag = if item.is_special() { "!" } else { " " };
        println!(
            "{flag} {}  {}-{}  {}",
            item.meetingdate, item.starttime, item.endtime, item.title
        );
    }

    if !past.is_empty() {
        println!("\nPast");
        for item in past.iter().rev().take(PAST_MEETINGS_SHOWN) {
            println!("  {}  {}", item.meetingdate, item.title);
        }
    }
    Ok(())
}

async fn print_event(
    client: &dyn OsmApi,
    eveningid: String,
    sectionid: String,
    termid: String,
) -> Result<()> {
    let summary = client
        .get_programme_summary(&ProgrammeSummaryParams {
            sectionid: sectionid.clone(),
            termid: termid.clone(),
        })
        .await?;
    let Some(event) = summary.find_evening(&eveningid) else {
        bail!("Event {eveningid} not found");
    };

    let detail = client
        .get_programme_detail(&ProgrammeDetailParams {
            sectionid,
            termid,
            eveningid,
        })
        .await?;

    let today = Utc::now().date_naive();
    let past = event.meeting_date().is_some_and(|date| date < today);

    println!("{}{}", event.title, if past { "  (past)" } else { "" });
    println!("{}  {}-{}", event.meetingdate, event.starttime, event.endtime);
    if !event.notesforparents.is_empty() {
        println!("\n{}", event.notesforparents);
    }
    if event.is_special() {
        println!("\nParent helpers: {} attending", event.parentsattendingcount);
    }
    if let Some(badges) = detail.badgelinks.as_object() {
        println!("\nBadge work");
        for badge in badges.keys() {
            println!("  {badge}");
        }
    }
    Ok(())
}

async fn print_badges(
    client: &dyn OsmApi,
    sectionid: String,
    termid: String,
    section: SectionType,
) -> Result<()> {
    let cloud = client
        .get_badge_tag_cloud(&BadgeTagCloudParams {
            sectionid,
            termid,
            section,
        })
        .await?;

    for (label, count) in cloud.coverage() {
        println!("{count:>4}  {label}");
    }
    Ok(())
}

async fn print_patrols(client: &dyn OsmApi, sectionid: String, termid: String) -> Result<()> {
    let response = client
        .get_patrols(&PatrolsParams {
            sectionid,
            termid,
            include_no_patrol: None,
        })
        .await?;

    for patrol in &response.patrols {
        println!("{} ({} points)", patrol.name, patrol.points);
        for member in &patrol.members {
            println!("  {} {}", member.firstname, member.lastname);
        }
    }
    Ok(())
}

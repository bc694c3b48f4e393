//! CLI entrypoint for loodle
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then walks one poll through its whole lifecycle:
//! create, propose slots, vote, tally, tear down.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Cli;
use loodle_application::{
    CreatePollInput, CreatePollUseCase, CreateScheduleInput, CreateScheduleUseCase, NoJournal,
    RemoveScheduleError, RemoveScheduleUseCase, UpdateVotesUseCase, VoteFanout, VoteMutation,
    VoteStore, WorkflowJournal,
};
use loodle_domain::{Answer, Locale, MemberId, Schedule, SlotSupport, best_slots};
use loodle_infrastructure::{ConfigLoader, FileConfig, InMemoryStore, JsonlWorkflowJournal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting loodle");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    let behavior = config
        .behavior()
        .context("invalid votes.default_answer in configuration")?;
    let locale: Locale = cli.locale.parse()?;

    // === Dependency Injection ===
    let store = Arc::new(InMemoryStore::new());
    let journal = build_journal(&cli, &config);

    let create_poll = CreatePollUseCase::new(Arc::clone(&store), Arc::clone(&store))
        .with_journal(Arc::clone(&journal));
    let create_schedule = CreateScheduleUseCase::new(
        Arc::clone(&store),
        VoteFanout::new(Arc::clone(&store)).with_default_answer(behavior.default_answer),
        Arc::clone(&store),
    )
    .with_journal(Arc::clone(&journal));
    let remove_schedule =
        RemoveScheduleUseCase::new(Arc::clone(&store), VoteFanout::new(Arc::clone(&store)))
            .with_journal(Arc::clone(&journal));
    let update_votes =
        UpdateVotesUseCase::new(Arc::clone(&store)).with_journal(Arc::clone(&journal));

    println!();
    println!("+============================================================+");
    println!("|              loodle - schedule lifecycle                   |");
    println!("+============================================================+");

    // Create the poll with its members; every member gets a default
    // notification configuration alongside
    let owner = MemberId::generate();
    let invitees: Vec<MemberId> = (1..cli.members.max(1)).map(|_| MemberId::generate()).collect();
    let poll = create_poll
        .execute(
            CreatePollInput::new("team sync", "find our weekly slot", owner)
                .with_invitees(invitees),
        )
        .await?;
    println!();
    println!("Poll '{}' created with {} members", poll.name, poll.members.len());

    // Propose the slot given on the command line, then a follow-on slot
    // starting where the first one ends
    let slot_a = create_schedule
        .execute(CreateScheduleInput::new(
            poll.id,
            cli.begin.as_str(),
            cli.end.as_str(),
            cli.locale.as_str(),
        ))
        .await?;
    let pattern = locale.timestamp_pattern();
    let next_begin = slot_a.window.end.format(pattern).to_string();
    let next_end = (slot_a.window.end + slot_a.window.duration())
        .format(pattern)
        .to_string();
    let slot_b = create_schedule
        .execute(CreateScheduleInput::new(
            poll.id,
            next_begin,
            next_end,
            cli.locale.as_str(),
        ))
        .await?;

    println!();
    println!("Proposed two slots ({} locale):", locale);
    println!("  A: {}", describe_slot(&slot_a, locale));
    println!("  B: {}", describe_slot(&slot_b, locale));
    println!(
        "Each slot was seeded with {} default votes (answer: {})",
        poll.members.len(),
        behavior.default_answer
    );

    // Everyone backs slot A; slot B keeps its defaults
    let slot_a_votes = store.list_ids_by_schedule(slot_a.id, poll.id).await?;
    let mutations: Vec<VoteMutation> = slot_a_votes
        .iter()
        .map(|&id| VoteMutation::new(id, Answer::Yes))
        .collect();
    let report = update_votes.execute(mutations).await;

    println!();
    println!("Vote updates for slot A:");
    for outcome in &report.outcomes {
        if outcome.is_success() {
            println!("  [ok]     {}", outcome.step);
        } else {
            println!(
                "  [failed] {}: {}",
                outcome.step,
                outcome.error.as_deref().unwrap_or("unknown")
            );
        }
    }

    // Tally both slots and name the winner(s)
    let mut votes = Vec::new();
    for schedule in [&slot_a, &slot_b] {
        for id in store.list_ids_by_schedule(schedule.id, poll.id).await? {
            votes.push(VoteStore::get(store.as_ref(), id).await?);
        }
    }
    let supports = SlotSupport::tally(&votes);

    println!();
    println!("Tally:");
    for support in &supports {
        let marker = if support.schedule_id == slot_a.id { "A" } else { "B" };
        println!(
            "  slot {}: {} yes / {} if-needed / {} no",
            marker, support.yes, support.if_needed, support.no
        );
    }
    let winners = best_slots(&supports);
    println!(
        "Best slot(s): {}",
        winners
            .iter()
            .map(|id| if *id == slot_a.id { "A" } else { "B" })
            .collect::<Vec<_>>()
            .join(", ")
    );

    // Tear slot B down: the schedule row and the vote cleanup run concurrently
    remove_schedule.execute(poll.id, slot_b.id).await?;
    println!();
    println!(
        "Removed slot B: {} vote rows left in store, {} associations left for B",
        store.vote_count(),
        store.association_count(poll.id, slot_b.id)
    );

    // A second removal has nothing left to delete
    if let Err(RemoveScheduleError::NotFound { .. }) =
        remove_schedule.execute(poll.id, slot_b.id).await
    {
        println!("Second removal of slot B reports: not found, nothing else touched");
    }

    println!(
        "Slot A survives with {} votes",
        store.association_count(poll.id, slot_a.id)
    );
    Ok(())
}

/// Picks the journal sink: an explicit `--journal` path wins, then the
/// config file's `[journal]` section, then no journaling at all.
fn build_journal(cli: &Cli, config: &FileConfig) -> Arc<dyn WorkflowJournal> {
    let path = cli.journal.clone().or_else(|| {
        config
            .journal
            .enabled
            .then(|| PathBuf::from(&config.journal.path))
    });

    match path {
        Some(path) => match JsonlWorkflowJournal::new(&path) {
            Some(journal) => {
                info!("Journaling workflow reports to {}", journal.path().display());
                Arc::new(journal)
            }
            None => {
                warn!("Journal disabled: could not open {}", path.display());
                Arc::new(NoJournal)
            }
        },
        None => Arc::new(NoJournal),
    }
}

fn describe_slot(schedule: &Schedule, locale: Locale) -> String {
    let pattern = locale.timestamp_pattern();
    format!(
        "{} .. {} ({})",
        schedule.window.begin.format(pattern),
        schedule.window.end.format(pattern),
        schedule.id
    )
}

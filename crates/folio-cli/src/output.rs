//! Terminal output formatting.

use colored::Colorize;

use folio_graph::{Concept, Member, SyncOutcome, SyncStatus};

/// Print the outcome of a synchronization run.
pub fn print_outcome(outcome: &SyncOutcome) {
    let user = &outcome.user;
    match user.status {
        SyncStatus::Completed => {
            println!(
                "{} user {} from group {}",
                "Synchronized".green().bold(),
                user.uuid.cyan(),
                user.group.cyan()
            );
            if let Some(concepts) = &user.new_concepts_to_follow {
                println!("{} new follows:", concepts.len());
                print_concepts(concepts);
            }
        }
        SyncStatus::Ignored => {
            let reason = user
                .reason
                .map(|r| format!("{:?}", r))
                .unwrap_or_else(|| "unknown".to_string());
            println!(
                "{} user {} ({})",
                "Skipped".yellow().bold(),
                user.uuid.cyan(),
                reason.dimmed()
            );
        }
    }
}

/// Print concepts as a table.
pub fn print_concepts(concepts: &[Concept]) {
    if concepts.is_empty() {
        println!("{}", "No concepts found.".dimmed());
        return;
    }

    println!("{:<38} {}", "UUID", "Label");
    println!("{}", "-".repeat(70));
    for concept in concepts {
        println!(
            "{:<38} {}",
            concept.uuid,
            concept.pref_label.as_deref().unwrap_or("-")
        );
    }
}

/// Print members as a list of uuids.
pub fn print_members(members: &[Member]) {
    if members.is_empty() {
        println!("{}", "No members found.".dimmed());
        return;
    }

    for member in members {
        println!("{}", member.uuid);
    }
}

//! Report rendering.
use std::fmt::Write as _;

use skirmish_core::{CharacterId, EncounterReport, Outcome, Roster, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON replay
    Json,
    /// Indented JSON replay
    Pretty,
    /// Human-readable turn log
    Summary,
}

pub fn render(report: &EncounterReport, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(report)?,
        OutputFormat::Summary => summary(report),
    })
}

pub fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Victory(side) => format!("{} victory", side),
        other => other.to_string(),
    }
}

fn name(roster: &Roster, id: CharacterId) -> String {
    roster
        .get(id)
        .map_or_else(|| id.to_string(), |s| s.name().to_string())
}

fn describe_target(roster: &Roster, target: &Target) -> String {
    match target {
        Target::Myself => "self".to_string(),
        Target::Single(id) => name(roster, *id),
        Target::Pair(a, b) => format!("{} and {}", name(roster, *a), name(roster, *b)),
        Target::Node { node, members } => {
            let names: Vec<String> = members.iter().map(|id| name(roster, *id)).collect();
            format!("{} at {}", names.join(", "), node)
        }
    }
}

fn summary(report: &EncounterReport) -> String {
    let roster = &report.roster;
    let mut out = String::new();

    for round in &report.rounds {
        let order: Vec<String> = round
            .initiative
            .iter()
            .map(|roll| format!("{} ({})", name(roster, roll.character), roll.total()))
            .collect();
        let _ = writeln!(out, "Round {}: {}", round.number, order.join(", "));

        for turn in &round.turns {
            let _ = write!(out, "  {} uses {}", name(roster, turn.actor), turn.action);
            if turn.destination != turn.from {
                let _ = write!(
                    out,
                    ", moves {} -> {} (cost {})",
                    turn.from, turn.destination, turn.movement_cost
                );
            }
            if turn.target != Target::Myself {
                let _ = write!(out, " on {}", describe_target(roster, &turn.target));
            }
            let labels: Vec<&str> = turn.events.iter().map(|e| e.label()).collect();
            let _ = writeln!(out, " [{}]", labels.join(" "));
        }
    }

    let _ = writeln!(out, "Outcome: {}", describe_outcome(&report.outcome));
    for state in roster.iter() {
        let _ = writeln!(out, "  {} {}", state.allegiance, state);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{Allegiance, Character, CharacterClass, NodeId};
    use std::sync::Arc;

    fn report(outcome: Outcome) -> EncounterReport {
        let mut roster = Roster::new();
        roster.push(
            Arc::new(Character::builder("Bram", CharacterClass::Fighter).build()),
            Allegiance::Attacker,
            NodeId(0),
        );
        EncounterReport {
            rounds: Vec::new(),
            outcome,
            roster,
        }
    }

    #[test]
    fn outcome_names_the_winner() {
        assert_eq!(
            describe_outcome(&Outcome::Victory(Allegiance::Defender)),
            "defender victory"
        );
        assert_eq!(describe_outcome(&Outcome::Timeout), "timeout");
    }

    #[test]
    fn summary_lists_final_states() {
        let text = render(&report(Outcome::Draw), OutputFormat::Summary).unwrap();
        assert!(text.starts_with("Outcome: draw"), "{text}");
        assert!(text.contains("attacker Bram (c0)"), "{text}");
    }

    #[test]
    fn json_is_parseable() {
        let text = render(&report(Outcome::Stalemate), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["outcome"], "Stalemate");
    }
}

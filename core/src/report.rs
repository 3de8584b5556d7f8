use std::fmt::Write;

use crate::ledger::ProposalLedger;
use crate::recommender::AssignmentDecision;
use crate::types::WeekKey;
use crate::workload::WorkloadRow;

/// `rows` is the roster table for `week`; totals and the empty-week notice
/// come from the ledger so unrostered analysts still count as due.
pub fn build_report(
    week:     WeekKey,
    ledger:   &ProposalLedger,
    rows:     &[WorkloadRow],
    decision: Option<&AssignmentDecision>,
) -> String {
    let mut output = String::new();
    let total: usize = ledger.counts_for_week(week).values().sum();

    let _ = writeln!(output, "# Pre-Award Workload Report");
    let _ = writeln!(output, "Week of {} ({} proposals due)", week, total);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Proposals per Analyst");

    if ledger.is_week_empty(week) {
        let _ = writeln!(output, "No deadlines found for the selected week.");
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "| Analyst | Proposals | Capacity | Band |");
    let _ = writeln!(output, "|---|---|---|---|");
    for row in rows {
        let capacity = if row.percentage == 100 {
            row.capacity.to_string()
        } else {
            format!("{} ({}%)", row.capacity, row.percentage)
        };
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} |",
            row.analyst, row.count, capacity, row.band
        );
    }

    let busy: Vec<&WorkloadRow> = rows.iter().filter(|r| !r.proposals.is_empty()).collect();
    if !busy.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Proposal Detail");
        for row in busy {
            let _ = writeln!(output, "- {}", row.analyst);
            for proposal in &row.proposals {
                let _ = writeln!(output, "  - {}", proposal);
            }
        }
    }

    let over: Vec<&WorkloadRow> = rows.iter().filter(|r| r.over_capacity()).collect();
    if !over.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Over Capacity");
        for row in over {
            let _ = writeln!(
                output,
                "- {}: {} proposals against a capacity of {}",
                row.analyst, row.count, row.capacity
            );
        }
    }

    if let Some(decision) = decision {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Recommendation for {}", decision.department);
        let _ = writeln!(output, "{}", decision);
    }

    output
}

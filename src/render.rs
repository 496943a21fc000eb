//! Text output for solutions.

use std::io::{self, Write};

use crossterm::style::{style, Stylize};

use crate::puzzle::Ring;
use crate::search::{path_states, SearchOutcome, SearchResult};

/// One ring per line, start first, in the format the checker reads.
pub fn write_solution<W: Write>(out: &mut W, result: &SearchResult) -> io::Result<()> {
    match &result.outcome {
        SearchOutcome::Solved(goal) => {
            writeln!(out, "Solution is")?;
            for ring in path_states(goal) {
                writeln!(out, "{}", ring)?;
            }
        }
        SearchOutcome::NoSolution => writeln!(out, "No solution")?,
        SearchOutcome::BudgetExceeded => writeln!(out, "No solution within budget")?,
    }
    Ok(())
}

/// Walks the solution showing every state on it next to all of its
/// successors, indenting one step further per move.
pub fn write_demo<W: Write>(out: &mut W, result: &SearchResult, styled: bool) -> io::Result<()> {
    let SearchOutcome::Solved(goal) = &result.outcome else {
        return write_solution(out, result);
    };

    let path = path_states(goal);
    let mut arrow = String::from(">");
    writeln!(out)?;

    if let Some((last, steps)) = path.split_last() {
        for ring in steps {
            writeln!(out, "{arrow}node: {}", ring_text(ring, styled))?;
            write!(out, "{arrow}children:")?;
            for mv in ring.legal_moves() {
                if let Some(child) = ring.try_move(mv) {
                    write!(out, "  {}", ring_text(&child, styled))?;
                }
            }
            writeln!(out, "\n")?;
            arrow.insert_str(0, "----");
        }
        writeln!(out, "{arrow}solution node: {}", ring_text(last, styled))?;
    }

    writeln!(
        out,
        "{} moves, {} nodes expanded",
        goal.g(),
        result.stats.expanded
    )
}

fn ring_text(ring: &Ring, styled: bool) -> String {
    if !styled {
        return ring.to_string();
    }
    ring.small()
        .iter()
        .map(|&disk| {
            if disk == 0 {
                style(disk).bold().yellow().to_string()
            } else {
                disk.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

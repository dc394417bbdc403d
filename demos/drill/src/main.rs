//! drill — demo evacuation run with ASCII rendering.
//!
//! Runs a small indoor drill (15×10 grid, 8 agents, 3 doors) with the
//! timeline compressed so a full run takes a few seconds, renders the grid
//! from read-only snapshots, and writes CSV reports to `output/drill/`.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use egress_core::{Cell, SimConfig, SimPhase};
use egress_output::{CsvReportWriter, ReportObserver};
use egress_sim::{SimBuilder, SimObserver, SimReport, SimSnapshot};

// ── Constants ─────────────────────────────────────────────────────────────────

const WIDTH:  i32   = 15;
const HEIGHT: i32   = 10;
const AGENTS: usize = 8;
const DOORS:  usize = 3;
const SEED:   u64   = 42;

// ── Console renderer ──────────────────────────────────────────────────────────

/// Renders every snapshot as an ASCII grid: `#` wall, `D` door, `o` agent,
/// `.` free floor.
struct ConsoleView {
    width:  i32,
    height: i32,
}

impl ConsoleView {
    fn render(&self, snapshot: &SimSnapshot) {
        let doors: HashSet<Cell> = snapshot.doors.iter().map(|d| d.cell).collect();
        let occupied: HashSet<Cell> = snapshot.occupied.iter().copied().collect();

        println!(
            "phase: {}  |  evacuated: {}/{}",
            snapshot.phase,
            snapshot.evacuated,
            AGENTS
        );
        for y in 0..self.height {
            let mut line = String::with_capacity(self.width as usize * 2);
            for x in 0..self.width {
                let cell = Cell::new(x, y);
                let glyph = if doors.contains(&cell) {
                    'D'
                } else if occupied.contains(&cell) {
                    'o'
                } else if x == 0 || x == self.width - 1 || y == 0 || y == self.height - 1 {
                    '#'
                } else {
                    '.'
                };
                line.push(glyph);
                line.push(' ');
            }
            println!("{line}");
        }
        println!();
    }
}

impl SimObserver for ConsoleView {
    fn on_phase(&mut self, phase: SimPhase) {
        match phase {
            SimPhase::Normal => println!("-- wandering --\n"),
            SimPhase::Evacuating => println!("-- EVACUATE --\n"),
            SimPhase::Finished => println!("-- finished --\n"),
        }
    }

    fn on_snapshot(&mut self, snapshot: &SimSnapshot) {
        self.render(snapshot);
    }
}

// ── Observer tee ──────────────────────────────────────────────────────────────

/// Fans every callback out to two observers.
struct Tee<A, B>(A, B);

impl<A: SimObserver, B: SimObserver> SimObserver for Tee<A, B> {
    fn on_phase(&mut self, phase: SimPhase) {
        self.0.on_phase(phase);
        self.1.on_phase(phase);
    }
    fn on_snapshot(&mut self, snapshot: &SimSnapshot) {
        self.0.on_snapshot(snapshot);
        self.1.on_snapshot(snapshot);
    }
    fn on_sim_end(&mut self, report: &SimReport) {
        self.0.on_sim_end(report);
        self.1.on_sim_end(report);
    }
}

// ── Final stats ───────────────────────────────────────────────────────────────

fn print_final_stats(report: &SimReport) {
    println!("{}", "=".repeat(50));
    println!("DRILL COMPLETE");
    println!("{}", "=".repeat(50));
    println!("Agents:    {}", report.total_agents);
    println!("Evacuated: {}", report.evacuated);
    println!("Stranded:  {}", report.stranded);
    println!("Rate:      {:.1}%", report.evacuation_rate() * 100.0);
    println!("Duration:  {:.2} s", report.elapsed.as_secs_f64());
    println!();

    println!("Per door:");
    for door in &report.doors {
        println!("  door {} at {}: {} exits", door.id.0, door.cell, door.exits);
        if !door.evacuees.is_empty() {
            let ids: Vec<String> =
                door.evacuees.iter().map(|a| a.0.to_string()).collect();
            println!("    agents: {}", ids.join(", "));
        }
    }

    println!();
    println!("Exit order:");
    for (i, record) in report.log.iter().enumerate() {
        println!("  {:>2}. agent {} -> door {}", i + 1, record.agent.0, record.door.0);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== egress drill ===");
    println!("Grid: {WIDTH}x{HEIGHT}  |  Agents: {AGENTS}  |  Doors: {DOORS}  |  Seed: {SEED}");
    println!();

    let config = SimConfig {
        width:          WIDTH,
        height:         HEIGHT,
        agent_count:    AGENTS,
        door_count:     DOORS,
        seed:           SEED,
        pre_evac:       Duration::from_secs(2),
        evac_timeout:   Duration::from_secs(10),
        step_delay_min: Duration::from_millis(50),
        step_delay_max: Duration::from_millis(150),
        poll_interval:  Duration::from_millis(250),
        shutdown_grace: Duration::from_secs(1),
    };

    let sim = SimBuilder::new(config).build()?;

    std::fs::create_dir_all("output/drill")?;
    let writer = CsvReportWriter::new(Path::new("output/drill"))?;
    let csv_obs = ReportObserver::new(writer);
    let console = ConsoleView { width: WIDTH, height: HEIGHT };
    let mut obs = Tee(console, csv_obs);

    let report = sim.run(&mut obs);

    if let Some(e) = obs.1.take_error() {
        eprintln!("output error: {e}");
    } else {
        println!("CSV report written to output/drill/");
    }

    print_final_stats(&report);
    Ok(())
}

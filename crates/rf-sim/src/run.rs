//! Fixed-step batch runner, recording and run summary.

use rf_core::NodeId;
use rf_core::units;
use serde::Serialize;
use tracing::info;

use crate::error::{SimError, SimResult};
use crate::simulation::Simulation;

/// Batch run configuration.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed tick length (seconds)
    pub dt_s: f64,
    /// Run length measured from the current simulation time (seconds)
    pub t_end_s: f64,
    /// Maximum number of ticks (safety limit)
    pub max_steps: usize,
    /// Record every N-th tick (decimation)
    pub record_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt_s: 60.0,
            t_end_s: 24.0 * 3600.0,
            max_steps: 1_000_000,
            record_every: 1,
        }
    }
}

/// Snapshot of the simulation after a tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub time_s: f64,
    pub ambient_c: f64,
    pub cabinet_1_c: f64,
    pub cabinet_2_c: f64,
    pub food_1_c: f64,
    pub food_2_c: f64,
    pub condensing_c: f64,
    pub evaporating_c: f64,
    pub speed_rpm: f64,
    pub power_w: f64,
    pub capacity_w: f64,
    pub damper_open: bool,
    /// Cumulative electrical energy (J).
    pub energy_j: f64,
    /// Cumulative compressor run time (s).
    pub run_time_s: f64,
}

impl Sample {
    pub const CSV_HEADER: &'static str = "time_s,ambient_c,cabinet_1_c,cabinet_2_c,food_1_c,food_2_c,\
condensing_c,evaporating_c,speed_rpm,power_w,capacity_w,damper_open,energy_j,run_time_s";

    pub fn capture(sim: &Simulation) -> SimResult<Self> {
        Ok(Self {
            time_s: sim.elapsed_s(),
            ambient_c: sim.temperature_c(NodeId::Ambient)?,
            cabinet_1_c: sim.temperature_c(NodeId::Cabinet1)?,
            cabinet_2_c: sim.temperature_c(NodeId::Cabinet2)?,
            food_1_c: sim.temperature_c(NodeId::Food1)?,
            food_2_c: sim.temperature_c(NodeId::Food2)?,
            condensing_c: sim.temperature_c(NodeId::Condenser)?,
            evaporating_c: sim.temperature_c(NodeId::Evaporator)?,
            speed_rpm: sim.speed_rpm(),
            power_w: sim.power_w(),
            capacity_w: sim.capacity_w(),
            damper_open: sim.damper().is_open(),
            energy_j: sim.energy_j(),
            run_time_s: sim.run_time_s(),
        })
    }

    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.time_s,
            self.ambient_c,
            self.cabinet_1_c,
            self.cabinet_2_c,
            self.food_1_c,
            self.food_2_c,
            self.condensing_c,
            self.evaporating_c,
            self.speed_rpm,
            self.power_w,
            self.capacity_w,
            u8::from(self.damper_open),
            self.energy_j,
            self.run_time_s
        )
    }
}

/// Record of a batch run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SimRecord {
    pub samples: Vec<Sample>,
}

impl SimRecord {
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(Sample::CSV_HEADER);
        csv.push('\n');
        for sample in &self.samples {
            csv.push_str(&sample.csv_row());
            csv.push('\n');
        }
        csv
    }
}

/// Step `sim` with a fixed tick until `t_end_s` has elapsed.
///
/// The initial and final states are always recorded.
pub fn run_sim(sim: &mut Simulation, opts: &SimOptions) -> SimResult<SimRecord> {
    if !opts.dt_s.is_finite() || opts.dt_s <= 0.0 {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if !opts.t_end_s.is_finite() || opts.t_end_s < 0.0 {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let mut samples = vec![Sample::capture(sim)?];

    let mut t = 0.0;
    let mut step = 0;
    while t < opts.t_end_s && step < opts.max_steps {
        sim.step(opts.dt_s)?;
        t += opts.dt_s;
        step += 1;

        if step % opts.record_every == 0 {
            samples.push(Sample::capture(sim)?);
        }
    }

    // Always record final state
    if step % opts.record_every != 0 {
        samples.push(Sample::capture(sim)?);
    }

    info!(steps = step, samples = samples.len(), "run complete");
    Ok(SimRecord { samples })
}

/// Mean and range of one temperature trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TemperatureStats {
    pub mean_c: f64,
    pub min_c: f64,
    pub max_c: f64,
}

impl TemperatureStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut n = 0usize;
        let mut sum = 0.0;
        let mut min_c = f64::INFINITY;
        let mut max_c = f64::NEG_INFINITY;
        for v in values {
            n += 1;
            sum += v;
            min_c = min_c.min(v);
            max_c = max_c.max(v);
        }
        (n > 0).then(|| Self {
            mean_c: sum / n as f64,
            min_c,
            max_c,
        })
    }
}

/// Energy, duty cycle and settled temperatures of a recorded run.
///
/// Temperatures are taken over the second half of the run, after the
/// start-up transient.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub duration_s: f64,
    pub energy_kwh: f64,
    /// Fraction of the run with the compressor turning.
    pub duty_cycle: f64,
    pub mean_power_w: f64,
    pub cabinet_1: TemperatureStats,
    pub cabinet_2: TemperatureStats,
}

impl RunSummary {
    pub fn from_record(record: &SimRecord) -> SimResult<Self> {
        let (Some(first), Some(last)) = (record.samples.first(), record.samples.last()) else {
            return Err(SimError::InvalidArg {
                what: "record is empty",
            });
        };

        let duration_s = last.time_s - first.time_s;
        let energy_j = last.energy_j - first.energy_j;
        let (duty_cycle, mean_power_w) = if duration_s > 0.0 {
            (
                (last.run_time_s - first.run_time_s) / duration_s,
                energy_j / duration_s,
            )
        } else {
            (0.0, 0.0)
        };

        let settled_from = first.time_s + 0.5 * duration_s;
        let settled = || record.samples.iter().filter(move |s| s.time_s >= settled_from);
        let stats = |f: fn(&Sample) -> f64| {
            TemperatureStats::from_values(settled().map(f)).ok_or(SimError::InvalidArg {
                what: "record has no settled samples",
            })
        };

        Ok(Self {
            duration_s,
            energy_kwh: units::to_kwh(units::joules(energy_j)),
            duty_cycle,
            mean_power_w,
            cabinet_1: stats(|s| s.cabinet_1_c)?,
            cabinet_2: stats(|s| s.cabinet_2_c)?,
        })
    }
}

use rf_core::{Compartment, NodeId, Tolerances, nearly_equal};
use rf_project::Catalog;
use rf_sim::{RunSummary, SimOptions, Simulation, run_sim};

const HOUR: f64 = 3600.0;

fn sim(appliance: &str, mode: &str) -> Simulation {
    let catalog = Catalog::builtin().unwrap();
    Simulation::from_catalog(&catalog, appliance, None, mode).unwrap()
}

#[test]
fn house_refrigerator_on_off_settles_in_band() {
    let mut sim = sim("house_refrigerator", "ON_OFF");
    assert_eq!(sim.temperature_c(NodeId::Cabinet1).unwrap(), -16.0);
    assert_eq!(sim.setpoint_c(Compartment::First), -18.0);

    // Starting exactly at setpoint + hysteresis counts as a call for cooling.
    sim.step(60.0).unwrap();
    assert_eq!(sim.speed_rpm(), 3000.0);

    let mut settled = Vec::new();
    let mut max_drift: f64 = 0.0;
    let mut switches = 0;
    while sim.elapsed_s() < 12.0 * HOUR {
        let before = sim.temperature_c(NodeId::Cabinet1).unwrap();
        let was_on = sim.speed_rpm() > 0.0;
        sim.step(60.0).unwrap();
        let after = sim.temperature_c(NodeId::Cabinet1).unwrap();
        let speed = sim.speed_rpm();
        assert!(speed == 0.0 || speed == 3000.0, "speed {speed}");

        // Switching decisions read the start-of-tick temperature.
        let is_on = speed > 0.0;
        if is_on && !was_on {
            assert!(before > -16.0, "started at {before}");
            switches += 1;
        }
        if was_on && !is_on {
            assert!(before <= -18.0, "stopped at {before}");
            switches += 1;
        }

        if sim.elapsed_s() > 8.0 * HOUR {
            max_drift = max_drift.max((after - before).abs());
            settled.push(after);
        }
    }
    assert!(switches >= 4, "only {switches} switches");

    // The band edges are crossed by at most one tick of drift.
    assert!(max_drift > 0.0 && max_drift < 0.5, "drift {max_drift}");
    for t in &settled {
        assert!(
            (-18.0 - max_drift..=-16.0 + max_drift).contains(t),
            "cabinet_1 left the band: {t}"
        );
    }
    let low = settled.iter().copied().fold(f64::INFINITY, f64::min);
    let high = settled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(low < -17.5 && high > -16.5, "range [{low}, {high}]");

    let t2 = sim.temperature_c(NodeId::Cabinet2).unwrap();
    assert!((3.0..=6.0).contains(&t2), "cabinet_2 = {t2}");
}

#[test]
fn house_refrigerator_vcc_cycles_within_speed_limits() {
    let mut sim = sim("house_refrigerator", "VCC");
    assert_eq!(sim.speed_rpm(), 0.0);

    let mut was_active = false;
    let mut cycles_ended = 0;
    while sim.elapsed_s() < 12.0 * HOUR {
        sim.step(60.0).unwrap();
        let s = sim.speed_rpm();
        assert!(s == 0.0 || (1600.0..=4500.0).contains(&s), "speed {s}");

        let active = sim.controller().vcc_state().unwrap().is_active;
        if was_active && !active {
            cycles_ended += 1;
        }
        was_active = active;

        if sim.elapsed_s() > 6.0 * HOUR {
            let t1 = sim.temperature_c(NodeId::Cabinet1).unwrap();
            assert!((-22.0..=-15.0).contains(&t1), "cabinet_1 = {t1}");
        }
    }
    assert!(cycles_ended >= 1);
    assert!(sim.energy_j() > 0.0);
}

#[test]
fn single_compartment_appliances_hold_temperature() {
    for (appliance, low, high) in [("bottle_cooler", 0.0, 6.0), ("chest_freezer", -24.0, -16.0)] {
        for mode in ["ON_OFF", "VCC"] {
            let mut sim = sim(appliance, mode);
            let record = run_sim(
                &mut sim,
                &SimOptions {
                    dt_s: 60.0,
                    t_end_s: 12.0 * HOUR,
                    record_every: 5,
                    ..SimOptions::default()
                },
            )
            .unwrap();
            let summary = RunSummary::from_record(&record).unwrap();
            assert!(
                summary.cabinet_1.min_c >= low && summary.cabinet_1.max_c <= high,
                "{appliance} {mode}: {:?}",
                summary.cabinet_1
            );
            assert!(summary.duty_cycle > 0.0 && summary.duty_cycle < 1.0);

            // The second compartment is not modeled and never moves.
            let t2 = sim.temperature_c(NodeId::Cabinet2).unwrap();
            assert_eq!(t2, sim.config().compartment_2.initial_temperature_c());
        }
    }
}

#[test]
fn batch_run_reports_energy_and_duty() {
    let mut sim = sim("house_refrigerator", "ON_OFF");
    let opts = SimOptions {
        dt_s: 60.0,
        t_end_s: 12.0 * HOUR,
        max_steps: 100_000,
        record_every: 10,
    };
    let record = run_sim(&mut sim, &opts).unwrap();
    assert_eq!(record.samples.first().unwrap().time_s, 0.0);
    assert_eq!(record.samples.last().unwrap().time_s, 12.0 * HOUR);
    assert_eq!(record.samples.len(), 720 / 10 + 1);

    let summary = RunSummary::from_record(&record).unwrap();
    assert!(summary.energy_kwh > 0.0);
    assert!(summary.duty_cycle > 0.05 && summary.duty_cycle < 0.95);
    assert!(summary.cabinet_1.mean_c > -18.5 && summary.cabinet_1.mean_c < -15.5);
    assert!(nearly_equal(
        summary.energy_kwh * 3.6e6,
        sim.energy_j(),
        Tolerances::default()
    ));
    assert!(sim.run_time_s() <= sim.elapsed_s());
}

#[test]
fn identical_inputs_give_identical_trajectories() {
    let mut a = sim("house_refrigerator", "VCC");
    let mut b = sim("house_refrigerator", "VCC");
    for _ in 0..500 {
        a.step(30.0).unwrap();
        b.step(30.0).unwrap();
    }
    for node in NodeId::ALL {
        assert_eq!(a.temperature_c(node).unwrap(), b.temperature_c(node).unwrap());
    }
    assert_eq!(a.energy_j(), b.energy_j());
}

//! The simulation instance and its per-tick orchestration.

use std::str::FromStr;

use rf_compressor::{CompressorModel, CompressorParameters, Performance};
use rf_controls::{
    Command, ControlError, ControlSettings, Controller, DamperAction, HysteresisBand, PiGains,
    Readings, SpeedLimits,
};
use rf_core::units::{self, Energy, Power, Temperature, Time};
use rf_core::{Compartment, ControlMode, NodeId};
use rf_network::{HeatInputs, NetworkBuilder, NodeKind, ThermalNetwork};
use rf_project::{Catalog, SystemConfig, ValidationError, validate_system};
use tracing::{debug, info, trace};

use crate::error::{SimError, SimResult};

/// One appliance under closed-loop control.
///
/// The network owns temperatures, masses and conductances; the controller owns
/// its timers and integral state. Runtime inputs are plain writes expected
/// between calls to [`Simulation::step`].
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SystemConfig,
    compressor: CompressorModel,
    controller: Controller,
    network: ThermalNetwork,
    door_open: [bool; 2],
    voltage_fault: bool,
    command: Command,
    performance: Performance,
    energy_j: f64,
    run_time_s: f64,
    elapsed_s: f64,
}

impl Simulation {
    /// Build a simulation at its initial state: every compartment at the upper
    /// edge of its band, ambient at the configured default.
    pub fn new(
        config: &SystemConfig,
        compressor: &CompressorParameters,
        mode: ControlMode,
    ) -> SimResult<Self> {
        validate_system(config)?;
        let compressor = CompressorModel::new(compressor.clone()).map_err(|source| {
            ValidationError::Compressor {
                id: compressor.id.clone(),
                source,
            }
        })?;

        let network = build_network(config)?;
        let readings = read_cabinets(&network)?;
        let settings = control_settings(config, compressor.params())?;
        let controller = Controller::new(mode, settings, &readings)?;
        let command = Command {
            speed_rpm: controller.speed_rpm(),
            damper: controller.damper(),
        };

        let mut sim = Self {
            config: config.clone(),
            compressor,
            controller,
            network,
            door_open: [false; 2],
            voltage_fault: false,
            command,
            performance: Performance::OFF,
            energy_j: 0.0,
            run_time_s: 0.0,
            elapsed_s: 0.0,
        };
        sim.apply_conductances(command.damper)?;
        sim.performance = sim.evaluate_compressor(command.speed_rpm)?;

        info!(
            appliance = %sim.config.id,
            compressor = %sim.compressor.params().id,
            mode = %mode,
            "simulation initialized"
        );
        Ok(sim)
    }

    /// Look up appliance and compressor by key and parse the mode selector.
    ///
    /// `compressor = None` uses the appliance's default compressor.
    pub fn from_catalog(
        catalog: &Catalog,
        appliance: &str,
        compressor: Option<&str>,
        mode: &str,
    ) -> SimResult<Self> {
        let config = catalog.appliance(appliance)?;
        let params = catalog.compressor(compressor.unwrap_or(config.compressor.as_str()))?;
        let mode = ControlMode::from_str(mode).map_err(|_| ControlError::UnknownMode {
            name: mode.to_string(),
        })?;
        Self::new(config, params, mode)
    }

    /// Advance by one tick of `dt_s` seconds.
    pub fn step(&mut self, dt_s: f64) -> SimResult<()> {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive and finite",
            });
        }

        let readings = read_cabinets(&self.network)?;
        let command = self.controller.step(dt_s, &readings);

        self.apply_conductances(command.damper)?;
        let performance = self.evaluate_compressor(command.speed_rpm)?;

        let mut inputs = HeatInputs::new();
        inputs.add(NodeId::Cabinet1, -performance.capacity_w);
        self.network.advance(dt_s, &inputs)?;
        update_proxies(&mut self.network, &self.config)?;

        self.energy_j += performance.power_w * dt_s;
        if command.speed_rpm > 0.0 {
            self.run_time_s += dt_s;
        }
        self.elapsed_s += dt_s;

        let running = command.speed_rpm > 0.0;
        if running != (self.command.speed_rpm > 0.0) {
            debug!(
                time_s = self.elapsed_s,
                cabinet_1_c = readings.cabinet_1_c,
                speed_rpm = command.speed_rpm,
                "compressor {}",
                if running { "start" } else { "stop" }
            );
        }
        if command.damper != self.command.damper {
            debug!(
                time_s = self.elapsed_s,
                cabinet_2_c = readings.cabinet_2_c,
                damper = ?command.damper,
                "damper change"
            );
        }
        self.command = command;
        self.performance = performance;

        trace!(
            t_s = self.elapsed_s,
            cabinet_1_c = readings.cabinet_1_c,
            cabinet_2_c = readings.cabinet_2_c,
            speed_rpm = command.speed_rpm,
            capacity_w = performance.capacity_w,
            "tick"
        );
        Ok(())
    }

    // Runtime inputs

    pub fn set_ambient_temperature(&mut self, temperature_c: f64) -> SimResult<()> {
        self.network.set_temperature(NodeId::Ambient, temperature_c)?;
        info!(temperature_c, "ambient temperature set");
        Ok(())
    }

    pub fn set_voltage_fault(&mut self, fault: bool) {
        if fault != self.voltage_fault {
            info!(fault, "voltage fault flag changed");
        }
        self.voltage_fault = fault;
        self.controller.set_voltage_fault(fault);
    }

    /// Takes effect on the next tick's conductances.
    pub fn set_door_open(&mut self, compartment: Compartment, open: bool) {
        info!(%compartment, open, "door");
        self.door_open[slot(compartment)] = open;
    }

    /// Restore the compartment's default food load at `temperature_c`.
    pub fn add_food(&mut self, temperature_c: f64, compartment: Compartment) -> SimResult<()> {
        if !temperature_c.is_finite() {
            return Err(SimError::InvalidArg {
                what: "food temperature must be finite",
            });
        }
        let food = self.config.compartment(compartment).food;
        let node = compartment.food();
        self.network.set_mass(node, food.mass_kg)?;
        self.network.set_temperature(node, temperature_c)?;
        info!(%compartment, mass_kg = food.mass_kg, temperature_c, "food added");
        Ok(())
    }

    /// Take the food out of the model. Its temperature reads 0 °C while absent.
    pub fn remove_food(&mut self, compartment: Compartment) -> SimResult<()> {
        let node = compartment.food();
        self.network.set_mass(node, 0.0)?;
        self.network.set_temperature(node, 0.0)?;
        info!(%compartment, "food removed");
        Ok(())
    }

    // Outputs

    pub fn temperature_c(&self, node: NodeId) -> SimResult<f64> {
        Ok(self.network.temperature(node)?)
    }

    pub fn temperature(&self, node: NodeId) -> SimResult<Temperature> {
        Ok(units::celsius(self.temperature_c(node)?))
    }

    pub fn speed_rpm(&self) -> f64 {
        self.command.speed_rpm
    }

    pub fn damper(&self) -> DamperAction {
        self.command.damper
    }

    pub fn power_w(&self) -> f64 {
        self.performance.power_w
    }

    pub fn capacity_w(&self) -> f64 {
        self.performance.capacity_w
    }

    pub fn power(&self) -> Power {
        units::w(self.performance.power_w)
    }

    pub fn capacity(&self) -> Power {
        units::w(self.performance.capacity_w)
    }

    pub fn setpoint_c(&self, compartment: Compartment) -> f64 {
        self.controller.setpoint_c(compartment)
    }

    pub fn setpoint(&self, compartment: Compartment) -> Temperature {
        units::celsius(self.setpoint_c(compartment))
    }

    /// Electrical energy drawn since construction.
    pub fn energy(&self) -> Energy {
        units::joules(self.energy_j)
    }

    pub fn energy_j(&self) -> f64 {
        self.energy_j
    }

    /// Accumulated time with a non-zero speed command.
    pub fn run_time_s(&self) -> f64 {
        self.run_time_s
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn elapsed(&self) -> Time {
        units::s(self.elapsed_s)
    }

    pub fn is_door_open(&self, compartment: Compartment) -> bool {
        self.door_open[slot(compartment)]
    }

    pub fn voltage_fault(&self) -> bool {
        self.voltage_fault
    }

    pub fn mode(&self) -> ControlMode {
        self.controller.mode()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn network(&self) -> &ThermalNetwork {
        &self.network
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn compressor(&self) -> &CompressorParameters {
        self.compressor.params()
    }

    fn evaluate_compressor(&self, speed_rpm: f64) -> SimResult<Performance> {
        let t_cond = self.network.temperature(NodeId::Condenser)?;
        let t_evap = self.network.temperature(NodeId::Evaporator)?;
        Ok(self
            .compressor
            .evaluate(speed_rpm, t_cond, t_evap, self.controller.mode()))
    }

    /// Set the damper and door-dependent conductances for this tick.
    fn apply_conductances(&mut self, damper: DamperAction) -> SimResult<()> {
        let d = &self.config.damper;
        let g_damper = if damper.is_open() {
            d.open_conductance_w_per_k
        } else {
            d.closed_conductance_w_per_k
        };
        self.network
            .set_conductance(NodeId::Cabinet1, NodeId::Cabinet2, g_damper)?;

        for compartment in Compartment::ALL {
            let def = self.config.compartment(compartment);
            let mut g = def.ambient_conductance_w_per_k;
            if self.door_open[slot(compartment)] {
                g += def.door_open_conductance_w_per_k;
            }
            self.network
                .set_conductance(NodeId::Ambient, compartment.cabinet(), g)?;
        }
        Ok(())
    }
}

fn slot(compartment: Compartment) -> usize {
    usize::from(compartment.number() - 1)
}

fn build_network(config: &SystemConfig) -> SimResult<ThermalNetwork> {
    let mut builder = NetworkBuilder::new();
    builder.add_node(NodeId::Ambient, NodeKind::Boundary, 0.0, 0.0, config.ambient_c);

    for compartment in Compartment::ALL {
        let def = config.compartment(compartment);
        let t0 = def.initial_temperature_c();
        builder
            .add_node(
                compartment.cabinet(),
                NodeKind::Lumped,
                def.cabinet.mass_kg,
                def.cabinet.specific_heat_j_per_kg_k,
                t0,
            )
            .add_node(
                compartment.food(),
                NodeKind::Lumped,
                def.food.mass_kg,
                def.food.specific_heat_j_per_kg_k,
                t0,
            )
            .couple(
                NodeId::Ambient,
                compartment.cabinet(),
                def.ambient_conductance_w_per_k,
            )
            .couple(
                compartment.cabinet(),
                compartment.food(),
                def.food.conductance_w_per_k,
            );
    }
    builder.couple(
        NodeId::Cabinet1,
        NodeId::Cabinet2,
        config.damper.closed_conductance_w_per_k,
    );

    builder.add_node(NodeId::Condenser, NodeKind::Derived, 0.0, 0.0, 0.0);
    builder.add_node(NodeId::Evaporator, NodeKind::Derived, 0.0, 0.0, 0.0);

    let mut network = builder.build()?;
    update_proxies(&mut network, config)?;
    Ok(network)
}

/// Condensing = ambient + ΔAC, evaporating = cabinet 1 - ΔCE.
fn update_proxies(network: &mut ThermalNetwork, config: &SystemConfig) -> SimResult<()> {
    let ambient = network.temperature(NodeId::Ambient)?;
    let cabinet_1 = network.temperature(NodeId::Cabinet1)?;
    network.set_temperature(
        NodeId::Condenser,
        ambient + config.proxies.ambient_to_condensing_k,
    )?;
    network.set_temperature(
        NodeId::Evaporator,
        cabinet_1 - config.proxies.cabinet_to_evaporating_k,
    )?;
    Ok(())
}

fn read_cabinets(network: &ThermalNetwork) -> SimResult<Readings> {
    Ok(Readings {
        cabinet_1_c: network.temperature(NodeId::Cabinet1)?,
        cabinet_2_c: network.temperature(NodeId::Cabinet2)?,
    })
}

fn control_settings(
    config: &SystemConfig,
    compressor: &CompressorParameters,
) -> SimResult<ControlSettings> {
    let c1 = &config.compartment_1;
    let c2 = &config.compartment_2;
    Ok(ControlSettings {
        cooling: HysteresisBand::new(c1.setpoint_c, c1.hysteresis_c)?,
        damper: HysteresisBand::new(c2.setpoint_c, c2.hysteresis_c)?,
        speeds: SpeedLimits {
            min_rpm: compressor.min_speed_rpm,
            max_rpm: compressor.max_speed_rpm,
            on_off_rpm: compressor.on_off_speed_rpm,
        },
        pi: PiGains {
            kp: config.pi.kp,
            ki: config.pi.ki,
            negative_error_weight: config.pi.negative_error_weight,
        },
        stabilization_time_s: config.pi.stabilization_minutes * 60.0,
    })
}

use std::io;
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::backend::WIFI_5GHZ_CHANNEL_FREQUENCY;
use crate::backend::application::{UdpClient, UdpServer};
use crate::backend::mathphysics::{
    BitsPerSecond, Decibel, Meter, Point3D, Second, SignalDbm
};
use crate::backend::phy::WifiPhy;
use crate::backend::propagation::PropagationLossModel;
use crate::backend::simulator::{SimulatorBuildError, SimulatorBuilder};

use super::FLOW_XML_FILENAME;
use super::recorder;


const SIMULATION_TIME: Second = 50.0;

const DATA_RATE: BitsPerSecond = 75e6;
const PACKET_SIZE: u64         = 1450;

const TX_POWER: SignalDbm   = SignalDbm::new(10.0);
const TX_GAIN: Decibel      = 1.0;
const RX_GAIN: Decibel      = 1.0;
const ANTENNA_HEIGHT: Meter = 1.5;

const UDP_PORT: u16        = 9;
const SERVER_START: Second = 1.0;
const CLIENT_START: Second = 2.0;

// Models whose loss curve can stay permissive indefinitely are cut off
// at this distance.
const DISTANCE_CAP: Meter = 500.0;

const RUNTIME_DISTANCE: Meter = 10.0;
const MAX_RUNTIME: u32        = 200;

const RUNTIME_OUTPUT_FILENAME: &str = "output_runtime.csv";

const DISTANCE_COLUMN: &str   = "distanceMeters";
const RUNTIME_COLUMN: &str    = "runtime";
const RSS_COLUMN: &str        = "rssDBm";
const THROUGHPUT_COLUMN: &str = "throughputKbps";


#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("Failed to record results: {0}")]
    Record(#[from] csv::Error),
    #[error("Failed to serialize flow statistics: {0}")]
    FlowDump(#[from] io::Error),
    #[error("Failed to assemble simulator: {0}")]
    SimulatorBuild(#[from] SimulatorBuildError),
}


/// Parameters of one simulation trial, fixed at construction.
#[derive(Clone, Debug)]
pub struct TrialParameters {
    pub distance: Meter,
    pub duration: Second,
    pub model: PropagationLossModel,
    pub tx_power: SignalDbm,
    pub tx_gain: Decibel,
    pub rx_gain: Decibel,
    pub antenna_height: Meter,
    pub data_rate: BitsPerSecond,
    pub packet_size: u64,
}

impl TrialParameters {
    #[must_use]
    pub fn new(
        distance: Meter,
        duration: Second,
        model: PropagationLossModel
    ) -> Self {
        Self {
            distance,
            duration,
            model,
            tx_power: TX_POWER,
            tx_gain: TX_GAIN,
            rx_gain: RX_GAIN,
            antenna_height: ANTENNA_HEIGHT,
            data_rate: DATA_RATE,
            packet_size: PACKET_SIZE,
        }
    }

    /// Delay between consecutive datagrams for the target data rate.
    #[must_use]
    pub fn interval(&self) -> Second {
        (self.packet_size * 8) as Second / self.data_rate
    }

    #[must_use]
    pub fn packet_limit(&self) -> u64 {
        (self.duration / self.interval()) as u64
    }
}


#[derive(Clone, Copy, Debug)]
pub struct FlowRecord {
    pub rx_bytes: u64,
    pub throughput_kbps: f64,
}

#[derive(Clone, Debug)]
pub struct TrialResult {
    pub average_rss: SignalDbm,
    pub flows: Vec<FlowRecord>,
}


#[must_use]
fn updated_average_rss(average_rss: f64, signal: f64) -> f64 {
    (signal + average_rss) / 2.0
}

#[must_use]
fn throughput_kbps(rx_bytes: u64, duration: Second) -> f64 {
    rx_bytes as f64 * 8.0 / duration / 1024.0
}

fn connection_still_possible(flows: &[FlowRecord]) -> bool {
    !flows.iter().any(|flow| flow.rx_bytes == 0)
}

fn distance_capped(model: &PropagationLossModel) -> bool {
    matches!(
        model,
        PropagationLossModel::FixedRss { .. }
            | PropagationLossModel::Nakagami { .. }
    )
}

fn trial_seed(parameters: &TrialParameters) -> u64 {
    parameters.distance.to_bits()
        ^ parameters.duration.to_bits().rotate_left(17)
}

fn model_lineup() -> Vec<PropagationLossModel> {
    vec![
        PropagationLossModel::Friis {
            frequency: WIFI_5GHZ_CHANNEL_FREQUENCY,
            system_loss: 1.0,
        },
        PropagationLossModel::FixedRss {
            rss: SignalDbm::new(-75.0),
        },
        PropagationLossModel::ThreeLogDistance {
            distance0: 1.0,
            distance1: 100.0,
            distance2: 500.0,
            reference_loss: 46.77,
        },
        PropagationLossModel::TwoRayGround {
            frequency: WIFI_5GHZ_CHANNEL_FREQUENCY,
            min_distance: 0.5,
            system_loss: 1.0,
            height_above_z: ANTENNA_HEIGHT,
        },
        PropagationLossModel::Nakagami {
            distance1: 80.0,
            distance2: 200.0,
            m0: 1.5,
            m1: 0.75,
            m2: 0.75,
        },
    ]
}

/// Configures and executes exactly one simulated scenario, returning the
/// running RSS average and one throughput figure per observed flow.
///
/// # Errors
///
/// Will return `Err` if the simulator cannot be assembled or the flow
/// statistics dump cannot be written.
pub fn run_trial(
    parameters: &TrialParameters,
    output_dir: &Path
) -> Result<TrialResult, ExperimentError> {
    let mut average_rss: f64 = 0.0;

    let phy = WifiPhy::new(
        parameters.tx_power,
        parameters.tx_gain,
        parameters.rx_gain
    );
    let server = UdpServer::new(UDP_PORT, SERVER_START, parameters.duration);
    let client = UdpClient::new(
        parameters.packet_size,
        parameters.packet_limit(),
        parameters.interval(),
        CLIENT_START,
        parameters.duration
    );

    let mut simulator = SimulatorBuilder::new()
        .set_positions(
            Point3D::new(0.0, 0.0, parameters.antenna_height),
            Point3D::new(parameters.distance, 0.0, parameters.antenna_height)
        )
        .set_phy(phy)
        .set_loss_model(parameters.model.clone())
        .set_applications(server, client)
        .set_stop_time(parameters.duration)
        .set_rng_seed(trial_seed(parameters))
        .build()?;

    simulator.set_phy_rx_callback(|reception| {
        debug!(
            "Received packet with signal: {}, noise: {}",
            reception.signal,
            reception.noise
        );
        average_rss = updated_average_rss(
            average_rss,
            reception.signal.value()
        );
    });

    simulator.run();

    simulator
        .flow_monitor()
        .serialize_to_xml_file(&output_dir.join(FLOW_XML_FILENAME))?;

    let flows: Vec<FlowRecord> = simulator
        .flow_monitor()
        .flow_stats()
        .map(|(_, stats)| FlowRecord {
            rx_bytes: stats.rx_bytes,
            throughput_kbps: throughput_kbps(
                stats.rx_bytes,
                parameters.duration
            ),
        })
        .collect();

    drop(simulator);

    Ok(TrialResult {
        average_rss: SignalDbm::new(average_rss),
        flows,
    })
}

fn distance_sweep(
    model: &PropagationLossModel,
    duration: Second,
    distance_cap: Meter,
    output_path: &Path,
    output_dir: &Path
) -> Result<(), ExperimentError> {
    let mut connection_possible = true;
    let mut distance: Meter = 1.0;

    while connection_possible {
        info!("Running simulation for distance={distance}m");

        let parameters = TrialParameters::new(
            distance,
            duration,
            model.clone()
        );
        let result = run_trial(&parameters, output_dir)?;

        for flow in &result.flows {
            info!(
                "RSS: {} dBm, Throughput: {} Kbps",
                result.average_rss,
                flow.throughput_kbps
            );

            recorder::append_row(output_path, &[
                distance.to_string(),
                result.average_rss.to_string(),
                flow.throughput_kbps.to_string(),
                String::new(),
            ])?;
        }

        connection_possible &= connection_still_possible(&result.flows);

        if distance >= distance_cap && distance_capped(model) {
            connection_possible = false;
        }

        distance += 1.0;
    }

    Ok(())
}

fn duration_sweep(
    model: &PropagationLossModel,
    distance: Meter,
    max_runtime: u32,
    output_path: &Path,
    output_dir: &Path
) -> Result<(), ExperimentError> {
    let mut connection_possible = true;

    for runtime in 1..=max_runtime {
        info!("Running simulation for {runtime}s");

        let parameters = TrialParameters::new(
            distance,
            Second::from(runtime),
            model.clone()
        );
        let result = run_trial(&parameters, output_dir)?;

        for flow in &result.flows {
            info!(
                "RSS: {} dBm, Throughput: {} Kbps",
                result.average_rss,
                flow.throughput_kbps
            );

            recorder::append_row(output_path, &[
                runtime.to_string(),
                result.average_rss.to_string(),
                flow.throughput_kbps.to_string(),
            ])?;
        }

        // Tracked for parity with the distance sweep, although this
        // sweep runs to the upper bound regardless.
        connection_possible &= connection_still_possible(&result.flows);
    }

    debug!("Connection possible throughout: {connection_possible}");

    Ok(())
}

/// Distance sweep over every propagation model: one CSV per model, one
/// trial per meter, stopping when connectivity drops (or at the distance
/// cap for models that never lose it).
///
/// # Errors
///
/// Will return `Err` if a trial fails or a result cannot be recorded.
pub fn propagation_comparison(output_dir: &Path) -> Result<(), ExperimentError> {
    for model in model_lineup() {
        let model_name = model.name();
        let output_path = output_dir.join(format!("output_{model_name}.csv"));

        recorder::write_header(
            &output_path,
            &[DISTANCE_COLUMN, RSS_COLUMN, THROUGHPUT_COLUMN, model_name]
        )?;
        info!("Running with {model_name}");

        distance_sweep(
            &model,
            SIMULATION_TIME,
            DISTANCE_CAP,
            &output_path,
            output_dir
        )?;

        info!("End of simulation with model {model_name}");
    }

    Ok(())
}

/// Duration sweep with the free-space model at a fixed distance: one
/// trial per simulated second from 1 to the upper bound, connectivity
/// notwithstanding.
///
/// # Errors
///
/// Will return `Err` if a trial fails or a result cannot be recorded.
pub fn runtime_comparison(output_dir: &Path) -> Result<(), ExperimentError> {
    let model = PropagationLossModel::Friis {
        frequency: WIFI_5GHZ_CHANNEL_FREQUENCY,
        system_loss: 1.0,
    };
    let output_path = output_dir.join(RUNTIME_OUTPUT_FILENAME);

    recorder::write_header(
        &output_path,
        &[RUNTIME_COLUMN, RSS_COLUMN, THROUGHPUT_COLUMN]
    )?;

    duration_sweep(
        &model,
        RUNTIME_DISTANCE,
        MAX_RUNTIME,
        &output_path,
        output_dir
    )
}

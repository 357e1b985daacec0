use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use super::IPV4_UDP_HEADER_SIZE;
use super::application::{UdpClient, UdpServer};
use super::flowmonitor::{FlowId, FlowMonitor};
use super::mathphysics::{propagation_delay_in_secs, Point3D, Second};
use super::phy::{SignalNoiseDbm, WifiPhy};
use super::propagation::PropagationLossModel;


type PhyRxCallback<'a> = Box<dyn FnMut(SignalNoiseDbm) + 'a>;


#[derive(Debug, Error)]
pub enum SimulatorBuildError {
    #[error("No node positions were set")]
    NoPositions,
    #[error("No propagation loss model was set")]
    NoLossModel,
    #[error("No applications were set")]
    NoApplications,
    #[error("No stop time was set")]
    NoStopTime,
}


#[derive(Clone, Debug, Default)]
pub struct SimulatorBuilder {
    server_position: Option<Point3D>,
    client_position: Option<Point3D>,
    phy: Option<WifiPhy>,
    loss_model: Option<PropagationLossModel>,
    server: Option<UdpServer>,
    client: Option<UdpClient>,
    stop_time: Option<Second>,
    rng_seed: Option<u64>,
}

impl SimulatorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_positions(
        mut self,
        server_position: Point3D,
        client_position: Point3D
    ) -> Self {
        self.server_position = Some(server_position);
        self.client_position = Some(client_position);
        self
    }

    #[must_use]
    pub fn set_phy(mut self, phy: WifiPhy) -> Self {
        self.phy = Some(phy);
        self
    }

    #[must_use]
    pub fn set_loss_model(mut self, loss_model: PropagationLossModel) -> Self {
        self.loss_model = Some(loss_model);
        self
    }

    #[must_use]
    pub fn set_applications(
        mut self,
        server: UdpServer,
        client: UdpClient
    ) -> Self {
        self.server = Some(server);
        self.client = Some(client);
        self
    }

    #[must_use]
    pub fn set_stop_time(mut self, stop_time: Second) -> Self {
        self.stop_time = Some(stop_time);
        self
    }

    #[must_use]
    pub fn set_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }

    /// # Errors
    ///
    /// Will return `Err` if positions, loss model, applications or the
    /// stop time were not set.
    pub fn build<'a>(self) -> Result<Simulator<'a>, SimulatorBuildError> {
        let (Some(server_position), Some(client_position)) =
            (self.server_position, self.client_position)
        else {
            return Err(SimulatorBuildError::NoPositions);
        };
        let Some(loss_model) = self.loss_model else {
            return Err(SimulatorBuildError::NoLossModel);
        };
        let (Some(server), Some(client)) = (self.server, self.client) else {
            return Err(SimulatorBuildError::NoApplications);
        };
        let Some(stop_time) = self.stop_time else {
            return Err(SimulatorBuildError::NoStopTime);
        };

        let mut monitor = FlowMonitor::new();
        let flow = monitor.register_flow();

        Ok(Simulator {
            server_position,
            client_position,
            phy: self.phy.unwrap_or_default(),
            loss_model,
            server,
            client,
            stop_time,
            monitor,
            flow,
            phy_rx_callback: None,
            rng: StdRng::seed_from_u64(self.rng_seed.unwrap_or(0)),
        })
    }
}


/// One end-to-end scenario: two fixed nodes, a channel with a single
/// propagation-loss model, a UDP client/server pair and passive flow
/// statistics. Dropping the simulator discards all of its state.
pub struct Simulator<'a> {
    server_position: Point3D,
    client_position: Point3D,
    phy: WifiPhy,
    loss_model: PropagationLossModel,
    server: UdpServer,
    client: UdpClient,
    stop_time: Second,
    monitor: FlowMonitor,
    flow: FlowId,
    phy_rx_callback: Option<PhyRxCallback<'a>>,
    rng: StdRng,
}

impl<'a> Simulator<'a> {
    /// Registers the per-packet reception hook. Must be called before
    /// `run`; the callback is invoked synchronously, in simulated-time
    /// order.
    pub fn set_phy_rx_callback(
        &mut self,
        callback: impl FnMut(SignalNoiseDbm) + 'a
    ) {
        self.phy_rx_callback = Some(Box::new(callback));
    }

    #[must_use]
    pub fn flow_monitor(&self) -> &FlowMonitor {
        &self.monitor
    }

    /// Advances simulated time to the configured stop time, processing
    /// every datagram emission in order.
    pub fn run(&mut self) {
        let distance = self.client_position
            .distance_to(&self.server_position);
        let delay = propagation_delay_in_secs(distance);
        let ip_packet_size = self.client.packet_size + IPV4_UDP_HEADER_SIZE;

        debug!(
            "Trial over {} at {distance} m, UDP port {}, stop at {} s",
            self.loss_model.name(),
            self.server.port,
            self.stop_time
        );

        let send_times: Vec<Second> = self.client.send_times().collect();

        for send_time in send_times {
            if send_time > self.stop_time {
                break;
            }

            self.monitor.record_tx(self.flow, ip_packet_size);

            let arrival = send_time + delay;

            if arrival > self.stop_time || !self.server.accepts_at(arrival) {
                continue;
            }

            let rx_power = self.loss_model.rx_power(
                self.phy.effective_tx_power(),
                &self.client_position,
                &self.server_position,
                &mut self.rng
            );
            let signal = self.phy.received_signal(rx_power);

            if !self.phy.receives(signal) {
                trace!("Dropped packet at {arrival} s, signal {signal} dBm");
                continue;
            }

            self.monitor.record_rx(self.flow, ip_packet_size);

            if let Some(callback) = self.phy_rx_callback.as_mut() {
                callback(SignalNoiseDbm {
                    signal,
                    noise: self.phy.noise_floor(),
                });
            }
        }
    }
}

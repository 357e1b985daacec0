use super::mathphysics::Second;


/// Receiving application: accepts datagrams on `port` while active.
#[derive(Clone, Copy, Debug)]
pub struct UdpServer {
    pub port: u16,
    pub start: Second,
    pub stop: Second,
}

impl UdpServer {
    #[must_use]
    pub fn new(port: u16, start: Second, stop: Second) -> Self {
        Self { port, start, stop }
    }

    #[must_use]
    pub fn accepts_at(&self, time: Second) -> bool {
        time >= self.start && time <= self.stop
    }
}


/// Sending application: emits fixed-size datagrams at a fixed interval,
/// up to `max_packets`, while active.
#[derive(Clone, Copy, Debug)]
pub struct UdpClient {
    pub packet_size: u64,
    pub max_packets: u64,
    pub interval: Second,
    pub start: Second,
    pub stop: Second,
}

impl UdpClient {
    #[must_use]
    pub fn new(
        packet_size: u64,
        max_packets: u64,
        interval: Second,
        start: Second,
        stop: Second
    ) -> Self {
        Self { packet_size, max_packets, interval, start, stop }
    }

    /// Send times of every datagram the client emits, in order.
    pub fn send_times(&self) -> impl Iterator<Item = Second> + '_ {
        (0..self.max_packets)
            .map(|packet| {
                self.interval.mul_add(packet as Second, self.start)
            })
            .take_while(|time| *time < self.stop)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_window_is_inclusive() {
        let server = UdpServer::new(9, 1.0, 50.0);

        assert!(server.accepts_at(1.0));
        assert!(server.accepts_at(25.0));
        assert!(server.accepts_at(50.0));
        assert!(!server.accepts_at(0.5));
        assert!(!server.accepts_at(50.1));
    }

    #[test]
    fn client_respects_packet_ceiling() {
        let client = UdpClient::new(1450, 3, 1.0, 2.0, 50.0);
        let times: Vec<Second> = client.send_times().collect();

        assert_eq!(vec![2.0, 3.0, 4.0], times);
    }

    #[test]
    fn client_stops_at_window_end() {
        let client = UdpClient::new(1450, 1000, 1.0, 2.0, 5.0);
        let times: Vec<Second> = client.send_times().collect();

        assert_eq!(vec![2.0, 3.0, 4.0], times);
    }

    #[test]
    fn client_with_no_window_sends_nothing() {
        let client = UdpClient::new(1450, 1000, 1.0, 2.0, 2.0);

        assert_eq!(0, client.send_times().count());
    }
}

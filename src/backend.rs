use mathphysics::Hertz;


pub mod application;
pub mod flowmonitor;
pub mod mathphysics;
pub mod phy;
pub mod propagation;
pub mod simulator;


pub const WIFI_5GHZ_CHANNEL_FREQUENCY: Hertz = 5.18e9;

// Flow statistics are collected at the IP level, so every UDP payload
// carries an IPv4 header (20 bytes) and a UDP header (8 bytes) on top.
pub const IPV4_UDP_HEADER_SIZE: u64 = 28;

use std::collections::BTreeMap;
use std::collections::btree_map::Iter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;


pub type FlowId = u32;


#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowStats {
    pub tx_packets: u64,
    pub tx_bytes: u64,
    pub rx_packets: u64,
    pub rx_bytes: u64,
}


/// Passive per-flow statistics, installed across all endpoints before a
/// trial runs. Byte counts are taken at the IP level.
#[derive(Clone, Debug, Default)]
pub struct FlowMonitor {
    stats: BTreeMap<FlowId, FlowStats>,
    next_flow_id: FlowId,
}

impl FlowMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stats: BTreeMap::new(),
            next_flow_id: 1,
        }
    }

    pub fn register_flow(&mut self) -> FlowId {
        let flow_id = self.next_flow_id;

        self.next_flow_id += 1;
        self.stats.insert(flow_id, FlowStats::default());

        flow_id
    }

    pub fn record_tx(&mut self, flow_id: FlowId, bytes: u64) {
        if let Some(stats) = self.stats.get_mut(&flow_id) {
            stats.tx_packets += 1;
            stats.tx_bytes += bytes;
        }
    }

    pub fn record_rx(&mut self, flow_id: FlowId, bytes: u64) {
        if let Some(stats) = self.stats.get_mut(&flow_id) {
            stats.rx_packets += 1;
            stats.rx_bytes += bytes;
        }
    }

    pub fn flow_stats(&self) -> Iter<'_, FlowId, FlowStats> {
        self.stats.iter()
    }

    /// Diagnostic dump of every flow, overwriting `path`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be created or written.
    pub fn serialize_to_xml_file(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);

        writeln!(writer, "<?xml version=\"1.0\" ?>")?;
        writeln!(writer, "<FlowMonitor>")?;
        writeln!(writer, "  <FlowStats>")?;

        for (flow_id, stats) in &self.stats {
            writeln!(
                writer,
                "    <Flow flowId=\"{}\" txPackets=\"{}\" txBytes=\"{}\" \
                 rxPackets=\"{}\" rxBytes=\"{}\" />",
                flow_id,
                stats.tx_packets,
                stats.tx_bytes,
                stats.rx_packets,
                stats.rx_bytes
            )?;
        }

        writeln!(writer, "  </FlowStats>")?;
        writeln!(writer, "</FlowMonitor>")?;
        writer.flush()
    }
}


#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn flow_ids_start_at_one_and_increase() {
        let mut monitor = FlowMonitor::new();

        assert_eq!(1, monitor.register_flow());
        assert_eq!(2, monitor.register_flow());
    }

    #[test]
    fn tx_and_rx_accounting() {
        let mut monitor = FlowMonitor::new();
        let flow = monitor.register_flow();

        monitor.record_tx(flow, 1478);
        monitor.record_tx(flow, 1478);
        monitor.record_rx(flow, 1478);

        let (_, stats) = monitor.flow_stats().next().unwrap();

        assert_eq!(2, stats.tx_packets);
        assert_eq!(2956, stats.tx_bytes);
        assert_eq!(1, stats.rx_packets);
        assert_eq!(1478, stats.rx_bytes);
    }

    #[test]
    fn recording_on_unknown_flow_is_ignored() {
        let mut monitor = FlowMonitor::new();

        monitor.record_rx(99, 1478);

        assert_eq!(0, monitor.flow_stats().count());
    }

    #[test]
    fn xml_dump_overwrites_previous_contents() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("flow.xml");

        let mut first = FlowMonitor::new();
        let flow = first.register_flow();
        first.record_tx(flow, 1478);
        first.serialize_to_xml_file(&path).unwrap();

        let second = FlowMonitor::new();
        second.serialize_to_xml_file(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();

        assert!(contents.contains("<FlowMonitor>"));
        assert!(!contents.contains("<Flow "));
    }
}
